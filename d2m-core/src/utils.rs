//! Identifier transforms shared by every target language.

/// Convert a SQL identifier to capitalized camel case
/// (e.g., "order_items" -> "OrderItems", "HTTP_log" -> "HttpLog").
///
/// Each `_`-separated segment keeps its first character upper-cased and the
/// rest lower-cased, so the transform never preserves inner capitals.
pub fn to_capitalized_camel(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
            }
        })
        .collect()
}

/// Convert a string to snake_case (e.g., "OrderItems" -> "order_items").
///
/// Dashes and spaces become underscores; an underscore is only inserted
/// before an upper-case letter that follows a lower-case letter or digit.
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;
    for c in s.chars() {
        let c = if c == '-' || c == ' ' { '_' } else { c };
        if c.is_uppercase()
            && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit())
        {
            result.push('_');
        }
        result.extend(c.to_lowercase());
        prev = Some(c);
    }
    result
}

/// Strip exactly one trailing character from a plural table name.
///
/// This is a fixed heuristic, not a dictionary lookup: "users" -> "user",
/// "categories" -> "categorie", "people" -> "peopl".
pub fn singularize(s: &str) -> &str {
    match s.char_indices().next_back() {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

//! Line-oriented source builder.

use super::Indent;

/// Fluent builder that tracks the current indentation depth.
///
/// ```
/// use db2model_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::python()
///     .block("class User(Base):", |b| b.line("__tablename__ = \"users\""))
///     .build();
///
/// assert_eq!(code, "class User(Base):\n    __tablename__ = \"users\"\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    depth: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            depth: 0,
            indent,
            buffer: String::new(),
        }
    }

    pub fn python() -> Self {
        Self::new(Indent::PYTHON)
    }

    /// Append a line at the current depth.
    pub fn line(mut self, text: &str) -> Self {
        for _ in 0..self.depth {
            self.buffer.push_str(self.indent.as_str());
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
        self
    }

    /// Append an empty line, never indented.
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Append a `#` comment at the current depth.
    pub fn comment(self, text: &str) -> Self {
        self.line(&format!("# {}", text))
    }

    /// Append `header`, then the body one level deeper.
    pub fn block<F>(mut self, header: &str, body: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self = self.line(header);
        self.depth += 1;
        let mut builder = body(self);
        builder.depth = builder.depth.saturating_sub(1);
        builder
    }

    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    pub fn each<T, I, F>(self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        items.into_iter().fold(self, f)
    }

    pub fn build(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block() {
        let code = CodeBuilder::python()
            .block("class Base(MappedAsDataclass, DeclarativeBase):", |b| {
                b.line("pass")
            })
            .line("x = 1")
            .build();

        assert_eq!(
            code,
            "class Base(MappedAsDataclass, DeclarativeBase):\n    pass\nx = 1\n"
        );
    }

    #[test]
    fn test_nested_block_with_comment() {
        let code = CodeBuilder::python()
            .block("if x:", |b| b.comment("nothing").block("if y:", |b| b.line("pass")))
            .blank()
            .line("z = 2")
            .build();

        assert_eq!(code, "if x:\n    # nothing\n    if y:\n        pass\n\nz = 2\n");
    }

    #[test]
    fn test_conditional_and_each() {
        let code = CodeBuilder::python()
            .when(false, |b| b.line("skipped"))
            .each(["a", "b"], |b, name| b.line(&format!("{} = None", name)))
            .build();

        assert_eq!(code, "a = None\nb = None\n");
    }

    #[test]
    fn test_custom_indent() {
        let indent = Indent::spaces(2).unwrap_or_default();
        let code = CodeBuilder::new(indent).block("def f():", |b| b.line("return 1")).build();
        assert_eq!(code, "def f():\n  return 1\n");
    }
}

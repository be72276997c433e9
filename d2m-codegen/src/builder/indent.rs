//! Indentation unit for generated code.

/// One level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(&'static str);

impl Indent {
    /// Four spaces, as PEP 8 asks.
    pub const PYTHON: Self = Self("    ");

    pub fn spaces(width: usize) -> Option<Self> {
        const SPACES: &str = "        ";
        if width == 0 || width > SPACES.len() {
            return None;
        }
        Some(Self(&SPACES[..width]))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::PYTHON
    }
}

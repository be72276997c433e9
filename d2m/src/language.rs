//! Unified language dispatch.
//!
//! Centralizes language-specific generator creation and metadata.

use db2model_codegen::LanguageCodegen;
use db2model_codegen_python::PythonCodegen;
use db2model_ir::Language;

/// Language-specific support for code generation.
pub struct LanguageSupport {
    language: Language,
    /// File extension with dot (e.g., ".py").
    pub extension: &'static str,
}

impl LanguageSupport {
    /// Get language support for the given language.
    pub fn get(language: Language) -> Self {
        match language {
            Language::Python => Self {
                language,
                extension: ".py",
            },
        }
    }

    /// Create a generator for this language.
    pub fn codegen(&self) -> Box<dyn LanguageCodegen> {
        match self.language {
            Language::Python => Box::new(PythonCodegen::new()),
        }
    }
}

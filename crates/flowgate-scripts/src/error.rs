use thiserror::Error;

use crate::template::TemplateError;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Invalid currency symbol: {0}")]
    InvalidSymbol(String),

    #[error("Template {name} failed to compile: {reason}")]
    Template { name: String, reason: TemplateError },

    #[error("Template error: {0}")]
    Compile(#[from] TemplateError),
}

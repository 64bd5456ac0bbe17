// ⚠️ Model Errors - Typed failures for construction and linking
// I/O layers wrap these with anyhow context; the model itself stays typed.

use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    /// A numeric field could not be converted to a float
    #[error("invalid {field} value {value:?}: {source}")]
    InvalidNumber {
        field: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// A close-approach time did not match `YYYY-MMM-DD HH:MM`
    #[error("invalid approach time {value:?}: {source}")]
    InvalidTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("NEO designation must not be empty")]
    EmptyDesignation,

    /// Linking found an approach whose designation has no NEO
    #[error("close approach references unknown NEO designation {0:?}")]
    UnknownDesignation(String),

    #[error("duplicate NEO designation {0:?}")]
    DuplicateDesignation(String),

    /// Serialization or NEO access attempted before linking
    #[error("close approach for {0:?} is not linked to a NEO")]
    Unlinked(String),
}

impl ModelError {
    pub fn invalid_number(
        field: &'static str,
        value: &str,
        source: std::num::ParseFloatError,
    ) -> Self {
        ModelError::InvalidNumber {
            field,
            value: value.to_string(),
            source,
        }
    }
}

//! Domain-level error taxonomy for CrossBench.

/// Reasons a single raw record is rejected by the ingestion filter.
///
/// These are local failures: the record is skipped and counted, the run
/// continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("record #{index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("record #{index} has no usable name")]
    MissingName { index: usize },

    #[error("record '{name}' field {field} is not numeric: {value}")]
    NotNumeric {
        name: String,
        field: String,
        value: String,
    },
}

/// CrossBench domain errors.
#[derive(Debug, thiserror::Error)]
pub enum CrossbenchError {
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("duplicate model name: {0}")]
    DuplicateName(String),

    #[error("registry is empty: no record produced a positive aggregate score")]
    EmptyRegistry,

    #[error("invalid scoring config: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CrossBench domain operations.
pub type Result<T> = std::result::Result<T, CrossbenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossbench_error_display() {
        let err = CrossbenchError::InvalidPayload("expected array".to_string());
        assert!(err.to_string().contains("invalid payload"));

        let err = CrossbenchError::DuplicateName("gpt-4o".to_string());
        assert!(err.to_string().contains("gpt-4o"));

        assert!(CrossbenchError::EmptyRegistry
            .to_string()
            .contains("registry is empty"));
    }

    #[test]
    fn test_not_numeric_error_names_field() {
        let err = IngestError::NotNumeric {
            name: "model-x".to_string(),
            field: "input_price".to_string(),
            value: "\"cheap\"".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("model-x"));
        assert!(msg.contains("input_price"));
    }

    #[test]
    fn test_ingest_error_converts() {
        let err: CrossbenchError = IngestError::MissingName { index: 3 }.into();
        assert!(err.to_string().contains("record #3"));
    }
}

use thiserror::Error;

/// Failure talking to the vocabulary store service.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store responded with status {0}")]
    Status(u16),

    #[error("could not decode store response: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing heading: {0}")]
    MissingHeading(String),

    #[error("bad row {number}{}", field_suffix(.field))]
    BadRow {
        number: usize,
        field: Option<String>,
    },
}

fn field_suffix(field: &Option<String>) -> String {
    field
        .as_deref()
        .map(|f| format!(", field: {}", f))
        .unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Csv(#[from] CsvError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_row_message_includes_field() {
        let err = CsvError::BadRow {
            number: 3,
            field: Some("translation".to_string()),
        };
        assert_eq!(err.to_string(), "bad row 3, field: translation");

        let err = CsvError::BadRow {
            number: 4,
            field: None,
        };
        assert_eq!(err.to_string(), "bad row 4");
    }

    #[test]
    fn test_app_error_is_transparent_over_store() {
        let err: AppError = StoreError::Status(503).into();
        assert_eq!(err.to_string(), "store responded with status 503");
    }
}

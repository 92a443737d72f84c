//! Error types for the projection engine.
//!
//! The projection itself never fails: malformed inputs degrade to defined
//! defaults. These errors cover the edges around it (loading configuration,
//! looking up a period for drill-down, writing exports).

use thiserror::Error;

/// The main error type for the projection engine.
///
/// # Example
///
/// ```
/// use aba_proforma::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/assumptions.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/assumptions.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A drill-down was requested for a period label that is not in the series.
    #[error("Period not found: {label}")]
    PeriodNotFound {
        /// The label that was requested.
        label: String,
    },

    /// An export was requested for a sheet the workbook does not contain.
    #[error("Sheet not found: {name}")]
    SheetNotFound {
        /// The sheet name that was requested.
        name: String,
    },

    /// A partial assumption override does not fit the assumption set.
    #[error("Invalid assumptions: {message}")]
    InvalidAssumptions {
        /// A description of the mismatch.
        message: String,
    },

    /// Writing an export failed.
    #[error("Export error: {message}")]
    ExportError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        EngineError::ExportError {
            message: error.to_string(),
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::ExportError {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/roadmap.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/roadmap.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_period_not_found_displays_label() {
        let error = EngineError::PeriodNotFound {
            label: "Year 9 Q1".to_string(),
        };
        assert_eq!(error.to_string(), "Period not found: Year 9 Q1");
    }

    #[test]
    fn test_sheet_not_found_displays_name() {
        let error = EngineError::SheetNotFound {
            name: "Cash_Flow".to_string(),
        };
        assert_eq!(error.to_string(), "Sheet not found: Cash_Flow");
    }

    #[test]
    fn test_io_error_converts_to_export_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let error: EngineError = io.into();
        assert!(matches!(error, EngineError::ExportError { .. }));
        assert!(error.to_string().contains("read-only"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_period_not_found() -> EngineResult<()> {
            Err(EngineError::PeriodNotFound {
                label: "Month 61".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_period_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}

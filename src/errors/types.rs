//! # Error Types
//!
//! Error types for the sidecar health-check plugin using `thiserror`.

/// Custom result type for plugin operations
pub type Result<T> = std::result::Result<T, HealthPluginError>;

/// Main error type for the health-check plugin
#[derive(thiserror::Error, Debug)]
pub enum HealthPluginError {
    /// The inbound listener hook was invoked without a listener to mutate
    #[error("listener not defined in mutable {details}")]
    ListenerNotDefined { details: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O errors with additional context
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {context}")]
    Serialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
        context: String,
    },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },
}

impl HealthPluginError {
    /// Create a missing-listener error carrying a rendering of the offending object
    pub fn listener_not_defined<D: std::fmt::Debug>(mutable: &D) -> Self {
        Self::ListenerNotDefined { details: format!("{:?}", mutable) }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), source: None }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config { message: message.into(), source: Some(source) }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    /// Attach context to an I/O error, e.g. the file being read
    pub fn io<S: Into<String>>(source: std::io::Error, context: S) -> Self {
        Self::Io { source, context: context.into() }
    }

    /// Whether this error aborts configuration generation for the listener
    pub fn is_listener_fatal(&self) -> bool {
        matches!(self, HealthPluginError::ListenerNotDefined { .. })
    }
}

impl From<std::io::Error> for HealthPluginError {
    fn from(error: std::io::Error) -> Self {
        Self::Io { source: error, context: "I/O operation failed".to_string() }
    }
}

impl From<serde_json::Error> for HealthPluginError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            source: Box::new(error),
            context: "JSON serialization failed".to_string(),
        }
    }
}

impl From<serde_yaml::Error> for HealthPluginError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::Serialization {
            source: Box::new(error),
            context: "YAML serialization failed".to_string(),
        }
    }
}

impl From<config::ConfigError> for HealthPluginError {
    fn from(error: config::ConfigError) -> Self {
        Self::config_with_source("Configuration loading failed", Box::new(error))
    }
}

impl From<validator::ValidationErrors> for HealthPluginError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_validation_messages("", &errors, &mut messages);
        messages.sort();

        Self::validation(format!("Validation failed: {}", messages.join("; ")))
    }
}

fn collect_validation_messages(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<String>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path =
            if prefix.is_empty() { field.to_string() } else { format!("{}.{}", prefix, field) };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string())
                    })
                    .collect();
                out.push(format!("{}: {}", path, error_messages.join(", ")));
            }
            ValidationErrorsKind::Struct(nested) => collect_validation_messages(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_messages(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = HealthPluginError::config("Test configuration error");
        assert!(matches!(error, HealthPluginError::Config { .. }));
        assert_eq!(error.to_string(), "Configuration error: Test configuration error");
    }

    #[test]
    fn test_listener_not_defined_carries_details() {
        #[derive(Debug)]
        struct Mutable {
            chains: usize,
        }

        let error = HealthPluginError::listener_not_defined(&Mutable { chains: 2 });
        assert!(error.is_listener_fatal());
        assert_eq!(error.to_string(), "listener not defined in mutable Mutable { chains: 2 }");
    }

    #[test]
    fn test_validation_error() {
        let error = HealthPluginError::validation_field("Log level cannot be empty", "log_level");
        assert!(!error.is_listener_fatal());
        if let HealthPluginError::Validation { field, .. } = error {
            assert_eq!(field, Some("log_level".to_string()));
        } else {
            panic!("expected validation error");
        }
    }

    #[test]
    fn test_error_conversions() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: HealthPluginError = io_error.into();
        assert!(matches!(error, HealthPluginError::Io { .. }));

        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error: HealthPluginError = json_error.into();
        assert!(matches!(error, HealthPluginError::Serialization { .. }));

        let yaml_error = serde_yaml::from_str::<Vec<u32>>("{ not: a list }").unwrap_err();
        let error: HealthPluginError = yaml_error.into();
        assert!(error.to_string().contains("YAML"));
    }
}

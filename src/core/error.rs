//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A level name with no known severity
    #[error("Unknown log level: '{name}'")]
    UnknownLevel { name: String },

    /// A time spec name with no known precision
    #[error("Invalid time spec: '{spec}'")]
    InvalidTimeSpec { spec: String },

    /// A sink failed to write or flush a rendered line
    #[error("Sink '{sink}' failed to write: {source}")]
    SinkWrite {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// The dispatcher worker thread could not be spawned
    #[error("Failed to spawn dispatcher worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}

impl LoggerError {
    /// Create an unknown level error
    pub fn unknown_level(name: impl Into<String>) -> Self {
        LoggerError::UnknownLevel { name: name.into() }
    }

    /// Create an invalid time spec error
    pub fn invalid_time_spec(spec: impl Into<String>) -> Self {
        LoggerError::InvalidTimeSpec { spec: spec.into() }
    }

    /// Create a sink write error
    pub fn sink_write(sink: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkWrite {
            sink: sink.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}

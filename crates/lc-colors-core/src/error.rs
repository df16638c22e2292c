//! Error type shared by every stage of the coloring pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LcError>;

#[derive(Debug, Error)]
pub enum LcError {
    /// A collaborating GRASS module is not installed.
    #[error("The '{name}' module was not found, install it first:\n{hint}")]
    MissingService { name: String, hint: String },

    #[error("Options <referencemap>, <color_column> and <class_column> must be given together (missing: {})", missing.join(", "))]
    IncompleteAttributeSource { missing: Vec<&'static str> },

    #[error("Input map name must not be empty")]
    EmptyMapName,

    #[error("Unknown raster datatype '{0}'")]
    UnknownDataType(String),

    #[error("Unexpected output from {command}: {detail}")]
    MalformedOutput { command: String, detail: String },

    #[error("{command} failed with {status}")]
    CommandFailed { command: String, status: String },

    #[error("Rule stream for {command} failed: {source}")]
    RuleStream {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid options JSON: {0}")]
    Config(#[from] serde_json::Error),
}

/// A degraded path taken during a run. Logged when raised and kept on the report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        log::warn!("{message}");
        Self { message }
    }
}

use std::io;
use std::path::PathBuf;

use crate::types::ShaderStage;

/// Failures that stop the demo before it reaches the frame loop.
///
/// None of these are recoverable; callers log the diagnostic and exit.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// Window, context, or GL function loading failed.
    #[error("initialization failed: {0}")]
    Initialization(String),
    #[error("{stage} shader compile error: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("program link error: {log}")]
    Link { log: String },
    #[error("failed to open shader file {path}: {source}", path = .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SetupError {
    pub(crate) fn init(message: impl Into<String>) -> Self {
        Self::Initialization(message.into())
    }
}

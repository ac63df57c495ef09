//! Build error types

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used throughout the build pipeline
pub type Result<T> = std::result::Result<T, BuildError>;

/// Every failure the pipeline can raise. None of these are recovered
/// locally: the first one aborts the build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("path error: {path:?} is not under content root {root:?}")]
    Path { path: PathBuf, root: PathBuf },

    #[error("unsupported content: {path:?}")]
    UnsupportedContent { path: PathBuf },

    #[error("parse error in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("missing field `{field}` in {path:?}")]
    MissingField { path: PathBuf, field: String },

    #[error("unsafe output filename `{stem}` produced by {path:?}")]
    UnsafeFilename { path: PathBuf, stem: String },

    #[error("external tool `{tool}` failed: {message}")]
    ExternalTool { tool: String, message: String },

    #[error("template error while rendering for {path:?}")]
    Template {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },

    #[error("failed to load templates from {path:?}")]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },

    #[error("IO error at {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn parse(path: impl AsRef<Path>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            message: message.to_string(),
        }
    }

    pub fn missing_field(path: impl AsRef<Path>, field: impl Into<String>) -> Self {
        Self::MissingField {
            path: path.as_ref().to_path_buf(),
            field: field.into(),
        }
    }

    pub fn template(path: impl AsRef<Path>, source: tera::Error) -> Self {
        Self::Template {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Short name of the error kind, used in CLI reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Path { .. } => "PathError",
            Self::UnsupportedContent { .. } => "UnsupportedContentError",
            Self::Parse { .. } => "ParseError",
            Self::MissingField { .. } => "MissingFieldError",
            Self::UnsafeFilename { .. } => "UnsafeFilenameError",
            Self::ExternalTool { .. } => "ExternalToolError",
            Self::Template { .. } | Self::TemplateLoad { .. } => "TemplateError",
            Self::Io { .. } => "IoError",
        }
    }
}

/// Attach a path to an `io::Result`
pub(crate) trait IoResultExt<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| BuildError::io(path, e))
    }
}

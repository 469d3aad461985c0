use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GroupingError {
    Input { path: PathBuf, source: std::io::Error },
    Output { path: PathBuf, source: std::io::Error },
    Serialization(serde_json::Error),
    Config(String),
}

impl fmt::Display for GroupingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingError::Input { path, source } => {
                write!(f, "Error while reading file {}: {}", path.display(), source)
            }
            GroupingError::Output { path, source } => {
                write!(f, "Error while writing to file {}: {}", path.display(), source)
            }
            GroupingError::Serialization(e) => write!(f, "Serialization error: {}", e),
            GroupingError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for GroupingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GroupingError::Input { source, .. } | GroupingError::Output { source, .. } => Some(source),
            GroupingError::Serialization(e) => Some(e),
            GroupingError::Config(_) => None,
        }
    }
}

impl GroupingError {
    pub fn input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GroupingError::Input { path: path.into(), source }
    }

    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GroupingError::Output { path: path.into(), source }
    }
}

impl From<serde_json::Error> for GroupingError {
    fn from(err: serde_json::Error) -> Self {
        GroupingError::Serialization(err)
    }
}

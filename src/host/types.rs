use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`super::FileSystemHost`]
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Invalid include or exclude glob pattern
    #[error("Invalid bundle pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    /// Glob patterns that parse one by one but cannot be compiled together
    #[error("Failed to compile bundle patterns [{}]: {source}", patterns.join(", "))]
    InvalidPatternSet {
        patterns: Vec<String>,
        #[source]
        source: globset::Error,
    },
    /// Error when failing to read a bundle file
    #[error("Failed to read satellite bundle {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Error when a bundle file is not valid JSON
    #[error("Failed to parse satellite bundle {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Background discovery task failed
    #[error("Satellite bundle discovery task failed: {0}")]
    Discovery(#[from] tokio::task::JoinError),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use globset::Glob;
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn pattern_set_error_lists_every_pattern() {
        let source = Glob::new("locales/[").unwrap_err();
        let error = LoaderError::InvalidPatternSet {
            patterns: vec!["node_modules/**".to_string(), "target/**".to_string()],
            source,
        };

        assert_that!(
            error.to_string(),
            starts_with("Failed to compile bundle patterns [node_modules/**, target/**]: ")
        );
    }
}

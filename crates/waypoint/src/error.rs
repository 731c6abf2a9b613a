#![forbid(unsafe_code)]

//! Unified error type for loading tours.
//!
//! Runtime navigation never fails: misuse and unresolvable targets are
//! logged and skipped. The only fallible edges are reading configuration
//! and turning step descriptions into steps, and both surface here.

use std::fmt;

use waypoint_runtime::{ConfigError, StepError};

/// Top-level error type for Waypoint.
#[derive(Debug)]
pub enum Error {
    /// Reading, parsing, or validating a configuration source failed.
    Config(ConfigError),
    /// A step description could not be turned into a step.
    Step(StepError),
}

/// Standard result type for Waypoint APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Error type label for logs.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Config(ConfigError::Io(_)) => "io",
            Self::Config(ConfigError::Validation(_)) => "validation",
            Self::Config(_) => "parse",
            Self::Step(_) => "step",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Step(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Step(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<StepError> for Error {
    fn from(err: StepError) -> Self {
        Self::Step(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn labels_follow_the_failing_edge() {
        let io = Error::from(ConfigError::Io(std::io::Error::other("gone")));
        assert_eq!(io.error_type(), "io");
        let invalid = Error::from(ConfigError::Validation(vec!["bad".into()]));
        assert_eq!(invalid.error_type(), "validation");
        let step = Error::from(StepError::EmptyTarget { index: 2 });
        assert_eq!(step.error_type(), "step");
    }

    #[test]
    fn display_and_source_delegate() {
        let err = Error::from(StepError::EmptyTarget { index: 4 });
        assert_eq!(
            err.to_string(),
            "step 4: anchored step has an empty target selector"
        );
        assert!(err.source().is_some());
    }
}

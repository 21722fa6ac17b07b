//! Exit codes for the CLI

use relnote_core::error::{ConfigError, RangeReadError, RelnoteError};
use relnote_publish::PublishError;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error (revision range could not be read)
pub const GIT_ERROR: i32 = 3;

/// Publishing the release failed
pub const PUBLISH_ERROR: i32 = 6;

/// Pick the exit code for a fatal error
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<RelnoteError>() {
        return match err {
            RelnoteError::Config(_) => CONFIG_ERROR,
            RelnoteError::RangeRead(_) => GIT_ERROR,
        };
    }

    if err.is::<ConfigError>() {
        CONFIG_ERROR
    } else if err.is::<RangeReadError>() {
        GIT_ERROR
    } else if err.is::<PublishError>() {
        PUBLISH_ERROR
    } else {
        ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors() {
        let err = anyhow::Error::new(ConfigError::MissingField("release.workspace".to_string()));
        assert_eq!(for_error(&err), CONFIG_ERROR);

        let err = anyhow::Error::new(RelnoteError::Config(ConfigError::ParseError(
            "bad".to_string(),
        )));
        assert_eq!(for_error(&err), CONFIG_ERROR);
    }

    #[test]
    fn test_range_read_errors() {
        let err = anyhow::Error::new(RangeReadError::UnknownRevision {
            revision: "v9".to_string(),
            reason: "not found".to_string(),
        });
        assert_eq!(for_error(&err), GIT_ERROR);

        let err = anyhow::Error::new(RelnoteError::RangeRead(RangeReadError::OpenFailed(
            "locked".to_string(),
        )));
        assert_eq!(for_error(&err), GIT_ERROR);
    }

    #[test]
    fn test_publish_errors() {
        let err = anyhow::Error::new(PublishError::MissingToken);
        assert_eq!(for_error(&err), PUBLISH_ERROR);
    }

    #[test]
    fn test_other_errors() {
        assert_eq!(for_error(&anyhow::anyhow!("boom")), ERROR);
        let err = anyhow::Error::new(std::io::Error::other("disk full"));
        assert_eq!(for_error(&err), ERROR);
    }
}

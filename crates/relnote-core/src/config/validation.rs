//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Characters that would make a release tag unsafe as a file or ref name
const UNSAFE_PREFIX_CHARS: &[char] = &[':', '/', '\\', '~', '^', '?', '*', '['];

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    if let Some(prefix) = &config.release.prefix {
        validate_prefix(prefix)?;
    }
    validate_graph(config)?;
    validate_publish(config)?;
    debug!("configuration validation passed");
    Ok(())
}

/// Validate a release prefix.
///
/// The prefix becomes part of the release tag, so it must be non-empty and
/// contain no whitespace, `:` or path separators.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Err(invalid("release.prefix", "prefix cannot be empty"));
    }

    if prefix.chars().any(char::is_whitespace) {
        return Err(invalid("release.prefix", "prefix cannot contain whitespace"));
    }

    if let Some(c) = prefix.chars().find(|c| UNSAFE_PREFIX_CHARS.contains(c)) {
        return Err(invalid(
            "release.prefix",
            &format!("prefix cannot contain '{}'", c),
        ));
    }

    Ok(())
}

fn validate_graph(config: &Config) -> Result<()> {
    match config.graph.program() {
        Some(program) if !program.trim().is_empty() => {}
        _ => return Err(invalid("graph.runner", "runner cannot be empty")),
    }

    if config.graph.task.trim().is_empty() {
        return Err(invalid("graph.task", "task cannot be empty"));
    }

    Ok(())
}

fn validate_publish(config: &Config) -> Result<()> {
    let api_url = &config.publish.api_url;
    if !api_url.starts_with("https://") && !api_url.starts_with("http://") {
        return Err(invalid(
            "publish.api_url",
            "must be an http(s) URL",
        ));
    }

    if let Some(repository) = &config.publish.repository {
        let valid = repository
            .split_once('/')
            .is_some_and(|(owner, name)| {
                !owner.is_empty() && !name.is_empty() && !name.contains('/')
            });
        if !valid {
            return Err(invalid("publish.repository", "must be in 'owner/name' form"));
        }
    }

    Ok(())
}

fn invalid(field: &str, message: &str) -> crate::error::RelnoteError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}

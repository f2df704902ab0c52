//! Error types for Broadsheet.

use std::io;

/// Errors produced by the Broadsheet crates.
#[derive(Debug, thiserror::Error)]
pub enum BroadsheetError {
    #[error("malformed bridge message: {0}")]
    MalformedMessage(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("content error: {0}")]
    Content(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BroadsheetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_message_display() {
        let e = BroadsheetError::MalformedMessage("missing name".into());
        assert_eq!(format!("{e}"), "malformed bridge message: missing name");
    }

    #[test]
    fn config_error_display() {
        let e = BroadsheetError::Config("bad page size".into());
        assert_eq!(format!("{e}"), "config error: bad page size");
    }

    #[test]
    fn content_error_display() {
        let e = BroadsheetError::Content("surface gone".into());
        assert_eq!(format!("{e}"), "content error: surface gone");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: BroadsheetError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: BroadsheetError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: BroadsheetError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(BroadsheetError::Content("oops".into()));
        assert!(r.is_err());
    }
}

// ABOUTME: Error types for the extractor including the ErrorCode enum and ExtractError struct.
// ABOUTME: Every public entry point reports failures through these typed categories.

use std::fmt;

/// Error codes representing different categories of extraction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Network,
    Timeout,
    Parse,
    NotFound,
    Io,
    Automation,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Network => "network error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Parse => "parse error",
            ErrorCode::NotFound => "content not found",
            ErrorCode::Io => "io error",
            ErrorCode::Automation => "browser automation error",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for extraction operations.
///
/// `target` is the URL or file path the operation was working on and `op`
/// names the step that failed (e.g. `Fetch`, `FormatTable`, `Render`).
#[derive(Debug, thiserror::Error)]
pub struct ExtractError {
    pub code: ErrorCode,
    pub target: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scribe: {} {}: {}", self.op, self.target, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ExtractError {
    fn with_code(
        code: ErrorCode,
        target: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            target: target.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(
        target: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::InvalidUrl, target, op, source)
    }

    /// Create a Network error.
    pub fn network(
        target: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Network, target, op, source)
    }

    /// Create a Timeout error.
    pub fn timeout(
        target: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Timeout, target, op, source)
    }

    /// Create a Parse error.
    pub fn parse(
        target: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Parse, target, op, source)
    }

    /// Create a NotFound error.
    pub fn not_found(
        target: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::NotFound, target, op, source)
    }

    /// Create an Io error.
    pub fn io(
        target: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Io, target, op, source)
    }

    /// Create an Automation error.
    pub fn automation(
        target: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Automation, target, op, source)
    }

    /// Returns true for transport failures, including timeouts.
    pub fn is_network(&self) -> bool {
        matches!(self.code, ErrorCode::Network | ErrorCode::Timeout)
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    /// Returns true if this is a Parse error.
    pub fn is_parse(&self) -> bool {
        self.code == ErrorCode::Parse
    }

    /// Returns true if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }

    /// Returns true if this is an Io error.
    pub fn is_io(&self) -> bool {
        self.code == ErrorCode::Io
    }

    /// Returns true if this is an Automation error.
    pub fn is_automation(&self) -> bool {
        self.code == ErrorCode::Automation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_includes_op_target_and_source() {
        let err = ExtractError::network(
            "https://example.com",
            "Fetch",
            Some(anyhow::anyhow!("HTTP status 503")),
        );
        assert_eq!(
            err.to_string(),
            "scribe: Fetch https://example.com: network error: HTTP status 503"
        );
    }

    #[test]
    fn display_without_source() {
        let err = ExtractError::not_found("https://example.com", "LocateContent", None);
        assert_eq!(
            err.to_string(),
            "scribe: LocateContent https://example.com: content not found"
        );
    }

    #[test]
    fn timeout_counts_as_network() {
        let err = ExtractError::timeout("https://example.com", "Fetch", None);
        assert!(err.is_timeout());
        assert!(err.is_network());
        assert!(!err.is_parse());
    }

    #[test]
    fn helpers_match_codes() {
        assert!(ExtractError::io("a.pdf", "ReadPdf", None).is_io());
        assert!(ExtractError::parse("a.pdf", "ReadPdf", None).is_parse());
        assert!(ExtractError::automation("u", "Render", None).is_automation());
        assert!(ExtractError::invalid_url("u", "Fetch", None).is_invalid_url());
        assert!(!ExtractError::automation("u", "Render", None).is_network());
    }
}

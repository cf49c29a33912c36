//! Most-recent-status channel.
//!
//! Every user-triggered operation overwrites the single retained message;
//! there is no history.

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Failure,
}

/// Human-readable outcome of the last user-triggered operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    severity: Severity,
    text: String,
}

impl StatusMessage {
    /// Create a success message.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            text: text.into(),
        }
    }

    /// Create a failure message.
    #[must_use]
    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Failure,
            text: text.into(),
        }
    }

    /// Severity of the message.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Message text without the severity marker.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.severity {
            Severity::Success => write!(f, "✅ {}", self.text),
            Severity::Failure => write!(f, "❌ {}", self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rendering() {
        let status = StatusMessage::success("Logged in!");
        assert_eq!(status.severity(), Severity::Success);
        assert_eq!(status.to_string(), "✅ Logged in!");
    }

    #[test]
    fn test_failure_rendering() {
        let status = StatusMessage::failure("user exists");
        assert_eq!(status.severity(), Severity::Failure);
        assert_eq!(status.to_string(), "❌ user exists");
    }

    #[test]
    fn test_text_excludes_marker() {
        assert_eq!(StatusMessage::failure("Please login first!").text(), "Please login first!");
    }
}

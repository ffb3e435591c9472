//! Webhook payloads sent by the telephony provider.

use serde::Deserialize;

/// Fields of the "incoming call" webhook the router looks at.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingCall {
    /// Caller id. Absent when the endpoint is hit by something other than
    /// the provider (e.g. a browser).
    #[serde(rename = "From", default)]
    pub from: Option<String>,

    /// Provider call identifier, only used for logging.
    #[serde(rename = "CallSid", default)]
    pub call_sid: Option<String>,
}

impl IncomingCall {
    /// Caller id, if present and not blank.
    #[must_use]
    pub fn caller(&self) -> Option<&str> {
        self.from.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Fields of the "dial completed" webhook.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DialCompleted {
    /// Outcome of the fan-out dial.
    #[serde(rename = "DialCallStatus", default)]
    pub dial_call_status: Option<String>,

    /// Provider call identifier, only used for logging.
    #[serde(rename = "CallSid", default)]
    pub call_sid: Option<String>,
}

impl DialCompleted {
    /// Parsed dial outcome.
    #[must_use]
    pub fn status(&self) -> DialStatus {
        self.dial_call_status
            .as_deref()
            .map_or(DialStatus::Other(String::new()), DialStatus::parse)
    }
}

/// Terminal status of a fan-out dial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialStatus {
    /// Someone picked up.
    Completed,
    /// Someone picked up and the call is still up.
    Answered,
    /// Every destination rang out.
    NoAnswer,
    /// Every destination was busy.
    Busy,
    /// The provider could not place the call.
    Failed,
    /// The caller hung up while ringing.
    Canceled,
    /// Anything else the provider reports.
    Other(String),
}

impl DialStatus {
    /// Parse the provider's `DialCallStatus` value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "completed" => Self::Completed,
            "answered" => Self::Answered,
            "no-answer" => Self::NoAnswer,
            "busy" => Self::Busy,
            "failed" => Self::Failed,
            "canceled" => Self::Canceled,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether nobody took the call and the caller should hear the fallback.
    #[must_use]
    pub const fn is_unanswered(&self) -> bool {
        matches!(self, Self::NoAnswer | Self::Busy)
    }

    /// Label used in logs and metrics.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "completed",
            Self::Answered => "answered",
            Self::NoAnswer => "no-answer",
            Self::Busy => "busy",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
            Self::Other(raw) => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unanswered_statuses() {
        assert!(DialStatus::parse("no-answer").is_unanswered());
        assert!(DialStatus::parse("busy").is_unanswered());
        assert!(!DialStatus::parse("completed").is_unanswered());
        assert!(!DialStatus::parse("failed").is_unanswered());
        assert!(!DialStatus::parse("").is_unanswered());
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        assert_eq!(
            DialStatus::parse("ringing"),
            DialStatus::Other("ringing".to_string())
        );
        assert_eq!(DialStatus::parse("ringing").as_str(), "ringing");
    }

    #[test]
    fn test_caller_ignores_blank() {
        let call = IncomingCall {
            from: Some("  ".to_string()),
            call_sid: None,
        };
        assert!(call.caller().is_none());

        let call = IncomingCall {
            from: Some("+15551234567".to_string()),
            call_sid: None,
        };
        assert_eq!(call.caller(), Some("+15551234567"));
    }

    #[test]
    fn test_missing_status_is_not_unanswered() {
        assert!(!DialCompleted::default().status().is_unanswered());
    }
}

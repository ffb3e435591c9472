//! Call routing decisions.
//!
//! Two webhooks drive a call: "incoming call" moves it from ringing to
//! dialing, "dial completed" ends it. Nothing is remembered between them;
//! each decision is a pure function of the registry snapshot and the
//! webhook fields.
//!
//! The dial-completed webhook is not correlated with a call this router
//! dialed. Anyone able to reach the endpoint can make it speak the fallback
//! announcement, which is harmless but worth knowing.

use tracing::info;

use crate::config::TelephonyConfig;
use crate::domain::{DialCompleted, IncomingCall, PhoneNumber};
use crate::service::twiml::{Twiml, Verb};

/// Outcome of the incoming-call webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallDecision {
    /// Not a provider call (no caller id): send the client to the landing page.
    RedirectToLanding,
    /// Answer the provider with this document.
    Respond(Twiml),
}

/// Builds the control documents for both webhooks.
pub struct CallRouter {
    callback_url: String,
    dial_timeout: u32,
    caller_id: Option<String>,
    fallback_message: String,
    voice: String,
}

impl CallRouter {
    /// Create a new router from the telephony settings.
    #[must_use]
    pub fn new(config: &TelephonyConfig) -> Self {
        Self {
            callback_url: config.callback_url.clone(),
            dial_timeout: config.dial_timeout,
            caller_id: config.caller_id.clone().filter(|c| !c.trim().is_empty()),
            fallback_message: config.fallback_message.clone(),
            voice: config.voice.clone(),
        }
    }

    /// Decide what to do with an inbound call given the current numbers.
    ///
    /// Every number is rung at once. With no numbers configured the provider
    /// gets an empty document rather than an error: the caller hears the
    /// call end, the administrator fixes the registry.
    #[must_use]
    pub fn incoming_call(&self, call: &IncomingCall, numbers: Vec<PhoneNumber>) -> CallDecision {
        let Some(caller) = call.caller() else {
            return CallDecision::RedirectToLanding;
        };

        metrics::counter!("intercom_calls_total").increment(1);

        if numbers.is_empty() {
            tracing::warn!(
                caller,
                call_sid = ?call.call_sid,
                "Incoming call but no numbers are registered"
            );
            return CallDecision::Respond(Twiml::empty());
        }

        info!(
            caller,
            call_sid = ?call.call_sid,
            fan_out = numbers.len(),
            "Dialing registered numbers"
        );

        CallDecision::Respond(Twiml::empty().with(Verb::Dial {
            action: self.callback_url.clone(),
            timeout: self.dial_timeout,
            caller_id: self.caller_id.clone(),
            numbers,
        }))
    }

    /// Decide how to finish a call once the fan-out dial is over.
    #[must_use]
    pub fn dial_completed(&self, event: &DialCompleted) -> Twiml {
        let status = event.status();

        if !status.is_unanswered() {
            info!(status = status.as_str(), call_sid = ?event.call_sid, "Dial finished");
            return Twiml::empty();
        }

        metrics::counter!("intercom_fallbacks_total", "status" => status.as_str().to_string())
            .increment(1);
        info!(
            status = status.as_str(),
            call_sid = ?event.call_sid,
            "Nobody answered, playing fallback"
        );

        Twiml::empty()
            .with(Verb::Say {
                voice: self.voice.clone(),
                text: self.fallback_message.clone(),
            })
            .with(Verb::Hangup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_all;

    fn router() -> CallRouter {
        CallRouter::new(&TelephonyConfig::default())
    }

    fn call_from(from: Option<&str>) -> IncomingCall {
        IncomingCall {
            from: from.map(ToString::to_string),
            call_sid: Some("CA123".to_string()),
        }
    }

    fn completed(status: Option<&str>) -> DialCompleted {
        DialCompleted {
            dial_call_status: status.map(ToString::to_string),
            call_sid: None,
        }
    }

    #[test]
    fn test_missing_caller_redirects() {
        let numbers = parse_all(["+1555"]).unwrap();
        assert_eq!(
            router().incoming_call(&call_from(None), numbers.clone()),
            CallDecision::RedirectToLanding
        );
        assert_eq!(
            router().incoming_call(&call_from(Some("")), numbers),
            CallDecision::RedirectToLanding
        );
    }

    #[test]
    fn test_dials_every_number() {
        let numbers = parse_all(["+15550001", "+15550002", "+15550003"]).unwrap();
        let CallDecision::Respond(doc) =
            router().incoming_call(&call_from(Some("+15551234567")), numbers.clone())
        else {
            panic!("expected a document");
        };

        assert_eq!(doc.dialed_numbers(), Some(numbers.as_slice()));
        assert_eq!(doc.verbs().len(), 1);
    }

    #[test]
    fn test_empty_registry_yields_empty_document() {
        let decision = router().incoming_call(&call_from(Some("+15551234567")), vec![]);
        assert_eq!(decision, CallDecision::Respond(Twiml::empty()));
    }

    #[test]
    fn test_decision_is_deterministic() {
        let numbers = parse_all(["+1555", "+1666"]).unwrap();
        let call = call_from(Some("+15551234567"));
        let a = router().incoming_call(&call, numbers.clone());
        let b = router().incoming_call(&call, numbers);
        assert_eq!(a, b);
    }

    #[test]
    fn test_configured_caller_id_is_used() {
        let config = TelephonyConfig {
            caller_id: Some("+15559999".to_string()),
            ..TelephonyConfig::default()
        };
        let decision = CallRouter::new(&config)
            .incoming_call(&call_from(Some("+1")), parse_all(["+1555"]).unwrap());
        let CallDecision::Respond(doc) = decision else {
            panic!("expected a document");
        };
        assert!(doc.render().contains(r#"callerId="+15559999""#));
    }

    #[test]
    fn test_unanswered_plays_fallback() {
        for status in ["no-answer", "busy"] {
            let doc = router().dial_completed(&completed(Some(status)));
            assert!(matches!(doc.verbs(), [Verb::Say { .. }, Verb::Hangup]));
        }
    }

    #[test]
    fn test_answered_is_empty() {
        for status in [Some("completed"), Some("answered"), Some("failed"), None] {
            assert!(router().dial_completed(&completed(status)).is_empty());
        }
    }

    #[test]
    fn test_fallback_uses_configured_message() {
        let config = TelephonyConfig {
            fallback_message: "Gone fishing".to_string(),
            voice: "man".to_string(),
            ..TelephonyConfig::default()
        };
        let xml = CallRouter::new(&config)
            .dial_completed(&completed(Some("busy")))
            .render();
        assert!(xml.contains(r#"<Say voice="man">Gone fishing</Say><Hangup/>"#));
    }
}

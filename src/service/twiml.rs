//! Telephony control documents (TwiML).
//!
//! Only the verbs the router needs are modelled. Several `<Number>` nouns
//! inside one `<Dial>` make the provider ring them all at once and bridge
//! the first one that answers.

use std::fmt::Write;

use crate::domain::PhoneNumber;

/// Content type the provider expects for control documents.
pub const CONTENT_TYPE: &str = "application/xml";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// One instruction inside `<Response>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    /// Ring every number simultaneously, then request `action` with the outcome.
    Dial {
        /// Status callback URL.
        action: String,
        /// Seconds to ring before giving up.
        timeout: u32,
        /// Caller id shown to the destinations.
        caller_id: Option<String>,
        /// Destinations, all dialed in parallel.
        numbers: Vec<PhoneNumber>,
    },
    /// Speak `text` to the caller.
    Say {
        /// Text-to-speech voice.
        voice: String,
        /// Words to speak.
        text: String,
    },
    /// End the call.
    Hangup,
}

/// A complete control document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Twiml {
    verbs: Vec<Verb>,
}

impl Twiml {
    /// A document with no instructions; the provider simply moves on.
    #[must_use]
    pub const fn empty() -> Self {
        Self { verbs: Vec::new() }
    }

    /// Append a verb.
    #[must_use]
    pub fn with(mut self, verb: Verb) -> Self {
        self.verbs.push(verb);
        self
    }

    /// Instructions in document order.
    #[must_use]
    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    /// Whether the document carries no instruction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Numbers dialed by this document, if it dials.
    #[must_use]
    pub fn dialed_numbers(&self) -> Option<&[PhoneNumber]> {
        self.verbs.iter().find_map(|verb| match verb {
            Verb::Dial { numbers, .. } => Some(numbers.as_slice()),
            _ => None,
        })
    }

    /// Serialize to XML.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from(XML_DECLARATION);
        if self.verbs.is_empty() {
            out.push_str("<Response/>");
            return out;
        }

        out.push_str("<Response>");
        for verb in &self.verbs {
            render_verb(&mut out, verb);
        }
        out.push_str("</Response>");
        out
    }
}

fn render_verb(out: &mut String, verb: &Verb) {
    match verb {
        Verb::Dial {
            action,
            timeout,
            caller_id,
            numbers,
        } => {
            write!(
                out,
                r#"<Dial action="{}" method="GET" timeout="{timeout}""#,
                escape(action)
            )
            .ok();
            if let Some(caller_id) = caller_id {
                write!(out, r#" callerId="{}""#, escape(caller_id)).ok();
            }
            out.push('>');
            for number in numbers {
                write!(out, "<Number>{}</Number>", escape(number.as_str())).ok();
            }
            out.push_str("</Dial>");
        }
        Verb::Say { voice, text } => {
            write!(
                out,
                r#"<Say voice="{}">{}</Say>"#,
                escape(voice),
                escape(text)
            )
            .ok();
        }
        Verb::Hangup => out.push_str("<Hangup/>"),
    }
}

/// Escape text for use in XML content and attribute values.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

//! Service layer module.
//!
//! Business logic: the number registry, admin sessions and the call routing
//! decisions with the TwiML they produce.

pub mod registry;
pub mod routing;
pub mod session;
pub mod twiml;

pub use registry::NumberRegistry;
pub use routing::{CallDecision, CallRouter};
pub use session::{Session, SessionService};
pub use twiml::Twiml;

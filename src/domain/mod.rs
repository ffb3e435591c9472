//! Domain models for the intercom router.
//!
//! Destination numbers, webhook payloads from the telephony provider and
//! API contracts.

pub mod call;
pub mod dto;
pub mod number;

pub use call::{DialCompleted, DialStatus, IncomingCall};
pub use dto::{
    ExistsResponse, HelloResponse, LoginForm, NumberParam, ReplaceNumbersRequest,
    SuccessResponse,
};
pub use number::{PhoneNumber, parse_all};

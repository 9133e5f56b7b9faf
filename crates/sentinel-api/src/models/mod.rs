//! Request and response payloads.

pub mod request;
pub mod response;

pub use request::{ChatMessage, GuardRequest, InspectRequest, LogsQuery};
pub use response::GuardResponse;

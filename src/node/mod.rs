pub mod description;
mod executor;
pub mod models;
mod operation;
mod request;

pub use executor::{AligoNode, ItemResult, RunPolicy};
pub use operation::Operation;
pub use request::{AligoRequest, CancelRequest, ListRequest, MAX_RECIPIENTS, RequestEnvelope, SendMassRequest, SendRequest, SmsListRequest, parse_recipients};

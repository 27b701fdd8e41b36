//! sluice-api: Shared request, response and connection records
//!
//! Read-only records produced by the connector and the wire parser and
//! consumed by the failure taxonomy in `sluice-client`.

pub mod connection;
pub mod request;
pub mod response;

pub use connection::ConnectionKey;
pub use request::RequestInfo;
pub use response::{ResponseHistory, ResponseSummary};

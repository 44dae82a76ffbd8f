//! artscan-client library interface
//!
//! The comparison state machine ([`flow`]) and the HTTP transport
//! ([`transport`]) used by the CLI binary and by embedding consumers.

pub mod flow;
pub mod transport;

pub use flow::{ComparisonFlow, FlowError, Outcome, Phase, SelectedFile, Slot};
pub use transport::{CompareClient, TransportError};

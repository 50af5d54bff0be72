// Application layer - use cases and orchestration.
// The ledger service owns the session state; the expense form is the
// presentation layer's scratch state for the next entry.

pub mod error;
pub mod form;
pub mod reporting;
pub mod service;

pub use error::*;
pub use form::*;
pub use reporting::*;
pub use service::*;

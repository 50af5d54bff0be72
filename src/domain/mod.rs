mod expense;
mod ledger;
mod money;
mod participant;

pub use expense::*;
pub use ledger::*;
pub use money::*;
pub use participant::*;

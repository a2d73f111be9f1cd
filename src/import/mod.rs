//! Contact import: text parsing and the submission form.

pub mod flow;
pub mod parser;

pub use flow::{ImportBackend, ImportFailure, ImportForm, ImportPhase};
pub use parser::{parse, preview, Payload};

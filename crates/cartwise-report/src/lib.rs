pub mod commands;
pub mod config;
pub mod contracts;
pub mod error;
pub mod panel;
pub mod records;
pub mod setup;
pub mod state;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ReportError, ReportResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

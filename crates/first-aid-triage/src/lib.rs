//! Photo-based first-aid triage: rescoring of vision classifier output,
//! action plans, and best-effort session logging.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod triage;

//! Carbon-credit marketplace core: project eligibility assessment and the service plumbing
//! around it.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

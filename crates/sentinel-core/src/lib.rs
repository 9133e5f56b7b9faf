//! # Sentinel-Core
//!
//! Domain model shared by every Prompt Sentinel crate.
//!
//! ## Overview
//!
//! Prompt Sentinel inspects text submitted by client applications for
//! policy-relevant risk signals and records each inspected request as an
//! audit entry tied to a project and a policy. This crate holds the types
//! that cross crate boundaries:
//!
//! - **API keys**: opaque bearer credentials authorizing ingestion on
//!   behalf of a project
//! - **Projects**: named tenant contexts carrying a policy name
//! - **Verdicts**: per-category detector outputs for one inspection
//! - **Audit entries**: immutable records of inspected requests
//!
//! Detection logic lives in `sentinel-detectors`, persistence in
//! `sentinel-store`, and the HTTP surface in `sentinel-api`.

pub mod model;
pub mod verdict;

// Primary exports
pub use model::{ApiKey, AuditEntry, NewAuditEntry, Project};
pub use verdict::{ConfidenceLabel, Verdict};

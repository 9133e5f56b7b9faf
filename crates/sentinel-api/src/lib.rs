//! # Sentinel-API
//!
//! REST surface and ingestion pipeline for Prompt Sentinel.
//!
//! ## Routes
//!
//! - `POST /v1/guard` - authenticated ingestion: inspect submitted
//!   messages and record an audit entry
//! - `POST /v1/inspect` - unauthenticated trial inspection of raw text
//! - `GET /v1/logs` - session-guarded audit listing (paginated)
//! - `GET /health`, `/health/ready`, `/health/live`, `/version`:
//!   infrastructure probes
//!
//! The ingestion pipeline lives in [`pipeline`]; everything else is
//! plumbing around it.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pipeline;
pub mod router;
pub mod session;
pub mod state;

pub use config::AppConfig;
pub use error::ApiError;
pub use router::create_router_with_state;
pub use state::AppState;

//! HTTP request handlers.

pub mod guard;
pub mod health;
pub mod inspect;
pub mod logs;

pub use guard::guard;
pub use health::{health, live, ready, version};
pub use inspect::inspect;
pub use logs::list_logs;

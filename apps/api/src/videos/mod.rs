// Video lifecycle: creation, status transitions, scheduled publishing.
// This is the only place that decides when analytics are synthesized.

pub mod files;
pub mod handlers;
pub mod lifecycle;
pub mod scheduler;

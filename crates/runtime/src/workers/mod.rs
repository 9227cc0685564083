//! Worker tasks that back the runtime orchestration.
//!
//! Each open session runs its own worker, so sessions progress in parallel
//! while commands for one session stay strictly ordered.

mod session;

pub use session::{Command, SessionWorker};

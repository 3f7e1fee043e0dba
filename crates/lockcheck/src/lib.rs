//! Exhaustive thread-ordering explorer with lock tracking.
//!
//! Each simulated thread is a fixed list of actions (`LOCK r`, `UNLOCK r`, or
//! a generic step). The explorer runs every ordering of the threads, each
//! thread to completion, against one shared lock ledger, and checks the
//! ledger for an ownership cycle after every action. Everything that happens
//! is narrated into an append-only [`ExecutionLog`].
//!
//! Python bindings are available behind the `python` feature.

pub mod action;
pub mod config;
pub mod detector;
pub mod error;
pub mod explore;
pub mod ledger;
pub mod log;
pub mod permute;
pub mod runner;
pub mod thread;

#[cfg(feature = "python")]
mod python;

pub use action::{parse_action, Action, ResourceId, ThreadId};
pub use config::{ExploreConfig, Scenario, ThreadConfig};
pub use detector::DeadlockDetector;
pub use error::ConfigError;
pub use explore::{explore, DeadlockReport, ExplorationResult, Explorer};
pub use ledger::{LockLedger, Owners};
pub use log::ExecutionLog;
pub use permute::{permutations, Permutations};
pub use runner::{RunOutcome, ThreadRunner};
pub use thread::Thread;

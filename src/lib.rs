//! A single background thread that runs closures one at a time, in the order
//! they were scheduled.
//!
//! # Quick Start
//!
//! ```
//! use task_worker::prelude::*;
//!
//! let worker = TaskWorker::new().unwrap();
//!
//! worker.schedule(|| println!("runs first"));
//! schedule!(worker, || println!("then me"), || println!("and me"));
//!
//! // Dropping the worker runs everything still queued, then joins the thread.
//! drop(worker);
//! ```
//!
//! # Guarantees
//!
//! - **FIFO**: tasks run in the order their `schedule` call completed
//! - **Serial**: no two tasks ever run at the same time
//! - **No loss on shutdown**: drop and [`TaskWorker::shutdown`] drain the queue first
//! - **Panic isolation**: a panicking task is logged and skipped, the worker keeps going
//!
//! Logging goes through [`tracing`]; install a subscriber to see it.

// Lint configuration
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod executor;
pub mod prelude;

// Re-export key types at crate root
pub use config::{WorkerConfig, WorkerConfigBuilder};
pub use error::{Error, Result};
pub use executor::{PanicStrategy, Task, TaskId, TaskWorker, WorkerStatsSnapshot};

/// Schedule several closures on a [`TaskWorker`] as one batch.
///
/// The closures may have different types. They are queued contiguously, in
/// the order written, with a single wake-up of the worker.
///
/// ```
/// use task_worker::{schedule, TaskWorker};
///
/// let worker = TaskWorker::new().unwrap();
/// schedule!(worker, || println!("a"), move || println!("b"));
/// ```
#[macro_export]
macro_rules! schedule {
    ($worker:expr, $($task:expr),+ $(,)?) => {
        $worker.schedule_batch([$($crate::Task::new($task)),+])
    };
}

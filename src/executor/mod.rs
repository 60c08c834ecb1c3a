//! Task execution infrastructure.
//!
//! This module provides the serial worker, its task queue, and the panic
//! boundary each task runs inside.

pub mod panic_handler;
pub mod task;
pub mod task_worker;
pub(crate) mod queue;
pub(crate) mod worker;

pub use panic_handler::{PanicHandler, PanicStrategy, TaskPanic};
pub use task::{Task, TaskId};
pub use task_worker::TaskWorker;
pub use worker::WorkerStatsSnapshot;

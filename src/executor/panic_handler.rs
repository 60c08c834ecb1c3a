use super::task::{Task, TaskId};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanicStrategy {
    /// Log and abort the whole process.
    Abort,
    /// Swallow the panic without logging. It is still counted.
    Isolate,
    #[default]
    LogAndContinue,
}

/// Failure boundary around a single task invocation.
#[derive(Debug)]
pub struct PanicHandler {
    strategy: PanicStrategy,
    panic_count: AtomicUsize,
}

impl PanicHandler {
    pub fn new(strategy: PanicStrategy) -> Self {
        Self {
            strategy,
            panic_count: AtomicUsize::new(0),
        }
    }

    /// Run `task`, containing any panic it raises.
    pub fn execute(&self, task: Task) -> Result<(), TaskPanic> {
        let task_id = task.id();

        match catch_unwind(AssertUnwindSafe(move || task.run())) {
            Ok(()) => Ok(()),
            Err(payload) => {
                self.panic_count.fetch_add(1, Ordering::Relaxed);

                let panic = TaskPanic {
                    task_id,
                    message: payload_message(&*payload),
                };

                match self.strategy {
                    PanicStrategy::Abort => {
                        tracing::error!(task_id = %panic.task_id, message = %panic.message, "task panicked, aborting");
                        std::process::abort();
                    }
                    PanicStrategy::Isolate => {}
                    PanicStrategy::LogAndContinue => {
                        if cfg!(debug_assertions) {
                            tracing::error!(task_id = %panic.task_id, message = %panic.message, "task panicked");
                        } else {
                            tracing::warn!(task_id = %panic.task_id, message = %panic.message, "task panicked");
                        }
                    }
                }

                // Dropping the payload can itself panic; keep it out of the worker loop.
                let _ = catch_unwind(AssertUnwindSafe(move || drop(payload)));

                Err(panic)
            }
        }
    }

    pub fn panic_count(&self) -> usize {
        self.panic_count.load(Ordering::Relaxed)
    }

    pub fn strategy(&self) -> PanicStrategy {
        self.strategy
    }
}

impl Default for PanicHandler {
    fn default() -> Self {
        Self::new(PanicStrategy::default())
    }
}

/// A panic caught at the task boundary.
#[derive(Debug, Clone)]
pub struct TaskPanic {
    pub task_id: TaskId,
    pub message: String,
}

pub(crate) fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

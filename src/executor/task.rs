//! Task representation and execution.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Global task ID counter
static TASK_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    fn next() -> Self {
        TaskId(TASK_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value of the id
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// An owned, deferred unit of work.
///
/// Wraps any `FnOnce() + Send + 'static` closure. Once handed to a
/// [`TaskWorker`](crate::TaskWorker) the worker owns it until it runs.
pub struct Task {
    id: TaskId,
    func: Box<dyn FnOnce() + Send + 'static>,
    created_at: Instant,
}

impl Task {
    /// Create a new task
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Task {
            id: TaskId::next(),
            func: Box::new(f),
            created_at: Instant::now(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Execute the task, consuming it
    pub fn run(self) {
        (self.func)();
    }
}

impl<F> From<F> for Task
where
    F: FnOnce() + Send + 'static,
{
    fn from(f: F) -> Self {
        Task::new(f)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_ids_are_increasing() {
        let a = Task::new(|| {});
        let b = Task::new(|| {});
        assert!(b.id() > a.id());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_run_invokes_closure_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        let task = Task::new(move || {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        task.run();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_from_closure() {
        let task: Task = (|| {}).into();
        assert!(format!("{:?}", task).starts_with("Task"));
        assert!(task.id().to_string().starts_with("task-"));
    }
}

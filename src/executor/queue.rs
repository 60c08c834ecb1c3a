use super::task::Task;
use std::collections::VecDeque;

/// Pending tasks plus the stop flag.
///
/// Only ever touched while holding the worker's mutex, so the queue contents
/// and the stop request are observed together.
#[derive(Debug, Default)]
pub(crate) struct TaskQueue {
    tasks: VecDeque<Task>,
    stop: bool,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append tasks at the tail, preserving their order. Returns how many were added.
    pub fn push_batch(&mut self, tasks: Vec<Task>) -> usize {
        let count = tasks.len();
        self.tasks.extend(tasks);
        count
    }

    pub fn pop(&mut self) -> Option<Task> {
        self.tasks.pop_front()
    }

    /// Stop is one-way; there is no reset.
    pub fn request_stop(&mut self) {
        self.stop = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stop
    }

    /// Wake condition for the worker: something to run, or told to stop.
    pub fn is_ready(&self) -> bool {
        self.stop || !self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

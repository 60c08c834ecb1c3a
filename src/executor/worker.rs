// worker loop + per-worker stats
use super::panic_handler::PanicHandler;
use super::queue::TaskQueue;
use super::task::Task;
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};

// stats for the worker
#[derive(Debug, Default)]
pub(crate) struct WorkerStats {
    pub tasks_scheduled: AtomicU64,
    pub tasks_executed: AtomicU64,
    pub tasks_panicked: AtomicU64,
}

impl WorkerStats {
    pub fn snapshot(&self) -> WorkerStatsSnapshot {
        WorkerStatsSnapshot {
            tasks_scheduled: self.tasks_scheduled.load(Ordering::Relaxed),
            tasks_executed: self.tasks_executed.load(Ordering::Relaxed),
            tasks_panicked: self.tasks_panicked.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of a worker's counters.
///
/// `tasks_executed` includes tasks that panicked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStatsSnapshot {
    pub tasks_scheduled: u64,
    pub tasks_executed: u64,
    pub tasks_panicked: u64,
}

/// State shared between the owning handle and the worker thread.
///
/// `queue` holds both the pending tasks and the stop flag; `signal` is always
/// waited on with that same mutex.
#[derive(Debug)]
pub(crate) struct Worker {
    pub queue: Mutex<TaskQueue>,
    pub signal: Condvar,
    pub stats: WorkerStats,
    pub panic_handler: PanicHandler,
}

impl Worker {
    pub fn new(panic_handler: PanicHandler) -> Self {
        Self {
            queue: Mutex::new(TaskQueue::new()),
            signal: Condvar::new(),
            stats: WorkerStats::default(),
            panic_handler,
        }
    }

    /// Append tasks under one lock acquisition, then wake the worker once.
    pub fn enqueue(&self, tasks: Vec<Task>) {
        if tasks.is_empty() {
            return;
        }

        {
            let mut queue = self.queue.lock();
            debug_assert!(!queue.is_stopped(), "task scheduled after shutdown began");
            let pushed = queue.push_batch(tasks);
            // counted before the worker can see the tasks
            self.stats
                .tasks_scheduled
                .fetch_add(pushed as u64, Ordering::Relaxed);
        }

        self.signal.notify_one();
    }

    pub fn request_stop(&self) {
        self.queue.lock().request_stop();
        self.signal.notify_one();
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    // main loop
    pub fn run(&self) {
        while let Some(task) = self.next_task() {
            self.execute_task(task);
        }
    }

    /// Block until a task is available or the queue is stopped and drained.
    fn next_task(&self) -> Option<Task> {
        let mut queue = self.queue.lock();

        // re-check after every wake, spurious or not
        while !queue.is_ready() {
            self.signal.wait(&mut queue);
        }

        // None only when stopped with nothing left
        queue.pop()
    }

    fn execute_task(&self, task: Task) {
        let task_id = task.id();
        tracing::trace!(task_id = %task_id, "running task");

        if self.panic_handler.execute(task).is_err() {
            self.stats.tasks_panicked.fetch_add(1, Ordering::Relaxed);
        }

        self.stats.tasks_executed.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::PanicStrategy;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_run_drains_then_exits_when_stopped() {
        let worker = Worker::new(PanicHandler::default());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let tasks = (0..5)
            .map(|i| {
                let seen = seen.clone();
                Task::new(move || seen.lock().push(i))
            })
            .collect();
        worker.enqueue(tasks);
        worker.request_stop();

        // stopped up front, so run() returns on the calling thread
        worker.run();

        assert_eq!(*seen.lock(), vec![0, 1, 2, 3, 4]);
        assert_eq!(worker.pending(), 0);

        let stats = worker.stats.snapshot();
        assert_eq!(stats.tasks_scheduled, 5);
        assert_eq!(stats.tasks_executed, 5);
        assert_eq!(stats.tasks_panicked, 0);
    }

    #[test]
    fn test_panicking_task_is_counted_and_skipped() {
        let worker = Worker::new(PanicHandler::new(PanicStrategy::Isolate));
        let after = Arc::new(AtomicU64::new(0));
        let after_clone = after.clone();

        worker.enqueue(vec![
            Task::new(|| panic!("boom")),
            Task::new(move || {
                after_clone.fetch_add(1, Ordering::SeqCst);
            }),
        ]);
        worker.request_stop();
        worker.run();

        assert_eq!(after.load(Ordering::SeqCst), 1);
        let stats = worker.stats.snapshot();
        assert_eq!(stats.tasks_executed, 2);
        assert_eq!(stats.tasks_panicked, 1);
    }

    #[test]
    fn test_empty_enqueue_is_noop() {
        let worker = Worker::new(PanicHandler::default());
        worker.enqueue(Vec::new());
        assert_eq!(worker.stats.snapshot(), WorkerStatsSnapshot::default());
    }

    #[test]
    fn test_waiting_worker_wakes_on_enqueue() {
        let worker = Arc::new(Worker::new(PanicHandler::default()));
        let runner = {
            let worker = worker.clone();
            thread::spawn(move || worker.run())
        };

        let (tx, rx) = std::sync::mpsc::channel();
        worker.enqueue(vec![Task::new(move || tx.send(()).unwrap())]);
        rx.recv().unwrap();

        worker.request_stop();
        runner.join().unwrap();
    }
}

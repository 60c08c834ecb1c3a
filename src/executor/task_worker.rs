use super::panic_handler::PanicHandler;
use super::task::Task;
use super::worker::{Worker, WorkerStatsSnapshot};
use crate::config::WorkerConfig;
use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};

/// A dedicated background thread that runs scheduled tasks one at a time,
/// in the order they were scheduled.
///
/// Any number of threads may call [`schedule`](Self::schedule) through a
/// shared reference. Dropping the worker (or calling
/// [`shutdown`](Self::shutdown)) runs every task still queued, then joins the
/// thread. Tasks that panic are contained and do not stop the worker.
///
/// The handle is not `Clone`: it is the sole owner of its thread. Share it
/// with `Arc` or scoped threads when several producers need it.
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use task_worker::TaskWorker;
///
/// let counter = Arc::new(AtomicUsize::new(0));
/// let worker = TaskWorker::new().unwrap();
///
/// for _ in 0..3 {
///     let counter = counter.clone();
///     worker.schedule(move || {
///         counter.fetch_add(1, Ordering::SeqCst);
///     });
/// }
///
/// drop(worker); // waits for the queue to drain
/// assert_eq!(counter.load(Ordering::SeqCst), 3);
/// ```
pub struct TaskWorker {
    worker: Arc<Worker>,
    thread: Option<JoinHandle<()>>,
    thread_id: ThreadId,
    thread_name: String,
}

impl TaskWorker {
    /// Start a worker with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(WorkerConfig::default())
    }

    pub fn with_config(config: WorkerConfig) -> Result<Self> {
        config.validate()?;

        let worker = Arc::new(Worker::new(PanicHandler::new(config.panic_strategy)));

        let mut builder = thread::Builder::new().name(config.thread_name.clone());
        if let Some(stack_size) = config.stack_size {
            builder = builder.stack_size(stack_size);
        }

        let worker_clone = worker.clone();
        let thread = builder
            .spawn(move || {
                tracing::debug!("worker started");
                worker_clone.run();
                tracing::debug!(
                    executed = worker_clone.stats.snapshot().tasks_executed,
                    "worker exited"
                );
            })
            .map_err(Error::Spawn)?;

        let thread_id = thread.thread().id();

        Ok(Self {
            worker,
            thread: Some(thread),
            thread_id,
            thread_name: config.thread_name,
        })
    }

    /// Queue a single closure.
    pub fn schedule<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.worker.enqueue(vec![Task::new(f)]);
    }

    /// Queue several tasks atomically: they land contiguously, in iteration
    /// order, with a single wake-up of the worker.
    ///
    /// The iterator is consumed before the queue lock is taken, so it may
    /// itself schedule on this worker.
    pub fn schedule_batch<I>(&self, tasks: I)
    where
        I: IntoIterator,
        I::Item: Into<Task>,
    {
        let tasks: Vec<Task> = tasks.into_iter().map(Into::into).collect();
        self.worker.enqueue(tasks);
    }

    /// Number of tasks queued but not yet started.
    pub fn pending(&self) -> usize {
        self.worker.pending()
    }

    pub fn stats(&self) -> WorkerStatsSnapshot {
        self.worker.stats.snapshot()
    }

    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// True when called from one of this worker's own tasks.
    pub fn is_worker_thread(&self) -> bool {
        thread::current().id() == self.thread_id
    }

    /// Stop the worker, run everything still queued, and wait for the thread
    /// to exit.
    ///
    /// Same as dropping the worker, except that a worker thread that died
    /// outside the task boundary is reported as [`Error::WorkerPanic`].
    pub fn shutdown(mut self) -> Result<()> {
        self.stop_and_join()
    }

    fn stop_and_join(&mut self) -> Result<()> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };

        self.worker.request_stop();

        if self.is_worker_thread() {
            // Dropped from inside one of our own tasks. The loop drains and
            // exits once that task returns; joining here would deadlock.
            tracing::debug!(thread = %self.thread_name, "worker released from its own thread, detaching");
            return Ok(());
        }

        thread.join().map_err(Error::worker_panic)
    }
}

impl Drop for TaskWorker {
    fn drop(&mut self) {
        if let Err(e) = self.stop_and_join() {
            tracing::error!(error = %e, thread = %self.thread_name, "worker thread terminated abnormally");
        }
    }
}

impl fmt::Debug for TaskWorker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskWorker")
            .field("thread_name", &self.thread_name)
            .field("thread_id", &self.thread_id)
            .field("running", &self.thread.is_some())
            .field("pending", &self.pending())
            .finish()
    }
}

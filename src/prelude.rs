pub use crate::config::{WorkerConfig, WorkerConfigBuilder};
pub use crate::error::{Error, Result};
pub use crate::executor::{PanicStrategy, Task, TaskWorker, WorkerStatsSnapshot};
pub use crate::schedule;

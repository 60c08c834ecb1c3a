use crate::error::{Error, Result};
use crate::executor::PanicStrategy;

const MIN_STACK_SIZE: usize = 16 * 1024;

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub thread_name: String,
    pub stack_size: Option<usize>,
    pub panic_strategy: PanicStrategy,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            thread_name: "task-worker".to_string(),
            stack_size: Some(2 * 1024 * 1024),
            panic_strategy: PanicStrategy::default(),
        }
    }
}

impl WorkerConfig {
    pub fn builder() -> WorkerConfigBuilder {
        WorkerConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if self.thread_name.is_empty() {
            return Err(Error::config("thread_name must not be empty"));
        }
        // std::thread::Builder panics on interior NUL bytes
        if self.thread_name.contains('\0') {
            return Err(Error::config("thread_name must not contain NUL bytes"));
        }

        if let Some(size) = self.stack_size {
            if size < MIN_STACK_SIZE {
                return Err(Error::config(format!(
                    "stack_size must be at least {} bytes",
                    MIN_STACK_SIZE
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct WorkerConfigBuilder {
    config: WorkerConfig,
}

impl WorkerConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: WorkerConfig::default(),
        }
    }

    pub fn thread_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config.thread_name = name.into();
        self
    }

    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    /// Use the platform default stack size.
    pub fn default_stack_size(mut self) -> Self {
        self.config.stack_size = None;
        self
    }

    pub fn panic_strategy(mut self, strategy: PanicStrategy) -> Self {
        self.config.panic_strategy = strategy;
        self
    }

    pub fn build(self) -> Result<WorkerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = WorkerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.thread_name, "task-worker");
        assert_eq!(config.panic_strategy, PanicStrategy::LogAndContinue);
    }

    #[test]
    fn test_builder_overrides() {
        let config = WorkerConfig::builder()
            .thread_name("io-serializer")
            .stack_size(64 * 1024)
            .panic_strategy(PanicStrategy::Isolate)
            .build()
            .unwrap();

        assert_eq!(config.thread_name, "io-serializer");
        assert_eq!(config.stack_size, Some(64 * 1024));
        assert_eq!(config.panic_strategy, PanicStrategy::Isolate);
    }

    #[test]
    fn test_rejects_empty_name() {
        let result = WorkerConfig::builder().thread_name("").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_nul_in_name() {
        let result = WorkerConfig::builder().thread_name("bad\0name").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_tiny_stack() {
        let result = WorkerConfig::builder().stack_size(1024).build();
        assert!(result.is_err());

        let config = WorkerConfig::builder().default_stack_size().build().unwrap();
        assert_eq!(config.stack_size, None);
    }
}

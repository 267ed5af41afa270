use crate::clock::{Clock, SystemClock};
use crate::observer::{LogObserver, Observer};
use derive_builder::Builder;
use std::fmt;
use std::rc::Rc;

pub const MAX_THREADS: usize = 64;
pub const DEFAULT_STACK_SIZE: usize = 256 * 1024;
pub const MIN_STACK_SIZE: usize = 16 * 1024;

/// Idle, main and at least one created thread.
pub const MIN_THREADS: usize = 3;

#[derive(Clone, Builder)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct SchedulerConfig {
    /// Usable bytes per created thread, rounded up to whole pages.
    pub stack_size: usize,
    /// Upper bound on live threads, idle and main included.
    pub max_threads: usize,
    pub clock: Rc<dyn Clock>,
    pub observer: Rc<dyn Observer>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            max_threads: MAX_THREADS,
            clock: Rc::new(SystemClock),
            observer: Rc::new(LogObserver),
        }
    }
}

impl SchedulerConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(size) = self.stack_size {
            if size < MIN_STACK_SIZE {
                return Err(format!(
                    "stack_size {} is below the {} byte minimum",
                    size, MIN_STACK_SIZE
                ));
            }
        }
        if let Some(max) = self.max_threads {
            if max < MIN_THREADS {
                return Err(format!(
                    "max_threads {} leaves no room beside idle and main",
                    max
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for SchedulerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchedulerConfig")
            .field("stack_size", &self.stack_size)
            .field("max_threads", &self.max_threads)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::Error;

    #[test]
    fn builder_defaults_match_default() {
        let config = SchedulerConfigBuilder::default().build().unwrap();
        assert_eq!(config.stack_size, DEFAULT_STACK_SIZE);
        assert_eq!(config.max_threads, MAX_THREADS);
    }

    #[test]
    fn builder_overrides_fields() {
        let clock = Rc::new(ManualClock::new());
        let config = SchedulerConfigBuilder::default()
            .stack_size(32 * 1024)
            .max_threads(8)
            .clock(clock)
            .build()
            .unwrap();
        assert_eq!(config.stack_size, 32 * 1024);
        assert_eq!(config.max_threads, 8);
    }

    #[test]
    fn rejects_tiny_stacks() {
        let err = SchedulerConfigBuilder::default()
            .stack_size(512)
            .build()
            .map_err(Error::from)
            .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("stack_size")));
    }

    #[test]
    fn rejects_table_without_room() {
        let result = SchedulerConfigBuilder::default().max_threads(2).build();
        assert!(result.is_err());
    }
}

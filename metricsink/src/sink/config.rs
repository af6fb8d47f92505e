use std::time::Duration;

use super::sink_error::SinkError;

pub const DEFAULT_QUEUE_CAPACITY: usize = 2048;
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(10);

/// Fixed for the lifetime of a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Metrics the queue holds before new pushes are dropped.
    pub queue_capacity: usize,
    pub flush_interval: Duration,
    /// Flush as soon as the buffer reaches this many bytes, in addition to
    /// the timer. `None` flushes on the timer only.
    pub max_buffer_bytes: Option<usize>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            max_buffer_bytes: None,
        }
    }
}

impl SinkConfig {
    pub fn validate(&self) -> Result<(), SinkError> {
        if self.queue_capacity == 0 {
            return Err(SinkError::InvalidQueueCapacity);
        }
        if self.flush_interval.is_zero() {
            return Err(SinkError::InvalidFlushInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SinkConfig::default();
        assert_eq!(config.queue_capacity, 2048);
        assert_eq!(config.flush_interval, Duration::from_secs(10));
        assert_eq!(config.max_buffer_bytes, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_capacity() {
        let config = SinkConfig {
            queue_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SinkError::InvalidQueueCapacity)
        ));
    }

    #[test]
    fn rejects_zero_interval() {
        let config = SinkConfig {
            flush_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SinkError::InvalidFlushInterval)
        ));
    }
}

//! Shared output sink
//!
//! Every logger of a registry writes through one `Sink`. It owns the
//! appender list and the metrics, and isolates appenders from each other:
//! an appender that errors or panics is reported on stderr and the
//! remaining appenders still receive the entry.

use super::{appender::Appender, error::Result, log_entry::LogEntry, metrics::LoggerMetrics};
use parking_lot::RwLock;

pub struct Sink {
    appenders: RwLock<Vec<Box<dyn Appender>>>,
    metrics: LoggerMetrics,
}

impl Sink {
    pub fn new() -> Self {
        Self::with_appenders(Vec::new())
    }

    pub fn with_appenders(appenders: Vec<Box<dyn Appender>>) -> Self {
        Self {
            appenders: RwLock::new(appenders),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    /// Names of the installed appenders, in write order
    pub fn appender_names(&self) -> Vec<String> {
        self.appenders
            .read()
            .iter()
            .map(|appender| appender.name().to_string())
            .collect()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Write an entry to every appender.
    ///
    /// Returns `true` when at least one appender failed.
    pub fn write(&self, entry: &LogEntry) -> bool {
        let mut appenders = self.appenders.write();
        let mut has_error = false;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        panic_message(panic_info.as_ref())
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            self.metrics.record_failed();
        } else {
            self.metrics.record_logged();
        }

        has_error
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

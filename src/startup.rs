use crate::error::MotionError;
use crate::log::{LogLevel, Logger};
use serde_json::json;

pub struct StartupReport {
    logger: Logger,
    initialized: Vec<&'static str>,
    skipped: Vec<&'static str>,
}

impl StartupReport {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            initialized: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn record(&mut self, name: &'static str, bound: bool) {
        if bound {
            self.initialized.push(name);
        } else {
            self.skipped.push(name);
        }
    }

    pub fn record_result(&mut self, name: &'static str, outcome: Result<bool, MotionError>) {
        match outcome {
            Ok(bound) => self.record(name, bound),
            Err(error) => {
                self.logger.event(
                    LogLevel::Warn,
                    "motion.component_failed",
                    json!({ "component": name, "error": error.to_string() }),
                );
                self.skipped.push(name);
            }
        }
    }

    pub fn finish(self) {
        self.logger.event(
            LogLevel::Info,
            "motion.init",
            json!({ "initialized": self.initialized, "skipped": self.skipped }),
        );
    }
}

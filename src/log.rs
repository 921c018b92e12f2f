use serde::Deserialize;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Logger {
    min_level: LogLevel,
}

impl Logger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn event(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        if let Some(line) = self.render(level, event, fields) {
            write_line(level, &line);
        }
    }

    fn render(&self, level: LogLevel, event: &str, fields: serde_json::Value) -> Option<String> {
        if !self.enabled(level) {
            return None;
        }

        let mut payload = serde_json::Map::new();
        payload.insert("ts".to_string(), serde_json::Value::from(now_unix_millis()));
        payload.insert(
            "level".to_string(),
            serde_json::Value::String(level.as_str().to_string()),
        );
        payload.insert(
            "event".to_string(),
            serde_json::Value::String(event.to_string()),
        );

        if let serde_json::Value::Object(extra) = fields {
            for (key, value) in extra {
                payload.insert(key, value);
            }
        }

        Some(serde_json::Value::Object(payload).to_string())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn write_line(level: LogLevel, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&line),
        LogLevel::Info => web_sys::console::log_1(&line),
        LogLevel::Warn => web_sys::console::warn_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_line(_level: LogLevel, line: &str) {
    #[cfg(test)]
    CAPTURED.with(|captured| captured.borrow_mut().push(line.to_string()));
    println!("{line}");
}

#[cfg(test)]
thread_local! {
    static CAPTURED: std::cell::RefCell<Vec<String>> = const { std::cell::RefCell::new(Vec::new()) };
}

#[cfg(test)]
pub(crate) fn take_captured() -> Vec<serde_json::Value> {
    CAPTURED.with(|captured| {
        captured
            .borrow_mut()
            .drain(..)
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn events_below_threshold_are_dropped() {
        let logger = Logger::new(LogLevel::Info);

        assert!(logger
            .render(LogLevel::Debug, "smooth_scroll.missing_target", json!({}))
            .is_none());
        assert!(logger.enabled(LogLevel::Warn));
    }

    #[test]
    fn event_fields_are_flattened_into_payload() {
        let logger = Logger::new(LogLevel::Debug);
        let line = logger
            .render(
                LogLevel::Info,
                "social_link.click",
                json!({ "platform": "GitHub" }),
            )
            .expect("info passes a debug threshold");
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid JSON line");

        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "social_link.click");
        assert_eq!(parsed["platform"], "GitHub");
        assert!(parsed["ts"].is_u64());
    }

    #[test]
    fn emitted_events_reach_the_sink() {
        take_captured();
        let logger = Logger::new(LogLevel::Info);
        logger.event(LogLevel::Debug, "lazy_image.loaded", json!({}));
        logger.event(LogLevel::Warn, "motion.config_invalid", json!({ "error": "eof" }));

        let lines = take_captured();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["event"], "motion.config_invalid");
        assert_eq!(lines[0]["error"], "eof");
    }
}

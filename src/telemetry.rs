use std::cmp::Ordering;

use crate::config::InteractionConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
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
        }
    }
}

/// Writes one JSON line for `event` unless `level` is below the configured level.
pub fn log_event(
    config: &InteractionConfig,
    level: LogLevel,
    event: &str,
    fields: serde_json::Value,
) {
    if level < config.log_level {
        return;
    }

    emit(&format_event(now_unix_seconds(), level, event, fields));
}

pub fn format_event(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> String {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(ts)),
    );
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

    serde_json::Value::Object(payload).to_string()
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &str) {
    web_sys::console::log_1(&line.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &str) {
    println!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn now_unix_seconds() -> u64 {
    (js_sys::Date::now() / 1_000.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_seconds() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn debug_sorts_below_info() {
        assert!(LogLevel::Debug < LogLevel::Info);
    }

    #[test]
    fn format_event_merges_fields_after_header() {
        let line = format_event(
            1_700_000_000,
            LogLevel::Info,
            "portfolio_ready",
            json!({ "features": ["navbar", "typing"] }),
        );
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid json line");

        assert_eq!(parsed["ts"], 1_700_000_000);
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "portfolio_ready");
        assert_eq!(parsed["features"][1], "typing");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let line = format_event(1, LogLevel::Debug, "feature_skipped", json!("reason"));
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid json line");

        assert_eq!(parsed.as_object().map(|object| object.len()), Some(3));
    }
}

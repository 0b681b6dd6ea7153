// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The [`Level`] and [`LogEvent`] types.

use std::fmt;

use crate::config::Value;

/// Log levels understood by [`Logger`](crate::Logger).
///
/// The set is closed; there are no ordering or severity semantics beyond membership. The
/// display form is the lowercase name, which is also what the `value:level` filter step yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warn,
    Debug,
    Error,
    Trace,
}

impl Level {
    /// All levels, in the order their convenience methods are declared on
    /// [`Logger`](crate::Logger).
    pub const ALL: [Level; 5] = [
        Level::Info,
        Level::Warn,
        Level::Debug,
        Level::Error,
        Level::Trace,
    ];

    /// The lowercase name of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Debug => "debug",
            Level::Error => "error",
            Level::Trace => "trace",
        }
    }

    /// Looks up a level by its lowercase name.
    pub fn from_name(name: &str) -> Option<Level> {
        match name {
            "info" => Some(Level::Info),
            "warn" => Some(Level::Warn),
            "debug" => Some(Level::Debug),
            "error" => Some(Level::Error),
            "trace" => Some(Level::Trace),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Level {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Trace,
        }
    }
}

/// The record produced once per log call and passed, read-only, to every transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    timestamp: i64,
    id: String,
    level: Level,
    message: String,
}

impl LogEvent {
    /// Creates a new event stamped with the current time.
    pub fn new(id: impl Into<String>, level: Level, message: impl Into<String>) -> LogEvent {
        LogEvent {
            timestamp: jiff::Timestamp::now().as_millisecond(),
            id: id.into(),
            level,
            message: message.into(),
        }
    }

    /// Overrides the dispatch timestamp (milliseconds since the Unix epoch).
    pub fn with_timestamp(mut self, timestamp: i64) -> LogEvent {
        self.timestamp = timestamp;
        self
    }

    /// The dispatch time in milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The identifier of the logger that produced this event.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The level this event was logged at.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The message, already expanded from its format arguments.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Resolves a field by name, as the `value` filter sees it.
    ///
    /// Returns `None` for any name outside `timestamp`, `id`, `level` and `message`.
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "timestamp" => Some(Value::Int(self.timestamp)),
            "id" => Some(Value::Str(self.id.clone())),
            "level" => Some(Value::Str(self.level.to_string())),
            "message" => Some(Value::Str(self.message.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::from_name(level.as_str()), Some(level));
        }
        assert_eq!(Level::from_name("fatal"), None);
    }

    #[test]
    fn test_event_fields() {
        let event = LogEvent::new("server", Level::Warn, "disk almost full").with_timestamp(42);

        assert_eq!(event.field("timestamp"), Some(Value::Int(42)));
        assert_eq!(event.field("id"), Some(Value::Str("server".to_string())));
        assert_eq!(event.field("level"), Some(Value::Str("warn".to_string())));
        assert_eq!(
            event.field("message"),
            Some(Value::Str("disk almost full".to_string()))
        );
        assert_eq!(event.field("pid"), None);
    }
}

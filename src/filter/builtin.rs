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

//! The built-in filters.
//!
//! Every built-in validates its input shape and fails with a typed error instead of coercing.

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::Error;
use crate::config::Value;
use crate::filter::FilterContext;
use crate::style;

fn invalid_input(filter: &str, reason: impl Into<String>) -> Error {
    Error::InvalidFilterInput {
        filter: filter.to_string(),
        reason: reason.into(),
    }
}

fn invalid_argument(filter: &str, reason: impl Into<String>) -> Error {
    Error::InvalidFilterArgument {
        filter: filter.to_string(),
        reason: reason.into(),
    }
}

fn textual(filter: &str, value: &Value) -> Result<String, Error> {
    match value {
        Value::Str(s) => Ok(s.clone()),
        other => Err(invalid_input(filter, format!("expects text, got {other:?}"))),
    }
}

/// Seeds a chain with an event field's raw value.
pub(super) fn value(
    _: Value,
    param: Option<&str>,
    ctx: &FilterContext<'_>,
) -> Result<Value, Error> {
    let field = match param {
        Some(field) if !field.is_empty() => field,
        _ => return Err(invalid_argument("value", "missing event field name")),
    };
    ctx.event
        .field(field)
        .ok_or_else(|| invalid_argument("value", format!("\"{field}\" is not a log event field")))
}

/// Formats a millisecond timestamp as a local-zone date-time string.
pub(super) fn datetime(
    value: Value,
    _: Option<&str>,
    _: &FilterContext<'_>,
) -> Result<Value, Error> {
    let millis = value
        .as_int()
        .ok_or_else(|| invalid_input("datetime", "expects a millisecond timestamp"))?;
    let timestamp = Timestamp::from_millisecond(millis)
        .map_err(|err| invalid_input("datetime", err.to_string()))?;
    let zoned = timestamp.to_zoned(TimeZone::system());
    Ok(Value::Str(zoned.strftime("%Y-%m-%d %H:%M:%S").to_string()))
}

/// Upper-cases text.
pub(super) fn uppercase(
    value: Value,
    _: Option<&str>,
    _: &FilterContext<'_>,
) -> Result<Value, Error> {
    let text = textual("uppercase", &value)?;
    Ok(Value::Str(text.to_uppercase()))
}

/// Upper-cases the first character of text, leaving the remainder untouched.
pub(super) fn capitalize(
    value: Value,
    _: Option<&str>,
    _: &FilterContext<'_>,
) -> Result<Value, Error> {
    let text = textual("capitalize", &value)?;
    Ok(Value::Str(capitalize_str(&text)))
}

/// Styles the display form of the running value.
///
/// With a textual param, the param names the style. Without one, the owning config's `colors`
/// map is consulted, keyed by the event's level.
pub(super) fn colorize(
    value: Value,
    param: Option<&str>,
    ctx: &FilterContext<'_>,
) -> Result<Value, Error> {
    let style = match param {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            let colors = ctx
                .config
                .value("colors")
                .and_then(Value::as_map)
                .ok_or_else(|| {
                    invalid_argument(
                        "colorize",
                        "no style name given and no \"colors\" map configured",
                    )
                })?;
            let level = ctx.event.level().as_str();
            colors
                .get(level)
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    invalid_argument("colorize", format!("no style configured for level \"{level}\""))
                })?
                .to_string()
        }
    };

    let text = value.to_string();
    let styled = style::paint(&text, &style)
        .ok_or_else(|| invalid_argument("colorize", format!("unknown style \"{style}\"")))?;
    Ok(Value::Str(styled))
}

/// Converts dash-delimited text to CamelCase.
pub(super) fn camelcase(
    value: Value,
    _: Option<&str>,
    _: &FilterContext<'_>,
) -> Result<Value, Error> {
    let text = textual("camelcase", &value)?;
    Ok(Value::Str(
        text.split('-').map(capitalize_str).collect::<String>(),
    ))
}

/// Formats a millisecond delta as a signed `<n>ms` string, for example `+37ms` or `-5ms`.
pub(super) fn difference(
    value: Value,
    _: Option<&str>,
    _: &FilterContext<'_>,
) -> Result<Value, Error> {
    let millis = value
        .as_int()
        .ok_or_else(|| invalid_input("difference", "expects a millisecond delta"))?;
    Ok(Value::Str(format!("{millis:+}ms")))
}

fn capitalize_str(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use crate::Level;
    use crate::LogEvent;
    use crate::config::Map;

    fn context() -> (LogEvent, Config) {
        let event = LogEvent::new("test", Level::Info, "dlc").with_timestamp(0);
        let config = Config::new("test");
        (event, config)
    }

    #[test]
    fn test_value_reads_event_fields() {
        let (event, config) = context();
        let ctx = FilterContext {
            event: &event,
            config: &config,
        };

        let out = value(Value::Null, Some("level"), &ctx).unwrap();
        assert_eq!(out, Value::Str("info".to_string()));

        let err = value(Value::Null, Some("nope"), &ctx).unwrap_err();
        assert!(matches!(err, Error::InvalidFilterArgument { .. }));

        let err = value(Value::Null, None, &ctx).unwrap_err();
        assert!(matches!(err, Error::InvalidFilterArgument { .. }));
    }

    #[test]
    fn test_uppercase_rejects_non_text() {
        let (event, config) = context();
        let ctx = FilterContext {
            event: &event,
            config: &config,
        };

        let err = uppercase(Value::Int(42), None, &ctx).unwrap_err();
        assert!(matches!(err, Error::InvalidFilterInput { ref filter, .. } if filter == "uppercase"));

        let out = uppercase(Value::Str("info".to_string()), None, &ctx).unwrap();
        assert_eq!(out, Value::Str("INFO".to_string()));
    }

    #[test]
    fn test_capitalize() {
        let (event, config) = context();
        let ctx = FilterContext {
            event: &event,
            config: &config,
        };

        let out = capitalize(Value::Str(String::new()), None, &ctx).unwrap();
        assert_eq!(out, Value::Str(String::new()));

        let out = capitalize(Value::Str("abc".to_string()), None, &ctx).unwrap();
        assert_eq!(out, Value::Str("Abc".to_string()));
    }

    #[test]
    fn test_camelcase() {
        let (event, config) = context();
        let ctx = FilterContext {
            event: &event,
            config: &config,
        };

        let out = camelcase(Value::Str("log-file".to_string()), None, &ctx).unwrap();
        assert_eq!(out, Value::Str("LogFile".to_string()));

        let err = camelcase(Value::Int(1), None, &ctx).unwrap_err();
        assert!(matches!(err, Error::InvalidFilterInput { .. }));
    }

    #[test]
    fn test_difference() {
        let (event, config) = context();
        let ctx = FilterContext {
            event: &event,
            config: &config,
        };

        let out = difference(Value::Int(37), None, &ctx).unwrap();
        assert_eq!(out, Value::Str("+37ms".to_string()));

        let out = difference(Value::Int(-5), None, &ctx).unwrap();
        assert_eq!(out, Value::Str("-5ms".to_string()));

        let err = difference(Value::Str("37".to_string()), None, &ctx).unwrap_err();
        assert!(matches!(err, Error::InvalidFilterInput { .. }));
    }

    #[test]
    fn test_datetime_rejects_non_timestamp() {
        let (event, config) = context();
        let ctx = FilterContext {
            event: &event,
            config: &config,
        };

        let err = datetime(Value::Str("now".to_string()), None, &ctx).unwrap_err();
        assert!(matches!(err, Error::InvalidFilterInput { ref filter, .. } if filter == "datetime"));

        let out = datetime(Value::Int(0), None, &ctx).unwrap();
        assert!(matches!(out, Value::Str(_)));
    }

    #[test]
    fn test_colorize_with_explicit_style() {
        colored::control::set_override(true);

        let (event, config) = context();
        let ctx = FilterContext {
            event: &event,
            config: &config,
        };

        let out = colorize(Value::Str("dlc".to_string()), Some("bold"), &ctx).unwrap();
        let text = out.as_str().unwrap().to_string();
        assert!(text.contains("dlc"));
        assert!(text.contains('\u{1b}'));
    }

    #[test]
    fn test_colorize_falls_back_to_level_colors() {
        colored::control::set_override(true);

        let (event, mut config) = context();
        let err = {
            let ctx = FilterContext {
                event: &event,
                config: &config,
            };
            colorize(Value::Str("dlc".to_string()), None, &ctx).unwrap_err()
        };
        assert!(matches!(err, Error::InvalidFilterArgument { .. }));

        let mut colors = Map::new();
        colors.insert("info".to_string(), Value::from("yellow"));
        config.set_value("colors", Value::Map(colors));

        let ctx = FilterContext {
            event: &event,
            config: &config,
        };
        let out = colorize(Value::Str("dlc".to_string()), None, &ctx).unwrap();
        assert!(out.as_str().unwrap().contains('\u{1b}'));
    }

    #[test]
    fn test_colorize_rejects_unknown_style() {
        let (event, config) = context();
        let ctx = FilterContext {
            event: &event,
            config: &config,
        };

        let err = colorize(Value::Str("dlc".to_string()), Some("rainbow"), &ctx).unwrap_err();
        assert!(matches!(err, Error::InvalidFilterArgument { .. }));
    }
}

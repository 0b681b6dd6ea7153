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

//! Option handling for transports: the [`Value`] model and the [`Config`] that declares
//! required keys and defaults, and validates user-supplied values on load.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::Error;
use crate::LogEvent;
use crate::filter::FilterContext;
use crate::filter::FilterFn;
use crate::transport::Callback;
use crate::transport::RecordStore;

/// A mapping from option name to [`Value`].
pub type Map = BTreeMap<String, Value>;

/// A configuration value.
///
/// Besides plain data, values can carry capabilities: a named filter function, a sink
/// callback, or a record store. An absent key is distinct from [`Value::Null`];
/// [`Config::value`] returns `None` for the former.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Value>),
    Map(Map),
    /// A filter function, usable under the `filters` option of a transport.
    Filter(FilterFn),
    /// A sink callback, as required by the custom-function transport.
    Callback(Callback),
    /// A record store, as required by the memory transport.
    Store(Arc<dyn RecordStore>),
}

impl Value {
    /// Wraps a closure as a [`Value::Filter`].
    pub fn filter<F>(f: F) -> Value
    where
        F: Fn(Value, Option<&str>, &FilterContext<'_>) -> Result<Value, Error>
            + Send
            + Sync
            + 'static,
    {
        Value::Filter(Arc::new(f))
    }

    /// Wraps a closure as a [`Value::Callback`].
    pub fn callback<F>(f: F) -> Value
    where
        F: Fn(&LogEvent) -> Result<(), Error> + Send + Sync + 'static,
    {
        Value::Callback(Arc::new(f))
    }

    /// Wraps a record store as a [`Value::Store`].
    pub fn store<S: RecordStore + 'static>(store: Arc<S>) -> Value {
        Value::Store(store)
    }

    /// Returns the textual content, if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer content, if this is a [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean content, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the map content, if this is a [`Value::Map`].
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the list content, if this is a [`Value::List`].
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Filter(_) => f.write_str("<filter>"),
            Value::Callback(_) => f.write_str("<callback>"),
            Value::Store(_) => f.write_str("<store>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Value::Filter(_) => f.write_str("Filter(..)"),
            Value::Callback(_) => f.write_str("Callback(..)"),
            Value::Store(store) => f.debug_tuple("Store").field(store).finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Filter(a), Value::Filter(b)) => Arc::ptr_eq(a, b),
            (Value::Callback(a), Value::Callback(b)) => Arc::ptr_eq(a, b),
            (Value::Store(a), Value::Store(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Value {
        Value::Map(map)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::List(items)
    }
}

/// An option mapping for one owner (a transport), with declared required keys and defaults.
///
/// [`Config::load`] merges user-supplied values over the current ones (explicit values win
/// over defaults) and then re-checks that every required key resolves. Re-validation on every
/// load lets a transport load incrementally: once for engine wiring, once more after its own
/// defaults and required keys are declared.
#[derive(Debug, Clone)]
pub struct Config {
    owner: String,
    values: Map,
    required: BTreeSet<String>,
    defaults: Map,
}

impl Config {
    /// Creates an empty config for the named owner.
    pub fn new(owner: impl Into<String>) -> Config {
        Config {
            owner: owner.into(),
            values: Map::new(),
            required: BTreeSet::new(),
            defaults: Map::new(),
        }
    }

    /// The owner name, used in error messages.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Registers `name` as mandatory.
    ///
    /// This never fails by itself; the check runs on the next [`Config::load`].
    pub fn add_required(&mut self, name: impl Into<String>) -> &mut Config {
        self.required.insert(name.into());
        self
    }

    /// Registers a fallback for `name`, used only when no explicit value was loaded.
    pub fn set_default(&mut self, name: impl Into<String>, value: Value) -> &mut Config {
        self.defaults.insert(name.into(), value);
        self
    }

    /// Registers several fallbacks at once.
    pub fn set_defaults(&mut self, defaults: Map) -> &mut Config {
        self.defaults.extend(defaults);
        self
    }

    /// Merges `values` over the current values and re-validates every required key.
    pub fn load(&mut self, values: Map) -> Result<&mut Config, Error> {
        self.values.extend(values);
        self.validate()?;
        Ok(self)
    }

    /// Resolves `name` through the loaded values, falling back to the declared default.
    ///
    /// An absent key yields `None`, distinct from a present [`Value::Null`].
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name).or_else(|| self.defaults.get(name))
    }

    /// Sets an explicit value, overriding any default for `name`.
    pub fn set_value(&mut self, name: impl Into<String>, value: Value) -> &mut Config {
        self.values.insert(name.into(), value);
        self
    }

    fn validate(&self) -> Result<(), Error> {
        for key in &self.required {
            if self.value(key).is_none() {
                return Err(Error::MissingRequiredOption {
                    owner: self.owner.clone(),
                    key: key.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_option() {
        let mut config = Config::new("console");
        config.add_required("format");

        let err = config.load(Map::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRequiredOption { ref owner, ref key }
                if owner == "console" && key == "format"
        ));
    }

    #[test]
    fn test_required_resolves_through_default() {
        let mut config = Config::new("console");
        config.add_required("format");
        config.set_default("format", Value::from("{{value:message}}"));
        config.load(Map::new()).unwrap();

        assert_eq!(
            config.value("format").and_then(Value::as_str),
            Some("{{value:message}}")
        );
    }

    #[test]
    fn test_user_values_win_over_defaults() {
        let mut config = Config::new("console");
        config.set_default("format", Value::from("default"));

        let mut opts = Map::new();
        opts.insert("format".to_string(), Value::from("explicit"));
        config.load(opts).unwrap();

        assert_eq!(config.value("format").and_then(Value::as_str), Some("explicit"));

        // A default declared later must not shadow the loaded value.
        config.set_default("format", Value::from("late default"));
        assert_eq!(config.value("format").and_then(Value::as_str), Some("explicit"));
    }

    #[test]
    fn test_incremental_load_revalidates() {
        let mut config = Config::new("log-file");

        let mut opts = Map::new();
        opts.insert("format".to_string(), Value::from("{{value:message}}"));
        config.load(opts).unwrap();

        config.add_required("filename");
        let err = config.load(Map::new()).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredOption { ref key, .. } if key == "filename"));

        let mut opts = Map::new();
        opts.insert("filename".to_string(), Value::from("server.log"));
        config.load(opts).unwrap();
    }

    #[test]
    fn test_absent_key_is_distinct_from_null() {
        let mut config = Config::new("console");
        config.set_value("theme", Value::Null);

        assert_eq!(config.value("theme"), Some(&Value::Null));
        assert_eq!(config.value("missing"), None);
    }
}

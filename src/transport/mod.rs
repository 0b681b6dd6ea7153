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

//! Transports: pluggable sinks that render and deliver log events.
//!
//! Every transport composes a [`Pipeline`] (the shared Config + FilterRegistry +
//! TemplateEngine wiring) and adds its sink side effect. Configuration errors surface at
//! construction, never at the first log call.

use std::fmt;
use std::sync::Arc;

use crate::Error;
use crate::LogEvent;
use crate::config::Config;
use crate::config::Map;
use crate::config::Value;
use crate::filter::FilterRegistry;
use crate::template::TemplateEngine;

mod console;
mod custom;
mod file;
mod memory;
mod non_blocking;

pub use console::Console;
pub use custom::Callback;
pub use custom::CustomFunction;
pub use file::LogFile;
pub use memory::Memory;
pub use memory::MemoryStore;
pub use memory::RecordStore;

/// A pluggable sink that renders and delivers log events.
///
/// Implementations receive each event exactly once per log call, through [`Transport::emit`],
/// and must not mutate it. A render or sink failure is local to this transport's handling of
/// the event; see [`Logger::log`](crate::Logger::log) for the fan-out policy.
pub trait Transport: fmt::Debug + Send + Sync {
    /// The transport's name, fixed at construction.
    fn name(&self) -> &str;

    /// Renders the event and performs the sink side effect.
    fn emit(&self, event: &LogEvent) -> Result<(), Error>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn emit(&self, event: &LogEvent) -> Result<(), Error> {
        (**self).emit(event)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn emit(&self, event: &LogEvent) -> Result<(), Error> {
        (**self).emit(event)
    }
}

/// The render pipeline every transport owns: a [`Config`] plus a [`FilterRegistry`]-backed
/// [`TemplateEngine`].
///
/// Construction wires the engine: built-in filters are seeded first, then any custom filters
/// declared under the `filters` option merge on top (same-name entries replace built-ins).
/// The `format` option is marked required; the concrete transport applies its own defaults and
/// required keys, then calls [`Pipeline::finish`] to validate the whole config.
#[derive(Debug)]
pub struct Pipeline {
    config: Config,
    engine: TemplateEngine,
}

impl Pipeline {
    /// Wires a pipeline for the named transport from caller-supplied options.
    pub fn new(name: &str, opts: Map) -> Result<Pipeline, Error> {
        let mut config = Config::new(name);
        config.set_default("filters", Value::Map(Map::new()));
        config.load(opts)?;
        config.add_required("format");

        let mut filters = FilterRegistry::with_builtins();
        match config.value("filters") {
            Some(Value::Map(custom)) => {
                for (filter_name, value) in custom {
                    match value {
                        Value::Filter(f) => filters.register(filter_name.clone(), f.clone()),
                        _ => {
                            return Err(Error::InvalidTransport(format!(
                                "custom filter \"{filter_name}\" of \"{name}\" is not a filter function"
                            )));
                        }
                    }
                }
            }
            Some(_) => {
                return Err(Error::InvalidTransport(format!(
                    "option \"filters\" of \"{name}\" is not a map"
                )));
            }
            None => {}
        }

        Ok(Pipeline {
            config,
            engine: TemplateEngine::new(filters),
        })
    }

    /// The owning transport's name.
    pub fn name(&self) -> &str {
        self.config.owner()
    }

    /// The transport's config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the config, for transport-specific defaults and required keys.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Re-validates the config after transport-specific declarations.
    pub fn finish(&mut self) -> Result<(), Error> {
        self.config.load(Map::new())?;
        Ok(())
    }

    /// Renders an arbitrary template against `event` through this pipeline's engine.
    pub fn format_string(&self, template: &str, event: &LogEvent) -> Result<String, Error> {
        self.engine.format_string(template, event, &self.config)
    }

    /// Renders the configured `format` template against `event`.
    pub fn render(&self, event: &LogEvent) -> Result<String, Error> {
        let template = self
            .config
            .value("format")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::InvalidTemplateInput(format!(
                    "\"{}\" has no textual \"format\" option",
                    self.name()
                ))
            })?;
        self.format_string(template, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    #[test]
    fn test_custom_filter_overrides_builtin() {
        let mut filters = Map::new();
        filters.insert(
            "uppercase".to_string(),
            Value::filter(|value, _, _| Ok(Value::Str(format!("<<{value}>>")))),
        );

        let mut opts = Map::new();
        opts.insert("filters".to_string(), Value::Map(filters));
        opts.insert("format".to_string(), Value::from("{{value:level|uppercase}}"));

        let mut pipeline = Pipeline::new("test", opts).unwrap();
        pipeline.finish().unwrap();

        let event = LogEvent::new("test", Level::Info, "dlc");
        assert_eq!(pipeline.render(&event).unwrap(), "<<info>>");
    }

    #[test]
    fn test_non_filter_under_filters_is_rejected() {
        let mut filters = Map::new();
        filters.insert("uppercase".to_string(), Value::from("not a function"));

        let mut opts = Map::new();
        opts.insert("filters".to_string(), Value::Map(filters));
        opts.insert("format".to_string(), Value::from("{{value:message}}"));

        let err = Pipeline::new("test", opts).unwrap_err();
        assert!(matches!(err, Error::InvalidTransport(_)));
    }

    #[test]
    fn test_non_map_filters_option_is_rejected() {
        let mut opts = Map::new();
        opts.insert("filters".to_string(), Value::from("not a map"));
        opts.insert("format".to_string(), Value::from("{{value:message}}"));

        let err = Pipeline::new("test", opts).unwrap_err();
        assert!(matches!(err, Error::InvalidTransport(_)));
    }

    #[test]
    fn test_missing_format_fails_at_finish() {
        let mut pipeline = Pipeline::new("test", Map::new()).unwrap();
        let err = pipeline.finish().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRequiredOption { ref key, .. } if key == "format"
        ));
    }
}

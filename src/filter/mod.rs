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

//! Named filter functions for placeholder chains.
//!
//! A filter transforms a running [`Value`], given an optional string parameter and the
//! [`FilterContext`] of the render. Filters are resolved by name at render time from a
//! [`FilterRegistry`]; registering under an existing name fully replaces the previous entry,
//! so configuration-supplied filters may override built-ins.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::Config;
use crate::Error;
use crate::LogEvent;
use crate::config::Value;

mod builtin;

/// A filter function: `(value, param, context) -> value`.
pub type FilterFn =
    Arc<dyn Fn(Value, Option<&str>, &FilterContext<'_>) -> Result<Value, Error> + Send + Sync>;

/// What a filter sees besides its running value: the event being rendered and the owning
/// transport's config.
pub struct FilterContext<'a> {
    /// The event being rendered.
    pub event: &'a LogEvent,
    /// The config of the transport performing the render.
    pub config: &'a Config,
}

/// A mapping from filter name to filter function.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: BTreeMap<String, FilterFn>,
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.filters.keys()).finish()
    }
}

impl FilterRegistry {
    /// Creates an empty registry.
    pub fn new() -> FilterRegistry {
        FilterRegistry::default()
    }

    /// Creates a registry seeded with the built-in filters: `value`, `datetime`, `uppercase`,
    /// `capitalize`, `colorize`, `camelcase` and `difference`.
    pub fn with_builtins() -> FilterRegistry {
        let mut registry = FilterRegistry::new();
        registry.register("value", Arc::new(builtin::value));
        registry.register("datetime", Arc::new(builtin::datetime));
        registry.register("uppercase", Arc::new(builtin::uppercase));
        registry.register("capitalize", Arc::new(builtin::capitalize));
        registry.register("colorize", Arc::new(builtin::colorize));
        registry.register("camelcase", Arc::new(builtin::camelcase));
        registry.register("difference", Arc::new(builtin::difference));
        registry
    }

    /// Inserts or overrides the entry for `name`.
    pub fn register(&mut self, name: impl Into<String>, filter: FilterFn) {
        self.filters.insert(name.into(), filter);
    }

    /// Resolves a filter by name.
    pub fn resolve(&self, name: &str) -> Option<&FilterFn> {
        self.filters.get(name)
    }
}

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

//! The placeholder template engine.
//!
//! A template contains `{{ <step> ('|' <step>)* }}` placeholders with
//! `<step> = <filterName> (':' <param>)?`. Whitespace around braces, pipes and steps is
//! insignificant. Placeholders are evaluated left to right; everything outside them passes
//! through unchanged, including line terminators.

use crate::Config;
use crate::Error;
use crate::LogEvent;
use crate::config::Value;
use crate::filter::FilterContext;
use crate::filter::FilterRegistry;

/// Renders templates against log events through a [`FilterRegistry`].
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    filters: FilterRegistry,
}

impl TemplateEngine {
    /// Creates an engine backed by the given registry.
    pub fn new(filters: FilterRegistry) -> TemplateEngine {
        TemplateEngine { filters }
    }

    /// The backing filter registry.
    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    /// Renders `template` against `event`.
    ///
    /// Each `{{...}}` occurrence is replaced, left to right, by the display form of its filter
    /// chain's final value. Repeated identical placeholders are re-evaluated independently.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTemplateInput`] for a `{{` with no closing `}}`.
    /// - [`Error::UnknownFilter`] when a chain step names no registered filter.
    /// - Whatever error a filter itself raises.
    pub fn format_string(
        &self,
        template: &str,
        event: &LogEvent,
        config: &Config,
    ) -> Result<String, Error> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                Error::InvalidTemplateInput(format!(
                    "unterminated placeholder at byte {} of {template:?}",
                    template.len() - rest.len() + start
                ))
            })?;

            let value = self.apply_filters(&after[..end], event, config)?;
            out.push_str(&value.to_string());
            rest = &after[end + 2..];
        }

        out.push_str(rest);
        Ok(out)
    }

    /// Evaluates one pipe-delimited filter chain.
    ///
    /// The running value starts at [`Value::Null`]; each step receives the previous step's
    /// output, its own parameter (the text after the first `:`, if any), and the render
    /// context.
    pub(crate) fn apply_filters(
        &self,
        chain: &str,
        event: &LogEvent,
        config: &Config,
    ) -> Result<Value, Error> {
        let ctx = FilterContext { event, config };
        let mut value = Value::Null;

        for step in chain.split('|') {
            let step = step.trim();
            let (name, param) = match step.split_once(':') {
                Some((name, param)) => (name.trim(), Some(param.trim())),
                None => (step, None),
            };
            let filter = self
                .filters
                .resolve(name)
                .ok_or_else(|| Error::UnknownFilter(name.to_string()))?;
            value = filter(value, param, &ctx)?;
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    fn engine() -> TemplateEngine {
        TemplateEngine::new(FilterRegistry::with_builtins())
    }

    fn event() -> LogEvent {
        LogEvent::new("test", Level::Info, "dlc").with_timestamp(1_000)
    }

    #[test]
    fn test_placeholder_free_template_is_unchanged() {
        let config = Config::new("test");
        let template = "plain text\nwith lines and } stray { braces";
        let out = engine().format_string(template, &event(), &config).unwrap();
        assert_eq!(out, template);
    }

    #[test]
    fn test_value_placeholder_renders_field() {
        let config = Config::new("test");
        let out = engine()
            .format_string("{{value:level}}", &event(), &config)
            .unwrap();
        assert_eq!(out, "info");
    }

    #[test]
    fn test_whitespace_is_insignificant() {
        let config = Config::new("test");
        let out = engine()
            .format_string("{{ value : level | uppercase }}", &event(), &config)
            .unwrap();
        assert_eq!(out, "INFO");
    }

    #[test]
    fn test_chain_is_left_associative() {
        let config = Config::new("test");
        let e = engine();

        let seeded = e.format_string("{{value:level}}", &event(), &config).unwrap();
        let chained = e
            .format_string("{{value:level|uppercase}}", &event(), &config)
            .unwrap();
        assert_eq!(chained, seeded.to_uppercase());
    }

    #[test]
    fn test_repeated_placeholders_render_independently() {
        let config = Config::new("test");
        let out = engine()
            .format_string("{{value:id}}/{{value:id}}", &event(), &config)
            .unwrap();
        assert_eq!(out, "test/test");
    }

    #[test]
    fn test_unknown_filter_is_named() {
        let config = Config::new("test");
        let err = engine()
            .format_string("{{value:level|redish}}", &event(), &config)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownFilter(ref name) if name == "redish"));
    }

    #[test]
    fn test_unterminated_placeholder() {
        let config = Config::new("test");
        let err = engine()
            .format_string("before {{value:level", &event(), &config)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTemplateInput(_)));
    }

    #[test]
    fn test_chain_without_seeding_filter_fails_on_null_input() {
        let config = Config::new("test");
        let err = engine()
            .format_string("{{uppercase}}", &event(), &config)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFilterInput { .. }));
    }
}

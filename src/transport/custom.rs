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

use std::fmt;
use std::sync::Arc;

use crate::Error;
use crate::LogEvent;
use crate::config::Map;
use crate::config::Value;
use crate::transport::Pipeline;
use crate::transport::Transport;

/// A sink callback, invoked once per dispatched event.
pub type Callback = Arc<dyn Fn(&LogEvent) -> Result<(), Error> + Send + Sync>;

/// A transport that hands each event to a caller-supplied callback.
///
/// Requires a `function` option holding a [`Value::Callback`]; construction fails with
/// [`Error::InvalidTransport`] if the option is of any other kind.
///
/// # Examples
///
/// ```
/// use clogger::Map;
/// use clogger::Value;
/// use clogger::transport::CustomFunction;
///
/// let mut opts = Map::new();
/// opts.insert(
///     "function".to_string(),
///     Value::callback(|event| {
///         eprintln!("{}: {}", event.level(), event.message());
///         Ok(())
///     }),
/// );
///
/// let transport = CustomFunction::new(opts)?;
/// # Ok::<(), clogger::Error>(())
/// ```
pub struct CustomFunction {
    pipeline: Pipeline,
    callback: Callback,
}

impl fmt::Debug for CustomFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomFunction {{ .. }}")
    }
}

impl CustomFunction {
    /// Creates a custom-function transport from caller-supplied options.
    pub fn new(opts: Map) -> Result<CustomFunction, Error> {
        let mut pipeline = Pipeline::new("custom-function", opts)?;
        pipeline
            .config_mut()
            .add_required("function")
            .set_default("format", Value::from("{{value:message}}"));
        pipeline.finish()?;

        let callback = match pipeline.config().value("function") {
            Some(Value::Callback(f)) => f.clone(),
            _ => {
                return Err(Error::InvalidTransport(
                    "option \"function\" of \"custom-function\" is not a callback".to_string(),
                ));
            }
        };

        Ok(CustomFunction { pipeline, callback })
    }
}

impl Transport for CustomFunction {
    fn name(&self) -> &str {
        self.pipeline.name()
    }

    fn emit(&self, event: &LogEvent) -> Result<(), Error> {
        (self.callback)(event)
    }
}

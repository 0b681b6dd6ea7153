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

use std::io::Write;

use crate::Error;
use crate::LogEvent;
use crate::config::Map;
use crate::config::Value;
use crate::transport::Pipeline;
use crate::transport::Transport;

/// The default console template.
pub const DEFAULT_FORMAT: &str = "[{{value:timestamp|datetime|colorize:blue}}] [{{value:id|capitalize}}] - {{value:level|uppercase|colorize}}:\t{{value:message|capitalize}}";

/// A transport that prints rendered events to stdout.
///
/// Carries a default `colors` map (consulted by the parameterless `colorize` filter, keyed by
/// level) and a default `format`; both can be overridden in the options.
///
/// # Examples
///
/// ```
/// use clogger::Map;
/// use clogger::Value;
/// use clogger::transport::Console;
///
/// let mut colors = Map::new();
/// colors.insert("info".to_string(), Value::from("cyan"));
///
/// let mut opts = Map::new();
/// opts.insert("colors".to_string(), Value::Map(colors));
///
/// let console = Console::new(opts)?;
/// # Ok::<(), clogger::Error>(())
/// ```
#[derive(Debug)]
pub struct Console {
    pipeline: Pipeline,
}

impl Console {
    /// Creates a console transport from caller-supplied options.
    pub fn new(opts: Map) -> Result<Console, Error> {
        let mut pipeline = Pipeline::new("console", opts)?;

        let mut colors = Map::new();
        colors.insert("info".to_string(), Value::from("white"));
        colors.insert("warn".to_string(), Value::from("yellow"));
        colors.insert("debug".to_string(), Value::from("green"));
        colors.insert("error".to_string(), Value::from("red"));
        colors.insert("trace".to_string(), Value::from("grey"));

        pipeline
            .config_mut()
            .set_default("colors", Value::Map(colors))
            .set_default("format", Value::from(DEFAULT_FORMAT));
        pipeline.finish()?;

        Ok(Console { pipeline })
    }
}

impl Transport for Console {
    fn name(&self) -> &str {
        self.pipeline.name()
    }

    fn emit(&self, event: &LogEvent) -> Result<(), Error> {
        let line = self.pipeline.render(event)?;
        let mut stdout = std::io::stdout();
        stdout.write_all(line.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

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

use std::path::PathBuf;
use std::time::Duration;

use crate::Error;
use crate::LogEvent;
use crate::config::Map;
use crate::config::Value;
use crate::transport::Pipeline;
use crate::transport::Transport;
use crate::transport::non_blocking;
use crate::transport::non_blocking::NonBlocking;
use crate::transport::non_blocking::WorkerGuard;

/// The default file template.
pub const DEFAULT_FORMAT: &str = "[{{value:timestamp|datetime}}] [{{value:id|capitalize}}] - [{{value:level|uppercase}}] - {{value:message|capitalize}}";

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// A transport that appends rendered lines to a file.
///
/// Requires a `filename` option. The filename is itself a template, re-rendered per event, so
/// one transport can fan events out to per-id or per-level files. Writes happen on a
/// background thread (see the module docs of `non_blocking`); durability at `log`-return time
/// is not guaranteed, but dropping the transport drains pending appends.
///
/// # Examples
///
/// ```no_run
/// use clogger::Map;
/// use clogger::Value;
/// use clogger::transport::LogFile;
///
/// let mut opts = Map::new();
/// opts.insert("filename".to_string(), Value::from("logs/{{value:id}}.log"));
/// let file = LogFile::new(opts)?;
/// # Ok::<(), clogger::Error>(())
/// ```
#[derive(Debug)]
pub struct LogFile {
    pipeline: Pipeline,
    filename: String,
    writer: NonBlocking,
    _guard: WorkerGuard,
}

impl LogFile {
    /// Creates a file transport from caller-supplied options.
    pub fn new(opts: Map) -> Result<LogFile, Error> {
        let mut pipeline = Pipeline::new("log-file", opts)?;
        pipeline
            .config_mut()
            .add_required("filename")
            .set_default("format", Value::from(DEFAULT_FORMAT));
        pipeline.finish()?;

        let filename = match pipeline.config().value("filename").and_then(Value::as_str) {
            Some(filename) => filename.to_string(),
            None => {
                return Err(Error::InvalidTransport(
                    "option \"filename\" of \"log-file\" is not textual".to_string(),
                ));
            }
        };

        let (writer, guard) = non_blocking::spawn(
            "clogger-log-file".to_string(),
            None,
            SHUTDOWN_TIMEOUT,
        );

        Ok(LogFile {
            pipeline,
            filename,
            writer,
            _guard: guard,
        })
    }
}

impl Transport for LogFile {
    fn name(&self) -> &str {
        self.pipeline.name()
    }

    fn emit(&self, event: &LogEvent) -> Result<(), Error> {
        // The filename template can reference the event, so it is re-rendered per dispatch.
        let path = PathBuf::from(self.pipeline.format_string(&self.filename, event)?);

        let mut line = self.pipeline.render(event)?.into_bytes();
        line.push(b'\n');
        self.writer.send(path, line)
    }
}

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

use std::fmt::Arguments;

use crate::Error;
use crate::Level;
use crate::LogEvent;
use crate::transport::Transport;

/// The logging front-end: stamps events and fans them out to attached transports.
///
/// Dispatch is synchronous and happens in attachment order. Failures are isolated per
/// transport: every transport receives the event even if an earlier one fails, and the first
/// error is returned to the caller after the full fan-out.
///
/// # Examples
///
/// ```
/// use clogger::Logger;
/// use clogger::Map;
/// use clogger::transport::Console;
///
/// let logger = Logger::new("server").add_transport(Console::new(Map::new())?);
/// logger.info(format_args!("hello from {}", "clogger"))?;
/// # Ok::<(), clogger::Error>(())
/// ```
#[derive(Debug)]
pub struct Logger {
    id: String,
    transports: Vec<Box<dyn Transport>>,
}

impl Default for Logger {
    fn default() -> Logger {
        Logger::new("default")
    }
}

impl Logger {
    /// Creates a logger with the given identifier and no transports.
    pub fn new(id: impl Into<String>) -> Logger {
        Logger {
            id: id.into(),
            transports: vec![],
        }
    }

    /// The identifier stamped into every event this logger produces.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Appends a transport to the dispatch sequence.
    pub fn add_transport(mut self, transport: impl Transport + 'static) -> Logger {
        self.transports.push(Box::new(transport));
        self
    }

    /// Stamps a [`LogEvent`] from `args` and dispatches it to every attached transport.
    ///
    /// All transports receive the same event, in attachment order. A failing transport never
    /// prevents delivery to the ones after it; the first error (if any) is returned once the
    /// fan-out completes.
    pub fn log(&self, level: Level, args: Arguments<'_>) -> Result<(), Error> {
        let event = LogEvent::new(self.id.clone(), level, args.to_string());

        let mut first_err = None;
        for transport in &self.transports {
            if let Err(err) = transport.emit(&event) {
                first_err.get_or_insert(err);
            }
        }

        match first_err {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// Logs at [`Level::Info`].
    pub fn info(&self, args: Arguments<'_>) -> Result<(), Error> {
        self.log(Level::Info, args)
    }

    /// Logs at [`Level::Warn`].
    pub fn warn(&self, args: Arguments<'_>) -> Result<(), Error> {
        self.log(Level::Warn, args)
    }

    /// Logs at [`Level::Debug`].
    pub fn debug(&self, args: Arguments<'_>) -> Result<(), Error> {
        self.log(Level::Debug, args)
    }

    /// Logs at [`Level::Error`].
    pub fn error(&self, args: Arguments<'_>) -> Result<(), Error> {
        self.log(Level::Error, args)
    }

    /// Logs at [`Level::Trace`].
    pub fn trace(&self, args: Arguments<'_>) -> Result<(), Error> {
        self.log(Level::Trace, args)
    }
}

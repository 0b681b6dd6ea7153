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

//! Bridge to the `log` crate.
//!
//! [`setup`] installs a global proxy so that `log::info!` and friends are forwarded to a
//! [`Logger`]'s transports. Since [`log::Log::log`] cannot return a result, render and sink
//! errors fall back to a stderr report.

use std::io::Write;
use std::sync::OnceLock;

use crate::Error;
use crate::Logger;

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

struct LogCrateBridge(());

impl log::Log for LogCrateBridge {
    fn enabled(&self, _: &log::Metadata) -> bool {
        DEFAULT_LOGGER.get().is_some()
    }

    fn log(&self, record: &log::Record) {
        let Some(logger) = DEFAULT_LOGGER.get() else {
            return;
        };
        let level = record.level().into();
        if let Err(err) = logger.log(level, format_args!("{}", record.args())) {
            handle_error(record, err);
        }
    }

    fn flush(&self) {}
}

/// Sets up the log crate global logger, forwarding all records to `logger`.
///
/// This should be called early in the execution of a Rust program. Any records emitted before
/// initialization are ignored. The global maximum level is set to `Trace`; call
/// [`log::set_max_level`] afterwards to override.
///
/// # Errors
///
/// Returns an error if the log crate global logger has already been set.
pub fn try_setup(logger: Logger) -> Result<(), log::SetLoggerError> {
    static BRIDGE: LogCrateBridge = LogCrateBridge(());
    log::set_logger(&BRIDGE)?;
    log::set_max_level(log::LevelFilter::Trace);
    let _ = DEFAULT_LOGGER.set(logger);
    Ok(())
}

/// Sets up the log crate global logger, forwarding all records to `logger`.
///
/// Same as [`try_setup`], except that it panics if the log crate global logger has already
/// been set.
pub fn setup(logger: Logger) {
    try_setup(logger)
        .expect("clogger::bridge::setup must be called before the log crate global logger is initialized");
}

fn handle_error(record: &log::Record, error: Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error performing logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error}
"###,
        args = record.args(),
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error}
    Fallback error: {fallback_error}
"###,
        args = record.args(),
    );
}

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

//! Clogger is a pluggable logging facade: a [`Logger`] stamps leveled events and fans them out
//! to attached transports, each of which renders the event through a filter-chained string
//! template before writing it to its sink (console, file, callback, in-memory store).
//!
//! # Overview
//!
//! Templates contain `{{...}}` placeholders holding pipe-delimited filter chains, e.g.
//! `{{value:level|uppercase|colorize}}`. Each chain step names a filter in the transport's
//! [`FilterRegistry`]; the output of one step feeds the next. Transports declare their options
//! (required keys, defaults, custom filters) through a [`Config`] that validates at
//! construction, never at render time.
//!
//! # Examples
//!
//! Collect rendered events in an in-memory store:
//!
//! ```
//! use std::sync::Arc;
//!
//! use clogger::Logger;
//! use clogger::Map;
//! use clogger::Value;
//! use clogger::transport::Memory;
//! use clogger::transport::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//!
//! let mut opts = Map::new();
//! opts.insert("store".to_string(), Value::store(store.clone()));
//!
//! let logger = Logger::new("server").add_transport(Memory::new(opts)?);
//! logger.info(format_args!("listening on port {}", 8080))?;
//!
//! assert_eq!(store.records()[0].message(), "listening on port 8080");
//! # Ok::<(), clogger::Error>(())
//! ```
//!
//! Render through a custom template and filter:
//!
//! ```
//! use clogger::Map;
//! use clogger::Value;
//! use clogger::transport::Console;
//!
//! let mut opts = Map::new();
//! opts.insert(
//!     "format".to_string(),
//!     Value::from("{{value:level|uppercase}} {{value:message|capitalize}}"),
//! );
//! let console = Console::new(opts)?;
//! # Ok::<(), clogger::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod bridge;
pub mod config;
pub mod filter;
pub mod template;
pub mod transport;

mod error;
mod logger;
mod record;
mod style;

pub use config::Config;
pub use config::Map;
pub use config::Value;
pub use error::Error;
pub use filter::FilterContext;
pub use filter::FilterFn;
pub use filter::FilterRegistry;
pub use logger::Logger;
pub use record::Level;
pub use record::LogEvent;
pub use template::TemplateEngine;
pub use transport::Pipeline;
pub use transport::Transport;

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
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::Error;
use crate::LogEvent;
use crate::config::Map;
use crate::config::Value;
use crate::transport::Pipeline;
use crate::transport::Transport;

/// A destination for raw log events, as consumed by the [`Memory`] transport.
pub trait RecordStore: fmt::Debug + Send + Sync {
    /// Inserts one event.
    fn insert(&self, event: LogEvent);
}

/// An in-process [`RecordStore`] backed by a `Vec`.
///
/// Useful as a log destination in tests and as the crate's in-memory sink.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<LogEvent>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// A snapshot of all inserted events, in insertion order.
    pub fn records(&self) -> Vec<LogEvent> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The number of inserted events.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no event has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryStore {
    fn insert(&self, event: LogEvent) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// A transport that inserts each event into a [`RecordStore`].
///
/// Requires a `store` option holding a [`Value::Store`]; construction fails with
/// [`Error::InvalidTransport`] if the option is of any other kind.
pub struct Memory {
    pipeline: Pipeline,
    store: Arc<dyn RecordStore>,
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory").field("store", &self.store).finish()
    }
}

impl Memory {
    /// Creates a memory transport from caller-supplied options.
    pub fn new(opts: Map) -> Result<Memory, Error> {
        let mut pipeline = Pipeline::new("memory", opts)?;
        pipeline
            .config_mut()
            .add_required("store")
            .set_default("format", Value::from("{{value:message}}"));
        pipeline.finish()?;

        let store = match pipeline.config().value("store") {
            Some(Value::Store(store)) => store.clone(),
            _ => {
                return Err(Error::InvalidTransport(
                    "option \"store\" of \"memory\" is not a record store".to_string(),
                ));
            }
        };

        Ok(Memory { pipeline, store })
    }
}

impl Transport for Memory {
    fn name(&self) -> &str {
        self.pipeline.name()
    }

    fn emit(&self, event: &LogEvent) -> Result<(), Error> {
        self.store.insert(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    #[test]
    fn test_insert_preserves_events() {
        let store = Arc::new(MemoryStore::new());

        let mut opts = Map::new();
        opts.insert("store".to_string(), Value::store(store.clone()));
        let memory = Memory::new(opts).unwrap();

        let event = LogEvent::new("test", Level::Info, "cld");
        memory.emit(&event).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0], event);
    }

    #[test]
    fn test_wrong_kind_store_option() {
        let mut opts = Map::new();
        opts.insert("store".to_string(), Value::from("not a store"));

        let err = Memory::new(opts).unwrap_err();
        assert!(matches!(err, Error::InvalidTransport(_)));
    }
}

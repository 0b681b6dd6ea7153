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

use std::sync::Arc;

use clogger::Level;
use clogger::Logger;
use clogger::Map;
use clogger::Value;
use clogger::bridge;
use clogger::transport::Memory;
use clogger::transport::MemoryStore;

#[test]
fn test_log_crate_records_are_forwarded() {
    let store = Arc::new(MemoryStore::new());
    let mut opts = Map::new();
    opts.insert("store".to_string(), Value::store(store.clone()));
    let logger = Logger::new("bridge").add_transport(Memory::new(opts).unwrap());

    bridge::setup(logger);

    log::info!("{}l{}", "d", "c");
    log::warn!("watch out");

    let records = store.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id(), "bridge");
    assert_eq!(records[0].level(), Level::Info);
    assert_eq!(records[0].message(), "dlc");
    assert_eq!(records[1].level(), Level::Warn);
    assert_eq!(records[1].message(), "watch out");
}

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

//! The background writer behind the file transport.
//!
//! Appends are sent over a crossbeam channel to a dedicated thread, so a slow disk stalls only
//! the writer, not the logging caller. The guard flushes pending appends on drop.

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::Receiver;
use crossbeam_channel::RecvError;
use crossbeam_channel::SendTimeoutError;
use crossbeam_channel::Sender;
use crossbeam_channel::TryRecvError;
use crossbeam_channel::bounded;
use crossbeam_channel::unbounded;

use crate::Error;

#[derive(Debug)]
enum Message {
    Append { path: PathBuf, bytes: Vec<u8> },
    Shutdown,
}

/// Spawns the writer thread and returns its sending half plus the shutdown guard.
pub(super) fn spawn(
    thread_name: String,
    buffered_lines_limit: Option<usize>,
    shutdown_timeout: Duration,
) -> (NonBlocking, WorkerGuard) {
    let (sender, receiver) = match buffered_lines_limit {
        Some(cap) => bounded(cap),
        None => unbounded(),
    };

    // Zero capacity makes the guard's shutdown send a rendezvous with the worker's final recv,
    // i.e. the worker has drained the queue by the time the guard returns.
    let (shutdown_sender, shutdown_receiver) = bounded(0);

    let worker = Worker {
        receiver,
        shutdown: shutdown_receiver,
    };
    let guard = WorkerGuard {
        _handle: worker.make_thread(thread_name),
        sender: sender.clone(),
        shutdown: shutdown_sender,
        shutdown_timeout,
    };

    (NonBlocking { sender }, guard)
}

#[derive(Debug, Clone)]
pub(super) struct NonBlocking {
    sender: Sender<Message>,
}

impl NonBlocking {
    pub(super) fn send(&self, path: PathBuf, bytes: Vec<u8>) -> Result<(), Error> {
        self.sender
            .send(Message::Append { path, bytes })
            .map_err(|_| Error::Io(io::Error::other("log file writer disconnected")))
    }
}

/// Signals the worker to drain and stop when dropped.
#[derive(Debug)]
pub(super) struct WorkerGuard {
    _handle: JoinHandle<()>,
    sender: Sender<Message>,
    shutdown: Sender<()>,
    shutdown_timeout: Duration,
}

impl Drop for WorkerGuard {
    fn drop(&mut self) {
        match self
            .sender
            .send_timeout(Message::Shutdown, self.shutdown_timeout)
        {
            Ok(()) => {
                let _ = self.shutdown.send_timeout((), self.shutdown_timeout);
            }
            Err(SendTimeoutError::Disconnected(_)) => (),
            Err(SendTimeoutError::Timeout(_)) => {
                eprintln!("failed to send shutdown signal to log file writer");
            }
        }
    }
}

struct Worker {
    receiver: Receiver<Message>,
    shutdown: Receiver<()>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum WorkerState {
    Empty,
    Disconnected,
    Continue,
    Shutdown,
}

impl Worker {
    fn append(&self, path: PathBuf, bytes: Vec<u8>) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).create(true).open(path)?;
        file.write_all(&bytes)
    }

    fn recv(&mut self) -> io::Result<WorkerState> {
        match self.receiver.recv() {
            Ok(Message::Append { path, bytes }) => {
                self.append(path, bytes)?;
                Ok(WorkerState::Continue)
            }
            Ok(Message::Shutdown) => Ok(WorkerState::Shutdown),
            Err(RecvError) => Ok(WorkerState::Disconnected),
        }
    }

    fn try_recv(&mut self) -> io::Result<WorkerState> {
        match self.receiver.try_recv() {
            Ok(Message::Append { path, bytes }) => {
                self.append(path, bytes)?;
                Ok(WorkerState::Continue)
            }
            Ok(Message::Shutdown) => Ok(WorkerState::Shutdown),
            Err(TryRecvError::Empty) => Ok(WorkerState::Empty),
            Err(TryRecvError::Disconnected) => Ok(WorkerState::Disconnected),
        }
    }

    fn work(&mut self) -> io::Result<WorkerState> {
        let mut state = self.recv()?;
        while state == WorkerState::Continue {
            state = self.try_recv()?;
        }
        Ok(state)
    }

    fn make_thread(mut self, name: String) -> JoinHandle<()> {
        std::thread::Builder::new()
            .name(name)
            .spawn(move || {
                loop {
                    match self.work() {
                        Ok(WorkerState::Continue) | Ok(WorkerState::Empty) => {}
                        Ok(WorkerState::Shutdown) | Ok(WorkerState::Disconnected) => {
                            let _ = self.shutdown.recv();
                            break;
                        }
                        Err(err) => {
                            eprintln!("failed to write log file: {err}");
                        }
                    }
                }
            })
            .expect("failed to spawn the log file writer thread")
    }
}

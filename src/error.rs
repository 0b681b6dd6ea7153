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

/// The error type of clogger.
///
/// Configuration errors ([`MissingRequiredOption`](Error::MissingRequiredOption),
/// [`InvalidTransport`](Error::InvalidTransport)) surface at construction time and abort setup.
/// The remaining variants are render-time errors, local to one transport's handling of one
/// event.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A declared-required config key never resolved after load.
    #[error("missing required option \"{key}\" for \"{owner}\"")]
    MissingRequiredOption {
        /// The owner name of the [`Config`](crate::Config) that failed validation.
        owner: String,
        /// The required key that did not resolve.
        key: String,
    },

    /// A transport's function-valued option has the wrong [`Value`](crate::Value) kind, so the
    /// instance cannot satisfy its sink contract.
    #[error("invalid transport: {0}")]
    InvalidTransport(String),

    /// A chain step names a filter absent from the registry.
    #[error("unknown filter \"{0}\"")]
    UnknownFilter(String),

    /// A filter received a value of the wrong shape.
    #[error("invalid input for filter \"{filter}\": {reason}")]
    InvalidFilterInput {
        /// The filter that rejected its input.
        filter: String,
        /// Why the input was rejected.
        reason: String,
    },

    /// A filter received a parameter of the wrong shape.
    #[error("invalid argument for filter \"{filter}\": {reason}")]
    InvalidFilterArgument {
        /// The filter that rejected its parameter.
        filter: String,
        /// Why the parameter was rejected.
        reason: String,
    },

    /// A template contains a `{{` with no closing `}}`.
    #[error("invalid template: {0}")]
    InvalidTemplateInput(String),

    /// A sink failed to perform an IO action.
    #[error("failed to perform IO action: {0}")]
    Io(#[from] std::io::Error),
}

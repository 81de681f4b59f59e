//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Engine error types.
//!
//! Skill transitions never fail; they decline to act and hand back an unchanged snapshot.
//! Errors only surface while building engine state from outside data.

use skillforge_common::SkillId;
use thiserror::Error;

/// Errors raised while constructing or importing skill state.
#[derive(Debug, Error)]
pub enum SkillError {
    /// A skill record references an id with no matching definition.
    #[error("Unknown skill: {0}")]
    UnknownSkill(SkillId),

    /// A definition record violates a definition invariant.
    #[error("Invalid definition for skill {id}: {reason}")]
    InvalidDefinition { id: SkillId, reason: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for skill state construction.
pub type SkillResult<T> = Result<T, SkillError>;

/// Errors raised while loading configuration or catalog files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be opened or read.
    #[error("Failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML for the expected shape.
    #[error("Failed to parse {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A catalog skill definition is invalid.
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] SkillError),

    /// A catalog book trains no levels.
    #[error("Invalid book {0}: empty level range")]
    InvalidBook(String),
}

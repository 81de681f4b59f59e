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

//! Book content records

use crate::skill::SkillId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of book, used for archetype defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookType {
    /// Short practical how-to guide.
    Manual,
    /// Dense, slow study material.
    Textbook,
    /// Lookup material for intermediate readers.
    Reference,
    /// Reading for pleasure.
    Novel,
    /// Light picture reading.
    Comic,
}

impl BookType {
    pub fn name(&self) -> &'static str {
        match self {
            BookType::Manual => "Manual",
            BookType::Textbook => "Textbook",
            BookType::Reference => "Reference",
            BookType::Novel => "Novel",
            BookType::Comic => "Comic",
        }
    }
}

impl fmt::Display for BookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Immutable book content record.
///
/// A book trains `skill_id` for readers whose level lies in `required_level..max_level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookData {
    pub id: String,
    pub name: String,
    pub book_type: BookType,
    pub skill_id: SkillId,
    pub required_level: u32,
    pub max_level: u32,
    /// Base reading time in milliseconds
    pub base_reading_time: u64,
    pub theory_experience: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fun: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_required: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BookData {
    /// Number of levels this book can train across
    pub fn level_span(&self) -> u32 {
        self.max_level.saturating_sub(self.required_level)
    }

    /// Check whether the book trains anything at all
    pub fn is_valid(&self) -> bool {
        self.required_level < self.max_level
    }
}

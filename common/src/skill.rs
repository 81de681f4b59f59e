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

//! Shared skill identity types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique skill identifier.
///
/// Skill content is data driven, so identifiers are plain strings such as `"archery"` or
/// `"first_aid"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(String);

impl SkillId {
    /// Create a new skill identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for SkillId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SkillId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for SkillId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            Err("Skill id cannot be empty".to_string())
        } else {
            Ok(Self(s.trim().to_string()))
        }
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Skill categories for organization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    /// Melee and defensive skills.
    Combat,
    /// Bows, crossbows and thrown weapons.
    Ranged,
    /// Wilderness and environmental survival skills.
    Survival,
    /// Item creation and repair skills.
    Crafting,
    /// Interpersonal and influence skills.
    Social,
    /// Academic and theoretical knowledge.
    Academic,
    /// Strength, endurance and athletics.
    Physical,
    /// Anything content authors have not classified.
    #[default]
    #[serde(other)]
    Other,
}

impl SkillCategory {
    /// Iterator over SkillCategory variants
    pub fn iter() -> impl Iterator<Item = Self> {
        [
            SkillCategory::Combat,
            SkillCategory::Ranged,
            SkillCategory::Survival,
            SkillCategory::Crafting,
            SkillCategory::Social,
            SkillCategory::Academic,
            SkillCategory::Physical,
            SkillCategory::Other,
        ]
        .into_iter()
    }

    /// Category display name
    pub fn name(&self) -> &'static str {
        match self {
            SkillCategory::Combat => "Combat",
            SkillCategory::Ranged => "Ranged",
            SkillCategory::Survival => "Survival",
            SkillCategory::Crafting => "Crafting",
            SkillCategory::Social => "Social",
            SkillCategory::Academic => "Academic",
            SkillCategory::Physical => "Physical",
            SkillCategory::Other => "Other",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

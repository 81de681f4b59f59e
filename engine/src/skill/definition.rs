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

use crate::error::{SkillError, SkillResult};
use skillforge_common::{PrerequisiteRecord, SkillCategory, SkillDefinitionRecord, SkillId};
use std::collections::{BTreeMap, BTreeSet};

/// Experience needed per level at a difficulty multiplier of 1.0
pub const BASE_EXPERIENCE_PER_LEVEL: f64 = 100.0;

/// Smallest difficulty multiplier a definition will hold; the multiplier is used as a divisor.
pub const MIN_DIFFICULTY_MULTIPLIER: f64 = 0.01;

/// Practice yield never drops below this fraction before difficulty is applied.
const MIN_PRACTICE_YIELD: f64 = 0.2;

/// Yield lost per effective level.
const PRACTICE_YIELD_FALLOFF: f64 = 0.1;

/// A skill that must reach a level before another can be learned
#[derive(Debug, Clone, PartialEq)]
pub struct Prerequisite {
    pub skill_id: SkillId,
    pub required_level: u32,
}

/// Immutable description of a skill type.
///
/// Definitions are created once when content is loaded and shared by every [`Skill`] of that
/// id through an `Arc`.
///
/// ## Experience Curve
/// XP(L) = floor(100 * D)
///
/// The level argument is part of the curve signature but the current curve is flat.
///
/// ## Practice Yield
/// Y(L) = max(0.2, 1 - min(0.1 * L, 0.8)) / D
///
/// D = Difficulty multiplier (higher is harder)
/// L = Effective level
///
/// [`Skill`]: crate::skill::Skill
#[derive(Debug, Clone, PartialEq)]
pub struct SkillDefinition {
    id: SkillId,
    name: String,
    description: String,
    category: SkillCategory,
    difficulty_multiplier: f64,
    is_hidden: bool,
    related_items: BTreeSet<String>,
    prerequisites: Vec<Prerequisite>,
    rust_rate: f64,
    default_rust_resist: f64,
}

impl SkillDefinition {
    /// Create a definition with default tuning (difficulty 1.0, rust rate 1.0, no resist)
    pub fn new(id: impl Into<SkillId>, name: impl Into<String>, category: SkillCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category,
            difficulty_multiplier: 1.0,
            is_hidden: false,
            related_items: BTreeSet::new(),
            prerequisites: Vec::new(),
            rust_rate: 1.0,
            default_rust_resist: 0.0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the difficulty multiplier, clamped to [`MIN_DIFFICULTY_MULTIPLIER`]
    pub fn with_difficulty(mut self, difficulty_multiplier: f64) -> Self {
        self.difficulty_multiplier = if difficulty_multiplier.is_finite() {
            difficulty_multiplier.max(MIN_DIFFICULTY_MULTIPLIER)
        } else {
            1.0
        };
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    pub fn with_related_item(mut self, item_type: impl Into<String>) -> Self {
        self.related_items.insert(item_type.into());
        self
    }

    pub fn with_prerequisite(mut self, skill_id: impl Into<SkillId>, required_level: u32) -> Self {
        self.prerequisites.push(Prerequisite {
            skill_id: skill_id.into(),
            required_level,
        });
        self
    }

    /// Set the rust rate in levels per day, never negative
    pub fn with_rust_rate(mut self, rust_rate: f64) -> Self {
        self.rust_rate = rust_rate.max(0.0);
        self
    }

    /// Set the starting rust resist, clamped to `0.0..=1.0`
    pub fn with_rust_resist(mut self, rust_resist: f64) -> Self {
        self.default_rust_resist = rust_resist.clamp(0.0, 1.0);
        self
    }

    pub fn id(&self) -> &SkillId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> SkillCategory {
        self.category
    }

    pub fn difficulty_multiplier(&self) -> f64 {
        self.difficulty_multiplier
    }

    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    pub fn related_items(&self) -> impl Iterator<Item = &str> {
        self.related_items.iter().map(String::as_str)
    }

    /// Check whether an item type trains or uses this skill
    pub fn is_related_to(&self, item_type: &str) -> bool {
        self.related_items.contains(item_type)
    }

    pub fn prerequisites(&self) -> &[Prerequisite] {
        &self.prerequisites
    }

    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }

    pub fn rust_rate(&self) -> f64 {
        self.rust_rate
    }

    pub fn default_rust_resist(&self) -> f64 {
        self.default_rust_resist
    }

    /// Experience required to advance out of `level`.
    ///
    /// ## Equation
    /// XP(L) = floor(100 * D)
    pub fn experience_for_level(&self, _level: u32) -> u32 {
        (BASE_EXPERIENCE_PER_LEVEL * self.difficulty_multiplier).floor() as u32
    }

    /// Practice yield multiplier at an effective level.
    ///
    /// ## Equation
    /// Y(L) = max(0.2, 1 - min(0.1 * L, 0.8)) / D
    pub fn experience_multiplier(&self, level: u32) -> f64 {
        let falloff = f64::min(level as f64 * PRACTICE_YIELD_FALLOFF, 0.8);
        f64::max(MIN_PRACTICE_YIELD, 1.0 - falloff) / self.difficulty_multiplier
    }

    /// Check every prerequisite against a level map; missing skills count as level 0
    pub fn check_prerequisites(&self, levels: &BTreeMap<SkillId, u32>) -> bool {
        self.prerequisites.iter().all(|prerequisite| {
            levels.get(&prerequisite.skill_id).copied().unwrap_or(0) >= prerequisite.required_level
        })
    }

    pub fn to_record(&self) -> SkillDefinitionRecord {
        SkillDefinitionRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category,
            difficulty_multiplier: self.difficulty_multiplier,
            is_hidden: self.is_hidden,
            related_items: self.related_items.iter().cloned().collect(),
            prerequisites: self
                .prerequisites
                .iter()
                .map(|prerequisite| PrerequisiteRecord {
                    skill_id: prerequisite.skill_id.clone(),
                    level: prerequisite.required_level,
                })
                .collect(),
            rust_rate: self.rust_rate,
            default_rust_resist: self.default_rust_resist,
        }
    }

    /// Build a definition from its record, rejecting values that break definition invariants
    pub fn from_record(record: SkillDefinitionRecord) -> SkillResult<Self> {
        let invalid = |reason: String| SkillError::InvalidDefinition {
            id: record.id.clone(),
            reason,
        };
        if !record.difficulty_multiplier.is_finite()
            || record.difficulty_multiplier < MIN_DIFFICULTY_MULTIPLIER
        {
            return Err(invalid(format!(
                "difficulty multiplier must be at least {}, got {}",
                MIN_DIFFICULTY_MULTIPLIER, record.difficulty_multiplier
            )));
        }
        if !record.rust_rate.is_finite() || record.rust_rate < 0.0 {
            return Err(invalid(format!(
                "rust rate must not be negative, got {}",
                record.rust_rate
            )));
        }
        if !(0.0..=1.0).contains(&record.default_rust_resist) {
            return Err(invalid(format!(
                "rust resist must be within 0..=1, got {}",
                record.default_rust_resist
            )));
        }

        Ok(Self {
            id: record.id,
            name: record.name,
            description: record.description,
            category: record.category,
            difficulty_multiplier: record.difficulty_multiplier,
            is_hidden: record.is_hidden,
            related_items: record.related_items.into_iter().collect(),
            prerequisites: record
                .prerequisites
                .into_iter()
                .map(|prerequisite| Prerequisite {
                    skill_id: prerequisite.skill_id,
                    required_level: prerequisite.level,
                })
                .collect(),
            rust_rate: record.rust_rate,
            default_rust_resist: record.default_rust_resist,
        })
    }

    pub fn to_json(&self) -> SkillResult<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    pub fn from_json(json: &str) -> SkillResult<Self> {
        Self::from_record(serde_json::from_str(json)?)
    }
}

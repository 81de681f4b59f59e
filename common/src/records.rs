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

//! Plain serializable records for skill definitions, skills and skill managers.
//!
//! These are the load/save boundary of the engine. Definition records use `snake_case` keys,
//! skill records use `camelCase` keys, and every timestamp is stored as epoch milliseconds.
//!
//! Skill records written before the theory and rust tracks existed carry neither block; both
//! are optional on read.

use crate::skill::{SkillCategory, SkillId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_difficulty_multiplier() -> f64 {
    1.0
}

fn default_rust_rate() -> f64 {
    1.0
}

/// A single prerequisite of a skill definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrerequisiteRecord {
    pub skill_id: SkillId,
    pub level: u32,
}

/// Serialized form of a skill definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDefinitionRecord {
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: SkillCategory,
    #[serde(default = "default_difficulty_multiplier")]
    pub difficulty_multiplier: f64,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub related_items: Vec<String>,
    #[serde(default)]
    pub prerequisites: Vec<PrerequisiteRecord>,
    #[serde(default = "default_rust_rate")]
    pub rust_rate: f64,
    #[serde(default)]
    pub default_rust_resist: f64,
}

/// Hands-on practice block of a skill record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeRecord {
    pub practice_count: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_practiced: DateTime<Utc>,
    #[serde(default)]
    pub is_decaying: bool,
}

/// Book study block of a skill record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TheoryRecord {
    pub theory_level: u32,
    pub theory_experience: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_studied: DateTime<Utc>,
}

impl TheoryRecord {
    /// Untrained theory block stamped at the given time
    pub fn starting_at(timestamp: DateTime<Utc>) -> Self {
        Self {
            theory_level: 0,
            theory_experience: 0,
            last_studied: timestamp,
        }
    }
}

/// Rust (disuse decay) block of a skill record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RustRecord {
    pub is_rusted: bool,
    pub rust_level: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_check_time: DateTime<Utc>,
    #[serde(default)]
    pub rust_resist: f64,
}

impl RustRecord {
    /// Rust-free block stamped at the given time
    pub fn starting_at(timestamp: DateTime<Utc>, rust_resist: f64) -> Self {
        Self {
            is_rusted: false,
            rust_level: 0,
            last_check_time: timestamp,
            rust_resist,
        }
    }
}

/// Serialized form of one character's skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecord {
    pub id: SkillId,
    pub level: u32,
    pub experience: u32,
    pub is_unlocked: bool,
    pub practice: PracticeRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theory: Option<TheoryRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rust: Option<RustRecord>,
}

/// Serialized form of a character's full skill set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillManagerRecord {
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
    #[serde(default)]
    pub definitions: Vec<SkillDefinitionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_record_defaults() {
        let record: SkillDefinitionRecord =
            serde_json::from_str(r#"{"id": "archery", "name": "Archery"}"#).unwrap();
        assert_eq!(record.difficulty_multiplier, 1.0);
        assert_eq!(record.rust_rate, 1.0);
        assert_eq!(record.default_rust_resist, 0.0);
        assert_eq!(record.category, SkillCategory::Other);
        assert!(record.prerequisites.is_empty());
    }

    #[test]
    fn test_definition_record_prerequisites() {
        let record: SkillDefinitionRecord = serde_json::from_str(
            r#"{
                "id": "bowyery",
                "name": "Bowyery",
                "category": "crafting",
                "difficulty_multiplier": 1.5,
                "prerequisites": [{"skill_id": "archery", "level": 3}]
            }"#,
        )
        .unwrap();
        assert_eq!(record.category, SkillCategory::Crafting);
        assert_eq!(record.prerequisites[0].skill_id, SkillId::from("archery"));
        assert_eq!(record.prerequisites[0].level, 3);
    }

    #[test]
    fn test_legacy_skill_record_without_theory_or_rust() {
        let record: SkillRecord = serde_json::from_str(
            r#"{
                "id": "cooking",
                "level": 2,
                "experience": 40,
                "isUnlocked": true,
                "practice": {"practiceCount": 12, "lastPracticed": 1700000000000}
            }"#,
        )
        .unwrap();
        assert!(record.theory.is_none());
        assert!(record.rust.is_none());
        assert_eq!(record.practice.last_practiced.timestamp_millis(), 1_700_000_000_000);
        assert!(!record.practice.is_decaying);
    }

    #[test]
    fn test_skill_record_uses_camel_case_keys() {
        let stamp = DateTime::from_timestamp_millis(1_000).unwrap();
        let record = SkillRecord {
            id: SkillId::from("cooking"),
            level: 1,
            experience: 5,
            is_unlocked: true,
            practice: PracticeRecord {
                practice_count: 3,
                last_practiced: stamp,
                is_decaying: false,
            },
            theory: Some(TheoryRecord::starting_at(stamp)),
            rust: Some(RustRecord::starting_at(stamp, 0.25)),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["isUnlocked"], true);
        assert_eq!(json["practice"]["lastPracticed"], 1_000);
        assert_eq!(json["theory"]["theoryLevel"], 0);
        assert_eq!(json["rust"]["lastCheckTime"], 1_000);
        assert_eq!(json["rust"]["rustResist"], 0.25);
    }
}

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

//! # Skill Manager
//!
//! [`SkillManager`] holds one character's full skill set as an immutable value. Every batch
//! operation returns a new manager; unknown or locked skills are skipped without error.

use crate::book::{BookManager, ReadingOutcome};
use crate::error::{SkillError, SkillResult};
use crate::skill::{Skill, SkillDefinition, Timestamp};
use skillforge_common::{BookData, SkillCategory, SkillId, SkillManagerRecord};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Summary of a character's skill set
#[derive(Debug, Clone, PartialEq)]
pub struct SkillStatistics {
    pub total_skills: usize,
    pub unlocked_skills: usize,
    pub total_level: u32,
    pub average_level: f64,
    pub expert_skills: usize,
    pub mastered_skills: usize,
    pub rusted_skills: usize,
    pub highest_skill: Option<SkillId>,
}

/// One character's skills and the definitions they are built on.
///
/// Every key in `skills` has a matching key in `definitions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillManager {
    skills: BTreeMap<SkillId, Skill>,
    definitions: BTreeMap<SkillId, Arc<SkillDefinition>>,
}

impl SkillManager {
    /// Build a fresh skill set with one untrained skill per definition.
    ///
    /// Hidden skills and skills with prerequisites start locked.
    pub fn new(definitions: impl IntoIterator<Item = SkillDefinition>, now: Timestamp) -> Self {
        let mut manager = Self::default();
        for definition in definitions {
            manager.insert_definition(Arc::new(definition), now);
        }
        tracing::debug!("Created skill set with {} skills", manager.skills.len());
        manager
    }

    fn insert_definition(&mut self, definition: Arc<SkillDefinition>, now: Timestamp) {
        let skill = if definition.is_hidden() || definition.has_prerequisites() {
            Skill::locked(definition.clone(), now)
        } else {
            Skill::create(definition.clone(), now)
        };
        self.skills.insert(definition.id().clone(), skill);
        self.definitions.insert(definition.id().clone(), definition);
    }

    /// Apply `transition` to one skill, sharing everything else. Absent skills are skipped.
    fn with_skill(&self, id: &SkillId, transition: impl FnOnce(&Skill) -> Skill) -> Self {
        let Some(skill) = self.skills.get(id) else {
            return self.clone();
        };
        let updated = transition(skill);
        if &updated == skill {
            return self.clone();
        }
        let mut next = self.clone();
        next.skills.insert(id.clone(), updated);
        next
    }

    /// Apply `transition` to every skill, replacing only those that changed
    fn with_each_skill(&self, transition: impl Fn(&Skill) -> Skill) -> (Self, usize) {
        let mut next = self.clone();
        let mut changed = 0;
        for (id, skill) in &self.skills {
            let updated = transition(skill);
            if &updated != skill {
                next.skills.insert(id.clone(), updated);
                changed += 1;
            }
        }
        (next, changed)
    }

    pub fn get_skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn get_definition(&self, id: &SkillId) -> Option<&Arc<SkillDefinition>> {
        self.definitions.get(id)
    }

    pub fn has_skill(&self, id: &SkillId) -> bool {
        self.skills.contains_key(id)
    }

    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Practice level of a skill, 0 when absent
    pub fn level(&self, id: &SkillId) -> u32 {
        self.skills.get(id).map(Skill::level).unwrap_or(0)
    }

    /// Effective level of a skill, 0 when absent
    pub fn effective_level(&self, id: &SkillId) -> u32 {
        self.skills.get(id).map(Skill::effective_level).unwrap_or(0)
    }

    /// Practice levels of every skill, for prerequisite checks
    pub fn skill_levels(&self) -> BTreeMap<SkillId, u32> {
        self.skills
            .iter()
            .map(|(id, skill)| (id.clone(), skill.level()))
            .collect()
    }

    /// Practice one skill and apply any level-ups it earned
    pub fn practice_skill(&self, id: &SkillId, base_experience: u32, now: Timestamp) -> Self {
        self.with_skill(id, |skill| {
            if skill.is_unlocked() {
                skill.practice_skill(base_experience, now).auto_level_up()
            } else {
                skill.clone()
            }
        })
    }

    /// Practice several skills in order
    pub fn practice_multiple(&self, practice: &[(SkillId, u32)], now: Timestamp) -> Self {
        practice
            .iter()
            .fold(self.clone(), |manager, (id, base_experience)| {
                manager.practice_skill(id, *base_experience, now)
            })
    }

    /// Practice every unlocked skill with the same base experience
    pub fn practice_all(&self, base_experience: u32, now: Timestamp) -> Self {
        let (next, changed) = self.with_each_skill(|skill| {
            if skill.is_unlocked() {
                skill.practice_skill(base_experience, now).auto_level_up()
            } else {
                skill.clone()
            }
        });
        tracing::debug!("Practiced {} skills", changed);
        next
    }

    pub fn study_theory(&self, id: &SkillId, base_experience: u32, now: Timestamp) -> Self {
        self.with_skill(id, |skill| skill.study_theory(base_experience, now))
    }

    /// Run theory conversion on every skill
    pub fn convert_theory(&self, now: Timestamp) -> Self {
        let (next, changed) = self.with_each_skill(|skill| skill.convert_theory_to_practice(now));
        if changed > 0 {
            tracing::info!("Converted theory into practice for {} skills", changed);
        }
        next
    }

    /// Read a book with the matching skill.
    ///
    /// Returns `None` when this character has no such skill.
    pub fn read_book(
        &self,
        book: &BookData,
        intelligence: Option<u32>,
        now: Timestamp,
    ) -> Option<(Self, ReadingOutcome)> {
        let skill = self.skills.get(&book.skill_id)?;
        let outcome = BookManager::read_book(book, skill, intelligence, now);
        let next = if outcome.success {
            self.with_skill(&book.skill_id, |_| outcome.skill.clone())
        } else {
            self.clone()
        };
        Some((next, outcome))
    }

    pub fn set_skill_level(&self, id: &SkillId, level: u32) -> Self {
        self.with_skill(id, |skill| skill.set_level(level))
    }

    pub fn set_multiple_skills(&self, levels: &[(SkillId, u32)]) -> Self {
        levels
            .iter()
            .fold(self.clone(), |manager, (id, level)| {
                manager.set_skill_level(id, *level)
            })
    }

    pub fn unlock_skill(&self, id: &SkillId) -> Self {
        self.with_skill(id, Skill::unlock)
    }

    /// Unlock every visible locked skill whose prerequisites are now met
    pub fn unlock_available(&self) -> Self {
        let levels = self.skill_levels();
        let (next, changed) = self.with_each_skill(|skill| {
            let definition = skill.definition();
            if !skill.is_unlocked()
                && !definition.is_hidden()
                && definition.check_prerequisites(&levels)
            {
                skill.unlock()
            } else {
                skill.clone()
            }
        });
        if changed > 0 {
            tracing::info!("Unlocked {} skills", changed);
        }
        next
    }

    /// Add a skill for a new definition; a known id leaves the manager unchanged
    pub fn add_skill(&self, definition: SkillDefinition, now: Timestamp) -> Self {
        if self.definitions.contains_key(definition.id()) {
            return self.clone();
        }
        let mut next = self.clone();
        next.insert_definition(Arc::new(definition), now);
        next
    }

    /// Run rust over every skill
    pub fn process_decay(&self, now: Timestamp) -> Self {
        let (next, changed) = self.with_each_skill(|skill| skill.process_rust(now));
        if changed > 0 {
            tracing::info!("Rust advanced on {} skills", changed);
        }
        next
    }

    pub fn total_skill_level(&self) -> u32 {
        self.skills.values().map(Skill::level).sum()
    }

    /// Highest practice level; ties go to the first id in order
    pub fn highest_skill(&self) -> Option<&Skill> {
        self.skills.values().reduce(|best, skill| {
            if skill.level() > best.level() {
                skill
            } else {
                best
            }
        })
    }

    pub fn mastered_skill_count(&self) -> usize {
        self.skills.values().filter(|skill| skill.is_mastered()).count()
    }

    pub fn expert_skill_count(&self) -> usize {
        self.skills.values().filter(|skill| skill.is_expert()).count()
    }

    pub fn skills_by_category(&self, category: SkillCategory) -> Vec<&Skill> {
        self.skills
            .values()
            .filter(|skill| skill.definition().category() == category)
            .collect()
    }

    pub fn rusted_skills(&self) -> Vec<&Skill> {
        self.skills.values().filter(|skill| skill.is_rusted()).collect()
    }

    pub fn statistics(&self) -> SkillStatistics {
        let total_level = self.total_skill_level();
        SkillStatistics {
            total_skills: self.skills.len(),
            unlocked_skills: self.skills.values().filter(|s| s.is_unlocked()).count(),
            total_level,
            average_level: if self.skills.is_empty() {
                0.0
            } else {
                total_level as f64 / self.skills.len() as f64
            },
            expert_skills: self.expert_skill_count(),
            mastered_skills: self.mastered_skill_count(),
            rusted_skills: self.rusted_skills().len(),
            highest_skill: self.highest_skill().map(|skill| skill.id().clone()),
        }
    }

    pub fn to_record(&self) -> SkillManagerRecord {
        SkillManagerRecord {
            skills: self.skills.values().map(Skill::to_record).collect(),
            definitions: self
                .definitions
                .values()
                .map(|definition| definition.to_record())
                .collect(),
        }
    }

    /// Rebuild a manager from its record.
    ///
    /// Fails if any definition is invalid or any skill has no definition.
    pub fn from_record(record: SkillManagerRecord) -> SkillResult<Self> {
        let mut definitions = BTreeMap::new();
        for definition in record.definitions {
            let definition = SkillDefinition::from_record(definition)?;
            definitions.insert(definition.id().clone(), Arc::new(definition));
        }

        let mut skills = BTreeMap::new();
        for skill in record.skills {
            let Some(definition) = definitions.get(&skill.id) else {
                tracing::warn!("Skill record {} has no definition", skill.id);
                return Err(SkillError::UnknownSkill(skill.id));
            };
            let skill = Skill::from_record(skill, definition.clone());
            skills.insert(skill.id().clone(), skill);
        }

        Ok(Self {
            skills,
            definitions,
        })
    }

    pub fn to_json(&self) -> SkillResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_record())?)
    }

    pub fn from_json(json: &str) -> SkillResult<Self> {
        Self::from_record(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta};

    fn epoch() -> Timestamp {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    fn id(s: &str) -> SkillId {
        SkillId::from(s)
    }

    fn definitions() -> Vec<SkillDefinition> {
        vec![
            SkillDefinition::new("archery", "Archery", SkillCategory::Ranged).with_difficulty(1.5),
            SkillDefinition::new("cooking", "Cooking", SkillCategory::Crafting),
            SkillDefinition::new("bowyery", "Bowyery", SkillCategory::Crafting)
                .with_prerequisite("archery", 2),
            SkillDefinition::new("lore", "Forgotten Lore", SkillCategory::Academic).hidden(),
        ]
    }

    fn manager() -> SkillManager {
        SkillManager::new(definitions(), epoch())
    }

    #[test]
    fn test_new_locks_hidden_and_gated_skills() {
        let manager = manager();
        assert_eq!(manager.len(), 4);
        assert!(manager.get_skill(&id("archery")).unwrap().is_unlocked());
        assert!(manager.get_skill(&id("cooking")).unwrap().is_unlocked());
        assert!(!manager.get_skill(&id("bowyery")).unwrap().is_unlocked());
        assert!(!manager.get_skill(&id("lore")).unwrap().is_unlocked());
    }

    #[test]
    fn test_practice_skill_levels_up() {
        let manager = manager().practice_skill(&id("cooking"), 250, epoch());
        let cooking = manager.get_skill(&id("cooking")).unwrap();
        assert_eq!(cooking.level(), 2);
        assert_eq!(cooking.experience(), 50);
    }

    #[test]
    fn test_practice_skips_locked_and_absent() {
        let original = manager();
        assert_eq!(original.practice_skill(&id("bowyery"), 500, epoch()), original);
        assert_eq!(original.practice_skill(&id("swimming"), 500, epoch()), original);
    }

    #[test]
    fn test_practice_multiple_and_all() {
        let manager = manager().practice_multiple(
            &[(id("cooking"), 100), (id("archery"), 150), (id("lore"), 100)],
            epoch(),
        );
        assert_eq!(manager.level(&id("cooking")), 1);
        assert_eq!(manager.get_skill(&id("archery")).unwrap().experience(), 100);
        assert_eq!(manager.level(&id("lore")), 0);

        let manager = manager.practice_all(100, epoch());
        assert_eq!(manager.get_skill(&id("cooking")).unwrap().experience(), 90);
        assert_eq!(manager.level(&id("archery")), 1);
        assert_eq!(manager.get_skill(&id("bowyery")).unwrap().experience(), 0);
    }

    #[test]
    fn test_original_snapshot_is_untouched() {
        let original = manager();
        let practiced = original.practice_skill(&id("cooking"), 100, epoch());
        assert_eq!(original.level(&id("cooking")), 0);
        assert_eq!(practiced.level(&id("cooking")), 1);
    }

    #[test]
    fn test_set_levels_and_queries() {
        let manager = manager().set_multiple_skills(&[
            (id("archery"), 7),
            (id("cooking"), 10),
            (id("missing"), 3),
        ]);
        assert_eq!(manager.total_skill_level(), 17);
        assert_eq!(manager.highest_skill().unwrap().id(), &id("cooking"));
        assert_eq!(manager.mastered_skill_count(), 1);
        assert_eq!(manager.expert_skill_count(), 2);
        assert!(!manager.has_skill(&id("missing")));
    }

    #[test]
    fn test_highest_skill_ties_and_empty() {
        let manager = manager()
            .set_skill_level(&id("cooking"), 3)
            .set_skill_level(&id("archery"), 3);
        assert_eq!(manager.highest_skill().unwrap().id(), &id("archery"));
        assert!(SkillManager::default().highest_skill().is_none());
    }

    #[test]
    fn test_unlock_and_add_are_idempotent() {
        let manager = manager();
        assert_eq!(manager.unlock_skill(&id("cooking")), manager);

        let unlocked = manager.unlock_skill(&id("lore"));
        assert!(unlocked.get_skill(&id("lore")).unwrap().is_unlocked());

        let extra = SkillDefinition::new("cooking", "Cooking Again", SkillCategory::Crafting);
        assert_eq!(manager.add_skill(extra, epoch()), manager);

        let swimming = SkillDefinition::new("swimming", "Swimming", SkillCategory::Physical);
        let added = manager.add_skill(swimming, epoch());
        assert_eq!(added.len(), 5);
        assert!(added.get_skill(&id("swimming")).unwrap().is_unlocked());
    }

    #[test]
    fn test_unlock_available_checks_prerequisites() {
        let manager = manager().unlock_available();
        assert!(!manager.get_skill(&id("bowyery")).unwrap().is_unlocked());

        let manager = manager.set_skill_level(&id("archery"), 2).unlock_available();
        assert!(manager.get_skill(&id("bowyery")).unwrap().is_unlocked());
        assert!(!manager.get_skill(&id("lore")).unwrap().is_unlocked());
    }

    #[test]
    fn test_process_decay_replaces_changed_skills() {
        let manager = manager().set_skill_level(&id("cooking"), 5);
        let decayed = manager.process_decay(epoch() + TimeDelta::days(3));
        assert_eq!(decayed.get_skill(&id("cooking")).unwrap().rust_level(), 3);
        assert_eq!(decayed.effective_level(&id("cooking")), 2);
        assert_eq!(
            decayed.get_skill(&id("archery")),
            manager.get_skill(&id("archery"))
        );
        assert_eq!(decayed.rusted_skills().len(), 1);
    }

    #[test]
    fn test_read_book_updates_skill() {
        let book = BookManager::create_manual("stews", "Hearty Stews", "cooking", 0, 4);
        let (manager, outcome) = manager().read_book(&book, None, epoch()).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.experience_gained, 50);
        assert_eq!(manager.get_skill(&id("cooking")).unwrap().theory_experience(), 25);

        let orphan = BookManager::create_manual("swim", "Swimming", "swimming", 0, 4);
        assert!(manager.read_book(&orphan, None, epoch()).is_none());
    }

    #[test]
    fn test_study_and_convert_theory() {
        let manager = manager()
            .study_theory(&id("cooking"), 400, epoch())
            .convert_theory(epoch() + TimeDelta::hours(20));
        let cooking = manager.get_skill(&id("cooking")).unwrap();
        assert_eq!(cooking.experience(), 10);
        assert_eq!(cooking.theory_experience(), 90);
        assert_eq!(cooking.theory_level(), 0);
    }

    #[test]
    fn test_statistics() {
        let stats = manager()
            .set_skill_level(&id("archery"), 8)
            .set_skill_level(&id("cooking"), 4)
            .statistics();
        assert_eq!(stats.total_skills, 4);
        assert_eq!(stats.unlocked_skills, 2);
        assert_eq!(stats.total_level, 12);
        assert_eq!(stats.average_level, 3.0);
        assert_eq!(stats.expert_skills, 1);
        assert_eq!(stats.highest_skill, Some(id("archery")));
    }

    #[test]
    fn test_json_round_trip() {
        let manager = manager()
            .practice_skill(&id("cooking"), 150, epoch())
            .study_theory(&id("archery"), 80, epoch())
            .set_skill_level(&id("archery"), 3)
            .process_decay(epoch() + TimeDelta::days(1));
        let restored = SkillManager::from_json(&manager.to_json().unwrap()).unwrap();
        assert_eq!(restored, manager);
    }

    #[test]
    fn test_from_record_rejects_unknown_skill() {
        let mut record = manager().to_record();
        record.definitions.retain(|definition| definition.id != id("cooking"));
        let err = SkillManager::from_record(record).unwrap_err();
        assert!(matches!(err, SkillError::UnknownSkill(ref skill) if skill == &id("cooking")));
    }
}

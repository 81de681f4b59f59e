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

use crate::skill::{SkillDefinition, floor_to_u32};
use chrono::{DateTime, Utc};
use skillforge_common::{PracticeRecord, RustRecord, SkillId, SkillRecord, TheoryRecord};
use std::sync::Arc;

/// Point in simulation time. Callers always supply it; the engine never reads the clock.
pub type Timestamp = DateTime<Utc>;

/// Highest reachable theory level
pub const MAX_THEORY_LEVEL: u32 = 10;

/// How far practice may run ahead of theory through conversion
pub const THEORY_PRACTICE_ALLOWANCE: u32 = 2;

/// Safety bound on level-ups applied by a single [`Skill::auto_level_up`]
pub const MAX_AUTO_LEVEL_UPS: u32 = 100;

/// Study yields half of the offered experience.
const THEORY_STUDY_RATE: f64 = 0.5;

/// Theory experience converted per hour at difficulty 1.0
const THEORY_CONVERSION_RATE: f64 = 0.5;

/// Practice experience that scrubs off one level of rust
const RUST_RECOVERY_EXPERIENCE: u32 = 100;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Names for levels 0 through 10
const LEVEL_NAMES: [&str; 11] = [
    "Untrained",
    "Apprentice",
    "Novice",
    "Initiate",
    "Adept",
    "Journeyman",
    "Master",
    "Expert",
    "Paragon",
    "Mythical",
    "Legendary",
];

fn elapsed_hours(since: Timestamp, now: Timestamp) -> f64 {
    (now - since).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

fn elapsed_days(since: Timestamp, now: Timestamp) -> f64 {
    (now - since).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Hands-on practice track
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeState {
    pub count: u32,
    pub last_practiced: Timestamp,
    pub is_decaying: bool,
}

/// Book study track
#[derive(Debug, Clone, PartialEq)]
pub struct TheoryState {
    pub theory_level: u32,
    pub theory_experience: u32,
    pub last_studied: Timestamp,
}

/// Disuse decay track
#[derive(Debug, Clone, PartialEq)]
pub struct RustState {
    pub is_rusted: bool,
    pub rust_level: u32,
    pub last_check_time: Timestamp,
    pub rust_resist: f64,
}

/// One character's progress in one skill.
///
/// A `Skill` is an immutable snapshot. Every transition returns a new snapshot and leaves the
/// receiver untouched; transitions that do not apply hand back an equal snapshot rather than
/// an error.
///
/// ## Tracks
/// * **Practice**: `level` and `experience`, earned by doing.
/// * **Theory**: `theory_level` and `theory_experience`, earned by study and slowly converted
///   into practice experience. Practice can never be converted past `theory_level + 2`.
/// * **Rust**: `rust_level` accumulates while a skill sits unused and is subtracted from the
///   practice level to give the effective level. Practice scrubs it back off.
///
/// ## Invariants
/// * `rust_level <= level`
/// * `theory_level <= 10`
/// * `0.0 <= rust_resist <= 1.0`
/// * `is_rusted == (rust_level > 0)`
#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    definition: Arc<SkillDefinition>,
    level: u32,
    experience: u32,
    practice: PracticeState,
    theory: TheoryState,
    rust: RustState,
    is_unlocked: bool,
}

impl Skill {
    /// Create an unlocked, untrained skill
    pub fn create(definition: Arc<SkillDefinition>, now: Timestamp) -> Self {
        let rust_resist = definition.default_rust_resist();
        Self {
            definition,
            level: 0,
            experience: 0,
            practice: PracticeState {
                count: 0,
                last_practiced: now,
                is_decaying: false,
            },
            theory: TheoryState {
                theory_level: 0,
                theory_experience: 0,
                last_studied: now,
            },
            rust: RustState {
                is_rusted: false,
                rust_level: 0,
                last_check_time: now,
                rust_resist,
            },
            is_unlocked: true,
        }
    }

    /// Create a locked, untrained skill
    pub fn locked(definition: Arc<SkillDefinition>, now: Timestamp) -> Self {
        Self {
            is_unlocked: false,
            ..Self::create(definition, now)
        }
    }

    pub fn id(&self) -> &SkillId {
        self.definition.id()
    }

    pub fn definition(&self) -> &Arc<SkillDefinition> {
        &self.definition
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn practice(&self) -> &PracticeState {
        &self.practice
    }

    pub fn theory(&self) -> &TheoryState {
        &self.theory
    }

    pub fn rust(&self) -> &RustState {
        &self.rust
    }

    pub fn is_unlocked(&self) -> bool {
        self.is_unlocked
    }

    pub fn theory_level(&self) -> u32 {
        self.theory.theory_level
    }

    pub fn theory_experience(&self) -> u32 {
        self.theory.theory_experience
    }

    pub fn rust_level(&self) -> u32 {
        self.rust.rust_level
    }

    pub fn is_rusted(&self) -> bool {
        self.rust.is_rusted
    }

    /// Practice level with rust taken off
    pub fn effective_level(&self) -> u32 {
        self.level.saturating_sub(self.rust.rust_level)
    }

    /// Experience needed to leave the current level
    pub fn experience_required(&self) -> u32 {
        self.definition.experience_for_level(self.level)
    }

    pub fn experience_to_level_up(&self) -> u32 {
        self.experience_required().saturating_sub(self.experience)
    }

    pub fn can_level_up(&self) -> bool {
        self.experience_to_level_up() == 0
    }

    /// Progress through the current level as a whole percentage
    pub fn progress_percent(&self) -> u32 {
        let required = self.experience_required();
        if required == 0 {
            100
        } else {
            ((self.experience as u64 * 100) / required as u64).min(100) as u32
        }
    }

    /// Highest practice level theory conversion may reach
    pub fn max_practice_level(&self) -> u32 {
        self.theory.theory_level + THEORY_PRACTICE_ALLOWANCE
    }

    pub fn is_novice(&self) -> bool {
        self.level <= 2
    }

    pub fn is_proficient(&self) -> bool {
        self.level >= 4
    }

    pub fn is_expert(&self) -> bool {
        self.level >= 7
    }

    pub fn is_mastered(&self) -> bool {
        self.level >= 10
    }

    /// Name of the current rung on the Untrained..Legendary ladder
    pub fn level_description(&self) -> &'static str {
        LEVEL_NAMES[self.level.min(10) as usize]
    }

    /// Practice the skill.
    ///
    /// Yield is scaled by the definition multiplier at the effective level, so a rusty skill
    /// learns like a lower-level one. Every started 100 experience gained removes one rust
    /// level, and the rust clock restarts from `now`. Level-ups are left to
    /// [`Skill::auto_level_up`].
    pub fn practice_skill(&self, base_experience: u32, now: Timestamp) -> Self {
        if !self.is_unlocked {
            return self.clone();
        }
        let multiplier = self.definition.experience_multiplier(self.effective_level());
        let gained = floor_to_u32(base_experience as f64 * multiplier);
        if gained == 0 {
            return self.clone();
        }

        let recovered = self
            .rust
            .rust_level
            .min(gained.div_ceil(RUST_RECOVERY_EXPERIENCE));
        let rust_level = self.rust.rust_level - recovered;

        Self {
            experience: self.experience.saturating_add(gained),
            practice: PracticeState {
                count: self.practice.count.saturating_add(1),
                last_practiced: now,
                is_decaying: false,
            },
            rust: RustState {
                is_rusted: rust_level > 0,
                rust_level,
                last_check_time: now,
                rust_resist: self.rust.rust_resist,
            },
            ..self.clone()
        }
    }

    /// Study the skill from a book or a mentor.
    ///
    /// Half of the offered experience lands in the theory pool. Crossing the requirement for
    /// the next theory level advances one theory level and rolls the excess over. At
    /// [`MAX_THEORY_LEVEL`] experience keeps accumulating without rollover.
    pub fn study_theory(&self, base_experience: u32, now: Timestamp) -> Self {
        if !self.is_unlocked {
            return self.clone();
        }
        let gained = floor_to_u32(base_experience as f64 * THEORY_STUDY_RATE);
        if gained == 0 {
            return self.clone();
        }

        let mut theory_level = self.theory.theory_level;
        let mut theory_experience = self.theory.theory_experience.saturating_add(gained);
        let required = self.definition.experience_for_level(theory_level + 1);
        if theory_level < MAX_THEORY_LEVEL && theory_experience >= required {
            theory_level += 1;
            theory_experience -= required;
            tracing::debug!(
                "Skill {} theory advanced to level {}",
                self.id(),
                theory_level
            );
        }

        Self {
            theory: TheoryState {
                theory_level,
                theory_experience,
                last_studied: now,
            },
            ..self.clone()
        }
    }

    /// Convert accumulated theory into practice experience.
    ///
    /// Runs at most once per hour of elapsed time since the theory clock was last stamped and
    /// converts `0.5 / difficulty` experience per hour. Conversion never carries practice past
    /// [`Skill::max_practice_level`]; only the experience that fits under that ceiling leaves
    /// the theory pool. A theory pool drained below the requirement of its level loses that
    /// level.
    pub fn convert_theory_to_practice(&self, now: Timestamp) -> Self {
        if !self.is_unlocked || self.theory.theory_experience == 0 {
            return self.clone();
        }
        let ceiling = self.max_practice_level();
        if self.level >= ceiling {
            return self.clone();
        }
        let hours = elapsed_hours(self.theory.last_studied, now);
        if hours < 1.0 {
            return self.clone();
        }

        let rate = THEORY_CONVERSION_RATE / self.definition.difficulty_multiplier();
        let headroom = (self.level..ceiling)
            .map(|level| self.definition.experience_for_level(level) as u64)
            .sum::<u64>()
            .saturating_sub(self.experience as u64);
        let to_convert = floor_to_u32(hours * rate)
            .min(self.theory.theory_experience)
            .min(u32::try_from(headroom).unwrap_or(u32::MAX));
        if to_convert == 0 {
            return self.clone();
        }

        let mut level = self.level;
        let mut experience = self.experience + to_convert;
        while level < ceiling {
            let required = self.definition.experience_for_level(level);
            if experience < required {
                break;
            }
            experience -= required;
            level += 1;
        }

        let theory_experience = self.theory.theory_experience - to_convert;
        let mut theory_level = self.theory.theory_level;
        if theory_level > 0 && theory_experience < self.definition.experience_for_level(theory_level)
        {
            theory_level -= 1;
            tracing::debug!(
                "Skill {} theory reserve drained, theory level dropped to {}",
                self.id(),
                theory_level
            );
        }
        if level > self.level {
            tracing::debug!(
                "Skill {} reached level {} through theory conversion",
                self.id(),
                level
            );
        }

        Self {
            level,
            experience,
            theory: TheoryState {
                theory_level,
                theory_experience,
                last_studied: now,
            },
            ..self.clone()
        }
    }

    /// Advance a single level if enough experience has been banked, carrying the overflow
    pub fn try_level_up(&self) -> Option<Self> {
        let required = self.experience_required();
        if self.experience < required {
            return None;
        }
        Some(Self {
            level: self.level + 1,
            experience: self.experience - required,
            ..self.clone()
        })
    }

    /// Apply every pending level-up, bounded by [`MAX_AUTO_LEVEL_UPS`]
    pub fn auto_level_up(&self) -> Self {
        let mut current = self.clone();
        for _ in 0..MAX_AUTO_LEVEL_UPS {
            match current.try_level_up() {
                Some(next) => current = next,
                None => break,
            }
        }
        if current.level > self.level {
            tracing::debug!("Skill {} leveled up to {}", self.id(), current.level);
        }
        current
    }

    /// Accumulate rust for the days elapsed since the last rust check.
    ///
    /// ## Equation
    /// R' = min(L, R + floor(days * rate * (1 - resist)))
    pub fn process_rust(&self, now: Timestamp) -> Self {
        if !self.is_unlocked || self.level == 0 {
            return self.clone();
        }
        let days = elapsed_days(self.rust.last_check_time, now);
        if days < 1.0 {
            return self.clone();
        }

        let effective_rate = self.definition.rust_rate() * (1.0 - self.rust.rust_resist);
        let rust_to_add = floor_to_u32(days * effective_rate);
        let rust_level = self
            .level
            .min(self.rust.rust_level.saturating_add(rust_to_add));
        if rust_level == self.rust.rust_level {
            return self.clone();
        }

        Self {
            practice: PracticeState {
                is_decaying: true,
                ..self.practice.clone()
            },
            rust: RustState {
                is_rusted: rust_level > 0,
                rust_level,
                last_check_time: now,
                rust_resist: self.rust.rust_resist,
            },
            ..self.clone()
        }
    }

    /// Replace the practice level; rust is trimmed so it never exceeds the new level
    pub fn set_level(&self, level: u32) -> Self {
        let rust_level = self.rust.rust_level.min(level);
        Self {
            level,
            rust: RustState {
                is_rusted: rust_level > 0,
                rust_level,
                ..self.rust.clone()
            },
            ..self.clone()
        }
    }

    pub fn set_experience(&self, experience: u32) -> Self {
        Self {
            experience,
            ..self.clone()
        }
    }

    pub fn add_experience(&self, amount: u32) -> Self {
        self.set_experience(self.experience.saturating_add(amount))
    }

    /// Replace the theory level, clamped to [`MAX_THEORY_LEVEL`]
    pub fn set_theory_level(&self, theory_level: u32) -> Self {
        Self {
            theory: TheoryState {
                theory_level: theory_level.min(MAX_THEORY_LEVEL),
                ..self.theory.clone()
            },
            ..self.clone()
        }
    }

    /// Replace the rust resist, clamped to `0.0..=1.0`
    pub fn with_rust_resist(&self, rust_resist: f64) -> Self {
        Self {
            rust: RustState {
                rust_resist: rust_resist.clamp(0.0, 1.0),
                ..self.rust.clone()
            },
            ..self.clone()
        }
    }

    pub fn unlock(&self) -> Self {
        if self.is_unlocked {
            return self.clone();
        }
        Self {
            is_unlocked: true,
            ..self.clone()
        }
    }

    pub fn to_record(&self) -> SkillRecord {
        SkillRecord {
            id: self.id().clone(),
            level: self.level,
            experience: self.experience,
            is_unlocked: self.is_unlocked,
            practice: PracticeRecord {
                practice_count: self.practice.count,
                last_practiced: self.practice.last_practiced,
                is_decaying: self.practice.is_decaying,
            },
            theory: Some(TheoryRecord {
                theory_level: self.theory.theory_level,
                theory_experience: self.theory.theory_experience,
                last_studied: self.theory.last_studied,
            }),
            rust: Some(RustRecord {
                is_rusted: self.rust.is_rusted,
                rust_level: self.rust.rust_level,
                last_check_time: self.rust.last_check_time,
                rust_resist: self.rust.rust_resist,
            }),
        }
    }

    /// Rebuild a skill from its record.
    ///
    /// Missing theory and rust blocks start fresh from the last practice time. Out of range
    /// values are clamped back inside the skill invariants.
    pub fn from_record(record: SkillRecord, definition: Arc<SkillDefinition>) -> Self {
        let stamp = record.practice.last_practiced;
        let theory = record
            .theory
            .unwrap_or_else(|| TheoryRecord::starting_at(stamp));
        let rust = record
            .rust
            .unwrap_or_else(|| RustRecord::starting_at(stamp, definition.default_rust_resist()));
        let rust_level = rust.rust_level.min(record.level);
        let rust_resist = if rust.rust_resist.is_finite() {
            rust.rust_resist.clamp(0.0, 1.0)
        } else {
            definition.default_rust_resist()
        };

        Self {
            definition,
            level: record.level,
            experience: record.experience,
            practice: PracticeState {
                count: record.practice.practice_count,
                last_practiced: record.practice.last_practiced,
                is_decaying: record.practice.is_decaying,
            },
            theory: TheoryState {
                theory_level: theory.theory_level.min(MAX_THEORY_LEVEL),
                theory_experience: theory.theory_experience,
                last_studied: theory.last_studied,
            },
            rust: RustState {
                is_rusted: rust_level > 0,
                rust_level,
                last_check_time: rust.last_check_time,
                rust_resist,
            },
            is_unlocked: record.is_unlocked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;
    use skillforge_common::SkillCategory;

    fn epoch() -> Timestamp {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    fn definition(difficulty: f64) -> Arc<SkillDefinition> {
        Arc::new(
            SkillDefinition::new("carpentry", "Carpentry", SkillCategory::Crafting)
                .with_difficulty(difficulty),
        )
    }

    fn skill() -> Skill {
        Skill::create(definition(1.0), epoch())
    }

    fn with_theory(skill: &Skill, theory_level: u32, theory_experience: u32) -> Skill {
        let mut record = skill.to_record();
        record.theory = Some(TheoryRecord {
            theory_level,
            theory_experience,
            last_studied: epoch(),
        });
        Skill::from_record(record, skill.definition().clone())
    }

    #[test]
    fn test_create_and_locked() {
        let open = skill();
        assert!(open.is_unlocked());
        assert_eq!(open.level(), 0);
        assert_eq!(open.experience(), 0);

        let closed = Skill::locked(definition(1.0), epoch());
        assert!(!closed.is_unlocked());
        assert_eq!(closed.practice_skill(50, epoch()), closed);
        assert_eq!(closed.study_theory(50, epoch()), closed);
    }

    #[test]
    fn test_ten_practices_reach_level_one() {
        let mut current = skill();
        for _ in 0..10 {
            current = current.practice_skill(10, epoch());
        }
        assert_eq!(current.experience(), 100);
        assert_eq!(current.level(), 0);
        assert_eq!(current.practice().count, 10);

        let leveled = current.auto_level_up();
        assert_eq!(leveled.level(), 1);
        assert_eq!(leveled.experience(), 0);
    }

    #[test]
    fn test_practice_yield_drops_with_level() {
        let novice = skill().practice_skill(100, epoch());
        assert_eq!(novice.experience(), 100);

        let adept = skill().set_level(5).practice_skill(100, epoch());
        assert_eq!(adept.experience(), 50);
    }

    #[test]
    fn test_practice_with_zero_yield_is_noop() {
        let original = skill();
        assert_eq!(original.practice_skill(0, epoch() + TimeDelta::hours(1)), original);
    }

    #[test]
    fn test_practice_scrubs_rust() {
        let rusty = skill()
            .set_level(5)
            .process_rust(epoch() + TimeDelta::days(3));
        assert_eq!(rusty.rust_level(), 3);
        assert!(rusty.is_rusted());
        assert_eq!(rusty.effective_level(), 2);

        // Effective level 2 yields 0.8, so 150 base gives 120 experience and removes 2 rust.
        let practiced = rusty.practice_skill(150, epoch() + TimeDelta::days(3));
        assert_eq!(practiced.experience(), 120);
        assert_eq!(practiced.rust_level(), 1);
        assert!(practiced.is_rusted());
        assert!(!practiced.practice().is_decaying);

        let clean = practiced.practice_skill(500, epoch() + TimeDelta::days(3));
        assert_eq!(clean.rust_level(), 0);
        assert!(!clean.is_rusted());
    }

    #[test]
    fn test_practice_restarts_rust_clock() {
        // Rust capped at the level leaves the clock behind; practice must catch it up.
        let capped = skill()
            .set_level(2)
            .process_rust(epoch() + TimeDelta::days(2))
            .process_rust(epoch() + TimeDelta::days(60));
        assert_eq!(capped.rust_level(), 2);
        assert_eq!(capped.rust().last_check_time, epoch() + TimeDelta::days(2));

        let scrubbed = capped.practice_skill(500, epoch() + TimeDelta::days(60));
        assert_eq!(scrubbed.rust_level(), 0);
        assert_eq!(scrubbed.rust().last_check_time, epoch() + TimeDelta::days(60));

        let next_day = scrubbed.process_rust(epoch() + TimeDelta::days(61));
        assert_eq!(next_day.rust_level(), 1);
    }

    #[test]
    fn test_try_level_up_is_single_step() {
        let banked = skill().set_experience(250);
        let once = banked.try_level_up().unwrap();
        assert_eq!(once.level(), 1);
        assert_eq!(once.experience(), 150);
        assert!(skill().try_level_up().is_none());

        let all = banked.auto_level_up();
        assert_eq!(all.level(), 2);
        assert_eq!(all.experience(), 50);
    }

    #[test]
    fn test_auto_level_up_is_bounded() {
        let banked = skill().set_experience(1_000_000);
        let leveled = banked.auto_level_up();
        assert_eq!(leveled.level(), MAX_AUTO_LEVEL_UPS);
        assert_eq!(leveled.experience(), 1_000_000 - 100 * MAX_AUTO_LEVEL_UPS);
    }

    #[test]
    fn test_study_theory_levels_and_rolls_over() {
        let studied = skill().study_theory(150, epoch());
        assert_eq!(studied.theory_level(), 0);
        assert_eq!(studied.theory_experience(), 75);

        let studied = studied.study_theory(60, epoch());
        assert_eq!(studied.theory_level(), 1);
        assert_eq!(studied.theory_experience(), 5);

        assert_eq!(skill().study_theory(1, epoch()), skill());
    }

    #[test]
    fn test_study_theory_caps_at_ten() {
        let capped = with_theory(&skill(), MAX_THEORY_LEVEL, 90).study_theory(100, epoch());
        assert_eq!(capped.theory_level(), MAX_THEORY_LEVEL);
        assert_eq!(capped.theory_experience(), 140);
    }

    #[test]
    fn test_conversion_requires_an_hour() {
        let studied = with_theory(&skill(), 1, 500);
        let early = studied.convert_theory_to_practice(epoch() + TimeDelta::minutes(59));
        assert_eq!(early, studied);
    }

    #[test]
    fn test_conversion_moves_experience() {
        let studied = with_theory(&skill(), 1, 500);
        let converted = studied.convert_theory_to_practice(epoch() + TimeDelta::hours(40));
        assert_eq!(converted.experience(), 20);
        assert_eq!(converted.theory_experience(), 480);
        assert_eq!(converted.theory_level(), 1);
        assert_eq!(converted.theory().last_studied, epoch() + TimeDelta::hours(40));
    }

    #[test]
    fn test_conversion_respects_theory_ceiling() {
        let studied = with_theory(&skill(), 0, 100_000);
        let converted = studied.convert_theory_to_practice(epoch() + TimeDelta::days(10_000));
        assert_eq!(converted.level(), 2);
        assert_eq!(converted.experience(), 0);
        assert_eq!(converted.theory_experience(), 100_000 - 200);

        let again = converted.convert_theory_to_practice(epoch() + TimeDelta::days(20_000));
        assert_eq!(again, converted);
    }

    #[test]
    fn test_conversion_drains_theory_level() {
        let studied = with_theory(&skill(), 2, 110);
        let converted = studied.convert_theory_to_practice(epoch() + TimeDelta::hours(40));
        assert_eq!(converted.theory_experience(), 90);
        assert_eq!(converted.theory_level(), 1);
    }

    #[test]
    fn test_conversion_scales_with_difficulty() {
        let hard = Skill::create(definition(2.0), epoch());
        let studied = with_theory(&hard, 1, 500);
        let converted = studied.convert_theory_to_practice(epoch() + TimeDelta::hours(40));
        assert_eq!(converted.experience(), 10);
    }

    #[test]
    fn test_rust_after_eighty_days() {
        let trained = skill().set_level(5);
        let rusted = trained.process_rust(epoch() + TimeDelta::days(80));
        assert!(rusted.rust_level() > 0);
        assert!(rusted.is_rusted());
        assert!(rusted.effective_level() < 5);
        assert_eq!(rusted.rust_level(), 5);
        assert!(rusted.practice().is_decaying);
    }

    #[test]
    fn test_rust_gates_and_noops() {
        let trained = skill().set_level(3);
        assert_eq!(trained.process_rust(epoch() + TimeDelta::hours(23)), trained);
        assert_eq!(skill().process_rust(epoch() + TimeDelta::days(30)), skill());

        let locked = Skill::locked(definition(1.0), epoch()).set_level(4);
        assert_eq!(locked.process_rust(epoch() + TimeDelta::days(30)), locked);
    }

    #[test]
    fn test_rust_resist_slows_decay() {
        let resistant = skill().set_level(8).with_rust_resist(0.5);
        let rusted = resistant.process_rust(epoch() + TimeDelta::days(5));
        assert_eq!(rusted.rust_level(), 2);

        let immune = skill().set_level(8).with_rust_resist(1.0);
        assert_eq!(immune.process_rust(epoch() + TimeDelta::days(50)), immune);
    }

    #[test]
    fn test_set_level_trims_rust() {
        let rusted = skill()
            .set_level(6)
            .process_rust(epoch() + TimeDelta::days(4));
        assert_eq!(rusted.rust_level(), 4);
        let lowered = rusted.set_level(2);
        assert_eq!(lowered.rust_level(), 2);
        assert_eq!(lowered.effective_level(), 0);
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let open = skill();
        assert_eq!(open.unlock(), open);

        let closed = Skill::locked(definition(1.0), epoch());
        let opened = closed.unlock();
        assert!(opened.is_unlocked());
        assert_eq!(opened.unlock(), opened);
    }

    #[test]
    fn test_tiers_and_descriptions() {
        assert!(skill().is_novice());
        assert_eq!(skill().level_description(), "Untrained");
        let adept = skill().set_level(4);
        assert!(adept.is_proficient());
        assert!(!adept.is_expert());
        assert_eq!(adept.level_description(), "Adept");
        let expert = skill().set_level(7);
        assert!(expert.is_expert());
        assert_eq!(expert.level_description(), "Expert");
        let legend = skill().set_level(14);
        assert!(legend.is_mastered());
        assert_eq!(legend.level_description(), "Legendary");
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(skill().progress_percent(), 0);
        assert_eq!(skill().set_experience(45).progress_percent(), 45);
        assert_eq!(skill().set_experience(450).progress_percent(), 100);
    }

    #[test]
    fn test_record_round_trip() {
        let skill = skill()
            .set_level(4)
            .study_theory(300, epoch())
            .process_rust(epoch() + TimeDelta::days(2));
        let restored = Skill::from_record(skill.to_record(), skill.definition().clone());
        assert_eq!(restored, skill);
    }

    #[test]
    fn test_from_record_clamps_invariants() {
        let mut record = skill().to_record();
        record.level = 2;
        record.rust = Some(RustRecord {
            is_rusted: false,
            rust_level: 9,
            last_check_time: epoch(),
            rust_resist: 3.0,
        });
        record.theory = Some(TheoryRecord {
            theory_level: 40,
            theory_experience: 0,
            last_studied: epoch(),
        });
        let restored = Skill::from_record(record, definition(1.0));
        assert_eq!(restored.rust_level(), 2);
        assert!(restored.is_rusted());
        assert_eq!(restored.rust().rust_resist, 1.0);
        assert_eq!(restored.theory_level(), MAX_THEORY_LEVEL);
    }

    #[derive(Debug, Clone)]
    enum Step {
        Practice(u32, i64),
        Rust(i64),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            (0u32..500, 0i64..48).prop_map(|(xp, hours)| Step::Practice(xp, hours)),
            (0i64..20).prop_map(Step::Rust),
        ]
    }

    proptest! {
        #[test]
        fn test_rust_never_exceeds_level(steps in proptest::collection::vec(step(), 0..40)) {
            let mut now = epoch();
            let mut current = skill();
            for step in steps {
                current = match step {
                    Step::Practice(xp, hours) => {
                        now += TimeDelta::hours(hours);
                        current.practice_skill(xp, now).auto_level_up()
                    }
                    Step::Rust(days) => {
                        now += TimeDelta::days(days);
                        current.process_rust(now)
                    }
                };
                prop_assert!(current.rust_level() <= current.level());
                prop_assert_eq!(current.is_rusted(), current.rust_level() > 0);
            }
        }

        #[test]
        fn test_level_up_matches_remaining_experience(level in 0u32..50, experience in 0u32..1000) {
            let current = skill().set_level(level).set_experience(experience);
            let required = current.definition().experience_for_level(level);
            prop_assert_eq!(current.experience_to_level_up(), required.saturating_sub(experience));
            prop_assert_eq!(current.can_level_up(), current.experience_to_level_up() == 0);
        }
    }
}

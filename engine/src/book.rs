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

//! # Books
//!
//! [`BookManager`] decides whether a reader may study a book, how long it takes and how much
//! theory experience it yields.
//!
//! ## Reading Time
//! T = max(1000ms, T_base * (1 - 0.05 * (L - L_req)) * (1 - max(0, 0.03 * (INT - 8))))
//!
//! ## Experience
//! E = max(1, floor(E_base * (1 - 0.5 * P) * (1 + 0.05 * (L - L_req))))
//!
//! P = (L - L_req) / (L_max - L_req)
//!
//! A book teaches less the closer the reader gets to its ceiling.

use crate::skill::{Skill, Timestamp, floor_to_u32};
use skillforge_common::{BookData, BookType, SkillId};
use std::time::Duration;
use thiserror::Error;

/// Shortest reading session any book can take
pub const MIN_READING_TIME: Duration = Duration::from_millis(1000);

const LEVEL_BONUS_PER_LEVEL: f64 = 0.05;
const INTELLIGENCE_BASELINE: f64 = 8.0;
const INTELLIGENCE_BONUS_PER_POINT: f64 = 0.03;
const LEVEL_PENALTY_WEIGHT: f64 = 0.5;

const MINUTE_MS: u64 = 60_000;

/// Why a reader cannot study a book
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadingRejection {
    #[error("Skill level too low: requires {required}, current {current}")]
    LevelTooLow { required: u32, current: u32 },

    #[error("Skill level too high: teaches below level {max}, current {current}")]
    LevelTooHigh { max: u32, current: u32 },

    #[error("Intelligence too low: requires {required}, current {current}")]
    IntelligenceTooLow { required: u32, current: u32 },

    #[error("Book {book} trains {expected}, not {actual}")]
    WrongSkill {
        book: String,
        expected: SkillId,
        actual: SkillId,
    },

    #[error("Skill {0} is locked")]
    SkillLocked(SkillId),
}

/// Result of a reading eligibility check
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingCheck {
    pub can_read: bool,
    pub reason: Option<ReadingRejection>,
    pub reading_time: Duration,
    pub experience_multiplier: f64,
}

impl ReadingCheck {
    fn rejected(reason: ReadingRejection) -> Self {
        Self {
            can_read: false,
            reason: Some(reason),
            reading_time: Duration::ZERO,
            experience_multiplier: 0.0,
        }
    }
}

/// Result of reading a book
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingOutcome {
    pub success: bool,
    pub reason: Option<ReadingRejection>,
    /// Book experience offered to theory study; study itself keeps half of it
    pub experience_gained: u32,
    pub reading_time: Duration,
    pub message: String,
    /// The reader's skill after study, or the unchanged skill on failure
    pub skill: Skill,
}

/// Stateless reading calculator.
pub struct BookManager;

impl BookManager {
    /// Decide whether a reader at `current_level` may study `book`.
    ///
    /// Intelligence only takes part when both the book requirement and the reader's
    /// intelligence are known.
    pub fn check_reading_conditions(
        book: &BookData,
        current_level: u32,
        intelligence: Option<u32>,
    ) -> ReadingCheck {
        if current_level < book.required_level {
            return ReadingCheck::rejected(ReadingRejection::LevelTooLow {
                required: book.required_level,
                current: current_level,
            });
        }
        if current_level >= book.max_level {
            return ReadingCheck::rejected(ReadingRejection::LevelTooHigh {
                max: book.max_level,
                current: current_level,
            });
        }
        if let (Some(required), Some(current)) = (book.int_required, intelligence) {
            if current < required {
                return ReadingCheck::rejected(ReadingRejection::IntelligenceTooLow {
                    required,
                    current,
                });
            }
        }

        let level_bonus = (current_level - book.required_level) as f64 * LEVEL_BONUS_PER_LEVEL;
        let intelligence_bonus = intelligence
            .map(|int| ((int as f64 - INTELLIGENCE_BASELINE) * INTELLIGENCE_BONUS_PER_POINT).max(0.0))
            .unwrap_or(0.0);
        let millis = book.base_reading_time as f64
            * (1.0 - level_bonus).max(0.0)
            * (1.0 - intelligence_bonus).max(0.0);
        let reading_time = Duration::from_millis(millis.floor() as u64).max(MIN_READING_TIME);

        ReadingCheck {
            can_read: true,
            reason: None,
            reading_time,
            experience_multiplier: 1.0 + level_bonus,
        }
    }

    /// Theory experience a reader at `skill_level` draws from `book`, never less than 1
    pub fn calculate_book_experience(book: &BookData, skill_level: u32, check: &ReadingCheck) -> u32 {
        let span = book.level_span();
        let level_penalty = if span == 0 {
            0.0
        } else {
            skill_level.saturating_sub(book.required_level) as f64 / span as f64
        };
        let experience = book.theory_experience as f64
            * (1.0 - level_penalty * LEVEL_PENALTY_WEIGHT)
            * check.experience_multiplier;
        floor_to_u32(experience).max(1)
    }

    /// Read `book` with `skill` and study what it teaches.
    ///
    /// The outcome carries the studied skill so callers never have to repeat the study.
    pub fn read_book(
        book: &BookData,
        skill: &Skill,
        intelligence: Option<u32>,
        now: Timestamp,
    ) -> ReadingOutcome {
        let failure = |reason: ReadingRejection| {
            tracing::debug!("Cannot read {}: {}", book.name, reason);
            ReadingOutcome {
                success: false,
                message: format!("Cannot read {}: {}", book.name, reason),
                reason: Some(reason),
                experience_gained: 0,
                reading_time: Duration::ZERO,
                skill: skill.clone(),
            }
        };

        if &book.skill_id != skill.id() {
            return failure(ReadingRejection::WrongSkill {
                book: book.id.clone(),
                expected: book.skill_id.clone(),
                actual: skill.id().clone(),
            });
        }
        if !skill.is_unlocked() {
            return failure(ReadingRejection::SkillLocked(skill.id().clone()));
        }

        let check = Self::check_reading_conditions(book, skill.level(), intelligence);
        if let Some(reason) = check.reason.clone() {
            return failure(reason);
        }

        let experience = Self::calculate_book_experience(book, skill.level(), &check);
        let studied = skill.study_theory(experience, now);
        let minutes = (check.reading_time.as_millis() as u64).div_ceil(MINUTE_MS);
        tracing::debug!(
            "Read {} for {} theory experience in {}",
            book.name,
            experience,
            skill.id()
        );

        ReadingOutcome {
            success: true,
            reason: None,
            experience_gained: experience,
            reading_time: check.reading_time,
            message: format!(
                "Finished reading {} in {} minutes and gained {} {} experience",
                book.name,
                minutes,
                experience,
                skill.definition().name()
            ),
            skill: studied,
        }
    }

    /// How far through the book's training range a reader is, as a whole percentage
    pub fn reading_progress(book: &BookData, current_level: u32) -> u32 {
        if current_level < book.required_level {
            return 0;
        }
        if current_level >= book.max_level {
            return 100;
        }
        let progress = (current_level - book.required_level) as u64 * 100;
        (progress / book.level_span() as u64) as u32
    }

    /// Short practical guide: quick to read, modest yield, no intelligence requirement
    pub fn create_manual(
        id: impl Into<String>,
        name: impl Into<String>,
        skill_id: impl Into<SkillId>,
        required_level: u32,
        max_level: u32,
    ) -> BookData {
        BookData {
            id: id.into(),
            name: name.into(),
            book_type: BookType::Manual,
            skill_id: skill_id.into(),
            required_level,
            max_level,
            base_reading_time: 30 * MINUTE_MS,
            theory_experience: 50,
            fun: Some(0),
            int_required: None,
            description: None,
        }
    }

    /// Dense study text: slow, rich yield, needs an able reader
    pub fn create_textbook(
        id: impl Into<String>,
        name: impl Into<String>,
        skill_id: impl Into<SkillId>,
        required_level: u32,
        max_level: u32,
    ) -> BookData {
        BookData {
            id: id.into(),
            name: name.into(),
            book_type: BookType::Textbook,
            skill_id: skill_id.into(),
            required_level,
            max_level,
            base_reading_time: 120 * MINUTE_MS,
            theory_experience: 150,
            fun: Some(-1),
            int_required: Some(10),
            description: None,
        }
    }

    /// Lookup material between a manual and a textbook
    pub fn create_reference(
        id: impl Into<String>,
        name: impl Into<String>,
        skill_id: impl Into<SkillId>,
        required_level: u32,
        max_level: u32,
    ) -> BookData {
        BookData {
            id: id.into(),
            name: name.into(),
            book_type: BookType::Reference,
            skill_id: skill_id.into(),
            required_level,
            max_level,
            base_reading_time: 60 * MINUTE_MS,
            theory_experience: 100,
            fun: Some(0),
            int_required: Some(8),
            description: None,
        }
    }
}

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

//! # Skills
//!
//! A [`SkillDefinition`] describes a skill type once for all characters. A [`Skill`] is one
//! character's immutable progress snapshot in that skill and holds its definition through an
//! `Arc`.
//!
//! ## Skill Levels
//! * **Level 0 – Untrained**
//!   _You fumble through the motions, lacking even the basics._
//! * **Level 1 – Apprentice**
//!   _You can mimic techniques but rely heavily on instruction._
//! * **Level 2 – Novice**
//!   _You grasp the fundamentals, though hesitation remains._
//! * **Level 3 – Initiate**
//!   _You begin to understand the "why" behind the motions._
//! * **Level 4 – Adept**
//!   _You handle common challenges with competence._
//! * **Level 5 – Journeyman**
//!   _You perform reliably in all but the most trying circumstances._
//! * **Level 6 – Master**
//!   _Others look to you for teaching._
//! * **Level 7 – Expert**
//!   _You see patterns invisible to most._
//! * **Level 8 – Paragon**
//!   _Your form sets the standard by which others are judged._
//! * **Level 9 – Mythical**
//!   _Your feats defy reason._
//! * **Level 10 – Legendary**
//!   _You are enshrined in myth._
//!
//! Levels 0 to 2 count as novice, 4 and up as proficient, 7 and up as expert and 10 and up as
//! mastered. Practice levels above 10 are legal and keep the Legendary name.
//!
//! ## Mechanics
//! ### Practice
//! ΔE = floor(B * Y(L_eff))
//!
//! Y(L) = max(0.2, 1 - min(0.1 * L, 0.8)) / D
//!
//! ### Theory
//! ΔT = floor(B * 0.5)
//!
//! Converted per hour: 0.5 / D, never past practice level `theory_level + 2`.
//!
//! ### Rust
//! ΔR = floor(days * rust_rate * (1 - rust_resist)), capped at the practice level.
//!
//! L_eff = L - R
//!
//! B = Base experience offered
//! D = Difficulty multiplier
//! L = Practice level
//! R = Rust level

mod definition;
mod state;

pub use definition::{
    BASE_EXPERIENCE_PER_LEVEL, MIN_DIFFICULTY_MULTIPLIER, Prerequisite, SkillDefinition,
};
pub use state::{
    MAX_AUTO_LEVEL_UPS, MAX_THEORY_LEVEL, PracticeState, RustState, Skill,
    THEORY_PRACTICE_ALLOWANCE, TheoryState, Timestamp,
};

/// Absorbs float error such as `0.29 * 100.0 == 28.999999999999996`.
const FLOOR_EPSILON: f64 = 1e-9;

/// Floor a non-negative quantity into whole points, saturating at the `u32` bounds
pub(crate) fn floor_to_u32(value: f64) -> u32 {
    (value + FLOOR_EPSILON).floor() as u32
}

//
// Copyright 2025 Hans W. Uhlig. All Rights Reserved.
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

//! Skillforge Common Types and Records
//!
//! This crate defines the plain data shared between the engine and whatever loads or saves it:
//! - Skill identifiers and categories
//! - Serializable skill definition, skill, and skill manager records
//! - Book content records

pub mod book;
pub mod records;
pub mod skill;

pub use book::{BookData, BookType};
pub use records::{
    PracticeRecord, PrerequisiteRecord, RustRecord, SkillDefinitionRecord, SkillManagerRecord,
    SkillRecord, TheoryRecord,
};
pub use skill::{SkillCategory, SkillId};

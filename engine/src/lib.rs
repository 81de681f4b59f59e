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

//! Skillforge Skill Progression Engine
//!
//! Characters improve skills three ways:
//! - Practice, which earns experience with diminishing returns as level rises
//! - Theory, studied from books and slowly converted into practice
//! - Rust, which wears unused skills down until they are practiced again
//!
//! All state is immutable. Operations take the current snapshot and a caller-supplied
//! timestamp and return the next snapshot.

mod macros;

pub mod book;
pub mod catalog;
pub mod config;
pub mod error;
pub mod manager;
pub mod skill;

pub use book::{BookManager, ReadingCheck, ReadingOutcome, ReadingRejection};
pub use catalog::Catalog;
pub use error::{ConfigError, SkillError, SkillResult};
pub use manager::{SkillManager, SkillStatistics};
pub use skill::{Skill, SkillDefinition, Timestamp};

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

//! # Catalog
//!
//! The set of skill definitions and books a world offers. A catalog comes either from the
//! built-in table below or from a YAML file shaped like:
//!
//! ```yaml
//! skills:
//!   - id: cooking
//!     name: Cooking
//!     category: crafting
//! books:
//!   - id: camp_recipes
//!     name: Camp Recipes
//!     bookType: manual
//!     skillId: cooking
//!     requiredLevel: 0
//!     maxLevel: 3
//!     baseReadingTime: 1800000
//!     theoryExperience: 50
//! ```

use crate::book::BookManager;
use crate::error::ConfigError;
use crate::manager::SkillManager;
use crate::skill::{SkillDefinition, Timestamp};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use skillforge_common::{BookData, SkillCategory, SkillDefinitionRecord, SkillId};
use std::collections::BTreeMap;
use std::path::Path;

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog::new(builtin_skills(), builtin_books()));

/// On-disk catalog layout
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub skills: Vec<SkillDefinitionRecord>,
    #[serde(default)]
    pub books: Vec<BookData>,
}

/// Skill definitions and books available to characters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    definitions: Vec<SkillDefinition>,
    books: BTreeMap<String, BookData>,
}

impl Catalog {
    /// Build a catalog; a later book with the same id replaces an earlier one
    pub fn new(definitions: Vec<SkillDefinition>, books: Vec<BookData>) -> Self {
        Self {
            definitions,
            books: books.into_iter().map(|book| (book.id.clone(), book)).collect(),
        }
    }

    /// The catalog compiled into the engine
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Load a catalog from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog: CatalogFile =
            serde_yaml::from_reader(file).map_err(|source| ConfigError::Yaml {
                path: path.display().to_string(),
                source,
            })?;
        let catalog = Self::from_file(catalog)?;
        tracing::info!(
            "Loaded catalog {} with {} skills and {} books",
            path.display(),
            catalog.definitions.len(),
            catalog.books.len()
        );
        Ok(catalog)
    }

    /// Validate a parsed catalog file
    pub fn from_file(file: CatalogFile) -> Result<Self, ConfigError> {
        let definitions = file
            .skills
            .into_iter()
            .map(SkillDefinition::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(book) = file.books.iter().find(|book| !book.is_valid()) {
            return Err(ConfigError::InvalidBook(book.id.clone()));
        }
        Ok(Self::new(definitions, file.books))
    }

    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            skills: self.definitions.iter().map(SkillDefinition::to_record).collect(),
            books: self.books.values().cloned().collect(),
        }
    }

    pub fn definitions(&self) -> &[SkillDefinition] {
        &self.definitions
    }

    pub fn definition(&self, id: &SkillId) -> Option<&SkillDefinition> {
        self.definitions.iter().find(|definition| definition.id() == id)
    }

    pub fn books(&self) -> impl Iterator<Item = &BookData> {
        self.books.values()
    }

    pub fn book(&self, id: &str) -> Option<&BookData> {
        self.books.get(id)
    }

    /// Books that train `skill`
    pub fn books_for(&self, skill: &SkillId) -> Vec<&BookData> {
        self.books.values().filter(|book| &book.skill_id == skill).collect()
    }

    /// Definitions that name `item_type` as related equipment
    pub fn skills_for_item(&self, item_type: &str) -> Vec<&SkillDefinition> {
        self.definitions
            .iter()
            .filter(|definition| definition.is_related_to(item_type))
            .collect()
    }

    /// A fresh character with every catalog skill
    pub fn new_character(&self, now: Timestamp) -> SkillManager {
        SkillManager::new(self.definitions.iter().cloned(), now)
    }
}

fn builtin_skills() -> Vec<SkillDefinition> {
    crate::skill_definitions! {
        "swordsmanship" {
            name: "Swordsmanship",
            description: "Fighting with bladed weapons.",
            category: SkillCategory::Combat,
            difficulty: 1.2,
            related: ["sword", "sabre", "dagger"],
        },
        "unarmed" {
            name: "Unarmed Combat",
            description: "Fighting with fists, feet and grapples.",
            category: SkillCategory::Combat,
            difficulty: 1.0,
        },
        "archery" {
            name: "Archery",
            description: "Shooting bows accurately at range.",
            category: SkillCategory::Ranged,
            difficulty: 1.5,
            related: ["bow", "longbow", "arrow"],
        },
        "throwing" {
            name: "Throwing",
            description: "Throwing knives, spears and stones.",
            category: SkillCategory::Ranged,
            difficulty: 1.0,
            related: ["javelin", "throwing_knife"],
        },
        "foraging" {
            name: "Foraging",
            description: "Finding edible plants, fungi and berries.",
            category: SkillCategory::Survival,
            difficulty: 0.8,
            rust_rate: 0.5,
        },
        "tracking" {
            name: "Tracking",
            description: "Reading trails and following quarry.",
            category: SkillCategory::Survival,
            difficulty: 1.3,
        },
        "cooking" {
            name: "Cooking",
            description: "Preparing food that heals and sustains.",
            category: SkillCategory::Crafting,
            difficulty: 0.8,
            related: ["pot", "pan", "campfire"],
            rust_resist: 0.5,
        },
        "carpentry" {
            name: "Carpentry",
            description: "Shaping wood into furniture, walls and tools.",
            category: SkillCategory::Crafting,
            difficulty: 1.0,
            related: ["saw", "hammer", "plank"],
        },
        "bowyery" {
            name: "Bowyery",
            description: "Crafting bows from seasoned wood.",
            category: SkillCategory::Crafting,
            difficulty: 1.8,
            requires: ["carpentry" >= 2, "archery" >= 1],
            related: ["bow", "longbow"],
        },
        "persuasion" {
            name: "Persuasion",
            description: "Bringing others around to your point of view.",
            category: SkillCategory::Social,
            difficulty: 1.2,
        },
        "bartering" {
            name: "Bartering",
            description: "Haggling for a better price.",
            category: SkillCategory::Social,
            difficulty: 1.0,
        },
        "herbalism" {
            name: "Herbalism",
            description: "Knowing which plants cure and which kill.",
            category: SkillCategory::Academic,
            difficulty: 1.4,
            requires: ["foraging" >= 1],
            related: ["herb", "mortar"],
        },
        "arcane_lore" {
            name: "Arcane Lore",
            description: "Forgotten knowledge of the old powers.",
            category: SkillCategory::Academic,
            difficulty: 2.5,
            rust_rate: 2.0,
            hidden: true,
        },
        "athletics" {
            name: "Athletics",
            description: "Running, climbing and jumping.",
            category: SkillCategory::Physical,
            difficulty: 1.0,
            rust_rate: 1.5,
        },
        "swimming" {
            name: "Swimming",
            description: "Staying afloat and moving through water.",
            category: SkillCategory::Physical,
            difficulty: 1.0,
            rust_resist: 0.75,
        },
    }
}

fn builtin_books() -> Vec<BookData> {
    let mut field_cookery =
        BookManager::create_manual("field_cookery", "Field Cookery", "cooking", 0, 3);
    field_cookery.description = Some("Recipes that survive a campfire.".to_string());

    vec![
        field_cookery,
        BookManager::create_textbook("grand_cuisine", "The Grand Cuisine", "cooking", 3, 7),
        BookManager::create_manual("joinery_basics", "Joinery Basics", "carpentry", 0, 3),
        BookManager::create_reference("timber_guide", "A Guide to Timber", "carpentry", 2, 6),
        BookManager::create_manual("bowstring", "The Bowstring", "archery", 0, 4),
        BookManager::create_textbook("herbal", "The Complete Herbal", "herbalism", 0, 6),
        BookManager::create_reference("trail_signs", "Trail Signs", "tracking", 1, 5),
    ]
}

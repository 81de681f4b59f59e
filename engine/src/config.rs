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

use crate::catalog::Catalog;
use crate::error::ConfigError;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_env_field::EnvField;
use skillforge_common::SkillId;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    #[arg(
        short = 'c',
        long = "config",
        help = "Path to configuration file",
        default_value = "skillforge.yaml"
    )]
    pub config_file: String,

    #[arg(
        short = 'e',
        long = "env",
        help = "Path to environment file",
        default_value = ".env"
    )]
    pub env_file: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations on the character save file
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Create a fresh character from the catalog
    New,
    /// Practice a skill
    Practice { skill: SkillId, amount: u32 },
    /// Study a skill without a book
    Study { skill: SkillId, amount: u32 },
    /// Read a catalog book
    Read { book: String },
    /// Apply rust and theory conversion up to now
    Tick,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub save: SaveConfig,
    #[serde(default)]
    pub reader: ReaderConfig,
}

impl Configuration {
    pub fn load(path: &str) -> Result<Configuration, ConfigError> {
        let file = std::fs::File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let conf = serde_yaml::from_reader(file).map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })?;

        Ok(conf)
    }

    /// Catalog named by the configuration, or the built-in one
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog.path {
            Some(path) => Catalog::load(path.as_str()),
            None => Ok(Catalog::builtin().clone()),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// YAML catalog file; the built-in catalog is used when absent
    pub path: Option<EnvField<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveConfig {
    pub path: EnvField<String>,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            path: EnvField::from(String::from("character.json")),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Reader intelligence for book checks; unknown intelligence skips them
    pub intelligence: Option<EnvField<u32>>,
}

impl ReaderConfig {
    pub fn intelligence(&self) -> Option<u32> {
        self.intelligence.as_ref().map(|intelligence| **intelligence)
    }
}

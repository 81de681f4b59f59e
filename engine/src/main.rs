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

use chrono::Utc;
use clap::Parser;
use skillforge_engine::config::{Arguments, Command, Configuration};
use skillforge_engine::{Catalog, SkillError, SkillManager, Timestamp};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load arguments from the command line
    let arguments: Arguments = Parser::parse();

    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_level(true)
        .with_ansi(true)
        .init();

    // Load environment variables from .env file if specified
    if let Some(ref env_file) = arguments.env_file {
        if Path::new(env_file).exists() {
            tracing::debug!("Loading environment variables from file: {}", env_file);
            dotenv::from_filename(env_file).ok();
        }
    } else {
        tracing::debug!("Loading environment variables from default file");
        dotenv::dotenv().ok();
    }

    // A missing configuration file means defaults
    let config = if Path::new(&arguments.config_file).exists() {
        Configuration::load(&arguments.config_file)?
    } else {
        tracing::debug!(
            "No configuration at {}, using defaults",
            arguments.config_file
        );
        Configuration::default()
    };
    tracing::debug!("Configuration loaded: {:?}", config);

    let catalog = config.catalog()?;
    let save_path = config.save.path.as_str();
    let now = Utc::now();

    let character = match arguments.command {
        Command::New => {
            if Path::new(save_path).exists() {
                tracing::warn!("Replacing existing character at {}", save_path);
            }
            catalog.new_character(now)
        }
        command => {
            let character = load_character(save_path)?;
            apply(
                command,
                &character,
                &catalog,
                config.reader.intelligence(),
                now,
            )?
        }
    };

    let stats = character.statistics();
    tracing::info!(
        "{} skills ({} unlocked), total level {}, {} rusted",
        stats.total_skills,
        stats.unlocked_skills,
        stats.total_level,
        stats.rusted_skills
    );

    std::fs::write(save_path, character.to_json()?)?;
    tracing::info!("Saved character to {}", save_path);
    Ok(())
}

fn load_character(path: &str) -> Result<SkillManager, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read character {}: {}", path, e))?;
    Ok(SkillManager::from_json(&json)?)
}

fn apply(
    command: Command,
    character: &SkillManager,
    catalog: &Catalog,
    intelligence: Option<u32>,
    now: Timestamp,
) -> Result<SkillManager, Box<dyn std::error::Error>> {
    match command {
        Command::New => Ok(catalog.new_character(now)),
        Command::Practice { skill, amount } => {
            let Some(before) = character.get_skill(&skill) else {
                return Err(SkillError::UnknownSkill(skill).into());
            };
            if !before.is_unlocked() {
                tracing::warn!("{} is still locked", skill);
            }
            let next = character
                .practice_skill(&skill, amount, now)
                .unlock_available();
            if next.level(&skill) > before.level() {
                tracing::info!(
                    "{} advanced to level {}",
                    before.definition().name(),
                    next.level(&skill)
                );
            }
            Ok(next)
        }
        Command::Study { skill, amount } => {
            if !character.has_skill(&skill) {
                return Err(SkillError::UnknownSkill(skill).into());
            }
            let next = character.study_theory(&skill, amount, now);
            tracing::info!(
                "{} theory level {}",
                skill,
                next.get_skill(&skill).map(|s| s.theory_level()).unwrap_or(0)
            );
            Ok(next)
        }
        Command::Read { book } => {
            let Some(book) = catalog.book(&book) else {
                return Err(format!("Unknown book: {}", book).into());
            };
            let Some((next, outcome)) = character.read_book(book, intelligence, now) else {
                return Err(SkillError::UnknownSkill(book.skill_id.clone()).into());
            };
            if outcome.success {
                tracing::info!("{}", outcome.message);
            } else {
                tracing::warn!("{}", outcome.message);
            }
            Ok(next)
        }
        Command::Tick => Ok(character
            .process_decay(now)
            .convert_theory(now)
            .unlock_available()),
    }
}

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

/// Declare a list of skill definitions.
///
/// Expands to a `Vec<SkillDefinition>` in declaration order.
///
/// ```
/// use skillforge_common::SkillCategory;
/// use skillforge_engine::skill_definitions;
///
/// let definitions = skill_definitions! {
///     "fletching" {
///         name: "Fletching",
///         description: "Making arrows.",
///         category: SkillCategory::Crafting,
///         difficulty: 1.2,
///         requires: ["archery" >= 1],
///         related: ["arrow"],
///     },
/// };
/// assert_eq!(definitions[0].difficulty_multiplier(), 1.2);
/// ```
#[macro_export]
macro_rules! skill_definitions {
    (
        $(
            $id:literal {
                name: $name:expr,
                description: $description:expr,
                category: $category:expr,
                difficulty: $difficulty:expr,
                $(requires: [$($required:literal >= $level:expr),* $(,)?],)?
                $(related: [$($item:literal),* $(,)?],)?
                $(rust_rate: $rust_rate:expr,)?
                $(rust_resist: $rust_resist:expr,)?
                $(hidden: $hidden:literal,)?
            }
        ),* $(,)?
    ) => {
        vec![
            $(
                {
                    #[allow(unused_mut)]
                    let mut definition = $crate::skill::SkillDefinition::new($id, $name, $category)
                        .with_description($description)
                        .with_difficulty($difficulty);
                    $($(
                        definition = definition.with_prerequisite($required, $level);
                    )*)?
                    $($(
                        definition = definition.with_related_item($item);
                    )*)?
                    $(
                        definition = definition.with_rust_rate($rust_rate);
                    )?
                    $(
                        definition = definition.with_rust_resist($rust_resist);
                    )?
                    $(
                        if $hidden {
                            definition = definition.hidden();
                        }
                    )?
                    definition
                }
            ),*
        ]
    };
}

//! The five fixed disciplines of a team match.

use crate::models::team::Gender;
use serde::{Deserialize, Serialize};

/// Who may be fielded in a discipline.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderRequirement {
    AllMale,
    AllFemale,
    /// Exactly one male and one female player per side.
    OneOfEach,
}

impl GenderRequirement {
    /// Whether one side's players satisfy the requirement.
    pub fn accepts(self, genders: &[Gender]) -> bool {
        match self {
            GenderRequirement::AllMale => genders.iter().all(|g| *g == Gender::Male),
            GenderRequirement::AllFemale => genders.iter().all(|g| *g == Gender::Female),
            GenderRequirement::OneOfEach => {
                genders.len() == 2
                    && genders.contains(&Gender::Male)
                    && genders.contains(&Gender::Female)
            }
        }
    }
}

/// Discipline of a rubber. Declaration order is the serve order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    MensDoubles,
    WomensSingles,
    MensSingles,
    WomensDoubles,
    MixedDoubles,
}

impl MatchType {
    /// All disciplines in serve order.
    pub const ALL: [MatchType; 5] = [
        MatchType::MensDoubles,
        MatchType::WomensSingles,
        MatchType::MensSingles,
        MatchType::WomensDoubles,
        MatchType::MixedDoubles,
    ];

    /// Fixed serve order rank, 1 to 5.
    pub fn serve_order(self) -> u8 {
        match self {
            MatchType::MensDoubles => 1,
            MatchType::WomensSingles => 2,
            MatchType::MensSingles => 3,
            MatchType::WomensDoubles => 4,
            MatchType::MixedDoubles => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MatchType::MensDoubles => "Men's doubles",
            MatchType::WomensSingles => "Women's singles",
            MatchType::MensSingles => "Men's singles",
            MatchType::WomensDoubles => "Women's doubles",
            MatchType::MixedDoubles => "Mixed doubles",
        }
    }

    pub fn players_per_side(self) -> usize {
        match self {
            MatchType::WomensSingles | MatchType::MensSingles => 1,
            MatchType::MensDoubles | MatchType::WomensDoubles | MatchType::MixedDoubles => 2,
        }
    }

    pub fn gender_requirement(self) -> GenderRequirement {
        match self {
            MatchType::MensDoubles | MatchType::MensSingles => GenderRequirement::AllMale,
            MatchType::WomensSingles | MatchType::WomensDoubles => GenderRequirement::AllFemale,
            MatchType::MixedDoubles => GenderRequirement::OneOfEach,
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

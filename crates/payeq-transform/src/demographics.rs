//! Race/ethnicity categorisation and the non-white flags.

use payeq_model::enums::{
    ETHNICITY_HISPANIC, RACE_AMERICAN_INDIAN, RACE_AMERICAN_INDIAN_ALT, RACE_ASIAN, RACE_BLACK,
    RACE_PACIFIC_ISLANDER, RACE_TWO_OR_MORE, RACE_WHITE, UNKNOWN_OR_UNDISCLOSED,
};
use payeq_model::{Gender, RaceEth};

/// Assign the combined race/ethnicity category.
///
/// Rules are evaluated in order and the first match wins:
///
/// 1. Hispanic or Latino ethnicity
/// 2. undisclosed ethnicity
/// 3. Native Hawaiian or Pacific Islander, grouped with Asian
/// 4. American Indian, two or more races, or undisclosed race
/// 5. any other race, prefixed "NH"
pub fn race_eth(race: &str, ethnicity: &str) -> RaceEth {
    let race = race.trim();
    let ethnicity = ethnicity.trim();
    if ethnicity == ETHNICITY_HISPANIC {
        return RaceEth::HispanicOrLatino;
    }
    if ethnicity == UNKNOWN_OR_UNDISCLOSED {
        return RaceEth::EthnicityUnknown;
    }
    if race == RACE_PACIFIC_ISLANDER {
        return RaceEth::NhAsian;
    }
    if [
        RACE_AMERICAN_INDIAN,
        RACE_AMERICAN_INDIAN_ALT,
        RACE_TWO_OR_MORE,
        UNKNOWN_OR_UNDISCLOSED,
    ]
    .contains(&race)
    {
        return RaceEth::NhSorOrRaceUcnd;
    }
    match race {
        RACE_ASIAN => RaceEth::NhAsian,
        RACE_BLACK => RaceEth::NhBlack,
        RACE_WHITE => RaceEth::NhWhite,
        other => RaceEth::NonHispanic(other.to_string()),
    }
}

/// Non-white: any race other than White or undisclosed, or Hispanic
/// ethnicity regardless of race.
pub fn is_nonwhite(race: &str, ethnicity: &str) -> bool {
    let race = race.trim();
    let non_white_race = race != RACE_WHITE && race != UNKNOWN_OR_UNDISCLOSED;
    non_white_race || ethnicity.trim() == ETHNICITY_HISPANIC
}

pub fn is_nonwhite_female(nonwhite: bool, gender: &Gender) -> bool {
    nonwhite && *gender == Gender::Female
}

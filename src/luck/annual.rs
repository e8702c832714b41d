//! Annual ("flowing year") fates via the 60-cycle sexagenary formula
//!
//! Stateless per-year computation anchored at the same epoch as the year
//! pillar, so a birth year's annual fate always equals its year pillar.

use crate::chart::gods::{branch_hidden_gods, ten_god};
use crate::chart::pillars::sexagenary_year;
use crate::core::error::{BaziError, Result};
use crate::core::types::{FiveElement, Stem, StemBranch, TenGod};
use serde::{Deserialize, Serialize};

/// Stem-branch and Ten-God data for a single calendar year
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualFate {
    #[serde(flatten)]
    pub stem_branch: StemBranch,
    pub stem_god: TenGod,
    pub branch_gods: Vec<(Stem, TenGod)>,
    pub elements: (FiveElement, FiveElement),
    pub year: i32,
}

/// Annual fate of one year relative to a day stem
pub fn annual_fate(year: i32, day_stem: Stem) -> AnnualFate {
    let pair = sexagenary_year(year);
    AnnualFate {
        stem_branch: pair,
        stem_god: ten_god(day_stem, pair.stem),
        branch_gods: branch_hidden_gods(day_stem, pair.branch),
        elements: pair.elements(),
        year,
    }
}

/// Annual fates for an inclusive year range
pub fn annual_fates(start_year: i32, end_year: i32, day_stem: Stem) -> Result<Vec<AnnualFate>> {
    if end_year < start_year {
        return Err(BaziError::InvalidInput(format!(
            "year range end ({end_year}) precedes start ({start_year})"
        )));
    }
    Ok((start_year..=end_year)
        .map(|year| annual_fate(year, day_stem))
        .collect())
}

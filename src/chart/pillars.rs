//! Pillar derivation for the four stem-branch pairs
//!
//! The day pillar is read verbatim from the calendar collaborator; the
//! other three are derived locally. Month and hour stems both use the
//! "escaping" coupling formula (base stem x2 plus branch index) rather
//! than any direct month/hour lookup.

use crate::almanac::LunarView;
use crate::core::config::config;
use crate::core::types::{Branch, Stem, StemBranch};
use chrono::{Datelike, NaiveDateTime};

/// Year pillar, bounded by Start of Spring rather than the lunar new year
///
/// A birth in lunar month 1 that still sits before 立春 belongs to the
/// previous sexagenary year.
pub fn year_pillar(view: &LunarView, birth: NaiveDateTime) -> StemBranch {
    let mut year = birth.year();
    let before_spring = view
        .current_term
        .as_deref()
        .is_some_and(|term| term.starts_with("立春"))
        && view.month == 1;
    if before_spring {
        year -= 1;
    }

    sexagenary_year(year)
}

/// Stem-branch of a calendar year via the fixed 甲子 epoch
pub fn sexagenary_year(year: i32) -> StemBranch {
    let offset = (year - config().sexagenary_epoch_year) as i64;
    StemBranch::from_indices(offset, offset)
}

/// Month pillar: branch from the collaborator, stem coupled to the year stem
///
/// Five-tiger-escaping-year rule: month stem index =
/// (year stem index x 2 + month branch index) mod 10.
pub fn month_pillar(year_stem: Stem, view: &LunarView) -> StemBranch {
    let branch = view.month_pillar.branch;
    let stem = Stem::from_index(year_stem.index() * 2 + branch.index());
    StemBranch::new(stem, branch)
}

/// Day pillar: trusted external result, no local computation
pub fn day_pillar(view: &LunarView) -> StemBranch {
    view.day_pillar
}

/// Hour pillar from the day stem and the hour of day
///
/// 子 spans 23:00-01:00, the only branch straddling midnight; the +1
/// offset folds hour 23 onto branch index 0. The stem uses the same
/// escaping formula as the month, parameterized by the day stem.
pub fn hour_pillar(day_stem: Stem, hour: u32) -> StemBranch {
    let branch = Branch::from_index(((hour as i64) + 1) / 2);
    let stem = Stem::from_index(day_stem.index() * 2 + branch.index());
    StemBranch::new(stem, branch)
}

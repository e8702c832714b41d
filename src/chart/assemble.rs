//! Chart assembly: composes pillars, gods, life stages, luck cycle, and
//! the current annual fate into the full response value

use crate::almanac::LunarView;
use crate::chart::gods::{branch_hidden_gods, ten_god};
use crate::chart::life_stage::life_stage;
use crate::chart::pillars::{day_pillar, hour_pillar, month_pillar, year_pillar};
use crate::core::error::Result;
use crate::core::types::{FiveElement, Gender, LifeStage, Stem, StemBranch, TenGod};
use crate::luck::annual::{annual_fate, AnnualFate};
use crate::luck::cycle::{compute_luck_cycle, LuckCycle};
use chrono::{Datelike, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// One pillar with its derived relational data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pillar {
    #[serde(flatten)]
    pub stem_branch: StemBranch,
    /// None only for the Day Pillar: the day stem has no relation to
    /// itself because it IS the reference. This is intentional absence,
    /// not a lookup failure.
    pub stem_god: Option<TenGod>,
    pub branch_gods: Vec<(Stem, TenGod)>,
    pub elements: (FiveElement, FiveElement),
    pub life_stage: Option<LifeStage>,
}

impl Pillar {
    fn derive(pair: StemBranch, day_stem: Stem, is_reference: bool) -> Self {
        Self {
            stem_branch: pair,
            stem_god: (!is_reference).then(|| ten_god(day_stem, pair.stem)),
            branch_gods: branch_hidden_gods(day_stem, pair.branch),
            elements: pair.elements(),
            life_stage: Some(life_stage(day_stem, pair.branch)),
        }
    }
}

/// Lunar date summary echoed back from the calendar collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub year_in_gan_zhi: String,
    pub month_in_gan_zhi: String,
    pub day_in_gan_zhi: String,
}

impl LunarDate {
    fn from_view(view: &LunarView) -> Self {
        Self {
            year: view.year,
            month: view.month,
            day: view.day,
            year_in_gan_zhi: view.year_pillar.to_string(),
            month_in_gan_zhi: view.month_pillar.to_string(),
            day_in_gan_zhi: view.day_pillar.to_string(),
        }
    }
}

/// The complete Four Pillars chart response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub year_pillar: Pillar,
    pub month_pillar: Pillar,
    pub day_pillar: Pillar,
    pub hour_pillar: Pillar,
    pub gender: Gender,
    pub lunar_date: LunarDate,
    pub decade_fate: LuckCycle,
    pub current_year_fate: AnnualFate,
}

/// Compute the full chart for a birth instant
///
/// Pure and synchronous; the calendar collaborator's output arrives as a
/// plain value before computation begins. The "current year" annual fate
/// is pinned to the present calendar year.
pub fn compute_chart(birth: NaiveDateTime, gender: Gender, view: &LunarView) -> Result<Chart> {
    compute_chart_at(birth, gender, view, Utc::now().year())
}

/// Like [`compute_chart`] but with an explicit reference year for the
/// current-year annual fate, which keeps the computation deterministic
pub fn compute_chart_at(
    birth: NaiveDateTime,
    gender: Gender,
    view: &LunarView,
    reference_year: i32,
) -> Result<Chart> {
    let year = year_pillar(view, birth);
    let month = month_pillar(year.stem, view);
    let day = day_pillar(view);
    let hour = hour_pillar(day.stem, birth.hour());

    // compute_luck_cycle normalizes the table itself; the raw collaborator
    // jie_table goes straight through
    let luck = compute_luck_cycle(gender, day.stem, month, birth, &view.jie_table);

    Ok(Chart {
        year_pillar: Pillar::derive(year, day.stem, false),
        month_pillar: Pillar::derive(month, day.stem, false),
        day_pillar: Pillar::derive(day, day.stem, true),
        hour_pillar: Pillar::derive(hour, day.stem, false),
        gender,
        lunar_date: LunarDate::from_view(view),
        decade_fate: luck,
        current_year_fate: annual_fate(reference_year, day.stem),
    })
}

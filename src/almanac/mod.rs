//! Calendar collaborator surface
//!
//! Solar-to-lunar conversion and the solar-term astronomical model live in
//! an external collaborator. This module defines the plain values the
//! engine consumes from it: a lunar view of the birth instant plus the
//! ordered table of primary ("Jie") solar-term boundaries. The engine
//! never computes solar terms itself.

use crate::core::error::Result;
use crate::core::types::StemBranch;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The 12 primary solar terms ("Jie", month boundaries), in seasonal order
///
/// The 12 secondary "Qi" terms are deliberately absent: luck-cycle timing
/// anchors on Jie boundaries only.
pub const JIE_NAMES: [&str; 12] = [
    "立春", "惊蛰", "清明", "立夏", "芒种", "小暑", "立秋", "白露", "寒露", "立冬", "大雪", "小寒",
];

/// Whether a solar-term name is one of the 12 primary Jie boundaries
pub fn is_jie_name(name: &str) -> bool {
    JIE_NAMES.contains(&name)
}

/// One solar-term boundary with sub-day precision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JieTerm {
    pub name: String,
    pub at: NaiveDateTime,
}

/// The calendar collaborator's lunar representation of a birth instant
///
/// All fields are trusted external results; the engine validates shape
/// (via the closed stem/branch enums) but not astronomy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LunarView {
    /// Lunar year number
    pub year: i32,
    /// Lunar month number (1-12; the year-pillar demotion rule keys on 1)
    pub month: u32,
    /// Lunar day number
    pub day: u32,
    /// Sexagenary label of the lunar year
    pub year_pillar: StemBranch,
    /// Sexagenary label of the solar-term month
    pub month_pillar: StemBranch,
    /// Sexagenary label of the day
    pub day_pillar: StemBranch,
    /// Name of the solar term in effect at the instant, if any
    ///
    /// Kept as the collaborator's raw token; the year-pillar rule matches
    /// on the 立春 prefix.
    #[serde(default)]
    pub current_term: Option<String>,
    /// Solar-term boundaries covering the birth year, as delivered
    ///
    /// Collaborators sometimes hand over the full 24-term table in
    /// arbitrary order; consumers filter to Jie terms and sort.
    #[serde(default)]
    pub jie_table: Vec<JieTerm>,
}

/// Seam for a real solar-to-lunar conversion library
///
/// Tests and the CLI supply `LunarView` values directly; a deployment
/// wires an implementation of this trait in front of the engine.
pub trait LunarCalendar {
    fn to_lunar(&self, instant: NaiveDateTime) -> Result<LunarView>;
}

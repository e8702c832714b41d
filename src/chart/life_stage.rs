//! Twelve-Life-Stage resolution

use crate::core::tables::life_stage_cycle;
use crate::core::types::{Branch, LifeStage, Stem};

/// Life stage of the day stem at a given branch
pub fn life_stage(day_stem: Stem, branch: Branch) -> LifeStage {
    life_stage_cycle(day_stem)[branch.index() as usize]
}

//! Static classical lookup tables
//!
//! All tables here are process-wide immutable constants, never mutated
//! after initialization. The element relation table and the life-stage
//! rotations are transcriptions of the classical reference rows; do not
//! try to derive one row from another.

use crate::core::types::{Branch, FiveElement, GodClass, LifeStage, Polarity, Stem, TenGod};

use GodClass::{Officer, Output, Peer, Resource, Wealth};
use LifeStage::{
    Bathing, Capping, Conception, Death, Decline, Growth, Nurture, Office, Prime, Severance,
    Sickness, Tomb,
};

/// Directional relation table indexed [reference element][other element]
///
/// Element order: Wood, Fire, Earth, Metal, Water. Rows are NOT symmetric
/// with columns: the generation direction matters.
const RELATIONS: [[GodClass; 5]; 5] = [
    // reference Wood
    [Peer, Output, Wealth, Officer, Resource],
    // reference Fire
    [Resource, Peer, Output, Wealth, Officer],
    // reference Earth
    [Officer, Resource, Peer, Output, Wealth],
    // reference Metal
    [Wealth, Officer, Resource, Peer, Output],
    // reference Water
    [Output, Wealth, Officer, Resource, Peer],
];

/// Base relation class between a reference element and another element
pub fn relation(reference: FiveElement, other: FiveElement) -> GodClass {
    RELATIONS[reference.index()][other.index()]
}

/// Resolve a base relation class to a concrete Ten God
///
/// Every class splits on the TARGET stem's polarity, not the reference's.
pub fn god_name(class: GodClass, target: Polarity) -> TenGod {
    match (class, target) {
        (GodClass::Peer, Polarity::Yang) => TenGod::Friend,
        (GodClass::Peer, Polarity::Yin) => TenGod::RobWealth,
        (GodClass::Output, Polarity::Yang) => TenGod::EatingGod,
        (GodClass::Output, Polarity::Yin) => TenGod::HurtingOfficer,
        (GodClass::Wealth, Polarity::Yang) => TenGod::IndirectWealth,
        (GodClass::Wealth, Polarity::Yin) => TenGod::DirectWealth,
        (GodClass::Officer, Polarity::Yang) => TenGod::SevenKillings,
        (GodClass::Officer, Polarity::Yin) => TenGod::DirectOfficer,
        (GodClass::Resource, Polarity::Yang) => TenGod::IndirectResource,
        (GodClass::Resource, Polarity::Yin) => TenGod::DirectResource,
    }
}

/// Hidden stems of a branch (藏干), primary stem first
pub fn hidden_stems(branch: Branch) -> &'static [Stem] {
    match branch {
        Branch::Zi => &[Stem::Gui],
        Branch::Chou => &[Stem::Ji, Stem::Gui, Stem::Xin],
        Branch::Yin => &[Stem::Jia, Stem::Bing, Stem::Wu],
        Branch::Mao => &[Stem::Yi],
        Branch::Chen => &[Stem::Wu, Stem::Yi, Stem::Gui],
        Branch::Si => &[Stem::Bing, Stem::Wu, Stem::Geng],
        Branch::Wu => &[Stem::Ding, Stem::Ji],
        Branch::Wei => &[Stem::Ji, Stem::Ding, Stem::Yi],
        Branch::Shen => &[Stem::Geng, Stem::Ren, Stem::Wu],
        Branch::You => &[Stem::Xin],
        Branch::Xu => &[Stem::Wu, Stem::Xin, Stem::Ding],
        Branch::Hai => &[Stem::Ren, Stem::Jia],
    }
}

/// Twelve-Life-Stage rotation for each stem, indexed by branch position
///
/// Each stem owns its own hardcoded 12-entry row; Yang and Yin stems of
/// the same element start their cycles at different branches and the
/// offsets are not uniform.
pub fn life_stage_cycle(stem: Stem) -> &'static [LifeStage; 12] {
    match stem {
        Stem::Jia => &[
            Bathing, Capping, Office, Prime, Decline, Sickness, Death, Tomb, Severance, Conception,
            Nurture, Growth,
        ],
        Stem::Yi => &[
            Sickness, Death, Tomb, Severance, Conception, Nurture, Growth, Bathing, Capping,
            Office, Prime, Decline,
        ],
        Stem::Bing | Stem::Wu => &[
            Conception, Nurture, Growth, Bathing, Capping, Office, Prime, Decline, Sickness, Death,
            Tomb, Severance,
        ],
        Stem::Ding | Stem::Ji => &[
            Severance, Conception, Nurture, Growth, Bathing, Capping, Office, Prime, Decline,
            Sickness, Death, Tomb,
        ],
        Stem::Geng => &[
            Death, Tomb, Severance, Conception, Nurture, Growth, Bathing, Capping, Office, Prime,
            Decline, Sickness,
        ],
        Stem::Xin => &[
            Decline, Sickness, Death, Tomb, Severance, Conception, Nurture, Growth, Bathing,
            Capping, Office, Prime,
        ],
        Stem::Ren => &[
            Growth, Bathing, Capping, Office, Prime, Decline, Sickness, Death, Tomb, Severance,
            Conception, Nurture,
        ],
        Stem::Gui => &[
            Prime, Decline, Sickness, Death, Tomb, Severance, Conception, Nurture, Growth, Bathing,
            Capping, Office,
        ],
    }
}

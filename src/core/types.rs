//! Core type definitions used throughout the codebase
//!
//! Stems and branches are closed enumerations with explicit index
//! conversions. All modular arithmetic stays inside `from_index` and
//! `rotated`; raw integers never appear in the public contract.

use crate::core::error::{BaziError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The 10 Heavenly Stems (天干), in sexagenary order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stem {
    #[serde(rename = "甲")]
    Jia,
    #[serde(rename = "乙")]
    Yi,
    #[serde(rename = "丙")]
    Bing,
    #[serde(rename = "丁")]
    Ding,
    #[serde(rename = "戊")]
    Wu,
    #[serde(rename = "己")]
    Ji,
    #[serde(rename = "庚")]
    Geng,
    #[serde(rename = "辛")]
    Xin,
    #[serde(rename = "壬")]
    Ren,
    #[serde(rename = "癸")]
    Gui,
}

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Jia,
        Stem::Yi,
        Stem::Bing,
        Stem::Ding,
        Stem::Wu,
        Stem::Ji,
        Stem::Geng,
        Stem::Xin,
        Stem::Ren,
        Stem::Gui,
    ];

    /// Position in the stem cycle, 0 (甲) through 9 (癸)
    pub fn index(&self) -> i64 {
        Self::ALL.iter().position(|s| s == self).unwrap() as i64
    }

    /// Stem at the given cycle position; any integer is reduced mod 10
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(10) as usize]
    }

    /// Even-indexed stems are Yang, odd-indexed are Yin
    pub fn polarity(&self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    pub fn element(&self) -> FiveElement {
        match self {
            Stem::Jia | Stem::Yi => FiveElement::Wood,
            Stem::Bing | Stem::Ding => FiveElement::Fire,
            Stem::Wu | Stem::Ji => FiveElement::Earth,
            Stem::Geng | Stem::Xin => FiveElement::Metal,
            Stem::Ren | Stem::Gui => FiveElement::Water,
        }
    }

    pub fn chinese(&self) -> char {
        const CHARS: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];
        CHARS[self.index() as usize]
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chinese())
    }
}

impl FromStr for Stem {
    type Err = BaziError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Stem::ALL
                .iter()
                .copied()
                .find(|stem| stem.chinese() == ch)
                .ok_or_else(|| BaziError::LookupFailed(format!("unknown heavenly stem: {s:?}"))),
            _ => Err(BaziError::LookupFailed(format!(
                "heavenly stem must be a single character: {s:?}"
            ))),
        }
    }
}

/// The 12 Earthly Branches (地支), in sexagenary order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "子")]
    Zi,
    #[serde(rename = "丑")]
    Chou,
    #[serde(rename = "寅")]
    Yin,
    #[serde(rename = "卯")]
    Mao,
    #[serde(rename = "辰")]
    Chen,
    #[serde(rename = "巳")]
    Si,
    #[serde(rename = "午")]
    Wu,
    #[serde(rename = "未")]
    Wei,
    #[serde(rename = "申")]
    Shen,
    #[serde(rename = "酉")]
    You,
    #[serde(rename = "戌")]
    Xu,
    #[serde(rename = "亥")]
    Hai,
}

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Zi,
        Branch::Chou,
        Branch::Yin,
        Branch::Mao,
        Branch::Chen,
        Branch::Si,
        Branch::Wu,
        Branch::Wei,
        Branch::Shen,
        Branch::You,
        Branch::Xu,
        Branch::Hai,
    ];

    /// Position in the branch cycle, 0 (子) through 11 (亥)
    pub fn index(&self) -> i64 {
        Self::ALL.iter().position(|b| b == self).unwrap() as i64
    }

    /// Branch at the given cycle position; any integer is reduced mod 12
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    pub fn element(&self) -> FiveElement {
        match self {
            Branch::Zi | Branch::Hai => FiveElement::Water,
            Branch::Yin | Branch::Mao => FiveElement::Wood,
            Branch::Si | Branch::Wu => FiveElement::Fire,
            Branch::Chen | Branch::Xu | Branch::Chou | Branch::Wei => FiveElement::Earth,
            Branch::Shen | Branch::You => FiveElement::Metal,
        }
    }

    pub fn chinese(&self) -> char {
        const CHARS: [char; 12] = [
            '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
        ];
        CHARS[self.index() as usize]
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chinese())
    }
}

impl FromStr for Branch {
    type Err = BaziError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Branch::ALL
                .iter()
                .copied()
                .find(|branch| branch.chinese() == ch)
                .ok_or_else(|| BaziError::LookupFailed(format!("unknown earthly branch: {s:?}"))),
            _ => Err(BaziError::LookupFailed(format!(
                "earthly branch must be a single character: {s:?}"
            ))),
        }
    }
}

/// One stem-branch pair of the sexagenary cycle
///
/// A pair has no standalone validity; it is meaningful only as the output
/// of the calendrical formula that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StemBranch {
    pub stem: Stem,
    pub branch: Branch,
}

impl StemBranch {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// Pair at the given stem/branch cycle positions (reduced mod 10/12)
    pub fn from_indices(stem_index: i64, branch_index: i64) -> Self {
        Self {
            stem: Stem::from_index(stem_index),
            branch: Branch::from_index(branch_index),
        }
    }

    /// Rotate both stem and branch by the same signed number of steps
    pub fn rotated(&self, steps: i64) -> Self {
        Self::from_indices(self.stem.index() + steps, self.branch.index() + steps)
    }

    /// Parse a two-character ganzhi string such as "甲子"
    pub fn from_ganzhi(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(stem_ch), Some(branch_ch), None) => Ok(Self {
                stem: stem_ch.to_string().parse()?,
                branch: branch_ch.to_string().parse()?,
            }),
            _ => Err(BaziError::LookupFailed(format!(
                "ganzhi pair must be exactly two characters: {s:?}"
            ))),
        }
    }

    pub fn elements(&self) -> (FiveElement, FiveElement) {
        (self.stem.element(), self.branch.element())
    }
}

impl fmt::Display for StemBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

/// The Five Elements (五行)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiveElement {
    #[serde(rename = "木")]
    Wood,
    #[serde(rename = "火")]
    Fire,
    #[serde(rename = "土")]
    Earth,
    #[serde(rename = "金")]
    Metal,
    #[serde(rename = "水")]
    Water,
}

impl FiveElement {
    /// Position in the generation cycle Wood→Fire→Earth→Metal→Water
    pub fn index(&self) -> usize {
        match self {
            FiveElement::Wood => 0,
            FiveElement::Fire => 1,
            FiveElement::Earth => 2,
            FiveElement::Metal => 3,
            FiveElement::Water => 4,
        }
    }
}

impl fmt::Display for FiveElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            FiveElement::Wood => '木',
            FiveElement::Fire => '火',
            FiveElement::Earth => '土',
            FiveElement::Metal => '金',
            FiveElement::Water => '水',
        };
        write!(f, "{ch}")
    }
}

/// Yin-Yang polarity of a stem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    #[serde(rename = "阳")]
    Yang,
    #[serde(rename = "阴")]
    Yin,
}

/// The five base relation classes between a reference element and another
///
/// Peer = same element, Output = element I generate, Wealth = element I
/// control, Officer = element that controls me, Resource = element that
/// generates me. The relation is directional: relation(a, b) != relation(b, a).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GodClass {
    Peer,
    Output,
    Wealth,
    Officer,
    Resource,
}

/// The Ten Gods (十神): each base relation split by the target's polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenGod {
    #[serde(rename = "比肩")]
    Friend,
    #[serde(rename = "劫财")]
    RobWealth,
    #[serde(rename = "食神")]
    EatingGod,
    #[serde(rename = "伤官")]
    HurtingOfficer,
    #[serde(rename = "偏财")]
    IndirectWealth,
    #[serde(rename = "正财")]
    DirectWealth,
    #[serde(rename = "七杀")]
    SevenKillings,
    #[serde(rename = "正官")]
    DirectOfficer,
    #[serde(rename = "偏印")]
    IndirectResource,
    #[serde(rename = "正印")]
    DirectResource,
}

impl TenGod {
    pub fn class(&self) -> GodClass {
        match self {
            TenGod::Friend | TenGod::RobWealth => GodClass::Peer,
            TenGod::EatingGod | TenGod::HurtingOfficer => GodClass::Output,
            TenGod::IndirectWealth | TenGod::DirectWealth => GodClass::Wealth,
            TenGod::SevenKillings | TenGod::DirectOfficer => GodClass::Officer,
            TenGod::IndirectResource | TenGod::DirectResource => GodClass::Resource,
        }
    }
}

/// The Twelve Life Stages (十二长生)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeStage {
    #[serde(rename = "长生")]
    Growth,
    #[serde(rename = "沐浴")]
    Bathing,
    #[serde(rename = "冠带")]
    Capping,
    #[serde(rename = "临官")]
    Office,
    #[serde(rename = "帝旺")]
    Prime,
    #[serde(rename = "衰")]
    Decline,
    #[serde(rename = "病")]
    Sickness,
    #[serde(rename = "死")]
    Death,
    #[serde(rename = "墓")]
    Tomb,
    #[serde(rename = "绝")]
    Severance,
    #[serde(rename = "胎")]
    Conception,
    #[serde(rename = "养")]
    Nurture,
}

/// Natal gender, used only for luck-cycle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = BaziError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(BaziError::InvalidInput(format!(
                "unknown gender token: {other:?} (expected male/female)"
            ))),
        }
    }
}

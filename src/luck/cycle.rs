//! Luck-cycle timing: direction, anchor Jie term, starting age, and the
//! eight ten-year periods rotated out of the Month Pillar
//!
//! Timing follows the classical conversion rule (3 days between birth and
//! the anchor term = 1 year of starting age) with sub-day precision from
//! the solar-term table. The engine always returns a complete cycle: a
//! table with no bounding term degrades to the documented defaults
//! instead of failing.

use crate::almanac::{is_jie_name, JieTerm};
use crate::chart::gods::{branch_hidden_gods, ten_god};
use crate::chart::pillars::sexagenary_year;
use crate::core::config::config;
use crate::core::types::{FiveElement, Gender, Polarity, Stem, StemBranch, TenGod};
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Direction the decade periods rotate from the Month Pillar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Reverse,
}

/// One ten-year luck period
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecadePeriod {
    #[serde(flatten)]
    pub stem_branch: StemBranch,
    pub stem_god: TenGod,
    pub branch_gods: Vec<(Stem, TenGod)>,
    pub elements: (FiveElement, FiveElement),
    pub start_age: i32,
    pub end_age: i32,
    pub start_year: i32,
    pub end_year: i32,
}

/// The full multi-decade luck cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LuckCycle {
    pub direction: Direction,
    /// Fractional years between birth and the anchor term, for display
    /// (rounded to one decimal). The first period's start age is the
    /// ceiling of the raw value: a partial first year rounds up.
    pub starting_age: f64,
    pub fates: Vec<DecadePeriod>,
}

/// Rotation direction from birth-year stem parity and gender
///
/// Yang year + male and Yin year + female run forward; the other two
/// combinations run in reverse.
pub fn cycle_direction(year_stem: Stem, gender: Gender) -> Direction {
    let year_is_yang = year_stem.polarity() == Polarity::Yang;
    let gender_is_yang = gender == Gender::Male;
    if year_is_yang == gender_is_yang {
        Direction::Forward
    } else {
        Direction::Reverse
    }
}

/// Anchor Jie term for luck timing
///
/// Forward cycles anchor on the first Jie term strictly after birth;
/// reverse cycles step back one from that term. Either search can come up
/// empty when the table does not bound the birth instant.
fn find_anchor(
    terms: &[JieTerm],
    birth: NaiveDateTime,
    direction: Direction,
) -> Option<NaiveDateTime> {
    for (i, term) in terms.iter().enumerate() {
        if term.at > birth {
            return match direction {
                Direction::Forward => {
                    tracing::debug!(term = %term.name, at = %term.at, "found next jie term");
                    Some(term.at)
                }
                Direction::Reverse if i > 0 => {
                    let prev = &terms[i - 1];
                    tracing::debug!(term = %prev.name, at = %prev.at, "found previous jie term");
                    Some(prev.at)
                }
                Direction::Reverse => None,
            };
        }
    }
    None
}

/// Compute the luck cycle for a birth
///
/// `jie_terms` is the collaborator's solar-term table; non-Jie entries are
/// ignored and ordering is not assumed. Infallible by design: missing
/// bounding terms fall back to the configured defaults.
pub fn compute_luck_cycle(
    gender: Gender,
    day_stem: Stem,
    month: StemBranch,
    birth: NaiveDateTime,
    jie_terms: &[JieTerm],
) -> LuckCycle {
    let cfg = config();
    let year_stem = sexagenary_year(birth.year()).stem;
    let direction = cycle_direction(year_stem, gender);

    let mut terms: Vec<JieTerm> = jie_terms
        .iter()
        .filter(|t| is_jie_name(&t.name))
        .cloned()
        .collect();
    terms.sort_by_key(|t| t.at);

    let (starting_age, start_year) = match find_anchor(&terms, birth, direction) {
        Some(anchor) => {
            let elapsed = match direction {
                Direction::Forward => anchor - birth,
                Direction::Reverse => birth - anchor,
            };
            let days = elapsed.num_seconds() as f64 / 86_400.0;
            let age = days / cfg.days_per_luck_year;
            (age, birth.year() + age.floor() as i32)
        }
        None => {
            tracing::warn!(
                fallback_age = cfg.fallback_starting_age,
                "no bounding jie term in table, using default starting age"
            );
            (
                cfg.fallback_starting_age,
                birth.year() + cfg.fallback_start_year_offset,
            )
        }
    };

    let first_age = starting_age.ceil() as i32;
    let fates = (0..cfg.decade_periods)
        .map(|i| {
            let steps = (i as i64) + 1;
            let pair = match direction {
                Direction::Forward => month.rotated(steps),
                Direction::Reverse => month.rotated(-steps),
            };
            let start_age = first_age + 10 * i as i32;
            let period_start_year = start_year + 10 * i as i32;
            DecadePeriod {
                stem_branch: pair,
                stem_god: ten_god(day_stem, pair.stem),
                branch_gods: branch_hidden_gods(day_stem, pair.branch),
                elements: pair.elements(),
                start_age,
                end_age: start_age + 9,
                start_year: period_start_year,
                end_year: period_start_year + 9,
            }
        })
        .collect();

    LuckCycle {
        direction,
        starting_age: (starting_age * 10.0).round() / 10.0,
        fates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn jie_terms_1990() -> Vec<JieTerm> {
        vec![
            JieTerm {
                name: "惊蛰".into(),
                at: dt(1990, 3, 6, 10, 19),
            },
            JieTerm {
                name: "春分".into(), // Qi term, must be ignored
                at: dt(1990, 3, 21, 3, 19),
            },
            JieTerm {
                name: "清明".into(),
                at: dt(1990, 4, 5, 15, 13),
            },
        ]
    }

    #[test]
    fn test_direction_rules() {
        // 庚 (Yang) year
        assert_eq!(cycle_direction(Stem::Geng, Gender::Male), Direction::Forward);
        assert_eq!(
            cycle_direction(Stem::Geng, Gender::Female),
            Direction::Reverse
        );
        // 辛 (Yin) year
        assert_eq!(cycle_direction(Stem::Xin, Gender::Male), Direction::Reverse);
        assert_eq!(
            cycle_direction(Stem::Xin, Gender::Female),
            Direction::Forward
        );
    }

    #[test]
    fn test_forward_cycle_1990_male() {
        let month = StemBranch::from_ganzhi("己卯").unwrap();
        let cycle = compute_luck_cycle(
            Gender::Male,
            Stem::Yi,
            month,
            dt(1990, 3, 21, 8, 30),
            &jie_terms_1990(),
        );

        assert_eq!(cycle.direction, Direction::Forward);
        // Birth to 清明 is 15d 6h 43m ~= 15.280 days -> 5.09 years
        assert_eq!(cycle.starting_age, 5.1);
        assert_eq!(cycle.fates.len(), 8);

        let first = &cycle.fates[0];
        assert_eq!(first.stem_branch.to_string(), "庚辰");
        assert_eq!(first.start_age, 6);
        assert_eq!(first.end_age, 15);
        assert_eq!(first.start_year, 1995);
        assert_eq!(first.end_year, 2004);

        let second = &cycle.fates[1];
        assert_eq!(second.stem_branch.to_string(), "辛巳");
        assert_eq!(second.start_age, 16);
        assert_eq!(second.start_year, 2005);
    }

    #[test]
    fn test_reverse_cycle_1990_female() {
        let month = StemBranch::from_ganzhi("己卯").unwrap();
        let cycle = compute_luck_cycle(
            Gender::Female,
            Stem::Yi,
            month,
            dt(1990, 3, 21, 8, 30),
            &jie_terms_1990(),
        );

        assert_eq!(cycle.direction, Direction::Reverse);
        // 惊蛰 to birth is 14d 22h 11m ~= 14.924 days -> 4.97 years
        assert_eq!(cycle.starting_age, 5.0);

        let first = &cycle.fates[0];
        assert_eq!(first.stem_branch.to_string(), "戊寅");
        assert_eq!(first.start_age, 5);
        assert_eq!(first.start_year, 1994);
    }

    #[test]
    fn test_periods_contiguous() {
        let month = StemBranch::from_ganzhi("己卯").unwrap();
        for gender in [Gender::Male, Gender::Female] {
            let cycle = compute_luck_cycle(
                gender,
                Stem::Yi,
                month,
                dt(1990, 3, 21, 8, 30),
                &jie_terms_1990(),
            );
            for pair in cycle.fates.windows(2) {
                assert_eq!(pair[0].end_age + 1, pair[1].start_age);
                assert_eq!(pair[0].end_year + 1, pair[1].start_year);
            }
        }
    }

    #[test]
    fn test_each_period_rotates_one_step() {
        let month = StemBranch::from_ganzhi("己卯").unwrap();
        let cycle = compute_luck_cycle(
            Gender::Male,
            Stem::Yi,
            month,
            dt(1990, 3, 21, 8, 30),
            &jie_terms_1990(),
        );
        let mut expected = month;
        for period in &cycle.fates {
            expected = expected.rotated(1);
            assert_eq!(period.stem_branch, expected);
        }
    }

    #[test]
    fn test_empty_table_falls_back_to_defaults() {
        let month = StemBranch::from_ganzhi("己卯").unwrap();
        let cycle = compute_luck_cycle(Gender::Male, Stem::Yi, month, dt(1990, 3, 21, 8, 30), &[]);

        assert_eq!(cycle.starting_age, 6.2);
        assert_eq!(cycle.fates[0].start_age, 7); // ceil(6.2)
        assert_eq!(cycle.fates[0].start_year, 1996); // birth year + 6
        assert_eq!(cycle.fates.len(), 8);
    }

    #[test]
    fn test_reverse_without_predecessor_falls_back() {
        // Only one term, after birth: a reverse cycle has nothing to step
        // back to and must take the fallback.
        let month = StemBranch::from_ganzhi("己卯").unwrap();
        let terms = vec![JieTerm {
            name: "清明".into(),
            at: dt(1990, 4, 5, 15, 13),
        }];
        let cycle =
            compute_luck_cycle(Gender::Female, Stem::Yi, month, dt(1990, 3, 21, 8, 30), &terms);
        assert_eq!(cycle.direction, Direction::Reverse);
        assert_eq!(cycle.starting_age, 6.2);
    }

    #[test]
    fn test_unsorted_table_is_sorted_before_search() {
        let month = StemBranch::from_ganzhi("己卯").unwrap();
        let mut terms = jie_terms_1990();
        terms.reverse();
        let cycle = compute_luck_cycle(
            Gender::Male,
            Stem::Yi,
            month,
            dt(1990, 3, 21, 8, 30),
            &terms,
        );
        assert_eq!(cycle.starting_age, 5.1);
    }
}

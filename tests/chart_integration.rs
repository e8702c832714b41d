//! Chart computation integration tests
//!
//! These tests run the full pipeline on a real birth instant (1990-03-21
//! 08:30, a 庚午 year) and check each pillar, the hidden-stem gods, the
//! life stages, and the wire-format JSON shape end-to-end.

use sizhu::almanac::{JieTerm, LunarView};
use sizhu::chart::{compute_chart_at, ten_god};
use sizhu::core::types::{Branch, FiveElement, Gender, LifeStage, Stem, StemBranch, TenGod};
use chrono::{NaiveDate, NaiveDateTime};

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

/// Calendar collaborator output for 1990-03-21 (lunar 1990-02-25)
fn view_1990() -> LunarView {
    LunarView {
        year: 1990,
        month: 2,
        day: 25,
        year_pillar: StemBranch::from_ganzhi("庚午").unwrap(),
        month_pillar: StemBranch::from_ganzhi("己卯").unwrap(),
        day_pillar: StemBranch::from_ganzhi("乙酉").unwrap(),
        current_term: None,
        jie_table: vec![
            JieTerm {
                name: "惊蛰".into(),
                at: dt(1990, 3, 6, 10, 19),
            },
            JieTerm {
                name: "清明".into(),
                at: dt(1990, 4, 5, 15, 13),
            },
        ],
    }
}

/// All four pillars for the 1990 birth
///
/// Year and day come from the calendar collaborator (庚午, 乙酉); the
/// month stem is coupled to the year stem (庚 year + 卯 branch = 己卯)
/// and the hour pillar is derived from the day stem (乙 day, 08:30 =
/// 庚辰).
#[test]
fn test_four_pillars_1990() {
    let chart =
        compute_chart_at(dt(1990, 3, 21, 8, 30), Gender::Male, &view_1990(), 2025).unwrap();

    assert_eq!(chart.year_pillar.stem_branch.to_string(), "庚午");
    assert_eq!(chart.month_pillar.stem_branch.to_string(), "己卯");
    assert_eq!(chart.day_pillar.stem_branch.to_string(), "乙酉");
    assert_eq!(chart.hour_pillar.stem_branch.to_string(), "庚辰");
}

/// Ten Gods relative to the 乙 day master
///
/// 庚 is Yang Metal controlling 乙's wood, so both the year and hour
/// stems read as 七杀; the month's 己 is Yin Earth, direct wealth.
#[test]
fn test_ten_gods_against_day_master() {
    let chart =
        compute_chart_at(dt(1990, 3, 21, 8, 30), Gender::Male, &view_1990(), 2025).unwrap();

    assert_eq!(chart.year_pillar.stem_god, Some(TenGod::SevenKillings));
    assert_eq!(chart.month_pillar.stem_god, Some(TenGod::DirectWealth));
    assert_eq!(chart.day_pillar.stem_god, None);
    assert_eq!(chart.hour_pillar.stem_god, Some(TenGod::SevenKillings));
}

/// Hidden-stem gods of each branch, in canonical hidden-stem order
#[test]
fn test_branch_hidden_gods() {
    let chart =
        compute_chart_at(dt(1990, 3, 21, 8, 30), Gender::Male, &view_1990(), 2025).unwrap();

    // 午 hides 丁 and 己
    assert_eq!(
        chart.year_pillar.branch_gods,
        vec![
            (Stem::Ding, ten_god(Stem::Yi, Stem::Ding)),
            (Stem::Ji, ten_god(Stem::Yi, Stem::Ji)),
        ]
    );
    // 卯 hides only 乙; a Yin target in the peer class reads 劫财
    assert_eq!(
        chart.month_pillar.branch_gods,
        vec![(Stem::Yi, TenGod::RobWealth)]
    );
    // 酉 hides only 辛, Yin Metal: direct officer
    assert_eq!(
        chart.day_pillar.branch_gods,
        vec![(Stem::Xin, TenGod::DirectOfficer)]
    );
    // 辰 hides 戊, 乙, 癸
    assert_eq!(chart.hour_pillar.branch_gods.len(), 3);
    assert_eq!(chart.hour_pillar.branch_gods[0].0, Stem::Wu);
}

/// Life stages follow the 乙 day master's rotation row
#[test]
fn test_life_stages_for_yi_day_master() {
    let chart =
        compute_chart_at(dt(1990, 3, 21, 8, 30), Gender::Male, &view_1990(), 2025).unwrap();

    assert_eq!(chart.year_pillar.life_stage, Some(LifeStage::Growth));
    assert_eq!(chart.month_pillar.life_stage, Some(LifeStage::Severance));
    assert_eq!(chart.day_pillar.life_stage, Some(LifeStage::Office));
    assert_eq!(chart.hour_pillar.life_stage, Some(LifeStage::Conception));
}

/// Pillar elements expose both the stem's and the branch's element
#[test]
fn test_pillar_elements() {
    let chart =
        compute_chart_at(dt(1990, 3, 21, 8, 30), Gender::Male, &view_1990(), 2025).unwrap();

    assert_eq!(
        chart.year_pillar.elements,
        (FiveElement::Metal, FiveElement::Fire)
    );
    assert_eq!(
        chart.day_pillar.elements,
        (FiveElement::Wood, FiveElement::Metal)
    );
}

/// A birth in lunar month 1 before 立春 belongs to the previous year
#[test]
fn test_year_pillar_demotion_before_spring() {
    let mut view = view_1990();
    view.month = 1;
    view.day = 8;
    view.current_term = Some("立春".into());

    let chart = compute_chart_at(dt(1990, 2, 3, 12, 0), Gender::Male, &view, 2025).unwrap();
    // 1989 is 己巳
    assert_eq!(chart.year_pillar.stem_branch.to_string(), "己巳");
}

/// A 23:xx birth falls into the next day's 子 hour branch
#[test]
fn test_late_night_hour_wraps_to_zi() {
    let chart =
        compute_chart_at(dt(1990, 3, 21, 23, 30), Gender::Male, &view_1990(), 2025).unwrap();
    assert_eq!(chart.hour_pillar.stem_branch.branch, Branch::Zi);
    // 乙 day, 子 branch: (1*2 + 0) mod 10 = 2 -> 丙
    assert_eq!(chart.hour_pillar.stem_branch.stem, Stem::Bing);
}

/// The raw collaborator term table needs no preprocessing: an unsorted
/// 24-term mix with Qi entries yields the same luck timing as a clean
/// Jie-only table
#[test]
fn test_raw_term_table_passes_straight_through() {
    let mut view = view_1990();
    view.jie_table = vec![
        JieTerm {
            name: "清明".into(),
            at: dt(1990, 4, 5, 15, 13),
        },
        JieTerm {
            name: "春分".into(), // Qi term, ignored by luck timing
            at: dt(1990, 3, 21, 3, 19),
        },
        JieTerm {
            name: "惊蛰".into(),
            at: dt(1990, 3, 6, 10, 19),
        },
    ];

    let chart = compute_chart_at(dt(1990, 3, 21, 8, 30), Gender::Male, &view, 2025).unwrap();
    assert_eq!(chart.decade_fate.starting_age, 5.1);
    assert_eq!(chart.decade_fate.fates[0].stem_branch.to_string(), "庚辰");

    let reverse = compute_chart_at(dt(1990, 3, 21, 8, 30), Gender::Female, &view, 2025).unwrap();
    assert_eq!(reverse.decade_fate.starting_age, 5.0);
}

/// The serialized chart matches the wire format the frontend expects
#[test]
fn test_wire_format_shape() {
    let chart =
        compute_chart_at(dt(1990, 3, 21, 8, 30), Gender::Male, &view_1990(), 2025).unwrap();
    let json = serde_json::to_value(&chart).unwrap();

    assert_eq!(json["yearPillar"]["stem"], "庚");
    assert_eq!(json["yearPillar"]["branch"], "午");
    assert_eq!(json["yearPillar"]["stemGod"], "七杀");
    assert_eq!(json["dayPillar"]["stemGod"], serde_json::Value::Null);
    assert_eq!(json["monthPillar"]["branchGods"][0][0], "乙");
    assert_eq!(json["monthPillar"]["branchGods"][0][1], "劫财");
    assert_eq!(json["hourPillar"]["lifeStage"], "胎");
    assert_eq!(json["gender"], "male");
    assert_eq!(json["lunarDate"]["yearInGanZhi"], "庚午");
    assert_eq!(json["decadeFate"]["direction"], "forward");
    assert_eq!(json["decadeFate"]["startingAge"], 5.1);
    assert_eq!(json["currentYearFate"]["year"], 2025);
}

/// The chart round-trips through its own JSON representation
#[test]
fn test_chart_json_round_trip() {
    let chart =
        compute_chart_at(dt(1990, 3, 21, 8, 30), Gender::Female, &view_1990(), 2025).unwrap();
    let json = serde_json::to_string(&chart).unwrap();
    let back: sizhu::chart::Chart = serde_json::from_str(&json).unwrap();
    assert_eq!(
        back.hour_pillar.stem_branch,
        chart.hour_pillar.stem_branch
    );
    assert_eq!(back.gender, Gender::Female);
    assert_eq!(back.decade_fate.fates.len(), 8);
}

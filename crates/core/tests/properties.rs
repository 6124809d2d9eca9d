//! Behavioural properties of `CronMath` over a corpus of expressions and
//! offsets, plus the reference scenarios.

use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use cron::Schedule;

use cronmath_core::Duration::{Hours, Minutes};
use cronmath_core::{CronExpression, CronMath, CronMathError, Duration, Position};

const CORPUS: &[&str] = &[
    "0 9 * * *",
    "45 9 * * *",
    "0 23 * * *",
    "0,30 9 * * *",
    "0 9-17 * * 1-5",
    "*/15 * * * *",
    "5/20 8,20 * * *",
    "0 0 1 * *",
    "30 2 15 6 *",
    "0 12 * * 0,6",
    "10-20/5 6 1-10/3 1-6 *",
    "* * * * *",
    "59 23 31 12 6",
];

const OFFSETS: &[Duration] = &[
    Minutes(0),
    Minutes(1),
    Minutes(-1),
    Minutes(15),
    Minutes(-45),
    Minutes(90),
    Hours(1),
    Hours(-3),
    Hours(25),
    Hours(-48),
    Minutes(7 * 24 * 60),
];

fn canonical(input: &str) -> String {
    CronMath::new(input).to_string()
}

fn parse(input: &str) -> CronExpression {
    CronExpression::from_str(input).unwrap_or_else(|e| panic!("'{input}' does not parse: {e}"))
}

// ── Reference scenarios ─────────────────────────────────────────────

#[test]
fn scenario_a_minutes_within_hour() {
    let cm = CronMath::new("0 9 * * *").add(Minutes(30));
    assert_eq!(cm.to_string(), "30 9 * * *");
}

#[test]
fn scenario_b_minutes_carry_into_hour() {
    let cm = CronMath::new("45 9 * * *").add(Minutes(30));
    assert_eq!(cm.to_string(), "15 10 * * *");
}

#[test]
fn scenario_c_day_carry_absorbed_by_wildcard() {
    let cm = CronMath::new("0 23 * * *").add(Hours(2));
    assert_eq!(cm.to_string(), "0 1 * * *");
}

#[test]
fn scenario_d_subtract_minutes() {
    let cm = CronMath::new("0 9 * * *").sub(Minutes(15));
    assert_eq!(cm.to_string(), "45 8 * * *");
}

#[test]
fn scenario_e_non_uniform_carry_refused() {
    let cm = CronMath::new("0,30 9 * * *").add(Minutes(45));
    assert!(cm.error().is_some_and(CronMathError::is_non_representable));
    assert_eq!(cm.to_string(), "");
}

#[test]
fn scenario_f_hour_range_with_weekdays() {
    let cm = CronMath::new("0 9-17 * * 1-5").add(Hours(1));
    assert_eq!(cm.to_string(), "0 10-18 * * 1-5");
}

// ── Properties ──────────────────────────────────────────────────────

#[test]
fn round_trip_reparses_to_same_sets() {
    for input in CORPUS {
        let emitted = canonical(input);
        assert!(
            parse(input).same_sets(&parse(&emitted)),
            "'{input}' emitted as '{emitted}' with a different value-set"
        );
        assert_eq!(canonical(&emitted), emitted, "'{emitted}' is not canonical");
    }
}

#[test]
fn zero_offset_is_identity() {
    for input in CORPUS {
        assert_eq!(
            CronMath::new(input).add(Minutes(0)).to_string(),
            canonical(input)
        );
    }
}

#[test]
fn add_then_sub_is_identity() {
    for input in CORPUS {
        for d in OFFSETS {
            let cm = CronMath::new(input).add(*d).sub(*d);
            assert_eq!(cm.to_string(), canonical(input), "'{input}' +/- {d}");
        }
    }
}

#[test]
fn accumulation_is_commutative() {
    for input in CORPUS {
        for a in OFFSETS {
            for b in OFFSETS {
                let ab = CronMath::new(input).add(*a).add(*b);
                let ba = CronMath::new(input).add(*b).add(*a);
                assert_eq!(ab.to_string(), ba.to_string(), "'{input}' {a} {b}");
                assert_eq!(ab.error(), ba.error(), "'{input}' {a} {b}");
            }
        }
    }
}

#[test]
fn hours_equal_sixty_minutes() {
    for input in CORPUS {
        for n in [-30, -1, 0, 1, 2, 23, 24, 49] {
            let hours = CronMath::new(input).add(Hours(n));
            let minutes = CronMath::new(input).add(Minutes(60 * n));
            assert_eq!(hours.to_string(), minutes.to_string(), "'{input}' {n}h");
            assert_eq!(hours.error(), minutes.error(), "'{input}' {n}h");
        }
    }
}

#[test]
fn successful_shifts_preserve_cardinality_and_domains() {
    for input in CORPUS {
        let original = parse(input);
        for d in OFFSETS {
            let cm = CronMath::new(input).add(*d);
            let Ok(shifted) = cm.result() else { continue };

            let reparsed = parse(&cm.to_string());
            assert!(reparsed.same_sets(shifted), "'{input}' {d} emitted a different set");

            for position in Position::ALL {
                let before = original.field(position);
                let after = shifted.field(position);
                assert_eq!(
                    before.cardinality(),
                    after.cardinality(),
                    "'{input}' {d}: {position} changed cardinality"
                );
                assert!(after
                    .values()
                    .iter()
                    .all(|v| (position.min()..=position.max()).contains(v)));
            }
        }
    }
}

#[test]
fn errors_stay_sticky() {
    let failing = [
        CronMath::new("not a cron"),
        CronMath::new("0,30 9 * * *").add(Minutes(45)),
        CronMath::new("0 0 31 12 *").add(Hours(24)),
    ];
    for cm in failing {
        let err = cm.error().cloned().expect("expected an error");
        let cm = cm.add(Minutes(15)).sub(Hours(3)).add(Minutes(-45));
        assert_eq!(cm.error(), Some(&err));
        assert_eq!(cm.to_string(), "");
    }
}

// ── Cross-check against the `cron` crate ────────────────────────────

/// Rewrite a 5-field expression for the `cron` crate: prepend a seconds
/// field and renumber weekdays, which it counts 1-7 from Sunday.
fn cron_crate_form(expr: &str) -> String {
    let parsed = parse(expr);
    let dow = parsed.day_of_week();
    let dow = if dow.is_any() {
        "*".to_string()
    } else {
        dow.values()
            .iter()
            .map(|v| (v + 1).to_string())
            .collect::<Vec<_>>()
            .join(",")
    };
    let [minute, hour, dom, month, _] = parsed.fields();
    format!("0 {minute} {hour} {dom} {month} {dow}")
}

fn schedule(expr: &str) -> Schedule {
    let normalized = cron_crate_form(expr);
    Schedule::from_str(&normalized)
        .unwrap_or_else(|e| panic!("cron crate rejected '{normalized}' (from '{expr}'): {e}"))
}

fn next_after(expr: &str, t: DateTime<Utc>) -> DateTime<Utc> {
    schedule(expr)
        .after(&t)
        .next()
        .unwrap_or_else(|| panic!("'{expr}' never fires after {t}"))
}

#[test]
fn weekday_numbering_matches_cron_crate() {
    assert_eq!(cron_crate_form("0 9 * * 1-5"), "0 0 9 * * 2,3,4,5,6");
    assert_eq!(cron_crate_form("0 9 * * 0"), "0 0 9 * * 1");
    assert_eq!(cron_crate_form("*/15 * 1 * *"), "0 */15 * 1 * *");

    // 2024-07-01 is a Monday.
    let sunday = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
    assert_eq!(
        next_after("0 9 * * 1", sunday),
        Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap()
    );
}

#[test]
fn shifted_firings_match_cron_crate() {
    let cases: &[(&str, Duration)] = &[
        ("0 9 * * *", Minutes(30)),
        ("45 9 * * *", Minutes(30)),
        ("0 23 * * *", Hours(2)),
        ("0 9 * * *", Minutes(-15)),
        ("0 9-17 * * 1-5", Hours(1)),
        ("0 23 * * 1-5", Hours(2)),
        ("30 1 * * 1,3", Minutes(-120)),
        ("30 * * * *", Minutes(45)),
        ("*/15 * * * *", Minutes(5)),
        ("0 0 10 * *", Hours(-1)),
    ];
    let starts = [
        Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 7, 4, 13, 37, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 1, 15, 22, 59, 0).unwrap(),
    ];

    for (input, d) in cases {
        let cm = CronMath::new(input).add(*d);
        assert!(cm.error().is_none(), "'{input}' {d} unexpectedly failed");
        let output = cm.to_string();
        let delta = chrono::Duration::minutes(d.as_minutes().unwrap());

        for t in starts {
            assert_eq!(
                next_after(&output, t + delta),
                next_after(input, t) + delta,
                "'{input}' {d} -> '{output}' from {t}"
            );
        }
    }
}

use std::fs;
use std::path::PathBuf;

use tff_terminal::dataset::parse_results_json;
use tff_terminal::store::{effective_results, load_override_from, save_override_to};

fn temp_store_path(tag: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "tff_terminal_store_test_{tag}_{}.json",
        std::process::id()
    ));
    path
}

#[test]
fn override_round_trips_through_disk() {
    let path = temp_store_path("roundtrip");
    let _ = fs::remove_file(&path);

    let weeks = parse_results_json(
        r#"{"week3":[{"home":"Alpha","away":"Beta","homeScore":50,"awayScore":41},{"byeTeam":"Gamma","byeScore":22}]}"#,
    )
    .unwrap();
    save_override_to(&path, &weeks).expect("save should succeed");

    let loaded = load_override_from(&path).expect("saved override should load");
    assert_eq!(loaded.week_numbers(), vec![3]);
    assert_eq!(loaded.week(3), weeks.week(3));

    let _ = fs::remove_file(&path);
}

#[test]
fn unreadable_or_wrong_version_files_read_as_no_override() {
    let path = temp_store_path("badfile");
    fs::write(&path, "{\"version\":999,\"saved_at\":\"x\",\"results\":{}}").unwrap();
    assert!(load_override_from(&path).is_none());

    fs::write(&path, "garbage").unwrap();
    assert!(load_override_from(&path).is_none());

    let _ = fs::remove_file(&path);
    assert!(load_override_from(&path).is_none());
}

#[test]
fn merged_view_prefers_override_weeks() {
    let seed = parse_results_json(
        r#"{"week1":[{"home":"A","away":"B","homeScore":1,"awayScore":2}],
            "week2":[{"home":"A","away":"B","homeScore":0,"awayScore":0}]}"#,
    )
    .unwrap();
    let over = parse_results_json(
        r#"{"week2":[{"home":"B","away":"A","homeScore":7,"awayScore":3}]}"#,
    )
    .unwrap();

    let merged = effective_results(&seed, Some(&over));
    assert_eq!(merged.week(1), seed.week(1));
    assert_eq!(merged.week(2), over.week(2));

    let untouched = effective_results(&seed, None);
    assert_eq!(untouched.week(2), seed.week(2));
}

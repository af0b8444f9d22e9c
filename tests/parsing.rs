use std::fs;
use std::path::PathBuf;

use tff_terminal::dataset::{self, Match, parse_results_json};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_sample_results_fixture() {
    let raw = read_fixture("sample_results.json");
    let dataset = parse_results_json(&raw).expect("fixture should parse");

    // "season" is not a week key; week3 never existed; week4 is kept as-is.
    assert_eq!(dataset.week_numbers(), vec![1, 2, 4]);

    let week1 = dataset.week(1);
    assert_eq!(week1.len(), 4, "entry without an away side is dropped");

    // String scores parse, whitespace/casing fold into one identity.
    assert_eq!(
        week1[1],
        Match::Pairing {
            home: "net six and chill".to_string(),
            away: "bench warmers united".to_string(),
            home_score: Some(55),
            away_score: Some(55),
        }
    );
    assert_eq!(
        dataset.display_name("net six and chill"),
        "net six and CHILL"
    );

    // A negative score survives as an unplayed pairing, not an error.
    assert_eq!(
        week1[2],
        Match::Pairing {
            home: "blue moon rising".to_string(),
            away: "pub quiz rovers".to_string(),
            home_score: None,
            away_score: Some(39),
        }
    );
    assert!(week1[2].score().is_none());

    // Short "bye" spelling is accepted.
    assert_eq!(
        week1[3],
        Match::Bye {
            team: "kebab kings".to_string(),
            score: None,
        }
    );
}

#[test]
fn document_level_garbage_is_an_error() {
    assert!(parse_results_json("not json").is_err());
    assert!(parse_results_json("[1,2,3]").is_err());
}

#[test]
fn wire_output_reparses_to_the_same_weeks() {
    let raw = read_fixture("sample_results.json");
    let parsed = parse_results_json(&raw).unwrap();
    let reparsed = dataset::parse_results_value(&dataset::to_results_value(&parsed)).unwrap();
    assert_eq!(parsed.week_numbers(), reparsed.week_numbers());
    for week in parsed.week_numbers() {
        assert_eq!(parsed.week(week), reparsed.week(week));
    }
}

#[test]
fn bundled_seed_data_is_coherent() {
    let roster = dataset::seed_roster();
    assert_eq!(roster.len(), 13);

    let results = dataset::seed_results();
    assert_eq!(results.week_numbers(), vec![1, 2, 3]);

    let fixtures = dataset::seed_fixtures();
    assert_eq!(fixtures.last_week(), 5);

    // Every seeded fixture names roster teams only.
    for week in fixtures.week_numbers() {
        for m in fixtures.week(week) {
            match m {
                Match::Pairing { home, away, .. } => {
                    assert!(roster.contains(home), "unknown fixture team {home}");
                    assert!(roster.contains(away), "unknown fixture team {away}");
                }
                Match::Bye { team, .. } => {
                    assert!(roster.contains(team), "unknown bye team {team}");
                }
            }
        }
    }
}

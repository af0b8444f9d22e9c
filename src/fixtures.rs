use crate::dataset::{Dataset, Match, Roster};

/// A fixture list entry for one week, with the result filled in when the
/// results dataset has a completed pairing for the same tie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureLine {
    Bye {
        team: String,
    },
    Tie {
        home: String,
        away: String,
        result: Option<(u32, u32)>,
    },
}

pub fn week_fixture_lines(fixtures: &Dataset, results: &Dataset, week: u32) -> Vec<FixtureLine> {
    fixtures
        .week(week)
        .iter()
        .map(|m| match m {
            Match::Bye { team, .. } => FixtureLine::Bye { team: team.clone() },
            Match::Pairing { home, away, .. } => FixtureLine::Tie {
                home: home.clone(),
                away: away.clone(),
                result: result_for(results, week, home, away),
            },
        })
        .collect()
}

/// The completed score for a tie in a given week, if it has been played.
pub fn result_for(results: &Dataset, week: u32, home: &str, away: &str) -> Option<(u32, u32)> {
    results.week(week).iter().find_map(|m| match m {
        Match::Pairing {
            home: h, away: a, ..
        } if h == home && a == away => m.score(),
        _ => None,
    })
}

/// Plain-text week summary ready to paste into the group chat.
pub fn build_share_text(
    fixtures: &Dataset,
    results: &Dataset,
    roster: &Roster,
    week: u32,
) -> String {
    let mut lines = vec![format!("GW{week} Fixtures (Chumpions League – 1XI)")];
    for line in week_fixture_lines(fixtures, results, week) {
        match line {
            FixtureLine::Bye { team } => {
                lines.push(format!("BYE: {}", roster.display_name(&team)));
            }
            FixtureLine::Tie {
                home,
                away,
                result: Some((home_score, away_score)),
            } => {
                lines.push(format!(
                    "{} {home_score}–{away_score} {}",
                    roster.display_name(&home),
                    roster.display_name(&away)
                ));
            }
            FixtureLine::Tie {
                home,
                away,
                result: None,
            } => {
                lines.push(format!(
                    "{} vs {}",
                    roster.display_name(&home),
                    roster.display_name(&away)
                ));
            }
        }
    }
    lines.join("\n")
}

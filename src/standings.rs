use std::collections::HashMap;

use crate::dataset::{Dataset, Match, Roster};

/// Flat point credit for a bye week. Byes touch only `points`: played,
/// won/drawn/lost and the score columns stay untouched.
pub const BYE_POINTS: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingRow {
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub points_for: u32,
    pub points_against: u32,
    pub points: u32,
}

impl StandingRow {
    fn new(team: &str) -> Self {
        Self {
            team: team.to_string(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            points_for: 0,
            points_against: 0,
            points: 0,
        }
    }

    pub fn goal_diff(&self) -> i64 {
        i64::from(self.points_for) - i64::from(self.points_against)
    }
}

/// Fold weeks 1..=`through_week` into the primary league table.
///
/// Pairings count only when both sides are roster members and both scores
/// are present; everything else is skipped with no partial credit. Rows
/// cover exactly the roster teams that picked up at least one counted
/// pairing or bye. Ordering: points, then goal difference, then points for,
/// then team id ascending so fully level teams still order the same way on
/// every run.
pub fn league_table(dataset: &Dataset, roster: &Roster, through_week: u32) -> Vec<StandingRow> {
    let mut table: HashMap<String, StandingRow> = HashMap::new();

    for week in 1..=through_week {
        for m in dataset.week(week) {
            match m {
                Match::Bye { team, .. } => {
                    if roster.contains(team) {
                        table
                            .entry(team.clone())
                            .or_insert_with(|| StandingRow::new(team))
                            .points += BYE_POINTS;
                    }
                }
                Match::Pairing { home, away, .. } => {
                    if !roster.contains(home) || !roster.contains(away) {
                        continue;
                    }
                    let Some((home_score, away_score)) = m.score() else {
                        continue;
                    };
                    credit_side(&mut table, home, home_score, away_score);
                    credit_side(&mut table, away, away_score, home_score);
                }
            }
        }
    }

    let mut rows: Vec<StandingRow> = table.into_values().collect();
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_diff().cmp(&a.goal_diff()))
            .then_with(|| b.points_for.cmp(&a.points_for))
            .then_with(|| a.team.cmp(&b.team))
    });
    rows
}

fn credit_side(table: &mut HashMap<String, StandingRow>, team: &str, own: u32, opp: u32) {
    let row = table
        .entry(team.to_string())
        .or_insert_with(|| StandingRow::new(team));
    row.played += 1;
    row.points_for += own;
    row.points_against += opp;
    if own > opp {
        row.won += 1;
        row.points += 3;
    } else if own < opp {
        row.lost += 1;
    } else {
        row.drawn += 1;
        row.points += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_results_json;

    fn roster_abc() -> Roster {
        Roster::from_team_names(&["Alpha", "Beta", "Gamma"])
    }

    #[test]
    fn row_counters_stay_consistent() {
        let dataset = parse_results_json(
            r#"{"week1":[{"home":"Alpha","away":"Beta","homeScore":10,"awayScore":5},{"byeTeam":"Gamma"}],
                "week2":[{"home":"Beta","away":"Gamma","homeScore":8,"awayScore":8}]}"#,
        )
        .unwrap();
        let rows = league_table(&dataset, &roster_abc(), 2);
        for row in &rows {
            assert_eq!(row.played, row.won + row.drawn + row.lost, "{}", row.team);
        }
        let total_played: u32 = rows.iter().map(|r| r.played).sum();
        assert_eq!(total_played % 2, 0);
    }

    #[test]
    fn bye_credit_bypasses_played_and_results() {
        let dataset = parse_results_json(r#"{"week1":[{"byeTeam":"Gamma","byeScore":44}]}"#).unwrap();
        let rows = league_table(&dataset, &roster_abc(), 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].team, "gamma");
        assert_eq!(rows[0].points, BYE_POINTS);
        assert_eq!(rows[0].played, 0);
        assert_eq!(rows[0].points_for, 0);
    }

    #[test]
    fn unplayed_and_out_of_roster_pairings_are_skipped() {
        let dataset = parse_results_json(
            r#"{"week1":[
                {"home":"Alpha","away":"Beta"},
                {"home":"Alpha","away":"Outsider","homeScore":9,"awayScore":1},
                {"home":"Beta","away":"Gamma","homeScore":-3,"awayScore":2}]}"#,
        )
        .unwrap();
        assert!(league_table(&dataset, &roster_abc(), 1).is_empty());
    }

    #[test]
    fn level_teams_order_by_name() {
        let dataset = parse_results_json(
            r#"{"week1":[{"home":"Beta","away":"Alpha","homeScore":3,"awayScore":3}]}"#,
        )
        .unwrap();
        let rows = league_table(&dataset, &roster_abc(), 1);
        assert_eq!(rows[0].team, "alpha");
        assert_eq!(rows[1].team, "beta");
    }
}

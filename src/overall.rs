use std::collections::HashMap;

use crate::dataset::{Dataset, Match};

/// One team's running own-score total as of a week boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverallRow {
    pub team: String,
    pub cumulative_points: u32,
}

/// Full ranking as of one week boundary, best total first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingSnapshot {
    pub week: u32,
    pub rows: Vec<OverallRow>,
}

impl RankingSnapshot {
    /// 1-based rank of a team in this snapshot.
    pub fn position_of(&self, team: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.team == team).map(|i| i + 1)
    }
}

/// Current ranking row with movement against the previous week's snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverallStanding {
    pub team: String,
    pub cumulative_points: u32,
    pub position: usize,
    /// prior position minus current position; up is positive. Teams with no
    /// prior snapshot entry report 0 — new entrants have not moved.
    pub delta: i32,
}

/// One snapshot per week boundary 1..=`through_week`.
///
/// Unlike the primary table this ranking spans every team the data has ever
/// scored for, roster member or not. A completed pairing contributes each
/// side's own score; a bye contributes its explicit score, or registers the
/// team at its current total when no score is given. Ties order by team id
/// ascending so reruns produce identical snapshots.
pub fn ranking_snapshots(dataset: &Dataset, through_week: u32) -> Vec<RankingSnapshot> {
    let mut totals: HashMap<String, u32> = HashMap::new();
    let mut snapshots = Vec::with_capacity(through_week as usize);

    for week in 1..=through_week {
        for m in dataset.week(week) {
            match m {
                Match::Pairing { home, away, .. } => {
                    if let Some((home_score, away_score)) = m.score() {
                        *totals.entry(home.clone()).or_insert(0) += home_score;
                        *totals.entry(away.clone()).or_insert(0) += away_score;
                    }
                }
                Match::Bye { team, score } => {
                    *totals.entry(team.clone()).or_insert(0) += score.unwrap_or(0);
                }
            }
        }

        let mut rows: Vec<OverallRow> = totals
            .iter()
            .map(|(team, total)| OverallRow {
                team: team.clone(),
                cumulative_points: *total,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.cumulative_points
                .cmp(&a.cumulative_points)
                .then_with(|| a.team.cmp(&b.team))
        });
        snapshots.push(RankingSnapshot { week, rows });
    }

    snapshots
}

/// The week-`through_week` ranking annotated with week-over-week movement.
pub fn current_with_movement(dataset: &Dataset, through_week: u32) -> Vec<OverallStanding> {
    let snapshots = ranking_snapshots(dataset, through_week);
    let Some(current) = snapshots.last() else {
        return Vec::new();
    };

    let prior_positions: HashMap<&str, usize> = if snapshots.len() >= 2 {
        snapshots[snapshots.len() - 2]
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (row.team.as_str(), idx + 1))
            .collect()
    } else {
        HashMap::new()
    };

    current
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let position = idx + 1;
            let delta = prior_positions
                .get(row.team.as_str())
                .map(|prior| *prior as i32 - position as i32)
                .unwrap_or(0);
            OverallStanding {
                team: row.team.clone(),
                cumulative_points: row.cumulative_points,
                position,
                delta,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_results_json;

    #[test]
    fn totals_never_decrease_across_weeks() {
        let dataset = parse_results_json(
            r#"{"week1":[{"home":"A","away":"B","homeScore":10,"awayScore":5}],
                "week2":[{"home":"B","away":"A","homeScore":0,"awayScore":0}],
                "week3":[{"byeTeam":"A"}]}"#,
        )
        .unwrap();
        let snapshots = ranking_snapshots(&dataset, 3);
        for pair in snapshots.windows(2) {
            for row in &pair[0].rows {
                let later = pair[1]
                    .rows
                    .iter()
                    .find(|r| r.team == row.team)
                    .expect("teams never drop out of later snapshots");
                assert!(later.cumulative_points >= row.cumulative_points);
            }
        }
    }

    #[test]
    fn scoreless_bye_registers_team_at_zero() {
        let dataset = parse_results_json(r#"{"week1":[{"byeTeam":"C"}]}"#).unwrap();
        let snapshots = ranking_snapshots(&dataset, 1);
        assert_eq!(snapshots[0].rows.len(), 1);
        assert_eq!(snapshots[0].rows[0].cumulative_points, 0);
    }

    #[test]
    fn out_of_range_week_yields_no_snapshots() {
        let dataset = parse_results_json(r#"{"week5":[{"byeTeam":"C"}]}"#).unwrap();
        assert!(ranking_snapshots(&dataset, 0).is_empty());
        // Weeks without data still produce (empty-total) snapshots up to W.
        assert_eq!(ranking_snapshots(&dataset, 3).len(), 3);
    }
}

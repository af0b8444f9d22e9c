use crate::dataset::{Dataset, Match};

/// How many recent outcomes a form string holds.
pub const FORM_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSymbol {
    Win,
    Draw,
    Loss,
    Bye,
}

impl FormSymbol {
    pub fn as_char(self) -> char {
        match self {
            FormSymbol::Win => 'W',
            FormSymbol::Draw => 'D',
            FormSymbol::Loss => 'L',
            FormSymbol::Bye => 'B',
        }
    }
}

/// Backward scan over a team's weeks, newest outcome first.
///
/// Weeks where the team has neither a bye nor a completed pairing yield
/// nothing and do not end the scan; the iterator is exhausted only at
/// week 1. Callers bound it with `take`.
struct OutcomeScan<'a> {
    dataset: &'a Dataset,
    team: &'a str,
    week: u32,
}

impl Iterator for OutcomeScan<'_> {
    type Item = FormSymbol;

    fn next(&mut self) -> Option<FormSymbol> {
        while self.week >= 1 {
            let week = self.week;
            self.week -= 1;
            if let Some(symbol) = outcome_in_week(self.dataset, self.team, week) {
                return Some(symbol);
            }
        }
        None
    }
}

fn outcome_in_week(dataset: &Dataset, team: &str, week: u32) -> Option<FormSymbol> {
    let matches = dataset.week(week);

    // A bye takes precedence over anything else recorded that week.
    if matches
        .iter()
        .any(|m| matches!(m, Match::Bye { team: t, .. } if t == team))
    {
        return Some(FormSymbol::Bye);
    }

    for m in matches {
        let Match::Pairing { home, away, .. } = m else {
            continue;
        };
        let own_is_home = home == team;
        if !own_is_home && away != team {
            continue;
        }
        // A pairing still missing a score is no outcome; keep looking in
        // case the week also lists a completed replay.
        let Some((home_score, away_score)) = m.score() else {
            continue;
        };
        let (own, opp) = if own_is_home {
            (home_score, away_score)
        } else {
            (away_score, home_score)
        };
        return Some(if own > opp {
            FormSymbol::Win
        } else if own < opp {
            FormSymbol::Loss
        } else {
            FormSymbol::Draw
        });
    }
    None
}

/// The team's last few outcomes through `through_week`, oldest first.
pub fn recent_symbols(dataset: &Dataset, team: &str, through_week: u32) -> Vec<FormSymbol> {
    let mut symbols: Vec<FormSymbol> = OutcomeScan {
        dataset,
        team,
        week: through_week,
    }
    .take(FORM_WINDOW)
    .collect();
    symbols.reverse();
    symbols
}

/// Display form of [`recent_symbols`], e.g. "LDWWB". Empty when the team
/// never appears in the scanned window.
pub fn recent_form(dataset: &Dataset, team: &str, through_week: u32) -> String {
    recent_symbols(dataset, team, through_week)
        .into_iter()
        .map(FormSymbol::as_char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_results_json;

    #[test]
    fn reads_oldest_to_newest() {
        let dataset = parse_results_json(
            r#"{"week1":[{"home":"A","away":"B","homeScore":10,"awayScore":5}],
                "week2":[{"home":"B","away":"C","homeScore":8,"awayScore":8}]}"#,
        )
        .unwrap();
        assert_eq!(recent_form(&dataset, "b", 2), "LD");
    }

    #[test]
    fn gaps_do_not_consume_the_window() {
        let dataset = parse_results_json(
            r#"{"week1":[{"home":"A","away":"B","homeScore":1,"awayScore":0}],
                "week2":[{"home":"C","away":"D","homeScore":2,"awayScore":2}],
                "week3":[{"byeTeam":"A"}],
                "week4":[{"home":"A","away":"B"}],
                "week5":[{"home":"B","away":"A","homeScore":0,"awayScore":4}]}"#,
        )
        .unwrap();
        // Weeks 2 (not involved) and 4 (unplayed) vanish; byes count.
        assert_eq!(recent_form(&dataset, "a", 5), "WBW");
    }

    #[test]
    fn window_caps_at_five() {
        let mut doc = String::from("{");
        for week in 1..=8 {
            if week > 1 {
                doc.push(',');
            }
            doc.push_str(&format!(
                r#""week{week}":[{{"home":"A","away":"B","homeScore":{week},"awayScore":0}}]"#
            ));
        }
        doc.push('}');
        let dataset = parse_results_json(&doc).unwrap();
        assert_eq!(recent_form(&dataset, "a", 8), "WWWWW");
        assert_eq!(recent_form(&dataset, "b", 8).len(), FORM_WINDOW);
    }

    #[test]
    fn unknown_team_is_empty() {
        let dataset = parse_results_json(r#"{"week1":[{"byeTeam":"A"}]}"#).unwrap();
        assert_eq!(recent_form(&dataset, "nobody", 1), "");
    }
}

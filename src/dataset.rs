use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{Map, Value};

/// One scheduled entry in a week document. A pairing with a missing score is
/// a fixture that has not been played yet; it contributes to no table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match {
    Pairing {
        home: String,
        away: String,
        home_score: Option<u32>,
        away_score: Option<u32>,
    },
    Bye {
        team: String,
        score: Option<u32>,
    },
}

impl Match {
    /// Both scores of a completed pairing. `None` for byes and for pairings
    /// still waiting on either side's score.
    pub fn score(&self) -> Option<(u32, u32)> {
        match self {
            Match::Pairing {
                home_score: Some(h),
                away_score: Some(a),
                ..
            } => Some((*h, *a)),
            _ => None,
        }
    }
}

/// Week-indexed match documents plus a directory of display spellings.
///
/// Team identity inside a dataset is the canonical form produced by
/// [`canon_team`]; the directory remembers the first raw spelling seen for
/// each canonical id so the presentation layer can render something readable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    weeks: BTreeMap<u32, Vec<Match>>,
    names: HashMap<String, String>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn week(&self, week: u32) -> &[Match] {
        self.weeks.get(&week).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn week_numbers(&self) -> Vec<u32> {
        self.weeks.keys().copied().collect()
    }

    pub fn last_week(&self) -> u32 {
        self.weeks.keys().next_back().copied().unwrap_or(0)
    }

    pub fn insert_week(&mut self, week: u32, matches: Vec<Match>) {
        self.weeks.insert(week, matches);
    }

    /// Canonicalize a raw team spelling, remembering the first spelling seen
    /// for display. Returns the canonical id.
    pub fn register_team(&mut self, raw: &str) -> String {
        let canon = canon_team(raw);
        if !canon.is_empty() {
            self.names
                .entry(canon.clone())
                .or_insert_with(|| raw.trim().to_string());
        }
        canon
    }

    /// First raw spelling seen for a canonical team id, falling back to the
    /// id itself for teams this dataset has never mentioned.
    pub fn display_name<'a>(&'a self, canon: &'a str) -> &'a str {
        self.names.get(canon).map(String::as_str).unwrap_or(canon)
    }

    /// A copy of `self` with every week present in `over` replaced by the
    /// override's version of that week.
    pub fn overlaid_with(&self, over: &Dataset) -> Dataset {
        let mut out = self.clone();
        for (week, matches) in &over.weeks {
            out.weeks.insert(*week, matches.clone());
        }
        for (canon, display) in &over.names {
            out.names
                .entry(canon.clone())
                .or_insert_with(|| display.clone());
        }
        out
    }
}

/// Canonical team identity: trimmed, inner whitespace collapsed, case-folded.
/// Applied once at ingestion; everything downstream compares canonical ids.
pub fn canon_team(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Parse a week-keyed results/fixtures document (`{"week1": [...], ...}`).
///
/// Only document-level problems are errors. Individual entries that are not
/// a recognizable pairing or bye, and scores that are negative or
/// non-numeric, degrade to "missing" and are carried as unplayed.
pub fn parse_results_json(raw: &str) -> Result<Dataset> {
    let v: Value = serde_json::from_str(raw.trim()).context("invalid results json")?;
    parse_results_value(&v)
}

pub fn parse_results_value(v: &Value) -> Result<Dataset> {
    let obj = v
        .as_object()
        .context("results document must be a json object")?;

    let mut dataset = Dataset::new();
    for (key, value) in obj {
        let Some(week) = week_number_from_key(key) else {
            continue;
        };
        let Some(entries) = value.as_array() else {
            continue;
        };
        let matches: Vec<Match> = entries
            .iter()
            .filter_map(|entry| parse_match(entry, &mut dataset))
            .collect();
        dataset.insert_week(week, matches);
    }
    Ok(dataset)
}

/// Emit the canonical wire shape consumed by [`parse_results_value`].
pub fn to_results_value(dataset: &Dataset) -> Value {
    let mut obj = Map::new();
    for week in dataset.week_numbers() {
        let entries: Vec<Value> = dataset.week(week).iter().map(match_to_value).collect();
        obj.insert(format!("week{week}"), Value::Array(entries));
    }
    Value::Object(obj)
}

fn match_to_value(m: &Match) -> Value {
    let mut obj = Map::new();
    match m {
        Match::Pairing {
            home,
            away,
            home_score,
            away_score,
        } => {
            obj.insert("home".to_string(), Value::String(home.clone()));
            obj.insert("away".to_string(), Value::String(away.clone()));
            if let Some(h) = home_score {
                obj.insert("homeScore".to_string(), Value::from(*h));
            }
            if let Some(a) = away_score {
                obj.insert("awayScore".to_string(), Value::from(*a));
            }
        }
        Match::Bye { team, score } => {
            obj.insert("byeTeam".to_string(), Value::String(team.clone()));
            if let Some(s) = score {
                obj.insert("byeScore".to_string(), Value::from(*s));
            }
        }
    }
    Value::Object(obj)
}

fn week_number_from_key(key: &str) -> Option<u32> {
    let rest = key.strip_prefix("week")?;
    let week = rest.parse::<u32>().ok()?;
    if week == 0 { None } else { Some(week) }
}

fn parse_match(v: &Value, dataset: &mut Dataset) -> Option<Match> {
    // Byes are written either as {"byeTeam": ..} or the short {"bye": ..}.
    if let Some(team) = v
        .get("byeTeam")
        .or_else(|| v.get("bye"))
        .and_then(|x| x.as_str())
    {
        let team = dataset.register_team(team);
        if team.is_empty() {
            return None;
        }
        return Some(Match::Bye {
            team,
            score: v.get("byeScore").and_then(parse_score),
        });
    }

    let home = dataset.register_team(v.get("home")?.as_str()?);
    let away = dataset.register_team(v.get("away")?.as_str()?);
    if home.is_empty() || away.is_empty() {
        return None;
    }
    Some(Match::Pairing {
        home,
        away,
        home_score: v.get("homeScore").and_then(parse_score),
        away_score: v.get("awayScore").and_then(parse_score),
    })
}

/// Scores arrive as numbers, but uploads have produced strings too.
/// Anything that is not a non-negative integer is treated as missing.
fn parse_score(v: &Value) -> Option<u32> {
    match v {
        Value::Number(n) => n.as_u64().and_then(|x| u32::try_from(x).ok()),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s == "-" {
                return None;
            }
            s.parse::<u32>().ok()
        }
        _ => None,
    }
}

/// Primary-league membership: the teams eligible for the main table.
#[derive(Debug, Clone)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    pub manager: String,
    pub team: String,
}

impl Roster {
    pub fn from_entries(raw: Vec<RosterEntry>) -> Self {
        let mut entries = Vec::with_capacity(raw.len());
        let mut index = HashMap::with_capacity(raw.len());
        for entry in raw {
            let canon = canon_team(&entry.team);
            if canon.is_empty() || index.contains_key(&canon) {
                continue;
            }
            index.insert(canon, entries.len());
            entries.push(entry);
        }
        Self { entries, index }
    }

    pub fn from_team_names(names: &[&str]) -> Self {
        Self::from_entries(
            names
                .iter()
                .map(|name| RosterEntry {
                    manager: String::new(),
                    team: (*name).to_string(),
                })
                .collect(),
        )
    }

    pub fn parse_json(raw: &str) -> Result<Self> {
        let entries: Vec<RosterEntry> =
            serde_json::from_str(raw.trim()).context("invalid roster json")?;
        Ok(Self::from_entries(entries))
    }

    pub fn contains(&self, canon: &str) -> bool {
        self.index.contains_key(canon)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Roster spelling for a canonical id, when the team is a member.
    pub fn display_name<'a>(&'a self, canon: &'a str) -> &'a str {
        match self.index.get(canon) {
            Some(idx) => self.entries[*idx].team.as_str(),
            None => canon,
        }
    }

    pub fn manager_of(&self, canon: &str) -> Option<&str> {
        self.index
            .get(canon)
            .map(|idx| self.entries[*idx].manager.as_str())
    }
}

static SEED_ROSTER: Lazy<Roster> = Lazy::new(|| {
    Roster::parse_json(include_str!("../assets/teams.json")).expect("bundled teams.json is valid")
});

static SEED_RESULTS: Lazy<Dataset> = Lazy::new(|| {
    parse_results_json(include_str!("../assets/results.json"))
        .expect("bundled results.json is valid")
});

static SEED_FIXTURES: Lazy<Dataset> = Lazy::new(|| {
    parse_results_json(include_str!("../assets/fixtures.json"))
        .expect("bundled fixtures.json is valid")
});

pub fn seed_roster() -> &'static Roster {
    &SEED_ROSTER
}

pub fn seed_results() -> &'static Dataset {
    &SEED_RESULTS
}

pub fn seed_fixtures() -> &'static Dataset {
    &SEED_FIXTURES
}

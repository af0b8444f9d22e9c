use std::collections::VecDeque;

use crate::dataset::{Dataset, Roster};
use crate::fixtures::{self, FixtureLine};
use crate::form;
use crate::overall::{self, OverallStanding};
use crate::standings::{self, StandingRow};

pub const DEFAULT_CURRENT_WEEK: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    League,
    Overall,
    Fixtures,
}

pub fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Dashboard => "Dashboard",
        Tab::League => "Chumpions League",
        Tab::Overall => "Overall League",
        Tab::Fixtures => "Fixtures",
    }
}

/// The authoritative latest completed week. Configuration-owned: read from
/// the environment, never inferred from whatever data happens to be loaded.
pub fn current_week_from_env() -> u32 {
    std::env::var("TFF_CURRENT_WEEK")
        .ok()
        .and_then(|val| val.parse::<u32>().ok())
        .unwrap_or(DEFAULT_CURRENT_WEEK)
        .max(1)
}

#[derive(Debug)]
pub struct AppState {
    pub tab: Tab,
    pub current_week: u32,
    pub fixture_week: u32,
    pub selected: usize,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
    pub roster: Roster,
    pub fixtures: Dataset,
    pub results: Dataset,
    pub override_active: bool,
}

impl AppState {
    pub fn new(
        roster: Roster,
        fixtures: Dataset,
        results: Dataset,
        override_active: bool,
        current_week: u32,
    ) -> Self {
        let fixture_week = current_week.min(fixtures.last_week()).max(1);
        Self {
            tab: Tab::Dashboard,
            current_week,
            fixture_week,
            selected: 0,
            help_overlay: false,
            logs: VecDeque::with_capacity(200),
            roster,
            fixtures,
            results,
            override_active,
        }
    }

    // Every table below is recomputed from the dataset on demand; nothing
    // here caches derived rows.

    pub fn league_rows(&self) -> Vec<StandingRow> {
        standings::league_table(&self.results, &self.roster, self.current_week)
    }

    pub fn overall_rows(&self) -> Vec<OverallStanding> {
        overall::current_with_movement(&self.results, self.current_week)
    }

    pub fn form_for(&self, team: &str) -> String {
        form::recent_form(&self.results, team, self.current_week)
    }

    pub fn fixture_lines(&self) -> Vec<FixtureLine> {
        fixtures::week_fixture_lines(&self.fixtures, &self.results, self.fixture_week)
    }

    pub fn share_text(&self) -> String {
        fixtures::build_share_text(
            &self.fixtures,
            &self.results,
            &self.roster,
            self.fixture_week,
        )
    }

    pub fn league_leader(&self) -> Option<String> {
        self.league_rows()
            .first()
            .map(|row| self.display_name(&row.team).to_string())
    }

    pub fn overall_leader(&self) -> Option<String> {
        self.overall_rows()
            .first()
            .map(|row| self.display_name(&row.team).to_string())
    }

    pub fn display_name<'a>(&'a self, canon: &'a str) -> &'a str {
        if self.roster.contains(canon) {
            self.roster.display_name(canon)
        } else {
            self.results.display_name(canon)
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.selected = 0;
        }
    }

    pub fn next_tab(&mut self) {
        self.set_tab(match self.tab {
            Tab::Dashboard => Tab::League,
            Tab::League => Tab::Overall,
            Tab::Overall => Tab::Fixtures,
            Tab::Fixtures => Tab::Dashboard,
        });
    }

    pub fn prev_tab(&mut self) {
        self.set_tab(match self.tab {
            Tab::Dashboard => Tab::Fixtures,
            Tab::League => Tab::Dashboard,
            Tab::Overall => Tab::League,
            Tab::Fixtures => Tab::Overall,
        });
    }

    fn row_count(&self) -> usize {
        match self.tab {
            Tab::League => self.league_rows().len(),
            Tab::Overall => self.overall_rows().len(),
            Tab::Dashboard | Tab::Fixtures => 0,
        }
    }

    pub fn select_next(&mut self) {
        let total = self.row_count();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.row_count();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn fixture_week_next(&mut self) {
        let weeks = self.fixtures.week_numbers();
        if weeks.is_empty() {
            return;
        }
        let pos = weeks.iter().position(|w| *w == self.fixture_week);
        self.fixture_week = match pos {
            Some(idx) => weeks[(idx + 1) % weeks.len()],
            None => weeks[0],
        };
    }

    pub fn fixture_week_prev(&mut self) {
        let weeks = self.fixtures.week_numbers();
        if weeks.is_empty() {
            return;
        }
        let pos = weeks.iter().position(|w| *w == self.fixture_week);
        self.fixture_week = match pos {
            Some(0) | None => weeks[weeks.len() - 1],
            Some(idx) => weeks[idx - 1],
        };
    }

    /// Swap in a freshly merged results dataset (e.g. after the override
    /// file changed on disk).
    pub fn set_results(&mut self, results: Dataset, override_active: bool) {
        self.results = results;
        self.override_active = override_active;
        self.selected = 0;
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

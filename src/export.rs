use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::dataset::{Dataset, Roster};
use crate::form;
use crate::overall;
use crate::standings;

pub struct ExportSummary {
    pub league_rows: usize,
    pub overall_rows: usize,
}

pub fn default_export_path(week: u32) -> PathBuf {
    PathBuf::from(format!(
        "tff_standings_w{week}_{}.xlsx",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

/// Write the week-`week` league table and overall ranking to a workbook,
/// one sheet each.
pub fn export_week_tables(
    path: &Path,
    roster: &Roster,
    results: &Dataset,
    week: u32,
) -> Result<ExportSummary> {
    let league = standings::league_table(results, roster, week);
    let overall = overall::current_with_movement(results, week);

    let mut league_rows = vec![vec![
        "Pos".to_string(),
        "Team".to_string(),
        "Manager".to_string(),
        "P".to_string(),
        "W".to_string(),
        "D".to_string(),
        "L".to_string(),
        "PF".to_string(),
        "PA".to_string(),
        "GD".to_string(),
        "Pts".to_string(),
        "Form".to_string(),
    ]];
    for (idx, row) in league.iter().enumerate() {
        league_rows.push(vec![
            (idx + 1).to_string(),
            roster.display_name(&row.team).to_string(),
            roster.manager_of(&row.team).unwrap_or_default().to_string(),
            row.played.to_string(),
            row.won.to_string(),
            row.drawn.to_string(),
            row.lost.to_string(),
            row.points_for.to_string(),
            row.points_against.to_string(),
            row.goal_diff().to_string(),
            row.points.to_string(),
            form::recent_form(results, &row.team, week),
        ]);
    }

    let mut overall_rows = vec![vec![
        "Pos".to_string(),
        "Team".to_string(),
        "Season Points".to_string(),
        "Move".to_string(),
    ]];
    for row in &overall {
        overall_rows.push(vec![
            row.position.to_string(),
            display_name(roster, results, &row.team).to_string(),
            row.cumulative_points.to_string(),
            format!("{:+}", row.delta),
        ]);
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("League")?;
        write_rows(sheet, &league_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Overall")?;
        write_rows(sheet, &overall_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportSummary {
        league_rows: league.len(),
        overall_rows: overall.len(),
    })
}

/// Roster spelling when the team is a member, first-seen dataset spelling
/// otherwise. The overall sheet spans teams outside the roster.
pub fn display_name<'a>(roster: &'a Roster, results: &'a Dataset, canon: &'a str) -> &'a str {
    if roster.contains(canon) {
        roster.display_name(canon)
    } else {
        results.display_name(canon)
    }
}

fn write_rows(sheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            sheet.write_string(r as u32, c as u16, cell)?;
        }
    }
    Ok(())
}

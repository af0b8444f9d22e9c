use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use tff_terminal::dataset;
use tff_terminal::export;
use tff_terminal::fixtures::FixtureLine;
use tff_terminal::state::{self, AppState, Tab, tab_label};
use tff_terminal::store;

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(state: AppState) -> Self {
        Self {
            state,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.set_tab(Tab::Dashboard),
            KeyCode::Char('2') => self.state.set_tab(Tab::League),
            KeyCode::Char('3') => self.state.set_tab(Tab::Overall),
            KeyCode::Char('4') => self.state.set_tab(Tab::Fixtures),
            KeyCode::Tab => self.state.next_tab(),
            KeyCode::BackTab => self.state.prev_tab(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('h') | KeyCode::Left => {
                if self.state.tab == Tab::Fixtures {
                    self.state.fixture_week_prev();
                }
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if self.state.tab == Tab::Fixtures {
                    self.state.fixture_week_next();
                }
            }
            KeyCode::Char('e') | KeyCode::Char('E') => self.export_tables(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload_results(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn export_tables(&mut self) {
        let path = export::default_export_path(self.state.current_week);
        match export::export_week_tables(
            &path,
            &self.state.roster,
            &self.state.results,
            self.state.current_week,
        ) {
            Ok(summary) => self.state.push_log(format!(
                "[INFO] Exported {} league + {} overall rows to {}",
                summary.league_rows,
                summary.overall_rows,
                path.display()
            )),
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err}")),
        }
    }

    fn reload_results(&mut self) {
        let override_weeks = store::load_override();
        let override_active = override_weeks.is_some();
        let merged = store::effective_results(dataset::seed_results(), override_weeks.as_ref());
        self.state.set_results(merged, override_active);
        self.state.push_log(if override_active {
            "[INFO] Results reloaded (local override active)"
        } else {
            "[INFO] Results reloaded (seed data only)"
        });
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let override_weeks = store::load_override();
    let override_active = override_weeks.is_some();
    let results = store::effective_results(dataset::seed_results(), override_weeks.as_ref());

    let mut app = App::new(AppState::new(
        dataset::seed_roster().clone(),
        dataset::seed_fixtures().clone(),
        results,
        override_active,
        state::current_week_from_env(),
    ));
    app.state.push_log(format!(
        "[INFO] Season loaded: {} teams, week {}",
        app.state.roster.len(),
        app.state.current_week
    ));
    if override_active {
        app.state.push_log("[INFO] Local results override active");
    }

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.tab {
        Tab::Dashboard => render_dashboard(frame, chunks[1], &app.state),
        Tab::League => render_league(frame, chunks[1], &app.state),
        Tab::Overall => render_overall(frame, chunks[1], &app.state),
        Tab::Fixtures => render_fixtures(frame, chunks[1], &app.state),
    }

    let footer =
        Paragraph::new(footer_text(&app.state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let source = if state.override_active {
        "override"
    } else {
        "seed"
    };
    let line1 = format!(
        "  .-.  TFF PORTAL | {} | Week {} | Data: {source}",
        tab_label(state.tab),
        state.current_week
    );
    let line2 = " /___\\".to_string();
    let line3 = "  |_|".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    match state.tab {
        Tab::Fixtures => {
            "1-4 Tabs | Tab Cycle | h/l Week | e Export | r Reload | ? Help | q Quit".to_string()
        }
        Tab::League | Tab::Overall => {
            "1-4 Tabs | Tab Cycle | j/k Move | e Export | r Reload | ? Help | q Quit".to_string()
        }
        Tab::Dashboard => {
            "1-4 Tabs | Tab Cycle | e Export | r Reload | ? Help | q Quit".to_string()
        }
    }
}

fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    let highlight_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(sections[0]);

    let overall_leader = state.overall_leader().unwrap_or_else(|| "—".to_string());
    let league_leader = state.league_leader().unwrap_or_else(|| "—".to_string());

    let overall_box = Paragraph::new(format!("\n  {overall_leader}"))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Overall Leader"));
    frame.render_widget(overall_box, highlight_cols[0]);

    let league_box = Paragraph::new(format!("\n  {league_leader}"))
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Chumpions League Leader"),
        );
    frame.render_widget(league_box, highlight_cols[1]);

    let info = Paragraph::new(format!(
        "  {} managers | {} teams in the primary league | 4 competitions",
        state.roster.len(),
        state.roster.len()
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(info, sections[1]);

    let log_lines: Vec<String> = state
        .logs
        .iter()
        .rev()
        .take(sections[2].height.saturating_sub(2) as usize)
        .cloned()
        .collect();
    let console = Paragraph::new(log_lines.join("\n"))
        .block(Block::default().borders(Borders::ALL).title("Console"));
    frame.render_widget(console, sections[2]);
}

fn render_league(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = league_columns();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(sections[0]);
    let head_style = Style::default().add_modifier(Modifier::BOLD);
    for (idx, title) in [
        "Pos", "Team", "Manager", "P", "W", "D", "L", "PF", "PA", "GD", "Pts", "Form",
    ]
    .iter()
    .enumerate()
    {
        render_cell_text(frame, cols[idx], title, head_style);
    }

    let rows = state.league_rows();
    let list_area = sections[1];
    if rows.is_empty() {
        let empty = Paragraph::new("No completed matches yet")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.selected, rows.len(), visible);
    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let row = &rows[idx];
        let manager = state.roster.manager_of(&row.team).unwrap_or("-");
        render_cell_text(frame, cols[0], &format!("{}", idx + 1), row_style);
        render_cell_text(frame, cols[1], state.display_name(&row.team), row_style);
        render_cell_text(frame, cols[2], manager, row_style);
        render_cell_text(frame, cols[3], &row.played.to_string(), row_style);
        render_cell_text(frame, cols[4], &row.won.to_string(), row_style);
        render_cell_text(frame, cols[5], &row.drawn.to_string(), row_style);
        render_cell_text(frame, cols[6], &row.lost.to_string(), row_style);
        render_cell_text(frame, cols[7], &row.points_for.to_string(), row_style);
        render_cell_text(frame, cols[8], &row.points_against.to_string(), row_style);
        render_cell_text(frame, cols[9], &row.goal_diff().to_string(), row_style);
        render_cell_text(
            frame,
            cols[10],
            &row.points.to_string(),
            row_style.add_modifier(Modifier::BOLD),
        );
        render_cell_text(
            frame,
            cols[11],
            &state.form_for(&row.team),
            row_style.fg(Color::Cyan),
        );
    }
}

fn render_overall(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = overall_columns();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(sections[0]);
    let head_style = Style::default().add_modifier(Modifier::BOLD);
    for (idx, title) in ["Pos", "Team", "Season Pts", "Move"].iter().enumerate() {
        render_cell_text(frame, cols[idx], title, head_style);
    }

    let rows = state.overall_rows();
    let list_area = sections[1];
    if rows.is_empty() {
        let empty =
            Paragraph::new("No scores recorded yet").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.selected, rows.len(), visible);
    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let row = &rows[idx];
        let (move_text, move_style) = match row.delta {
            d if d > 0 => (format!("+{d}"), row_style.fg(Color::Green)),
            d if d < 0 => (format!("{d}"), row_style.fg(Color::Red)),
            _ => ("·".to_string(), row_style.fg(Color::DarkGray)),
        };
        render_cell_text(frame, cols[0], &row.position.to_string(), row_style);
        render_cell_text(frame, cols[1], state.display_name(&row.team), row_style);
        render_cell_text(
            frame,
            cols[2],
            &row.cumulative_points.to_string(),
            row_style.add_modifier(Modifier::BOLD),
        );
        render_cell_text(frame, cols[3], &move_text, move_style);
    }
}

fn render_fixtures(frame: &mut Frame, area: Rect, state: &AppState) {
    let lines = state.fixture_lines();
    let share_height = (lines.len() as u16 + 3).min(area.height / 2);
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(share_height),
        ])
        .split(area);

    let selector = Paragraph::new(format!(
        "Week {} of {} (h/l to change)",
        state.fixture_week,
        state.fixtures.last_week()
    ))
    .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(selector, sections[0]);

    if lines.is_empty() {
        let empty = Paragraph::new("No fixtures for this week")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, sections[1]);
    } else {
        let mut rendered = Vec::with_capacity(lines.len());
        for line in &lines {
            match line {
                FixtureLine::Bye { team } => {
                    rendered.push(format!("  BYE: {}", state.display_name(team)));
                }
                FixtureLine::Tie {
                    home,
                    away,
                    result: Some((hs, aws)),
                } => rendered.push(format!(
                    "  {} {hs}–{aws} {}",
                    state.display_name(home),
                    state.display_name(away)
                )),
                FixtureLine::Tie {
                    home,
                    away,
                    result: None,
                } => rendered.push(format!(
                    "  {} vs {}  —",
                    state.display_name(home),
                    state.display_name(away)
                )),
            }
        }
        let list = Paragraph::new(rendered.join("\n"));
        frame.render_widget(list, sections[1]);
    }

    let share = Paragraph::new(state.share_text())
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL).title("Share text"));
    frame.render_widget(share, sections[2]);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 56.min(area.width);
    let height = 12.min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, popup);
    let help = Paragraph::new(
        "1 Dashboard   2 Chumpions League\n\
         3 Overall     4 Fixtures\n\
         Tab / Shift-Tab  cycle tabs\n\
         j/k or arrows    move selection\n\
         h/l              fixture week\n\
         e                export tables to xlsx\n\
         r                reload results override\n\
         ?                toggle this help\n\
         q                quit",
    )
    .block(Block::default().borders(Borders::ALL).title("Keys"));
    frame.render_widget(help, popup);
}

fn league_columns() -> [Constraint; 12] {
    [
        Constraint::Length(5),
        Constraint::Min(22),
        Constraint::Length(10),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(7),
    ]
}

fn overall_columns() -> [Constraint; 4] {
    [
        Constraint::Length(5),
        Constraint::Min(26),
        Constraint::Length(12),
        Constraint::Length(6),
    ]
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let cell = Paragraph::new(text.to_string()).style(style);
    frame.render_widget(cell, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if visible == 0 || total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }
    let half = visible / 2;
    let start = selected.saturating_sub(half).min(total - visible);
    (start, start + visible)
}

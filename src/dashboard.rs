use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

use crate::analysis::AnalysisReport;
use crate::ats::Severity;
use crate::report::{format_score, NO_MATCHED_SKILLS, NO_MISSING_SKILLS, NO_RESUME_SKILLS};
use crate::scoring::MatchBand;

#[derive(Debug, Default)]
struct DashboardState {
    show_text: bool,
    scroll: u16,
}

pub fn run_dashboard(report: &AnalysisReport) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, report);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, report: &AnalysisReport) -> io::Result<()> {
    let mut state = DashboardState::default();
    loop {
        terminal.draw(|f| ui(f, report, &state))?;

        if event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('t') => {
                        state.show_text = !state.show_text;
                        state.scroll = 0;
                    }
                    KeyCode::Down if state.show_text => state.scroll = state.scroll.saturating_add(1),
                    KeyCode::Up if state.show_text => state.scroll = state.scroll.saturating_sub(1),
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

fn band_color(band: MatchBand) -> Color {
    match band {
        MatchBand::Weak => Color::Red,
        MatchBand::Medium => Color::Yellow,
        MatchBand::Strong => Color::Green,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Pass => Color::Green,
    }
}

fn ui(f: &mut Frame, report: &AnalysisReport, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // score gauge
            Constraint::Length(1), // band message
            Constraint::Min(8),    // skills + chart, or full text
            Constraint::Length(8), // summary + ATS
            Constraint::Length(1), // key help
        ])
        .split(f.size());

    let color = band_color(report.band);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("AI Match Score"))
        .gauge_style(Style::default().fg(color))
        .ratio((report.match_score / 100.0).clamp(0.0, 1.0))
        .label(format_score(report.match_score));
    f.render_widget(gauge, rows[0]);

    let band = Paragraph::new(report.band.message()).style(Style::default().fg(color));
    f.render_widget(band, rows[1]);

    if state.show_text {
        let text = Paragraph::new(report.resume_text.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Full Extracted Resume Text"),
            )
            .wrap(Wrap { trim: false })
            .scroll((state.scroll, 0));
        f.render_widget(text, rows[2]);
    } else {
        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[2]);
        render_skills(f, report, middle[0]);
        render_chart(f, report, middle[1]);
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[3]);
    let summary = Paragraph::new(report.summary.as_str())
        .block(Block::default().borders(Borders::ALL).title("Resume Summary"))
        .wrap(Wrap { trim: true });
    f.render_widget(summary, bottom[0]);

    let findings: Vec<ListItem> = report
        .ats_findings
        .iter()
        .map(|finding| {
            ListItem::new(finding.to_string())
                .style(Style::default().fg(severity_color(finding.severity())))
        })
        .collect();
    let ats = List::new(findings).block(
        Block::default()
            .borders(Borders::ALL)
            .title("ATS Compatibility Check"),
    );
    f.render_widget(ats, bottom[1]);

    let help = Paragraph::new("q: quit   t: toggle resume text   up/down: scroll text")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, rows[4]);
}

fn render_skills(f: &mut Frame, report: &AnalysisReport, area: Rect) {
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let section = |title: &'static str, skills: &[String], empty: &'static str| {
        let body = if skills.is_empty() {
            empty.to_string()
        } else {
            skills.join(", ")
        };
        vec![
            Line::from(Span::styled(title, heading)),
            Line::from(body),
            Line::from(""),
        ]
    };

    let mut lines = section("Skills in Resume", &report.resume_skills, NO_RESUME_SKILLS);
    lines.extend(section(
        "Matched Skills (Resume & JD)",
        &report.skill_gap.matched,
        NO_MATCHED_SKILLS,
    ));
    lines.extend(section(
        "Missing Skills (from JD)",
        &report.skill_gap.missing,
        NO_MISSING_SKILLS,
    ));

    let skills = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Extracted Skills"))
        .wrap(Wrap { trim: true });
    f.render_widget(skills, area);
}

fn render_chart(f: &mut Frame, report: &AnalysisReport, area: Rect) {
    let bars = [
        Bar::default()
            .value(report.skill_gap.matched.len() as u64)
            .label("Matched".into())
            .style(Style::default().fg(Color::Green)),
        Bar::default()
            .value(report.skill_gap.missing.len() as u64)
            .label("Missing".into())
            .style(Style::default().fg(Color::Red)),
    ];
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Resume vs Job Description Skills"),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(3);
    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tests::{sample_resume, stub_analyzer};
    use ratatui::backend::TestBackend;

    fn render(report: &AnalysisReport, state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| ui(f, report, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_overview_shows_every_panel() {
        let analyzer = stub_analyzer(&["python", "sql", "java"]);
        let report = analyzer
            .analyze(sample_resume(), "Looking for Python and Java developer.")
            .unwrap();
        let screen = render(&report, &DashboardState::default());

        assert!(screen.contains("AI Match Score"));
        assert!(screen.contains(&format_score(report.match_score)));
        assert!(screen.contains("Matched Skills (Resume & JD)"));
        assert!(screen.contains("Resume vs Job Description Skills"));
        assert!(screen.contains("Matched"));
        assert!(screen.contains("Missing"));
        assert!(screen.contains("ATS-friendly formatting detected."));
        assert!(!screen.contains("Full Extracted Resume Text"));
    }

    #[test]
    fn test_text_toggle_replaces_skills_panel() {
        let analyzer = stub_analyzer(&["python"]);
        let report = analyzer.analyze(sample_resume(), "Python").unwrap();
        let state = DashboardState {
            show_text: true,
            scroll: 0,
        };
        let screen = render(&report, &state);

        assert!(screen.contains("Full Extracted Resume Text"));
        assert!(screen.contains("Experienced with Python"));
        assert!(!screen.contains("Extracted Skills"));
    }
}

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table},
    Frame,
};
use time_humanize::{Accuracy, HumanTime, Tense};

use keytrainer::attempt_log::LogEntry;
use keytrainer::navigation::{MenuItem, StatsView};

use super::charting::{compute_chart_params, format_label};
use super::render_menu;

/// How long ago `recorded_at` was, in words
pub fn humanize_age(recorded_at: DateTime<Local>, now: DateTime<Local>) -> String {
    let age = (now - recorded_at).to_std().unwrap_or_default();
    HumanTime::from(age).to_text_en(Accuracy::Rough, Tense::Past)
}

/// Pure presenter for a single history row
pub fn present_row(index: usize, entry: &LogEntry, now: DateTime<Local>) -> Row<'static> {
    let accuracy_color = if entry.accuracy_pct >= 98.0 {
        Color::Green
    } else if entry.accuracy_pct >= 90.0 {
        Color::Yellow
    } else {
        Color::Red
    };

    Row::new(vec![
        Cell::from(format!("{}", index + 1)),
        Cell::from(format!("{} sec", entry.time_limit_seconds)),
        Cell::from(format!("{} wpm", entry.speed_wpm)),
        Cell::from(format!("{}%", entry.accuracy_pct)).style(Style::default().fg(accuracy_color)),
        Cell::from(humanize_age(entry.recorded_at, now))
            .style(Style::default().add_modifier(Modifier::DIM)),
    ])
}

pub fn render_history(view: &StatsView, items: &[MenuItem], f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(14), // Table
            Constraint::Min(0),     // Chart
            Constraint::Length(3),  // Menu
        ])
        .split(f.area());

    let title_text = format!("Last {} attempts:", view.entries.len().max(1));
    let title = Paragraph::new(title_text)
        .block(Block::default().borders(Borders::ALL).title("Statistics"))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    if view.entries.is_empty() {
        let no_data = Paragraph::new("No attempts recorded yet.\nFinish an attempt to see it here!")
            .block(Block::default().borders(Borders::ALL).title("No Data"))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(no_data, chunks[1]);
    } else {
        let now = Local::now();
        let header = Row::new(vec!["#", "Time", "Speed", "Accuracy", "When"]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        let rows: Vec<Row> = view
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| present_row(i, entry, now))
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(10),
                Constraint::Length(14),
                Constraint::Length(12),
                Constraint::Min(16),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("History"));
        f.render_widget(table, chunks[1]);

        render_speed_chart(&view.entries, chunks[2], f);
    }

    render_menu(items, view.menu.cursor, chunks[3], f);
}

fn render_speed_chart(entries: &[LogEntry], area: Rect, f: &mut Frame) {
    let points: Vec<(f64, f64)> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| ((i + 1) as f64, e.speed_wpm))
        .collect();
    let (x_max, y_max) = compute_chart_params(&points);
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let datasets = vec![Dataset::default()
        .marker(Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title("Speed"))
        .x_axis(
            Axis::default()
                .title("attempt")
                .bounds([1.0, x_max])
                .labels(vec![
                    Span::styled("1", bold_style),
                    Span::styled(format_label(x_max), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(format_label(y_max), bold_style),
                ]),
        );

    f.render_widget(chart, area);
}

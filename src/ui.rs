pub mod charting;
pub mod history;
pub mod screen;

use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use keytrainer::{
    attempt::Phase,
    navigation::{
        AttemptView, MenuItem, Navigator, PathPrompt, PathPurpose, ResultView, TaskForm,
        FORM_FIELDS,
    },
    task::Task,
};

const HORIZONTAL_MARGIN: u16 = 5;

pub fn draw(nav: &Navigator, f: &mut Frame) {
    screen::current_screen(nav.screen()).render(nav, f);
}

/// `mm:ss.zzz`
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    format!(
        "{:02}:{:02}.{:03}",
        millis / 60_000,
        (millis / 1000) % 60,
        millis % 1000
    )
}

/// Longest suffix of `s` that fits in `width` terminal columns
pub fn tail_to_width(s: &str, width: usize) -> String {
    let mut used = 0;
    let mut tail: Vec<char> = Vec::new();
    for c in s.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        tail.push(c);
    }
    tail.into_iter().rev().collect()
}

/// Longest prefix of `s` that fits in `width` terminal columns
pub fn head_to_width(s: &str, width: usize) -> String {
    let mut used = 0;
    s.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}

/// Vertically centered band of `height` rows
fn centered(area: Rect, height: u16) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    chunks[1]
}

fn menu_lines(items: &[MenuItem], cursor: usize) -> Vec<Line<'static>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut style = Style::default();
            if item.event.is_none() {
                style = style.add_modifier(Modifier::DIM);
            }
            if i == cursor {
                Line::from(Span::styled(
                    format!("> {} <", item.label),
                    style.add_modifier(Modifier::BOLD | Modifier::REVERSED),
                ))
            } else {
                Line::from(Span::styled(item.label.clone(), style))
            }
        })
        .collect()
}

pub fn render_menu(items: &[MenuItem], cursor: usize, area: Rect, f: &mut Frame) {
    let menu = Paragraph::new(menu_lines(items, cursor)).alignment(Alignment::Center);
    f.render_widget(menu, area);
}

fn title_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn hint_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    ))
}

pub fn render_menu_screen(title: &str, items: &[MenuItem], cursor: usize, f: &mut Frame) {
    let mut lines = vec![title_line(title), Line::default()];
    lines.extend(menu_lines(items, cursor));
    lines.push(Line::default());
    lines.push(hint_line("(↑/↓) move / (enter) select / (esc) back"));

    let area = centered(f.area(), lines.len() as u16);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

pub fn render_task_form(form: &TaskForm, buttons: &[MenuItem], f: &mut Frame) {
    let field = |label: &str, value: &str, focused: bool| {
        let style = if focused {
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(format!("{:<6}", value), style),
        ])
    };

    let button_cursor = form.focus.checked_sub(FORM_FIELDS).unwrap_or(usize::MAX);
    let mut lines = vec![
        title_line("Create task"),
        Line::default(),
        field("speed (wpm)", &form.speed, form.focus == 0),
        field("time (sec) ", &form.time, form.focus == 1),
        Line::default(),
    ];
    lines.extend(menu_lines(buttons, button_cursor));
    lines.push(Line::default());
    lines.push(hint_line("(tab) next / digits to edit / (enter) confirm / (esc) back"));

    let area = centered(f.area(), lines.len() as u16);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

pub fn render_path_prompt(prompt: &PathPrompt, f: &mut Frame) {
    let title = match prompt.purpose {
        PathPurpose::Load => "Open task file",
        PathPurpose::Save { .. } => "Save the task",
    };

    let area = centered(f.area(), 5);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(2)])
        .split(area);

    let input = Paragraph::new(format!("{}▏", prompt.input))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, chunks[0]);

    let hint = Paragraph::new(hint_line("(enter) confirm / (esc) cancel")).alignment(Alignment::Center);
    f.render_widget(hint, chunks[1]);
}

pub fn render_task_info(task: &Task, items: &[MenuItem], cursor: usize, f: &mut Frame) {
    let mut lines = vec![
        title_line("Task:"),
        Line::default(),
        Line::from(format!("Speed: {} wpm", task.target_speed_wpm)),
        Line::from(format!("Time: {} sec", task.time_limit_seconds)),
        Line::default(),
    ];
    lines.extend(menu_lines(items, cursor));

    let area = centered(f.area(), lines.len() as u16);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

pub fn render_attempt(view: &AttemptView, items: &[MenuItem], f: &mut Frame) {
    let attempt = &view.attempt;
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = bold_style.add_modifier(Modifier::DIM);

    if let Some(secs) = attempt.countdown_secs() {
        let area = centered(f.area(), 1);
        let countdown = Paragraph::new(Span::styled(
            secs.to_string(),
            bold_style.fg(Color::Yellow),
        ))
        .alignment(Alignment::Center);
        f.render_widget(countdown, area);
        return;
    }

    if attempt.phase() == Phase::Paused {
        let mut lines = vec![
            title_line("pause"),
            Line::from(Span::styled(format_elapsed(attempt.elapsed()), dim_bold_style)),
            Line::default(),
        ];
        lines.extend(menu_lines(items, view.menu.cursor));

        let area = centered(f.area(), lines.len() as u16);
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
        return;
    }

    let area = centered(f.area(), 7);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // timer
            Constraint::Length(1),
            Constraint::Length(1), // text
            Constraint::Length(1),
            Constraint::Length(1), // mistakes
            Constraint::Length(1),
            Constraint::Length(1), // hint
        ])
        .split(area);

    let timer = Paragraph::new(Span::styled(format_elapsed(attempt.elapsed()), dim_bold_style))
        .alignment(Alignment::Center);
    f.render_widget(timer, rows[0]);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    let typed = tail_to_width(&attempt.typed_text(), halves[0].width as usize);
    let typed_widget = Paragraph::new(Span::styled(typed, bold_style.fg(Color::Blue)))
        .alignment(Alignment::Right);
    f.render_widget(typed_widget, halves[0]);

    let remaining = head_to_width(&attempt.remaining_text(), halves[1].width as usize);
    let mut chars = remaining.chars();
    let current_style = if attempt.in_mistake() {
        bold_style.fg(Color::Gray).bg(Color::Red)
    } else {
        bold_style.fg(Color::Gray).add_modifier(Modifier::UNDERLINED)
    };
    let remaining_widget = Paragraph::new(Line::from(vec![
        Span::styled(chars.next().map(String::from).unwrap_or_default(), current_style),
        Span::styled(chars.as_str().to_string(), Style::default().fg(Color::DarkGray)),
    ]));
    f.render_widget(remaining_widget, halves[1]);

    let mistakes = Paragraph::new(Span::styled(
        format!("mistakes: {}", attempt.mistakes()),
        Style::default().fg(Color::Red),
    ))
    .alignment(Alignment::Right);
    f.render_widget(mistakes, rows[4]);

    let hint = Paragraph::new(hint_line("press enter to pause")).alignment(Alignment::Center);
    f.render_widget(hint, rows[6]);
}

pub fn render_result(view: &ResultView, items: &[MenuItem], f: &mut Frame) {
    let mut lines = vec![
        title_line("Your result:"),
        Line::default(),
        Line::from(format!("speed: {} wpm", view.score.speed_wpm)),
        Line::from(format!("accuracy: {}%", view.score.accuracy_pct)),
        Line::default(),
    ];

    match view.task_met {
        Some(true) => lines.push(Line::from(Span::styled(
            "Completed!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))),
        Some(false) => lines.push(Line::from(Span::styled(
            "Failed!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))),
        None => {}
    }
    lines.push(Line::default());
    lines.extend(menu_lines(items, view.menu.cursor));

    let area = centered(f.area(), lines.len() as u16);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use keytrainer::{
        attempt_log::AttemptLog,
        config::Config,
        language::Language,
        navigation::NavEvent,
        word_generator::TextGenerator,
    };
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::{tempdir, TempDir};

    fn create_test_navigator() -> (Navigator, TempDir) {
        let dir = tempdir().unwrap();
        let config = Config {
            countdown_secs: 0,
            ..Config::default()
        };
        let lang = Language::from_words("test", vec!["hello".into(), "world".into()]).unwrap();
        let nav = Navigator::with_generator(
            config,
            TextGenerator::new(lang, 4),
            AttemptLog::with_path(dir.path().join("attempts.csv")),
        );
        (nav, dir)
    }

    fn render_to_string(nav: &Navigator) -> String {
        let backend = TestBackend::new(80, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(nav, f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00.000");
        assert_eq!(format_elapsed(Duration::from_millis(75_250)), "01:15.250");
    }

    #[test]
    fn test_tail_and_head_to_width() {
        assert_eq!(tail_to_width("hello world", 5), "world");
        assert_eq!(head_to_width("hello world", 5), "hello");
        assert_eq!(tail_to_width("ёлка", 10), "ёлка");
        assert_eq!(head_to_width("", 3), "");
    }

    #[test]
    fn test_menu_renders_items() {
        let (nav, _dir) = create_test_navigator();
        let content = render_to_string(&nav);
        assert!(content.contains("Keyboard Trainer"));
        assert!(content.contains("statistics"));
    }

    #[test]
    fn test_attempt_renders_text_and_mistakes() {
        let (mut nav, _dir) = create_test_navigator();
        nav.navigate(NavEvent::StartTimed(15));
        let content = render_to_string(&nav);
        assert!(content.contains("mistakes: 0"));
        assert!(content.contains("press enter to pause"));
        assert!(content.contains("00:00.000"));
    }

    #[test]
    fn test_result_and_stats_render() {
        let (mut nav, _dir) = create_test_navigator();
        nav.navigate(NavEvent::StartTask(Task::new(1, 500)));
        nav.on_tick(Duration::from_secs(1));
        let content = render_to_string(&nav);
        assert!(content.contains("Your result:"));
        assert!(content.contains("Failed!"));

        nav.navigate(NavEvent::ToStats);
        let content = render_to_string(&nav);
        assert!(content.contains("History"));
    }

    #[test]
    fn test_other_screens_render() {
        let (mut nav, _dir) = create_test_navigator();
        for event in [
            NavEvent::ToTask,
            NavEvent::CreateTask,
            NavEvent::LoadTask,
            NavEvent::ShowTask(Task::new(30, 40)),
            NavEvent::ToStats,
        ] {
            nav.navigate(event);
            let content = render_to_string(&nav);
            assert!(!content.trim().is_empty());
        }
    }
}

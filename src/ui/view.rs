//! Rendering for the terminal UI.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::form::FormState;
use crate::task::{Priority, Task};
use crate::timer::format_mmss;

use super::app::{AppState, DeleteConfirmState};

const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER: Color = Color::Rgb(92, 126, 166);

// Timer color thresholds, in seconds remaining.
const TIMER_DANGER_SECS: u64 = 300;
const TIMER_WARNING_SECS: u64 = 900;

pub fn render(frame: &mut Frame, app: &AppState) {
    let area = frame.size();

    if !app.session_started {
        render_start_screen(frame, app, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(4),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    render_header(frame, app, chunks[0]);
    render_search(frame, app, chunks[1]);
    render_list(frame, app, chunks[2]);
    render_detail(frame, app, chunks[3]);
    render_footer(frame, app, chunks[4]);

    if let Some(form) = app.form.as_ref() {
        render_form_modal(frame, area, form, app.submitting());
    }
    if let Some(confirm) = app.delete_confirm.as_ref() {
        render_delete_confirm_modal(frame, area, confirm);
    }
}

fn render_start_screen(frame: &mut Frame, app: &AppState, area: Rect) {
    let task_count = app.store.list().len();
    let lines = vec![
        Line::from(Span::styled(
            "taskdeck",
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Ready to start your timed session?",
            Style::default().fg(COLOR_TEXT),
        )),
        Line::from(Span::styled(
            "Once started, the countdown runs until the time is up.",
            Style::default().fg(COLOR_MUTED),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{task_count} saved tasks will be available"),
            Style::default().fg(COLOR_MUTED),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("press ", Style::default().fg(COLOR_MUTED)),
            Span::styled(
                "s",
                Style::default()
                    .fg(COLOR_SUCCESS)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to start, ", Style::default().fg(COLOR_MUTED)),
            Span::styled("q", Style::default().fg(COLOR_ERROR)),
            Span::styled(" to quit", Style::default().fg(COLOR_MUTED)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Start Session ");
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, centered_rect(area, 60, 12));
}

fn render_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let remaining = app.timer.remaining_secs();
    let timer_style = if app.timer.is_expired() || remaining <= TIMER_DANGER_SECS {
        Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD)
    } else if remaining <= TIMER_WARNING_SECS {
        Style::default().fg(COLOR_WARNING)
    } else {
        Style::default().fg(COLOR_MUTED)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            "taskdeck",
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Time remaining: {}", format_mmss(remaining)),
            timer_style,
        ),
    ])];

    if app.timer.is_expired() {
        lines.push(Line::from(Span::styled(
            "Time's up! The session has ended; the list is read-only until reset.",
            Style::default().fg(COLOR_ERROR),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            app.task_count_summary(),
            Style::default().fg(COLOR_MUTED),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_search(frame: &mut Frame, app: &AppState, area: Rect) {
    let style = if app.search_active {
        Style::default().fg(COLOR_ACCENT)
    } else {
        Style::default().fg(COLOR_BORDER)
    };
    let mut value = app.search.raw().to_string();
    if app.search_active {
        value.push('█');
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(" Search ");
    let paragraph =
        Paragraph::new(Span::styled(value, Style::default().fg(COLOR_TEXT))).block(block);
    frame.render_widget(paragraph, area);
}

fn render_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Tasks ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.filtered.is_empty() {
        let message = if app.search.committed().is_empty() {
            "No tasks yet. Press 'a' to create your first task."
        } else {
            "No tasks match your search."
        };
        let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(COLOR_MUTED)))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, inner);
        return;
    }

    let height = inner.height as usize;
    let selected_pos = app
        .selected
        .and_then(|idx| app.filtered.iter().position(|candidate| *candidate == idx))
        .unwrap_or(0);
    let offset = selected_pos.saturating_sub(height.saturating_sub(1));

    let lines: Vec<Line> = app
        .filtered
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(pos, idx)| task_line(&app.store.list()[*idx], app, pos == selected_pos))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn task_line<'a>(task: &'a Task, app: &AppState, selected: bool) -> Line<'a> {
    let check = if task.completed { "[x]" } else { "[ ]" };
    let mut title_style = Style::default().fg(COLOR_TEXT);
    if task.completed {
        title_style = Style::default()
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::CROSSED_OUT);
    }
    if selected {
        title_style = title_style.add_modifier(Modifier::REVERSED);
    }

    let mut spans = vec![
        Span::styled(
            if selected { "> " } else { "  " },
            Style::default().fg(COLOR_ACCENT),
        ),
        Span::styled(check, Style::default().fg(COLOR_MUTED)),
        Span::raw(" "),
        Span::styled(
            format!("{:<6}", task.priority.as_str()),
            Style::default().fg(priority_color(task.priority)),
        ),
        Span::raw(" "),
        Span::styled(task.title.as_str(), title_style),
        Span::raw("  "),
        Span::styled(
            task.due_date.to_string(),
            Style::default().fg(COLOR_MUTED),
        ),
    ];

    if task.is_overdue(app.today) {
        spans.push(Span::styled(
            "  overdue",
            Style::default().fg(COLOR_ERROR),
        ));
    }

    Line::from(spans)
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => COLOR_ERROR,
        Priority::Medium => COLOR_WARNING,
        Priority::Low => COLOR_INFO,
    }
}

fn render_detail(frame: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Description ");

    let text = match app.selected_task() {
        Some(task) if !task.description.is_empty() => Span::styled(
            task.description.as_str(),
            Style::default().fg(COLOR_TEXT),
        ),
        Some(_) => Span::styled(
            "No description provided",
            Style::default().fg(COLOR_MUTED),
        ),
        None => Span::raw(""),
    };

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = match app.info_message.as_ref() {
        Some(info) => Line::from(vec![
            Span::styled(info.clone(), Style::default().fg(COLOR_INFO)),
            Span::raw("  "),
            Span::styled(app.footer_hint(), Style::default().fg(COLOR_MUTED)),
        ]),
        None => Line::from(Span::styled(
            app.footer_hint(),
            Style::default().fg(COLOR_MUTED),
        )),
    };

    frame.render_widget(Paragraph::new(line), inner);
}

fn render_form_modal(frame: &mut Frame, area: Rect, form: &FormState, submitting: bool) {
    let title = match form.mode() {
        crate::form::FormMode::Create => " Add Task ",
        crate::form::FormMode::Edit(_) => " Edit Task ",
    };

    let mut lines: Vec<Line> = Vec::new();
    for (idx, field) in form.fields().iter().enumerate() {
        let active = idx == form.active_index() && !submitting;
        let label_style = if active {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        let mut value = field.value.clone();
        if active {
            value.push('█');
        }
        let required = if field.required { "*" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}{:<12}", required, field.id.label()),
                label_style,
            ),
            Span::styled(value, Style::default().fg(COLOR_TEXT)),
        ]));
    }

    lines.push(Line::from(""));
    if submitting {
        lines.push(Line::from(Span::styled(
            "saving...",
            Style::default().fg(COLOR_WARNING),
        )));
    } else if let Some(error) = form.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(COLOR_ERROR),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "enter on the last field submits",
            Style::default().fg(COLOR_MUTED),
        )));
    }

    let height = (lines.len() + 2) as u16;
    let rect = centered_rect(area, 64, height);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_ACCENT))
        .title(title);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn render_delete_confirm_modal(frame: &mut Frame, area: Rect, confirm: &DeleteConfirmState) {
    let lines = vec![
        Line::from(Span::styled(
            format!("Delete '{}'?", confirm.title),
            Style::default().fg(COLOR_TEXT),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(COLOR_ERROR)),
            Span::styled(" confirm   ", Style::default().fg(COLOR_MUTED)),
            Span::styled("esc", Style::default().fg(COLOR_SUCCESS)),
            Span::styled(" cancel", Style::default().fg(COLOR_MUTED)),
        ]),
    ];

    let rect = centered_rect(area, 50, 5);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_ERROR))
        .title(" Delete Task ");
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

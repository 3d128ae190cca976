use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use super::app::{App, FormField, Mode, TaskForm};
use crate::model::Task;
use crate::output;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(chunks[1]);
    render_tasks(frame, app, body[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(body[1]);
    render_reminders(
        frame,
        side[0],
        " Due Soon ",
        &app.due_soon,
        "No tasks due soon",
        Color::Yellow,
        output::due_soon_message,
    );
    render_reminders(
        frame,
        side[1],
        " Expired ",
        &app.expired,
        "No expired tasks",
        Color::Red,
        output::expired_message,
    );

    render_footer(frame, app, chunks[2]);

    match app.mode {
        Mode::Help => render_help(frame),
        Mode::ConfirmDelete(id) => {
            let name = app
                .tasks
                .iter()
                .find(|t| t.id == id)
                .map(|t| t.name.as_str())
                .unwrap_or("?");
            render_confirm(frame, name);
        }
        Mode::Normal => {}
    }
    if let Some(form) = &app.form {
        render_form(frame, form);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", output::format_streak(app.streak)),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::raw(format!("  Today: {}", app.today)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn task_line<'a>(app: &App, task: &'a Task) -> Line<'a> {
    let due_style = if task.completed {
        Style::default().fg(Color::DarkGray)
    } else if app.is_expired(task.id) {
        Style::default().fg(Color::Red)
    } else if app.is_due_soon(task.id) {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let name_style = if task.completed {
        Style::default().fg(Color::DarkGray).crossed_out()
    } else {
        Style::default().bold()
    };
    let check_style = if task.completed {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(format!("[{}] ", task.icon()), check_style),
        Span::styled(format!("{:>3} ", task.id), Style::default().fg(Color::DarkGray)),
        Span::styled(task.name.as_str(), name_style),
        Span::styled(format!("  due {}", task.due_date), due_style),
    ];
    if !task.description.is_empty() {
        spans.push(Span::styled(
            format!("  {}", task.description),
            Style::default().fg(Color::Gray),
        ));
    }
    Line::from(spans)
}

fn render_tasks(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Tasks ");
    if app.tasks.is_empty() {
        frame.render_widget(
            Paragraph::new("No tasks yet. Press 'a' to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }
    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .map(|t| ListItem::new(task_line(app, t)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_reminders(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    tasks: &[Task],
    empty: &str,
    color: Color,
    message: fn(&Task) -> String,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(color));
    let text: Vec<Line> = if tasks.is_empty() {
        vec![Line::styled(empty, Style::default().fg(Color::DarkGray))]
    } else {
        tasks
            .iter()
            .map(|t| Line::styled(message(t), Style::default().fg(color)))
            .collect()
    };
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let paragraph = if let Some(err) = &app.error {
        Paragraph::new(err.as_str()).style(Style::default().fg(Color::Red))
    } else if let Some(toast) = &app.toast {
        Paragraph::new(toast.as_str()).style(Style::default().fg(Color::Green))
    } else {
        Paragraph::new("a: add  e: edit  x: done  d: delete  ?: help  q: quit")
            .style(Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(paragraph, area);
}

/// Center a rectangle within an area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn render_field(
    frame: &mut Frame,
    label: &str,
    value: &str,
    focused: bool,
    chunks: &[Rect],
    idx: &mut usize,
) {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default()
    };
    frame.render_widget(Paragraph::new(label).style(label_style), chunks[*idx]);
    *idx += 1;

    let cursor = if focused { "_" } else { "" };
    frame.render_widget(
        Paragraph::new(format!("  {value}{cursor}")).style(Style::default().fg(Color::White)),
        chunks[*idx],
    );
    *idx += 1;
}

fn render_form(frame: &mut Frame, form: &TaskForm) {
    let term = frame.area();
    let width = 70.min(term.width.saturating_sub(4));
    let content_rows: u16 = 7 + u16::from(form.error.is_some()); // 3*(label+input) + hint
    let height = (content_rows + 2).min(term.height.saturating_sub(2));
    let area = centered_rect(width, height, term);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(form.title())
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(1); 6];
    if form.error.is_some() {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1)); // hint
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let mut idx = 0;
    render_field(
        frame,
        "Name:",
        &form.name,
        form.focused == FormField::Name,
        &chunks,
        &mut idx,
    );
    render_field(
        frame,
        "Description:",
        &form.description,
        form.focused == FormField::Description,
        &chunks,
        &mut idx,
    );
    render_field(
        frame,
        "Due (YYYY-MM-DD):",
        &form.due,
        form.focused == FormField::Due,
        &chunks,
        &mut idx,
    );

    if let Some(err) = &form.error {
        frame.render_widget(
            Paragraph::new(err.as_str()).style(Style::default().fg(Color::Red)),
            chunks[idx],
        );
        idx += 1;
    }

    frame.render_widget(
        Paragraph::new("Enter: save  Tab/S-Tab: fields  C-e: editor  C-u: clear  Esc: cancel")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[idx],
    );
}

fn render_confirm(frame: &mut Frame, task_name: &str) {
    let term = frame.area();
    let width = 50.min(term.width.saturating_sub(4));
    let height = 5.min(term.height.saturating_sub(2));
    let area = centered_rect(width, height, term);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Delete ")
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = vec![
        Line::from(vec![
            Span::raw("Delete "),
            Span::styled(task_name, Style::default().bold()),
            Span::raw(" permanently?"),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Green).bold()),
            Span::raw("/"),
            Span::styled("n", Style::default().fg(Color::Red).bold()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

fn render_help(frame: &mut Frame) {
    let term = frame.area();
    let width = 46.min(term.width.saturating_sub(4));
    let height = 18.min(term.height.saturating_sub(2));
    let area = centered_rect(width, height, term);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(k, Style::default().fg(Color::Cyan)),
            Span::raw(what),
        ])
    };
    let help_text = vec![
        key("j/Down    ", "Move down"),
        key("k/Up      ", "Move up"),
        key("a         ", "Add task"),
        key("e/Enter   ", "Edit task"),
        key("x/Space   ", "Toggle completed"),
        key("d         ", "Delete task"),
        key("r         ", "Refresh"),
        key("?         ", "Toggle help"),
        key("q/Esc     ", "Quit"),
        Line::raw(""),
        Line::from(Span::styled("Task form:", Style::default().bold())),
        key("  Tab/S-Tab ", "Next/prev field"),
        key("  Enter     ", "Save"),
        key("  C-u       ", "Clear field"),
        key("  C-e       ", "Open $EDITOR for description"),
        key("  Esc       ", "Cancel"),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}

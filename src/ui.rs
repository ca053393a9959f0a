use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::config::ColumnLabels;
use crate::kanban_board::KanbanBoard;
use crate::modal::{Field, ModalMode, TaskModal, DESCRIPTION_PLACEHOLDER, TITLE_PLACEHOLDER};
use crate::task::{Status, Task};

/// One board column as it should appear on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView<'a> {
    pub status: Status,
    pub header: String,
    pub tasks: Vec<&'a Task>,
}

pub fn column_header(label: &str, count: usize) -> String {
    format!("{label} ({count})")
}

/// Group the board into its three columns, in store order.
pub fn project<'a>(board: &'a KanbanBoard, labels: &ColumnLabels) -> Vec<ColumnView<'a>> {
    let mut columns: Vec<ColumnView<'a>> = Status::ALL
        .iter()
        .map(|&status| ColumnView {
            status,
            header: String::new(),
            tasks: Vec::new(),
        })
        .collect();

    for task in board.tasks() {
        columns[task.status.index()].tasks.push(task);
    }

    for column in &mut columns {
        column.header = column_header(labels.label(column.status), board.count_by_status(column.status));
    }
    columns
}

/// Create a centered rect within `area` using percentage-based sizing with minimums.
pub fn centered_rect(area: Rect, w_pct: u16, h_pct: u16, min_w: u16, min_h: u16) -> Rect {
    let width = scale(area.width, w_pct).max(min_w).min(area.width);
    let height = scale(area.height, h_pct).max(min_h).min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

fn scale(len: u16, pct: u16) -> u16 {
    u16::try_from(u32::from(len) * u32::from(pct) / 100).unwrap_or(u16::MAX)
}

pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    render_board(f, chunks[0], app);
    render_status_bar(f, chunks[1], app);

    if let Some(modal) = &app.modal {
        render_modal(f, chunks[0], modal);
    }
}

fn render_board(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    for (column, chunk) in project(&app.board, &app.labels).into_iter().zip(chunks.iter()) {
        let focused = app.selected_status == column.status;
        let items: Vec<ListItem> = column
            .tasks
            .iter()
            .map(|t| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("#{} ", t.id), Style::default().fg(Color::DarkGray)),
                    Span::styled(t.title.as_str(), Style::default().fg(Color::White)),
                ]))
            })
            .collect();

        let mut state = ListState::default();
        if focused && !items.is_empty() {
            state.select(Some(app.selected_task.min(items.len() - 1)));
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .title(Span::styled(column.header, Style::default().add_modifier(Modifier::BOLD)))
                    .borders(Borders::ALL)
                    .border_style(if focused {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default()
                    }),
            )
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
            .highlight_symbol("> ");

        f.render_stateful_widget(list, *chunk, &mut state);
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let hints = if app.modal.is_some() {
        "tab next field · ←/→ status · ctrl-s save · ctrl-d delete · esc close"
    } else {
        "a add · enter edit · ←/→ column · ↑/↓ task · q quit"
    };
    let count = if app.board.is_empty() {
        " no tasks ".to_string()
    } else {
        format!(" {} tasks ", app.board.len())
    };
    let line = Line::from(vec![
        Span::styled(count, Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(" "),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_modal(f: &mut Frame, area: Rect, modal: &TaskModal) {
    let popup = centered_rect(area, 60, 70, 44, 16);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            format!(" {} ", modal.heading()),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    f.render_widget(
        text_input("Title", &modal.title, TITLE_PLACEHOLDER, modal.focus == Field::Title),
        rows[0],
    );
    f.render_widget(
        text_input(
            "Description",
            &modal.description,
            DESCRIPTION_PLACEHOLDER,
            modal.focus == Field::Description,
        )
        .wrap(Wrap { trim: false }),
        rows[1],
    );

    let status = Paragraph::new(Line::from(vec![
        Span::styled("‹ ", Style::default().fg(Color::DarkGray)),
        Span::raw(modal.status.display_name()),
        Span::styled(" ›", Style::default().fg(Color::DarkGray)),
    ]))
    .block(field_block("Status", modal.focus == Field::Status));
    f.render_widget(status, rows[2]);

    let mut buttons = vec![button(modal.confirm_label(), modal.focus == Field::Confirm, Color::Cyan)];
    if let ModalMode::Edit(_) = modal.mode {
        buttons.push(Span::raw("  "));
        buttons.push(button("Delete Task", modal.focus == Field::Delete, Color::Red));
    }
    f.render_widget(Paragraph::new(Line::from(buttons)), rows[3]);
}

fn field_block(label: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        })
}

fn text_input<'a>(label: &'a str, value: &'a str, placeholder: &'a str, focused: bool) -> Paragraph<'a> {
    let text = if value.is_empty() {
        Text::from(Span::styled(placeholder, Style::default().fg(Color::DarkGray)))
    } else {
        Text::from(value)
    };
    Paragraph::new(text).block(field_block(label, focused))
}

fn button(label: &str, focused: bool, color: Color) -> Span<'static> {
    let style = if focused {
        Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };
    Span::styled(format!("[ {label} ]"), style)
}

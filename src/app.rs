use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::debug;

use crate::config::ColumnLabels;
use crate::kanban_board::KanbanBoard;
use crate::modal::{ModalOutcome, TaskModal};
use crate::task::{Status, Task};
use crate::ui;

/// Everything the event loop needs: the board, the cursor and an optional open form.
#[derive(Debug)]
pub struct App {
    pub board: KanbanBoard,
    pub labels: ColumnLabels,
    pub selected_status: Status,
    pub selected_task: usize,
    pub modal: Option<TaskModal>,
    pub should_quit: bool,
}

impl App {
    pub fn new(board: KanbanBoard, labels: ColumnLabels) -> Self {
        Self {
            board,
            labels,
            selected_status: Status::Todo,
            selected_task: 0,
            modal: None,
            should_quit: false,
        }
    }

    pub fn selected_task_ref(&self) -> Option<&Task> {
        self.board
            .get_tasks_by_status(self.selected_status)
            .get(self.selected_task)
            .copied()
    }

    pub fn open_create_modal(&mut self) {
        debug!("opening create modal");
        self.modal = Some(TaskModal::create());
    }

    pub fn open_edit_modal(&mut self) {
        let Some(task) = self.selected_task_ref() else {
            return;
        };
        debug!(id = task.id, "opening edit modal");
        let modal = TaskModal::edit(task);
        self.modal = Some(modal);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(modal) = self.modal.as_mut() {
            if let Some(outcome) = modal.handle_key(key) {
                self.modal = None;
                self.apply(outcome);
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('a') => self.open_create_modal(),
            KeyCode::Enter => self.open_edit_modal(),
            KeyCode::Left | KeyCode::Char('h') => {
                let i = self.selected_status.index();
                if i > 0 {
                    self.select_column(Status::ALL[i - 1]);
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let i = self.selected_status.index();
                if i < Status::ALL.len() - 1 {
                    self.select_column(Status::ALL[i + 1]);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_task = self.selected_task.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max_tasks = self.board.count_by_status(self.selected_status);
                if self.selected_task + 1 < max_tasks {
                    self.selected_task += 1;
                }
            }
            _ => {}
        }
    }

    /// Apply a closed modal's result to the board.
    pub fn apply(&mut self, outcome: ModalOutcome) {
        match outcome {
            ModalOutcome::Create {
                title,
                description,
                status,
            } => {
                let id = self.board.add_task(title, description, status);
                self.follow(id);
            }
            ModalOutcome::Update {
                id,
                title,
                description,
                status,
            } => {
                self.board.update_task(id, title, description, status);
                self.follow(id);
            }
            ModalOutcome::Delete(id) => {
                self.board.delete_task(id);
                self.clamp_selection();
            }
            ModalOutcome::Cancel => debug!("modal closed without changes"),
        }
    }

    fn select_column(&mut self, status: Status) {
        self.selected_status = status;
        self.clamp_selection();
    }

    /// Move the cursor onto task `id`, wherever it now lives.
    fn follow(&mut self, id: u32) {
        let Some(status) = self.board.get(id).map(|t| t.status) else {
            self.clamp_selection();
            return;
        };
        self.selected_status = status;
        self.selected_task = self
            .board
            .get_tasks_by_status(status)
            .iter()
            .position(|t| t.id == id)
            .unwrap_or(0);
    }

    fn clamp_selection(&mut self) {
        let len = self.board.count_by_status(self.selected_status);
        self.selected_task = self.selected_task.min(len.saturating_sub(1));
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
}

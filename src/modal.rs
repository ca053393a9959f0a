use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::task::{Status, Task};

pub const TITLE_PLACEHOLDER: &str = "e.g. Take chilled break";
pub const DESCRIPTION_PLACEHOLDER: &str = "e.g Pet your dog, have a cup of coffee, dance to your favourite song and come back to crush this challenge.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit(u32),
}

/// Focusable parts of the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Status,
    Confirm,
    Delete,
}

const CREATE_FIELDS: &[Field] = &[Field::Title, Field::Description, Field::Status, Field::Confirm];
const EDIT_FIELDS: &[Field] = &[
    Field::Title,
    Field::Description,
    Field::Status,
    Field::Confirm,
    Field::Delete,
];

/// What the board should do once the modal closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    Create {
        title: String,
        description: String,
        status: Status,
    },
    Update {
        id: u32,
        title: String,
        description: String,
        status: Status,
    },
    Delete(u32),
    Cancel,
}

/// Editing form for a new or an existing task.
///
/// The form works on its own copies of the fields; nothing reaches the
/// board until the modal returns an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskModal {
    pub mode: ModalMode,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub focus: Field,
}

impl TaskModal {
    pub fn create() -> Self {
        Self {
            mode: ModalMode::Create,
            title: String::new(),
            description: String::new(),
            status: Status::Todo,
            focus: Field::Title,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            mode: ModalMode::Edit(task.id),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            focus: Field::Title,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            ModalMode::Create => "Add New Task",
            ModalMode::Edit(_) => "Edit Task",
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self.mode {
            ModalMode::Create => "Create Task",
            ModalMode::Edit(_) => "Save Changes",
        }
    }

    pub fn fields(&self) -> &'static [Field] {
        match self.mode {
            ModalMode::Create => CREATE_FIELDS,
            ModalMode::Edit(_) => EDIT_FIELDS,
        }
    }

    pub fn focus_next(&mut self) {
        let fields = self.fields();
        let i = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(i + 1) % fields.len()];
    }

    pub fn focus_prev(&mut self) {
        let fields = self.fields();
        let i = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(i + fields.len() - 1) % fields.len()];
    }

    /// Outcome of pressing the primary button with the current field values.
    pub fn confirm(&self) -> ModalOutcome {
        match self.mode {
            ModalMode::Create => ModalOutcome::Create {
                title: self.title.clone(),
                description: self.description.clone(),
                status: self.status,
            },
            ModalMode::Edit(id) => ModalOutcome::Update {
                id,
                title: self.title.clone(),
                description: self.description.clone(),
                status: self.status,
            },
        }
    }

    fn delete(&self) -> Option<ModalOutcome> {
        match self.mode {
            ModalMode::Edit(id) => Some(ModalOutcome::Delete(id)),
            ModalMode::Create => None,
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Title => Some(&mut self.title),
            Field::Description => Some(&mut self.description),
            _ => None,
        }
    }

    /// Feed a key press to the form. Returns `Some` when the modal should close.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ModalOutcome> {
        // AltGr arrives as Ctrl+Alt on some platforms and still types text.
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL) && !key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Esc => return Some(ModalOutcome::Cancel),
            KeyCode::Char('s') if ctrl => return Some(self.confirm()),
            KeyCode::Char('d') if ctrl => return self.delete(),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter => match self.focus {
                Field::Description => self.description.push('\n'),
                Field::Title | Field::Status => self.focus_next(),
                Field::Confirm => return Some(self.confirm()),
                Field::Delete => return self.delete(),
            },
            KeyCode::Left if self.focus == Field::Status => self.status = self.status.prev(),
            KeyCode::Right if self.focus == Field::Status => self.status = self.status.next(),
            KeyCode::Char(' ') if self.focus == Field::Status => self.status = self.status.next(),
            KeyCode::Backspace => {
                if let Some(text) = self.focused_text() {
                    text.pop();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(text) = self.focused_text() {
                    text.push(c);
                }
            }
            _ => {}
        }
        None
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which column a task lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Todo,
    Doing,
    Done,
}

impl Status {
    /// Column order on the board.
    pub const ALL: [Status; 3] = [Self::Todo, Self::Doing, Self::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::Doing => "Doing",
            Self::Done => "Done",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::Doing => 1,
            Self::Done => 2,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Todo => Self::Doing,
            Self::Doing => Self::Done,
            Self::Done => Self::Todo,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Todo => Self::Done,
            Self::Doing => Self::Todo,
            Self::Done => Self::Doing,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            other => Err(format!("unknown status '{other}' (expected todo, doing or done)")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub status: Status,
}

impl Task {
    pub fn new(id: u32, title: impl Into<String>, description: impl Into<String>, status: Status) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status,
        }
    }
}

/// The board every session starts from unless a seed file is given.
pub fn initial_tasks() -> Vec<Task> {
    vec![
        Task::new(1, "Launch Epic Career 🚀", "Create a killer Resume", Status::Todo),
        Task::new(2, "Conquer React ⚛️", "Learn React.js", Status::Todo),
        Task::new(3, "Understand Databases ⚙️", "Know how to query databases.", Status::Todo),
        Task::new(
            4,
            "Crush Frameworks 🖼️",
            "Master web frameworks like Next.js, Angular, or Vue.",
            Status::Todo,
        ),
        Task::new(5, "Master JavaScript 💛", "Practice JavaScript.", Status::Doing),
        Task::new(6, "Never Give Up 🏆", "Slow and steady.", Status::Doing),
        Task::new(7, "Explore ES6 Features 🚀", "Javascript deep dive.", Status::Done),
        Task::new(8, "Have fun 🥳", "Rome was not built in one day!", Status::Done),
    ]
}

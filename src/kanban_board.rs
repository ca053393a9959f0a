use std::collections::HashSet;

use color_eyre::eyre::{bail, Result};
use tracing::{info, warn};

use crate::task::{initial_tasks, Status, Task};

/// The authoritative in-memory task list.
#[derive(Debug, Default, Clone)]
pub struct KanbanBoard {
    tasks: Vec<Task>,
}

impl KanbanBoard {
    /// Board holding the built-in starter tasks.
    pub fn seeded() -> Self {
        Self {
            tasks: initial_tasks(),
        }
    }

    /// Build a board from an existing list, rejecting duplicate ids.
    pub fn with_tasks(tasks: Vec<Task>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if !seen.insert(task.id) {
                bail!("duplicate task id {}", task.id);
            }
        }
        Ok(Self { tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Max id + 1. If the max is already `u32::MAX`, falls back to the lowest unused id.
    fn next_id(&self) -> u32 {
        match self.tasks.iter().map(|t| t.id).max() {
            None => 1,
            Some(max) => max.checked_add(1).unwrap_or_else(|| self.lowest_free_id()),
        }
    }

    fn lowest_free_id(&self) -> u32 {
        let used: HashSet<u32> = self.tasks.iter().map(|t| t.id).collect();
        (1..=u32::MAX).find(|id| !used.contains(id)).unwrap_or(0)
    }

    /// Append a task and return its freshly assigned id.
    pub fn add_task(&mut self, title: String, description: String, status: Status) -> u32 {
        let id = self.next_id();
        info!(id, %status, title = %title, "task added");
        self.tasks.push(Task {
            id,
            title,
            description,
            status,
        });
        id
    }

    /// Replace the fields of task `id`. Unknown ids are ignored.
    pub fn update_task(&mut self, id: u32, title: String, description: String, status: Status) {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.title = title;
                task.description = description;
                task.status = status;
                info!(id, %status, "task updated");
            }
            None => warn!(id, "update for unknown task ignored"),
        }
    }

    /// Remove task `id`, keeping the others in order. Unknown ids are ignored.
    pub fn delete_task(&mut self, id: u32) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() < before {
            info!(id, "task deleted");
        } else {
            warn!(id, "delete for unknown task ignored");
        }
    }

    pub fn get_tasks_by_status(&self, status: Status) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    pub fn count_by_status(&self, status: Status) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(board: &KanbanBoard) -> Vec<u32> {
        board.tasks().iter().map(|t| t.id).collect()
    }

    #[test]
    fn seeded_board_counts() {
        let board = KanbanBoard::seeded();
        assert_eq!(board.len(), 8);
        assert_eq!(board.count_by_status(Status::Todo), 4);
        assert_eq!(board.count_by_status(Status::Doing), 2);
        assert_eq!(board.count_by_status(Status::Done), 2);
    }

    #[test]
    fn add_assigns_max_plus_one() {
        let mut board = KanbanBoard::seeded();
        let id = board.add_task("Ship it".into(), "".into(), Status::Doing);
        assert_eq!(id, 9);
        assert_eq!(board.len(), 9);
        assert_eq!(board.tasks().last().map(|t| t.id), Some(9));
    }

    #[test]
    fn add_uses_max_not_length() {
        let mut board = KanbanBoard::with_tasks(vec![
            Task::new(2, "a", "", Status::Todo),
            Task::new(7, "b", "", Status::Done),
        ])
        .unwrap();
        assert_eq!(board.add_task("c".into(), "".into(), Status::Todo), 8);
    }

    #[test]
    fn add_to_empty_board_starts_at_one() {
        let mut board = KanbanBoard::default();
        assert!(board.is_empty());
        assert_eq!(board.add_task("first".into(), "".into(), Status::Todo), 1);
    }

    #[test]
    fn add_after_max_id_reuses_lowest_free() {
        let mut board = KanbanBoard::with_tasks(vec![
            Task::new(u32::MAX, "last", "", Status::Todo),
            Task::new(1, "first", "", Status::Done),
        ])
        .unwrap();
        assert_eq!(board.add_task("next".into(), "".into(), Status::Todo), 2);
        assert_eq!(board.add_task("again".into(), "".into(), Status::Todo), 3);
        assert_eq!(board.len(), 4);
    }

    #[test]
    fn ids_stay_unique_after_delete_and_add() {
        let mut board = KanbanBoard::seeded();
        board.delete_task(8);
        let id = board.add_task("again".into(), "".into(), Status::Done);
        assert_eq!(id, 8);
        let mut all = ids(&board);
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), board.len());
    }

    #[test]
    fn update_changes_only_target() {
        let mut board = KanbanBoard::seeded();
        let before = board.clone();
        board.update_task(3, "New title".into(), "New desc".into(), Status::Done);

        let updated = board.get(3).unwrap();
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.description, "New desc");
        assert_eq!(updated.status, Status::Done);

        for (old, new) in before.tasks().iter().zip(board.tasks()) {
            if old.id != 3 {
                assert_eq!(old, new);
            }
        }
        assert_eq!(ids(&board), ids(&before));
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut board = KanbanBoard::seeded();
        board.update_task(42, "x".into(), "y".into(), Status::Done);
        assert_eq!(board.tasks(), KanbanBoard::seeded().tasks());
    }

    #[test]
    fn delete_removes_exactly_one_in_order() {
        let mut board = KanbanBoard::seeded();
        board.delete_task(4);
        assert_eq!(ids(&board), vec![1, 2, 3, 5, 6, 7, 8]);

        board.delete_task(4);
        assert_eq!(board.len(), 7);
    }

    #[test]
    fn delete_first_todo_updates_count() {
        let mut board = KanbanBoard::seeded();
        board.delete_task(1);
        assert_eq!(board.count_by_status(Status::Todo), 3);
    }

    #[test]
    fn tasks_by_status_keeps_store_order() {
        let mut board = KanbanBoard::seeded();
        board.update_task(1, "moved".into(), "".into(), Status::Done);
        let done: Vec<u32> = board.get_tasks_by_status(Status::Done).iter().map(|t| t.id).collect();
        assert_eq!(done, vec![1, 7, 8]);
    }

    #[test]
    fn counts_match_filters() {
        let mut board = KanbanBoard::seeded();
        board.add_task("x".into(), "".into(), Status::Doing);
        board.delete_task(7);
        for status in Status::ALL {
            assert_eq!(board.count_by_status(status), board.get_tasks_by_status(status).len());
        }
    }

    #[test]
    fn with_tasks_rejects_duplicates() {
        let err = KanbanBoard::with_tasks(vec![
            Task::new(1, "a", "", Status::Todo),
            Task::new(1, "b", "", Status::Done),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate task id 1"));
    }
}

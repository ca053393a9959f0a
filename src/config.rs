use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::task::{Status, Task};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub labels: ColumnLabels,
    /// Where to write logs. Nothing is logged when unset.
    pub log_file: Option<PathBuf>,
    /// JSON array of tasks to start from instead of the built-in board.
    pub seed: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .wrap_err_with(|| format!("cannot read config {}", path.display()))?;
        serde_json::from_str(&data).wrap_err_with(|| format!("invalid config {}", path.display()))
    }

    /// Command-line values win over the file; absent flags keep the file's value.
    pub fn apply_cli(&mut self, seed: Option<PathBuf>, log_file: Option<PathBuf>) {
        if let Some(seed) = seed {
            self.seed = Some(seed);
        }
        if let Some(log_file) = log_file {
            self.log_file = Some(log_file);
        }
    }
}

/// Header text shown before each column's count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLabels {
    pub todo: String,
    pub doing: String,
    pub done: String,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            todo: Status::Todo.display_name().to_string(),
            doing: Status::Doing.display_name().to_string(),
            done: Status::Done.display_name().to_string(),
        }
    }
}

impl ColumnLabels {
    pub fn label(&self, status: Status) -> &str {
        match status {
            Status::Todo => &self.todo,
            Status::Doing => &self.doing,
            Status::Done => &self.done,
        }
    }
}

/// Read a seed file: a JSON array of tasks.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    let data = fs::read_to_string(path)
        .wrap_err_with(|| format!("cannot read seed file {}", path.display()))?;
    serde_json::from_str(&data).wrap_err_with(|| format!("invalid seed file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_config_uses_defaults() {
        let file = write_temp("{}");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.labels, ColumnLabels::default());
        assert_eq!(config.labels.label(Status::Doing), "Doing");
        assert!(config.log_file.is_none());
        assert!(config.seed.is_none());
    }

    #[test]
    fn partial_labels_keep_other_defaults() {
        let file = write_temp(r#"{ "labels": { "todo": "Backlog" }, "log_file": "board.log" }"#);
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.labels.label(Status::Todo), "Backlog");
        assert_eq!(config.labels.label(Status::Done), "Done");
        assert_eq!(config.log_file, Some(PathBuf::from("board.log")));
    }

    #[test]
    fn malformed_config_reports_path() {
        let file = write_temp("{ labels: ");
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read config"));
    }

    #[test]
    fn cli_flags_override_config() {
        let file = write_temp(r#"{ "seed": "file-seed.json", "log_file": "file.log" }"#);
        let mut config = Config::load(file.path()).unwrap();
        config.apply_cli(Some("cli-seed.json".into()), Some("cli.log".into()));
        assert_eq!(config.seed, Some(PathBuf::from("cli-seed.json")));
        assert_eq!(config.log_file, Some(PathBuf::from("cli.log")));
    }

    #[test]
    fn absent_cli_flags_keep_config_values() {
        let file = write_temp(r#"{ "seed": "file-seed.json", "log_file": "file.log" }"#);
        let mut config = Config::load(file.path()).unwrap();
        config.apply_cli(None, None);
        assert_eq!(config.seed, Some(PathBuf::from("file-seed.json")));
        assert_eq!(config.log_file, Some(PathBuf::from("file.log")));

        let mut config = Config::default();
        config.apply_cli(None, Some("only.log".into()));
        assert!(config.seed.is_none());
        assert_eq!(config.log_file, Some(PathBuf::from("only.log")));
    }

    #[test]
    fn seed_file_loads_tasks() {
        let file = write_temp(
            r#"[
                { "id": 10, "title": "Plan", "description": "", "status": "todo" },
                { "id": 11, "title": "Build", "description": "the thing", "status": "doing" }
            ]"#,
        );
        let tasks = load_tasks(file.path()).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1], Task::new(11, "Build", "the thing", Status::Doing));
    }

    #[test]
    fn seed_file_rejects_unknown_status() {
        let file = write_temp(r#"[{ "id": 1, "title": "x", "description": "", "status": "blocked" }]"#);
        assert!(load_tasks(file.path()).is_err());
    }
}

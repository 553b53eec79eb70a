//! Concurrent loading of every person's task file.
//!
//! Each roster entry is read and parsed in its own tokio task; the results are
//! joined in roster order once every task has finished. A person whose file
//! is missing, unreadable or whose task panicked is reported with no tasks so
//! the rest of the team still shows up.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use workload_core::models::PersonWorkload;
use workload_core::{Result, WorkloadError};
use workload_data::parser::parse;

use crate::roster::Roster;

/// Load every person on `roster`, resolving relative files against `base_dir`.
///
/// Always returns exactly one [`PersonWorkload`] per roster entry, in roster
/// order.
pub async fn load_people(roster: &Roster, base_dir: &Path) -> Vec<PersonWorkload> {
    let handles: Vec<_> = roster
        .entries
        .iter()
        .map(|entry| {
            let name = entry.name.clone();
            let path = base_dir.join(&entry.file);
            let handle = tokio::spawn(load_person(name.clone(), path));
            (name, handle)
        })
        .collect();

    let mut people = Vec::with_capacity(handles.len());
    for (name, handle) in handles {
        match handle.await {
            Ok(person) => people.push(person),
            Err(e) => {
                warn!(person = %name, error = %e, "load task failed; treating as no tasks");
                people.push(PersonWorkload::empty(name));
            }
        }
    }

    let total_tasks: usize = people.iter().map(|p| p.tasks.len()).sum();
    debug!(people = people.len(), total_tasks, "team loaded");
    people
}

/// Read and parse one person's task file, degrading to no tasks on failure.
pub async fn load_person(name: String, path: PathBuf) -> PersonWorkload {
    match read_task_file(&path).await {
        Ok(text) => {
            let tasks = parse(&text);
            debug!(person = %name, tasks = tasks.len(), path = %path.display(), "loaded task file");
            PersonWorkload::new(name, tasks)
        }
        Err(e) => {
            warn!(person = %name, error = %e, "could not load task file; treating as no tasks");
            PersonWorkload::empty(name)
        }
    }
}

/// Read a task file, replacing invalid UTF-8 so one damaged cell does not
/// cost the whole file.
async fn read_task_file(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| WorkloadError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::RosterEntry;
    use tempfile::TempDir;

    const HEADER: &str = "類別,項目,預估時間,實際時間,預計開始,預計完成,實際完成";

    fn entry(name: &str, file: &str) -> RosterEntry {
        RosterEntry {
            name: name.to_string(),
            file: PathBuf::from(file),
        }
    }

    fn write_tasks(dir: &Path, file: &str, rows: &[&str]) {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        std::fs::write(dir.join(file), text).expect("write fixture");
    }

    #[tokio::test]
    async fn test_load_people_preserves_roster_order() {
        let tmp = TempDir::new().expect("tempdir");
        write_tasks(
            tmp.path(),
            "jeff.md",
            &["Build,CI,1d,,--,--,--", "Build,Deploy,1d,,--,--,--"],
        );
        write_tasks(tmp.path(), "brian.md", &["Design,Draft,1d,,--,--,3月4日"]);

        let roster = Roster {
            entries: vec![entry("Jeff", "jeff.md"), entry("Brian", "brian.md")],
        };
        let people = load_people(&roster, tmp.path()).await;

        assert_eq!(people.len(), 2);
        assert_eq!(people[0].name, "Jeff");
        assert_eq!(people[0].tasks.len(), 2);
        assert_eq!(people[1].name, "Brian");
        assert_eq!(people[1].tasks.len(), 1);
        assert_eq!(people[1].tasks[0].item, "Draft");
    }

    #[tokio::test]
    async fn test_missing_file_degrades_to_empty_person() {
        let tmp = TempDir::new().expect("tempdir");
        write_tasks(tmp.path(), "joey.md", &["Ops,Patch,1d,,--,--,--"]);

        let roster = Roster {
            entries: vec![entry("Ghost", "ghost.md"), entry("Joey", "joey.md")],
        };
        let people = load_people(&roster, tmp.path()).await;

        assert_eq!(people.len(), 2);
        assert_eq!(people[0].name, "Ghost");
        assert!(people[0].tasks.is_empty());
        assert_eq!(people[1].tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_absolute_roster_paths_ignore_base_dir() {
        let tmp = TempDir::new().expect("tempdir");
        write_tasks(tmp.path(), "kelvin.md", &["Ops,Patch,1d,,--,--,--"]);
        let absolute = tmp.path().join("kelvin.md");

        let roster = Roster {
            entries: vec![RosterEntry {
                name: "Kelvin".to_string(),
                file: absolute,
            }],
        };
        let people = load_people(&roster, Path::new("/nonexistent")).await;
        assert_eq!(people[0].tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_roster() {
        let tmp = TempDir::new().expect("tempdir");
        let people = load_people(&Roster::default(), tmp.path()).await;
        assert!(people.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_utf8_keeps_readable_rows() {
        let tmp = TempDir::new().expect("tempdir");
        let mut bytes = format!("{HEADER}\nDesign,Draft,1d,,--,--,--\nOps,").into_bytes();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b",1d,,--,--,--");
        std::fs::write(tmp.path().join("jerry.md"), bytes).unwrap();

        let person = load_person("Jerry".to_string(), tmp.path().join("jerry.md")).await;
        assert_eq!(person.tasks.len(), 2);
        assert_eq!(person.tasks[0].item, "Draft");
        assert_eq!(person.tasks[1].category, "Ops");
        assert!(person.tasks[1].item.contains('\u{fffd}'));
    }

    #[tokio::test]
    async fn test_byte_order_mark_file_loads_every_row() {
        let tmp = TempDir::new().expect("tempdir");
        let text =
            format!("\u{feff}{HEADER}\nDesign,Draft,1d,,--,--,--\nOps,Deploy,1d,,--,--,--");
        std::fs::write(tmp.path().join("brian.md"), text).unwrap();

        let person = load_person("Brian".to_string(), tmp.path().join("brian.md")).await;
        assert_eq!(person.tasks.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_file_is_person_without_tasks() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("yammin.md"), "").unwrap();
        let person = load_person("Yammin".to_string(), tmp.path().join("yammin.md")).await;
        assert_eq!(person.name, "Yammin");
        assert!(person.tasks.is_empty());
    }
}

//! Team roster: who is tracked and which file holds their tasks.
//!
//! A roster is either read from a JSON file
//!
//! ```json
//! [{ "name": "Brian", "file": "brian.md" }]
//! ```
//!
//! or discovered by listing the task files of a data directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use workload_core::{Result, WorkloadError};

/// File name looked up in the data directory when no roster is given.
pub const DEFAULT_ROSTER_FILE: &str = "roster.json";

/// Extensions recognised as task files during discovery.
const TASK_FILE_EXTENSIONS: [&str; 2] = ["md", "csv"];

/// One tracked team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    /// Task file, relative to the data directory unless absolute.
    pub file: PathBuf,
}

/// Ordered list of tracked team members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub entries: Vec<RosterEntry>,
}

impl Roster {
    /// Read a JSON roster from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| WorkloadError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<RosterEntry> =
            serde_json::from_str(&content).map_err(|source| WorkloadError::RosterParse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(people = entries.len(), path = %path.display(), "loaded roster");
        Ok(Self { entries })
    }

    /// One entry per task file directly inside `data_dir`, sorted by path.
    ///
    /// Each person is named after the file stem with its first letter
    /// upper-cased (`brian.md` → `Brian`).
    pub fn discover(data_dir: &Path) -> Result<Self> {
        if !data_dir.is_dir() {
            return Err(WorkloadError::DataPathNotFound(data_dir.to_path_buf()));
        }

        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file() && is_task_file(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        files.sort();

        let entries = files
            .into_iter()
            .filter_map(|path| {
                let stem = path.file_stem()?.to_str()?;
                let name = capitalize(stem);
                let file = path.file_name().map(PathBuf::from)?;
                Some(RosterEntry { name, file })
            })
            .collect::<Vec<_>>();

        debug!(people = entries.len(), dir = %data_dir.display(), "discovered task files");
        Ok(Self { entries })
    }

    /// Pick the roster for a run: `explicit` if given, else
    /// `<data_dir>/roster.json` if present, else discovery.
    pub fn resolve(data_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default_path = data_dir.join(DEFAULT_ROSTER_FILE);
        if default_path.is_file() {
            return Self::load(&default_path);
        }
        Self::discover(data_dir)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn is_task_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| TASK_FILE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).expect("write fixture");
    }

    // ── load ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_roster_file() {
        let tmp = TempDir::new().expect("tempdir");
        write(
            tmp.path(),
            "team.json",
            r#"[{"name":"Brian","file":"brian.md"},{"name":"Jeff","file":"/abs/jeff.md"}]"#,
        );

        let roster = Roster::load(&tmp.path().join("team.json")).expect("load");
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.entries[0].name, "Brian");
        assert_eq!(roster.entries[0].file, PathBuf::from("brian.md"));
        assert_eq!(roster.entries[1].file, PathBuf::from("/abs/jeff.md"));
    }

    #[test]
    fn test_load_missing_roster_is_file_read_error() {
        let tmp = TempDir::new().expect("tempdir");
        let err = Roster::load(&tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, WorkloadError::FileRead { .. }));
    }

    #[test]
    fn test_load_invalid_roster_is_parse_error() {
        let tmp = TempDir::new().expect("tempdir");
        write(tmp.path(), "team.json", r#"{"name":"Brian"}"#);
        let err = Roster::load(&tmp.path().join("team.json")).unwrap_err();
        assert!(matches!(err, WorkloadError::RosterParse { .. }));
    }

    // ── discover ─────────────────────────────────────────────────────────────

    #[test]
    fn test_discover_task_files() {
        let tmp = TempDir::new().expect("tempdir");
        write(tmp.path(), "jeff.md", "");
        write(tmp.path(), "brian.csv", "");
        write(tmp.path(), "notes.txt", "");
        std::fs::create_dir(tmp.path().join("archive")).unwrap();
        write(&tmp.path().join("archive"), "old.md", "");

        let roster = Roster::discover(tmp.path()).expect("discover");
        let names: Vec<&str> = roster.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Brian", "Jeff"]);
        assert_eq!(roster.entries[0].file, PathBuf::from("brian.csv"));
    }

    #[test]
    fn test_discover_missing_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let err = Roster::discover(&tmp.path().join("absent")).unwrap_err();
        assert!(matches!(err, WorkloadError::DataPathNotFound(_)));
    }

    // ── resolve ──────────────────────────────────────────────────────────────

    #[test]
    fn test_resolve_prefers_default_roster_file() {
        let tmp = TempDir::new().expect("tempdir");
        write(tmp.path(), "jeff.md", "");
        write(tmp.path(), DEFAULT_ROSTER_FILE, r#"[{"name":"Yammin","file":"y.md"}]"#);

        let roster = Roster::resolve(tmp.path(), None).expect("resolve");
        assert_eq!(roster.entries.len(), 1);
        assert_eq!(roster.entries[0].name, "Yammin");
    }

    #[test]
    fn test_resolve_falls_back_to_discovery() {
        let tmp = TempDir::new().expect("tempdir");
        write(tmp.path(), "kelvin.md", "");
        let roster = Roster::resolve(tmp.path(), None).expect("resolve");
        assert_eq!(roster.entries[0].name, "Kelvin");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("brian"), "Brian");
        assert_eq!(capitalize("Jeff"), "Jeff");
        assert_eq!(capitalize(""), "");
    }
}

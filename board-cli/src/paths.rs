//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "board";
const APPLICATION: &str = "board";

const LATEST_LOG: &str = "latest.log";

/// Archived logs kept next to the current one.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Cache directory, home of the log files.
///
/// - Linux: `$XDG_CACHE_HOME/board` or `~/.cache/board`
/// - macOS: `~/Library/Caches/dev.board.board`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/board` or `~/.config/board`
/// - macOS: `~/Library/Application Support/dev.board.board`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default grid config file.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Renames `latest.log` to a timestamped name and removes old logs.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    rotate_logs_in(&cache);
}

fn rotate_logs_in(dir: &Path) {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let archived = dir.join(format!("{}.log", chrono::Local::now().format("%Y%m%d_%H%M%S")));
        if let Err(err) = fs::rename(&latest, &archived) {
            eprintln!("Could not archive {}: {err}", latest.display());
        }
    }
    prune_archived_logs(dir);
}

/// Deletes archived logs beyond [`MAX_OLD_LOGS`], least recently written first.
fn prune_archived_logs(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archived: Vec<(Option<SystemTime>, PathBuf)> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| is_archived_log(path))
        .map(|path| (fs::metadata(&path).and_then(|meta| meta.modified()).ok(), path))
        .collect();
    archived.sort();

    let excess = archived.len().saturating_sub(MAX_OLD_LOGS);
    for (_, path) in archived.into_iter().take(excess) {
        let _ = fs::remove_file(path);
    }
}

fn is_archived_log(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "log")
        && path.file_name().is_some_and(|name| name != LATEST_LOG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_keeps_recent_logs() {
        let dir = std::env::temp_dir().join(format!("board-logs-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for n in 0..(MAX_OLD_LOGS + 3) {
            fs::write(dir.join(format!("old_{n:02}.log")), "x").unwrap();
        }
        fs::write(dir.join("latest.log"), "latest").unwrap();
        fs::write(dir.join("notes.txt"), "keep").unwrap();

        rotate_logs_in(&dir);

        let names: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        fs::remove_dir_all(&dir).ok();

        assert!(!names.contains(&"latest.log".to_string()));
        assert!(names.contains(&"notes.txt".to_string()));
        assert_eq!(names.iter().filter(|n| n.ends_with(".log")).count(), MAX_OLD_LOGS);
    }
}

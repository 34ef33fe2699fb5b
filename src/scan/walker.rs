/// Path enumerator
///
/// Walks a root with an explicit stack and returns every file and directory
/// strictly beneath it. Files come first, then directories; both are ordered
/// deepest-first so a directory always follows everything it contains.
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::entry::PathEntry;
use crate::state::Progress;

/// Enumerate everything beneath `root`.
///
/// Missing or unreadable roots give an empty result. Cancellation (via
/// `progress`) is checked between entries and returns what was found so far.
pub fn enumerate(root: &Path, progress: &Progress, max_depth: usize) -> Vec<PathEntry> {
    walk(
        root,
        max_depth,
        || progress.is_cancelled(),
        |path| progress.set_latest_scanned(path),
    )
}

/// Directories beyond `max_depth` are listed only when empty: their contents
/// are never queued, so a non-empty one could not be removed anyway.
fn walk(
    root: &Path,
    max_depth: usize,
    is_cancelled: impl Fn() -> bool,
    mut scanned: impl FnMut(&Path),
) -> Vec<PathEntry> {
    let mut files: Vec<(usize, PathBuf)> = Vec::new();
    let mut dirs: Vec<(usize, PathBuf)> = Vec::new();
    let mut stack: Vec<(PathBuf, usize)> = vec![(root.to_path_buf(), 0)];

    'walk: while let Some((dir, depth)) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("cannot list {}: {}", dir.display(), e);
                continue;
            }
        };

        for entry in entries {
            if is_cancelled() {
                debug!("🛑 Scan of {} cancelled", root.display());
                break 'walk;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("⚠️  Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            // DirEntry::file_type does not follow symlinks
            let is_dir = match entry.file_type() {
                Ok(file_type) => file_type.is_dir(),
                Err(e) => {
                    warn!("⚠️  Cannot classify {}: {}", path.display(), e);
                    continue;
                }
            };

            scanned(&path);

            let entry_depth = depth + 1;
            if !is_dir {
                files.push((entry_depth, path));
            } else if entry_depth < max_depth {
                stack.push((path.clone(), entry_depth));
                dirs.push((entry_depth, path));
            } else if is_empty_dir(&path) {
                dirs.push((entry_depth, path));
            } else {
                warn!(
                    "⚠️  {} is nested deeper than {} levels, leaving it in place",
                    path.display(),
                    max_depth
                );
            }
        }
    }

    // stable: equal depths keep traversal order
    files.sort_by(|a, b| b.0.cmp(&a.0));
    dirs.sort_by(|a, b| b.0.cmp(&a.0));

    files
        .into_iter()
        .map(|(_, path)| PathEntry::file(path))
        .chain(dirs.into_iter().map(|(_, path)| PathEntry::directory(path)))
        .collect()
}

fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path).is_ok_and(|mut entries| entries.next().is_none())
}

/// Turn user-selected roots into a single deletion batch
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::entry::{DeletionBatch, PathEntry};
use super::walker::enumerate;
use crate::state::Progress;

/// Build the batch for `roots`.
///
/// A file root contributes itself. A directory root contributes its contents
/// followed by the directory itself. Missing roots contribute nothing.
/// All file entries are placed ahead of all directory entries. Overlapping
/// roots (`d` and `d/f.txt`) queue each path once.
pub fn build_batch(roots: &[PathBuf], progress: &Progress, max_depth: usize) -> DeletionBatch {
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    let mut queued: HashSet<PathBuf> = HashSet::new();

    for root in roots {
        if progress.is_cancelled() {
            break;
        }

        let root = absolute(root);
        let metadata = match fs::symlink_metadata(&root) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("⚠️  Skipping {}: {}", root.display(), e);
                continue;
            }
        };

        if metadata.is_dir() {
            let (inner_files, inner_dirs): (Vec<_>, Vec<_>) = enumerate(&root, progress, max_depth)
                .into_iter()
                .partition(PathEntry::is_file);
            info!(
                "📂 {}: {} files, {} directories",
                root.display(),
                inner_files.len(),
                inner_dirs.len()
            );
            files.extend(
                inner_files
                    .into_iter()
                    .filter(|entry| queued.insert(entry.path.clone())),
            );
            dirs.extend(
                inner_dirs
                    .into_iter()
                    .filter(|entry| queued.insert(entry.path.clone())),
            );
            if queued.insert(root.clone()) {
                dirs.push(PathEntry::directory(root));
            }
        } else {
            progress.set_latest_scanned(&root);
            if queued.insert(root.clone()) {
                files.push(PathEntry::file(root));
            }
        }
    }

    let mut batch = DeletionBatch::new(files);
    batch.extend(dirs);
    progress.set_total(batch.len());
    batch
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Path entries and the batch handed to the orchestrator
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file, or a symlink (links are never followed)
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl PathEntry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Ordered set of paths submitted for one deletion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionBatch {
    entries: Vec<PathEntry>,
}

impl DeletionBatch {
    pub fn new(entries: Vec<PathEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn files(&self) -> impl Iterator<Item = &PathEntry> {
        self.entries.iter().filter(|entry| entry.is_file())
    }

    pub fn directories(&self) -> impl Iterator<Item = &PathEntry> {
        self.entries.iter().filter(|entry| entry.is_dir())
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = PathEntry>) {
        self.entries.extend(entries);
    }
}

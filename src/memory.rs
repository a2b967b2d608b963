use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::backend::VcsBackend;
use crate::error::{Result, RevcalError};
use crate::model::{FileId, NodeKind, Revision, RevisionId, TreeChange};

/// Tree snapshot of the in-memory backend: path to entry.
pub type MemoryTree = BTreeMap<String, MemoryEntry>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryEntry {
    pub kind: NodeKind,
    /// Content handle for file entries, `None` for directories.
    pub file: Option<FileId>,
    pub executable: bool,
}

/// In-memory [`VcsBackend`] with explicitly scripted history.
///
/// Commits are appended in the order given; [`merge_sorted_revisions`]
/// returns exactly that order, which lets tests pin down window scans
/// without a real repository on disk. File contents are interned, so two
/// trees holding the same text share one [`FileId`] and diff as unchanged.
///
/// [`merge_sorted_revisions`]: VcsBackend::merge_sorted_revisions
#[derive(Debug, Default)]
pub struct MemoryBackend {
    order: Vec<RevisionId>,
    revisions: HashMap<RevisionId, Revision>,
    trees: HashMap<RevisionId, MemoryTree>,
    blobs: HashMap<FileId, String>,
    tags: Vec<(String, RevisionId)>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `content` and returns its handle. Identical content yields
    /// the same handle, so unchanged files compare equal across trees.
    pub fn blob(&mut self, content: &str) -> FileId {
        if let Some((id, _)) = self.blobs.iter().find(|(_, c)| c.as_str() == content) {
            return id.clone();
        }
        let id = FileId::new(format!("blob{}", self.blobs.len()));
        self.blobs.insert(id.clone(), content.to_string());
        id
    }

    /// Appends a commit whose tree is the given path to content listing.
    pub fn add_commit(&mut self, rev: Revision, files: &[(&str, &str)]) {
        let mut tree = MemoryTree::new();
        for (path, content) in files {
            let file = self.blob(content);
            tree.insert(
                (*path).to_string(),
                MemoryEntry {
                    kind: NodeKind::File,
                    file: Some(file),
                    executable: false,
                },
            );
        }
        self.add_commit_with_tree(rev, tree);
    }

    /// Appends a commit with a fully spelled-out tree, for tests that need
    /// directories, symlinks, or mode changes.
    pub fn add_commit_with_tree(&mut self, rev: Revision, tree: MemoryTree) {
        self.order.push(rev.id.clone());
        self.trees.insert(rev.id.clone(), tree);
        self.revisions.insert(rev.id.clone(), rev);
    }

    pub fn add_tag(&mut self, name: &str, id: &RevisionId) {
        self.tags.push((name.to_string(), id.clone()));
    }
}

impl VcsBackend for MemoryBackend {
    type Repo = ();
    type Branch = ();
    type Tree = MemoryTree;

    fn open_containing(&self, _path: &Path) -> Result<((), ())> {
        Ok(((), ()))
    }

    fn merge_sorted_revisions(&self, _repo: &(), _branch: &()) -> Result<Vec<RevisionId>> {
        Ok(self.order.clone())
    }

    fn revision(&self, _repo: &(), id: &RevisionId) -> Result<Revision> {
        self.revisions
            .get(id)
            .cloned()
            .ok_or_else(|| RevcalError::RevisionNotFound(id.to_string()))
    }

    fn revision_tree(&self, _repo: &(), id: &RevisionId) -> Result<MemoryTree> {
        self.trees
            .get(id)
            .cloned()
            .ok_or_else(|| RevcalError::RevisionNotFound(id.to_string()))
    }

    fn empty_tree(&self, _repo: &()) -> Result<MemoryTree> {
        Ok(MemoryTree::new())
    }

    fn tree_changes(
        &self,
        _repo: &(),
        old: &MemoryTree,
        new: &MemoryTree,
    ) -> Result<Vec<TreeChange>> {
        let mut changes = Vec::new();
        for (path, old_entry) in old {
            match new.get(path) {
                Some(new_entry) if new_entry == old_entry => {}
                Some(new_entry) => changes.push(TreeChange {
                    old_path: Some(path.clone()),
                    new_path: Some(path.clone()),
                    old_kind: Some(old_entry.kind),
                    new_kind: Some(new_entry.kind),
                    // an executable-bit flip alone is not a content change
                    content_changed: old_entry.file != new_entry.file
                        || old_entry.kind != new_entry.kind,
                    old_file: old_entry.file.clone(),
                    new_file: new_entry.file.clone(),
                }),
                None => changes.push(TreeChange {
                    old_path: Some(path.clone()),
                    new_path: None,
                    old_kind: Some(old_entry.kind),
                    new_kind: None,
                    content_changed: true,
                    old_file: old_entry.file.clone(),
                    new_file: None,
                }),
            }
        }
        for (path, new_entry) in new {
            if !old.contains_key(path) {
                changes.push(TreeChange {
                    old_path: None,
                    new_path: Some(path.clone()),
                    old_kind: None,
                    new_kind: Some(new_entry.kind),
                    content_changed: true,
                    old_file: None,
                    new_file: new_entry.file.clone(),
                });
            }
        }
        Ok(changes)
    }

    fn file_lines(&self, _repo: &(), file: &FileId) -> Result<Vec<String>> {
        let content = self
            .blobs
            .get(file)
            .ok_or_else(|| RevcalError::Backend(format!("unknown content handle {file}")))?;
        Ok(content.split_inclusive('\n').map(str::to_string).collect())
    }

    fn tags(&self, _repo: &(), _branch: &()) -> Result<Vec<(String, RevisionId)>> {
        Ok(self.tags.clone())
    }
}

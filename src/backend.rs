use std::path::Path;

use crate::error::Result;
use crate::model::{FileId, Revision, RevisionId, TreeChange};

/// Capability seam between the query layer and a native version-control
/// library. [`crate::GitBackend`] binds it to gix; [`crate::MemoryBackend`]
/// implements it over in-memory maps for tests.
///
/// Handle types are plain values owned by the caller; nothing borrows from
/// the backend itself.
pub trait VcsBackend {
    type Repo;
    type Branch;
    type Tree;

    /// Opens the repository located at or above `path`, walking parent
    /// directories. Errors when no repository is found.
    fn open_containing(&self, path: &Path) -> Result<(Self::Repo, Self::Branch)>;

    /// Full revision history of the branch in forward merge-sorted order:
    /// a topological ordering, oldest reachable ancestor first, parents
    /// always before children. Not necessarily sorted by timestamp.
    fn merge_sorted_revisions(
        &self,
        repo: &Self::Repo,
        branch: &Self::Branch,
    ) -> Result<Vec<RevisionId>>;

    /// Metadata for one revision; errors when the id is unknown.
    fn revision(&self, repo: &Self::Repo, id: &RevisionId) -> Result<Revision>;

    /// Tree snapshot recorded by the revision.
    fn revision_tree(&self, repo: &Self::Repo, id: &RevisionId) -> Result<Self::Tree>;

    /// The tree with no entries, used as the parent side of root commits.
    fn empty_tree(&self, repo: &Self::Repo) -> Result<Self::Tree>;

    /// Per-path changes between two tree snapshots. Any locking a backend
    /// needs is scoped to this call.
    fn tree_changes(
        &self,
        repo: &Self::Repo,
        old: &Self::Tree,
        new: &Self::Tree,
    ) -> Result<Vec<TreeChange>>;

    /// Lines of one file content, addressed by the handle a [`TreeChange`]
    /// carried for its side of the diff. Terminators stay attached to their
    /// lines, so the presence or absence of a trailing newline is visible to
    /// diffs.
    fn file_lines(&self, repo: &Self::Repo, file: &FileId) -> Result<Vec<String>>;

    /// The tag-name to revision mapping, in the mapping's native order.
    fn tags(&self, repo: &Self::Repo, branch: &Self::Branch) -> Result<Vec<(String, RevisionId)>>;
}

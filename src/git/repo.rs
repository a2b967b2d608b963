use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::path::Path;

use gix::object::tree::diff::ChangeDetached;
use gix::objs::tree::{EntryKind, EntryMode};
use gix::{discover, ObjectId, Repository};
use tracing::debug;

use crate::backend::VcsBackend;
use crate::error::{Result, RevcalError};
use crate::model::{FileId, NodeKind, Revision, RevisionId, TreeChange};

/// [`VcsBackend`] bound to gix. Repository handles are plain
/// [`gix::Repository`] values and tree handles are detached tree ids, so the
/// query layer never borrows from the object store.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitBackend;

impl GitBackend {
    pub fn new() -> Self {
        Self
    }

    fn parse_id(id: &RevisionId) -> Result<ObjectId> {
        ObjectId::from_hex(id.as_str().as_bytes())
            .map_err(|e| RevcalError::Parse(format!("invalid revision id '{id}': {e}")))
    }

    /// The empty tree id stands in for the missing side of a root-commit
    /// diff and resolves to no tree at all.
    fn find_tree<'repo>(
        repo: &'repo Repository,
        id: &ObjectId,
    ) -> Result<Option<gix::Tree<'repo>>> {
        if *id == ObjectId::empty_tree(repo.object_hash()) {
            return Ok(None);
        }
        let tree = repo
            .find_object(*id)?
            .try_into_tree()
            .map_err(|e| RevcalError::Parse(format!("not a tree: {e}")))?;
        Ok(Some(tree))
    }

    fn node_kind(mode: EntryMode) -> NodeKind {
        match mode.kind() {
            EntryKind::Blob | EntryKind::BlobExecutable => NodeKind::File,
            EntryKind::Tree => NodeKind::Directory,
            EntryKind::Link => NodeKind::Symlink,
            EntryKind::Commit => NodeKind::TreeReference,
        }
    }

    fn convert_change(change: ChangeDetached) -> TreeChange {
        match change {
            ChangeDetached::Addition {
                location,
                entry_mode,
                id,
                ..
            } => TreeChange {
                old_path: None,
                new_path: Some(location.to_string()),
                old_kind: None,
                new_kind: Some(Self::node_kind(entry_mode)),
                content_changed: true,
                old_file: None,
                new_file: Some(FileId::new(id.to_string())),
            },
            ChangeDetached::Deletion {
                location,
                entry_mode,
                id,
                ..
            } => TreeChange {
                old_path: Some(location.to_string()),
                new_path: None,
                old_kind: Some(Self::node_kind(entry_mode)),
                new_kind: None,
                content_changed: true,
                old_file: Some(FileId::new(id.to_string())),
                new_file: None,
            },
            ChangeDetached::Modification {
                location,
                previous_entry_mode,
                previous_id,
                entry_mode,
                id,
                ..
            } => {
                let path = location.to_string();
                TreeChange {
                    old_path: Some(path.clone()),
                    new_path: Some(path),
                    old_kind: Some(Self::node_kind(previous_entry_mode)),
                    new_kind: Some(Self::node_kind(entry_mode)),
                    // a mode-only change keeps the blob id
                    content_changed: previous_id != id,
                    old_file: Some(FileId::new(previous_id.to_string())),
                    new_file: Some(FileId::new(id.to_string())),
                }
            }
            ChangeDetached::Rewrite {
                source_location,
                source_entry_mode,
                source_id,
                location,
                entry_mode,
                id,
                copy,
                ..
            } => {
                if copy {
                    // the source still exists, so a copy is a plain addition
                    TreeChange {
                        old_path: None,
                        new_path: Some(location.to_string()),
                        old_kind: None,
                        new_kind: Some(Self::node_kind(entry_mode)),
                        content_changed: true,
                        old_file: None,
                        new_file: Some(FileId::new(id.to_string())),
                    }
                } else {
                    TreeChange {
                        old_path: Some(source_location.to_string()),
                        new_path: Some(location.to_string()),
                        old_kind: Some(Self::node_kind(source_entry_mode)),
                        new_kind: Some(Self::node_kind(entry_mode)),
                        content_changed: source_id != id,
                        old_file: Some(FileId::new(source_id.to_string())),
                        new_file: Some(FileId::new(id.to_string())),
                    }
                }
            }
        }
    }
}

/// Branch handle captured at bind time: the short name HEAD pointed at, or
/// `"HEAD"` when detached. Queries resolve the tip through HEAD itself, so a
/// stale name never redirects them.
#[derive(Debug, Clone)]
pub struct GitBranch {
    name: String,
}

impl GitBranch {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl VcsBackend for GitBackend {
    type Repo = Repository;
    type Branch = GitBranch;
    type Tree = ObjectId;

    fn open_containing(&self, path: &Path) -> Result<(Repository, GitBranch)> {
        let repo = discover(path)?;
        let name = {
            let head = repo.head()?;
            head.referent_name()
                .map(|name| name.shorten().to_string())
                .unwrap_or_else(|| "HEAD".to_string())
        };
        debug!("discovered repository at {}", repo.path().display());
        Ok((repo, GitBranch { name }))
    }

    /// Walks the ancestor closure of HEAD, then emits a topological order
    /// with ties broken by commit time and id. Linear history comes out
    /// oldest first; merged branches interleave deterministically.
    fn merge_sorted_revisions(
        &self,
        repo: &Repository,
        _branch: &GitBranch,
    ) -> Result<Vec<RevisionId>> {
        let mut head = repo.head()?;
        if head.is_unborn() {
            return Ok(Vec::new());
        }
        let tip = head.peel_to_commit_in_place()?.id;

        let mut epochs: HashMap<ObjectId, i64> = HashMap::new();
        let mut parents: HashMap<ObjectId, Vec<ObjectId>> = HashMap::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([tip]);
        while let Some(commit_id) = stack.pop_back() {
            if epochs.contains_key(&commit_id) {
                continue;
            }
            let commit = repo.find_commit(commit_id)?;
            let secs = commit.time()?.seconds;
            let parent_ids: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
            for pid in &parent_ids {
                if !epochs.contains_key(pid) {
                    stack.push_back(*pid);
                }
            }
            epochs.insert(commit_id, secs);
            parents.insert(commit_id, parent_ids);
        }

        let mut indegree: HashMap<ObjectId, usize> = HashMap::new();
        let mut children: HashMap<ObjectId, Vec<ObjectId>> = HashMap::new();
        for (commit_id, parent_ids) in &parents {
            // octopus merges can repeat a parent
            let unique: HashSet<&ObjectId> = parent_ids.iter().collect();
            indegree.insert(*commit_id, unique.len());
            for pid in unique {
                children.entry(*pid).or_default().push(*commit_id);
            }
        }

        let mut ready: BinaryHeap<Reverse<(i64, ObjectId)>> = indegree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .filter_map(|(commit_id, _)| {
                epochs.get(commit_id).map(|&epoch| Reverse((epoch, *commit_id)))
            })
            .collect();

        let mut order = Vec::with_capacity(epochs.len());
        while let Some(Reverse((_, commit_id))) = ready.pop() {
            order.push(RevisionId::new(commit_id.to_string()));
            for child in children.remove(&commit_id).unwrap_or_default() {
                let Some(degree) = indegree.get_mut(&child) else {
                    continue;
                };
                *degree -= 1;
                if *degree == 0 {
                    if let Some(&epoch) = epochs.get(&child) {
                        ready.push(Reverse((epoch, child)));
                    }
                }
            }
        }
        if order.len() != epochs.len() {
            return Err(RevcalError::Backend(
                "revision graph is not acyclic".to_string(),
            ));
        }
        debug!("merge-sorted {} revisions from {tip}", order.len());
        Ok(order)
    }

    fn revision(&self, repo: &Repository, id: &RevisionId) -> Result<Revision> {
        let oid = Self::parse_id(id)?;
        let commit = repo.find_commit(oid)?;
        let epoch = commit.time()?.seconds;
        let committer = {
            let sig = commit.committer()?;
            format!("{} <{}>", sig.name, sig.email)
        };
        let message = commit.message_raw()?.to_string();
        let parent_ids = commit
            .parent_ids()
            .map(|pid| RevisionId::new(pid.to_string()))
            .collect();
        Ok(Revision {
            id: id.clone(),
            epoch,
            committer,
            message,
            parent_ids,
        })
    }

    fn revision_tree(&self, repo: &Repository, id: &RevisionId) -> Result<ObjectId> {
        let oid = Self::parse_id(id)?;
        Ok(repo.find_commit(oid)?.tree()?.id)
    }

    fn empty_tree(&self, repo: &Repository) -> Result<ObjectId> {
        Ok(ObjectId::empty_tree(repo.object_hash()))
    }

    fn tree_changes(
        &self,
        repo: &Repository,
        old: &ObjectId,
        new: &ObjectId,
    ) -> Result<Vec<TreeChange>> {
        let old_tree = Self::find_tree(repo, old)?;
        let new_tree = Self::find_tree(repo, new)?;
        let changes: Vec<ChangeDetached> =
            repo.diff_tree_to_tree(old_tree.as_ref(), new_tree.as_ref(), None)?;
        Ok(changes.into_iter().map(Self::convert_change).collect())
    }

    fn file_lines(&self, repo: &Repository, file: &FileId) -> Result<Vec<String>> {
        let oid = ObjectId::from_hex(file.as_str().as_bytes())
            .map_err(|e| RevcalError::Parse(format!("invalid content handle '{file}': {e}")))?;
        let object = repo.find_object(oid)?;
        // binary blobs read as empty, so they contribute no line counts
        let text = std::str::from_utf8(object.data.as_slice()).unwrap_or("");
        Ok(text.split_inclusive('\n').map(str::to_string).collect())
    }

    fn tags(&self, repo: &Repository, _branch: &GitBranch) -> Result<Vec<(String, RevisionId)>> {
        let platform = repo
            .references()
            .map_err(|e| RevcalError::Reference(e.to_string()))?;
        let iter = platform
            .tags()
            .map_err(|e| RevcalError::Reference(e.to_string()))?;

        let mut tags = Vec::new();
        for reference in iter {
            let mut reference = reference.map_err(|e| RevcalError::Reference(e.to_string()))?;
            let name = reference.name().shorten().to_string();
            // annotated tags peel through the tag object to the commit
            let target = reference
                .peel_to_id_in_place()
                .map_err(|e| RevcalError::Reference(e.to_string()))?;
            tags.push((name, RevisionId::new(target.to_string())));
        }
        Ok(tags)
    }
}

use similar::{capture_diff_slices, Algorithm, DiffTag};

use crate::backend::VcsBackend;
use crate::context::VcsContext;
use crate::error::{Result, RevcalError};
use crate::model::{NodeKind, RevisionId, ShortStat};

/// Tallies changed files and inserted/deleted lines between two tree
/// snapshots.
///
/// Only file entries are counted. An entry whose new side is a file counts
/// toward `files_changed` even when the old side was a directory or symlink,
/// though lines are only diffed file against file. An entry that stops
/// existing counts only if its old side was a file. Everything else, like a
/// file turning into a directory, is left out of the tally, as are entries
/// whose content did not change.
pub fn short_stat<B: VcsBackend>(
    backend: &B,
    repo: &B::Repo,
    old_tree: &B::Tree,
    new_tree: &B::Tree,
) -> Result<ShortStat> {
    let mut stat = ShortStat::default();
    for change in backend.tree_changes(repo, old_tree, new_tree)? {
        if !change.content_changed {
            continue;
        }
        match change.new_kind {
            Some(NodeKind::File) => {
                stat.files_changed += 1;
                match change.old_kind {
                    None => {
                        if let Some(file) = &change.new_file {
                            stat.insertions += backend.file_lines(repo, file)?.len() as u64;
                        }
                    }
                    Some(NodeKind::File) => {
                        if let (Some(old_file), Some(new_file)) =
                            (&change.old_file, &change.new_file)
                        {
                            let old_lines = backend.file_lines(repo, old_file)?;
                            let new_lines = backend.file_lines(repo, new_file)?;
                            let (insertions, deletions) =
                                diff_line_counts(&old_lines, &new_lines);
                            stat.insertions += insertions;
                            stat.deletions += deletions;
                        }
                    }
                    // became a file: counts as changed, no line delta
                    Some(_) => {}
                }
            }
            None => {
                if change.old_kind == Some(NodeKind::File) {
                    stat.files_changed += 1;
                    if let Some(file) = &change.old_file {
                        stat.deletions += backend.file_lines(repo, file)?.len() as u64;
                    }
                }
            }
            // directories, symlinks, submodule pointers
            Some(_) => {}
        }
    }
    Ok(stat)
}

/// Short-stat of one commit against its first parent, or against the empty
/// tree for a root commit.
pub fn commit_short_stat<B: VcsBackend>(
    ctx: &VcsContext<B>,
    id: &RevisionId,
) -> Result<ShortStat> {
    let Some(repo) = ctx.repo() else {
        return Err(RevcalError::Unbound);
    };
    let backend = ctx.backend();
    let rev = backend.revision(repo, id)?;
    let new_tree = backend.revision_tree(repo, id)?;
    let old_tree = match rev.parent_ids.first() {
        Some(parent) => backend.revision_tree(repo, parent)?,
        None => backend.empty_tree(repo)?,
    };
    short_stat(backend, repo, &old_tree, &new_tree)
}

/// [`commit_short_stat`] rendered in git's `--shortstat` shape, empty when
/// nothing changed.
pub fn commit_short_stat_line<B: VcsBackend>(
    ctx: &VcsContext<B>,
    id: &RevisionId,
) -> Result<String> {
    Ok(commit_short_stat(ctx, id)?.to_string())
}

fn diff_line_counts(old_lines: &[String], new_lines: &[String]) -> (u64, u64) {
    let mut insertions = 0u64;
    let mut deletions = 0u64;
    for op in capture_diff_slices(Algorithm::Myers, old_lines, new_lines) {
        if op.tag() == DiffTag::Equal {
            continue;
        }
        insertions += op.new_range().len() as u64;
        deletions += op.old_range().len() as u64;
    }
    (insertions, deletions)
}

//! Version-control history for calendar views.
//!
//! A host binds a [`VcsContext`] to the repository containing a configured
//! path, then asks for commits and tags inside julian-day windows and for
//! per-commit short-stats in git's `--shortstat` shape. Queries go through
//! the [`VcsBackend`] trait; [`GitBackend`] binds gix and [`MemoryBackend`]
//! scripts history in memory for tests.

pub mod backend;
pub mod context;
pub mod error;
pub mod git;
pub mod history;
pub mod memory;
pub mod model;
pub mod stat;
pub mod tags;
pub mod util;

pub use backend::VcsBackend;
pub use context::VcsContext;
pub use error::{Result, RevcalError};
pub use git::{GitBackend, GitBranch};
pub use history::{commit_record, list_commits};
pub use memory::{MemoryBackend, MemoryEntry, MemoryTree};
pub use model::{CommitRecord, FileId, NodeKind, Revision, RevisionId, ShortStat, TreeChange};
pub use stat::{commit_short_stat, commit_short_stat_line, short_stat};
pub use tags::{list_tags, tag_short_stat, tag_short_stat_line};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque token identifying one revision within a repository.
///
/// The git backend uses the full commit hex, the in-memory backend any label.
/// Core logic never inspects the contents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RevisionId(String);

impl RevisionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RevisionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RevisionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Opaque handle to one side's file content in a tree change, resolved
/// through `VcsBackend::file_lines`. The git backend stores a blob id here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Backend-level view of one revision's metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revision {
    pub id: RevisionId,
    pub epoch: i64,
    pub committer: String,
    pub message: String,
    pub parent_ids: Vec<RevisionId>,
}

/// Per-commit record handed to the calendar host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRecord {
    pub epoch: i64,
    pub author: String,
    pub short_hash: String,
    pub summary: String,
    pub description: String,
}

/// The (files changed, insertions, deletions) summary for one diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortStat {
    pub files_changed: u32,
    pub insertions: u64,
    pub deletions: u64,
}

/// Formats in the conventional git shortstat shape, e.g.
/// `3 files changed, 10 insertions(+), 2 deletions(-)`. Zero components are
/// omitted; the zero triple renders as the empty string.
impl fmt::Display for ShortStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        match self.files_changed {
            0 => {}
            1 => parts.push("1 file changed".to_string()),
            n => parts.push(format!("{n} files changed")),
        }
        match self.insertions {
            0 => {}
            1 => parts.push("1 insertion(+)".to_string()),
            n => parts.push(format!("{n} insertions(+)")),
        }
        match self.deletions {
            0 => {}
            1 => parts.push("1 deletion(-)".to_string()),
            n => parts.push(format!("{n} deletions(-)")),
        }
        f.write_str(&parts.join(", "))
    }
}

/// Node kinds a versioned tree entry can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
    Symlink,
    TreeReference,
}

/// One changed path between two tree snapshots. An absent side has `None`
/// for its path, kind, and file handle.
#[derive(Debug, Clone)]
pub struct TreeChange {
    pub old_path: Option<String>,
    pub new_path: Option<String>,
    pub old_kind: Option<NodeKind>,
    pub new_kind: Option<NodeKind>,
    pub content_changed: bool,
    pub old_file: Option<FileId>,
    pub new_file: Option<FileId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_stat_line_matches_git_shape() {
        let stat = ShortStat { files_changed: 3, insertions: 10, deletions: 2 };
        assert_eq!(stat.to_string(), "3 files changed, 10 insertions(+), 2 deletions(-)");
    }

    #[test]
    fn short_stat_line_uses_singular_forms() {
        let stat = ShortStat { files_changed: 1, insertions: 1, deletions: 1 };
        assert_eq!(stat.to_string(), "1 file changed, 1 insertion(+), 1 deletion(-)");
    }

    #[test]
    fn short_stat_line_omits_zero_components() {
        let stat = ShortStat { files_changed: 2, insertions: 5, deletions: 0 };
        assert_eq!(stat.to_string(), "2 files changed, 5 insertions(+)");
        let stat = ShortStat { files_changed: 1, insertions: 0, deletions: 4 };
        assert_eq!(stat.to_string(), "1 file changed, 4 deletions(-)");
        let stat = ShortStat { files_changed: 1, insertions: 0, deletions: 0 };
        assert_eq!(stat.to_string(), "1 file changed");
    }

    #[test]
    fn zero_short_stat_renders_empty() {
        assert_eq!(ShortStat::default().to_string(), "");
    }

    #[test]
    fn commit_record_serializes_with_host_facing_keys() {
        let record = CommitRecord {
            epoch: 1600000000,
            author: "Jane Dev <jane@example.com>".to_string(),
            short_hash: "abc123".to_string(),
            summary: "first line".to_string(),
            description: "rest".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 5);
        for key in ["epoch", "author", "shortHash", "summary", "description"] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(value["shortHash"], "abc123");
    }

    #[test]
    fn revision_id_round_trips_as_plain_string() {
        let id = RevisionId::new("deadbeef");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"deadbeef\"");
        assert_eq!(id.to_string(), "deadbeef");
    }
}

use tracing::debug;

use crate::backend::VcsBackend;
use crate::context::VcsContext;
use crate::error::{Result, RevcalError};
use crate::model::{CommitRecord, RevisionId};
use crate::util::epoch_from_jd;

/// Commits on the bound branch whose commit time falls inside the julian-day
/// window `[start_jd, end_jd)`, as `(epoch, id)` pairs in the backend's
/// forward merge-sorted order.
///
/// Returns an empty list when the context is unbound. The scan walks the
/// merge-sorted history once and stops at the first revision timestamped at
/// or past the window end; because that order is topological rather than
/// chronological, a merge landing an old-timestamped revision after a newer
/// one can end the scan before later in-window revisions are seen.
pub fn list_commits<B: VcsBackend>(
    ctx: &VcsContext<B>,
    start_jd: i64,
    end_jd: i64,
) -> Result<Vec<(i64, RevisionId)>> {
    let (Some(repo), Some(branch)) = (ctx.repo(), ctx.branch()) else {
        return Ok(Vec::new());
    };
    let backend = ctx.backend();
    let start_epoch = epoch_from_jd(start_jd);
    let end_epoch = epoch_from_jd(end_jd);

    let mut data = Vec::new();
    for id in backend.merge_sorted_revisions(repo, branch)? {
        let epoch = backend.revision(repo, &id)?.epoch;
        if epoch < start_epoch {
            continue;
        }
        if epoch >= end_epoch {
            break;
        }
        data.push((epoch, id));
    }
    debug!("{} commits in jd window [{start_jd}, {end_jd})", data.len());
    Ok(data)
}

/// Host-facing metadata for one revision. The first message line becomes the
/// summary and the remainder, joined as written, the description.
pub fn commit_record<B: VcsBackend>(ctx: &VcsContext<B>, id: &RevisionId) -> Result<CommitRecord> {
    let Some(repo) = ctx.repo() else {
        return Err(RevcalError::Unbound);
    };
    let rev = ctx.backend().revision(repo, id)?;
    let mut lines = rev.message.split('\n');
    let summary = lines.next().unwrap_or("").to_string();
    let description = lines.collect::<Vec<_>>().join("\n");
    Ok(CommitRecord {
        epoch: rev.epoch,
        author: rev.committer,
        short_hash: id.to_string(),
        summary,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;
    use crate::model::Revision;

    // JD 2451545 is 2000-01-01; the scripted history lives in that week.
    const BASE_JD: i64 = 2_451_545;

    fn rev(id: &str, epoch: i64, message: &str) -> Revision {
        Revision {
            id: RevisionId::new(id),
            epoch,
            committer: "Jane Dev <jane@example.com>".to_string(),
            message: message.to_string(),
            parent_ids: Vec::new(),
        }
    }

    fn noon(day: i64) -> i64 {
        epoch_from_jd(BASE_JD + day) + 12 * 3600
    }

    fn bound(backend: MemoryBackend) -> VcsContext<MemoryBackend> {
        let mut ctx = VcsContext::new(backend, "/repo");
        ctx.bind().unwrap();
        ctx
    }

    fn three_day_history() -> MemoryBackend {
        let mut backend = MemoryBackend::new();
        backend.add_commit(rev("r1", noon(0), "first"), &[]);
        backend.add_commit(rev("r2", noon(1), "second"), &[]);
        backend.add_commit(rev("r3", noon(2), "third"), &[]);
        backend
    }

    #[test]
    fn unbound_context_lists_nothing() {
        let ctx = VcsContext::new(three_day_history(), "/repo");
        assert_eq!(list_commits(&ctx, BASE_JD, BASE_JD + 7).unwrap(), vec![]);
    }

    #[test]
    fn window_keeps_only_contained_commits() {
        let ctx = bound(three_day_history());
        let commits = list_commits(&ctx, BASE_JD + 1, BASE_JD + 2).unwrap();
        assert_eq!(commits, vec![(noon(1), RevisionId::new("r2"))]);
    }

    #[test]
    fn full_window_lists_history_in_order() {
        let ctx = bound(three_day_history());
        let ids: Vec<String> = list_commits(&ctx, BASE_JD, BASE_JD + 7)
            .unwrap()
            .into_iter()
            .map(|(_, id)| id.to_string())
            .collect();
        assert_eq!(ids, vec!["r1", "r2", "r3"]);
    }

    #[test]
    fn window_start_is_inclusive_and_end_exclusive() {
        let mut backend = MemoryBackend::new();
        backend.add_commit(rev("midnight", epoch_from_jd(BASE_JD + 1), "on the line"), &[]);
        let ctx = bound(backend);

        let starting_on_it = list_commits(&ctx, BASE_JD + 1, BASE_JD + 2).unwrap();
        assert_eq!(starting_on_it.len(), 1);

        let ending_on_it = list_commits(&ctx, BASE_JD, BASE_JD + 1).unwrap();
        assert!(ending_on_it.is_empty());
    }

    #[test]
    fn scan_ends_at_first_commit_past_window() {
        // Topological order puts a commit timestamped past the window before
        // an in-window one; the scan must stop there, not skip over it.
        let mut backend = MemoryBackend::new();
        backend.add_commit(rev("r1", noon(0), "early"), &[]);
        backend.add_commit(rev("far", noon(5), "future"), &[]);
        backend.add_commit(rev("r2", noon(1), "shadowed"), &[]);
        let ctx = bound(backend);

        let commits = list_commits(&ctx, BASE_JD, BASE_JD + 3).unwrap();
        assert_eq!(commits, vec![(noon(0), RevisionId::new("r1"))]);
    }

    #[test]
    fn commits_before_the_window_are_skipped_not_terminal() {
        let ctx = bound(three_day_history());
        let commits = list_commits(&ctx, BASE_JD + 2, BASE_JD + 7).unwrap();
        assert_eq!(commits, vec![(noon(2), RevisionId::new("r3"))]);
    }

    #[test]
    fn record_splits_summary_from_description() {
        let mut backend = MemoryBackend::new();
        backend.add_commit(
            rev("r1", noon(0), "Add parser\n\nHandles quoted fields.\nAlso tabs."),
            &[],
        );
        let ctx = bound(backend);

        let record = commit_record(&ctx, &RevisionId::new("r1")).unwrap();
        assert_eq!(record.summary, "Add parser");
        assert_eq!(record.description, "\nHandles quoted fields.\nAlso tabs.");
        assert_eq!(record.author, "Jane Dev <jane@example.com>");
        assert_eq!(record.short_hash, "r1");
        assert_eq!(record.epoch, noon(0));
    }

    #[test]
    fn single_line_message_has_empty_description() {
        let mut backend = MemoryBackend::new();
        backend.add_commit(rev("r1", noon(0), "Quick fix"), &[]);
        let ctx = bound(backend);

        let record = commit_record(&ctx, &RevisionId::new("r1")).unwrap();
        assert_eq!(record.summary, "Quick fix");
        assert_eq!(record.description, "");
    }

    #[test]
    fn record_on_unbound_context_is_an_error() {
        let ctx = VcsContext::new(three_day_history(), "/repo");
        let err = commit_record(&ctx, &RevisionId::new("r1")).unwrap_err();
        assert!(matches!(err, RevcalError::Unbound));
    }

    #[test]
    fn record_for_unknown_revision_is_an_error() {
        let ctx = bound(three_day_history());
        let err = commit_record(&ctx, &RevisionId::new("missing")).unwrap_err();
        assert!(matches!(err, RevcalError::RevisionNotFound(_)));
    }
}

use tracing::debug;

use crate::backend::VcsBackend;
use crate::context::VcsContext;
use crate::error::Result;
use crate::model::ShortStat;
use crate::util::epoch_from_jd;

/// Tags whose target revision is timestamped inside the julian-day window
/// `[start_jd, end_jd)`, as `(epoch, name)` pairs sorted by epoch and then
/// by name. Empty when the context is unbound.
pub fn list_tags<B: VcsBackend>(
    ctx: &VcsContext<B>,
    start_jd: i64,
    end_jd: i64,
) -> Result<Vec<(i64, String)>> {
    let (Some(repo), Some(branch)) = (ctx.repo(), ctx.branch()) else {
        return Ok(Vec::new());
    };
    let backend = ctx.backend();
    let window = epoch_from_jd(start_jd)..epoch_from_jd(end_jd);

    let mut data = Vec::new();
    for (name, id) in backend.tags(repo, branch)? {
        let epoch = backend.revision(repo, &id)?.epoch;
        if window.contains(&epoch) {
            data.push((epoch, name));
        }
    }
    data.sort();
    debug!("{} tags in jd window [{start_jd}, {end_jd})", data.len());
    Ok(data)
}

/// Diff statistics between two tags. Not implemented; always reports the
/// zero tally so hosts can render a stable placeholder.
pub fn tag_short_stat<B: VcsBackend>(
    _ctx: &VcsContext<B>,
    _prev_tag: &str,
    _tag: &str,
) -> Result<ShortStat> {
    Ok(ShortStat::default())
}

/// [`tag_short_stat`] rendered as a line; the zero tally renders empty.
pub fn tag_short_stat_line<B: VcsBackend>(
    ctx: &VcsContext<B>,
    prev_tag: &str,
    tag: &str,
) -> Result<String> {
    Ok(tag_short_stat(ctx, prev_tag, tag)?.to_string())
}

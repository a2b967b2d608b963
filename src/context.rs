use std::path::{Path, PathBuf};

use tracing::debug;

use crate::backend::VcsBackend;
use crate::error::Result;

/// Repository handles for one calendar view, owned by the host and rebound
/// whenever the configured path changes.
///
/// A context starts unbound. [`bind`](Self::bind) opens the repository at or
/// above the root path; [`unbind`](Self::unbind) drops the handles again and
/// is safe to call at any time. History and tag queries on an unbound
/// context return empty results so a view without a repository stays blank
/// instead of failing.
pub struct VcsContext<B: VcsBackend> {
    backend: B,
    root: PathBuf,
    repo: Option<B::Repo>,
    branch: Option<B::Branch>,
}

impl<B: VcsBackend> VcsContext<B> {
    pub fn new(backend: B, root: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            root: root.into(),
            repo: None,
            branch: None,
        }
    }

    /// Opens the repository containing the root path and stores the handles.
    /// Binding an already bound context replaces the old handles.
    pub fn bind(&mut self) -> Result<()> {
        let (repo, branch) = self.backend.open_containing(&self.root)?;
        self.repo = Some(repo);
        self.branch = Some(branch);
        debug!("bound repository context at {}", self.root.display());
        Ok(())
    }

    /// Drops the repository handles. Idempotent.
    pub fn unbind(&mut self) {
        self.repo = None;
        self.branch = None;
    }

    pub fn is_bound(&self) -> bool {
        self.repo.is_some() && self.branch.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn repo(&self) -> Option<&B::Repo> {
        self.repo.as_ref()
    }

    pub fn branch(&self) -> Option<&B::Branch> {
        self.branch.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;

    #[test]
    fn starts_unbound() {
        let ctx = VcsContext::new(MemoryBackend::new(), "/work/project");
        assert!(!ctx.is_bound());
        assert!(ctx.repo().is_none());
        assert!(ctx.branch().is_none());
        assert_eq!(ctx.root(), Path::new("/work/project"));
    }

    #[test]
    fn bind_then_unbind_round_trips() {
        let mut ctx = VcsContext::new(MemoryBackend::new(), "/work/project");
        ctx.bind().unwrap();
        assert!(ctx.is_bound());
        ctx.unbind();
        assert!(!ctx.is_bound());
    }

    #[test]
    fn unbind_is_idempotent() {
        let mut ctx = VcsContext::new(MemoryBackend::new(), "/work/project");
        ctx.unbind();
        ctx.unbind();
        assert!(!ctx.is_bound());

        ctx.bind().unwrap();
        ctx.unbind();
        ctx.unbind();
        assert!(!ctx.is_bound());
    }

    #[test]
    fn rebinding_keeps_the_context_usable() {
        let mut ctx = VcsContext::new(MemoryBackend::new(), "/work/project");
        ctx.bind().unwrap();
        ctx.bind().unwrap();
        assert!(ctx.is_bound());
    }
}

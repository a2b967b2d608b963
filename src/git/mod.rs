mod repo;

pub use repo::{GitBackend, GitBranch};

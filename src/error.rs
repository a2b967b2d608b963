use thiserror::Error;

pub type Result<T> = std::result::Result<T, RevcalError>;

#[derive(Error, Debug)]
pub enum RevcalError {
    #[error("no repository is bound to the context")]
    Unbound,
    #[error("revision not found: {0}")]
    RevisionNotFound(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("reference error: {0}")]
    Reference(String),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("repository not found: {0}")]
    Discover(#[from] Box<gix::discover::Error>),
    #[error("reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("revision lookup error: {0}")]
    CommitFind(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("commit decode error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("tree diff error: {0}")]
    TreeDiff(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::discover::Error> for RevcalError {
    fn from(err: gix::discover::Error) -> Self {
        RevcalError::Discover(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for RevcalError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        RevcalError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for RevcalError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        RevcalError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::Error> for RevcalError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        RevcalError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for RevcalError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        RevcalError::CommitFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for RevcalError {
    fn from(err: gix::object::commit::Error) -> Self {
        RevcalError::Commit(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for RevcalError {
    fn from(err: gix::objs::decode::Error) -> Self {
        RevcalError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for RevcalError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        RevcalError::TreeDiff(Box::new(err))
    }
}

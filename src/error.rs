use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by a ranking pass.
///
/// The engine itself has no fallible I/O; everything here is either a
/// missing viewer or a storage-collaborator failure passed through.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("viewer {0} not found")]
    ViewerNotFound(Uuid),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

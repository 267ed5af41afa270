use crate::thread::Tid;
use thiserror::Error;

/// Errors reported by the lifecycle operations.
///
/// Logic invariant violations are not represented here: they mean the scheduler
/// state is corrupt and end the process instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An operation that needs a scheduler ran before `init` on this OS thread.
    #[error("scheduler not initialized on this thread")]
    NotInitialized,

    /// `init` ran a second time; the existing scheduler is left untouched.
    #[error("scheduler already initialized on this thread")]
    AlreadyInitialized,

    /// The thread table is full.
    #[error("thread limit reached ({max} live threads)")]
    ThreadLimit { max: usize },

    /// No stack of the requested size could be mapped.
    #[error("failed to allocate a {size} byte thread stack")]
    StackAllocation { size: usize },

    /// The id names no live thread: it was never created or is already reclaimed.
    #[error("no thread with id {0}")]
    NoSuchThread(Tid),

    /// Joining this thread could never complete (the caller itself or idle).
    #[error("joining thread {0} would never complete")]
    Deadlock(Tid),

    /// The scheduler configuration was rejected.
    #[error("invalid scheduler configuration: {0}")]
    Config(String),
}

impl Error {
    /// The errno a C-style caller would see for this error.
    pub fn errno(&self) -> i32 {
        match self {
            Error::NotInitialized => libc::EPERM,
            Error::AlreadyInitialized => libc::EBUSY,
            Error::ThreadLimit { .. } => libc::EAGAIN,
            Error::StackAllocation { .. } => libc::ENOMEM,
            Error::NoSuchThread(_) => libc::ESRCH,
            Error::Deadlock(_) => libc::EDEADLK,
            Error::Config(_) => libc::EINVAL,
        }
    }
}

impl From<crate::config::SchedulerConfigBuilderError> for Error {
    fn from(err: crate::config::SchedulerConfigBuilderError) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = core::result::Result<T, Error>;

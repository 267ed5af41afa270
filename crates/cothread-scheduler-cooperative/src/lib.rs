pub mod clock;
pub mod config;
mod context_glue;
pub mod error;
pub mod observer;
pub mod ops;
pub mod ring;
pub mod scheduler;
pub mod sleep;
pub mod status;
pub mod thread;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{SchedulerConfig, SchedulerConfigBuilder, DEFAULT_STACK_SIZE, MAX_THREADS};
pub use error::{Error, Result};
pub use observer::{BlockReason, Event, LogObserver, Observer};
pub use ops::{
    create, exit, init, init_with, join, self_id, sleep, sleep_for, spawn, status, thread_count,
    yield_now,
};
pub use scheduler::{Dispatch, IdleAction, Scheduler};
pub use status::StatusSnapshot;
pub use thread::{ThreadControlBlock, ThreadState, Tid, IDLE_TID, MAIN_TID};

//! Cooperative user-level threads.
//!
//! All threads share the OS thread that called [`init`] and run one at a time
//! in round-robin order. A thread only gives up the processor in [`yield_now`],
//! [`join`], [`sleep`] / [`sleep_for`] or [`exit`]; returning from the entry
//! closure is the same as calling [`exit`].
//!
//! ```no_run
//! cothread::init().unwrap();
//! let worker = cothread::create(|n: u32| println!("got {n}"), 7).unwrap();
//! cothread::join(worker).unwrap();
//! ```
//!
//! Stacks are private per thread and cannot be shared across OS threads, so
//! nothing here is `Send`.

pub use scheduler_cooperative::{
    create, exit, init, init_with, join, self_id, sleep, sleep_for, spawn, status, thread_count,
    yield_now,
};
pub use scheduler_cooperative::{
    BlockReason, Clock, Error, Event, LogObserver, ManualClock, Observer, Result, SchedulerConfig,
    SchedulerConfigBuilder, StatusSnapshot, SystemClock, ThreadState, Tid, IDLE_TID, MAIN_TID,
};

/// Lower-level pieces for hosts that drive a [`Scheduler`](scheduler::Scheduler)
/// directly or want to inspect it.
pub mod scheduler {
    pub use scheduler_cooperative::clock;
    pub use scheduler_cooperative::config;
    pub use scheduler_cooperative::observer;
    pub use scheduler_cooperative::ring::ReadyRing;
    pub use scheduler_cooperative::sleep::SleepSet;
    pub use scheduler_cooperative::status::{SleeperStatus, ThreadStatus};
    pub use scheduler_cooperative::{Dispatch, IdleAction, Scheduler, ThreadControlBlock};
}

/// Execution contexts and stacks for the build target.
pub mod arch {
    pub use ::arch::{Context, Stack};
}

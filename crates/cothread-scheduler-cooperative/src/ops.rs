//! The lifecycle API, operating on the scheduler installed on the calling OS thread.

use crate::config::SchedulerConfig;
use crate::context_glue::Switch;
use crate::error::{Error, Result};
use crate::scheduler::{Dispatch, IdleAction, Scheduler};
use crate::status::StatusSnapshot;
use crate::thread::{Tid, MAIN_TID};
use foundation::utils::GlobalOption;
use std::process;
use std::time::Duration;

thread_local! {
    static SCHEDULER: GlobalOption<Scheduler> = const { GlobalOption::none() };
}

impl Scheduler {
    /// Installs `config`'s scheduler on this OS thread.
    pub fn init(config: SchedulerConfig) -> Result<()> {
        if SCHEDULER.with(GlobalOption::is_some) {
            return Err(Error::AlreadyInitialized);
        }
        let scheduler = Scheduler::new(config)?;
        SCHEDULER
            .with(|slot| slot.set(scheduler))
            .map_err(|_| Error::AlreadyInitialized)
    }

    #[inline(always)]
    pub fn with_mut<R>(f: impl FnOnce(&mut Scheduler) -> R) -> Option<R> {
        SCHEDULER.with(|slot| slot.with_some_mut(f))
    }

    #[inline(always)]
    pub fn with<R>(f: impl FnOnce(&Scheduler) -> R) -> Option<R> {
        SCHEDULER.with(|slot| slot.with_some(f))
    }
}

/// Runs one scheduling operation and, once the scheduler is released,
/// transfers control if it picked another thread.
fn run_pass(pass: impl FnOnce(&mut Scheduler) -> Dispatch) -> Option<()> {
    let switch: Option<Switch> = Scheduler::with_mut(|s| {
        let dispatch = pass(s);
        s.switch_for(dispatch)
    })?;
    if let Some(switch) = switch {
        unsafe { switch.perform() };
    }
    Some(())
}

pub fn init() -> Result<()> {
    init_with(SchedulerConfig::default())
}

pub fn init_with(config: SchedulerConfig) -> Result<()> {
    Scheduler::init(config)?;
    log::debug!("[sched] initialized");
    Ok(())
}

/// Creates a thread that will run `entry(arg)` once the round-robin reaches it.
pub fn create<A, F>(entry: F, arg: A) -> Result<Tid>
where
    A: 'static,
    F: FnOnce(A) + 'static,
{
    spawn(move || entry(arg))
}

pub fn spawn<F>(f: F) -> Result<Tid>
where
    F: FnOnce() + 'static,
{
    Scheduler::with_mut(|s| s.create(Box::new(f))).unwrap_or(Err(Error::NotInitialized))
}

pub fn self_id() -> Tid {
    Scheduler::with(Scheduler::current).unwrap_or(MAIN_TID)
}

/// Logs and aborts; every operation that may switch needs an installed scheduler.
fn uninitialized(op: &str) -> ! {
    log::error!("[sched] {} called before init", op);
    process::abort()
}

pub fn yield_now() {
    if run_pass(Scheduler::yield_current).is_none() {
        uninitialized("yield_now");
    }
}

pub fn join(target: Tid) -> Result<()> {
    let switch = Scheduler::with_mut(|s| {
        s.join_current(target)
            .map(|dispatch| dispatch.and_then(|d| s.switch_for(d)))
    })
    .ok_or(Error::NotInitialized)??;

    if let Some(switch) = switch {
        unsafe { switch.perform() };
    }
    Ok(())
}

pub fn exit() -> ! {
    if run_pass(Scheduler::exit_current).is_none() {
        uninitialized("exit");
    }
    log::error!(
        "[sched] thread {} resumed after exit, scheduler state is corrupt",
        self_id()
    );
    process::abort()
}

pub fn sleep(seconds: u32) {
    sleep_for(Duration::from_secs(u64::from(seconds)));
}

pub fn sleep_for(duration: Duration) {
    if run_pass(|s| s.sleep_current(duration)).is_none() {
        uninitialized("sleep");
    }
}

pub fn status() -> Option<StatusSnapshot> {
    Scheduler::with(Scheduler::status)
}

pub fn thread_count() -> usize {
    Scheduler::with(Scheduler::thread_count).unwrap_or(0)
}

/// Body of the idle thread.
pub(crate) fn idle_loop() {
    loop {
        let Some(action) = Scheduler::with(Scheduler::idle_action) else {
            return;
        };

        match action {
            IdleAction::Yield => {}
            IdleAction::SleepUntil(deadline) => {
                Scheduler::with(|s| s.clock().wait_until(deadline));
            }
            IdleAction::Finished => {
                log::info!("[sched] every thread has exited");
                process::exit(0);
            }
            IdleAction::Deadlock => {
                if let Some(status) = status() {
                    log::error!("[sched] deadlock, every live thread waits on a join\n{}", status);
                }
                process::abort();
            }
        }

        yield_now();
    }
}

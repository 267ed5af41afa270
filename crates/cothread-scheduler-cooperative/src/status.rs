use crate::scheduler::Scheduler;
use crate::thread::{ThreadState, Tid, IDLE_TID};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadStatus {
    pub tid: Tid,
    pub state: ThreadState,
    pub joiners: Vec<Tid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SleeperStatus {
    pub tid: Tid,
    pub remaining: Duration,
    pub joiners: Vec<Tid>,
}

/// Point-in-time view of the scheduler, rendered by `Display` as the
/// diagnostic dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub current: Tid,
    /// Ring members starting at the cursor.
    pub ring: Vec<ThreadStatus>,
    /// Sleepers, soonest first.
    pub sleepers: Vec<SleeperStatus>,
    /// Threads blocked in a join (neither in the ring nor asleep).
    pub joining: Vec<Tid>,
}

impl Scheduler {
    pub fn status(&self) -> StatusSnapshot {
        let describe = |tid: Tid| ThreadStatus {
            tid,
            state: self.tcb(tid).state,
            joiners: self.tcb(tid).joiners.clone(),
        };

        let ring = match self.ring.cursor() {
            Some(cursor) => self.ring.iter_from(cursor).map(describe).collect(),
            None => Vec::new(),
        };

        let now = self.config.clock.now();
        let sleepers = self
            .sleepers
            .entries()
            .into_iter()
            .map(|(tid, deadline)| SleeperStatus {
                tid,
                remaining: deadline.saturating_duration_since(now),
                joiners: self.tcb(tid).joiners.clone(),
            })
            .collect();

        let joining = self
            .threads
            .values()
            .filter(|tcb| tcb.state == ThreadState::Blocked && !self.sleepers.contains(tcb.tid))
            .map(|tcb| tcb.tid)
            .collect();

        StatusSnapshot {
            current: self.current,
            ring,
            sleepers,
            joining,
        }
    }
}

fn write_joiners(f: &mut fmt::Formatter<'_>, joiners: &[Tid]) -> fmt::Result {
    for tid in joiners {
        write!(f, "-->({})", tid)?;
    }
    Ok(())
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "----- scheduler: {} threads in ring, running {} -----",
            self.ring.len(),
            self.current
        )?;
        for (i, thread) in self.ring.iter().enumerate() {
            let marker = if i == 0 { "next->" } else { "      " };
            write!(
                f,
                "| {} tid:{:<4} state:{}",
                marker,
                thread.tid,
                thread.state.as_char()
            )?;
            if thread.tid == IDLE_TID {
                write!(f, "  [idle]")?;
            }
            write!(f, "  waiters")?;
            write_joiners(f, &thread.joiners)?;
            writeln!(f)?;
        }

        writeln!(f, "----- sleeping threads -----")?;
        for sleeper in &self.sleepers {
            write!(
                f,
                "|        tid:{:<4} state:B  wakes in {:.3}s  waiters",
                sleeper.tid,
                sleeper.remaining.as_secs_f64()
            )?;
            write_joiners(f, &sleeper.joiners)?;
            writeln!(f)?;
        }

        if !self.joining.is_empty() {
            write!(f, "----- blocked in join:")?;
            for tid in &self.joining {
                write!(f, " {}", tid)?;
            }
            writeln!(f)?;
        }
        write!(f, "----------------------------")
    }
}

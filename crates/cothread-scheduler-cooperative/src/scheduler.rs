use crate::clock::Clock;
use crate::config::SchedulerConfig;
use crate::context_glue::thread_start;
use crate::error::{Error, Result};
use crate::observer::{BlockReason, Event};
use crate::ring::ReadyRing;
use crate::sleep::SleepSet;
use crate::thread::{ThreadControlBlock, ThreadState, Tid, IDLE_TID, MAIN_TID};
use arch::Stack;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Outcome of one scheduling pass: `prev` gives up the processor to `next`.
///
/// When both are the same thread it simply keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub prev: Tid,
    pub next: Tid,
}

impl Dispatch {
    pub fn is_switch(&self) -> bool {
        self.prev != self.next
    }
}

/// What the idle thread should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleAction {
    /// Some other thread is ready.
    Yield,
    /// Nothing is ready, but a sleeper wakes at the deadline.
    SleepUntil(Instant),
    /// Idle is the only live thread left.
    Finished,
    /// Every live thread is blocked on a join that can never complete.
    Deadlock,
}

/// Round-robin cooperative scheduler for one OS thread.
///
/// Every operation that gives up the processor updates the bookkeeping and
/// returns a [`Dispatch`]; turning it into an actual context switch is left to
/// the caller, after it has stopped borrowing the scheduler.
pub struct Scheduler {
    pub(crate) config: SchedulerConfig,
    pub(crate) threads: BTreeMap<Tid, Box<ThreadControlBlock>>,
    pub(crate) ring: ReadyRing,
    pub(crate) sleepers: SleepSet,
    pub(crate) current: Tid,
    pub(crate) next_tid: Tid,
}

impl Scheduler {
    /// Sets up the idle thread and adopts the caller as the running main thread.
    pub fn new(config: SchedulerConfig) -> Result<Self> {
        let idle_stack = Stack::new(config.stack_size).ok_or(Error::StackAllocation {
            size: config.stack_size,
        })?;

        let mut scheduler = Self {
            config,
            threads: BTreeMap::new(),
            ring: ReadyRing::new(),
            sleepers: SleepSet::new(),
            current: MAIN_TID,
            next_tid: MAIN_TID + 1,
        };

        let idle = ThreadControlBlock::new(
            IDLE_TID,
            idle_stack,
            thread_start,
            Box::new(crate::ops::idle_loop),
        );
        scheduler.threads.insert(IDLE_TID, Box::new(idle));
        scheduler
            .threads
            .insert(MAIN_TID, Box::new(ThreadControlBlock::adopt_current(MAIN_TID)));

        scheduler.ring.insert_first(IDLE_TID);
        scheduler.ring.insert_after(IDLE_TID, MAIN_TID);
        // As if main had just been dispatched: the search resumes past it.
        scheduler.ring.set_cursor(IDLE_TID);

        scheduler.notify(Event::Created { tid: IDLE_TID });
        scheduler.notify(Event::Created { tid: MAIN_TID });
        Ok(scheduler)
    }

    pub fn current(&self) -> Tid {
        self.current
    }

    /// Live registry entries, idle and not yet reclaimed threads included.
    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    pub fn contains(&self, tid: Tid) -> bool {
        self.threads.contains_key(&tid)
    }

    pub fn state(&self, tid: Tid) -> Option<ThreadState> {
        self.threads.get(&tid).map(|tcb| tcb.state)
    }

    pub fn ring(&self) -> &ReadyRing {
        &self.ring
    }

    pub fn sleepers(&self) -> &SleepSet {
        &self.sleepers
    }

    pub fn clock(&self) -> &Rc<dyn Clock> {
        &self.config.clock
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Registers a new ready thread right after the running one and makes it
    /// the next thread considered.
    pub fn create(&mut self, entry: Box<dyn FnOnce()>) -> Result<Tid> {
        // Exited threads give their slot back before the limit is checked.
        self.reap_terminated();
        if self.threads.len() >= self.config.max_threads {
            return Err(Error::ThreadLimit {
                max: self.config.max_threads,
            });
        }

        let size = self.config.stack_size;
        let stack = Stack::new(size).ok_or(Error::StackAllocation { size })?;

        let tid = self.next_tid;
        self.next_tid += 1;

        let tcb = ThreadControlBlock::new(tid, stack, thread_start, entry);
        self.threads.insert(tid, Box::new(tcb));
        self.ring.insert_after(self.current, tid);
        self.ring.set_cursor(tid);

        self.notify(Event::Created { tid });
        Ok(tid)
    }

    pub fn yield_current(&mut self) -> Dispatch {
        self.schedule()
    }

    /// Blocks the running thread until `target` exits.
    ///
    /// Returns `Ok(None)` when `target` has already terminated, in which case
    /// the caller keeps running.
    pub fn join_current(&mut self, target: Tid) -> Result<Option<Dispatch>> {
        let me = self.current;
        if target == me || target == IDLE_TID {
            return Err(Error::Deadlock(target));
        }

        let tcb = self
            .threads
            .get_mut(&target)
            .ok_or(Error::NoSuchThread(target))?;
        if tcb.is_terminated() {
            return Ok(None);
        }
        tcb.joiners.push(me);

        self.block(me);
        self.notify(Event::Blocked {
            tid: me,
            reason: BlockReason::Join(target),
        });
        Ok(Some(self.schedule()))
    }

    /// Wakes every joiner and terminates the running thread.
    ///
    /// The thread stays registered (its stack is still in use) until a later
    /// pass finds it at the cursor.
    ///
    /// # Panics
    /// Panics when called for the idle thread.
    pub fn exit_current(&mut self) -> Dispatch {
        let me = self.current;
        assert_ne!(me, IDLE_TID, "idle thread cannot exit");

        let joiners = std::mem::take(&mut self.tcb_mut(me).joiners);
        let mut anchor = me;
        for (i, tid) in joiners.into_iter().enumerate() {
            self.tcb_mut(tid).state = ThreadState::Ready;
            self.ring.insert_after(anchor, tid);
            if i == 0 {
                self.ring.set_cursor(tid);
            }
            anchor = tid;
            self.notify(Event::Woken { tid });
        }

        self.tcb_mut(me).state = ThreadState::Terminated;
        self.notify(Event::Exited { tid: me });
        self.schedule()
    }

    /// Blocks the running thread for at least `duration`.
    pub fn sleep_current(&mut self, duration: Duration) -> Dispatch {
        let me = self.current;
        assert_ne!(me, IDLE_TID, "idle thread cannot sleep");

        let deadline = self.config.clock.now() + duration;
        if let Some(stale) = self.sleepers.insert(me, deadline) {
            log::warn!(
                "[sched] thread {} was still asleep (due {:?}), deadline moved",
                me,
                stale
            );
        }
        self.tcb_mut(me).wake_time = Some(deadline);
        self.block(me);

        self.notify(Event::Blocked {
            tid: me,
            reason: BlockReason::Sleep(deadline),
        });
        self.schedule()
    }

    pub fn idle_action(&self) -> IdleAction {
        let others_ready = self.ring.iter_from(IDLE_TID).any(|tid| {
            tid != IDLE_TID && self.state(tid) == Some(ThreadState::Ready)
        });
        if others_ready {
            return IdleAction::Yield;
        }

        if let Some(deadline) = self.sleepers.earliest() {
            return IdleAction::SleepUntil(deadline);
        }

        let live = self
            .threads
            .values()
            .any(|tcb| tcb.tid != IDLE_TID && !tcb.is_terminated());
        if live {
            IdleAction::Deadlock
        } else {
            IdleAction::Finished
        }
    }

    /// One scheduling pass: wake due sleepers, reclaim terminated threads,
    /// demote the caller, pick the next ready thread round-robin.
    pub(crate) fn schedule(&mut self) -> Dispatch {
        let prev = self.current;

        self.wake_expired();
        self.reap_terminated();

        if let Some(tcb) = self.threads.get_mut(&prev) {
            if tcb.state == ThreadState::Running {
                tcb.state = ThreadState::Ready;
            }
        }

        let next = self.select_next();
        self.tcb_mut(next).state = ThreadState::Running;
        self.current = next;
        let after = self
            .ring
            .next(next)
            .unwrap_or_else(|| panic!("selected thread {} is not in the ring", next));
        self.ring.set_cursor(after);

        self.notify(Event::Dispatched { prev, next });
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("\n{}", self.status());
        }

        Dispatch { prev, next }
    }

    fn wake_expired(&mut self) {
        if self.sleepers.is_empty() {
            return;
        }

        let now = self.config.clock.now();
        let cursor = self.ring.cursor().expect("ready ring is empty");
        let mut anchor = self.ring.prev(cursor).expect("cursor is not in the ring");
        let mut first = None;
        for tid in self.sleepers.drain_expired(now) {
            let tcb = self.tcb_mut(tid);
            tcb.wake_time = None;
            tcb.state = ThreadState::Ready;
            self.ring.insert_after(anchor, tid);
            anchor = tid;
            first.get_or_insert(tid);
            self.notify(Event::Woken { tid });
        }

        // A cursor on the caller means it was alone in the ring.
        if let Some(first) = first {
            if cursor == self.current {
                self.ring.set_cursor(first);
            }
        }
    }

    /// Frees every terminated thread except the running one, whose stack is
    /// still in use until the switch away from it.
    fn reap_terminated(&mut self) {
        let cursor = self.ring.cursor().expect("ready ring is empty");
        let dead: Vec<Tid> = self
            .ring
            .iter_from(cursor)
            .filter(|&tid| tid != self.current && self.tcb(tid).is_terminated())
            .collect();

        for tid in dead {
            self.ring.remove(tid);
            self.threads.remove(&tid);
            self.notify(Event::Reclaimed { tid });
        }
    }

    fn select_next(&mut self) -> Tid {
        let start = self.ring.cursor().expect("ready ring is empty");
        let mut tid = start;
        loop {
            if self.tcb(tid).state == ThreadState::Ready {
                return tid;
            }
            tid = self.ring.advance_cursor().expect("ready ring is empty");
            assert_ne!(tid, start, "no ready thread in the ring");
        }
    }

    fn block(&mut self, tid: Tid) {
        self.tcb_mut(tid).state = ThreadState::Blocked;
        self.ring.remove(tid);
    }

    pub(crate) fn tcb(&self, tid: Tid) -> &ThreadControlBlock {
        self.threads
            .get(&tid)
            .unwrap_or_else(|| panic!("thread {} missing from registry", tid))
    }

    pub(crate) fn tcb_mut(&mut self, tid: Tid) -> &mut ThreadControlBlock {
        self.threads
            .get_mut(&tid)
            .unwrap_or_else(|| panic!("thread {} missing from registry", tid))
    }

    fn notify(&self, event: Event) {
        self.config.observer.on_event(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::{SchedulerConfigBuilder, MIN_STACK_SIZE};
    use crate::observer::Observer;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<Event>>,
    }

    impl Recorder {
        fn dispatched(&self) -> Vec<Tid> {
            self.events
                .borrow()
                .iter()
                .filter_map(|e| match *e {
                    Event::Dispatched { prev, next } if prev != next => Some(next),
                    _ => None,
                })
                .collect()
        }

        fn saw(&self, event: Event) -> bool {
            self.events.borrow().contains(&event)
        }
    }

    impl Observer for Recorder {
        fn on_event(&self, event: &Event) {
            self.events.borrow_mut().push(*event);
        }
    }

    struct Harness {
        sched: Scheduler,
        clock: Rc<ManualClock>,
        recorder: Rc<Recorder>,
    }

    fn harness_with(max_threads: usize) -> Harness {
        let clock = Rc::new(ManualClock::new());
        let recorder = Rc::new(Recorder::default());
        let config = SchedulerConfigBuilder::default()
            .stack_size(MIN_STACK_SIZE)
            .max_threads(max_threads)
            .clock(clock.clone())
            .observer(recorder.clone())
            .build()
            .unwrap();
        Harness {
            sched: Scheduler::new(config).unwrap(),
            clock,
            recorder,
        }
    }

    fn harness() -> Harness {
        harness_with(16)
    }

    fn noop() -> Box<dyn FnOnce()> {
        Box::new(|| {})
    }

    fn ring_from_idle(sched: &Scheduler) -> Vec<Tid> {
        sched.ring().iter_from(IDLE_TID).collect()
    }

    /// Yields on behalf of whoever runs until `tid` is running.
    fn run_until(sched: &mut Scheduler, tid: Tid) {
        for _ in 0..64 {
            if sched.current() == tid {
                return;
            }
            sched.yield_current();
        }
        panic!("thread {} never dispatched", tid);
    }

    fn assert_single_running(sched: &Scheduler) {
        let running: Vec<Tid> = sched
            .threads
            .values()
            .filter(|t| t.state == ThreadState::Running)
            .map(|t| t.tid)
            .collect();
        assert_eq!(running, vec![sched.current()]);
    }

    #[test]
    fn new_adopts_caller_and_idle() {
        let h = harness();
        assert_eq!(h.sched.current(), MAIN_TID);
        assert_eq!(h.sched.thread_count(), 2);
        assert_eq!(h.sched.state(IDLE_TID), Some(ThreadState::Ready));
        assert_eq!(h.sched.state(MAIN_TID), Some(ThreadState::Running));
        assert_eq!(ring_from_idle(&h.sched), vec![IDLE_TID, MAIN_TID]);
        assert_eq!(h.sched.ring().cursor(), Some(IDLE_TID));
    }

    #[test]
    fn create_links_after_current_and_becomes_next() {
        let mut h = harness();
        let a = h.sched.create(noop()).unwrap();
        let b = h.sched.create(noop()).unwrap();

        assert_eq!((a, b), (2, 3));
        assert_eq!(ring_from_idle(&h.sched), vec![IDLE_TID, MAIN_TID, b, a]);
        assert_eq!(h.sched.ring().cursor(), Some(b));
        assert_eq!(h.sched.state(a), Some(ThreadState::Ready));
        assert!(h.recorder.saw(Event::Created { tid: b }));

        let dispatch = h.sched.yield_current();
        assert_eq!(dispatch, Dispatch { prev: MAIN_TID, next: b });
        assert_eq!(h.sched.state(MAIN_TID), Some(ThreadState::Ready));
        assert_single_running(&h.sched);
    }

    #[test]
    fn round_robin_visits_every_ready_thread_once_per_cycle() {
        let mut h = harness();
        for _ in 0..3 {
            h.sched.create(noop()).unwrap();
        }
        let members = h.sched.ring().len();

        for _ in 0..(3 * members) {
            let d = h.sched.yield_current();
            assert!(d.is_switch());
            assert_single_running(&h.sched);
        }

        let order = h.recorder.dispatched();
        let first: Vec<Tid> = order[..members].to_vec();
        let mut sorted = first.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
        for cycle in order.chunks(members) {
            assert_eq!(cycle, first.as_slice());
        }
        assert_eq!(first, vec![4, 3, 2, IDLE_TID, MAIN_TID]);
    }

    #[test]
    fn yield_with_nothing_else_ready_keeps_running() {
        let mut h = harness();
        run_until(&mut h.sched, IDLE_TID);
        h.sched.park_main();
        // Only idle is left; its own yield selects itself again.
        let d = h.sched.yield_current();
        assert_eq!(d, Dispatch { prev: IDLE_TID, next: IDLE_TID });
        assert!(!d.is_switch());
    }

    #[test]
    fn join_blocks_until_target_exits() {
        let mut h = harness();
        let t = h.sched.create(noop()).unwrap();

        let d = h.sched.join_current(t).unwrap().unwrap();
        assert_eq!(d, Dispatch { prev: MAIN_TID, next: t });
        assert_eq!(h.sched.state(MAIN_TID), Some(ThreadState::Blocked));
        assert!(!h.sched.ring().contains(MAIN_TID));
        assert!(h.recorder.saw(Event::Blocked {
            tid: MAIN_TID,
            reason: BlockReason::Join(t)
        }));

        // The blocked main thread is never picked while t keeps yielding.
        for _ in 0..4 {
            let d = h.sched.yield_current();
            assert_ne!(d.next, MAIN_TID);
        }
        run_until(&mut h.sched, t);

        let d = h.sched.exit_current();
        assert_eq!(d, Dispatch { prev: t, next: MAIN_TID });
        assert_eq!(h.sched.state(t), Some(ThreadState::Terminated));
        assert!(h.recorder.saw(Event::Woken { tid: MAIN_TID }));
        assert_single_running(&h.sched);
    }

    #[test]
    fn exited_thread_is_reclaimed_by_a_later_pass() {
        let mut h = harness();
        let t = h.sched.create(noop()).unwrap();
        h.sched.join_current(t).unwrap();
        h.sched.exit_current();
        assert!(h.sched.contains(t));

        for _ in 0..3 {
            h.sched.yield_current();
        }
        assert!(!h.sched.contains(t));
        assert!(!h.sched.ring().contains(t));
        assert!(h.recorder.saw(Event::Reclaimed { tid: t }));
        assert_eq!(h.sched.join_current(t), Err(Error::NoSuchThread(t)));
        assert_eq!(h.sched.thread_count(), 2);
    }

    #[test]
    fn terminated_thread_is_never_dispatched() {
        let mut h = harness();
        let t = h.sched.create(noop()).unwrap();
        let other = h.sched.create(noop()).unwrap();
        run_until(&mut h.sched, t);
        h.sched.exit_current();

        for _ in 0..10 {
            let d = h.sched.yield_current();
            assert_ne!(d.next, t);
        }
        assert!(!h.sched.contains(t));
        assert!(h.sched.contains(other));
    }

    #[test]
    fn every_joiner_wakes_when_target_exits() {
        let mut h = harness();
        let target = h.sched.create(noop()).unwrap();
        let a = h.sched.create(noop()).unwrap();
        let b = h.sched.create(noop()).unwrap();

        for joiner in [a, b, MAIN_TID] {
            run_until(&mut h.sched, joiner);
            h.sched.join_current(target).unwrap().unwrap();
        }
        for joiner in [a, b, MAIN_TID] {
            assert_eq!(h.sched.state(joiner), Some(ThreadState::Blocked));
        }

        run_until(&mut h.sched, target);
        h.sched.exit_current();

        for joiner in [a, b, MAIN_TID] {
            assert!(h.recorder.saw(Event::Woken { tid: joiner }));
            assert!(h.sched.ring().contains(joiner));
            assert_ne!(h.sched.state(joiner), Some(ThreadState::Blocked));
        }
        // Joiners resume in the order they joined.
        assert_eq!(h.sched.current(), a);
        let next: Vec<Tid> = (0..2).map(|_| h.sched.yield_current().next).collect();
        assert_eq!(next, vec![b, MAIN_TID]);
    }

    #[test]
    fn join_rejects_unknown_self_and_idle() {
        let mut h = harness();
        assert_eq!(h.sched.join_current(99), Err(Error::NoSuchThread(99)));
        assert_eq!(h.sched.join_current(MAIN_TID), Err(Error::Deadlock(MAIN_TID)));
        assert_eq!(h.sched.join_current(IDLE_TID), Err(Error::Deadlock(IDLE_TID)));

        // Nothing moved.
        assert_eq!(h.sched.current(), MAIN_TID);
        assert_eq!(h.sched.state(MAIN_TID), Some(ThreadState::Running));
        assert!(h.sched.ring().contains(MAIN_TID));
    }

    #[test]
    fn join_on_terminated_thread_completes_at_once() {
        let mut h = harness();
        let a = h.sched.create(noop()).unwrap();
        let b = h.sched.create(noop()).unwrap();
        run_until(&mut h.sched, b);

        // a runs right after b exits, before any pass could reclaim b.
        assert_eq!(h.sched.exit_current().next, a);
        assert_eq!(h.sched.state(b), Some(ThreadState::Terminated));
        assert_eq!(h.sched.join_current(b), Ok(None));
        assert_eq!(h.sched.current(), a);
        assert_eq!(h.sched.state(a), Some(ThreadState::Running));
    }

    #[test]
    fn create_join_loop_never_runs_out_of_slots() {
        let mut h = harness_with(8);
        for round in 0..20 {
            let t = h
                .sched
                .create(noop())
                .unwrap_or_else(|e| panic!("round {}: {}", round, e));
            assert_eq!(h.sched.join_current(t).unwrap().map(|d| d.next), Some(t));
            assert_eq!(h.sched.exit_current().next, MAIN_TID);
            assert!(h.sched.thread_count() <= 4);
        }
        h.sched.yield_current();
        assert_eq!(h.sched.thread_count(), 2);
        assert!(h.recorder.saw(Event::Reclaimed { tid: 20 }));
    }

    #[test]
    fn create_fails_when_table_is_full() {
        let mut h = harness_with(3);
        let t = h.sched.create(noop()).unwrap();
        assert_eq!(
            h.sched.create(noop()),
            Err(Error::ThreadLimit { max: 3 })
        );

        run_until(&mut h.sched, t);
        h.sched.exit_current();
        for _ in 0..3 {
            h.sched.yield_current();
        }
        run_until(&mut h.sched, MAIN_TID);

        let again = h.sched.create(noop()).unwrap();
        assert!(again > t);
    }

    #[test]
    fn sleeper_is_skipped_until_deadline() {
        let mut h = harness();
        let t = h.sched.create(noop()).unwrap();
        run_until(&mut h.sched, t);

        let d = h.sched.sleep_current(Duration::from_secs(5));
        assert_ne!(d.next, t);
        assert_eq!(h.sched.state(t), Some(ThreadState::Blocked));
        assert!(h.sched.sleepers().contains(t));
        assert!(!h.sched.ring().contains(t));

        for _ in 0..6 {
            assert_ne!(h.sched.yield_current().next, t);
        }

        h.clock.advance(Duration::from_secs(5));
        h.sched.yield_current();
        assert!(h.recorder.saw(Event::Woken { tid: t }));
        assert!(!h.sched.sleepers().contains(t));
        assert!(h.sched.ring().contains(t));
        assert_eq!(h.sched.tcb(t).wake_time, None);

        run_until(&mut h.sched, t);
    }

    #[test]
    fn zero_sleep_is_ready_after_one_pass() {
        let mut h = harness();
        let other = h.sched.create(noop()).unwrap();
        h.sched.sleep_current(Duration::ZERO);

        assert!(h.sched.sleepers().is_empty());
        assert!(h.sched.ring().contains(MAIN_TID));
        assert_eq!(h.sched.state(MAIN_TID), Some(ThreadState::Ready));
        assert_eq!(h.sched.current(), other);
    }

    #[test]
    fn idle_action_reflects_what_is_left() {
        let mut h = harness();
        run_until(&mut h.sched, IDLE_TID);
        assert_eq!(h.sched.idle_action(), IdleAction::Yield);

        run_until(&mut h.sched, MAIN_TID);
        h.sched.sleep_current(Duration::from_secs(2));
        assert_eq!(h.sched.current(), IDLE_TID);
        let deadline = h.sched.sleepers().deadline(MAIN_TID).unwrap();
        assert_eq!(h.sched.idle_action(), IdleAction::SleepUntil(deadline));

        h.clock.wait_until(deadline);
        assert_eq!(h.sched.yield_current().next, MAIN_TID);

        h.sched.exit_current();
        assert_eq!(h.sched.current(), IDLE_TID);
        assert_eq!(h.sched.idle_action(), IdleAction::Finished);
    }

    #[test]
    fn mutual_join_is_reported_as_deadlock() {
        let mut h = harness();
        let t = h.sched.create(noop()).unwrap();
        h.sched.join_current(t).unwrap();
        assert_eq!(h.sched.current(), t);
        h.sched.join_current(MAIN_TID).unwrap();

        assert_eq!(h.sched.current(), IDLE_TID);
        assert_eq!(h.sched.idle_action(), IdleAction::Deadlock);
    }

    #[test]
    #[should_panic(expected = "idle thread cannot exit")]
    fn idle_exit_is_fatal() {
        let mut h = harness();
        run_until(&mut h.sched, IDLE_TID);
        h.sched.exit_current();
    }

    impl Scheduler {
        /// Parks main forever so idle is the only thread left to run.
        fn park_main(&mut self) {
            let main = self.tcb_mut(MAIN_TID);
            main.state = ThreadState::Blocked;
            self.ring.remove(MAIN_TID);
        }
    }
}

use crate::thread::Tid;
use std::collections::HashMap;
use std::time::Instant;

/// Threads blocked in `sleep`, keyed by id with their wake deadline.
#[derive(Debug, Default)]
pub struct SleepSet {
    deadlines: HashMap<Tid, Instant>,
}

impl SleepSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    pub fn contains(&self, tid: Tid) -> bool {
        self.deadlines.contains_key(&tid)
    }

    pub fn deadline(&self, tid: Tid) -> Option<Instant> {
        self.deadlines.get(&tid).copied()
    }

    /// Adds `tid`, or moves its deadline if it is already asleep. Returns the
    /// previous deadline in that case.
    pub fn insert(&mut self, tid: Tid, deadline: Instant) -> Option<Instant> {
        self.deadlines.insert(tid, deadline)
    }

    pub fn remove(&mut self, tid: Tid) -> Option<Instant> {
        self.deadlines.remove(&tid)
    }

    pub fn earliest(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    /// Removes every entry due at `now`, earliest deadline first (ties by id).
    pub fn drain_expired(&mut self, now: Instant) -> Vec<Tid> {
        let mut due: Vec<(Instant, Tid)> = self
            .deadlines
            .iter()
            .filter(|&(_, &deadline)| deadline <= now)
            .map(|(&tid, &deadline)| (deadline, tid))
            .collect();
        due.sort_unstable();

        for &(_, tid) in &due {
            self.deadlines.remove(&tid);
        }
        due.into_iter().map(|(_, tid)| tid).collect()
    }

    /// Pending sleepers ordered by deadline.
    pub fn entries(&self) -> Vec<(Tid, Instant)> {
        let mut entries: Vec<(Tid, Instant)> =
            self.deadlines.iter().map(|(&tid, &at)| (tid, at)).collect();
        entries.sort_unstable_by_key(|&(tid, at)| (at, tid));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn second_insert_updates_deadline() {
        let now = Instant::now();
        let mut set = SleepSet::new();

        assert_eq!(set.insert(3, now + Duration::from_secs(5)), None);
        assert_eq!(
            set.insert(3, now + Duration::from_secs(1)),
            Some(now + Duration::from_secs(5))
        );
        assert_eq!(set.len(), 1);
        assert_eq!(set.deadline(3), Some(now + Duration::from_secs(1)));
    }

    #[test]
    fn drains_only_due_entries_in_deadline_order() {
        let now = Instant::now();
        let mut set = SleepSet::new();
        set.insert(2, now + Duration::from_secs(2));
        set.insert(4, now);
        set.insert(3, now + Duration::from_secs(9));
        set.insert(5, now + Duration::from_secs(1));

        let due = set.drain_expired(now + Duration::from_secs(2));
        assert_eq!(due, vec![4, 5, 2]);
        assert_eq!(set.len(), 1);
        assert!(set.contains(3));
    }

    #[test]
    fn deadline_equal_to_now_is_due() {
        let now = Instant::now();
        let mut set = SleepSet::new();
        set.insert(7, now);
        assert_eq!(set.drain_expired(now), vec![7]);
        assert!(set.is_empty());
    }

    #[test]
    fn earliest_tracks_minimum() {
        let now = Instant::now();
        let mut set = SleepSet::new();
        assert_eq!(set.earliest(), None);

        set.insert(1, now + Duration::from_secs(4));
        set.insert(2, now + Duration::from_secs(3));
        assert_eq!(set.earliest(), Some(now + Duration::from_secs(3)));

        set.remove(2);
        assert_eq!(set.earliest(), Some(now + Duration::from_secs(4)));
    }
}

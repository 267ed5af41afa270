use crate::thread::Tid;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Link {
    prev: Tid,
    next: Tid,
}

/// Circular doubly-linked sequence of thread ids with a round-robin cursor.
///
/// Links are kept by id rather than by pointer, so unlinking a thread never
/// touches its control block.
#[derive(Debug, Default)]
pub struct ReadyRing {
    links: HashMap<Tid, Link>,
    cursor: Option<Tid>,
}

impl ReadyRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn contains(&self, tid: Tid) -> bool {
        self.links.contains_key(&tid)
    }

    /// The next thread the scheduler will consider.
    pub fn cursor(&self) -> Option<Tid> {
        self.cursor
    }

    /// # Panics
    /// Panics if `tid` is not linked.
    pub fn set_cursor(&mut self, tid: Tid) {
        assert!(self.contains(tid), "cursor moved to unlinked thread {}", tid);
        self.cursor = Some(tid);
    }

    /// Moves the cursor one step and returns where it now points.
    pub fn advance_cursor(&mut self) -> Option<Tid> {
        let next = self.next(self.cursor?)?;
        self.cursor = Some(next);
        Some(next)
    }

    pub fn next(&self, tid: Tid) -> Option<Tid> {
        self.links.get(&tid).map(|link| link.next)
    }

    pub fn prev(&self, tid: Tid) -> Option<Tid> {
        self.links.get(&tid).map(|link| link.prev)
    }

    /// Links `tid` as the only member; it also becomes the cursor.
    ///
    /// # Panics
    /// Panics if the ring is not empty.
    pub fn insert_first(&mut self, tid: Tid) {
        assert!(self.is_empty(), "ring already populated");
        self.links.insert(tid, Link { prev: tid, next: tid });
        self.cursor = Some(tid);
    }

    /// Links `tid` directly after `anchor`.
    ///
    /// # Panics
    /// Panics if `anchor` is not linked or `tid` already is.
    pub fn insert_after(&mut self, anchor: Tid, tid: Tid) {
        assert!(!self.contains(tid), "thread {} linked twice", tid);
        let after = self
            .next(anchor)
            .unwrap_or_else(|| panic!("anchor thread {} not in ring", anchor));

        self.links.insert(tid, Link { prev: anchor, next: after });
        self.link_mut(anchor).next = tid;
        self.link_mut(after).prev = tid;
    }

    /// Unlinks `tid`. A cursor on it moves to its successor, or clears when the
    /// ring becomes empty. Returns whether `tid` was linked.
    pub fn remove(&mut self, tid: Tid) -> bool {
        let Some(link) = self.links.remove(&tid) else {
            return false;
        };

        if link.next == tid {
            self.cursor = None;
            return true;
        }

        self.link_mut(link.prev).next = link.next;
        self.link_mut(link.next).prev = link.prev;
        if self.cursor == Some(tid) {
            self.cursor = Some(link.next);
        }
        true
    }

    /// One lap around the ring, starting at `start`.
    pub fn iter_from(&self, start: Tid) -> RingIter<'_> {
        RingIter {
            ring: self,
            start,
            next: self.contains(start).then_some(start),
        }
    }

    fn link_mut(&mut self, tid: Tid) -> &mut Link {
        self.links
            .get_mut(&tid)
            .unwrap_or_else(|| panic!("ring link for thread {} missing", tid))
    }
}

pub struct RingIter<'a> {
    ring: &'a ReadyRing,
    start: Tid,
    next: Option<Tid>,
}

impl Iterator for RingIter<'_> {
    type Item = Tid;

    fn next(&mut self) -> Option<Tid> {
        let current = self.next?;
        self.next = self.ring.next(current).filter(|&n| n != self.start);
        Some(current)
    }
}

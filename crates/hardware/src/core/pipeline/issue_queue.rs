//! Issue Queue (IQ).
//!
//! An unordered, fixed-capacity pool of dispatched instructions waiting for
//! their operands. It provides:
//! 1. **Admission:** Dispatch checks for `n` free entries, then inserts.
//! 2. **Wakeup:** A completing producer's slot is broadcast to every entry.
//! 3. **Select:** The oldest entry (smallest sequence number) with both
//!    operands ready is chosen; its entry is vacated the same cycle.
//!
//! Every operation is a linear scan over the capacity.

use crate::core::pipeline::instruction::Operand;
use crate::core::pipeline::rob::RobTag;

/// An occupied issue queue entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IqEntry {
    /// ROB slot of the instruction.
    pub dst: RobTag,
    /// Source operands.
    pub src: [Operand; 2],
    /// Program-order sequence number.
    pub seq: u64,
    /// Cycles the entry has spent in the queue.
    pub waited: u32,
}

impl IqEntry {
    /// Returns true if both operands are available.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.src.iter().all(|s| s.is_ready())
    }
}

/// Index of an entry within the issue queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IqIndex(pub usize);

/// Issue queue: `None` marks a free entry.
#[derive(Clone, Debug)]
pub struct IssueQueue {
    entries: Vec<Option<IqEntry>>,
    count: usize,
}

impl IssueQueue {
    /// Creates an empty queue with `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![None; capacity],
            count: 0,
        }
    }

    /// Total number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of occupied entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no entry is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the entry at `idx`, if occupied.
    pub fn entry(&self, idx: IqIndex) -> Option<&IqEntry> {
        self.entries.get(idx.0).and_then(Option::as_ref)
    }

    /// Returns true if at least `n` entries are free (no adjacency needed).
    pub fn has_free(&self, n: usize) -> bool {
        self.entries.len() - self.count >= n
    }

    /// Places an instruction in the first free entry.
    ///
    /// # Panics
    ///
    /// Panics if the queue is full; callers must check [`IssueQueue::has_free`].
    pub fn insert(&mut self, dst: RobTag, src: [Operand; 2], seq: u64) -> IqIndex {
        let Some(idx) = self.entries.iter().position(Option::is_none) else {
            panic!("issue queue insert with no free entry (seq {seq})");
        };
        self.entries[idx] = Some(IqEntry {
            dst,
            src,
            seq,
            waited: 0,
        });
        self.count += 1;
        IqIndex(idx)
    }

    /// Marks every pending operand waiting on `slot` as ready.
    pub fn wakeup(&mut self, slot: RobTag) {
        for entry in self.entries.iter_mut().flatten() {
            for src in &mut entry.src {
                src.wake(slot);
            }
        }
    }

    /// Returns the ready entry with the smallest sequence number.
    pub fn select_oldest_ready(&self) -> Option<IqIndex> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(idx, e)| e.as_ref().map(|e| (idx, e)))
            .filter(|(_, e)| e.is_ready())
            .min_by_key(|(_, e)| e.seq)
            .map(|(idx, _)| IqIndex(idx))
    }

    /// Vacates an entry and returns its contents.
    ///
    /// # Panics
    ///
    /// Panics if the entry is already free.
    pub fn free(&mut self, idx: IqIndex) -> IqEntry {
        let Some(entry) = self.entries[idx.0].take() else {
            panic!("freeing empty issue queue entry {}", idx.0);
        };
        self.count -= 1;
        entry
    }

    /// Counts one more waiting cycle on every occupied entry.
    pub fn tick_waiting(&mut self) {
        for entry in self.entries.iter_mut().flatten() {
            entry.waited += 1;
        }
    }
}

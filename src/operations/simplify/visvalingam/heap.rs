//! Array-backed binary min-heap addressable by item id.

use super::precedes;

const ABSENT: usize = usize::MAX;

/// Min-heap over item ids `0..capacity` keyed by `f64`, ordered by
/// `(key, id)`.
///
/// `pos[id]` tracks where each item sits in `heap`, so a key can be
/// changed in place and restored with a single sift.
#[derive(Debug, Clone)]
pub(super) struct IndexedMinHeap {
    heap: Vec<usize>,
    pos: Vec<usize>,
    keys: Vec<f64>,
}

impl IndexedMinHeap {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            pos: vec![ABSENT; capacity],
            keys: vec![0.0; capacity],
        }
    }

    pub(super) fn contains(&self, id: usize) -> bool {
        self.pos.get(id).is_some_and(|&p| p != ABSENT)
    }

    pub(super) fn push(&mut self, id: usize, key: f64) {
        debug_assert!(!self.contains(id));
        self.keys[id] = key;
        self.pos[id] = self.heap.len();
        self.heap.push(id);
        self.sift_up(self.heap.len() - 1);
    }

    pub(super) fn peek(&self) -> Option<(usize, f64)> {
        self.heap.first().map(|&id| (id, self.keys[id]))
    }

    pub(super) fn pop(&mut self) -> Option<(usize, f64)> {
        let top = *self.heap.first()?;
        let last = self.heap.len() - 1;
        self.swap(0, last);
        self.heap.pop();
        self.pos[top] = ABSENT;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((top, self.keys[top]))
    }

    /// Replaces the key of a queued item, moving it up or down as needed.
    /// Items not in the heap are ignored.
    pub(super) fn update(&mut self, id: usize, key: f64) {
        if !self.contains(id) {
            return;
        }
        let old = self.keys[id];
        self.keys[id] = key;
        let at = self.pos[id];
        if precedes(key, id, old, id) {
            self.sift_up(at);
        } else {
            self.sift_down(at);
        }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let (ia, ib) = (self.heap[a], self.heap[b]);
        precedes(self.keys[ia], ia, self.keys[ib], ib)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.pos[self.heap[a]] = a;
        self.pos[self.heap[b]] = b;
    }

    fn sift_up(&mut self, mut at: usize) {
        while at > 0 {
            let parent = (at - 1) / 2;
            if !self.less(at, parent) {
                break;
            }
            self.swap(at, parent);
            at = parent;
        }
    }

    fn sift_down(&mut self, mut at: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * at + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, at) {
                break;
            }
            self.swap(at, child);
            at = child;
        }
    }
}

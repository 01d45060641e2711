//! Point history and redo stack

use heapless::{Deque, Vec};

use crate::config::HISTORY_CAPACITY;

/// A visited cell, stamped with the draw clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: u16,
    pub y: u16,
    /// Draw-clock reading when the cursor reached this cell (ms)
    pub timestamp: u32,
}

impl Point {
    pub const fn new(x: u16, y: u16, timestamp: u32) -> Self {
        Self { x, y, timestamp }
    }
}

/// Ordered point history
///
/// Never empty once seeded; timestamps are non-decreasing. Holds at most
/// [`HISTORY_CAPACITY`] points, pushing past that hands back the oldest.
#[derive(Debug, Clone)]
pub struct History {
    points: Deque<Point, HISTORY_CAPACITY>,
}

impl History {
    /// History holding only `seed`
    pub fn seeded(seed: Point) -> Self {
        let mut points = Deque::new();
        // Fresh deque always has room
        let _ = points.push_back(seed);
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent point
    pub fn last(&self) -> Option<Point> {
        self.points.back().copied()
    }

    /// Append a point, returning the oldest one if it had to make room
    pub fn push(&mut self, point: Point) -> Option<Point> {
        let evicted = if self.points.is_full() {
            self.points.pop_front()
        } else {
            None
        };
        // Room was made above
        let _ = self.points.push_back(point);
        evicted
    }

    /// Remove the most recent point
    pub fn pop(&mut self) -> Option<Point> {
        self.points.pop_back()
    }

    /// Drop every point from index `len` onwards
    pub fn truncate(&mut self, len: usize) {
        while self.points.len() > len {
            self.points.pop_back();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> + '_ {
        self.points.iter()
    }
}

/// Stack of undone batches
///
/// Batches are stored back to back in one buffer with their start offsets
/// alongside, so the stack needs no allocation per batch.
#[derive(Debug, Clone, Default)]
pub struct RedoStack {
    points: Vec<Point, HISTORY_CAPACITY>,
    starts: Vec<u16, HISTORY_CAPACITY>,
}

impl RedoStack {
    pub const fn new() -> Self {
        Self {
            points: Vec::new(),
            starts: Vec::new(),
        }
    }

    /// Number of batches available to redo
    pub fn depth(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Total points across all batches
    #[cfg(test)]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.starts.clear();
    }

    /// Push one batch, keeping point order
    ///
    /// If the buffer fills up mid-batch, older batches are discarded to
    /// make room. Empty batches are ignored.
    pub fn push_batch(&mut self, batch: impl IntoIterator<Item = Point>) {
        if self.starts.is_full() {
            self.clear();
        }
        let mut start = self.points.len();
        for point in batch {
            if self.points.is_full() {
                if start == 0 {
                    break;
                }
                self.points.copy_within(start.., 0);
                self.points.truncate(self.points.len() - start);
                self.starts.clear();
                start = 0;
            }
            let _ = self.points.push(point);
        }
        if self.points.len() > start {
            let _ = self.starts.push(start as u16);
        }
    }

    /// Pop the newest batch, feeding its points in push order to `sink`
    ///
    /// Returns false if the stack is empty.
    pub fn pop_batch(&mut self, mut sink: impl FnMut(Point)) -> bool {
        let Some(start) = self.starts.pop() else {
            return false;
        };
        let start = start as usize;
        for point in &self.points[start..] {
            sink(*point);
        }
        self.points.truncate(start);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_push_pop() {
        let mut history = History::seeded(Point::new(5, 5, 0));
        assert_eq!(history.push(Point::new(6, 5, 10)), None);
        assert_eq!(history.len(), 2);
        assert_eq!(history.last(), Some(Point::new(6, 5, 10)));
        assert_eq!(history.pop(), Some(Point::new(6, 5, 10)));
        assert_eq!(history.last(), Some(Point::new(5, 5, 0)));
    }

    #[test]
    fn test_history_evicts_oldest_when_full() {
        let mut history = History::seeded(Point::new(0, 0, 0));
        for i in 1..HISTORY_CAPACITY as u32 {
            assert_eq!(history.push(Point::new(0, 0, i)), None);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);

        let evicted = history.push(Point::new(1, 1, 99_999));
        assert_eq!(evicted, Some(Point::new(0, 0, 0)));
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.iter().next().map(|p| p.timestamp), Some(1));
    }

    #[test]
    fn test_history_truncate() {
        let mut history = History::seeded(Point::new(0, 0, 0));
        for i in 1..5 {
            history.push(Point::new(i, 0, i as u32));
        }
        history.truncate(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.last(), Some(Point::new(1, 0, 1)));
    }

    #[test]
    fn test_redo_batches_lifo() {
        let mut redo = RedoStack::new();
        let first = [Point::new(1, 0, 1), Point::new(2, 0, 2)];
        let second = [Point::new(3, 0, 3)];
        redo.push_batch(first);
        redo.push_batch(second);
        assert_eq!(redo.depth(), 2);
        assert_eq!(redo.point_count(), 3);

        let mut out: heapless::Vec<Point, 4> = heapless::Vec::new();
        assert!(redo.pop_batch(|p| out.push(p).unwrap()));
        assert_eq!(out.as_slice(), &second);

        out.clear();
        assert!(redo.pop_batch(|p| out.push(p).unwrap()));
        assert_eq!(out.as_slice(), &first);

        assert!(!redo.pop_batch(|_| panic!("empty stack yields nothing")));
    }

    #[test]
    fn test_redo_ignores_empty_batch() {
        let mut redo = RedoStack::new();
        redo.push_batch(core::iter::empty());
        assert!(redo.is_empty());
    }

    #[test]
    fn test_redo_overflow_drops_older_batches() {
        let mut redo = RedoStack::new();
        redo.push_batch([Point::new(0, 0, 0)]);
        redo.push_batch((0..HISTORY_CAPACITY as u16).map(|i| Point::new(i, 1, 1)));
        assert_eq!(redo.depth(), 1);
        assert_eq!(redo.point_count(), HISTORY_CAPACITY);

        let mut first = None;
        let mut count = 0;
        assert!(redo.pop_batch(|p| {
            first.get_or_insert(p);
            count += 1;
        }));
        assert_eq!(first, Some(Point::new(0, 1, 1)));
        assert_eq!(count, HISTORY_CAPACITY);
        assert!(redo.is_empty());
    }
}

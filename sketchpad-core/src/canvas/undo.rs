//! Undo/redo over the point history
//!
//! Undo follows the configured [`UndoPolicy`]; redo is linear and is lost
//! as soon as an effective cursor step diverges from the undone state.
//! Every effective undo or redo rebuilds the whole canvas.

use super::engine::{push_point, Engine};
use super::history::Point;
use crate::config::UndoPolicy;

impl Engine {
    /// Roll back recent drawing
    ///
    /// Returns true if anything was removed. A seed-only history, or a
    /// time window that holds no recent point, is a no-op.
    pub fn undo(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }

        let undone = match self.undo_policy {
            UndoPolicy::StepWindow => self.undo_step(),
            UndoPolicy::TimeWindow { threshold_ms } => self.undo_window(threshold_ms),
        };
        if undone {
            self.relocate_cursor();
            self.rebuild();
        }
        undone
    }

    /// Remove exactly the newest point
    fn undo_step(&mut self) -> bool {
        let Some(point) = self.history.pop() else {
            return false;
        };
        self.redo.push_batch([point]);
        true
    }

    /// Remove every point younger than `threshold_ms` of draw time
    fn undo_window(&mut self, threshold_ms: u32) -> bool {
        let draw_now = self.clock.now();
        // Timestamps are non-decreasing, so old points form a prefix
        let keep = self
            .history
            .iter()
            .take_while(|p| draw_now.wrapping_sub(p.timestamp) > threshold_ms)
            .count();
        if keep == self.history.len() {
            return false;
        }

        self.redo.push_batch(self.history.iter().skip(keep).copied());
        self.history.truncate(keep);

        if self.history.is_empty() {
            let (cx, cy) = self.canvas_cfg.center();
            self.history.push(Point::new(cx, cy, draw_now));
            self.synthetic_seed = true;
        }
        true
    }

    /// Reapply the most recently undone batch
    ///
    /// Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if self.redo.is_empty() {
            return false;
        }

        if self.synthetic_seed && self.history.len() == 1 {
            self.history.pop();
        }
        self.synthetic_seed = false;

        let brush = self.canvas_cfg.brush;
        let history = &mut self.history;
        let base = &mut self.base;
        self.redo.pop_batch(|point| push_point(history, base, brush, point));

        self.relocate_cursor();
        self.rebuild();
        true
    }
}

#[cfg(test)]
mod tests {
    use sketchpad_hal::Millis;

    use super::*;
    use crate::canvas::engine::tests::{config, render};
    use crate::canvas::{Cursor, DrawClock};
    use crate::config::Brush;

    fn window() -> UndoPolicy {
        UndoPolicy::TimeWindow { threshold_ms: 2000 }
    }

    fn timestamps(engine: &Engine) -> heapless::Vec<u32, 16> {
        engine.history().iter().map(|p| p.timestamp).collect()
    }

    #[test]
    fn test_step_undo_seed_only_is_noop() {
        let mut engine = Engine::new(&config(128, 64, UndoPolicy::StepWindow, Brush::Dot)).unwrap();
        engine.mark_clean();
        assert!(!engine.undo());
        assert_eq!(engine.cursor(), Cursor { x: 64, y: 32 });
        assert_eq!(engine.redo_depth(), 0);
        assert!(!engine.is_dirty());
    }

    #[test]
    fn test_step_undo_redo_scenario() {
        let mut engine = Engine::new(&config(128, 64, UndoPolicy::StepWindow, Brush::Dot)).unwrap();
        for _ in 0..5 {
            engine.step_cursor(1, 0, Millis::ZERO);
        }
        for _ in 0..3 {
            engine.step_cursor(0, 1, Millis::ZERO);
        }
        assert_eq!(engine.cursor(), Cursor { x: 69, y: 35 });
        let len_before = engine.history().len();

        assert!(engine.undo());
        assert_eq!(engine.cursor(), Cursor { x: 69, y: 34 });
        assert_eq!(engine.history().len(), len_before - 1);
        assert!(!engine.canvas().get(69, 35));
        assert!(engine.damage().is_full());

        assert!(engine.redo());
        assert_eq!(engine.cursor(), Cursor { x: 69, y: 35 });
        assert_eq!(engine.history().len(), len_before);
        assert!(engine.canvas().get(69, 35));
    }

    /// Engine whose history carries `stamps` after the seed, read at `draw_now`
    fn timed_engine(stamps: &[u32], draw_now: u32) -> Engine {
        let mut engine = Engine::new(&config(128, 64, window(), Brush::Dot)).unwrap();
        for (i, &ts) in stamps.iter().enumerate() {
            engine.append(Point::new(65 + i as u16, 32, ts));
        }
        engine.clock = DrawClock::new(u32::MAX);
        engine.clock.advance(Millis::ZERO);
        engine.clock.advance(Millis::from_raw(draw_now));
        engine.relocate_cursor();
        engine.rebuild();
        engine
    }

    #[test]
    fn test_window_undo_partition() {
        let mut engine = timed_engine(&[500, 2500, 3000], 3000);
        assert_eq!(timestamps(&engine).as_slice(), &[0, 500, 2500, 3000]);
        assert_eq!(engine.draw_time(), 3000);

        assert!(engine.undo());
        assert_eq!(timestamps(&engine).as_slice(), &[0, 500]);
        assert_eq!(engine.cursor(), Cursor { x: 65, y: 32 });
        assert_eq!(engine.redo_depth(), 1);
        assert_eq!(engine.canvas(), &render(&engine));

        assert!(engine.redo());
        assert_eq!(timestamps(&engine).as_slice(), &[0, 500, 2500, 3000]);
        assert_eq!(engine.cursor(), Cursor { x: 67, y: 32 });
    }

    #[test]
    fn test_window_undo_nothing_recent_is_noop() {
        let mut engine = timed_engine(&[100], 5000);
        engine.mark_clean();

        assert!(!engine.undo());
        assert_eq!(engine.history().len(), 2);
        assert_eq!(engine.redo_depth(), 0);
        assert!(!engine.is_dirty());
    }

    #[test]
    fn test_window_threshold_is_exclusive() {
        // Exactly threshold old counts as recent
        let mut engine = timed_engine(&[1000], 3000);
        assert!(engine.undo());
        assert_eq!(timestamps(&engine).as_slice(), &[0]);
    }

    #[test]
    fn test_window_undo_everything_synthesizes_seed() {
        let mut engine = Engine::new(&config(128, 64, window(), Brush::Dot)).unwrap();
        for t in 0..4 {
            engine.step_cursor(0, -1, Millis::from_raw(t * 10));
        }
        let before = engine.history().clone();
        let cursor_before = engine.cursor();
        let canvas_before = engine.canvas().clone();

        assert!(engine.undo());
        assert_eq!(engine.history().len(), 1);
        assert_eq!(
            engine.history().last(),
            Some(Point::new(64, 32, engine.draw_time()))
        );
        assert_eq!(engine.cursor(), Cursor { x: 64, y: 32 });

        // Seed-only history: further undo does nothing
        assert!(!engine.undo());

        // Redo drops the made-up seed and restores exactly
        assert!(engine.redo());
        assert!(engine.history().iter().eq(before.iter()));
        assert_eq!(engine.cursor(), cursor_before);
        assert_eq!(engine.canvas(), &canvas_before);
    }

    #[test]
    fn test_redo_empty_is_noop() {
        let mut engine = Engine::new(&config(16, 2, UndoPolicy::StepWindow, Brush::Dot)).unwrap();
        engine.mark_clean();
        assert!(!engine.redo());
        assert!(!engine.is_dirty());
    }

    #[test]
    fn test_step_after_undo_clears_redo() {
        let mut engine = Engine::new(&config(16, 2, UndoPolicy::StepWindow, Brush::Dot)).unwrap();
        engine.step_cursor(1, 0, Millis::ZERO);
        engine.step_cursor(1, 0, Millis::ZERO);
        assert!(engine.undo());
        assert_eq!(engine.redo_depth(), 1);

        assert!(engine.step_cursor(0, -1, Millis::ZERO));
        assert_eq!(engine.redo_depth(), 0);
        assert!(!engine.redo());
    }

    #[test]
    fn test_boundary_step_keeps_redo() {
        let mut engine = Engine::new(&config(16, 2, UndoPolicy::StepWindow, Brush::Dot)).unwrap();
        engine.step_cursor(1, 0, Millis::ZERO);
        assert!(engine.undo());
        // Seed sits at (8, 1): moving down hits the edge
        assert!(!engine.step_cursor(0, 1, Millis::ZERO));
        assert_eq!(engine.redo_depth(), 1);
        assert!(engine.redo());
    }

    #[test]
    fn test_repeated_undo_then_redo_order() {
        let mut engine = Engine::new(&config(16, 2, UndoPolicy::StepWindow, Brush::Ring)).unwrap();
        for _ in 0..3 {
            engine.step_cursor(-1, 0, Millis::ZERO);
        }
        let full = engine.history().clone();
        assert!(engine.undo());
        assert!(engine.undo());
        assert_eq!(engine.cursor(), Cursor { x: 7, y: 1 });
        assert!(engine.redo());
        assert_eq!(engine.cursor(), Cursor { x: 6, y: 1 });
        assert!(engine.redo());
        assert!(engine.history().iter().eq(full.iter()));
        assert_eq!(engine.canvas(), &render(&engine));
    }

    mod props {
        extern crate std;

        use proptest::prelude::*;
        use std::vec::Vec;

        use super::*;
        use crate::canvas::History;

        #[derive(Debug, Clone, Copy)]
        enum Op {
            Step(i8, i8, u32),
            Undo,
            Redo,
        }

        fn op() -> impl Strategy<Value = Op> {
            let direction = prop_oneof![
                Just((1i8, 0i8)),
                Just((-1, 0)),
                Just((0, 1)),
                Just((0, -1)),
            ];
            prop_oneof![
                4 => (direction, 0u32..400).prop_map(|((dx, dy), gap)| Op::Step(dx, dy, gap)),
                1 => Just(Op::Undo),
                1 => Just(Op::Redo),
            ]
        }

        fn policy() -> impl Strategy<Value = UndoPolicy> {
            prop_oneof![
                Just(UndoPolicy::StepWindow),
                (0u32..3000).prop_map(|threshold_ms| UndoPolicy::TimeWindow { threshold_ms }),
            ]
        }

        fn same_history(a: &History, b: &History) -> bool {
            a.iter().eq(b.iter())
        }

        proptest! {
            #[test]
            fn invariants_hold_after_every_op(
                width in 1u16..24,
                height in 1u16..12,
                undo in policy(),
                ring in any::<bool>(),
                ops in prop::collection::vec(op(), 0..120),
            ) {
                let brush = if ring { Brush::Ring } else { Brush::Dot };
                let mut engine = Engine::new(&config(width, height, undo, brush)).unwrap();
                let mut now = 0u32;

                for op in ops {
                    let len_before = engine.history().len();
                    match op {
                        Op::Step(dx, dy, gap) => {
                            now = now.wrapping_add(gap);
                            let moved = engine.step_cursor(dx, dy, Millis::from_raw(now));
                            let expected = if moved { len_before + 1 } else { len_before };
                            prop_assert_eq!(engine.history().len(), expected);
                            if moved {
                                prop_assert_eq!(engine.redo_depth(), 0);
                            }
                        }
                        Op::Undo => {
                            engine.undo();
                        }
                        Op::Redo => {
                            engine.redo();
                        }
                    }

                    let cursor = engine.cursor();
                    prop_assert!(cursor.x < width && cursor.y < height);
                    let last = engine.history().last();
                    prop_assert_eq!(last.map(|p| (p.x, p.y)), Some((cursor.x, cursor.y)));
                    prop_assert_eq!(engine.canvas(), &render(&engine));
                }
            }

            #[test]
            fn redo_reverses_undo(
                undo in policy(),
                ops in prop::collection::vec(op(), 0..80),
            ) {
                let mut engine = Engine::new(&config(32, 16, undo, Brush::Ring)).unwrap();
                let mut now = 0u32;
                for op in ops {
                    match op {
                        Op::Step(dx, dy, gap) => {
                            now = now.wrapping_add(gap);
                            engine.step_cursor(dx, dy, Millis::from_raw(now));
                        }
                        Op::Undo => {
                            engine.undo();
                        }
                        Op::Redo => {
                            engine.redo();
                        }
                    }
                }

                let history = engine.history().clone();
                let cursor = engine.cursor();
                let canvas = engine.canvas().clone();
                if engine.undo() {
                    prop_assert!(engine.redo());
                    prop_assert!(same_history(engine.history(), &history));
                    prop_assert_eq!(engine.cursor(), cursor);
                    prop_assert_eq!(engine.canvas(), &canvas);
                }
            }
        }
    }
}

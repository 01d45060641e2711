//! Cursor/canvas engine
//!
//! Applies unit cursor steps, advances the draw clock, and keeps the raster
//! in step with the point history.

use sketchpad_hal::Millis;

use super::history::{History, Point, RedoStack};
use super::raster::{Damage, Raster};
use crate::config::{Brush, CanvasConfig, ConfigError, SketchConfig, UndoPolicy};

/// Cursor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    pub x: u16,
    pub y: u16,
}

/// Logical drawing-time clock
///
/// Advances only while the cursor is being moved. Each advance is the real
/// time since the previous move, capped, so pauses never count as drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrawClock {
    now_ms: u32,
    last_move: Option<Millis>,
    max_gap_ms: u32,
}

impl DrawClock {
    pub const fn new(max_gap_ms: u32) -> Self {
        Self {
            now_ms: 0,
            last_move: None,
            max_gap_ms,
        }
    }

    /// Current draw time (ms)
    pub fn now(&self) -> u32 {
        self.now_ms
    }

    /// Account for a move attempted at real time `now`
    pub fn advance(&mut self, now: Millis) {
        if let Some(last) = self.last_move {
            let gap = now.diff(last).max(0) as u32;
            self.now_ms = self.now_ms.wrapping_add(gap.min(self.max_gap_ms));
        }
        self.last_move = Some(now);
    }
}

/// Owned drawing state
///
/// Points that fall out of the bounded history are committed to `base`:
/// they stay drawn but can no longer be undone. The canvas always equals
/// `base` with every history point stamped on top, in order.
#[derive(Debug, Clone)]
pub struct Engine {
    pub(super) canvas_cfg: CanvasConfig,
    pub(super) undo_policy: UndoPolicy,
    pub(super) cursor: Cursor,
    pub(super) history: History,
    pub(super) redo: RedoStack,
    pub(super) canvas: Raster,
    pub(super) base: Raster,
    pub(super) clock: DrawClock,
    pub(super) damage: Damage,
    /// History holds only a seed made up by an undo that emptied it
    pub(super) synthetic_seed: bool,
}

impl Engine {
    /// Create an engine with one seed point at the canvas centre
    pub fn new(config: &SketchConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let canvas_cfg = config.canvas;
        let (cx, cy) = canvas_cfg.center();
        let mut engine = Self {
            canvas_cfg,
            undo_policy: config.undo,
            cursor: Cursor { x: cx, y: cy },
            history: History::seeded(Point::new(cx, cy, 0)),
            redo: RedoStack::new(),
            canvas: Raster::new(canvas_cfg.width, canvas_cfg.height),
            base: Raster::new(canvas_cfg.width, canvas_cfg.height),
            clock: DrawClock::new(config.timing.max_move_gap_ms),
            damage: Damage::new(),
            synthetic_seed: false,
        };
        engine.rebuild();
        Ok(engine)
    }

    /// Move the cursor one cell
    ///
    /// Exactly one of `dx`, `dy` must be non-zero, each within -1..=1.
    /// Returns true if the cursor moved; a step into the canvas edge is a
    /// silent no-op that leaves history and the dirty flag untouched.
    pub fn step_cursor(&mut self, dx: i8, dy: i8, now: Millis) -> bool {
        debug_assert!((dx == 0) != (dy == 0), "one axis per step");
        debug_assert!(dx.abs() <= 1 && dy.abs() <= 1, "unit steps only");

        self.clock.advance(now);

        let nx = clamp_axis(self.cursor.x, dx, self.canvas_cfg.width);
        let ny = clamp_axis(self.cursor.y, dy, self.canvas_cfg.height);
        if nx == self.cursor.x && ny == self.cursor.y {
            return false;
        }

        self.cursor = Cursor { x: nx, y: ny };
        self.append(Point::new(nx, ny, self.clock.now()));
        self.canvas.stamp(nx, ny, self.canvas_cfg.brush, &mut self.damage);
        self.redo.clear();
        self.synthetic_seed = false;
        true
    }

    /// Append to history, committing the oldest point if it overflows
    pub(super) fn append(&mut self, point: Point) {
        push_point(&mut self.history, &mut self.base, self.canvas_cfg.brush, point);
    }

    /// Redraw the canvas from the committed layer and history
    pub(super) fn rebuild(&mut self) {
        self.canvas.copy_from(&self.base);
        let brush = self.canvas_cfg.brush;
        let mut scratch = Damage::new();
        for point in self.history.iter() {
            self.canvas.stamp(point.x, point.y, brush, &mut scratch);
        }
        self.damage.mark_full();
    }

    /// Move the cursor to the newest history point
    pub(super) fn relocate_cursor(&mut self) {
        if let Some(last) = self.history.last() {
            self.cursor = Cursor {
                x: last.x,
                y: last.y,
            };
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Batches available to redo
    pub fn redo_depth(&self) -> usize {
        self.redo.depth()
    }

    pub fn canvas(&self) -> &Raster {
        &self.canvas
    }

    /// Current draw-clock reading (ms)
    pub fn draw_time(&self) -> u32 {
        self.clock.now()
    }

    pub fn brush(&self) -> Brush {
        self.canvas_cfg.brush
    }

    /// Cells changed since the last flush
    pub fn damage(&self) -> &Damage {
        &self.damage
    }

    /// Canvas changed since the last flush
    pub fn is_dirty(&self) -> bool {
        self.damage.is_dirty()
    }

    /// Forget pending damage after a successful flush
    pub fn mark_clean(&mut self) {
        self.damage.clear();
    }
}

/// Push onto `history`, stamping any evicted point into `base`
pub(super) fn push_point(history: &mut History, base: &mut Raster, brush: Brush, point: Point) {
    if let Some(evicted) = history.push(point) {
        base.stamp(evicted.x, evicted.y, brush, &mut Damage::new());
    }
}

fn clamp_axis(pos: u16, delta: i8, extent: u16) -> u16 {
    let max = extent.saturating_sub(1) as i32;
    (pos as i32 + delta as i32).clamp(0, max) as u16
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::{AxisConfig, ButtonMode, CanvasAxis, TimingConfig};

    pub(crate) fn config(width: u16, height: u16, undo: UndoPolicy, brush: Brush) -> SketchConfig {
        SketchConfig {
            canvas: CanvasConfig {
                width,
                height,
                brush,
            },
            undo,
            buttons: ButtonMode::hold_repeat(),
            axes: [
                AxisConfig::new(CanvasAxis::X, false),
                AxisConfig::new(CanvasAxis::Y, false),
            ],
            timing: TimingConfig::default(),
        }
    }

    /// Reference render: blank raster with every history point stamped
    pub(crate) fn render(engine: &Engine) -> Raster {
        let mut raster = Raster::new(engine.canvas.width(), engine.canvas.height());
        let mut damage = Damage::new();
        for p in engine.history().iter() {
            raster.stamp(p.x, p.y, engine.brush(), &mut damage);
        }
        raster
    }

    #[test]
    fn test_seed_at_center() {
        let engine = Engine::new(&config(128, 64, UndoPolicy::StepWindow, Brush::Dot)).unwrap();
        assert_eq!(engine.cursor(), Cursor { x: 64, y: 32 });
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.history().last(), Some(Point::new(64, 32, 0)));
        assert!(engine.canvas().get(64, 32));
        assert!(engine.is_dirty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Engine::new(&config(0, 64, UndoPolicy::StepWindow, Brush::Dot));
        assert_eq!(result.err(), Some(ConfigError::ZeroCanvas));
    }

    #[test]
    fn test_step_appends_point() {
        let mut engine = Engine::new(&config(128, 64, UndoPolicy::StepWindow, Brush::Dot)).unwrap();
        engine.mark_clean();

        assert!(engine.step_cursor(1, 0, Millis::from_raw(100)));
        assert_eq!(engine.cursor(), Cursor { x: 65, y: 32 });
        assert_eq!(engine.history().len(), 2);
        assert!(engine.canvas().get(65, 32));
        assert_eq!(engine.damage().cells(), &[(65, 32)]);
    }

    #[test]
    fn test_boundary_is_noop() {
        let mut engine = Engine::new(&config(2, 1, UndoPolicy::StepWindow, Brush::Dot)).unwrap();
        engine.mark_clean();
        // 2x1 canvas: seed at (1, 0)
        assert!(!engine.step_cursor(1, 0, Millis::from_raw(0)));
        assert!(!engine.step_cursor(0, 1, Millis::from_raw(1)));
        assert!(!engine.step_cursor(0, -1, Millis::from_raw(2)));
        assert_eq!(engine.history().len(), 1);
        assert!(!engine.is_dirty());

        assert!(engine.step_cursor(-1, 0, Millis::from_raw(3)));
        assert_eq!(engine.cursor(), Cursor { x: 0, y: 0 });
    }

    #[test]
    fn test_draw_clock_caps_idle_gaps() {
        let mut engine = Engine::new(&config(128, 64, UndoPolicy::StepWindow, Brush::Dot)).unwrap();
        // First move only starts the clock
        engine.step_cursor(1, 0, Millis::from_raw(10_000));
        assert_eq!(engine.draw_time(), 0);
        engine.step_cursor(1, 0, Millis::from_raw(10_040));
        assert_eq!(engine.draw_time(), 40);
        // Long pause counts as 150 ms at most
        engine.step_cursor(1, 0, Millis::from_raw(60_000));
        assert_eq!(engine.draw_time(), 190);
        assert_eq!(engine.history().last().map(|p| p.timestamp), Some(190));
    }

    #[test]
    fn test_draw_clock_across_wrap_and_backwards() {
        let mut clock = DrawClock::new(150);
        clock.advance(Millis::from_raw(u32::MAX - 4));
        clock.advance(Millis::from_raw(5));
        assert_eq!(clock.now(), 10);
        // A reading behind the previous one adds nothing
        clock.advance(Millis::from_raw(1));
        assert_eq!(clock.now(), 10);
    }

    #[test]
    fn test_boundary_still_advances_clock() {
        let mut engine = Engine::new(&config(1, 1, UndoPolicy::StepWindow, Brush::Dot)).unwrap();
        engine.step_cursor(1, 0, Millis::from_raw(0));
        engine.step_cursor(1, 0, Millis::from_raw(100));
        assert_eq!(engine.draw_time(), 100);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_ring_brush_matches_render() {
        let mut engine = Engine::new(&config(32, 16, UndoPolicy::StepWindow, Brush::Ring)).unwrap();
        for _ in 0..3 {
            engine.step_cursor(1, 0, Millis::ZERO);
        }
        engine.step_cursor(0, 1, Millis::ZERO);
        assert_eq!(engine.canvas(), &render(&engine));
        // Cursor cell is hollow
        let c = engine.cursor();
        assert!(!engine.canvas().get(c.x, c.y));
    }

    #[test]
    fn test_history_overflow_commits_oldest() {
        use crate::config::HISTORY_CAPACITY;

        let mut engine =
            Engine::new(&config(320, 240, UndoPolicy::StepWindow, Brush::Dot)).unwrap();
        // Snake across rows until history has overflowed by a few points
        let mut steps = 0;
        let mut dir = 1i8;
        while steps < HISTORY_CAPACITY + 10 {
            if !engine.step_cursor(dir, 0, Millis::ZERO) {
                engine.step_cursor(0, 1, Millis::ZERO);
                dir = -dir;
            }
            steps += 1;
        }
        assert_eq!(engine.history().len(), HISTORY_CAPACITY);
        // The seed fell out of history but is still drawn
        assert!(engine.canvas().get(160, 120));
        assert!(!engine.history().iter().any(|p| (p.x, p.y) == (160, 120)));
    }
}

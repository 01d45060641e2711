//! Per-cycle batching of input into engine mutations and one display flush

use sketchpad_hal::Millis;

use crate::canvas::Engine;
use crate::config::{AxisConfig, SketchConfig};
use crate::input::{ButtonId, InputEvent};
use crate::traits::{Display, DisplayError};

/// Summary of one scheduler cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Cursor steps that moved the cursor
    pub moved: u16,
    /// Cursor steps stopped at the canvas edge
    pub blocked: u16,
    /// Undo requests that changed history
    pub undone: u16,
    /// Redo requests that changed history
    pub redone: u16,
    /// `present()` was called this cycle
    pub presented: bool,
    /// The flush repainted the whole canvas
    pub full_repaint: bool,
}

impl CycleReport {
    /// Returns true if the cycle consumed any input
    pub fn had_input(&self) -> bool {
        self.moved + self.blocked > 0 || self.undone + self.redone > 0
    }
}

/// Batches input between cycles
///
/// Rotation is kept as a net signed count per encoder, button presses as a
/// count per button. A cycle drains axis 1, axis 2, undo, then redo, one
/// unit at a time.
#[derive(Debug, Clone)]
pub struct RenderScheduler {
    axes: [AxisConfig; 2],
    pending_steps: [i16; 2],
    pending_undo: u16,
    pending_redo: u16,
}

impl RenderScheduler {
    pub fn new(config: &SketchConfig) -> Self {
        Self {
            axes: config.axes,
            pending_steps: [0; 2],
            pending_undo: 0,
            pending_redo: 0,
        }
    }

    /// Queue one input event for the next cycle
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::Step { axis, step } => {
                let slot = &mut self.pending_steps[axis.index()];
                *slot = slot.saturating_add(step as i16);
            }
            InputEvent::Button(ButtonId::One) => {
                self.pending_undo = self.pending_undo.saturating_add(1);
            }
            InputEvent::Button(ButtonId::Two) => {
                self.pending_redo = self.pending_redo.saturating_add(1);
            }
        }
    }

    /// Returns true if any input is waiting for a cycle
    pub fn has_pending(&self) -> bool {
        self.pending_steps != [0; 2] || self.pending_undo > 0 || self.pending_redo > 0
    }

    /// Apply all pending input, then flush if the canvas changed
    ///
    /// Calls `present()` at most once. On a display error the engine keeps
    /// its damage, so the next cycle repaints it.
    pub fn run_cycle<D: Display>(
        &mut self,
        engine: &mut Engine,
        display: &mut D,
        now: Millis,
    ) -> Result<CycleReport, DisplayError> {
        let mut report = CycleReport::default();

        for (axis, pending) in self.axes.iter().zip(self.pending_steps.iter_mut()) {
            let count = core::mem::take(pending);
            let (dx, dy) = axis.delta(if count < 0 { -1 } else { 1 });
            for _ in 0..count.unsigned_abs() {
                if engine.step_cursor(dx, dy, now) {
                    report.moved += 1;
                } else {
                    report.blocked += 1;
                }
            }
        }

        for _ in 0..core::mem::take(&mut self.pending_undo) {
            if engine.undo() {
                report.undone += 1;
            }
        }
        for _ in 0..core::mem::take(&mut self.pending_redo) {
            if engine.redo() {
                report.redone += 1;
            }
        }

        if engine.is_dirty() {
            report.full_repaint = flush(engine, display)?;
            report.presented = true;
        }
        Ok(report)
    }
}

/// Push canvas damage to the display and present it
///
/// Returns true if the whole canvas was repainted.
fn flush<D: Display>(engine: &mut Engine, display: &mut D) -> Result<bool, DisplayError> {
    let canvas = engine.canvas();
    let full = engine.damage().is_full();

    if full {
        display.fill(false)?;
        for (x, y) in canvas.iter_on() {
            display.set_pixel(x, y, true)?;
        }
    } else {
        for &(x, y) in engine.damage().cells() {
            display.set_pixel(x, y, canvas.get(x, y))?;
        }
    }
    display.present()?;

    engine.mark_clean();
    Ok(full)
}

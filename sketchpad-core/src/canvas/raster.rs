//! Bit-packed raster and damage tracking

use heapless::Vec;

use crate::config::{Brush, MAX_CANVAS_CELLS};

const WORD_BITS: usize = 32;
const WORDS: usize = MAX_CANVAS_CELLS.div_ceil(WORD_BITS);

/// Damaged cells tracked individually before falling back to a full repaint
pub const MAX_DAMAGE_CELLS: usize = 64;

/// One bit per canvas cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u16,
    height: u16,
    bits: [u32; WORDS],
}

impl Raster {
    /// Blank raster
    ///
    /// Cells past [`MAX_CANVAS_CELLS`] are ignored; config validation keeps
    /// real canvases within it.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            bits: [0; WORDS],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: u16, y: u16) -> Option<(usize, u32)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let cell = y as usize * self.width as usize + x as usize;
        if cell >= MAX_CANVAS_CELLS {
            return None;
        }
        Some((cell / WORD_BITS, 1 << (cell % WORD_BITS)))
    }

    /// Cell state; out-of-bounds reads as off
    pub fn get(&self, x: u16, y: u16) -> bool {
        self.index(x, y)
            .map(|(word, mask)| self.bits[word] & mask != 0)
            .unwrap_or(false)
    }

    /// Set a cell; out-of-bounds writes are dropped
    pub fn set(&mut self, x: u16, y: u16, on: bool) {
        if let Some((word, mask)) = self.index(x, y) {
            if on {
                self.bits[word] |= mask;
            } else {
                self.bits[word] &= !mask;
            }
        }
    }

    /// Turn every cell off
    pub fn clear(&mut self) {
        self.bits.fill(0);
    }

    /// Overwrite with another raster of the same geometry
    pub fn copy_from(&mut self, other: &Raster) {
        self.width = other.width;
        self.height = other.height;
        self.bits.copy_from_slice(&other.bits);
    }

    /// Number of cells that are on
    #[cfg(test)]
    pub fn count_on(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Every on cell, row by row
    pub fn iter_on(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        let width = self.width;
        (0..self.height).flat_map(move |y| {
            (0..width).filter_map(move |x| self.get(x, y).then_some((x, y)))
        })
    }

    /// Stamp `brush` centred on a cell, recording touched cells in `damage`
    pub fn stamp(&mut self, x: u16, y: u16, brush: Brush, damage: &mut Damage) {
        match brush {
            Brush::Dot => {
                self.set(x, y, true);
                damage.mark(x, y);
            }
            Brush::Ring => {
                for oy in -1i32..=1 {
                    for ox in -1i32..=1 {
                        let (cx, cy) = (x as i32 + ox, y as i32 + oy);
                        if cx < 0 || cy < 0 || cx >= self.width as i32 || cy >= self.height as i32
                        {
                            continue;
                        }
                        self.set(cx as u16, cy as u16, true);
                        damage.mark(cx as u16, cy as u16);
                    }
                }
                // Hollow centre keeps the cursor visible
                self.set(x, y, false);
            }
        }
    }
}

/// Cells changed since the last flush
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Damage {
    full: bool,
    cells: Vec<(u16, u16), MAX_DAMAGE_CELLS>,
}

impl Damage {
    pub const fn new() -> Self {
        Self {
            full: false,
            cells: Vec::new(),
        }
    }

    /// Record one changed cell
    pub fn mark(&mut self, x: u16, y: u16) {
        if self.full || self.cells.contains(&(x, y)) {
            return;
        }
        if self.cells.push((x, y)).is_err() {
            self.mark_full();
        }
    }

    /// Whole canvas needs repainting
    pub fn mark_full(&mut self) {
        self.full = true;
        self.cells.clear();
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Anything to flush
    pub fn is_dirty(&self) -> bool {
        self.full || !self.cells.is_empty()
    }

    /// Individually tracked cells (empty when full)
    pub fn cells(&self) -> &[(u16, u16)] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.full = false;
        self.cells.clear();
    }
}

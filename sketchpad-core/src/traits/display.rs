//! Display capability trait
//!
//! Every panel variant (monochrome OLED, colour TFT, character LCD) is
//! driven through this interface. Outside the boot pattern, only the render
//! scheduler touches it.

/// Errors reported by a display driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Bus,
    /// Panel did not acknowledge (no device at the address)
    NotResponding,
    /// Pixel coordinates outside the panel
    OutOfBounds,
}

/// Pixel display capability
///
/// `set_pixel` and `fill` may be buffered; nothing is required to reach the
/// panel before `present`. `present` can be slow and bus-bound, so the
/// scheduler calls it at most once per cycle.
pub trait Display {
    /// Set a single cell on or off
    fn set_pixel(&mut self, x: u16, y: u16, on: bool) -> Result<(), DisplayError>;

    /// Set every cell on or off
    fn fill(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Push pending changes to the panel
    fn present(&mut self) -> Result<(), DisplayError>;

    /// Panel dimensions in cells (width, height)
    fn dimensions(&self) -> (u16, u16);
}

/// Draw the boot frame: a one-cell border and a crosshair through the centre
///
/// Clears the panel first and leaves presenting to the caller.
pub fn draw_boot_frame<D: Display + ?Sized>(display: &mut D) -> Result<(), DisplayError> {
    let (width, height) = display.dimensions();
    display.fill(false)?;
    if width == 0 || height == 0 {
        return Ok(());
    }

    let (cx, cy) = (width / 2, height / 2);
    for x in 0..width {
        display.set_pixel(x, 0, true)?;
        display.set_pixel(x, height - 1, true)?;
        display.set_pixel(x, cy, true)?;
    }
    for y in 0..height {
        display.set_pixel(0, y, true)?;
        display.set_pixel(width - 1, y, true)?;
        display.set_pixel(cx, y, true)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: usize = 9;
    const H: usize = 6;

    struct Grid {
        cells: [[bool; W]; H],
        presents: u32,
    }

    impl Display for Grid {
        fn set_pixel(&mut self, x: u16, y: u16, on: bool) -> Result<(), DisplayError> {
            let (x, y) = (x as usize, y as usize);
            if x >= W || y >= H {
                return Err(DisplayError::OutOfBounds);
            }
            self.cells[y][x] = on;
            Ok(())
        }

        fn fill(&mut self, on: bool) -> Result<(), DisplayError> {
            self.cells = [[on; W]; H];
            Ok(())
        }

        fn present(&mut self) -> Result<(), DisplayError> {
            self.presents += 1;
            Ok(())
        }

        fn dimensions(&self) -> (u16, u16) {
            (W as u16, H as u16)
        }
    }

    #[test]
    fn test_boot_frame_border_and_crosshair() {
        let mut grid = Grid {
            cells: [[true; W]; H],
            presents: 0,
        };
        draw_boot_frame(&mut grid).unwrap();

        let (cx, cy) = (W / 2, H / 2);
        for (y, row) in grid.cells.iter().enumerate() {
            for (x, &on) in row.iter().enumerate() {
                let expected = x == 0 || x == W - 1 || y == 0 || y == H - 1 || x == cx || y == cy;
                assert_eq!(on, expected, "cell ({x}, {y})");
            }
        }
        assert_eq!(grid.presents, 0);
    }
}

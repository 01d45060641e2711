//! Presets for the physical builds
//!
//! Each build pairs a panel with its own encoder orientation, undo policy
//! and button behaviour.

use super::types::*;

/// Physical build variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// 128x32 SSD1306 OLED over I2C
    Oled128x32,
    /// 240x320 ILI9341 TFT over SPI
    TftIli9341,
    /// 240x240 ST7789 TFT over SPI
    TftSt7789,
    /// 16x2 HD44780 character LCD behind a PCF8574 I2C backpack
    Lcd1602,
}

impl Variant {
    /// Parse a variant name as used in `sketch.toml`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "oled_128x32" => Some(Variant::Oled128x32),
            "tft_ili9341" => Some(Variant::TftIli9341),
            "tft_st7789" => Some(Variant::TftSt7789),
            "lcd_1602" => Some(Variant::Lcd1602),
            _ => None,
        }
    }

    /// Base configuration for this build
    pub fn config(self) -> SketchConfig {
        match self {
            Variant::Oled128x32 => SketchConfig::oled_128x32(),
            Variant::TftIli9341 => SketchConfig::tft_ili9341(),
            Variant::TftSt7789 => SketchConfig::tft_st7789(),
            Variant::Lcd1602 => SketchConfig::lcd_1602(),
        }
    }
}

impl SketchConfig {
    /// OLED build: encoder 1 drives Y, ring brush, hold-repeat step undo
    pub fn oled_128x32() -> Self {
        Self {
            canvas: CanvasConfig {
                width: 128,
                height: 32,
                brush: Brush::Ring,
            },
            undo: UndoPolicy::StepWindow,
            buttons: ButtonMode::hold_repeat(),
            axes: [
                AxisConfig::new(CanvasAxis::Y, false),
                AxisConfig::new(CanvasAxis::X, false),
            ],
            timing: TimingConfig::default(),
        }
    }

    /// ILI9341 build: encoder 1 drives Y inverted, edge buttons, 2 s undo window
    pub fn tft_ili9341() -> Self {
        Self {
            canvas: CanvasConfig {
                width: 240,
                height: 320,
                brush: Brush::Dot,
            },
            undo: UndoPolicy::default(),
            buttons: ButtonMode::edge(),
            axes: [
                AxisConfig::new(CanvasAxis::Y, true),
                AxisConfig::new(CanvasAxis::X, false),
            ],
            timing: TimingConfig::default(),
        }
    }

    /// ST7789 build: same controls as the ILI9341 build on a square panel
    pub fn tft_st7789() -> Self {
        let mut config = Self::tft_ili9341();
        config.canvas.height = 240;
        config
    }

    /// Character LCD build: each character cell is one canvas cell
    pub fn lcd_1602() -> Self {
        Self {
            canvas: CanvasConfig {
                width: 16,
                height: 2,
                brush: Brush::Dot,
            },
            undo: UndoPolicy::StepWindow,
            buttons: ButtonMode::hold_repeat(),
            axes: [
                AxisConfig::new(CanvasAxis::X, false),
                AxisConfig::new(CanvasAxis::Y, false),
            ],
            timing: TimingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_valid() {
        for variant in [
            Variant::Oled128x32,
            Variant::TftIli9341,
            Variant::TftSt7789,
            Variant::Lcd1602,
        ] {
            assert_eq!(variant.config().validate(), Ok(()), "{:?}", variant);
        }
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(Variant::from_name("lcd_1602"), Some(Variant::Lcd1602));
        assert_eq!(Variant::from_name("tft_st7789"), Some(Variant::TftSt7789));
        assert_eq!(Variant::from_name("crt"), None);
    }

    #[test]
    fn test_tft_inverts_vertical_encoder() {
        let config = SketchConfig::tft_ili9341();
        assert_eq!(config.axes[0].delta(1), (0, -1));
        assert_eq!(config.axes[1].delta(1), (1, 0));
    }
}

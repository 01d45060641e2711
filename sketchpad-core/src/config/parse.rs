//! Minimal TOML parser for `sketch.toml`
//!
//! Handles only the subset the sketch pad needs, without an allocator.
//!
//! Supported features:
//! - Root `variant = "..."` selecting the base preset
//! - `[canvas]`, `[undo]`, `[buttons]`, `[axis1]`, `[axis2]`, `[timing]` sections
//! - Key = value pairs (string, integer, boolean)
//! - Basic `"..."` and literal `'...'` strings, quoted keys
//! - Integers with `_` separators and `0x`/`0o`/`0b` prefixes
//! - Comments (# ...), including after a section header
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys

use super::presets::Variant;
use super::types::*;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not recognised in its section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// String value missing its closing quote
    UnterminatedString,
    /// Parsed configuration failed validation
    Config(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Config(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Canvas,
    Undo,
    Buttons,
    Axis(usize),
    Timing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PolicyKind {
    Time,
    Step,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModeKind {
    Edge,
    Hold,
}

/// Undo and button settings collected across the file, resolved at the end
/// so key order inside a section does not matter.
#[derive(Debug, Default)]
struct Overrides {
    policy: Option<PolicyKind>,
    threshold_ms: Option<u32>,
    mode: Option<ModeKind>,
    min_gap_ms: Option<u32>,
    initial_delay_ms: Option<u32>,
    repeat_ms: Option<u32>,
}

/// Parse `sketch.toml` into a validated [`SketchConfig`]
///
/// Starts from the OLED preset unless a root `variant` key names another.
pub fn parse_config(input: &str) -> Result<SketchConfig, ParseError> {
    let mut config = SketchConfig::oled_128x32();
    let mut overrides = Overrides::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = strip_comment(line)?
                .strip_suffix(']')
                .map(|h| &h[1..])
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        let value = strip_comment(value)?;
        apply_value(&mut config, &mut overrides, section, key, value)?;
    }

    resolve_overrides(&mut config, &overrides);
    config.validate()?;
    Ok(config)
}

/// Parse section header like "canvas" or "axis1"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match unquote(header.trim()) {
        "canvas" => Ok(Section::Canvas),
        "undo" => Ok(Section::Undo),
        "buttons" => Ok(Section::Buttons),
        "axis1" => Ok(Section::Axis(0)),
        "axis2" => Ok(Section::Axis(1)),
        "timing" => Ok(Section::Timing),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = unquote(key.trim());
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// Drop a trailing `# comment`, honouring quoted strings
fn strip_comment(value: &str) -> Result<&str, ParseError> {
    if let Some(quote) = value.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let end = value[1..].find(quote).ok_or(ParseError::UnterminatedString)? + 2;
        // Only a comment may follow the closing quote
        let rest = value[end..].trim_start();
        if !rest.is_empty() && !rest.starts_with('#') {
            return Err(ParseError::InvalidValue);
        }
        // Keep the quotes so parse_string can see them
        return Ok(&value[..end]);
    }
    Ok(match value.find('#') {
        Some(idx) => value[..idx].trim_end(),
        None => value,
    })
}

/// Remove one pair of matching `"` or `'` quotes, if present
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    // Unquoted strings are allowed for simple values
    Ok(unquote(value))
}

/// Parse an integer value
///
/// Accepts `_` between digits and `0x`, `0o`, `0b` prefixes. Negative values
/// are rejected; every integer setting is unsigned.
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let value = value.strip_prefix('+').unwrap_or(value);
    let (radix, digits) = match value.get(..2) {
        Some("0x") => (16, &value[2..]),
        Some("0o") => (8, &value[2..]),
        Some("0b") => (2, &value[2..]),
        _ => (10, value),
    };
    if radix == 10 && digits.len() > 1 && digits.starts_with('0') {
        return Err(ParseError::InvalidValue);
    }

    let mut result: u32 = 0;
    let mut after_digit = false;
    for c in digits.chars() {
        if c == '_' {
            if !after_digit {
                return Err(ParseError::InvalidValue);
            }
            after_digit = false;
            continue;
        }
        let digit = c.to_digit(radix).ok_or(ParseError::InvalidValue)?;
        result = result
            .checked_mul(radix)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ParseError::InvalidValue)?;
        after_digit = true;
    }
    if !after_digit {
        return Err(ParseError::InvalidValue);
    }

    T::try_from(result).map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_brush(value: &str) -> Result<Brush, ParseError> {
    match parse_string(value)? {
        "dot" => Ok(Brush::Dot),
        "ring" => Ok(Brush::Ring),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_axis(value: &str) -> Result<CanvasAxis, ParseError> {
    match parse_string(value)? {
        "x" | "X" => Ok(CanvasAxis::X),
        "y" | "Y" => Ok(CanvasAxis::Y),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Apply a parsed value to the appropriate config field
fn apply_value(
    config: &mut SketchConfig,
    overrides: &mut Overrides,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Root, "variant") => {
            let variant =
                Variant::from_name(parse_string(value)?).ok_or(ParseError::InvalidValue)?;
            *config = variant.config();
        }

        (Section::Canvas, "width") => config.canvas.width = parse_int(value)?,
        (Section::Canvas, "height") => config.canvas.height = parse_int(value)?,
        (Section::Canvas, "brush") => config.canvas.brush = parse_brush(value)?,

        (Section::Undo, "policy") => {
            overrides.policy = Some(match parse_string(value)? {
                "time" => PolicyKind::Time,
                "step" => PolicyKind::Step,
                _ => return Err(ParseError::InvalidValue),
            })
        }
        (Section::Undo, "threshold_ms") => overrides.threshold_ms = Some(parse_int(value)?),

        (Section::Buttons, "mode") => {
            overrides.mode = Some(match parse_string(value)? {
                "edge" => ModeKind::Edge,
                "hold" => ModeKind::Hold,
                _ => return Err(ParseError::InvalidValue),
            })
        }
        (Section::Buttons, "min_gap_ms") => overrides.min_gap_ms = Some(parse_int(value)?),
        (Section::Buttons, "initial_delay_ms") => {
            overrides.initial_delay_ms = Some(parse_int(value)?)
        }
        (Section::Buttons, "repeat_ms") => overrides.repeat_ms = Some(parse_int(value)?),

        (Section::Axis(idx), "target") => config.axes[idx].target = parse_axis(value)?,
        (Section::Axis(idx), "invert") => config.axes[idx].invert = parse_bool(value)?,

        (Section::Timing, "max_move_gap_ms") => {
            config.timing.max_move_gap_ms = parse_int(value)?
        }
        (Section::Timing, "poll_period_ms") => config.timing.poll_period_ms = parse_int(value)?,
        (Section::Timing, "idle_sleep_ms") => config.timing.idle_sleep_ms = parse_int(value)?,

        _ => return Err(ParseError::UnknownKey),
    }

    Ok(())
}

/// Fold undo and button overrides into the config
fn resolve_overrides(config: &mut SketchConfig, overrides: &Overrides) {
    let policy = overrides.policy.unwrap_or(match config.undo {
        UndoPolicy::TimeWindow { .. } => PolicyKind::Time,
        UndoPolicy::StepWindow => PolicyKind::Step,
    });
    config.undo = match policy {
        PolicyKind::Step => UndoPolicy::StepWindow,
        PolicyKind::Time => {
            let current = match config.undo {
                UndoPolicy::TimeWindow { threshold_ms } => threshold_ms,
                UndoPolicy::StepWindow => DEFAULT_UNDO_WINDOW_MS,
            };
            UndoPolicy::TimeWindow {
                threshold_ms: overrides.threshold_ms.unwrap_or(current),
            }
        }
    };

    let mode = overrides.mode.unwrap_or(match config.buttons {
        ButtonMode::Edge { .. } => ModeKind::Edge,
        ButtonMode::HoldRepeat { .. } => ModeKind::Hold,
    });
    config.buttons = match (mode, config.buttons) {
        (ModeKind::Edge, ButtonMode::Edge { min_gap_ms }) => ButtonMode::Edge {
            min_gap_ms: overrides.min_gap_ms.unwrap_or(min_gap_ms),
        },
        (ModeKind::Edge, _) => ButtonMode::Edge {
            min_gap_ms: overrides.min_gap_ms.unwrap_or(DEFAULT_MIN_PRESS_GAP_MS),
        },
        (
            ModeKind::Hold,
            ButtonMode::HoldRepeat {
                initial_delay_ms,
                repeat_ms,
            },
        ) => ButtonMode::HoldRepeat {
            initial_delay_ms: overrides.initial_delay_ms.unwrap_or(initial_delay_ms),
            repeat_ms: overrides.repeat_ms.unwrap_or(repeat_ms),
        },
        (ModeKind::Hold, _) => ButtonMode::HoldRepeat {
            initial_delay_ms: overrides.initial_delay_ms.unwrap_or(DEFAULT_HOLD_DELAY_MS),
            repeat_ms: overrides.repeat_ms.unwrap_or(DEFAULT_HOLD_REPEAT_MS),
        },
    };
}

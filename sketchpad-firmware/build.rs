//! Build script for sketchpad-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates sketch.toml at compile time, with `toml` for syntax and
//!   schema and with the firmware's own parser for what it will load

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Largest canvas the raster can hold
const MAX_CANVAS_CELLS: i64 = 320 * 240;

/// SSD1306 panel driven by this firmware
const PANEL: (u16, u16) = (128, 32);

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate sketch.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=sketch.toml");

    let config_path = Path::new("sketch.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: sketch.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a sketch.toml configuration file.         ║\n\
            ║  Please create one in the sketchpad-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read sketch.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in sketch.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_root(&config, &mut errors);
    validate_canvas(&config, &mut errors);
    validate_undo(&config, &mut errors);
    validate_buttons(&config, &mut errors);
    validate_axes(&config, &mut errors);
    validate_timing(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid sketch.toml                                      ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    validate_with_firmware_parser(&config_content);

    println!("cargo:warning=sketch.toml validated successfully");
}

/// Run the parser the firmware uses at boot, so a file accepted here is
/// never replaced by the fallback preset on the device
fn validate_with_firmware_parser(content: &str) {
    let config = match sketchpad_core::config::parse_config(content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: sketch.toml rejected by the firmware parser              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format!("{:?}", e)
            );
        }
    };

    let (width, height) = PANEL;
    if config.canvas.width > width || config.canvas.height > height {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Canvas does not fit the panel                            ║\n\
            ║                                                                  ║\n\
            ║  Canvas {:<56} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format!(
                "{}x{} exceeds the {}x{} SSD1306",
                config.canvas.width, config.canvas.height, width, height
            )
        );
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Look up `[name]` as a table, reporting anything else
fn section<'a>(
    config: &'a toml::Value,
    name: &str,
    keys: &[&str],
    errors: &mut Vec<String>,
) -> Option<&'a toml::value::Table> {
    match config.get(name)? {
        toml::Value::Table(t) => {
            for key in t.keys() {
                if !keys.contains(&key.as_str()) {
                    errors.push(format!("[{}] unknown key '{}'", name, key));
                }
            }
            Some(t)
        }
        _ => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
    }
}

/// Check an optional integer key against an inclusive range
fn check_int(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match table.get(key)? {
        toml::Value::Integer(v) if (min..=max).contains(v) => Some(*v),
        toml::Value::Integer(_) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            None
        }
        _ => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
    }
}

/// Check an optional string key against a set of choices
fn check_choice<'a>(
    table: &'a toml::value::Table,
    section: &str,
    key: &str,
    choices: &[&str],
    errors: &mut Vec<String>,
) -> Option<&'a str> {
    match table.get(key)? {
        toml::Value::String(s) if choices.contains(&s.as_str()) => Some(s.as_str()),
        _ => {
            errors.push(format!(
                "[{}] {} must be one of: {}",
                section,
                key,
                choices.join(", ")
            ));
            None
        }
    }
}

/// Validate root keys
fn validate_root(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    const SECTIONS: &[&str] = &["variant", "canvas", "undo", "buttons", "axis1", "axis2", "timing"];
    for key in root.keys() {
        if !SECTIONS.contains(&key.as_str()) {
            errors.push(format!("unknown top-level key '{}'", key));
        }
    }

    check_choice(
        root,
        "root",
        "variant",
        &["oled_128x32", "tft_ili9341", "tft_st7789", "lcd_1602"],
        errors,
    );
}

/// Validate [canvas]
fn validate_canvas(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(canvas) = section(config, "canvas", &["width", "height", "brush"], errors) else {
        return;
    };

    let width = check_int(canvas, "canvas", "width", 1, 320, errors);
    let height = check_int(canvas, "canvas", "height", 1, 320, errors);
    if let (Some(w), Some(h)) = (width, height) {
        if w * h > MAX_CANVAS_CELLS {
            errors.push(format!(
                "[canvas] {}x{} exceeds {} cells",
                w, h, MAX_CANVAS_CELLS
            ));
        }
    }
    check_choice(canvas, "canvas", "brush", &["dot", "ring"], errors);
}

/// Validate [undo]
fn validate_undo(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(undo) = section(config, "undo", &["policy", "threshold_ms"], errors) else {
        return;
    };

    check_choice(undo, "undo", "policy", &["time", "step"], errors);
    check_int(undo, "undo", "threshold_ms", 0, u32::MAX as i64, errors);
}

/// Validate [buttons]
fn validate_buttons(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(buttons) = section(
        config,
        "buttons",
        &["mode", "min_gap_ms", "initial_delay_ms", "repeat_ms"],
        errors,
    ) else {
        return;
    };

    check_choice(buttons, "buttons", "mode", &["edge", "hold"], errors);
    check_int(buttons, "buttons", "min_gap_ms", 0, 60_000, errors);
    check_int(buttons, "buttons", "initial_delay_ms", 0, 60_000, errors);
    check_int(buttons, "buttons", "repeat_ms", 1, 60_000, errors);
}

/// Validate [axis1] and [axis2]
fn validate_axes(config: &toml::Value, errors: &mut Vec<String>) {
    let mut targets = Vec::new();

    for name in ["axis1", "axis2"] {
        let Some(axis) = section(config, name, &["target", "invert"], errors) else {
            continue;
        };
        if let Some(target) = check_choice(axis, name, "target", &["x", "y", "X", "Y"], errors) {
            targets.push(target.to_ascii_lowercase());
        }
        if let Some(invert) = axis.get("invert") {
            if !invert.is_bool() {
                errors.push(format!("[{}] invert must be true or false", name));
            }
        }
    }

    if targets.len() == 2 && targets[0] == targets[1] {
        errors.push(format!("[axis1] and [axis2] both drive '{}'", targets[0]));
    }
}

/// Validate [timing]
fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timing) = section(
        config,
        "timing",
        &["max_move_gap_ms", "poll_period_ms", "idle_sleep_ms"],
        errors,
    ) else {
        return;
    };

    check_int(timing, "timing", "max_move_gap_ms", 0, 60_000, errors);
    check_int(timing, "timing", "poll_period_ms", 1, 100, errors);
    check_int(timing, "timing", "idle_sleep_ms", 1, 1_000, errors);
}

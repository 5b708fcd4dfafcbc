//! Build script for picocalc-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates system.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const SECTIONS: &[(&str, &[&str])] = &[
    (
        "system",
        &[
            "terminal_rows",
            "terminal_width",
            "non_scrolling_lines",
            "multithreading",
            "show_bar",
            "cpu_freq_hz",
            "product",
            "version",
        ],
    ),
    ("timing", &["dirty_period_ms", "header_period_ms", "flush_poll_ms"]),
    ("audio", &["speaker_left", "speaker_right"]),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
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

/// Validate system.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=system.toml");

    let config_path = Path::new("system.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: system.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds system.toml from the picocalc-firmware      ║\n\
            ║  directory. Restore it or create a new one.                      ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read system.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in system.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();
    validate_keys(&config, &mut errors);
    validate_values(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid settings in system.toml                          ║\n\
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

    println!("cargo:warning=system.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only known sections and keys are allowed
fn validate_keys(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return;
    };

    for (name, section) in root {
        let Some((_, keys)) = SECTIONS.iter().find(|(s, _)| *s == name.as_str()) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };
        let Some(table) = section.as_table() else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };
        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }
    }
}

fn get_int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

fn validate_values(config: &toml::Value, errors: &mut Vec<String>) {
    for key in ["dirty_period_ms", "header_period_ms", "flush_poll_ms"] {
        if let Some(v) = get_int(config, "timing", key) {
            if v <= 0 || v > i64::from(u32::MAX) {
                errors.push(format!("[timing] {} must be positive", key));
            }
        }
    }

    let rows = get_int(config, "system", "terminal_rows").unwrap_or(40);
    let fixed = get_int(config, "system", "non_scrolling_lines").unwrap_or(2);
    if !(1..=255).contains(&rows) {
        errors.push("[system] terminal_rows must be 1-255".to_string());
    }
    if fixed < 0 || fixed >= rows {
        errors.push("[system] non_scrolling_lines must be below terminal_rows".to_string());
    }

    let width = get_int(config, "system", "terminal_width").unwrap_or(53);
    if !(20..=64).contains(&width) {
        errors.push("[system] terminal_width must be 20-64".to_string());
    }

    for key in ["product", "version"] {
        if let Some(value) = config.get("system").and_then(|s| s.get(key)) {
            match value.as_str() {
                Some(s) if s.len() <= 16 => {}
                Some(_) => errors.push(format!("[system] {} longer than 16 bytes", key)),
                None => errors.push(format!("[system] {} must be a string", key)),
            }
        }
    }

    let left = get_int(config, "audio", "speaker_left").unwrap_or(26);
    let right = get_int(config, "audio", "speaker_right").unwrap_or(27);
    if left != 26 || right != 27 {
        errors.push("[audio] speakers are wired to GPIO 26 (left) and 27 (right)".to_string());
    }
}

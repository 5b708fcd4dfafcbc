//! Minimal TOML reader for `system.toml`
//!
//! Only the subset the system file uses is understood:
//! - `[system]`, `[timing]` and `[audio]` section headers
//! - `key = value` pairs with integer, boolean or quoted string values
//! - `#` comments, whole-line or trailing
//!
//! Keys outside a section, unknown sections and unknown keys are errors.

use core::str::FromStr;

use heapless::String;

use super::types::{AudioConfig, SystemConfig, MAX_LABEL_LEN};

/// Configuration parse or validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Value has the wrong type or cannot be parsed
    InvalidValue,
    /// Value parsed but is not allowed
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    System,
    Timing,
    Audio,
}

/// Parse and validate a configuration file
///
/// Keys that are absent keep their default values.
pub fn parse_config(input: &str) -> Result<SystemConfig, ConfigError> {
    let mut config = SystemConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::InvalidValue)?;
        match section {
            Section::Root => return Err(ConfigError::UnknownKey),
            Section::System => apply_system(&mut config, key, value)?,
            Section::Timing => apply_timing(&mut config, key, value)?,
            Section::Audio => apply_audio(&mut config, key, value)?,
        }
    }

    validate(&config)?;
    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ConfigError> {
    let name = line
        .strip_prefix('[')
        .and_then(|l| l.strip_suffix(']'))
        .ok_or(ConfigError::InvalidSection)?;

    match name.trim() {
        "system" => Ok(Section::System),
        "timing" => Ok(Section::Timing),
        "audio" => Ok(Section::Audio),
        _ => Err(ConfigError::InvalidSection),
    }
}

fn apply_system(config: &mut SystemConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "terminal_rows" => config.terminal_rows = parse_int(value)?,
        "terminal_width" => config.terminal_width = parse_int(value)?,
        "non_scrolling_lines" => config.non_scrolling_lines = parse_int(value)?,
        "multithreading" => config.multithreading = parse_bool(value)?,
        "show_bar" => config.show_bar = parse_bool(value)?,
        "cpu_freq_hz" => config.cpu_freq_hz = parse_int(value)?,
        "product" => config.product = parse_label(value)?,
        "version" => config.version = parse_label(value)?,
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn apply_timing(config: &mut SystemConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let timing = &mut config.timing;
    match key {
        "dirty_period_ms" => timing.dirty_period_ms = parse_int(value)?,
        "header_period_ms" => timing.header_period_ms = parse_int(value)?,
        "flush_poll_ms" => timing.flush_poll_ms = parse_int(value)?,
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn apply_audio(config: &mut SystemConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let audio = &mut config.audio;
    match key {
        "speaker_left" => audio.speaker_left = parse_int(value)?,
        "speaker_right" => audio.speaker_right = parse_int(value)?,
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn validate(config: &SystemConfig) -> Result<(), ConfigError> {
    let timing = &config.timing;
    if timing.dirty_period_ms == 0 || timing.header_period_ms == 0 || timing.flush_poll_ms == 0 {
        return Err(ConfigError::OutOfRange);
    }
    if config.non_scrolling_lines >= config.terminal_rows {
        return Err(ConfigError::OutOfRange);
    }
    if !(SystemConfig::MIN_WIDTH..=SystemConfig::MAX_WIDTH).contains(&config.terminal_width) {
        return Err(ConfigError::OutOfRange);
    }
    let audio = &config.audio;
    if audio.speaker_left != AudioConfig::LEFT_PIN || audio.speaker_right != AudioConfig::RIGHT_PIN {
        return Err(ConfigError::OutOfRange);
    }
    Ok(())
}

/// Split `key = value`, dropping a trailing comment outside quotes
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => value[..hash_pos].trim(),
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_int<T: FromStr>(value: &str) -> Result<T, ConfigError> {
    let mut digits: String<16> = String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ConfigError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ConfigError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn parse_label(value: &str) -> Result<String<MAX_LABEL_LEN>, ConfigError> {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ConfigError::InvalidValue)?;
    String::try_from(inner).map_err(|_| ConfigError::OutOfRange)
}

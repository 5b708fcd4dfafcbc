//! Two-line status header
//!
//! Line 1 centres the product/version banner, line 2 puts the battery level
//! on the left and the time on the right. The header is repainted by the
//! slow timer, except while the full-screen editor owns the terminal.

use core::fmt::{self, Write};

use heapless::String;
use portable_atomic::{AtomicBool, Ordering};

use super::periodic::PeriodicCallback;
use crate::status::{BatteryGauge, Clock, TimeOfDay};
use crate::terminal::{move_to, HIGHLIGHT, RESET_ATTRIBUTES, RESTORE_CURSOR, SAVE_CURSOR};

/// Widest header line we can build, in columns
pub const MAX_HEADER_WIDTH: usize = 64;

/// One composed header line
///
/// Sized in bytes for `MAX_HEADER_WIDTH` columns of four-byte chars.
pub type HeaderLine = String<{ MAX_HEADER_WIDTH * 4 }>;

/// "Full-screen editor is running" flag
///
/// Set by the editor on entry and cleared on exit. Read from the header
/// timer, so it is atomic like the dirty flag.
#[derive(Debug)]
pub struct EditorState {
    active: AtomicBool,
}

impl EditorState {
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
        }
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a refresh attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaderOutcome {
    /// Header written to the terminal
    Painted,
    /// Editor active, nothing written
    Suppressed,
}

/// Header could not be written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaderError {
    /// Terminal sink refused the bytes
    Output,
}

impl From<fmt::Error> for HeaderError {
    fn from(_: fmt::Error) -> Self {
        HeaderError::Output
    }
}

/// Pull the release number out of a firmware version banner
///
/// `"MicroPython v1.25.0-preview.389"` gives `"1.25.0"`. Input without a
/// `v<digit>` marker is returned whole.
pub fn extract_version(banner: &str) -> &str {
    let bytes = banner.as_bytes();
    let start = bytes
        .windows(2)
        .position(|w| w[0] == b'v' && w[1].is_ascii_digit())
        .map(|i| i + 1);

    match start {
        Some(start) => {
            let rest = &banner[start..];
            let end = rest
                .find(|c: char| c == '-' || c.is_whitespace())
                .unwrap_or(rest.len());
            &rest[..end]
        }
        None => banner,
    }
}

fn push_spaces(line: &mut HeaderLine, count: usize) {
    for _ in 0..count {
        if line.push(' ').is_err() {
            break;
        }
    }
}

/// Append at most `limit` columns of `text`, returning the columns written
fn push_clipped(line: &mut HeaderLine, text: &str, limit: usize) -> usize {
    let mut columns = 0;
    for c in text.chars() {
        if columns >= limit || line.push(c).is_err() {
            break;
        }
        columns += 1;
    }
    columns
}

/// Build both header lines, each exactly `width` columns
///
/// Columns are counted in chars. `battery` is `None` when the gauge could
/// not be read.
pub fn compose_lines(
    description: &str,
    battery: Option<u8>,
    time: TimeOfDay,
    width: usize,
) -> (HeaderLine, HeaderLine) {
    let width = width.min(MAX_HEADER_WIDTH);

    let mut line1 = HeaderLine::new();
    let desc_len = description.chars().count().min(width);
    let indent = (width - desc_len) / 2;
    push_spaces(&mut line1, indent);
    let filled = indent + push_clipped(&mut line1, description, width - indent);
    push_spaces(&mut line1, width.saturating_sub(filled));

    // Battery and time are short; the fixed buffers cannot overflow.
    let mut left: String<16> = String::new();
    let _ = match battery {
        Some(percent) => write!(left, "Battery: {}%", percent),
        None => left.push_str("Battery: --%").map_err(|_| fmt::Error),
    };
    let mut right: String<16> = String::new();
    let _ = write!(right, "{}", time);

    let mut line2 = HeaderLine::new();
    let mut filled = push_clipped(&mut line2, &left, width);
    let gap = width.saturating_sub(filled + right.len());
    push_spaces(&mut line2, gap);
    filled += gap;
    filled += push_clipped(&mut line2, &right, width.saturating_sub(filled));
    push_spaces(&mut line2, width.saturating_sub(filled));

    (line1, line2)
}

/// Slow-timer callback that repaints the header
pub struct HeaderRefresher<'a, G, C, W> {
    editor: &'a EditorState,
    battery: G,
    clock: C,
    out: W,
    description: HeaderLine,
    width: usize,
}

impl<'a, G, C, W> HeaderRefresher<'a, G, C, W>
where
    G: BatteryGauge,
    C: Clock,
    W: Write,
{
    /// Create a refresher painting `"{product} (ver {version})"` banners
    pub fn new(
        editor: &'a EditorState,
        product: &str,
        version: &str,
        width: u8,
        battery: G,
        clock: C,
        out: W,
    ) -> Self {
        let mut description = HeaderLine::new();
        // Over-long banners are clipped to the line width anyway.
        let _ = write!(description, "{} (ver {})", product, version);
        Self {
            editor,
            battery,
            clock,
            out,
            description,
            width: usize::from(width),
        }
    }

    /// Banner shown on line 1
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Terminal sink the header is painted into
    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Compose the header from current readings
    pub fn compose(&mut self) -> (HeaderLine, HeaderLine) {
        let battery = self.battery.percent().ok();
        let time = self.clock.now();
        compose_lines(&self.description, battery, time, self.width)
    }

    /// Repaint unless the editor is active
    ///
    /// The cursor is saved before and restored after, so the user's
    /// prompt is left where it was.
    pub fn refresh(&mut self) -> Result<HeaderOutcome, HeaderError> {
        if self.editor.is_active() {
            return Ok(HeaderOutcome::Suppressed);
        }

        let (line1, line2) = self.compose();

        self.out.write_str(SAVE_CURSOR)?;
        move_to(&mut self.out, 1, 1)?;
        self.out.write_str(HIGHLIGHT)?;
        self.out.write_str(&line1)?;
        self.out.write_str(RESET_ATTRIBUTES)?;
        move_to(&mut self.out, 2, 1)?;
        self.out.write_str(HIGHLIGHT)?;
        self.out.write_str(&line2)?;
        self.out.write_str(RESET_ATTRIBUTES)?;
        self.out.write_str(RESTORE_CURSOR)?;

        Ok(HeaderOutcome::Painted)
    }
}

impl<G, C, W> PeriodicCallback for HeaderRefresher<'_, G, C, W>
where
    G: BatteryGauge,
    C: Clock,
    W: Write,
{
    type Error = HeaderError;

    fn on_tick(&mut self) -> Result<(), Self::Error> {
        self.refresh().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{TickReport, TimerSlot};

    struct FixedBattery(Option<u8>);

    impl BatteryGauge for FixedBattery {
        type Error = ();

        fn percent(&mut self) -> Result<u8, ()> {
            self.0.ok_or(())
        }
    }

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now(&mut self) -> TimeOfDay {
            TimeOfDay::from_secs(self.0)
        }
    }

    /// Sink that rejects every write
    struct BrokenSink;

    impl Write for BrokenSink {
        fn write_str(&mut self, _s: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    type Sink = String<512>;

    fn refresher(editor: &EditorState) -> HeaderRefresher<'_, FixedBattery, FixedClock, Sink> {
        HeaderRefresher::new(
            editor,
            "PicoCalc",
            "1.25.0",
            53,
            FixedBattery(Some(87)),
            FixedClock(12 * 3600 + 30 * 60),
            Sink::new(),
        )
    }

    #[test]
    fn test_extract_version() {
        assert_eq!(extract_version("MicroPython v1.25.0-preview.389"), "1.25.0");
        assert_eq!(extract_version("v2.0"), "2.0");
        assert_eq!(extract_version("custom build"), "custom build");
    }

    #[test]
    fn test_lines_fill_width() {
        let (line1, line2) = compose_lines("PicoCalc (ver 1.25.0)", Some(50), TimeOfDay::default(), 53);
        assert_eq!(line1.len(), 53);
        assert_eq!(line2.len(), 53);
        assert_eq!(line1.trim(), "PicoCalc (ver 1.25.0)");
        // 53 - 21 = 32 columns of padding, 16 on the left
        assert!(line1.starts_with(&" ".repeat(16)));
        assert!(line2.starts_with("Battery: 50%"));
        assert!(line2.ends_with("00:00:00"));
    }

    #[test]
    fn test_missing_battery_reading() {
        let (_, line2) = compose_lines("x", None, TimeOfDay::default(), 40);
        assert!(line2.starts_with("Battery: --%"));
    }

    #[test]
    fn test_long_description_is_clipped() {
        let (line1, _) = compose_lines(&"x".repeat(80), Some(1), TimeOfDay::default(), 20);
        assert_eq!(line1.len(), 20);
    }

    #[test]
    fn test_multibyte_description_keeps_width() {
        let (line1, line2) = compose_lines("aaaaaaaaaaaaaaaaaaa\u{e9}", Some(50), TimeOfDay::default(), 20);
        assert_eq!(line1.chars().count(), 20);
        assert_eq!(line2.chars().count(), 20);
        assert!(line1.ends_with('\u{e9}'));

        let (line1, _) = compose_lines("PicoCalc\u{2122} (ver 1.25.0aaaaaaa)", None, TimeOfDay::default(), 30);
        assert_eq!(line1.chars().count(), 30);
        assert!(line1.starts_with("PicoCalc\u{2122}"));

        let (line1, _) = compose_lines("\u{e9}t\u{e9}", None, TimeOfDay::default(), 21);
        assert_eq!(line1.chars().count(), 21);
        assert_eq!(line1.trim(), "\u{e9}t\u{e9}");
    }

    #[test]
    fn test_width_is_capped() {
        let (line1, line2) = compose_lines("PicoCalc", Some(5), TimeOfDay::default(), 200);
        assert_eq!(line1.chars().count(), MAX_HEADER_WIDTH);
        assert_eq!(line2.chars().count(), MAX_HEADER_WIDTH);
    }

    #[test]
    fn test_refresh_paints_with_saved_cursor() {
        let editor = EditorState::new();
        let mut header = refresher(&editor);

        assert_eq!(header.refresh(), Ok(HeaderOutcome::Painted));
        let out = header.output().as_str();
        assert!(out.starts_with(SAVE_CURSOR));
        assert!(out.ends_with(RESTORE_CURSOR));
        assert!(out.contains("\x1b[1;1H"));
        assert!(out.contains("\x1b[2;1H"));
        assert!(out.contains("PicoCalc (ver 1.25.0)"));
        assert!(out.contains("Battery: 87%"));
        assert!(out.contains("12:30:00"));
    }

    #[test]
    fn test_editor_suppresses_until_cleared() {
        let editor = EditorState::new();
        let mut slot = TimerSlot::new("header", 5000, refresher(&editor));

        editor.set_active(true);
        assert_eq!(slot.fire(), TickReport::Completed);
        assert!(slot.callback().output().is_empty());

        editor.set_active(false);
        assert_eq!(slot.fire(), TickReport::Completed);
        assert!(slot.callback().output().contains("Battery: 87%"));
    }

    #[test]
    fn test_sink_failure_is_contained() {
        let editor = EditorState::new();
        let header = HeaderRefresher::new(
            &editor,
            "PicoCalc",
            "1.0",
            53,
            FixedBattery(Some(1)),
            FixedClock(0),
            BrokenSink,
        );
        let mut slot = TimerSlot::new("header", 5000, header);

        assert_eq!(slot.fire(), TickReport::Failed);
        assert_eq!(slot.fire(), TickReport::Failed);
        assert_eq!(slot.failures(), 2);
    }
}

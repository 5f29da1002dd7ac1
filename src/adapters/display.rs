//! Console display adapter.
//!
//! Mirrors what the 128×64 OLED shows, as 16-column text lines:
//!
//! ```text
//!  status frame        error frame
//!  ┌────────────────┐  ┌────────────────┐
//!  │      ^_^       │  │ERROR:          │
//!  │Status: watching│  │Too many activat│
//!  │Last: 21:07     │  │                │
//!  └────────────────┘  └────────────────┘
//! ```
//!
//! The loop redraws every tick; the adapter only logs when the frame
//! actually changes.

use core::fmt::Write as _;

use log::info;

use crate::app::events::Mood;
use crate::app::ports::DisplayPort;
use crate::error::DisplayError;

/// Characters per line with the 8×8 font on a 128 px panel.
pub const COLUMNS: usize = 16;

pub type Line = heapless::String<COLUMNS>;

/// Up to three lines of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub lines: heapless::Vec<Line, 3>,
}

impl Frame {
    pub fn status(mood: Mood, last_detection: &str) -> Self {
        let mut status = Line::new();
        let _ = write!(status, "Status: {}", mood.label());
        let mut last = Line::new();
        let _ = write!(last, "Last: {}", last_detection);
        Self::from_lines([line(mood.face()), status, last])
    }

    pub fn error(message: &str) -> Self {
        Self::from_lines([line("ERROR:"), line(message)])
    }

    fn from_lines<const N: usize>(lines: [Line; N]) -> Self {
        let mut v = heapless::Vec::new();
        for l in lines {
            // N <= 3 at every call site.
            let _ = v.push(l);
        }
        Self { lines: v }
    }
}

/// Truncate `text` to [`COLUMNS`] characters.
fn line(text: &str) -> Line {
    let mut l = Line::new();
    for c in text.chars() {
        if l.push(c).is_err() {
            break;
        }
    }
    l
}

/// Display adapter that renders frames to the log.
#[derive(Default)]
pub struct ConsoleDisplay {
    current: Option<Frame>,
    redraws: u64,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame currently on screen.
    pub fn current(&self) -> Option<&Frame> {
        self.current.as_ref()
    }

    /// Frames that differed from the previous one.
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    fn render(&mut self, frame: Frame) {
        if self.current.as_ref() == Some(&frame) {
            return;
        }
        let text: Vec<&str> = frame.lines.iter().map(|l| l.as_str()).collect();
        info!("DISPLAY | {}", text.join(" | "));
        self.redraws += 1;
        self.current = Some(frame);
    }
}

impl DisplayPort for ConsoleDisplay {
    fn show_status(&mut self, mood: Mood, last_detection: &str) -> Result<(), DisplayError> {
        self.render(Frame::status(mood, last_detection));
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<(), DisplayError> {
        self.render(Frame::error(message));
        Ok(())
    }
}

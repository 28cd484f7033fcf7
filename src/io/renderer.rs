//! Renderer boundary.
//!
//! The session emits one role-tagged frame of points per cycle; what
//! happens to them (window, log line, CSV row) is entirely the renderer's
//! business. The renderer returns nothing to the core.

use crate::core::types::TrackedFrame;
use std::io::Write;

/// Consumer of per-cycle tracking frames.
pub trait Renderer {
    /// Display or record one frame.
    fn render(&mut self, frame: &TrackedFrame);
}

/// Renderer that discards frames. Useful for benchmarks and tests.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &TrackedFrame) {}
}

/// Renderer that logs each frame at debug level.
///
/// The distances from the true point mirror the line segments of the
/// classic demo: if the filter works, corrected < predicted < measured.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &TrackedFrame) {
        log::debug!(
            "cycle {}: truth=({:.1},{:.1}) err measured={:.1}px predicted={:.1}px corrected={:.1}px",
            frame.cycle,
            frame.truth.x,
            frame.truth.y,
            frame.truth.distance(&frame.measured),
            frame.truth.distance(&frame.predicted),
            frame.truth.distance(&frame.corrected),
        );
    }
}

/// Renderer that writes frames as CSV rows to any writer.
///
/// Columns follow the role order of [`TrackedFrame::points`], one x/y
/// pair per role.
pub struct CsvRenderer<W: Write> {
    writer: W,
    header_written: bool,
}

impl<W: Write> CsvRenderer<W> {
    /// Wrap a writer. The header row is emitted before the first frame.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    fn write_frame(&mut self, frame: &TrackedFrame) -> std::io::Result<()> {
        if !self.header_written {
            write!(self.writer, "cycle")?;
            for (role, _) in frame.points() {
                write!(self.writer, ",{}_x,{}_y", role.name(), role.name())?;
            }
            writeln!(self.writer)?;
            self.header_written = true;
        }
        write!(self.writer, "{}", frame.cycle)?;
        for (_, point) in frame.points() {
            write!(self.writer, ",{},{}", point.x, point.y)?;
        }
        writeln!(self.writer)
    }
}

impl<W: Write> Renderer for CsvRenderer<W> {
    fn render(&mut self, frame: &TrackedFrame) {
        if let Err(e) = self.write_frame(frame) {
            log::warn!("CSV renderer write failed: {}", e);
        }
    }
}

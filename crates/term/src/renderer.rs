//! Terminal output stage.
//!
//! Drawing is double-buffered: each frame is diffed against the previous one
//! and only the dirty spans are re-encoded, so a steady board costs almost
//! no terminal I/O.

use std::io::{self, Write};
use std::mem;

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Tracks the style most recently queued so a run of same-styled cells
/// costs one escape sequence instead of one per cell.
#[derive(Default)]
struct StylePen {
    current: Option<CellStyle>,
}

impl StylePen {
    fn write(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        if self.current == Some(style) {
            return Ok(());
        }
        // The attribute reset clears colors too, so it has to go first.
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(SetForegroundColor(term_color(style.fg)))?;
        out.queue(SetBackgroundColor(term_color(style.bg)))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.current = Some(style);
        Ok(())
    }
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_pending()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_pending()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Drops the retained frame so the next draw repaints everything.
    ///
    /// Call after a terminal resize, when the old contents are stale.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draws a frame and keeps it as the baseline for the next diff.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame. The
    /// renderer trades buffers with the caller instead of cloning; the
    /// buffer handed back holds a stale frame and is expected to be fully
    /// rewritten before the next draw.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.last.as_ref() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                write_frame_diff(prev, fb, &mut self.buf)?;
            }
            _ => write_full_frame(fb, &mut self.buf)?,
        }
        self.flush_pending()?;

        match self.last.as_mut() {
            Some(prev) => mem::swap(prev, fb),
            None => self.last = Some(mem::replace(fb, FrameBuffer::new(0, 0))),
        }
        Ok(())
    }

    fn flush_pending(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes a full-frame redraw into `out` without touching stdout.
pub fn write_full_frame(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = StylePen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for cell in fb.row(y) {
            pen.write(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encodes only the cells that differ between two frames into `out`.
pub fn write_frame_diff(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = StylePen::default();
    each_dirty_span(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for cell in &next.row(y)[x as usize..(x + len) as usize] {
            pen.write(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    })?;
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Calls `emit(x, y, len)` for every horizontal span of cells that differs
/// between the two frames. Mismatched dimensions mark every row dirty.
fn each_dirty_span(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut emit: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let same_size = prev.width() == next.width() && prev.height() == next.height();
    for y in 0..next.height() {
        if !same_size {
            emit(0, y, next.width())?;
            continue;
        }
        let (old, new) = (prev.row(y), next.row(y));
        let mut x = 0;
        while x < new.len() {
            if old[x] == new[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < new.len() && old[x] != new[x] {
                x += 1;
            }
            emit(start as u16, y, (x - start) as u16)?;
        }
    }
    Ok(())
}

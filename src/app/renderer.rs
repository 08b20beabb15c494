use std::io::{Stdout, Write};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{app::mirror::Mirror, maze::Fill};

/// Draws the mirrored grid at the top of the terminal with a status line below.
///
/// The terminal stays in cooked mode so the configuration prompt can read whole
/// lines underneath the maze while it is displayed.
pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    /// Height of the last drawn grid, in terminal rows
    grid_rows: u16,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            stdout: std::io::stdout(),
            grid_rows: 0,
        }
    }
}

impl Renderer {
    /// Set a panic hook to show the cursor again on panic, even if the panic
    /// occurs in a different thread
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = Renderer::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Clear the screen and hide the cursor
    pub fn setup(&mut self) -> std::io::Result<()> {
        Renderer::set_panic_hook();
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        self.stdout.flush()
    }

    /// Restore the cursor below the maze
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, cursor::Show, style::ResetColor)?;
        stdout.flush()
    }

    pub fn restore(&mut self) -> std::io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(0, self.grid_rows + 1))?;
        Renderer::restore_terminal(&mut self.stdout)
    }

    /// Logs a warning if the terminal cannot show the whole grid
    fn check_size(width: usize, height: usize) -> std::io::Result<()> {
        let (term_width, term_height) = terminal::size()?;
        let needed_width = width * Fill::CELL_WIDTH as usize;
        if (term_width as usize) < needed_width || (term_height as usize) < height + 1 {
            tracing::warn!(
                "[render] terminal {}x{} is too small for a {}x{} grid",
                term_width,
                term_height,
                needed_width,
                height + 1
            );
        }
        Ok(())
    }

    /// Paints whatever changed in the mirror since the last call.
    /// A resized mirror is repainted from scratch.
    pub fn draw(&mut self, mirror: &mut Mirror) -> std::io::Result<()> {
        let (width, height) = mirror.dims();
        if mirror.take_full_redraw() {
            Renderer::check_size(width, height)?;
            self.grid_rows = height as u16;
            queue!(
                self.stdout,
                terminal::Clear(ClearType::All),
                cursor::Hide,
                cursor::MoveTo(0, 0)
            )?;
            for row in mirror.rows() {
                for fill in row {
                    self.stdout.queue(style::Print(fill))?;
                }
                self.stdout.queue(style::Print("\r\n"))?;
            }
            // Anything queued before the resize is already covered
            mirror.take_dirty();
        } else {
            let dirty = mirror.take_dirty();
            if dirty.is_empty() {
                return Ok(());
            }
            for (row, col) in dirty {
                queue!(
                    self.stdout,
                    cursor::MoveTo(col as u16 * Fill::CELL_WIDTH, row as u16),
                    style::Print(mirror.fill((row, col)))
                )?;
            }
        }
        self.stdout.queue(cursor::MoveTo(0, self.grid_rows + 1))?;
        self.stdout.flush()
    }

    /// Writes a status line under the grid, truncated to the terminal width,
    /// and leaves the cursor on the line after it.
    pub fn status(&mut self, text: &str) -> std::io::Result<()> {
        let max_width = terminal::size().map(|(w, _)| w as usize).unwrap_or(80);
        let (line, _) = text.unicode_truncate(max_width);
        queue!(
            self.stdout,
            cursor::MoveTo(0, self.grid_rows),
            terminal::Clear(ClearType::FromCursorDown),
            style::PrintStyledContent(line.with(Color::Green).attribute(Attribute::Bold)),
            style::Print("\r\n"),
            cursor::Show
        )?;
        self.stdout.flush()
    }
}

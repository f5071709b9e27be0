//! Status presenter: multi-line text onto a [`DisplayPort`].
//!
//! Each call repaints the whole screen.  Rows are laid out top-down at a
//! fixed pitch; empty segments don't consume a row and rows that would
//! start below the panel are dropped.

use log::{debug, warn};

use crate::app::ports::{DisplayError, DisplayPort, StatusPort};

pub struct StatusPresenter<D> {
    display: D,
    line_height: u32,
}

impl<D: DisplayPort> StatusPresenter<D> {
    pub fn new(display: D, line_height: u32) -> Self {
        Self {
            display,
            line_height: line_height.max(1),
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Number of rows that fit on the panel.
    pub fn capacity(&self) -> usize {
        (self.display.height() / self.line_height) as usize
    }

    fn render(&mut self, text: &str) -> Result<(), DisplayError> {
        self.display.clear()?;
        let rows = text
            .split('\n')
            .filter(|line| !line.is_empty())
            .take(self.capacity());
        for (row, line) in rows.enumerate() {
            let y = row as i32 * self.line_height as i32;
            self.display.draw_text(0, y, line)?;
        }
        self.display.present()
    }
}

impl<D: DisplayPort> StatusPort for StatusPresenter<D> {
    fn show(&mut self, text: &str) {
        debug!("DISPLAY | {:?}", text);
        if let Err(e) = self.render(text) {
            warn!("DISPLAY | update failed: {}", e);
        }
    }
}

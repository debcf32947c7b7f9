//! The dashboard and its main loop.
//!
//! [`Dashboard`] is the screen state: the table over a one-line status bar.
//! [`App`] drives it from two channels, terminal input and feed updates,
//! and is the only code that ever mutates the table.

use crate::actor::{InputEvent, Surface, SurfaceUpdate};
use crate::buffer::Buffer;
use crate::error::AppError;
use crate::feed::FeedError;
use crate::layout::Rect;
use crate::sync::upsert_row;
use crate::widget::{QuakeTable, StatusBar, Widget};
use crossbeam_channel::{never, select, Receiver};

const DEFAULT_TITLE: &str = "USGS Earthquakes";

/// Table plus status bar, sized to the terminal.
#[derive(Debug)]
pub struct Dashboard {
    table: QuakeTable,
    status: StatusBar,
}

impl Dashboard {
    /// Lay out an empty dashboard for a `width` by `height` terminal.
    pub fn new(width: u16, height: u16) -> Self {
        let (body, footer) = Rect::from_size(width, height).split_footer(1);
        let mut status = StatusBar::new(footer);
        status.set_left(DEFAULT_TITLE);
        status.set_center(event_count(0));
        status.set_right("fetching…");

        Self {
            table: QuakeTable::new(body),
            status,
        }
    }

    /// The event table.
    pub const fn table(&self) -> &QuakeTable {
        &self.table
    }

    /// The status bar.
    pub const fn status(&self) -> &StatusBar {
        &self.status
    }

    /// Re-layout after a terminal resize.
    pub fn resize(&mut self, width: u16, height: u16) {
        let (body, footer) = Rect::from_size(width, height).split_footer(1);
        self.table.set_bounds(body);
        self.status.set_bounds(footer);
    }

    /// Apply one message from the feed worker.
    ///
    /// Returns whether the screen needs repainting.
    ///
    /// # Errors
    ///
    /// Returns the worker's error for [`SurfaceUpdate::FeedFailed`].
    pub fn apply(&mut self, update: SurfaceUpdate) -> Result<bool, FeedError> {
        match update {
            SurfaceUpdate::Upsert(row) => {
                upsert_row(&mut self.table, &row);
                self.status.set_center(event_count(self.table.len()));
            }
            SurfaceUpdate::Redraw => {}
            SurfaceUpdate::CycleComplete { title, fetched, at } => {
                if let Some(title) = title {
                    self.status.set_left(title);
                }
                self.status.set_right(format!("updated {}", at.format("%H:%M:%S")));
                tracing::debug!(fetched, shown = self.table.len(), "cycle applied");
            }
            SurfaceUpdate::FeedFailed(e) => return Err(e),
        }
        Ok(true)
    }

    /// Route a key to the table. Returns whether it changed anything.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        self.table.handle_input(event)
    }

    /// Draw the whole dashboard into `buffer`.
    pub fn render(&self, buffer: &mut Buffer) {
        buffer.clear();
        self.table.render(buffer);
        self.status.render(buffer);
    }
}

fn event_count(n: usize) -> String {
    if n == 1 {
        "1 event".to_owned()
    } else {
        format!("{n} events")
    }
}

/// Main loop: terminal surface, dashboard and the worker's update channel.
pub struct App {
    surface: Surface,
    dashboard: Dashboard,
    updates: Receiver<SurfaceUpdate>,
}

impl App {
    /// Wire a dashboard sized to `surface` to the worker's `updates`.
    pub fn new(surface: Surface, updates: Receiver<SurfaceUpdate>) -> Self {
        let dashboard = Dashboard::new(surface.width(), surface.height());
        Self {
            surface,
            dashboard,
            updates,
        }
    }

    /// Run until the user quits or a fetch fails.
    ///
    /// The terminal is restored when `self` is dropped, which happens
    /// before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Feed`] if the worker reports a failed fetch.
    pub fn run(mut self) -> Result<(), AppError> {
        let input = self.surface.input_receiver().clone();
        let mut updates = self.updates.clone();
        let mut worker_gone = false;

        self.paint(true);
        while self.surface.is_running() {
            let mut dirty = select! {
                recv(input) -> event => match event {
                    Ok(event) => self.on_input(&event),
                    Err(_) => {
                        self.surface.stop();
                        false
                    }
                },
                recv(updates) -> update => match update {
                    Ok(update) => self.dashboard.apply(update)?,
                    Err(_) => {
                        worker_gone = true;
                        false
                    }
                },
            };
            if worker_gone {
                tracing::warn!("feed worker exited; table will no longer update");
                updates = never();
                worker_gone = false;
            }

            // Batch whatever else the worker queued into one frame
            for update in updates.try_iter() {
                dirty |= self.dashboard.apply(update)?;
            }

            if dirty && self.surface.is_running() {
                self.paint(false);
            }
        }

        tracing::info!("quit requested");
        Ok(())
    }

    fn on_input(&mut self, event: &InputEvent) -> bool {
        if event.is_quit() {
            self.surface.stop();
            return false;
        }
        match *event {
            InputEvent::Resize { width, height } => {
                self.surface.handle_resize(width, height);
                self.dashboard.resize(width, height);
                self.paint(true);
                false
            }
            InputEvent::Error(ref message) => {
                tracing::warn!(%message, "input error");
                false
            }
            InputEvent::Shutdown => {
                self.surface.stop();
                false
            }
            InputEvent::Key { .. } => self.dashboard.handle_input(event),
        }
    }

    fn paint(&mut self, full: bool) {
        self.dashboard.render(self.surface.buffer_mut());
        if full {
            self.surface.request_redraw();
        } else {
            self.surface.request_update();
        }
    }
}

//! Surface: the terminal as the dashboard sees it.
//!
//! Owns the terminal mode, the input and render actors, and the
//! application buffer that widgets draw into. Dropping it puts the
//! terminal back the way it was found.

use super::messages::{InputEvent, RenderCommand};
use super::{InputActor, RendererActor};
use crate::buffer::Buffer;
use crossbeam_channel::{bounded, Receiver, Sender};
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use std::time::Duration;

/// Configuration for the [`Surface`].
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            input_poll_timeout: Duration::from_millis(50),
        }
    }
}

/// Raw-mode terminal with its actors.
pub struct Surface {
    input_rx: Receiver<InputEvent>,
    render_tx: Sender<RenderCommand>,
    input_actor: Option<InputActor>,
    renderer_actor: Option<RendererActor>,
    /// Application buffer; widgets draw here, requests send a copy.
    buffer: Buffer,
    width: u16,
    height: u16,
    running: bool,
}

impl Surface {
    /// Take over the terminal with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn new() -> io::Result<Self> {
        Self::with_config(SurfaceConfig::default())
    }

    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be read, raw mode or the
    /// alternate screen cannot be entered, or an actor thread fails to spawn.
    pub fn with_config(config: SurfaceConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, cursor::Hide) {
            restore_terminal();
            return Err(e);
        }

        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let (render_tx, render_rx) = bounded::<RenderCommand>(16);

        let actors = InputActor::spawn(input_tx, config.input_poll_timeout).and_then(|input| {
            RendererActor::spawn(render_rx, width, height).map(|renderer| (input, renderer))
        });
        let (input_actor, renderer_actor) = match actors {
            Ok(actors) => actors,
            Err(e) => {
                restore_terminal();
                return Err(e);
            }
        };

        tracing::debug!(width, height, "terminal surface ready");

        Ok(Self {
            input_rx,
            render_tx,
            input_actor: Some(input_actor),
            renderer_actor: Some(renderer_actor),
            buffer: Buffer::new(width, height),
            width,
            height,
            running: true,
        })
    }

    /// Get the terminal width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the terminal height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get a mutable reference to the buffer.
    pub const fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// Get the input receiver for event-driven loops.
    pub const fn input_receiver(&self) -> &Receiver<InputEvent> {
        &self.input_rx
    }

    /// Check if the surface is still running.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the surface; the run loop exits on its next turn.
    pub const fn stop(&mut self) {
        self.running = false;
    }

    /// Repaint the whole screen from the buffer.
    pub fn request_redraw(&self) {
        let _ = self
            .render_tx
            .send(RenderCommand::FullRedraw(Box::new(self.buffer.clone())));
    }

    /// Repaint only what changed since the last frame.
    pub fn request_update(&self) {
        let _ = self
            .render_tx
            .send(RenderCommand::Update(Box::new(self.buffer.clone())));
    }

    /// Adopt a new terminal size. The buffer is cleared; redraw afterwards.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer.resize(width, height);
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }

        // Let the renderer finish its last frame before leaving raw mode
        let _ = self.render_tx.send(RenderCommand::Shutdown);
        if let Some(actor) = self.renderer_actor.take() {
            actor.join();
        }

        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

//! Renderer Actor: Dedicated thread for rendering to the terminal.
//!
//! This actor owns stdout and the double buffers. It receives whole frames
//! from the main loop, diffs them against what is on screen and flushes
//! the result in one write.

use super::messages::RenderCommand;
use crate::buffer::diff::{render_diff, render_full, DiffState};
use crate::buffer::Buffer;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Renderer actor that handles terminal output.
pub struct RendererActor {
    /// Handle to the render thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

/// Render statistics for debugging/profiling.
#[derive(Debug, Clone, Default)]
pub struct RenderStats {
    /// Total frames rendered.
    pub frames: u64,
    /// Total cells changed across all diffed frames.
    pub cells_changed: u64,
    /// Total bytes written to the terminal.
    pub bytes_written: u64,
    /// Smoothed render time in microseconds.
    pub avg_render_us: u64,
}

/// Double-buffered frame writer.
struct Renderer<W> {
    /// What the terminal currently shows.
    current: Buffer,
    /// Diff state for cursor/color tracking.
    diff_state: DiffState,
    /// Pre-allocated output buffer.
    output: Vec<u8>,
    out: W,
    stats: RenderStats,
    /// Whether the next frame must be painted from scratch.
    needs_full_redraw: bool,
}

impl<W: Write> Renderer<W> {
    fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            current: Buffer::new(width, height),
            diff_state: DiffState::new(),
            output: Vec::with_capacity(65536),
            out,
            stats: RenderStats::default(),
            needs_full_redraw: true,
        }
    }

    /// Put `next` on screen and make it the current frame.
    fn render(&mut self, next: Buffer, force_full: bool) -> io::Result<()> {
        let start = Instant::now();
        self.output.clear();

        // A size change invalidates every cell position
        let resized = next.width() != self.current.width() || next.height() != self.current.height();
        if force_full || resized || self.needs_full_redraw {
            render_full(&next, &mut self.output, &mut self.diff_state);
            self.needs_full_redraw = false;
        } else {
            let result = render_diff(&self.current, &next, &mut self.output, &mut self.diff_state);
            self.stats.cells_changed += result.cells_changed as u64;
        }

        if !self.output.is_empty() {
            if let Err(e) = self.out.write_all(&self.output).and_then(|()| self.out.flush()) {
                // Partial write: screen contents are unknown now
                self.needs_full_redraw = true;
                self.diff_state.reset();
                return Err(e);
            }
        }
        self.current = next;

        let elapsed = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.stats.frames += 1;
        self.stats.bytes_written += self.output.len() as u64;
        self.stats.avg_render_us = if self.stats.avg_render_us == 0 {
            elapsed
        } else {
            (self.stats.avg_render_us * 15 + elapsed) / 16
        };

        Ok(())
    }
}

impl RendererActor {
    /// Spawn the renderer actor thread, writing to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn spawn(receiver: Receiver<RenderCommand>, width: u16, height: u16) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("quakewatch-render".to_string())
            .spawn(move || {
                let renderer = Renderer::new(io::stdout(), width, height);
                let stats = Self::run_loop(renderer, &receiver, &shutdown_clone);
                tracing::debug!(
                    frames = stats.frames,
                    cells_changed = stats.cells_changed,
                    bytes = stats.bytes_written,
                    avg_render_us = stats.avg_render_us,
                    "render thread stopped"
                );
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the render thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the render thread to finish.
    ///
    /// Call [`shutdown`](Self::shutdown) or send [`RenderCommand::Shutdown`] first.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop<W: Write>(
        mut renderer: Renderer<W>,
        receiver: &Receiver<RenderCommand>,
        shutdown: &AtomicBool,
    ) -> RenderStats {
        while !shutdown.load(Ordering::Relaxed) {
            let (buffer, full) = match receiver.recv_timeout(Duration::from_millis(50)) {
                Ok(RenderCommand::FullRedraw(buffer)) => (buffer, true),
                Ok(RenderCommand::Update(buffer)) => (buffer, false),
                Ok(RenderCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => continue,
            };

            if let Err(e) = renderer.render(*buffer, full) {
                // Keep going; the next frame repaints everything
                tracing::error!(error = %e, "terminal write failed");
            }
        }
        renderer.stats
    }
}

impl Drop for RendererActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

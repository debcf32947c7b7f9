//! Feed Worker: the scheduler thread.
//!
//! Runs one fetch cycle immediately, then keeps two independent schedules:
//! a fetch every `fetch_interval` and a repaint request every
//! `redraw_interval`. Everything it learns is sent to the main loop as
//! [`SurfaceUpdate`] messages; it never touches the table itself.

use super::messages::SurfaceUpdate;
use super::ticker::TickerActor;
use crate::feed::FeedSource;
use crate::quake::{EventStore, Reconciler};
use chrono::{Local, TimeZone};
use crossbeam_channel::{select, Sender};
use std::fmt::Display;
use std::io;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How often the worker fetches and asks for a repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSchedule {
    /// Time between fetch cycles.
    pub fetch_interval: Duration,
    /// Time between repaint requests.
    pub redraw_interval: Duration,
}

impl Default for FeedSchedule {
    fn default() -> Self {
        Self {
            fetch_interval: Duration::from_secs(60),
            redraw_interval: Duration::from_secs(1),
        }
    }
}

/// Handle to the feed worker thread.
pub struct FeedWorker {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl FeedWorker {
    /// Spawn the worker. The first fetch starts right away.
    ///
    /// The worker stops after a failed fetch, when `shutdown` is called, or
    /// when the receiving end of `updates` is dropped. A fetch already in
    /// flight is allowed to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn a thread.
    pub fn spawn<S, Tz>(
        source: S,
        reconciler: Reconciler<Tz>,
        schedule: FeedSchedule,
        updates: Sender<SurfaceUpdate>,
    ) -> io::Result<Self>
    where
        S: FeedSource + Send + 'static,
        Tz: TimeZone + Send + 'static,
        Tz::Offset: Display,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let fetch = TickerActor::spawn("fetch-tick", schedule.fetch_interval)?;
        let redraw = TickerActor::spawn("redraw-tick", schedule.redraw_interval)?;

        let handle = thread::Builder::new()
            .name("quakewatch-feed".to_string())
            .spawn(move || {
                let mut worker = Worker {
                    source,
                    reconciler,
                    store: EventStore::new(),
                    updates,
                };
                worker.run_loop(&fetch, &redraw, &shutdown_clone);
                fetch.join();
                redraw.join();
                tracing::debug!(known = worker.store.len(), "feed worker stopped");
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the worker to stop after its current step.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the worker thread to finish.
    ///
    /// Blocks for as long as an in-flight fetch takes.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for FeedWorker {
    fn drop(&mut self) {
        // Not joined: a blocked fetch must not hold up process exit
        self.shutdown();
    }
}

struct Worker<S, Tz> {
    source: S,
    reconciler: Reconciler<Tz>,
    store: EventStore,
    updates: Sender<SurfaceUpdate>,
}

impl<S, Tz> Worker<S, Tz>
where
    S: FeedSource,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn run_loop(&mut self, fetch: &TickerActor, redraw: &TickerActor, shutdown: &AtomicBool) {
        if self.cycle().is_break() {
            return;
        }

        while !shutdown.load(Ordering::Relaxed) {
            let step = select! {
                recv(fetch.receiver()) -> tick => match tick {
                    Ok(_) => self.cycle(),
                    Err(_) => ControlFlow::Break(()),
                },
                recv(redraw.receiver()) -> tick => match tick {
                    Ok(_) => self.send(SurfaceUpdate::Redraw),
                    Err(_) => ControlFlow::Break(()),
                },
                default(Duration::from_millis(100)) => ControlFlow::Continue(()),
            };
            if step.is_break() {
                break;
            }
        }
    }

    /// One fetch: download, reconcile, send every row, then report.
    fn cycle(&mut self) -> ControlFlow<()> {
        let snapshot = match self.source.fetch_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(error = %e, "feed fetch failed");
                let _ = self.updates.send(SurfaceUpdate::FeedFailed(e));
                return ControlFlow::Break(());
            }
        };

        let title = snapshot.metadata.title.clone();
        let fetched = snapshot.features.len();
        for row in self.reconciler.reconcile(snapshot, &mut self.store) {
            self.send(SurfaceUpdate::Upsert(row))?;
        }

        tracing::info!(fetched, known = self.store.len(), "fetch cycle complete");
        self.send(SurfaceUpdate::CycleComplete {
            title,
            fetched,
            at: Local::now(),
        })
    }

    fn send(&self, update: SurfaceUpdate) -> ControlFlow<()> {
        if self.updates.send(update).is_ok() {
            ControlFlow::Continue(())
        } else {
            // Main loop has exited
            ControlFlow::Break(())
        }
    }
}

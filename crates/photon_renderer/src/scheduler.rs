//! Asynchronous frame scheduler.
//!
//! A pass is launched from [`FrameScheduler::poll`] when a redraw is pending.
//! One master thread splits the back buffer into row bands and renders them
//! on a rayon pool; the caller keeps polling without blocking and reads the
//! last completed frame from [`FrameScheduler::buffer`] in the meantime.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use photon_core::Scene;
use thiserror::Error;

use crate::band::{partition_rows, render_band};
use crate::framebuffer::FrameBuffer;
use crate::renderer::{RenderConfig, Tracer};

/// Errors from launching or finishing a frame pass.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Failed to spawn render thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Render pass panicked")]
    WorkerPanicked,
}

/// Scheduler state reported by [`FrameScheduler::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    Rendering,
}

/// A pass in flight.
struct Pass {
    handle: JoinHandle<FrameBuffer>,
    started: Instant,
    bands: usize,
}

/// Drives render passes over a double-buffered frame.
pub struct FrameScheduler {
    config: RenderConfig,
    pool: Arc<rayon::ThreadPool>,

    width: u32,
    height: u32,

    /// Last completed frame
    front: FrameBuffer,
    /// Buffer reused by the next pass; `None` while a pass owns it
    back: Option<FrameBuffer>,

    completed_rows: Arc<AtomicUsize>,
    pass: Option<Pass>,
    needs_redraw: bool,
}

impl FrameScheduler {
    /// Create a scheduler for a `view_width × view_height` display.
    ///
    /// Buffers are allocated at the supersampled resolution. A redraw is
    /// pending from the start.
    pub fn new(view_width: u32, view_height: u32, config: RenderConfig) -> Result<Self, SchedulerError> {
        let threads = config.resolved_thread_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("photon-worker{i}"))
            .build()?;

        let factor = config.supersample.max(1);
        let width = view_width * factor;
        let height = view_height * factor;

        log::info!(
            "Frame scheduler: {}x{} buffer ({}x supersampling), {} threads",
            width,
            height,
            factor,
            threads
        );

        Ok(Self {
            config,
            pool: Arc::new(pool),
            width,
            height,
            front: FrameBuffer::new(width, height),
            back: Some(FrameBuffer::new(width, height)),
            completed_rows: Arc::new(AtomicUsize::new(0)),
            pass: None,
            needs_redraw: true,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Number of row bands (and workers) per pass.
    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Mark the frame stale. Never interrupts a pass in flight; the request
    /// is served by the next pass.
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn is_rendering(&self) -> bool {
        self.pass.is_some()
    }

    /// Fraction of rows finished by the pass in flight; 1.0 when idle.
    pub fn progress(&self) -> f32 {
        if self.pass.is_none() || self.height == 0 {
            return 1.0;
        }
        let done = self.completed_rows.load(Ordering::Acquire).min(self.height as usize);
        done as f32 / self.height as f32
    }

    /// The last completed frame at the supersampled resolution.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.front
    }

    /// Advance the state machine; call once per displayed frame.
    ///
    /// Finishes a completed pass, or starts a new one from a snapshot of
    /// `scene` when idle with a redraw pending. Never blocks on a pass that
    /// is still running.
    pub fn poll(&mut self, scene: &Scene) -> Result<RenderState, SchedulerError> {
        if let Some(pass) = &self.pass {
            let done = self.completed_rows.load(Ordering::Acquire) >= self.height as usize;
            if done || pass.handle.is_finished() {
                self.finish()?;
                return Ok(RenderState::Idle);
            }
            return Ok(RenderState::Rendering);
        }

        if self.needs_redraw {
            self.launch(scene)?;
            return Ok(RenderState::Rendering);
        }

        Ok(RenderState::Idle)
    }

    /// Block until the pass in flight, if any, has finished.
    pub fn wait(&mut self) -> Result<(), SchedulerError> {
        if self.pass.is_some() {
            self.finish()?;
        }
        Ok(())
    }

    /// Render `scene` to completion and return the new frame.
    pub fn render_blocking(&mut self, scene: &Scene) -> Result<&FrameBuffer, SchedulerError> {
        self.wait()?;
        self.needs_redraw = true;
        self.launch(scene)?;
        self.finish()?;
        Ok(&self.front)
    }

    fn launch(&mut self, scene: &Scene) -> Result<(), SchedulerError> {
        let (width, height) = (self.width, self.height);
        let mut buffer = self
            .back
            .take()
            .unwrap_or_else(|| FrameBuffer::new(width, height));

        let snapshot = scene.clone();
        let config = self.config.clone();
        let pool = Arc::clone(&self.pool);
        let completed_rows = Arc::clone(&self.completed_rows);
        let bands = partition_rows(height, pool.current_num_threads());
        let band_count = bands.len();

        completed_rows.store(0, Ordering::Release);
        self.needs_redraw = false;

        log::debug!(
            "Dispatching {} bands over {} objects",
            band_count,
            snapshot.object_count()
        );

        let handle = thread::Builder::new()
            .name("photon-master".to_string())
            .spawn(move || {
                let tracer = Tracer::new(&snapshot, &config);
                let slices = buffer.split_bands(&bands);

                pool.scope(|s| {
                    for (band, pixels) in bands.iter().zip(slices) {
                        let tracer = &tracer;
                        let completed_rows = &completed_rows;
                        s.spawn(move |_| {
                            render_band(tracer, band, pixels, width, height, completed_rows)
                        });
                    }
                });

                buffer
            });

        let handle = match handle {
            Ok(handle) => handle,
            Err(err) => {
                // The buffer went down with the closure
                self.back = Some(FrameBuffer::new(width, height));
                self.needs_redraw = true;
                return Err(err.into());
            }
        };

        self.pass = Some(Pass {
            handle,
            started: Instant::now(),
            bands: band_count,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SchedulerError> {
        let Some(pass) = self.pass.take() else {
            return Ok(());
        };

        match pass.handle.join() {
            Ok(buffer) => {
                let previous = std::mem::replace(&mut self.front, buffer);
                self.back = Some(previous);
                log::info!(
                    "Frame rendered in {:.2?} ({} bands)",
                    pass.started.elapsed(),
                    pass.bands
                );
                Ok(())
            }
            Err(_) => {
                self.back = Some(FrameBuffer::new(self.width, self.height));
                log::error!("Render pass panicked; frame discarded");
                Err(SchedulerError::WorkerPanicked)
            }
        }
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        if let Some(pass) = self.pass.take() {
            let _ = pass.handle.join();
        }
    }
}

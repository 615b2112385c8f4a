//! Photon Renderer - Recursive ray tracing on the CPU.
//!
//! A Whitted-style ray tracer with shadows, reflection and refraction,
//! plus a frame scheduler that renders row bands in parallel while the
//! caller keeps polling.

mod band;
mod framebuffer;
mod renderer;
mod scheduler;

pub use band::{partition_rows, render_band, RowBand};
pub use framebuffer::FrameBuffer;
pub use renderer::{refract, trace_ray, Refraction, RenderConfig, Tracer};
pub use scheduler::{FrameScheduler, RenderState, SchedulerError};

/// Re-export the scene model and math types used in the public API
pub use photon_core::Scene;
pub use photon_math::{Color, DVec3};

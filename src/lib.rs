//! Fishtank: head-tracked spatial tracking and projection toolkit
//!
//! Building blocks for a fish-tank-VR style simulation: a fixed physical
//! display rendered correctly for a moving tracked eye, and a guided path
//! the user traces with a tracked hand.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **render** - Primitive draw-call seam and style palette
//! 2. **hand** - Hand tracker seam (optional grab position per tick)
//! 3. **display** - Off-axis view-projection for a fixed planar display
//! 4. **challenge** - Path-tracing state machine with progress export
//! 5. **cloud** - Latest-snapshot point cloud with depth cull and CSV export
//!
//! The rendering backend, window layer, and tracker drivers live in the host
//! application; this crate only consumes them through the `render` and `hand`
//! traits. One external loop drives everything: poll the tracker, call
//! [`Challenge::update`], then issue draw calls with the matrix from
//! [`Display::projection_to_eye`].

pub mod challenge;
pub mod cloud;
pub mod display;
pub mod hand;
pub mod render;

// Re-export commonly used types
pub use challenge::{Challenge, ChallengeConfig, Segment, SegmentRecord};
pub use cloud::PointCloud;
pub use display::{Display, DisplayError};
pub use hand::{Hand, ScriptedHand};
pub use render::{DrawCall, RecordingRenderer, Renderer, Style};

// Re-export glam for convenience
pub use glam;

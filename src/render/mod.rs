//! Primitive draw-call seam
//!
//! The rendering backend lives in the host application; the simulation only
//! issues a narrow set of primitive draw calls through the [`Renderer`]
//! trait, tagged with a [`Style`] from a small fixed palette. Implementations
//! are assumed synchronous, with no side effect beyond recording or
//! submitting draw commands.

use glam::Vec3;

/// Appearance selector for primitive draw calls.
///
/// A backend maps each style to a color/material from its palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Frame geometry and not-yet-eligible path pieces.
    Neutral,
    /// Traced path pieces and progress markers.
    Completed,
    /// The segment currently awaiting the hand.
    Active,
}

impl Style {
    /// Palette slot this style selects.
    pub fn palette_index(self) -> u32 {
        match self {
            Style::Neutral => 0,
            Style::Completed => 2,
            Style::Active => 4,
        }
    }
}

/// Primitive drawing operations issued by the simulation.
pub trait Renderer {
    /// Draw a solid tube between two points.
    fn draw_line(&mut self, start: Vec3, end: Vec3, radius: f32, style: Style);

    /// Draw a spherical marker.
    fn draw_point(&mut self, position: Vec3, radius: f32, style: Style);

    /// Draw an axis-aligned cuboid centred on `centre`.
    fn draw_cuboid(&mut self, centre: Vec3, width: f32, length: f32, depth: f32, style: Style);
}

/// One draw call captured by a [`RecordingRenderer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Line {
        start: Vec3,
        end: Vec3,
        radius: f32,
        style: Style,
    },
    Point {
        position: Vec3,
        radius: f32,
        style: Style,
    },
    Cuboid {
        centre: Vec3,
        width: f32,
        length: f32,
        depth: f32,
        style: Style,
    },
}

impl DrawCall {
    /// Style the call was issued with.
    pub fn style(&self) -> Style {
        match *self {
            DrawCall::Line { style, .. }
            | DrawCall::Point { style, .. }
            | DrawCall::Cuboid { style, .. } => style,
        }
    }
}

/// Renderer that records every draw call instead of drawing.
///
/// Used by headless hosts and tests to observe what a frame would draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Calls in issue order.
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all recorded calls, e.g. between frames.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Number of recorded point draws.
    pub fn point_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Point { .. }))
            .count()
    }

    /// Number of recorded line draws.
    pub fn line_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn draw_line(&mut self, start: Vec3, end: Vec3, radius: f32, style: Style) {
        self.calls.push(DrawCall::Line {
            start,
            end,
            radius,
            style,
        });
    }

    fn draw_point(&mut self, position: Vec3, radius: f32, style: Style) {
        self.calls.push(DrawCall::Point {
            position,
            radius,
            style,
        });
    }

    fn draw_cuboid(&mut self, centre: Vec3, width: f32, length: f32, depth: f32, style: Style) {
        self.calls.push(DrawCall::Cuboid {
            centre,
            width,
            length,
            depth,
            style,
        });
    }
}

//! Path-tracing challenge state machine
//!
//! A challenge presents an ordered sequence of path segments the user traces
//! with a tracked hand. A segment completes when the grab position comes
//! within its capture radius of the segment end, and only strictly in
//! sequence: a later segment can never complete while an earlier one is
//! incomplete, however close the hand is. Completion timestamps are recorded
//! for later scoring.
//!
//! The host loop drives the machine once per frame: poll the tracker, call
//! [`Challenge::update`], then [`Challenge::draw`]. There is no failure
//! state; a challenge can only be completed, at an unbounded pace.

pub mod directions;
pub mod segment;

pub use directions::{challenge_file, load_directions, parse_directions};
pub use segment::Segment;

use crate::hand::Hand;
use crate::render::{Renderer, Style};
use anyhow::Result;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Thickness of the frame base plate.
const PLATE_DEPTH: f32 = 0.1;
/// Tube radius of the frame posts and rim.
const FRAME_LINE_RADIUS: f32 = 0.05;

/// Configuration for a challenge session.
#[derive(Debug, Clone)]
pub struct ChallengeConfig {
    /// World-space anchor for the path and its enclosing frame.
    /// Default: origin.
    pub centre: Vec3,
    /// Offset from `centre` to the first path point. Default: (-3, -8, 2).
    pub start_offset: Vec3,
    /// Tube radius of every segment; capture tolerance is three times this.
    /// Default: 0.15.
    pub tube_radius: f32,
    /// Frame plate extent along x; also the corner-post height. Default: 10.
    pub frame_width: f32,
    /// Frame plate extent along y. Default: 20.
    pub frame_length: f32,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            centre: Vec3::ZERO,
            start_offset: Vec3::new(-3.0, -8.0, 2.0),
            tube_radius: 0.15,
            frame_width: 10.0,
            frame_length: 20.0,
        }
    }
}

/// Per-segment scoring record.
///
/// The sole externally consumed scoring artifact: one record per segment in
/// traversal order, completed or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentRecord {
    /// Position of the segment in the path.
    pub index: usize,
    /// Milliseconds since the Unix epoch; zero if never completed.
    pub completed_time: u64,
}

/// Path-tracing state machine.
///
/// Owns its segments by value. The hand and renderer collaborators are not
/// stored; they are borrowed per call, so the host keeps ownership and the
/// borrow checker enforces that they outlive each tick.
pub struct Challenge {
    config: ChallengeConfig,
    segments: Vec<Segment>,
    completed_cnt: usize,
    grabbing: bool,
    grab_pos: Vec3,
    finished: bool,
    start_time: u64,
}

impl Challenge {
    /// Build a challenge from a direction file.
    ///
    /// A missing or unreadable file is fatal; malformed lines inside it are
    /// skipped with a warning by the loader.
    pub fn from_file<P: AsRef<Path>>(path: P, config: ChallengeConfig) -> Result<Self> {
        let directions = directions::load_directions(path)?;
        Ok(Self::from_directions(&directions, config))
    }

    /// Build a challenge from an already-loaded direction list.
    ///
    /// Starting from `centre + start_offset`, each direction vector extends
    /// the path by one segment.
    pub fn from_directions(directions: &[Vec3], config: ChallengeConfig) -> Self {
        let mut segments = Vec::with_capacity(directions.len());
        let mut point = config.centre + config.start_offset;

        for direction in directions {
            let next = point + *direction;
            segments.push(Segment::new(point, next, config.tube_radius));
            point = next;
        }

        Self {
            config,
            segments,
            completed_cnt: 0,
            grabbing: false,
            grab_pos: Vec3::ZERO,
            finished: false,
            start_time: epoch_millis(),
        }
    }

    /// Advance the state machine by one simulation tick.
    ///
    /// An ungrabbed hand never completes segments. While grabbing, only the
    /// first incomplete segment is eligible, though one grab sample may
    /// finish several consecutive segments whose end points it covers.
    pub fn update(&mut self, hand: &dyn Hand) {
        if self.completed_cnt == self.segments.len() {
            self.finished = true;
            return;
        }

        let Some(grab_pos) = hand.grab_position() else {
            self.grabbing = false;
            return;
        };
        self.grabbing = true;
        self.grab_pos = grab_pos;

        // Front-of-queue scan: completed_cnt only ever moves forward, so this
        // is O(1) amortized per tick.
        let now = epoch_millis();
        while let Some(segment) = self.segments.get_mut(self.completed_cnt) {
            if !segment.completed {
                if segment.end.distance(grab_pos) >= segment.capture_radius() {
                    break;
                }
                segment.completed = true;
                segment.completed_time = now;
            }
            self.completed_cnt += 1;
        }
    }

    /// Issue draw calls for the frame, the path, and the current hint line.
    ///
    /// Purely a function of current state; never mutates it. Completed
    /// segments draw solid at full radius, the eligible segment draws
    /// highlighted at half radius (with a hint line from its start to the
    /// hand while grabbing), and locked segments draw neutral at half radius.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        self.draw_frame(renderer);

        let Some(first) = self.segments.first() else {
            return;
        };
        renderer.draw_point(first.start, first.capture_radius(), Style::Completed);

        let mut prev_completed = true;
        for segment in &self.segments {
            if segment.completed {
                renderer.draw_line(segment.start, segment.end, segment.radius, Style::Completed);
                renderer.draw_point(segment.end, segment.capture_radius(), Style::Completed);
            } else if prev_completed {
                if self.grabbing {
                    renderer.draw_line(segment.start, self.grab_pos, segment.radius, Style::Completed);
                }
                renderer.draw_point(segment.end, segment.capture_radius(), Style::Active);
                renderer.draw_line(
                    segment.start,
                    segment.end,
                    segment.radius / 2.0,
                    Style::Active,
                );
            } else {
                renderer.draw_point(segment.end, segment.capture_radius(), Style::Neutral);
                renderer.draw_line(
                    segment.start,
                    segment.end,
                    segment.radius / 2.0,
                    Style::Neutral,
                );
            }
            prev_completed = segment.completed;
        }
    }

    /// Base plate, corner posts, and top rim framing the path volume.
    fn draw_frame(&self, renderer: &mut dyn Renderer) {
        let centre = self.config.centre;
        let width = self.config.frame_width;
        let length = self.config.frame_length;

        renderer.draw_cuboid(centre, width, length, PLATE_DEPTH, Style::Neutral);

        let half_w = width / 2.0;
        let half_l = length / 2.0;
        let corners = [
            (-half_w, -half_l),
            (half_w, -half_l),
            (-half_w, half_l),
            (half_w, half_l),
        ];

        // Posts rise to the frame width above the plate.
        for (x, y) in corners {
            renderer.draw_line(
                centre + Vec3::new(x, y, 0.0),
                centre + Vec3::new(x, y, width),
                FRAME_LINE_RADIUS,
                Style::Neutral,
            );
        }

        let rim = [
            ((-half_w, -half_l), (half_w, -half_l)),
            ((-half_w, half_l), (half_w, half_l)),
            ((-half_w, -half_l), (-half_w, half_l)),
            ((half_w, -half_l), (half_w, half_l)),
        ];
        for ((x0, y0), (x1, y1)) in rim {
            renderer.draw_line(
                centre + Vec3::new(x0, y0, width),
                centre + Vec3::new(x1, y1, width),
                FRAME_LINE_RADIUS,
                Style::Neutral,
            );
        }
    }

    /// Scoring records, one per segment in traversal order.
    pub fn progress(&self) -> Vec<SegmentRecord> {
        self.segments
            .iter()
            .enumerate()
            .map(|(index, segment)| SegmentRecord {
                index,
                completed_time: segment.completed_time,
            })
            .collect()
    }

    /// Progress records serialized as a JSON array.
    pub fn progress_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.progress())
    }

    /// Whether every segment has been completed and the terminal state
    /// latched.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The path segments in traversal order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segments completed from the front of the path.
    pub fn completed_count(&self) -> usize {
        self.completed_cnt
    }

    /// Whether the hand was in a grab pose on the last tick.
    pub fn is_grabbing(&self) -> bool {
        self.grabbing
    }

    /// Session start, milliseconds since the Unix epoch.
    pub fn start_time(&self) -> u64 {
        self.start_time
    }
}

/// Wall-clock milliseconds since the Unix epoch.
///
/// Raw reads; clock adjustments are an accepted risk, not defended against.
fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

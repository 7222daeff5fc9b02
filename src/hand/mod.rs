//! Hand tracker seam
//!
//! The tracker driver lives in the host application; the simulation only
//! asks for the current grab position once per tick through the [`Hand`]
//! trait.

use glam::Vec3;
use std::cell::RefCell;
use std::collections::VecDeque;

/// A tracked hand, queried once per simulation tick.
pub trait Hand {
    /// Current grab position, present only while a grab pose is detected.
    fn grab_position(&self) -> Option<Vec3>;
}

/// Replays a fixed sequence of grab samples, one per query.
///
/// Lets a test or a headless demo script an entire interaction up front;
/// once the samples run out, the hand reports no grab.
#[derive(Debug, Default)]
pub struct ScriptedHand {
    samples: RefCell<VecDeque<Option<Vec3>>>,
}

impl ScriptedHand {
    /// Script a sequence of per-tick samples (`None` = hand not grabbing).
    pub fn new(samples: impl IntoIterator<Item = Option<Vec3>>) -> Self {
        Self {
            samples: RefCell::new(samples.into_iter().collect()),
        }
    }

    /// Script a grab that visits each point in turn, one tick apiece.
    pub fn tracing_path(points: impl IntoIterator<Item = Vec3>) -> Self {
        Self::new(points.into_iter().map(Some))
    }

    /// Samples not yet consumed.
    pub fn remaining(&self) -> usize {
        self.samples.borrow().len()
    }
}

impl Hand for ScriptedHand {
    fn grab_position(&self) -> Option<Vec3> {
        self.samples.borrow_mut().pop_front().flatten()
    }
}

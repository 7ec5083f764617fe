//! This file is part of the xilem_range_slider project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use tracing::{debug, trace};
use xilem::masonry::vello::kurbo::{Point, Rect, Vec2};

use super::thumb::{FrameGeometry, ThumbSide};

/// Bookkeeping for the pointer that owns the current drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState<P> {
    pub id: P,
    pub current: Point,
    pub previous: Point,
    /// Total movement since the press.
    pub translation: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState<P> {
    Idle,
    Tracking { pointer: PointerState<P>, side: ThumbSide },
}

/// Decides which thumb a pointer drags.
///
/// `P` identifies pointers; only the pointer that started a drag can move or
/// end it. The side of the last finished drag is kept so that a press on
/// two overlapping thumbs picks up the one the user handled before.
#[derive(Clone, Debug)]
pub struct DragMachine<P> {
    state: DragState<P>,
    last_active: ThumbSide,
}

impl<P> Default for DragMachine<P> {
    fn default() -> Self {
        Self { state: DragState::Idle, last_active: ThumbSide::Left }
    }
}

impl<P: Copy + PartialEq> DragMachine<P> {
    pub fn state(&self) -> &DragState<P> {
        &self.state
    }

    pub fn active(&self) -> Option<ThumbSide> {
        match self.state {
            DragState::Idle => None,
            DragState::Tracking { side, .. } => Some(side),
        }
    }

    pub fn last_active(&self) -> ThumbSide {
        self.last_active
    }

    /// The thumb drawn on top: the dragged one, else the last dragged one.
    pub fn front(&self) -> ThumbSide {
        self.active().unwrap_or(self.last_active)
    }

    /// Thumb under `point`; overlapping hit boxes resolve to `last_active`.
    pub fn resolve(frame: &FrameGeometry, point: Point, last_active: ThumbSide) -> Option<ThumbSide> {
        match (frame.contains(ThumbSide::Left, point), frame.contains(ThumbSide::Right, point)) {
            (true, true) => Some(last_active),
            (true, false) => Some(ThumbSide::Left),
            (false, true) => Some(ThumbSide::Right),
            (false, false) => None,
        }
    }

    /// Start tracking `id` if it lands on a thumb.
    pub fn press(&mut self, id: P, position: Point, track: Rect, frame: &FrameGeometry) -> Option<ThumbSide> {
        if !within_track(position, track) {
            trace!(x = position.x, "press outside the track");
            return None;
        }
        if matches!(self.state, DragState::Tracking { .. }) {
            trace!("press ignored, another pointer is dragging");
            return None;
        }
        let Some(side) = Self::resolve(frame, position, self.last_active) else {
            trace!(x = position.x, y = position.y, "press missed both thumbs");
            return None;
        };
        self.state = DragState::Tracking {
            pointer: PointerState { id, current: position, previous: position, translation: Vec2::ZERO },
            side,
        };
        debug!(?side, "thumb grabbed");
        Some(side)
    }

    /// Follow the tracked pointer; returns the side being dragged.
    pub fn drag(&mut self, id: P, position: Point, track: Rect) -> Option<ThumbSide> {
        if !within_track(position, track) {
            return None;
        }
        let DragState::Tracking { pointer, side } = &mut self.state else {
            return None;
        };
        if pointer.id != id {
            return None;
        }
        pointer.current = position;
        pointer.translation += pointer.current - pointer.previous;
        pointer.previous = pointer.current;
        Some(*side)
    }

    /// End the drag of `id`. Cancel is handled the same way.
    pub fn release(&mut self, id: P) -> Option<ThumbSide> {
        let DragState::Tracking { pointer, side } = self.state else {
            return None;
        };
        if pointer.id != id {
            return None;
        }
        self.state = DragState::Idle;
        self.last_active = side;
        debug!(?side, "thumb released");
        Some(side)
    }
}

fn within_track(position: Point, track: Rect) -> bool {
    position.x >= track.x0 && position.x <= track.x1
}

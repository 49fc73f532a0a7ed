//! Body state and drag interaction
//!
//! The single movable body, its drag state machine, and the events the
//! simulation reports to host-side collaborators.

use glam::Vec2;

use super::collision::EdgeHits;
use crate::tuning::Tuning;

/// Drag interaction state - free-falling or pinned to the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// Body moves under gravity and bounce rules
    Free,
    /// Body follows the pointer; kinematic integration is frozen
    Dragging {
        /// Pointer minus body origin, captured at grab time and fixed for
        /// the duration of the drag
        pointer_offset: Vec2,
        /// Pointer position at the previous drag move, used to derive an
        /// instantaneous pointer velocity
        last_pointer: Vec2,
    },
}

/// Events emitted by a tick for host-side collaborators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// The body struck the top/left/right boundary. At most one per tick,
    /// even when a corner hit fires two edges at once.
    EdgeHit(EdgeHits),
    /// The floor reflection fired. Not emitted on rest ticks.
    FloorBounce { impact_speed: f32 },
}

/// The movable rectangular body
#[derive(Debug, Clone)]
pub struct Body {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    /// Bounding box extent; only ever grows
    pub size: Vec2,
    pub drag: DragState,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            drag: DragState::Free,
        }
    }

    /// Bounding-box hit test
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x <= self.pos.x + self.size.x
            && point.y >= self.pos.y
            && point.y <= self.pos.y + self.size.y
    }

    pub fn dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Grab the body if the pointer lands on it.
    ///
    /// On a hit, records the pointer offset so the body origin doesn't snap
    /// to the cursor, and seeds the pointer history that drag velocity is
    /// derived from. A miss leaves the state untouched.
    pub fn begin_drag(&mut self, pointer: Vec2) -> bool {
        if !self.contains(pointer) {
            return false;
        }
        self.drag = DragState::Dragging {
            pointer_offset: pointer - self.pos,
            last_pointer: pointer,
        };
        true
    }

    /// Follow the pointer while dragging.
    ///
    /// Velocity accumulates from pointer displacement instead of being
    /// reset, so a flung drag carries momentum into the free-fall phase
    /// after release. Position is clamped into the canvas; velocity is not,
    /// which keeps an off-canvas fling intact for the release moment.
    pub fn drag(&mut self, pointer: Vec2, bounds: Vec2, drag_accel_factor: f32) {
        let DragState::Dragging {
            pointer_offset,
            last_pointer,
        } = &mut self.drag
        else {
            return;
        };

        let delta = pointer - *last_pointer;
        self.vel += delta * drag_accel_factor;
        *last_pointer = pointer;

        let target = pointer - *pointer_offset;
        self.pos = Vec2::new(
            target.x.min(bounds.x - self.size.x).max(0.0),
            target.y.min(bounds.y - self.size.y).max(0.0),
        );
    }

    /// Release the body unconditionally.
    ///
    /// Velocity accumulated during the drag persists and governs the very
    /// next tick - the "throw".
    pub fn end_drag(&mut self) {
        self.drag = DragState::Free;
    }

    /// Enlarge both edges by one step. No reposition or re-clamp happens
    /// until the next tick or drag move.
    pub fn grow(&mut self, step: f32) {
        self.size += Vec2::splat(step);
    }
}

/// Complete state for the ball scene
#[derive(Debug, Clone)]
pub struct SimState {
    /// Canvas-local bounds in CSS pixels
    pub bounds: Vec2,
    pub body: Body,
    /// Ticks advanced since start
    pub time_ticks: u64,
}

impl SimState {
    /// Spawn the body at top-center with zero velocity
    pub fn new(bounds: Vec2, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(Vec2::new(bounds.x / 2.0, 0.0), tuning.body_size),
            bounds,
            time_ticks: 0,
        }
    }
}

//! Cursor-following regular polygon
//!
//! The polygon scene: a regular N-gon redrawn centered on the last pointer
//! position. Pure geometry; the renderer tessellates the outline points.

use glam::Vec2;
use std::f32::consts::TAU;

/// A regular polygon pinned to the cursor
#[derive(Debug, Clone)]
pub struct PolygonFollower {
    pub sides: u32,
    pub radius: f32,
    pub center: Vec2,
}

impl PolygonFollower {
    pub fn new(sides: u32, radius: f32, center: Vec2) -> Self {
        Self {
            // A polygon needs at least a triangle
            sides: sides.max(3),
            radius,
            center,
        }
    }

    /// Recenter on the pointer
    pub fn follow(&mut self, pointer: Vec2) {
        self.center = pointer;
    }

    /// Outline points starting at angle 0, stepping `2π/sides`, with a final
    /// point closing back on the start
    pub fn points(&self) -> Vec<Vec2> {
        let step = TAU / self.sides as f32;
        (0..=self.sides)
            .map(|i| {
                let theta = step * i as f32;
                self.center + Vec2::new(self.radius * theta.cos(), self.radius * theta.sin())
            })
            .collect()
    }
}

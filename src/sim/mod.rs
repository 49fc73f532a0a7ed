//! Deterministic simulation module
//!
//! All interaction logic lives here. This module must be pure and deterministic:
//! - One advance per animation tick
//! - Stable, single-body state
//! - No rendering or platform dependencies

pub mod collision;
pub mod polygon;
pub mod state;
pub mod tick;

pub use collision::{EdgeHits, collide_floor, collide_walls};
pub use polygon::PolygonFollower;
pub use state::{Body, DragState, SimEvent, SimState};
pub use tick::{TickInput, tick};

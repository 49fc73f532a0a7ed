//! Data-driven physics parameters
//!
//! Defaults come from `consts`; a LocalStorage override lets the feel be
//! tweaked without a rebuild. Persisted separately from user settings.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts;

/// Physics parameters for the ball scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Acceleration applied every tick
    pub gravity: Vec2,
    /// Energy retained on each boundary reflection (0-1)
    pub bounce_factor: f32,
    /// Converts pointer displacement per tick into added velocity
    pub drag_accel_factor: f32,
    /// Side length added per grow signal
    pub grow_step: f32,
    /// Initial body extent
    pub body_size: Vec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, consts::GRAVITY_Y),
            bounce_factor: consts::BOUNCE_FACTOR,
            drag_accel_factor: consts::DRAG_ACCEL_FACTOR,
            grow_step: consts::GROW_STEP,
            body_size: Vec2::splat(consts::BODY_SIZE),
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bounce_lab_tuning";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(tuning) = serde_json::from_str(&json) {
                    log::info!("Loaded tuning overrides from LocalStorage");
                    return tuning;
                }
            }
        }

        Self::default()
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Tuning saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

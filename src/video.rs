//! YouTube player collaborator
//!
//! The simulation only emits edge-hit events; this module owns the
//! play/pause reaction. The player is reached through the YouTube IFrame
//! API, which only exists in a browser context, so everything real is
//! wasm-gated with native no-op stubs.

/// IFrame Player API states we react to
#[cfg(target_arch = "wasm32")]
mod player_state {
    pub const ENDED: i32 = 0;
    pub const PAUSED: i32 = 2;
    /// Returned by the binding before the player has booted
    pub const UNAVAILABLE: i32 = -2;
}

// JS bindings for the IFrame Player API
#[cfg(target_arch = "wasm32")]
mod bindings {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(inline_js = "
        export function yt_boot(video_id) {
            if (document.getElementById('yt-iframe-api')) return;
            window.onYouTubeIframeAPIReady = () => {
                window.__bounce_lab_player = new window.YT.Player('video-player', {
                    videoId: video_id,
                });
            };
            const script = document.createElement('script');
            script.id = 'yt-iframe-api';
            script.src = 'https://www.youtube.com/iframe_api';
            document.body.appendChild(script);
        }

        export function yt_player_state() {
            const p = window.__bounce_lab_player;
            return (p && p.getPlayerState) ? p.getPlayerState() : -2;
        }

        export function yt_play() {
            const p = window.__bounce_lab_player;
            if (p && p.playVideo) p.playVideo();
        }

        export function yt_pause() {
            const p = window.__bounce_lab_player;
            if (p && p.pauseVideo) p.pauseVideo();
        }
    ")]
    extern "C" {
        pub fn yt_boot(video_id: &str);
        pub fn yt_player_state() -> i32;
        pub fn yt_play();
        pub fn yt_pause();
    }
}

/// Play/pause toggle reacting to boundary hits
pub struct VideoToggle {
    #[allow(dead_code)]
    enabled: bool,
}

impl VideoToggle {
    #[cfg(target_arch = "wasm32")]
    pub fn new(video_id: &str, enabled: bool) -> Self {
        if enabled {
            bindings::yt_boot(video_id);
            log::info!("Video player booting (id {video_id})");
        }
        Self { enabled }
    }

    /// Edge hit reaction: a paused or ended player starts playing,
    /// anything else pauses.
    #[cfg(target_arch = "wasm32")]
    pub fn on_edge_hit(&self) {
        if !self.enabled {
            return;
        }
        match bindings::yt_player_state() {
            player_state::UNAVAILABLE => {}
            player_state::PAUSED | player_state::ENDED => bindings::yt_play(),
            _ => bindings::yt_pause(),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(_video_id: &str, enabled: bool) -> Self {
        Self { enabled }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn on_edge_hit(&self) {
        // No-op for native
    }
}

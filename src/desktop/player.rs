//! Simulated media player: playlist selection and a ticking progress bar.
//! No audio is produced.

use log::debug;

use crate::error::DesktopError;

/// Progress units per second while playing
const PROGRESS_PER_S: f32 = 1.0;

/// Progress wraps back to 0 after this
const PROGRESS_MAX: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playlist {
    pub id: &'static str,
    pub name: &'static str,
    pub cover_url: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    pub title: &'static str,
    pub artist: &'static str,
    pub duration: &'static str,
}

/// Built-in playlists, each with one mock track
pub const PLAYLISTS: [(Playlist, Track); 3] = [
    (
        Playlist {
            id: "p1",
            name: "Lofi Beats",
            cover_url: "https://picsum.photos/id/10/50",
        },
        Track {
            title: "Chill Study",
            artist: "Lofi Girl",
            duration: "2:30",
        },
    ),
    (
        Playlist {
            id: "p2",
            name: "Retro Wave",
            cover_url: "https://picsum.photos/id/20/50",
        },
        Track {
            title: "Neon Sunset",
            artist: "Synthwave Boy",
            duration: "3:45",
        },
    ),
    (
        Playlist {
            id: "p3",
            name: "Coding Focus",
            cover_url: "https://picsum.photos/id/30/50",
        },
        Track {
            title: "Deep Focus",
            artist: "Brain.fm",
            duration: "5:00",
        },
    ),
];

#[derive(Debug, Clone, Default)]
pub struct MediaPlayer {
    selected: Option<usize>,
    is_playing: bool,
    progress: f32,
}

impl MediaPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Position on the 0–100 progress bar
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn selected_playlist(&self) -> Option<&'static Playlist> {
        self.selected.map(|i| &PLAYLISTS[i].0)
    }

    pub fn current_track(&self) -> Option<&'static Track> {
        self.selected.map(|i| &PLAYLISTS[i].1)
    }

    /// Marquee text: "artist - title", or a prompt before selection
    pub fn display_line(&self) -> String {
        match self.current_track() {
            Some(track) => format!("{} - {}", track.artist, track.title),
            None => "Select a Playlist...".to_string(),
        }
    }

    /// Load a playlist's track and start playing from the top
    pub fn select_playlist(&mut self, id: &str) -> Result<(), DesktopError> {
        let index = PLAYLISTS
            .iter()
            .position(|(playlist, _)| playlist.id == id)
            .ok_or_else(|| DesktopError::PlaylistNotFound(id.to_string()))?;
        debug!("playlist {} selected", id);
        self.selected = Some(index);
        self.is_playing = true;
        self.progress = 0.0;
        Ok(())
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn rewind(&mut self) {
        self.progress = 0.0;
    }

    /// Advance the progress bar while playing
    pub fn tick(&mut self, dt: f32) {
        if !self.is_playing || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.progress += dt * PROGRESS_PER_S;
        if self.progress >= PROGRESS_MAX {
            self.progress = 0.0;
        }
    }
}

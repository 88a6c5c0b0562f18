//! Retro desktop overlay state shown in the digital phase.
//!
//! Only state lives here; drawing the windows, rendering markdown and the
//! drag interaction belong to the host UI.

mod login;
mod player;
mod windows;

pub use login::{LoginGate, LoginOutcome, ERROR_DISPLAY_S, MAX_PASSCODE_LEN};
pub use player::{MediaPlayer, Playlist, Track, PLAYLISTS};
pub use windows::{
    photo_layout, photo_window_id, DesktopWindow, WindowRegistry, MENU_BAR_HEIGHT_PX, PHOTO_FILES,
};

use log::debug;

use crate::error::DesktopError;

/// Step for keyboard window moves (pixels)
pub const NUDGE_PX: f32 = 10.0;

/// Something the visitor asked the unlocked desktop to do
#[derive(Debug, Clone, PartialEq)]
pub enum DesktopCommand {
    Focus(String),
    CloseTop,
    /// Move the front-most window by (dx, dy) pixels
    NudgeTop { dx: f32, dy: f32 },
    SelectPlaylist(String),
    TogglePlay,
    Rewind,
}

impl DesktopCommand {
    /// Keyboard shortcut for a typed character
    ///
    /// `a`/`p`/`w` focus the about, projects and writings windows, `x`
    /// closes the front window, `1`-`3` pick a playlist, `m` plays or
    /// pauses, `r` rewinds.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(Self::Focus("about".to_string())),
            'p' => Some(Self::Focus("projects".to_string())),
            'w' => Some(Self::Focus("writings".to_string())),
            'x' => Some(Self::CloseTop),
            '1'..='3' => Some(Self::SelectPlaylist(format!("p{}", c))),
            'm' => Some(Self::TogglePlay),
            'r' => Some(Self::Rewind),
            _ => None,
        }
    }
}

/// Everything the desktop overlay owns, ticked alongside the scene
#[derive(Debug, Clone, Default)]
pub struct Desktop {
    pub windows: WindowRegistry,
    pub login: LoginGate,
    pub player: MediaPlayer,
}

impl Desktop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out the photo windows for a `width` x `height` viewport and
    /// open the about window on top
    pub fn on_unlocked(&mut self, width: f32, height: f32) -> Result<(), DesktopError> {
        self.windows.extend(photo_layout(width, height, &PHOTO_FILES));
        self.windows.open("about")
    }

    pub fn apply(&mut self, command: DesktopCommand) -> Result<(), DesktopError> {
        debug!("desktop command {:?}", command);
        match command {
            DesktopCommand::Focus(id) => self.windows.focus(&id),
            DesktopCommand::CloseTop => match self.windows.top_open().map(str::to_string) {
                Some(id) => self.windows.close(&id),
                None => Ok(()),
            },
            DesktopCommand::NudgeTop { dx, dy } => {
                let Some(top) = self.windows.top_open().map(str::to_string) else {
                    return Ok(());
                };
                let (x, y) = self
                    .windows
                    .get(&top)
                    .map(|w| w.position)
                    .ok_or_else(|| DesktopError::WindowNotFound(top.clone()))?;
                self.windows.move_to(&top, (x + dx, y + dy))
            }
            DesktopCommand::SelectPlaylist(id) => self.player.select_playlist(&id),
            DesktopCommand::TogglePlay => {
                self.player.toggle_play();
                Ok(())
            }
            DesktopCommand::Rewind => {
                self.player.rewind();
                Ok(())
            }
        }
    }

    /// Advance timers (login error indicator, player progress)
    pub fn tick(&mut self, dt: f32) {
        self.login.tick(dt);
        self.player.tick(dt);
    }
}

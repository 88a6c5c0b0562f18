//! Desktop window registry: open/close/focus and stacking order.

use serde::{Deserialize, Serialize};

use crate::error::DesktopError;

/// Height of the top menu bar (pixels); windows never start under it
pub const MENU_BAR_HEIGHT_PX: f32 = 24.0;

/// Photo window size including chrome (pixels)
pub const PHOTO_WINDOW_SIZE_PX: (f32, f32) = (1000.0, 800.0);

/// Overlap between neighbouring photo windows (pixels)
pub const PHOTO_OVERLAP_PX: f32 = 250.0;

/// One desktop window; `content` is markdown rendered by the overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopWindow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub is_open: bool,
    pub is_minimized: bool,
    /// Top-left corner (pixels)
    pub position: (f32, f32),
    pub z_index: u32,
}

impl DesktopWindow {
    pub fn document(id: &str, title: &str, content: &str, position: (f32, f32)) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            image_url: None,
            is_open: false,
            is_minimized: false,
            position,
            z_index: 0,
        }
    }
}

/// All windows known to the desktop
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRegistry {
    windows: Vec<DesktopWindow>,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new(vec![
            DesktopWindow::document(
                "about",
                "About Me.txt",
                "# About Me\n\nHi, I am a Senior Creative Developer...",
                (100.0, 50.0),
            ),
            DesktopWindow::document(
                "projects",
                "My Projects.folder",
                "# Projects\n\n- **Scrollytelling Site**: You are here!\n- **Three.js Game**: Coming soon.",
                (150.0, 100.0),
            ),
            DesktopWindow::document(
                "writings",
                "Writings.doc",
                "# Thoughts\n\nThinking about the intersection of retro UI and 3D web...",
                (200.0, 150.0),
            ),
        ])
    }
}

impl WindowRegistry {
    pub fn new(windows: Vec<DesktopWindow>) -> Self {
        Self { windows }
    }

    pub fn get(&self, id: &str) -> Option<&DesktopWindow> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn windows(&self) -> &[DesktopWindow] {
        &self.windows
    }

    /// Add windows (e.g. the photo layout), replacing any with the same id
    pub fn extend(&mut self, windows: impl IntoIterator<Item = DesktopWindow>) {
        for window in windows {
            match self.windows.iter_mut().find(|w| w.id == window.id) {
                Some(existing) => *existing = window,
                None => self.windows.push(window),
            }
        }
    }

    /// Open, restore and raise
    pub fn open(&mut self, id: &str) -> Result<(), DesktopError> {
        let top = self.top_z();
        let window = self.find_mut(id)?;
        window.is_open = true;
        window.is_minimized = false;
        window.z_index = top + 1;
        Ok(())
    }

    pub fn close(&mut self, id: &str) -> Result<(), DesktopError> {
        self.find_mut(id)?.is_open = false;
        Ok(())
    }

    /// Bring to front, opening it if needed
    ///
    /// A window already alone on top keeps its z; one sharing the top z
    /// with another window is raised above it.
    pub fn focus(&mut self, id: &str) -> Result<(), DesktopError> {
        let top = self.top_z();
        let at_top = self.windows.iter().filter(|w| w.z_index == top).count();
        let window = self.find_mut(id)?;
        window.is_open = true;
        if window.z_index != top || at_top > 1 {
            window.z_index = top + 1;
        }
        Ok(())
    }

    /// Move a window (drag); the overlay clamps to its own bounds
    pub fn move_to(&mut self, id: &str, position: (f32, f32)) -> Result<(), DesktopError> {
        self.find_mut(id)?.position = (position.0, position.1.max(MENU_BAR_HEIGHT_PX));
        Ok(())
    }

    /// Open windows, bottom-most first
    pub fn open_windows(&self) -> Vec<&DesktopWindow> {
        let mut open: Vec<_> = self.windows.iter().filter(|w| w.is_open).collect();
        open.sort_by_key(|w| w.z_index);
        open
    }

    /// Id of the front-most open window
    pub fn top_open(&self) -> Option<&str> {
        self.open_windows().last().map(|w| w.id.as_str())
    }

    fn top_z(&self) -> u32 {
        self.windows.iter().map(|w| w.z_index).max().unwrap_or(0)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut DesktopWindow, DesktopError> {
        self.windows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| DesktopError::WindowNotFound(id.to_string()))
    }
}

/// Photos shown after unlocking, in layout order (first one underneath)
pub const PHOTO_FILES: [&str; 5] = [
    "you_truly_make_me_the_happiest_man_ever.jpeg",
    "my_favourite_photo_with_you.JPG",
    "our_nyc_trip_together.JPG",
    "my_shock_after_paying_for_our_ meals.JPG",
    "when_i_accidentally_ordered_you_avocado.jpg",
];

/// Window id for a photo file: lower-cased, non-alphanumerics replaced by `-`
pub fn photo_window_id(filename: &str) -> String {
    let slug: String = filename
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("photo-{}", slug)
}

/// Overlapping 2×2 grid of photo windows, with the first photo hidden
/// centred underneath
///
/// `files[0]` goes underneath (z 0), `files[1..=4]` fill top-left,
/// top-right, bottom-left, bottom-right with rising z. Extra files are
/// ignored. The grid is shifted 10 % right and 20 % down from centre.
pub fn photo_layout(screen_width: f32, screen_height: f32, files: &[&str]) -> Vec<DesktopWindow> {
    let (width, height) = PHOTO_WINDOW_SIZE_PX;
    let overlap = PHOTO_OVERLAP_PX;
    let start_x = screen_width / 2.0 - width - overlap / 2.0 + screen_width * 0.1;
    let start_y = screen_height / 2.0 - height - overlap / 2.0 + screen_height * 0.2;
    let step_x = width - overlap;
    let step_y = height - overlap;

    let slots = [
        (start_x + step_x / 2.0, start_y + step_y / 2.0),
        (start_x, start_y),
        (start_x + step_x, start_y),
        (start_x, start_y + step_y),
        (start_x + step_x, start_y + step_y),
    ];

    files
        .iter()
        .zip(slots)
        .enumerate()
        .map(|(z, (file, (x, y)))| DesktopWindow {
            id: photo_window_id(file),
            title: file.to_string(),
            content: String::new(),
            image_url: Some(format!("/photos/{}", file)),
            is_open: true,
            is_minimized: false,
            position: (x.max(0.0), y.max(MENU_BAR_HEIGHT_PX)),
            z_index: z as u32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_closed() {
        let registry = WindowRegistry::default();
        assert_eq!(registry.windows().len(), 3);
        assert!(registry.open_windows().is_empty());
    }

    #[test]
    fn test_open_raises_to_top() {
        let mut registry = WindowRegistry::default();
        registry.open("about").unwrap();
        registry.open("projects").unwrap();
        registry.open("about").unwrap();

        let order: Vec<&str> = registry.open_windows().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(order, vec!["projects", "about"]);
    }

    #[test]
    fn test_open_restores_minimized() {
        let mut registry = WindowRegistry::default();
        registry.extend([DesktopWindow {
            is_minimized: true,
            ..DesktopWindow::document("notes", "Notes", "", (0.0, 30.0))
        }]);
        registry.open("notes").unwrap();
        let notes = registry.get("notes").unwrap();
        assert!(notes.is_open);
        assert!(!notes.is_minimized);
    }

    #[test]
    fn test_close_and_focus() {
        let mut registry = WindowRegistry::default();
        registry.open("writings").unwrap();
        registry.close("writings").unwrap();
        assert!(!registry.get("writings").unwrap().is_open);

        registry.focus("writings").unwrap();
        assert!(registry.get("writings").unwrap().is_open);
    }

    #[test]
    fn test_focus_breaks_tie_at_top() {
        let mut registry = WindowRegistry::default();
        registry.open("about").unwrap();
        registry.open("projects").unwrap();
        // Two windows sharing the top z, e.g. from a restored layout
        registry.extend([DesktopWindow {
            is_open: true,
            z_index: 2,
            ..DesktopWindow::document("notes", "Notes", "", (0.0, 30.0))
        }]);
        assert_eq!(registry.get("projects").unwrap().z_index, 2);

        registry.focus("projects").unwrap();
        assert_eq!(registry.get("projects").unwrap().z_index, 3);
        assert_eq!(registry.top_open(), Some("projects"));

        // Unique top stays put
        registry.focus("projects").unwrap();
        assert_eq!(registry.get("projects").unwrap().z_index, 3);
    }

    #[test]
    fn test_focus_closed_window_at_zero() {
        let mut registry = WindowRegistry::default();
        registry.focus("writings").unwrap();
        assert_eq!(registry.get("writings").unwrap().z_index, 1);
        assert_eq!(registry.top_open(), Some("writings"));
    }

    #[test]
    fn test_unknown_window() {
        let mut registry = WindowRegistry::default();
        assert_eq!(
            registry.open("trash"),
            Err(DesktopError::WindowNotFound("trash".to_string()))
        );
        assert!(registry.close("trash").is_err());
        assert!(registry.focus("trash").is_err());
    }

    #[test]
    fn test_move_respects_menu_bar() {
        let mut registry = WindowRegistry::default();
        registry.move_to("about", (40.0, 5.0)).unwrap();
        assert_eq!(registry.get("about").unwrap().position, (40.0, MENU_BAR_HEIGHT_PX));
    }

    #[test]
    fn test_photo_window_id() {
        assert_eq!(
            photo_window_id("my_shock_after_paying_for_our_ meals.JPG"),
            "photo-my-shock-after-paying-for-our--meals-jpg"
        );
    }

    #[test]
    fn test_photo_layout_grid() {
        let files = ["hidden.jpeg", "tl.JPG", "tr.JPG", "bl.JPG", "br.jpg"];
        let windows = photo_layout(1920.0, 1080.0, &files);
        assert_eq!(windows.len(), 5);

        // start = (960 - 1000 - 125 + 192, 540 - 800 - 125 + 216) = (27, -169)
        assert_eq!(windows[1].position, (27.0, MENU_BAR_HEIGHT_PX));
        assert_eq!(windows[2].position, (777.0, MENU_BAR_HEIGHT_PX));
        assert_eq!(windows[3].position, (27.0, 381.0));
        assert_eq!(windows[4].position, (777.0, 381.0));
        assert_eq!(windows[0].position, (402.0, 106.0));

        let z: Vec<u32> = windows.iter().map(|w| w.z_index).collect();
        assert_eq!(z, vec![0, 1, 2, 3, 4]);
        assert_eq!(windows[1].image_url.as_deref(), Some("/photos/tl.JPG"));
        assert!(windows.iter().all(|w| w.is_open));
    }

    #[test]
    fn test_photo_layout_clamps_small_screen() {
        let windows = photo_layout(800.0, 600.0, &["a.jpg", "b.jpg"]);
        assert_eq!(windows.len(), 2);
        assert!(windows.iter().all(|w| w.position.0 >= 0.0));
        assert!(windows.iter().all(|w| w.position.1 >= MENU_BAR_HEIGHT_PX));
    }
}

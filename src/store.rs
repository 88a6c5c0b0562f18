//! Presentation state shared by the frame loop, input handlers and overlay.
//!
//! One `PhaseStore` per scene instance, passed by reference (or shared
//! through an `Rc<RefCell<_>>` handle) rather than held in a global. Every
//! setter is synchronous: the new value is visible on the next read, and
//! subscribers hear about it before the setter returns.

use std::fmt;

use log::debug;

use crate::phase::Phase;

/// Independent booleans set by discrete visitor actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiFlags {
    /// Visitor has passed the intro (one-way)
    pub has_entered: bool,

    /// Deep-zoom regime toggled by the spacebar
    pub has_zoomed: bool,

    /// Camera pinned in front of the monitor (tab)
    pub is_screen_focused: bool,

    /// Viewport is under the mobile breakpoint
    pub is_mobile: bool,

    /// Login gate passed
    pub is_unlocked: bool,
}

/// A single field change, as delivered to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Phase(Phase),
    Entered(bool),
    Zoomed(bool),
    ScreenFocused(bool),
    Mobile(bool),
    Unlocked(bool),
}

/// Handle returned by [`PhaseStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Which UI layers the host should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayLayers {
    /// Retro desktop overlay
    pub desktop_visible: bool,

    /// 3D room wrapper
    pub scene_visible: bool,

    /// "Scroll to enter" prompt over the room
    pub scroll_hint_visible: bool,

    /// Login screen over the desktop
    pub login_visible: bool,
}

type Listener = Box<dyn FnMut(&StoreChange)>;

/// Phase flag plus UI flags, with change notification
///
/// Subscribers are called while the store is being mutated and must not
/// write back into it.
#[derive(Default)]
pub struct PhaseStore {
    phase: Phase,
    flags: UiFlags,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl fmt::Debug for PhaseStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseStore")
            .field("phase", &self.phase)
            .field("flags", &self.flags)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PhaseStore {
    /// Fresh session: Analog, nothing entered or toggled
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn flags(&self) -> UiFlags {
        self.flags
    }

    pub fn layers(&self) -> OverlayLayers {
        let desktop_visible = self.phase == Phase::Digital || self.flags.is_mobile;
        OverlayLayers {
            desktop_visible,
            scene_visible: !self.flags.is_mobile,
            scroll_hint_visible: !self.flags.is_mobile && self.phase == Phase::Analog,
            login_visible: desktop_visible && !self.flags.is_unlocked,
        }
    }

    pub fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.phase = phase;
            self.notify(StoreChange::Phase(phase));
        }
    }

    pub fn set_entered(&mut self, value: bool) {
        if self.flags.has_entered != value {
            self.flags.has_entered = value;
            self.notify(StoreChange::Entered(value));
        }
    }

    pub fn set_zoomed(&mut self, value: bool) {
        if self.flags.has_zoomed != value {
            self.flags.has_zoomed = value;
            self.notify(StoreChange::Zoomed(value));
        }
    }

    pub fn set_screen_focused(&mut self, value: bool) {
        if self.flags.is_screen_focused != value {
            self.flags.is_screen_focused = value;
            self.notify(StoreChange::ScreenFocused(value));
        }
    }

    pub fn set_mobile(&mut self, value: bool) {
        if self.flags.is_mobile != value {
            self.flags.is_mobile = value;
            self.notify(StoreChange::Mobile(value));
        }
    }

    pub fn set_unlocked(&mut self, value: bool) {
        if self.flags.is_unlocked != value {
            self.flags.is_unlocked = value;
            self.notify(StoreChange::Unlocked(value));
        }
    }

    /// Register a callback for every subsequent field change
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a subscriber; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, change: StoreChange) {
        debug!("store change: {:?}", change);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
    }
}

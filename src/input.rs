//! Device input to choreography state: wheel accumulation and key toggles.
//!
//! Handlers only touch plain scalars and store flags, never the camera.
//! Outside its gating condition every handler is a no-op that reports
//! [`Disposition::Ignored`].

use log::debug;

use crate::phase::Phase;
use crate::store::PhaseStore;

/// Whether an event was consumed, and whether the host should suppress its
/// platform default (page scroll, focus navigation)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Ignored,
    Handled { prevent_default: bool },
}

impl Disposition {
    pub fn is_handled(self) -> bool {
        matches!(self, Self::Handled { .. })
    }

    pub fn prevent_default(self) -> bool {
        matches!(
            self,
            Self::Handled {
                prevent_default: true
            }
        )
    }

    /// Combine the outcomes of several listeners for one event
    pub fn merge(self, other: Disposition) -> Disposition {
        match (self, other) {
            (Self::Ignored, other) => other,
            (this, Self::Ignored) => this,
            (Self::Handled { prevent_default: a }, Self::Handled { prevent_default: b }) => {
                Self::Handled {
                    prevent_default: a || b,
                }
            }
        }
    }
}

/// Owns the scroll accumulator and applies the gated input handlers
#[derive(Debug, Clone)]
pub struct InputCollector {
    scroll_progress: f32,
    scroll_speed: f32,
}

impl InputCollector {
    /// `scroll_speed` is progress per unit of wheel delta
    pub fn new(scroll_speed: f32) -> Self {
        Self {
            scroll_progress: 0.0,
            scroll_speed,
        }
    }

    /// Accumulated deep-zoom scroll, always in [-1, 1]
    pub fn scroll_progress(&self) -> f32 {
        self.scroll_progress
    }

    /// Wheel: accumulate while zoomed in the room
    ///
    /// Active only when `has_zoomed && has_entered && !is_screen_focused`.
    pub fn on_wheel(&mut self, store: &PhaseStore, delta_y: f32) -> Disposition {
        let flags = store.flags();
        if !(flags.has_zoomed && flags.has_entered && !flags.is_screen_focused) {
            return Disposition::Ignored;
        }
        if !delta_y.is_finite() {
            return Disposition::Ignored;
        }
        self.scroll_progress =
            (self.scroll_progress + delta_y * self.scroll_speed).clamp(-1.0, 1.0);
        Disposition::Handled {
            prevent_default: true,
        }
    }

    /// Space: toggle deep zoom; leaving zoom resets the scroll accumulator
    pub fn on_space(&mut self, store: &mut PhaseStore) -> Disposition {
        let flags = store.flags();
        if !flags.has_entered {
            return Disposition::Ignored;
        }
        if flags.has_zoomed {
            self.collapse_zoom(store);
        } else {
            debug!("zoom on");
            store.set_zoomed(true);
        }
        Disposition::Handled {
            prevent_default: true,
        }
    }

    /// Tab: toggle the pinned screen view; unavailable while zoomed
    pub fn on_tab(&mut self, store: &mut PhaseStore) -> Disposition {
        let flags = store.flags();
        if !(flags.has_entered && !flags.has_zoomed) {
            return Disposition::Ignored;
        }
        debug!("screen focus {}", !flags.is_screen_focused);
        store.set_screen_focused(!flags.is_screen_focused);
        Disposition::Handled {
            prevent_default: true,
        }
    }

    /// Enter key or click on the intro: one-way entry into the room
    pub fn on_enter(&mut self, store: &mut PhaseStore) -> Disposition {
        let flags = store.flags();
        if flags.has_entered {
            return Disposition::Ignored;
        }
        debug!("entered");
        store.set_entered(true);
        if !flags.is_mobile {
            store.set_phase(Phase::Analog);
        }
        Disposition::Handled {
            prevent_default: false,
        }
    }

    /// Drop out of the zoomed regime and forget accumulated scroll
    pub(crate) fn collapse_zoom(&mut self, store: &mut PhaseStore) {
        debug!("zoom off");
        store.set_zoomed(false);
        self.scroll_progress = 0.0;
    }
}

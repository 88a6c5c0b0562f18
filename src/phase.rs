//! Discrete presentation phase and the gate that derives it from progress.

use log::info;

use crate::store::PhaseStore;

/// Which UI layer the visitor is interacting with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// The 3D room is active
    #[default]
    Analog,

    /// The retro desktop overlay is active
    Digital,
}

/// Maps smoothed progress to a phase with a single threshold
///
/// There is no dead band: progress sitting exactly on the threshold holds the
/// current phase, and progress jittering across it flips every crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseGate {
    threshold: f32,
}

impl PhaseGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Next phase for the given smoothed progress
    ///
    /// Without zoom the phase is held at Analog; deep-zoom transitions only
    /// apply while zoomed.
    pub fn evaluate(&self, smoothed_progress: f32, has_zoomed: bool, current: Phase) -> Phase {
        if !has_zoomed {
            return Phase::Analog;
        }
        match current {
            Phase::Analog if smoothed_progress > self.threshold => Phase::Digital,
            Phase::Digital if smoothed_progress < self.threshold => Phase::Analog,
            unchanged => unchanged,
        }
    }

    /// Evaluate and write the result back to the store if it changed
    ///
    /// Returns the phase now in effect.
    pub fn apply(&self, store: &mut PhaseStore, smoothed_progress: f32) -> Phase {
        let current = store.phase();
        let next = self.evaluate(smoothed_progress, store.flags().has_zoomed, current);
        if next != current {
            info!(
                "phase {:?} -> {:?} at progress {:.3}",
                current, next, smoothed_progress
            );
            store.set_phase(next);
        }
        next
    }
}

/// Whether a viewport `width_px` logical pixels wide uses the mobile layout
pub fn is_mobile_width(width_px: u32, breakpoint_px: u32) -> bool {
    width_px < breakpoint_px
}

/// Re-classify the layout after a viewport resize
///
/// Entering the mobile layout forces the desktop overlay, since the 3D scene
/// is not shown there.
pub fn apply_viewport(store: &mut PhaseStore, is_mobile: bool) {
    let was_mobile = store.flags().is_mobile;
    store.set_mobile(is_mobile);
    if is_mobile {
        if !was_mobile {
            info!("mobile layout, forcing digital phase");
        }
        store.set_phase(Phase::Digital);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The gate only ever lands on the side of the threshold progress is on
        #[test]
        fn gate_agrees_with_side_of_threshold(
            progress in 0.0f32..=2.0,
            threshold in 0.1f32..=1.9,
            digital in any::<bool>(),
        ) {
            let gate = PhaseGate::new(threshold);
            let current = if digital { Phase::Digital } else { Phase::Analog };
            let next = gate.evaluate(progress, true, current);

            if progress > threshold {
                prop_assert_eq!(next, Phase::Digital);
            } else if progress < threshold {
                prop_assert_eq!(next, Phase::Analog);
            } else {
                prop_assert_eq!(next, current);
            }
        }
    }
}

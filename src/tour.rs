//! Scripted, fixed-step sessions: the headless mode of the binary and a
//! harness for driving a scene without a window.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::info;

use crate::camera::{CameraPose, ViewCamera};
use crate::events::{DeviceEvent, EventHub, SceneKey};
use crate::phase::Phase;
use crate::scene::Scene;
use crate::store::{StoreChange, UiFlags};

/// One scripted event at a point in session time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TourStep {
    pub at_s: f32,
    pub event: DeviceEvent,
}

/// Ordered list of scripted events
#[derive(Debug, Clone, Default)]
pub struct Tour {
    steps: Vec<TourStep>,
}

impl Tour {
    pub fn new(mut steps: Vec<TourStep>) -> Self {
        steps.sort_by(|a, b| a.at_s.total_cmp(&b.at_s));
        Self { steps }
    }

    pub fn steps(&self) -> &[TourStep] {
        &self.steps
    }

    /// Enter, zoom, scroll deep into the screen, scroll back out past the
    /// auto-exit point, then focus and release the screen
    pub fn guided() -> Self {
        let mut steps = vec![
            TourStep {
                at_s: 0.5,
                event: DeviceEvent::Click,
            },
            TourStep {
                at_s: 2.5,
                event: DeviceEvent::Key(SceneKey::Space),
            },
        ];
        steps.extend((0..9).map(|i| TourStep {
            at_s: 4.0 + i as f32 * 0.1,
            event: DeviceEvent::Wheel { delta_y: 100.0 },
        }));
        steps.extend((0..15).map(|i| TourStep {
            at_s: 8.0 + i as f32 * 0.1,
            event: DeviceEvent::Wheel { delta_y: -100.0 },
        }));
        steps.push(TourStep {
            at_s: 10.5,
            event: DeviceEvent::Key(SceneKey::Tab),
        });
        steps.push(TourStep {
            at_s: 12.0,
            event: DeviceEvent::Key(SceneKey::Tab),
        });
        Self::new(steps)
    }
}

/// What happened during a scripted session
#[derive(Debug, Clone)]
pub struct TourReport {
    pub frames: usize,
    /// (session time, new phase) for every phase change
    pub phase_changes: Vec<(f32, Phase)>,
    pub max_progress: f32,
    pub final_pose: CameraPose,
    pub final_phase: Phase,
    pub final_flags: UiFlags,
}

/// Run `tour` against `scene` for `duration_s` at a fixed `fps`
///
/// The scene is attached to `hub` for the duration if it is not already.
pub fn run(scene: &mut Scene, hub: &EventHub, tour: &Tour, duration_s: f32, fps: u32) -> TourReport {
    let fps = fps.max(1);
    let dt = 1.0 / fps as f32;
    let total_frames = (duration_s.max(0.0) * fps as f32).ceil() as usize;

    let was_attached = scene.is_attached();
    if !was_attached {
        scene.attach(hub);
    }

    let now = Rc::new(Cell::new(0.0f32));
    let changes = Rc::new(RefCell::new(Vec::new()));
    let store = scene.store();
    let subscription = {
        let now = Rc::clone(&now);
        let changes = Rc::clone(&changes);
        store.borrow_mut().subscribe(move |change| {
            if let StoreChange::Phase(phase) = change {
                changes.borrow_mut().push((now.get(), *phase));
            }
        })
    };

    let mut camera = ViewCamera::new(scene.driver().pose());
    let mut pending = tour.steps().iter().peekable();
    let mut max_progress = 0.0f32;

    for frame in 0..total_frames {
        let t = frame as f32 * dt;
        now.set(t);
        while let Some(step) = pending.next_if(|step| step.at_s <= t) {
            hub.dispatch(&step.event);
        }
        scene.frame(dt, &mut camera);
        max_progress = max_progress.max(scene.driver().smoothed_progress());
    }

    store.borrow_mut().unsubscribe(subscription);
    if !was_attached {
        scene.detach();
    }

    let (final_phase, final_flags) = {
        let store = store.borrow();
        (store.phase(), store.flags())
    };
    let phase_changes = changes.borrow().clone();

    info!(
        "tour finished: {} frames, {} phase changes, peak progress {:.3}, final phase {:?}",
        total_frames,
        phase_changes.len(),
        max_progress,
        final_phase
    );

    TourReport {
        frames: total_frames,
        phase_changes,
        max_progress,
        final_pose: scene.driver().pose(),
        final_phase,
        final_flags,
    }
}

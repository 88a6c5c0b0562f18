//! One mounted room scene: store, input collector and animation driver,
//! wired to a device event source.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::camera::{AnimationDriver, CameraPose, RenderCamera};
use crate::events::{DeviceEvent, EventHub, ListenerGuard, SceneKey};
use crate::input::{Disposition, InputCollector};
use crate::params::ChoreographyParams;
use crate::phase;
use crate::store::{OverlayLayers, PhaseStore};

/// Shared, injectable store handle (single-threaded)
pub type StoreHandle = Rc<RefCell<PhaseStore>>;

pub struct Scene {
    store: StoreHandle,
    input: Rc<RefCell<InputCollector>>,
    driver: AnimationDriver,
    mobile_breakpoint_px: u32,
    listener: Option<ListenerGuard>,
}

impl Scene {
    /// Create a scene with its own fresh store
    pub fn new(params: ChoreographyParams, mobile_breakpoint_px: u32) -> Self {
        Self::with_store(params, mobile_breakpoint_px, Rc::new(RefCell::new(PhaseStore::new())))
    }

    /// Create a scene over an existing store (e.g. shared with the overlay)
    pub fn with_store(
        params: ChoreographyParams,
        mobile_breakpoint_px: u32,
        store: StoreHandle,
    ) -> Self {
        let input = InputCollector::new(params.scroll_speed);
        Self {
            store,
            input: Rc::new(RefCell::new(input)),
            driver: AnimationDriver::new(params),
            mobile_breakpoint_px,
            listener: None,
        }
    }

    pub fn store(&self) -> StoreHandle {
        Rc::clone(&self.store)
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn scroll_progress(&self) -> f32 {
        self.input.borrow().scroll_progress()
    }

    pub fn layers(&self) -> OverlayLayers {
        self.store.borrow().layers()
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    /// Start listening to `hub`; re-attaching releases the previous listener
    pub fn attach(&mut self, hub: &EventHub) {
        if self.listener.is_some() {
            warn!("scene re-attached; releasing previous listener");
        }
        let store = Rc::clone(&self.store);
        let input = Rc::clone(&self.input);
        let breakpoint = self.mobile_breakpoint_px;

        // Drop the old guard before registering so only one listener exists
        self.listener = None;
        self.listener = Some(hub.register(move |event| {
            let mut store = store.borrow_mut();
            let mut input = input.borrow_mut();
            route(event, &mut input, &mut store, breakpoint)
        }));
        debug!("scene attached");
    }

    /// Stop listening; frames stop producing poses until re-attached
    pub fn detach(&mut self) {
        if self.listener.take().is_some() {
            debug!("scene detached");
        }
    }

    /// Run one frame and write the pose onto `camera`
    ///
    /// Returns `None` (and leaves the camera alone) while the scene has no
    /// event source attached.
    pub fn frame<C: RenderCamera + ?Sized>(&mut self, dt: f32, camera: &mut C) -> Option<CameraPose> {
        self.listener.as_ref()?;
        let mut store = self.store.borrow_mut();
        let mut input = self.input.borrow_mut();
        Some(self.driver.drive(dt, &mut input, &mut store, camera))
    }
}

/// Route one device event to the matching input handler
pub fn route(
    event: &DeviceEvent,
    input: &mut InputCollector,
    store: &mut PhaseStore,
    mobile_breakpoint_px: u32,
) -> Disposition {
    match *event {
        DeviceEvent::Wheel { delta_y } => input.on_wheel(store, delta_y),
        DeviceEvent::Key(SceneKey::Space) => input.on_space(store),
        DeviceEvent::Key(SceneKey::Tab) => input.on_tab(store),
        DeviceEvent::Key(SceneKey::Enter) | DeviceEvent::Click => input.on_enter(store),
        DeviceEvent::Resize { width, .. } => {
            phase::apply_viewport(store, phase::is_mobile_width(width, mobile_breakpoint_px));
            Disposition::Handled {
                prevent_default: false,
            }
        }
    }
}

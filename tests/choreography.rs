//! End-to-end sessions: device events through the hub, frames through the
//! scene, poses onto a recording camera.

use std::cell::RefCell;
use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use glam::Vec3;

use retrodesk::camera::RenderCamera;
use retrodesk::events::{DeviceEvent, EventHub, SceneKey};
use retrodesk::params::ChoreographyParams;
use retrodesk::phase::Phase;
use retrodesk::scene::Scene;
use retrodesk::store::StoreChange;

const DT: f32 = 1.0 / 60.0;

/// Render camera stand-in that keeps every write
#[derive(Default)]
struct RecordingCamera {
    positions: Vec<Vec3>,
    targets: Vec<Vec3>,
}

impl RenderCamera for RecordingCamera {
    fn set_position(&mut self, position: Vec3) {
        self.positions.push(position);
    }

    fn look_at(&mut self, target: Vec3) {
        self.targets.push(target);
    }
}

struct Session {
    hub: EventHub,
    scene: Scene,
    camera: RecordingCamera,
}

impl Session {
    fn new() -> Self {
        let params = ChoreographyParams {
            intro_enabled: false,
            ..Default::default()
        };
        let hub = EventHub::new();
        let mut scene = Scene::new(params, 768);
        scene.attach(&hub);
        Self {
            hub,
            scene,
            camera: RecordingCamera::default(),
        }
    }

    fn send(&self, event: DeviceEvent) {
        self.hub.dispatch(&event);
    }

    fn key(&self, key: SceneKey) {
        self.send(DeviceEvent::Key(key));
    }

    fn wheel(&self, delta_y: f32) {
        self.send(DeviceEvent::Wheel { delta_y });
    }

    fn run(&mut self, frames: usize) {
        for _ in 0..frames {
            self.scene.frame(DT, &mut self.camera);
        }
    }

    fn last_position(&self) -> Vec3 {
        *self.camera.positions.last().expect("no frames recorded")
    }

    fn last_target(&self) -> Vec3 {
        *self.camera.targets.last().expect("no frames recorded")
    }
}

fn assert_close(a: Vec3, b: Vec3) {
    assert!((a - b).length() < 1e-3, "{:?} != {:?}", a, b);
}

#[test]
fn wheel_before_entry_is_ignored() {
    let session = Session::new();
    let outcome = session.hub.dispatch(&DeviceEvent::Wheel { delta_y: 500.0 });
    assert!(!outcome.is_handled());
    assert!(!outcome.prevent_default());
    assert_eq!(session.scene.scroll_progress(), 0.0);
}

#[test]
fn enter_then_space_drives_toward_base() {
    let mut session = Session::new();
    session.key(SceneKey::Enter);
    assert!(session.scene.store().borrow().flags().has_entered);

    session.key(SceneKey::Space);
    assert!(session.scene.store().borrow().flags().has_zoomed);

    // Base waypoint after the quarter-turn orbit around its look-at point
    let settled = Vec3::new(0.05, 0.85, 2.5);
    session.run(30);
    let early = (session.last_position() - settled).length();
    session.run(30);
    let later = (session.last_position() - settled).length();
    assert!(later < early);

    let progress = session.scene.driver().smoothed_progress();
    assert!(progress > 0.5 && progress < 1.0);
    assert_eq!(session.camera.positions.len(), 60);
    assert_eq!(session.camera.targets.len(), 60);
}

#[test]
fn deep_zoom_settles_at_offset_with_full_orbit() {
    let mut session = Session::new();
    session.key(SceneKey::Enter);
    session.key(SceneKey::Space);
    session.wheel(900.0);
    assert!((session.scene.scroll_progress() - 0.9).abs() < 1e-5);

    let (target, rotation) = session.scene.driver().targets(true, session.scene.scroll_progress());
    assert!((target - 1.9).abs() < 1e-5);
    assert!((rotation - FRAC_PI_2).abs() < 1e-6);

    session.run(1200);

    // Orbited base (0.05, 0.85, 2.5) pushed 0.9 along -Z, into the screen
    assert_close(session.last_target(), Vec3::new(0.05, 0.85, 0.26));
    assert_close(session.last_position(), Vec3::new(0.05, 0.85, 1.6));
    assert_eq!(session.scene.store().borrow().phase(), Phase::Digital);
}

#[test]
fn zoom_travels_straight_at_the_monitor() {
    let mut session = Session::new();
    session.key(SceneKey::Enter);
    session.key(SceneKey::Space);
    session.run(1200);
    let base_position = session.last_position();
    let view = (session.last_target() - base_position).normalize();
    assert!(view.dot(Vec3::NEG_Z) > 0.999, "view {:?}", view);

    session.wheel(900.0);
    session.run(1200);
    let travel = (session.last_position() - base_position).normalize();
    assert!(travel.dot(view) > 0.999, "travel {:?}", travel);
    assert_eq!(session.scene.store().borrow().phase(), Phase::Digital);
}

#[test]
fn scrolling_out_past_threshold_exits_zoom() {
    let mut session = Session::new();
    session.key(SceneKey::Enter);
    session.key(SceneKey::Space);
    session.run(60);

    session.wheel(-600.0);
    assert!((session.scene.scroll_progress() + 0.6).abs() < 1e-5);

    session.run(1);
    let flags = session.scene.store().borrow().flags();
    assert!(!flags.has_zoomed);
    assert_eq!(session.scene.scroll_progress(), 0.0);

    session.run(1200);
    let start = session.scene.driver().params().waypoints.start;
    assert_close(session.last_position(), start.position());
    assert!(session.scene.driver().smoothed_progress() < 1e-3);
}

#[test]
fn phase_flips_once_each_way() {
    let mut session = Session::new();
    let changes = Rc::new(RefCell::new(Vec::new()));
    let store = session.scene.store();
    let id = {
        let changes = Rc::clone(&changes);
        store.borrow_mut().subscribe(move |change| {
            if let StoreChange::Phase(phase) = change {
                changes.borrow_mut().push(*phase);
            }
        })
    };

    session.key(SceneKey::Enter);
    session.key(SceneKey::Space);
    session.wheel(900.0);
    session.run(600);
    session.wheel(-900.0);
    session.run(600);

    assert_eq!(*changes.borrow(), vec![Phase::Digital, Phase::Analog]);
    assert!(store.borrow_mut().unsubscribe(id));
}

#[test]
fn double_space_restores_zoom_and_resets_scroll() {
    let session = Session::new();
    session.key(SceneKey::Enter);
    session.key(SceneKey::Space);
    session.wheel(300.0);
    assert!(session.scene.scroll_progress() > 0.0);

    session.key(SceneKey::Space);
    assert!(!session.scene.store().borrow().flags().has_zoomed);
    assert_eq!(session.scene.scroll_progress(), 0.0);

    session.key(SceneKey::Space);
    assert!(session.scene.store().borrow().flags().has_zoomed);
    assert_eq!(session.scene.scroll_progress(), 0.0);
}

#[test]
fn screen_focus_pins_camera() {
    let mut session = Session::new();
    session.key(SceneKey::Enter);
    session.run(10);
    session.key(SceneKey::Tab);
    session.run(1);

    let screen = session.scene.driver().params().waypoints.screen;
    assert_eq!(session.last_position(), screen.position());
    assert_eq!(session.last_target(), screen.look_at());

    // Wheel is inert while focused
    session.wheel(400.0);
    assert_eq!(session.scene.scroll_progress(), 0.0);

    session.key(SceneKey::Tab);
    session.run(1);
    assert!(!session.scene.store().borrow().flags().is_screen_focused);
}

#[test]
fn mobile_resize_forces_digital_regardless_of_progress() {
    let mut session = Session::new();
    session.key(SceneKey::Enter);
    session.key(SceneKey::Space);
    session.run(120);

    session.send(DeviceEvent::Resize {
        width: 400,
        height: 800,
    });
    let store = session.scene.store();
    assert!(store.borrow().flags().is_mobile);
    assert_eq!(store.borrow().phase(), Phase::Digital);

    // Gate stays out of it while mobile
    session.run(120);
    assert_eq!(store.borrow().phase(), Phase::Digital);
    let layers = session.scene.layers();
    assert!(layers.desktop_visible);
    assert!(!layers.scene_visible);
    assert!(layers.login_visible);
}

#[test]
fn dropping_scene_releases_listener() {
    let hub = EventHub::new();
    {
        let mut scene = Scene::new(ChoreographyParams::default(), 768);
        scene.attach(&hub);
        assert_eq!(hub.listener_count(), 1);
    }
    assert_eq!(hub.listener_count(), 0);
    assert!(!hub.dispatch(&DeviceEvent::Click).is_handled());
}

#[test]
fn two_scenes_keep_separate_state() {
    let hub_a = EventHub::new();
    let hub_b = EventHub::new();
    let mut a = Scene::new(ChoreographyParams::default(), 768);
    let mut b = Scene::new(ChoreographyParams::default(), 768);
    a.attach(&hub_a);
    b.attach(&hub_b);

    hub_a.dispatch(&DeviceEvent::Click);
    assert!(a.store().borrow().flags().has_entered);
    assert!(!b.store().borrow().flags().has_entered);
}

//! Device events and scoped listener registration.
//!
//! The host translates its raw window events into [`DeviceEvent`]s and
//! dispatches them through an [`EventHub`]. A scene registers its listener
//! once when it starts and holds the returned [`ListenerGuard`]; dropping the
//! guard deregisters the listener, so remounting a scene never leaks one.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use crate::input::Disposition;

/// Pixel-equivalent of one wheel line (browser `deltaY` convention)
pub const PIXELS_PER_LINE: f32 = 100.0;

/// Keys the choreography reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKey {
    Space,
    Tab,
    Enter,
}

/// Host-independent input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceEvent {
    /// Wheel movement; positive = scroll down / toward the page end
    Wheel { delta_y: f32 },

    /// Key pressed (repeats excluded)
    Key(SceneKey),

    /// Primary button click (the intro's enter button)
    Click,

    /// Viewport resized
    Resize { width: u32, height: u32 },
}

/// Translate a winit window event; anything the scene ignores maps to `None`
///
/// Sizes and pixel scroll deltas are converted to logical pixels with
/// `scale_factor`, so the mobile breakpoint and scroll speed do not depend
/// on display density.
pub fn translate_window_event(event: &WindowEvent, scale_factor: f64) -> Option<DeviceEvent> {
    match event {
        WindowEvent::MouseWheel { delta, .. } => {
            // winit reports positive y for scrolling up; flip to deltaY
            let delta_y = match delta {
                MouseScrollDelta::LineDelta(_, y) => -y * PIXELS_PER_LINE,
                MouseScrollDelta::PixelDelta(pos) => -pos.to_logical::<f32>(scale_factor).y,
            };
            Some(DeviceEvent::Wheel { delta_y })
        }
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    state: ElementState::Pressed,
                    logical_key,
                    repeat: false,
                    ..
                },
            ..
        } => translate_key(logical_key).map(DeviceEvent::Key),
        WindowEvent::MouseInput {
            state: ElementState::Pressed,
            button: MouseButton::Left,
            ..
        } => Some(DeviceEvent::Click),
        WindowEvent::Resized(size) => Some(resize_event(*size, scale_factor)),
        _ => None,
    }
}

/// Viewport size in logical pixels
pub fn resize_event(size: PhysicalSize<u32>, scale_factor: f64) -> DeviceEvent {
    let logical: LogicalSize<u32> = size.to_logical(scale_factor);
    DeviceEvent::Resize {
        width: logical.width,
        height: logical.height,
    }
}

fn translate_key(key: &Key) -> Option<SceneKey> {
    match key {
        Key::Named(NamedKey::Space) => Some(SceneKey::Space),
        Key::Named(NamedKey::Tab) => Some(SceneKey::Tab),
        Key::Named(NamedKey::Enter) => Some(SceneKey::Enter),
        _ => None,
    }
}

type Listener = Box<dyn FnMut(&DeviceEvent) -> Disposition>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListenerId(u64);

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
    /// Guards dropped while their listener was out for dispatch
    pending_removals: Vec<ListenerId>,
}

/// Fan-out point for device events
#[derive(Clone, Default)]
pub struct EventHub {
    inner: Rc<RefCell<HubInner>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for as long as the returned guard lives
    #[must_use = "dropping the guard deregisters the listener"]
    pub fn register<F>(&self, listener: F) -> ListenerGuard
    where
        F: FnMut(&DeviceEvent) -> Disposition + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, Box::new(listener)));
        debug!("listener {} registered", id.0);

        ListenerGuard {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Deliver `event` to every listener and merge their dispositions
    ///
    /// Listeners may register or drop guards while being called.
    pub fn dispatch(&self, event: &DeviceEvent) -> Disposition {
        let mut active = std::mem::take(&mut self.inner.borrow_mut().listeners);

        let mut outcome = Disposition::Ignored;
        for (_, listener) in active.iter_mut() {
            outcome = outcome.merge(listener(event));
        }

        let removed = std::mem::take(&mut self.inner.borrow_mut().pending_removals);
        let (mut kept, released): (Vec<_>, Vec<_>) = active
            .into_iter()
            .partition(|(id, _)| !removed.contains(id));
        {
            let mut inner = self.inner.borrow_mut();
            // Listeners registered during dispatch were pushed onto the empty vec
            kept.append(&mut inner.listeners);
            inner.listeners = kept;
        }
        // Released closures may own guards of their own
        drop(released);

        outcome
    }
}

/// Keeps a listener registered; deregisters it on drop
pub struct ListenerGuard {
    id: ListenerId,
    hub: Weak<RefCell<HubInner>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(inner) = self.hub.upgrade() else {
            return;
        };
        let released = {
            let mut inner = inner.borrow_mut();
            match inner.listeners.iter().position(|(id, _)| *id == self.id) {
                Some(index) => Some(inner.listeners.remove(index)),
                None => {
                    inner.pending_removals.push(self.id);
                    None
                }
            }
        };
        drop(released);
        debug!("listener {} released", self.id.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn handled() -> Disposition {
        Disposition::Handled {
            prevent_default: false,
        }
    }

    #[test]
    fn test_dispatch_reaches_listener() {
        let hub = EventHub::new();
        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);
        let _guard = hub.register(move |_| {
            sink.set(sink.get() + 1);
            handled()
        });

        assert!(hub.dispatch(&DeviceEvent::Click).is_handled());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_drop_guard_deregisters() {
        let hub = EventHub::new();
        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);
        let guard = hub.register(move |_| {
            sink.set(sink.get() + 1);
            handled()
        });
        assert_eq!(hub.listener_count(), 1);

        drop(guard);
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(hub.dispatch(&DeviceEvent::Click), Disposition::Ignored);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_guard_dropped_during_dispatch() {
        let hub = EventHub::new();
        let slot: Rc<RefCell<Option<ListenerGuard>>> = Rc::new(RefCell::new(None));
        let inner_slot = Rc::clone(&slot);
        let guard = hub.register(move |_| {
            inner_slot.borrow_mut().take();
            handled()
        });
        *slot.borrow_mut() = Some(guard);

        hub.dispatch(&DeviceEvent::Click);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_guard_outlives_hub() {
        let hub = EventHub::new();
        let guard = hub.register(|_| Disposition::Ignored);
        drop(hub);
        drop(guard);
    }

    #[test]
    fn test_translate_named_keys() {
        assert_eq!(
            translate_key(&Key::Named(NamedKey::Space)),
            Some(SceneKey::Space)
        );
        assert_eq!(translate_key(&Key::Named(NamedKey::Tab)), Some(SceneKey::Tab));
        assert_eq!(
            translate_key(&Key::Named(NamedKey::Enter)),
            Some(SceneKey::Enter)
        );
        assert_eq!(translate_key(&Key::Named(NamedKey::Escape)), None);
        assert_eq!(translate_key(&Key::Character("a".into())), None);
    }

    #[test]
    fn test_translate_resize() {
        let event = WindowEvent::Resized(PhysicalSize::new(400, 800));
        assert_eq!(
            translate_window_event(&event, 1.0),
            Some(DeviceEvent::Resize {
                width: 400,
                height: 800
            })
        );
    }

    #[test]
    fn test_resize_reports_logical_pixels() {
        // 600 logical px wide on a 2x display
        let event = WindowEvent::Resized(PhysicalSize::new(1200, 1600));
        assert_eq!(
            translate_window_event(&event, 2.0),
            Some(DeviceEvent::Resize {
                width: 600,
                height: 800
            })
        );
        assert_eq!(
            resize_event(PhysicalSize::new(2560, 1440), 2.0),
            DeviceEvent::Resize {
                width: 1280,
                height: 720
            }
        );
    }
}

use super::Handle;
use crate::error::{Error, ErrorKind};
use crate::events::{Listener, ListenerKey, ListenerRegistry};
use crate::logging::{trace, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, Event};

/// Event listeners.
///
/// The `Dom` keeps attached listeners alive, so a `Listener` can be dropped
/// by the caller once it is attached. Keep a clone around to `off` it later.
/// Attaching a listener that is already attached to an element for the same
/// event does nothing, as in the DOM.
impl Handle {
    /// Call `listener` whenever `event` fires on an element.
    pub fn on(&self, event: &str, listener: &Listener) -> Result<&Self, Error> {
        let event = event.to_string();
        let listener = listener.clone();
        let registry = self.dom.listeners().clone();
        self.fan_out("on", move |el| {
            let key = ListenerKey::Direct(listener.key());
            if registry.borrow().is_attached(&key, &event, el) {
                trace!("on: {:?} listener already attached", event);
                return Ok(());
            }
            el.add_event_listener_with_callback(&event, listener.function())?;
            registry
                .borrow_mut()
                .attach(key, &event, el.clone(), listener.clone());
            Ok(())
        })
    }

    /// Like `on`, but the listener is detached after its first call.
    pub fn once(&self, event: &str, listener: &Listener) -> Result<&Self, Error> {
        let event = event.to_string();
        let listener = listener.clone();
        let registry = self.dom.listeners().clone();
        self.fan_out("once", move |el| {
            let key = ListenerKey::Direct(listener.key());
            if registry.borrow().is_attached(&key, &event, el) {
                trace!("once: {:?} listener already attached", event);
                return Ok(());
            }
            let wrapper = fire_once(
                Rc::downgrade(&registry),
                key.clone(),
                event.clone(),
                el.clone(),
                listener.clone(),
            );
            let options = AddEventListenerOptions::new();
            options.set_once(true);
            el.add_event_listener_with_callback_and_add_event_listener_options(
                &event,
                wrapper.function(),
                &options,
            )?;
            registry.borrow_mut().attach(key, &event, el.clone(), wrapper);
            Ok(())
        })
    }

    /// Detach `listener` from `event`. Elements it is not attached to are
    /// left alone.
    pub fn off(&self, event: &str, listener: &Listener) -> Result<&Self, Error> {
        let event = event.to_string();
        let key = ListenerKey::Direct(listener.key());
        let registry = self.dom.listeners().clone();
        self.fan_out("off", move |el| {
            let detached = registry.borrow_mut().detach(&key, &event, el);
            remove_all(el, &event, &detached)
        })
    }

    /// Listen for `event` on each element and call `callback` with the event
    /// target and the event whenever the target matches `sub_selector`.
    pub fn delegate<F>(&self, event: &str, sub_selector: &str, callback: F) -> Result<&Self, Error>
    where
        F: 'static + FnMut(Element, Event),
    {
        let event = event.to_string();
        let sub_selector: Rc<str> = sub_selector.into();
        let callback = Rc::new(RefCell::new(callback));
        let registry = self.dom.listeners().clone();
        self.fan_out("delegate", move |el| {
            let selector = sub_selector.clone();
            let callback = callback.clone();
            let listener = Listener::new(move |event: Event| {
                let target = match event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                    Some(target) => target,
                    None => return,
                };
                match target.matches(&selector) {
                    Ok(true) => match callback.try_borrow_mut() {
                        Ok(mut callback) => (&mut *callback)(target, event),
                        Err(_) => warn!("delegate: {:?} listener re-entered", &*selector),
                    },
                    Ok(false) => {}
                    Err(e) => warn!("delegate: cannot match {:?}: {:?}", &*selector, e),
                }
            });
            el.add_event_listener_with_callback(&event, listener.function())?;
            registry.borrow_mut().attach(
                ListenerKey::Delegated(sub_selector.clone()),
                &event,
                el.clone(),
                listener,
            );
            Ok(())
        })
    }

    /// Detach every listener that `delegate` attached for `event` and
    /// `sub_selector`.
    pub fn undelegate(&self, event: &str, sub_selector: &str) -> Result<&Self, Error> {
        let event = event.to_string();
        let key = ListenerKey::Delegated(sub_selector.into());
        let registry = self.dom.listeners().clone();
        self.fan_out("undelegate", move |el| {
            let detached = registry.borrow_mut().detach(&key, &event, el);
            remove_all(el, &event, &detached)
        })
    }
}

fn remove_all(el: &Element, event: &str, listeners: &[Listener]) -> Result<(), ErrorKind> {
    for listener in listeners {
        el.remove_event_listener_with_callback(event, listener.function())?;
    }
    Ok(())
}

/// Wrap `listener` so that its registry entry for `target` is dropped after
/// the first call. The browser removes the wrapper itself.
fn fire_once(
    registry: Weak<RefCell<ListenerRegistry>>,
    key: ListenerKey,
    event: String,
    target: Element,
    listener: Listener,
) -> Listener {
    Listener::new(move |fired: Event| {
        if let Err(e) = listener.function().call1(&target, &fired) {
            warn!("once: {:?} listener threw: {:?}", event, e);
        }
        let registry = match registry.upgrade() {
            Some(registry) => registry,
            None => return,
        };
        // Bound so the wrapper is dropped after the registry borrow ends.
        let detached = match registry.try_borrow_mut() {
            Ok(mut registry) => registry.detach(&key, &event, &target),
            Err(_) => {
                warn!("once: listener registry busy, {:?} stays registered", event);
                return;
            }
        };
        drop(detached);
    })
}

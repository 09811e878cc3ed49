use fxhash::FxHashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// An event listener that can be attached with `Handle::on` and detached
/// again with `Handle::off`.
///
/// Clones are the same listener: detaching one clone detaches them all.
#[derive(Clone)]
pub struct Listener {
    closure: Rc<Closure<dyn FnMut(web_sys::Event)>>,
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Listener")
            .field("key", &format_args!("0x{:x}", self.key()))
            .finish()
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Listener) -> bool {
        Rc::ptr_eq(&self.closure, &other.closure)
    }
}

impl Eq for Listener {}

impl Listener {
    /// Wrap a callback as a listener.
    pub fn new<F>(callback: F) -> Listener
    where
        F: 'static + FnMut(web_sys::Event),
    {
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(web_sys::Event)>);
        Listener {
            closure: Rc::new(closure),
        }
    }

    #[inline]
    pub(crate) fn function(&self) -> &js_sys::Function {
        let value: &JsValue = (*self.closure).as_ref();
        value.unchecked_ref()
    }

    #[inline]
    pub(crate) fn key(&self) -> usize {
        Rc::as_ptr(&self.closure) as usize
    }
}

/// What a registered listener is keyed by: a caller's `Listener`, or the
/// sub-selector a delegating listener filters on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ListenerKey {
    Direct(usize),
    Delegated(Rc<str>),
}

/// Keeps JS-visible callbacks alive while they are attached somewhere.
///
/// Entries are keyed by `(key, event)` and record every target the callback
/// is attached to, so only real attachments and detachments change what is
/// kept alive. A value is dropped once it is detached from its target.
#[derive(Debug)]
pub(crate) struct Attachments<K, T, V> {
    active: FxHashMap<(K, String), Vec<(T, V)>>,
}

impl<K, T, V> Default for Attachments<K, T, V>
where
    K: Eq + Hash,
{
    fn default() -> Attachments<K, T, V> {
        Attachments {
            active: FxHashMap::default(),
        }
    }
}

impl<K, T, V> Attachments<K, T, V>
where
    K: Clone + Eq + Hash,
    T: PartialEq,
{
    pub(crate) fn is_attached(&self, key: &K, event: &str, target: &T) -> bool {
        self.active
            .get(&(key.clone(), event.to_string()))
            .map_or(false, |entries| entries.iter().any(|(t, _)| t == target))
    }

    /// Record that `value` is attached to `target` for `event`.
    pub(crate) fn attach(&mut self, key: K, event: &str, target: T, value: V) {
        self.active
            .entry((key, event.to_string()))
            .or_insert_with(Vec::new)
            .push((target, value));
    }

    /// Forget every value attached to `target` under `key` and `event`, and
    /// hand them back so the caller can detach them from the host.
    pub(crate) fn detach(&mut self, key: &K, event: &str, target: &T) -> Vec<V> {
        let slot = (key.clone(), event.to_string());
        let entries = match self.active.get_mut(&slot) {
            Some(entries) => entries,
            None => return vec![],
        };
        let mut detached = vec![];
        let mut i = 0;
        while i < entries.len() {
            if entries[i].0 == *target {
                detached.push(entries.remove(i).1);
            } else {
                i += 1;
            }
        }
        if entries.is_empty() {
            self.active.remove(&slot);
        }
        detached
    }

    /// Number of live attachments.
    pub(crate) fn len(&self) -> usize {
        self.active.values().map(Vec::len).sum()
    }
}

pub(crate) type ListenerRegistry = Attachments<ListenerKey, web_sys::Element, Listener>;

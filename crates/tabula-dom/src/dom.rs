//! Element queries, visibility helpers, and the listener registry.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, Window};

use crate::console;

pub fn window() -> Window {
    web_sys::window().expect("no window in this context")
}

pub fn document() -> Document {
    window().document().expect("window has no document")
}

pub fn body() -> Element {
    document().body().expect("document has no body").into()
}

/// First element under `root` matching `selector`.
pub fn query(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Every element under `root` matching `selector`.
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Document-wide query; cascades and scroll targets reach outside the
/// subtree being bound.
pub fn query_document(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok().flatten()
}

pub fn query_document_all(selector: &str) -> Vec<Element> {
    query_all(&document().document_element().expect("document has no root"), selector)
}

pub fn show(el: &Element) {
    if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() {
        let _ = html.style().remove_property("display");
    }
}

pub fn hide(el: &Element) {
    if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() {
        let _ = html.style().set_property("display", "none");
    }
}

pub fn is_hidden(el: &Element) -> bool {
    window()
        .get_computed_style(el)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("display").ok())
        .is_some_and(|display| display == "none")
}

struct ListenerEntry {
    element: Element,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Owns attached listeners so a binder can detach a subtree's old handlers
/// before attaching fresh ones. Without this, rebinding after a fragment
/// swap would stack a second handler on every element that survived the
/// swap.
#[derive(Default)]
pub struct ListenerBag {
    entries: RefCell<Vec<ListenerEntry>>,
}

impl ListenerBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handler` and keep its closure alive.
    pub fn attach<F>(&self, element: &Element, event: &'static str, handler: F)
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        if let Err(err) =
            element.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            console::error(&format!("cannot attach {event} listener: {err:?}"));
            return;
        }
        self.entries.borrow_mut().push(ListenerEntry {
            element: element.clone(),
            event,
            closure,
        });
    }

    /// Remove and drop every listener attached on `root` or below it.
    pub fn detach_within(&self, root: &Element) {
        self.entries.borrow_mut().retain(|entry| {
            let inside = root.contains(Some(entry.element.as_ref()));
            if inside {
                let _ = entry.element.remove_event_listener_with_callback(
                    entry.event,
                    entry.closure.as_ref().unchecked_ref(),
                );
            }
            !inside
        });
    }
}

//! Browser-side checks for the DOM binders. These only run under a wasm
//! test runner; the state machines themselves are covered natively in
//! `tabula-state`.

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Event, HtmlDetailsElement};

use tabula_state::{Disclosure, ItemKey, KeyValueStore};

use tabula_dom::dom::{self, ListenerBag};
use tabula_dom::storage::LocalStorage;
use tabula_dom::{App, disclosure};

use wasm_bindgen::JsCast;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_roundtrip() {
    let store = LocalStorage::new();
    store.set("tabula-test-key", "open");
    assert_eq!(store.get("tabula-test-key"), Some("open".to_string()));
    store.remove("tabula-test-key");
    assert_eq!(store.get("tabula-test-key"), None);
}

#[wasm_bindgen_test]
fn listener_bag_detaches_subtree_handlers() {
    let document = dom::document();
    let el = document.create_element("button").unwrap();
    dom::body().append_child(el.as_ref()).unwrap();

    let bag = ListenerBag::new();
    let hits = Rc::new(Cell::new(0));
    {
        let hits = Rc::clone(&hits);
        bag.attach(&el, "click", move |_| hits.set(hits.get() + 1));
    }

    let click = Event::new("click").unwrap();
    el.dispatch_event(&click).unwrap();
    assert_eq!(hits.get(), 1);

    bag.detach_within(&dom::body());
    let click = Event::new("click").unwrap();
    el.dispatch_event(&click).unwrap();
    assert_eq!(hits.get(), 1);

    el.remove();
}

#[wasm_bindgen_test]
fn stored_open_state_reopens_details() {
    let document = dom::document();
    let el = document.create_element("details").unwrap();
    el.set_attribute("itemkey", "wasm-test-item").unwrap();
    dom::body().append_child(el.as_ref()).unwrap();

    let app = App::new();
    app.disclosure
        .set_item(&ItemKey::new("wasm-test-item"), Disclosure::Open);
    disclosure::bind_disclosures(&app, &dom::body());

    let details: &HtmlDetailsElement = el.dyn_ref().unwrap();
    assert!(details.open());

    el.remove();
}

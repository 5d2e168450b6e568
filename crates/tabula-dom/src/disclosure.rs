//! Binding for `<details>` elements that remember their open state.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlDetailsElement};

use tabula_state::disclosure::{Disclosure, reconcile};
use tabula_state::ItemKey;

use crate::App;
use crate::dom;

/// Wire every keyed disclosure under `root`: persist user toggles, then
/// reconcile the element to its stored state (or the server's one-shot
/// force-open flag).
pub fn bind_disclosures(app: &Rc<App>, root: &Element) {
    app.bags.disclosure.detach_within(root);
    for el in dom::query_all(root, "details[itemkey]") {
        let Some(raw_key) = el.get_attribute("itemkey") else {
            continue;
        };
        let key = ItemKey::new(raw_key);

        {
            let state = Rc::clone(app);
            let key = key.clone();
            let details = el.clone();
            app.bags.disclosure.attach(&el, "toggle", move |_| {
                let open = details
                    .dyn_ref::<HtmlDetailsElement>()
                    .is_some_and(HtmlDetailsElement::open);
                state.disclosure.set_item(&key, Disclosure::from_open(open));
            });
        }

        let Some(details) = el.dyn_ref::<HtmlDetailsElement>() else {
            continue;
        };
        let force_open = el.has_attribute("forceopen");
        let stored = app.disclosure.item(&key);
        if let Some(open) = reconcile(stored, force_open, details.open()) {
            details.set_open(open);
        }
    }
}

//! Binding for keyed panels toggled by a paired pair of trigger controls.
//!
//! Unlike `<details>` disclosures, these are plain elements the renderer
//! tags with an item key and a `body` marker, plus two trigger elements
//! (`trigger="1"` opens, `trigger="-1"` closes). The same durable item key
//! drives both kinds.

use std::rc::Rc;

use web_sys::Element;

use tabula_state::Disclosure;
use tabula_state::ItemKey;

use crate::App;
use crate::dom;

pub fn bind_panels(app: &Rc<App>, root: &Element) {
    app.bags.panels.detach_within(root);
    for body in dom::query_all(root, "[itemkey][body]") {
        let Some(raw_key) = body.get_attribute("itemkey") else {
            continue;
        };
        let key = ItemKey::new(raw_key);
        let triggers_on = dom::query_all(root, &format!("[itemkey=\"{key}\"][trigger=\"1\"]"));
        let triggers_off = dom::query_all(root, &format!("[itemkey=\"{key}\"][trigger=\"-1\"]"));

        for trigger in &triggers_on {
            let state = Rc::clone(app);
            let key = key.clone();
            let body = body.clone();
            let on = triggers_on.clone();
            let off = triggers_off.clone();
            app.bags.panels.attach(trigger, "click", move |_| {
                state.disclosure.set_item(&key, Disclosure::Open);
                apply(&body, &on, &off, true);
            });
        }
        for trigger in &triggers_off {
            let state = Rc::clone(app);
            let key = key.clone();
            let body = body.clone();
            let on = triggers_on.clone();
            let off = triggers_off.clone();
            app.bags.panels.attach(trigger, "click", move |_| {
                state.disclosure.set_item(&key, Disclosure::Closed);
                apply(&body, &on, &off, false);
            });
        }

        apply(
            &body,
            &triggers_on,
            &triggers_off,
            app.disclosure.item(&key).is_open(),
        );
    }
}

fn apply(body: &Element, triggers_on: &[Element], triggers_off: &[Element], open: bool) {
    if open {
        dom::show(body);
        triggers_on.iter().for_each(dom::hide);
        triggers_off.iter().for_each(dom::show);
    } else {
        dom::hide(body);
        triggers_on.iter().for_each(dom::show);
        triggers_off.iter().for_each(dom::hide);
    }
}

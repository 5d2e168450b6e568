//! The contributor-list filter, persisted under its fixed store key.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::App;
use crate::dom;

pub fn bind_contributor_filter(app: &Rc<App>, root: &Element) {
    app.bags.cfilter.detach_within(root);
    let Some(control) = dom::query(root, "#cfilter") else {
        return;
    };
    let summaries = dom::query_all(root, ".table.contrib > details > summary");

    let previous = app.disclosure.contributor_filter();
    if !previous.is_empty() {
        if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
            input.set_value(&previous);
        }
        adjust(&summaries, &previous);
    }

    let state = Rc::clone(app);
    let me = control.clone();
    app.bags.cfilter.attach(&control, "keyup", move |_| {
        let Some(input) = me.dyn_ref::<HtmlInputElement>() else {
            return;
        };
        let pattern = input.value().to_lowercase();
        state.disclosure.set_contributor_filter(&pattern);
        adjust(&summaries, &pattern);
    });
}

fn adjust(summaries: &[Element], pattern: &str) {
    for summary in summaries {
        let text = summary.inner_html().to_lowercase();
        if text.contains(pattern) {
            dom::show(summary);
        } else {
            dom::hide(summary);
        }
    }
}

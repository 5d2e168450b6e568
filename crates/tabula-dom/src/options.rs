//! Tri-state option panels and the links they rewrite.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use tabula_state::TriState;
use tabula_state::options::{extend_url, option_query};

use crate::App;
use crate::dom;

pub fn bind_option_panel(app: &Rc<App>, panel: &Element) {
    app.bags.options.detach_within(panel);
    let controls = dom::query_all(panel, "input.option");
    for control in &controls {
        let panel = panel.clone();
        let controls = controls.clone();
        let me = control.clone();
        app.bags.options.attach(control, "click", move |_| {
            let next = TriState::from_attr(me.get_attribute("trival").as_deref()).next();
            write_control(&me, next);
            apply_options(&panel, &controls, false);
        });
    }
    apply_options(panel, &controls, true);
}

/// Persist the value on the control and mirror it into the checkbox's
/// checked/indeterminate visuals.
fn write_control(control: &Element, value: TriState) {
    let _ = control.set_attribute("trival", value.as_attr());
    let Some(input) = control.dyn_ref::<HtmlInputElement>() else {
        return;
    };
    match value {
        TriState::On => {
            input.set_checked(true);
            input.set_indeterminate(false);
        }
        TriState::Off => {
            input.set_checked(false);
            input.set_indeterminate(false);
        }
        TriState::Unset => input.set_indeterminate(true),
    }
}

/// Rebuild every link that declares a base URL from all controls' current
/// values. After any recomputation besides the initial one, a link marked
/// active is the navigation to perform now.
fn apply_options(panel: &Element, controls: &[Element], init: bool) {
    let options: Vec<(String, TriState)> = controls
        .iter()
        .map(|control| {
            (
                control.get_attribute("id").unwrap_or_default(),
                TriState::from_attr(control.get_attribute("trival").as_deref()),
            )
        })
        .collect();
    if init {
        for (control, (_, value)) in controls.iter().zip(&options) {
            write_control(control, *value);
        }
    }

    let query = option_query(&options);
    for link in dom::query_all(panel, "a[hrefbase]") {
        if let Some(base) = link.get_attribute("hrefbase") {
            let _ = link.set_attribute("href", &extend_url(&base, &query));
        }
    }

    if !init {
        if let Some(active) = dom::query(panel, "a.active") {
            if let Some(href) = active.get_attribute("href") {
                let _ = dom::window().location().set_href(&href);
            }
        }
    }
}

//! The per-field view/edit machinery.
//!
//! Every element carrying an `action` attribute is a control on one
//! field: `edit` and `view` switch the field's rendering (saving first
//! when the widget's value drifted from its baseline), `refresh` re-fetches
//! a whole subtree. Focus loss commits an edit too, unless the loss was
//! caused by pressing the toggle control itself: the press marks the
//! field and the click handler owns that transition.

use std::rc::Rc;

use web_sys::Element;

use tabula_state::field::{self, Baseline, Candidate, SaveDecision};
use tabula_state::{Error, FieldAction, FieldKey};

use crate::widgets::WidgetContext;
use crate::{App, console, dom, fetcher, flash};

pub fn bind_field_actions(app: &Rc<App>, root: &Element) {
    app.bags.actions.detach_within(root);
    for el in dom::query_all(root, "[action]") {
        let Some(action) = el.get_attribute("action") else {
            continue;
        };

        if action == "refresh" {
            let state = Rc::clone(app);
            let me = el.clone();
            app.bags.actions.attach(&el, "click", move |event| {
                event.prevent_default();
                event.stop_propagation();
                fetcher::refresh(&state, &me);
            });
            continue;
        }

        let (Some(table), Some(entity), Some(field_name)) = (
            el.get_attribute("table"),
            el.get_attribute("eid"),
            el.get_attribute("field"),
        ) else {
            console::error("action element is missing its table/eid/field coordinates");
            continue;
        };
        let field = FieldKey::new(table, entity, field_name);
        let Ok(Some(parent)) = el.closest("div") else {
            continue;
        };

        match action.as_str() {
            "edit" => {
                let _ = parent.class_list().remove_1("edit");
            }
            "view" => {
                let _ = parent.class_list().add_1("edit");
            }
            _ => {}
        }
        let fetch_action = if action == "edit" {
            FieldAction::Edit
        } else {
            FieldAction::View
        };

        {
            let state = Rc::clone(app);
            let field = field.clone();
            app.bags.actions.attach(&el, "mousedown", move |_| {
                state.suppress.borrow_mut().insert(field.clone());
            });
        }
        {
            let state = Rc::clone(app);
            let field = field.clone();
            let parent = parent.clone();
            app.bags.actions.attach(&el, "click", move |_| {
                submit(&state, &field, fetch_action, &parent, None);
                state.suppress.borrow_mut().remove(&field);
            });
        }

        for focus_el in dom::query_all(&parent, "input,textarea") {
            {
                let state = Rc::clone(app);
                let parent = parent.clone();
                app.bags.actions.attach(&focus_el, "keyup", move |_| {
                    mark_dirty(&state, &parent);
                });
            }
            {
                let state = Rc::clone(app);
                let field = field.clone();
                let parent = parent.clone();
                app.bags.actions.attach(&focus_el, "blur", move |_| {
                    if state.suppress.borrow_mut().remove(&field) {
                        // The pressed toggle owns this transition.
                        return;
                    }
                    submit(&state, &field, FieldAction::View, &parent, None);
                });
            }
        }

        if let Some(value_el) = dom::query(&parent, "[orig]") {
            if let Err(err) = activate_widget(app, &field, &parent, &value_el) {
                console::error(&format!("cannot activate widget for {field}: {err}"));
                flash::error(&format!("activate {}", field.field), &err.to_string());
            }
        }
    }
}

fn activate_widget(
    app: &Rc<App>,
    field: &FieldKey,
    parent: &Element,
    value_el: &Element,
) -> Result<(), Error> {
    let kind = value_el
        .get_attribute("wtype")
        .ok_or_else(|| Error::Markup(format!("value element for {field} has no wtype")))?;
    let widget = app.widgets.lookup(&kind)?;
    widget.activate(WidgetContext {
        app: Rc::clone(app),
        field: field.clone(),
        parent: parent.clone(),
        value_el: value_el.clone(),
        targets: dom::query_all(value_el, ".wvalue"),
    })
}

/// Switch the field to `action`'s rendering, saving the candidate first
/// when it is dirty. The fetch always happens; a clean field still swaps
/// its fragment to the requested mode; only the save payload is
/// conditional.
///
/// Overlapping saves for one field are not serialized: the last response
/// processed wins the baseline, which may not match the last request
/// sent. Callers needing stricter ordering must disable the field while a
/// save is outstanding.
pub fn submit(
    app: &Rc<App>,
    field: &FieldKey,
    action: FieldAction,
    parent: &Element,
    new_entry: Option<&str>,
) {
    let decision = match dom::query(parent, "[orig]") {
        Some(value_el) => match decide(app, &value_el, new_entry) {
            Ok(decision) => decision,
            Err(err) => {
                console::error(&format!("cannot read {field}: {err}"));
                flash::error(&format!("save {}", field.field), &err.to_string());
                return;
            }
        },
        None => SaveDecision::Untracked,
    };
    let task = decision.is_dirty().then(|| format!("save {}", field.field));
    let body = decision.body().map(str::to_string);
    fetcher::fetch_fragment(app, field.endpoint(action), parent.clone(), body, task);
}

/// Read the live candidate and compare it to the rendered baseline. A
/// value element without a baseline attribute has nothing to save.
pub(crate) fn decide(
    app: &App,
    value_el: &Element,
    new_entry: Option<&str>,
) -> Result<SaveDecision, Error> {
    let Some(orig) = value_el.get_attribute("orig") else {
        return Ok(SaveDecision::Untracked);
    };
    let baseline = Baseline::decode(&orig)?;
    let kind = value_el
        .get_attribute("wtype")
        .ok_or_else(|| Error::Markup("value element carries a baseline but no wtype".into()))?;
    let widget = app.widgets.lookup(&kind)?;

    let multiple = value_el.has_attribute("multiple");
    let extensible = value_el.has_attribute("extensible");
    let carriers = dom::query_all(value_el, ".wvalue");
    let mut candidate = if multiple {
        widget.read_multiple(&carriers)
    } else {
        carriers
            .first()
            .map(|carrier| widget.read(carrier))
            .unwrap_or(Candidate::Null)
    };
    if extensible {
        if let Some(entry) = new_entry {
            candidate = field::merge_new_entry(candidate, entry, multiple);
        }
    }

    let decision = SaveDecision::compute(Some(&baseline), &candidate)?;
    match &decision {
        SaveDecision::Dirty { serialized, .. } => console::debug(&format!(
            "widget {kind}: dirty => saving ({} -> {serialized})",
            baseline.as_json()
        )),
        SaveDecision::Clean { serialized } => {
            console::debug(&format!("widget {kind}: clean => no save ({serialized})"))
        }
        SaveDecision::Untracked => {}
    }
    Ok(decision)
}

/// Live dirtiness feedback while typing: toggle the value element's
/// `dirty` class to match the current comparison.
fn mark_dirty(app: &App, parent: &Element) {
    let Some(value_el) = dom::query(parent, "[orig]") else {
        return;
    };
    match decide(app, &value_el, None) {
        Ok(decision) if decision.is_dirty() => {
            let _ = value_el.class_list().add_1("dirty");
        }
        Ok(_) => {
            let _ = value_el.class_list().remove_1("dirty");
        }
        Err(_) => {}
    }
}

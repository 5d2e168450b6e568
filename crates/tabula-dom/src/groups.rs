//! Group expand/collapse controls and their cascades.
//!
//! Each group has a pair of anchor controls (`.dc.i-cdown` opens,
//! `.dc.i-cup` closes); member rows are `tr` elements tagged with the
//! group id and the `.dd` class. Bulk controls (`.dca.i-addown` /
//! `.dca.i-adup`) run the same toggle over every control in their named
//! scope. Rows live anywhere in the document, so cascade application is
//! document-wide even when binding a fragment.

use std::rc::Rc;

use web_sys::Element;

use tabula_state::{Disclosure, GroupId};

use crate::App;
use crate::dom;

pub fn bind_group_controls(app: &Rc<App>, root: &Element) {
    app.bags.groups.detach_within(root);

    // Rows the renderer marks default-hidden start hidden.
    for el in dom::query_all(root, ".hide") {
        dom::hide(&el);
    }

    for control in dom::query_all(root, ".dc.i-cdown") {
        let state = Rc::clone(app);
        let me = control.clone();
        app.bags.groups.attach(&control, "click", move |event| {
            event.prevent_default();
            toggle(&state, &me, Disclosure::Open);
        });
    }
    for control in dom::query_all(root, ".dc.i-cup") {
        let state = Rc::clone(app);
        let me = control.clone();
        app.bags.groups.attach(&control, "click", move |event| {
            event.prevent_default();
            toggle(&state, &me, Disclosure::Closed);
        });
    }

    for bulk in dom::query_all(root, ".dca.i-addown") {
        let state = Rc::clone(app);
        let me = bulk.clone();
        app.bags.groups.attach(&bulk, "click", move |event| {
            event.prevent_default();
            toggle_scope(&state, &me, Disclosure::Open);
        });
    }
    for bulk in dom::query_all(root, ".dca.i-adup") {
        let state = Rc::clone(app);
        let me = bulk.clone();
        app.bags.groups.attach(&bulk, "click", move |event| {
            event.prevent_default();
            toggle_scope(&state, &me, Disclosure::Closed);
        });
    }

    // Controls whose group was left open replay their cascade, restoring
    // deep-expanded trees across reloads.
    for control in dom::query_all(root, ".dc.i-cdown") {
        let Some(gid) = control.get_attribute("gid").map(GroupId::new) else {
            continue;
        };
        if app.disclosure.group(&gid).is_open() {
            toggle(app, &control, Disclosure::Open);
        }
    }
}

/// Flip one group's control pair and run its cascade. A control that is
/// already hidden means the pair already shows the requested direction:
/// nothing happens.
fn toggle(app: &Rc<App>, control: &Element, intent: Disclosure) {
    let Some(gid) = control.get_attribute("gid").map(GroupId::new) else {
        return;
    };
    if dom::is_hidden(control) {
        return;
    }

    dom::hide(control);
    let inverse = match intent {
        Disclosure::Open => "i-cup",
        Disclosure::Closed => "i-cdown",
    };
    for other in dom::query_document_all(&format!("a[gid=\"{gid}\"].dc.{inverse}")) {
        dom::show(&other);
    }

    app.groups.borrow_mut().record_touch(gid.clone(), intent);
    app.disclosure.set_group(&gid, intent);

    let plan = match intent {
        Disclosure::Open => app.groups.borrow().open_plan(&gid),
        Disclosure::Closed => app.groups.borrow().close_plan(&gid),
    };
    for member in &plan {
        for row in dom::query_document_all(&format!("tr[gid=\"{member}\"].dd")) {
            match intent {
                Disclosure::Open => dom::show(&row),
                Disclosure::Closed => dom::hide(&row),
            }
        }
    }
}

/// Apply `toggle` to every per-group control inside the bulk control's
/// named scope.
fn toggle_scope(app: &Rc<App>, bulk: &Element, intent: Disclosure) {
    let Some(scope) = bulk.get_attribute("gn") else {
        return;
    };
    let direction = match intent {
        Disclosure::Open => "i-cdown",
        Disclosure::Closed => "i-cup",
    };
    for control in dom::query_document_all(&format!(".c-{scope} a.dc.{direction}")) {
        toggle(app, &control, intent);
    }
}

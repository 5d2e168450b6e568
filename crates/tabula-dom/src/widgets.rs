//! Per-type widget operations: activation wiring and candidate reads.
//!
//! The renderer declares each editable value's widget type in markup; the
//! registry maps that declaration to a handler. A declaration nothing is
//! registered for is a contract break and fails loudly (`UnknownWidget`)
//! instead of being skipped.

use std::collections::HashMap;
use std::rc::Rc;

use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlTextAreaElement};

use tabula_state::field::{Candidate, collect_multi};
use tabula_state::{Error, FieldAction, FieldKey};

use crate::App;
use crate::{dom, editor};

/// Everything a widget needs to wire one field's interactive elements.
pub struct WidgetContext {
    pub app: Rc<App>,
    pub field: FieldKey,
    /// The fragment destination a triggered save replaces.
    pub parent: Element,
    /// The element carrying the baseline and the widget declaration.
    pub value_el: Element,
    /// The value-carrier elements the candidate is read from.
    pub targets: Vec<Element>,
}

pub trait Widget {
    /// Wire each interactive sub-control so changing it recomputes
    /// dirtiness and triggers edit/save. Prior bindings on the subtree
    /// must be detached first; a fragment may be re-activated repeatedly.
    fn activate(&self, cx: WidgetContext) -> Result<(), Error>;

    /// Extract one candidate value from one carrier element.
    fn read(&self, el: &Element) -> Candidate;

    /// Extract the full candidate set. The default maps `read` over every
    /// carrier and drops empty results.
    fn read_multiple(&self, els: &[Element]) -> Candidate {
        collect_multi(els.iter().map(|el| self.read(el)))
    }

    /// Whether multi-value comparison collapses this widget's reads
    /// specially (the relation widget).
    fn collapse_multiple(&self) -> bool {
        false
    }
}

/// Widget-type table, filled with the built-in variants and open to
/// embedder registration.
pub struct WidgetRegistry {
    handlers: HashMap<String, Box<dyn Widget>>,
}

impl WidgetRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register("text", Box::new(TextWidget));
        registry.register("markdown", Box::new(TextWidget));
        registry.register("bool", Box::new(BoolWidget));
        registry.register("related", Box::new(RelatedWidget));
        registry
    }

    pub fn register(&mut self, kind: impl Into<String>, widget: Box<dyn Widget>) {
        self.handlers.insert(kind.into(), widget);
    }

    pub fn lookup(&self, kind: &str) -> Result<&dyn Widget, Error> {
        self.handlers
            .get(kind)
            .map(Box::as_ref)
            .ok_or_else(|| Error::UnknownWidget(kind.to_string()))
    }
}

/// Plain text inputs and textareas; also serves the markdown variant,
/// which differs only in rendering.
pub struct TextWidget;

impl Widget for TextWidget {
    fn activate(&self, _cx: WidgetContext) -> Result<(), Error> {
        // The editor's own keyup/blur wiring is all a text input needs.
        Ok(())
    }

    fn read(&self, el: &Element) -> Candidate {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            return json!(input.value());
        }
        if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            return json!(area.value());
        }
        Candidate::Null
    }
}

/// A fixed choice set of which exactly one may be active.
pub struct BoolWidget;

impl Widget for BoolWidget {
    fn activate(&self, cx: WidgetContext) -> Result<(), Error> {
        cx.app.bags.widgets.detach_within(&cx.value_el);
        for target in &cx.targets {
            let choices = dom::query_all(target, "[bool]");
            for icon in dom::query_all(target, ".icon") {
                let app = Rc::clone(&cx.app);
                let field = cx.field.clone();
                let parent = cx.parent.clone();
                let choices = choices.clone();
                let me = icon.clone();
                cx.app.bags.widgets.attach(&icon, "click", move |_| {
                    for choice in &choices {
                        let _ = choice.class_list().remove_1("active");
                    }
                    let _ = me.class_list().add_1("active");
                    editor::submit(&app, &field, FieldAction::Edit, &parent, None);
                });
            }
        }
        Ok(())
    }

    fn read(&self, el: &Element) -> Candidate {
        let active = dom::query(el, ".active");
        match active.and_then(|choice| choice.get_attribute("bool")).as_deref() {
            Some("true") => json!(true),
            Some("false") => json!(false),
            _ => Candidate::Null,
        }
    }
}

/// Selection from a fixed candidate list of labeled options, single- or
/// multi-valued, with an optional persisted filter and, when extensible,
/// an add-new affordance for filter text that matches nothing.
pub struct RelatedWidget;

impl Widget for RelatedWidget {
    fn activate(&self, cx: WidgetContext) -> Result<(), Error> {
        let multiple = cx.value_el.has_attribute("multiple");
        let extensible = cx.value_el.has_attribute("extensible");
        cx.app.bags.widgets.detach_within(&cx.value_el);

        for target in &cx.targets {
            let options = dom::query_all(target, "[lab]");

            for button in dom::query_all(target, ".button,.task") {
                let app = Rc::clone(&cx.app);
                let field = cx.field.clone();
                let parent = cx.parent.clone();
                let options = options.clone();
                let me = button.clone();
                cx.app.bags.widgets.attach(&button, "click", move |_| {
                    if multiple {
                        let active = me.class_list().contains("active");
                        if active {
                            let _ = me.class_list().remove_1("active");
                        } else {
                            let _ = me.class_list().add_1("active");
                        }
                    } else {
                        for option in &options {
                            let _ = option.class_list().remove_1("active");
                        }
                        let _ = me.class_list().add_1("active");
                    }
                    editor::submit(&app, &field, FieldAction::Edit, &parent, None);
                });
            }

            let Some(filter_control) = dom::query(target, "input.wfilter") else {
                continue;
            };
            let clear = dom::query(target, ".icon.wfilter.clear");
            let add = dom::query(target, ".icon.wfilter.add");

            let previous = cx.app.disclosure.filter_text(&cx.field);
            if let Some(input) = filter_control.dyn_ref::<HtmlInputElement>() {
                input.set_value(&previous);
            }
            filter_options(&options, &previous, clear.as_ref(), add.as_ref(), extensible);

            {
                let app = Rc::clone(&cx.app);
                let field = cx.field.clone();
                let options = options.clone();
                let clear = clear.clone();
                let add = add.clone();
                let control = filter_control.clone();
                cx.app.bags.widgets.attach(&filter_control, "keyup", move |_| {
                    let Some(input) = control.dyn_ref::<HtmlInputElement>() else {
                        return;
                    };
                    let current = input.value();
                    app.disclosure.set_filter_text(&field, &current);
                    filter_options(&options, &current, clear.as_ref(), add.as_ref(), extensible);
                });
            }

            if let Some(clear_control) = &clear {
                let app = Rc::clone(&cx.app);
                let field = cx.field.clone();
                let options = options.clone();
                let clear = clear.clone();
                let add = add.clone();
                let control = filter_control.clone();
                cx.app.bags.widgets.attach(clear_control, "click", move |_| {
                    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
                        input.set_value("");
                    }
                    app.disclosure.set_filter_text(&field, "");
                    filter_options(&options, "", clear.as_ref(), add.as_ref(), extensible);
                });
            }

            if let Some(add_control) = &add {
                let app = Rc::clone(&cx.app);
                let field = cx.field.clone();
                let parent = cx.parent.clone();
                let control = filter_control.clone();
                cx.app.bags.widgets.attach(add_control, "click", move |_| {
                    let Some(input) = control.dyn_ref::<HtmlInputElement>() else {
                        return;
                    };
                    let entry = input.value();
                    if extensible && !entry.is_empty() {
                        editor::submit(&app, &field, FieldAction::Edit, &parent, Some(entry.as_str()));
                    }
                });
            }
        }
        Ok(())
    }

    fn read(&self, el: &Element) -> Candidate {
        match dom::query(el, ".active").and_then(|active| active.get_attribute("eid")) {
            Some(eid) => json!(eid),
            None => Candidate::Null,
        }
    }

    fn read_multiple(&self, els: &[Element]) -> Candidate {
        let ids: Vec<Candidate> = els
            .iter()
            .flat_map(|el| dom::query_all(el, ".active"))
            .filter_map(|active| active.get_attribute("eid"))
            .map(|eid| json!(eid))
            .collect();
        Candidate::Array(ids)
    }

    fn collapse_multiple(&self) -> bool {
        true
    }
}

/// Show only the options whose label contains the filter text
/// (case-insensitively); surface the clear affordance whenever a filter is
/// active and the add affordance when an extensible list has no match
/// left.
fn filter_options(
    options: &[Element],
    pattern: &str,
    clear: Option<&Element>,
    add: Option<&Element>,
    extensible: bool,
) {
    if pattern.is_empty() {
        options.iter().for_each(dom::show);
        if let Some(clear) = clear {
            dom::hide(clear);
        }
        if let Some(add) = add {
            dom::hide(add);
        }
        return;
    }

    let pattern = pattern.to_lowercase();
    let mut remaining = 0;
    for option in options {
        let label = option.get_attribute("lab").unwrap_or_default().to_lowercase();
        if label.contains(&pattern) {
            dom::show(option);
            remaining += 1;
        } else {
            dom::hide(option);
        }
    }
    if let Some(clear) = clear {
        dom::show(clear);
    }
    if let Some(add) = add {
        if extensible && remaining == 0 {
            dom::show(add);
        } else {
            dom::hide(add);
        }
    }
}

//! Browser binder for the Tabula client.
//!
//! The server renders whole pages and, later, fragments of them; this crate
//! walks the markup, wires its controls to the state layer in
//! `tabula-state`, and swaps fragments in place when the server answers.
//! Every binder is re-entrant: after a fragment replaces a subtree, running
//! the binders over the new subtree detaches whatever handlers survived the
//! swap before attaching fresh ones.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;

use tabula_state::{DisclosureStore, FieldKey, GroupHierarchy, GroupId};

pub mod cfilter;
pub mod console;
pub mod disclosure;
pub mod dom;
pub mod editor;
pub mod fetcher;
pub mod flash;
pub mod groups;
pub mod options;
pub mod panels;
pub mod storage;
pub mod widgets;

use dom::ListenerBag;
use storage::LocalStorage;
use widgets::WidgetRegistry;

/// One listener registry per binder, so rebinding one concern over a
/// subtree never drops another concern's fresh handlers.
#[derive(Default)]
pub struct Bags {
    pub disclosure: ListenerBag,
    pub panels: ListenerBag,
    pub groups: ListenerBag,
    pub actions: ListenerBag,
    pub widgets: ListenerBag,
    pub lazy: ListenerBag,
    pub options: ListenerBag,
    pub cfilter: ListenerBag,
}

/// The page-lifetime service container the binders share.
///
/// Everything that used to be ambient page state (the durable store, the
/// group forest and its touched record, the widget table, the
/// press-before-click suppress flags) lives here and is passed into the
/// binders explicitly.
pub struct App {
    pub disclosure: DisclosureStore<Rc<LocalStorage>>,
    pub groups: RefCell<GroupHierarchy>,
    pub widgets: WidgetRegistry,
    /// Fields whose next blur-triggered commit is owned by a pressed
    /// toggle control. Set on press, consumed by blur, cleared by click.
    pub suppress: RefCell<HashSet<FieldKey>>,
    pub bags: Bags,
}

impl App {
    pub fn new() -> Rc<Self> {
        let store = Rc::new(LocalStorage::new());
        Rc::new(Self {
            disclosure: DisclosureStore::new(store),
            groups: RefCell::new(GroupHierarchy::new(group_map_from_global())),
            widgets: WidgetRegistry::with_defaults(),
            suppress: RefCell::new(HashSet::new()),
            bags: Bags::default(),
        })
    }

    /// Bind the whole document once the page is up.
    pub fn bind_document(self: &Rc<Self>) {
        let root = dom::body();
        panels::bind_panels(self, &root);
        disclosure::bind_disclosures(self, &root);
        fetcher::bind_lazy_fragments(self, &root);
        editor::bind_field_actions(self, &root);
        if let Some(sidebar) = dom::query(&root, "#sidebar") {
            options::bind_option_panel(self, &sidebar);
        }
        cfilter::bind_contributor_filter(self, &root);
        groups::bind_group_controls(self, &root);
    }
}

/// The renderer inlines the GroupId → children forest as the `groupRel`
/// global. A missing global means the page has no groups; a malformed one
/// is reported and treated as empty.
fn group_map_from_global() -> HashMap<GroupId, Vec<GroupId>> {
    let value = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("groupRel"))
        .unwrap_or(JsValue::UNDEFINED);
    if value.is_undefined() || value.is_null() {
        return HashMap::new();
    }
    match serde_wasm_bindgen::from_value(value) {
        Ok(map) => map,
        Err(err) => {
            console::error(&format!("groupRel global is malformed: {err}"));
            HashMap::new()
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    App::new().bind_document();
}

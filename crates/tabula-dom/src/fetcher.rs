//! Fragment fetching, in-place replacement, and re-entrant rebinding.
//!
//! Requests are never queued, coalesced, or cancelled; each completion
//! replaces its destination's children and re-runs the binders over the
//! new subtree. A failed fetch changes nothing, since there was no optimistic
//! update to roll back.

use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Element, HtmlDetailsElement, Request, RequestInit, Response};

use tabula_state::Error;

use crate::{App, console, disclosure, dom, editor, flash, groups, panels};

/// Fetch a field fragment into `dest`. `body` turns the request into a
/// POST carrying the save payload; `task` names the action for the flash
/// bar; `None` means an internal call that must stay silent.
pub fn fetch_fragment(
    app: &Rc<App>,
    url: String,
    dest: Element,
    body: Option<String>,
    task: Option<String>,
) {
    let app = Rc::clone(app);
    spawn_local(async move {
        match request(&url, body).await {
            Ok(html) => insert_fragment(&app, &dest, &html, task.as_deref(), None),
            Err(err) => report(&url, task.as_deref(), &err),
        }
    });
}

/// Fetch a detail fragment into `dest`: always GET, silent, and wrapped
/// once by the renderer.
pub fn fetch_detail(
    app: &Rc<App>,
    url: String,
    dest: Element,
    force_open: bool,
    tag: Option<String>,
) {
    let app = Rc::clone(app);
    spawn_local(async move {
        match request(&url, None).await {
            Ok(html) => {
                insert_fragment(&app, &dest, &html, None, Some(DetailTarget { force_open, tag }))
            }
            Err(err) => report(&url, None, &err),
        }
    });
}

struct DetailTarget {
    force_open: bool,
    tag: Option<String>,
}

fn report(url: &str, task: Option<&str>, err: &Error) {
    console::error(&format!("fetch {url}: {err}"));
    if let Some(task) = task {
        flash::error(task, &err.to_string());
    }
}

fn insert_fragment(
    app: &Rc<App>,
    dest: &Element,
    html: &str,
    task: Option<&str>,
    detail: Option<DetailTarget>,
) {
    dest.set_inner_html(html);
    rebind(app, dest);
    if let Some(task) = task {
        flash::success(task);
    }

    let Some(DetailTarget { force_open, tag }) = detail else {
        return;
    };
    // Detail fragments arrive wrapped once; splice the real root into the
    // tree before routing the scroll.
    let mut target = dest.clone();
    if let (Some(child), Some(parent)) = (dest.first_element_child(), dest.parent_node()) {
        if parent.replace_child(child.as_ref(), dest.as_ref()).is_ok() {
            target = child;
        }
    }
    if !force_open {
        return;
    }
    let scroll_target = tag
        .and_then(|tag| {
            let item_key = target.get_attribute("itemkey")?;
            dom::query_document(&format!("[targetkey=\"{item_key}\"][tag=\"{tag}\"]"))
        })
        .unwrap_or(target);
    scroll_target.scroll_into_view_with_bool(true);
}

/// Re-run every binder a fragment can need over its new subtree.
pub fn rebind(app: &Rc<App>, root: &Element) {
    panels::bind_panels(app, root);
    disclosure::bind_disclosures(app, root);
    bind_lazy_fragments(app, root);
    editor::bind_field_actions(app, root);
    if dom::query(root, ".dc").is_some() {
        groups::bind_group_controls(app, root);
    }
}

/// Wire subtrees that declare a fetch URL to load when their disclosure
/// opens, or, for content the renderer already inlined (`fat`), to
/// unload when it closes. The trigger element is consumed before the
/// fetch, so each subtree fetches at most once per page lifetime.
pub fn bind_lazy_fragments(app: &Rc<App>, root: &Element) {
    app.bags.lazy.detach_within(root);
    for el in dom::query_all(root, "[fetchurl]") {
        let inlined = el.has_attribute("fat");
        let state = Rc::clone(app);
        let me = el.clone();
        app.bags.lazy.attach(&el, "toggle", move |_| {
            let open = me
                .dyn_ref::<HtmlDetailsElement>()
                .is_some_and(HtmlDetailsElement::open);
            if open != inlined {
                fetch_detail_open(&state, &me, None);
            }
        });
    }
}

/// Swap a lazy trigger for an empty destination and fetch its subtree.
pub fn fetch_detail_open(app: &Rc<App>, el: &Element, tag: Option<&str>) {
    let force_open = el.has_attribute("forceopen");
    let fetch_url = el.get_attribute("fetchurl").unwrap_or_default();
    let url_title = el.get_attribute("urltitle").unwrap_or_default();
    let url_extra = el.get_attribute("urlextra").unwrap_or_default();
    let url = if tag.is_some() {
        format!("{fetch_url}{url_extra}")
    } else {
        format!("{fetch_url}{url_title}{url_extra}")
    };

    let Ok(wrapper) = dom::document().create_element("div") else {
        return;
    };
    let Some(parent) = el.parent_node() else {
        return;
    };
    if parent.replace_child(wrapper.as_ref(), el.as_ref()).is_err() {
        return;
    }
    fetch_detail(app, url, wrapper, force_open, tag.map(str::to_string));
}

/// The refresh action: re-fetch the subtree named by the control's target
/// key, forcing it open; with no target key, reload the page.
pub fn refresh(app: &Rc<App>, el: &Element) {
    match el.get_attribute("targetkey") {
        Some(target_key) => {
            let Some(target) = dom::query_document(&format!("[itemkey=\"{target_key}\"]")) else {
                return;
            };
            let _ = target.set_attribute("fat", "");
            let _ = target.set_attribute("forceopen", "1");
            let tag = el.get_attribute("tag");
            fetch_detail_open(app, &target, tag.as_deref());
        }
        None => {
            let location = dom::window().location();
            if let Ok(href) = location.href() {
                let _ = location.set_href(&href);
            }
        }
    }
}

async fn request(url: &str, body: Option<String>) -> Result<String, Error> {
    let init = RequestInit::new();
    match &body {
        Some(payload) => {
            init.set_method("POST");
            init.set_body(&JsValue::from_str(payload));
        }
        None => init.set_method("GET"),
    }
    let request =
        Request::new_with_str_and_init(url, &init).map_err(|err| js_error("request", err))?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|err| js_error("headers", err))?;
    }

    let response = JsFuture::from(dom::window().fetch_with_request(&request))
        .await
        .map_err(|err| js_error("network", err))?;
    let response: Response = response
        .dyn_into()
        .map_err(|err| js_error("response", err))?;
    if !response.ok() {
        return Err(Error::Fetch(format!(
            "{} {}",
            response.status(),
            response.status_text()
        )));
    }
    let text = JsFuture::from(response.text().map_err(|err| js_error("body", err))?)
        .await
        .map_err(|err| js_error("body", err))?;
    Ok(text.as_string().unwrap_or_default())
}

fn js_error(stage: &str, value: JsValue) -> Error {
    Error::Fetch(format!("{stage}: {value:?}"))
}

//! Transient notifications in the page's message bar.

use crate::dom;

pub fn success(task: &str) {
    render(task, None);
}

pub fn error(task: &str, detail: &str) {
    render(task, Some(detail));
}

fn render(task: &str, error: Option<&str>) {
    let Some(msgbar) = dom::query_document("#msgbar") else {
        return;
    };
    let (status, class) = match error {
        Some(detail) => (detail, "error"),
        None => ("succeeded", "message"),
    };
    msgbar.set_inner_html(&format!(
        r#"<div class="msgitem {class}">&lt;{task}&gt; {status}</div>"#
    ));
}

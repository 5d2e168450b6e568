use thiserror::Error;

/// Errors surfaced by the state layer and its DOM binders.
#[derive(Debug, Error)]
pub enum Error {
    /// Markup declared a widget type that nothing registered a handler for.
    /// This is a renderer/client contract break, so it is loud instead of
    /// being skipped.
    #[error("no widget registered for type `{0}`")]
    UnknownWidget(String),

    /// The baseline attribute was not valid base64.
    #[error("baseline attribute is not valid base64: {0}")]
    BaselineEncoding(#[from] base64::DecodeError),

    /// The baseline attribute decoded to non-UTF-8 bytes.
    #[error("baseline attribute is not valid UTF-8: {0}")]
    BaselineUtf8(#[from] std::string::FromUtf8Error),

    #[error("value serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An element is missing an attribute the renderer contract requires.
    #[error("markup contract violation: {0}")]
    Markup(String),

    #[error("fragment fetch failed: {0}")]
    Fetch(String),
}

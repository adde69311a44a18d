//! Output renderers for Markdown and JSON.

pub(crate) mod json;
pub(crate) mod markdown;

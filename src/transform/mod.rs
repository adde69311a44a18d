//! Transform adapters from upstream API shapes into CLI-facing display models.

pub(crate) mod label;

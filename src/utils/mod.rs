//! Internal utility helpers for query escaping.

pub(crate) mod query;

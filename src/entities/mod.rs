//! Entity-level lookup workflows used by the CLI.

pub(crate) mod drug;

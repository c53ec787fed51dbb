//! Corner candidates: the reusable candidate list and top-N pruning.

pub(crate) mod list;
pub(crate) mod select;

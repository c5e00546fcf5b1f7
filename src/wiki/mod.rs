// src/wiki/mod.rs
//! Knowledge-space (wiki) reads.
//!
//! A wiki node wraps another resource (`obj_type` + `obj_token`). Reading a
//! node resolves that resource through the reader dispatch and expands the
//! node's children down to a depth bound. Failures are recorded on the node
//! they belong to and never abort the rest of the traversal.

mod traversal;

pub use traversal::WikiTraversal;

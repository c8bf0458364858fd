//! # Repository Module
//!
//! Database repositories for the record store.
//!
//! The store has a single table, so there is a single repository:
//!
//! - [`kv::KvRepository`] - get / put / remove of JSON values by key

pub mod kv;

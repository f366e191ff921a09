//! Per-kind check implementations.
//!
//! Each submodule owns one family of nodes: its payload type (where it has
//! one), how it checks a value, and how it lifts nested failures onto the
//! access path that led to them.
pub mod annotate;
pub mod array;
pub mod dict;
pub mod either;
pub mod intersect;
pub mod map;
pub mod primitives;
pub mod record;
pub mod set;

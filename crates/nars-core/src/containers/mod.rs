//! # Priority Containers
//!
//! Bounded storage primitives the knowledge store is built from:
//! - [`Bag`]: probabilistic priority store with bucketed sampling and eviction
//! - [`Buffer`]: max-priority queue
//! - [`Table`]: confidence-ordered sentence store that revises on insert
//!
//! None of them grows past its capacity; overflow evicts silently.

pub mod bag;
pub mod buffer;
pub mod item;
pub mod table;

pub use bag::Bag;
pub use buffer::Buffer;
pub use item::{Budget, Item};
pub use table::Table;

//! Application-level use cases.
//!
//! # Responsibility
//! - Own the entity store, live collections, relational views and signal
//!   hub as one unit.
//! - Run every mutation through the same settle pipeline so views never
//!   observe a half-applied change.
//! - Implement draft checkout and commit.

mod shopping_list;

pub use shopping_list::ShoppingList;

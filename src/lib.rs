// Copyright 2025 Cowboy AI, LLC.

//! # CIM Category
//!
//! A composable, three-state classification algebra for the Composable
//! Information Machine.
//!
//! Domain objects ("subjects") are tagged by named predicates. Each
//! evaluation answers with either the Null category (`∅`, no match) or the
//! category that matched, and categories combine into composites that
//! remember their own structure:
//! - **Category**: shared handle with a name, equality and the `&` / `^` operators
//! - **NullCategory**: the "no match" element
//! - **CompositeCategory**: two operands joined by AND, OR or XOR
//! - **Predicate**: the trait leaf categorizers implement
//! - **InstanceCache**: memoizing facade for expensive leaf computations
//!
//! ## Design Principles
//!
//! 1. **Shape preservation**: a collection of subjects yields one result per subject, in order
//! 2. **Structural equality**: composites compare equal under operand swap
//! 3. **Lazy naming**: composite names are built on first read and kept
//! 4. **Single-threaded**: handles are `Rc`-shared and caches use `RefCell`

#![warn(missing_docs)]

pub mod category;
mod errors;
pub mod instance_cache;

pub use category::{
    Category, CategoryContext, CategoryKind, Combinator, CompositeCategory, NullCategory,
    Predicate,
};
pub use errors::{CategoryError, CategoryResult};
pub use instance_cache::{CacheInfo, CacheSizePolicy, InstanceCache};

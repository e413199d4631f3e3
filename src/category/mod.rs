// Copyright 2025 Cowboy AI, LLC.

//! Three-state classification algebra
//!
//! Subjects are categorized by named predicates. Each evaluation yields
//! either the Null category ("∅", no match) or a category that matched,
//! and categories compose with AND (`&`), XOR (`^`) and OR (by direct
//! construction) into composites that remember how they were built.
//!
//! ```
//! use cim_category::{Category, CategoryContext, CategoryResult, CompositeCategory, Predicate};
//!
//! #[derive(Debug, PartialEq)]
//! struct Multiple(u32);
//!
//! impl Predicate<u32> for Multiple {
//!     fn name(&self) -> String {
//!         format!("x{}", self.0)
//!     }
//!
//!     fn matches(&self, n: &u32, _context: &CategoryContext) -> CategoryResult<bool> {
//!         Ok(n % self.0 == 0)
//!     }
//! }
//!
//! let two: Category<u32> = Category::leaf(Multiple(2));
//! let three: Category<u32> = Category::leaf(Multiple(3));
//! let six = &two & &three;
//! assert_eq!(six.name(), "x2 & x3");
//!
//! let either: Category<u32> = CompositeCategory::or(two.clone(), three).into();
//! let context = CategoryContext::new();
//! let results = either.categorize_all(&[4, 5, 6], &context).unwrap();
//! assert!(results[0] == two);
//! assert!(results[1].is_null());
//! assert!(results[2].same_instance(&either));
//! ```

pub mod base;
pub mod composite;
pub mod context;
pub mod null;
pub mod predicate;

pub use base::{Category, CategoryKind};
pub use composite::{Combinator, CompositeCategory};
pub use context::CategoryContext;
pub use null::NullCategory;
pub use predicate::Predicate;

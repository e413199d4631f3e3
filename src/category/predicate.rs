// Copyright 2025 Cowboy AI, LLC.

//! Leaf predicates
//!
//! A leaf is any type implementing [`Predicate`]. Wrapped in a
//! [`Category`](super::Category) it answers with itself when a subject
//! matches and with a fresh Null otherwise.

use std::any::Any;
use std::fmt;

use super::context::CategoryContext;
use crate::errors::CategoryResult;

/// A named test over subjects of type `S`
///
/// Two leaves are equal when they have the same concrete type and the type's
/// own `PartialEq` says their parameters agree.
pub trait Predicate<S>: fmt::Debug + 'static {
    /// Display name of the predicate (defaults to the type's short name)
    fn name(&self) -> String {
        short_type_name::<Self>().to_string()
    }

    /// Does `subject` satisfy this predicate?
    fn matches(&self, subject: &S, context: &CategoryContext) -> CategoryResult<bool>;

    /// Evaluate a whole collection, one answer per subject in the same order
    ///
    /// Override when the predicate can be evaluated more cheaply in bulk.
    fn matches_all(&self, subjects: &[S], context: &CategoryContext) -> CategoryResult<Vec<bool>> {
        subjects
            .iter()
            .map(|subject| self.matches(subject, context))
            .collect()
    }
}

/// Object-safe view over a [`Predicate`] that also knows how to compare itself
pub(crate) trait DynPredicate<S>: fmt::Debug {
    fn name(&self) -> String;
    fn matches(&self, subject: &S, context: &CategoryContext) -> CategoryResult<bool>;
    fn matches_all(&self, subjects: &[S], context: &CategoryContext) -> CategoryResult<Vec<bool>>;
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn DynPredicate<S>) -> bool;
}

impl<S, P> DynPredicate<S> for P
where
    P: Predicate<S> + PartialEq,
{
    fn name(&self) -> String {
        Predicate::name(self)
    }

    fn matches(&self, subject: &S, context: &CategoryContext) -> CategoryResult<bool> {
        Predicate::matches(self, subject, context)
    }

    fn matches_all(&self, subjects: &[S], context: &CategoryContext) -> CategoryResult<Vec<bool>> {
        Predicate::matches_all(self, subjects, context)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynPredicate<S>) -> bool {
        other
            .as_any()
            .downcast_ref::<P>()
            .is_some_and(|other| self == other)
    }
}

/// Last path segment of a type name, without generic arguments
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

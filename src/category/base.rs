// Copyright 2025 Cowboy AI, LLC.

//! The `Category` handle: identity, equality and composition
//!
//! A [`Category`] is a cheaply cloneable, shared handle over one of three
//! node kinds: the Null category, a leaf wrapping a [`Predicate`], or a
//! [`CompositeCategory`]. Categorizing a subject yields another handle:
//! either a fresh Null or the category (possibly a composite) that matched.

use std::cell::RefCell;
use std::fmt::{self, Display, Formatter};
use std::ops::{BitAnd, BitXor};
use std::rc::Rc;

use tracing::{trace, warn};

use super::composite::{ensure_shape, Combinator, CompositeCategory};
use super::context::CategoryContext;
use super::null::NullCategory;
use super::predicate::{DynPredicate, Predicate};
use crate::errors::CategoryResult;

/// Which kind of node a [`Category`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    /// The "no match" element
    Null,
    /// A predicate evaluated directly
    Leaf,
    /// Composite joined by AND
    And,
    /// Composite joined by OR
    Or,
    /// Composite joined by XOR
    XOr,
}

/// A named predicate over subjects of type `S`, or a combination of them
///
/// Cloning shares the underlying node; composites retain their operands the
/// same way, so one category may appear in many expressions.
pub struct Category<S> {
    node: Rc<Node<S>>,
}

enum Node<S> {
    Null(NullCategory),
    Leaf(LeafCategory<S>),
    Composite(CompositeCategory<S>),
}

struct LeafCategory<S> {
    name: RefCell<String>,
    predicate: Box<dyn DynPredicate<S>>,
}

impl<S> Category<S> {
    /// Wrap a leaf predicate
    pub fn leaf<P>(predicate: P) -> Self
    where
        P: Predicate<S> + PartialEq,
    {
        let predicate: Box<dyn DynPredicate<S>> = Box::new(predicate);
        Self::from_node(Node::Leaf(LeafCategory {
            name: RefCell::new(predicate.name()),
            predicate,
        }))
    }

    /// A fresh Null category
    pub fn null() -> Self {
        Self::from_node(Node::Null(NullCategory))
    }

    fn from_node(node: Node<S>) -> Self {
        Self {
            node: Rc::new(node),
        }
    }

    /// The kind of node behind this handle
    pub fn kind(&self) -> CategoryKind {
        match &*self.node {
            Node::Null(_) => CategoryKind::Null,
            Node::Leaf(_) => CategoryKind::Leaf,
            Node::Composite(composite) => match composite.combinator() {
                Combinator::And => CategoryKind::And,
                Combinator::Or => CategoryKind::Or,
                Combinator::XOr => CategoryKind::XOr,
            },
        }
    }

    /// True for the "no match" element
    pub fn is_null(&self) -> bool {
        matches!(&*self.node, Node::Null(_))
    }

    /// True for anything but Null
    pub fn is_match(&self) -> bool {
        !self.is_null()
    }

    /// The composite behind this handle, if it is one
    pub fn as_composite(&self) -> Option<&CompositeCategory<S>> {
        match &*self.node {
            Node::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    /// Do both handles point at the very same node?
    pub fn same_instance(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    /// Name of the category
    pub fn name(&self) -> String {
        match &*self.node {
            Node::Null(null) => null.name().to_string(),
            Node::Leaf(leaf) => leaf.name.borrow().clone(),
            Node::Composite(composite) => composite.name(),
        }
    }

    /// Relabel the category without changing what it matches
    ///
    /// Every handle sharing this node sees the new name. The Null category
    /// keeps its fixed name.
    pub fn set_name(&self, name: impl Into<String>) {
        let name = name.into();
        match &*self.node {
            Node::Null(_) => warn!(name = %name, "ignoring rename of the Null category"),
            Node::Leaf(leaf) => *leaf.name.borrow_mut() = name,
            Node::Composite(composite) => composite.set_name(name),
        }
    }

    /// Categorize a single subject
    pub fn categorize(&self, subject: &S, context: &CategoryContext) -> CategoryResult<Self> {
        match &*self.node {
            Node::Null(_) => Ok(self.clone()),
            Node::Leaf(leaf) => {
                let matched = leaf.predicate.matches(subject, context)?;
                trace!(category = %leaf.name.borrow(), matched, "categorized subject");
                Ok(self.leaf_outcome(matched))
            }
            Node::Composite(composite) => {
                let (a, b) = composite.categorize_operands(subject, context)?;
                Ok(composite.combinator().combine(self, a, b))
            }
        }
    }

    /// Categorize every subject, one result per subject in the same order
    ///
    /// Each element equals what [`categorize`](Self::categorize) returns for
    /// that subject alone.
    pub fn categorize_all(
        &self,
        subjects: &[S],
        context: &CategoryContext,
    ) -> CategoryResult<Vec<Self>> {
        match &*self.node {
            Node::Null(_) => Ok(vec![self.clone(); subjects.len()]),
            Node::Leaf(leaf) => {
                let matched = leaf.predicate.matches_all(subjects, context)?;
                ensure_shape(subjects.len(), matched.len())?;
                trace!(
                    category = %leaf.name.borrow(),
                    subjects = subjects.len(),
                    matched = matched.iter().filter(|m| **m).count(),
                    "categorized subjects"
                );
                Ok(matched
                    .into_iter()
                    .map(|matched| self.leaf_outcome(matched))
                    .collect())
            }
            Node::Composite(composite) => {
                let (a, b) = composite.categorize_operands_all(subjects, context)?;
                let combinator = composite.combinator();
                Ok(a.into_iter()
                    .zip(b)
                    .map(|(a, b)| combinator.combine(self, a, b))
                    .collect())
            }
        }
    }

    fn leaf_outcome(&self, matched: bool) -> Self {
        if matched {
            self.clone()
        } else {
            Self::null()
        }
    }

    /// `self & other`
    pub fn combine_and(&self, other: &Self) -> Self {
        CompositeCategory::and(self.clone(), other.clone()).into()
    }

    /// `self ⊕ other`
    pub fn combine_xor(&self, other: &Self) -> Self {
        CompositeCategory::xor(self.clone(), other.clone()).into()
    }

    /// Compare against each element of `others`
    pub fn eq_each(&self, others: &[Self]) -> Vec<bool> {
        others.iter().map(|other| self == other).collect()
    }

    /// Elementwise negation of [`eq_each`](Self::eq_each)
    pub fn ne_each(&self, others: &[Self]) -> Vec<bool> {
        self.eq_each(others).into_iter().map(|eq| !eq).collect()
    }
}

impl<S> Clone for Category<S> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
        }
    }
}

impl<S> From<NullCategory> for Category<S> {
    fn from(_: NullCategory) -> Self {
        Self::null()
    }
}

impl<S> From<CompositeCategory<S>> for Category<S> {
    fn from(composite: CompositeCategory<S>) -> Self {
        Self::from_node(Node::Composite(composite))
    }
}

/// Categories compare by kind and parameters, never by address alone.
///
/// A composite never equals a leaf, Null only equals Null, and leaves must
/// share a concrete type before their own `PartialEq` is consulted.
impl<S> PartialEq for Category<S> {
    fn eq(&self, other: &Self) -> bool {
        match (&*self.node, &*other.node) {
            (Node::Composite(lhs), Node::Composite(rhs)) => lhs == rhs,
            (Node::Null(_), Node::Null(_)) => true,
            (Node::Leaf(lhs), Node::Leaf(rhs)) => lhs.predicate.dyn_eq(rhs.predicate.as_ref()),
            _ => false,
        }
    }
}

impl<S> PartialEq<NullCategory> for Category<S> {
    fn eq(&self, _other: &NullCategory) -> bool {
        self.is_null()
    }
}

impl<S> Display for Category<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&self.name())
    }
}

impl<S> fmt::Debug for Category<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind(), self.name())
    }
}

impl<S> BitAnd for Category<S> {
    type Output = Category<S>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.combine_and(&rhs)
    }
}

impl<S> BitAnd<&Category<S>> for &Category<S> {
    type Output = Category<S>;

    fn bitand(self, rhs: &Category<S>) -> Self::Output {
        self.combine_and(rhs)
    }
}

impl<S> BitXor for Category<S> {
    type Output = Category<S>;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.combine_xor(&rhs)
    }
}

impl<S> BitXor<&Category<S>> for &Category<S> {
    type Output = Category<S>;

    fn bitxor(self, rhs: &Category<S>) -> Self::Output {
        self.combine_xor(rhs)
    }
}

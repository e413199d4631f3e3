// Copyright 2025 Cowboy AI, LLC.

//! Composite categories: two operands plus a combination policy
//!
//! Per-subject outcomes of the two operands are combined as follows
//! ("matched" means "is not Null", `self` is the composite itself):
//!
//! | Combinator | `a` is Null | `b` is Null | both matched |
//! |------------|-------------|-------------|--------------|
//! | AND        | `a`         | `b`         | `self`       |
//! | OR         | `b`         | `a`         | `self`       |
//! | XOR        | `b`         | `a`         | fresh Null   |

use std::cell::RefCell;
use std::fmt::{self, Display, Formatter};

use tracing::debug;

use super::base::Category;
use super::context::CategoryContext;
use crate::errors::{CategoryError, CategoryResult};

/// The logical policy joining the two operands of a composite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Both operands must match
    And,
    /// Either operand may match
    Or,
    /// Exactly one operand may match
    XOr,
}

impl Combinator {
    /// Operator symbol used in composite names
    pub fn symbol(&self) -> &'static str {
        match self {
            Combinator::And => "&",
            Combinator::Or => "|",
            Combinator::XOr => "⊕",
        }
    }

    /// Combine one pair of operand outcomes
    ///
    /// `this` is the composite whose outcomes are being combined; it is what
    /// AND and OR report when both operands matched.
    pub fn combine<S>(self, this: &Category<S>, a: Category<S>, b: Category<S>) -> Category<S> {
        match self {
            Combinator::And => {
                if a.is_null() {
                    a
                } else if b.is_null() {
                    b
                } else {
                    this.clone()
                }
            }
            Combinator::Or => {
                if a.is_null() {
                    b
                } else if b.is_null() {
                    a
                } else {
                    this.clone()
                }
            }
            Combinator::XOr => {
                if a.is_null() {
                    b
                } else if b.is_null() {
                    a
                } else {
                    // both sides matched, so neither is exclusive
                    Category::null()
                }
            }
        }
    }
}

impl Display for Combinator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Two categories joined by a [`Combinator`]
///
/// The operands are shared handles; the composite never mutates them. The
/// display name is computed on first read and then kept, so renaming an
/// operand afterwards does not change it. The cache is a plain `RefCell` and
/// the whole algebra is single-threaded.
pub struct CompositeCategory<S> {
    combinator: Combinator,
    a: Category<S>,
    b: Category<S>,
    name: RefCell<Option<String>>,
}

impl<S> CompositeCategory<S> {
    /// Join `a` and `b` with the given combinator
    pub fn new(combinator: Combinator, a: Category<S>, b: Category<S>) -> Self {
        Self {
            combinator,
            a,
            b,
            name: RefCell::new(None),
        }
    }

    /// `a & b`
    pub fn and(a: Category<S>, b: Category<S>) -> Self {
        Self::new(Combinator::And, a, b)
    }

    /// `a | b`; there is no `|` operator on [`Category`], this is the only way in
    pub fn or(a: Category<S>, b: Category<S>) -> Self {
        Self::new(Combinator::Or, a, b)
    }

    /// `a ⊕ b`
    pub fn xor(a: Category<S>, b: Category<S>) -> Self {
        Self::new(Combinator::XOr, a, b)
    }

    /// The combination policy
    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    /// Left operand
    pub fn a(&self) -> &Category<S> {
        &self.a
    }

    /// Right operand
    pub fn b(&self) -> &Category<S> {
        &self.b
    }

    /// Display name, e.g. `"(A & B) ⊕ C"`
    pub fn name(&self) -> String {
        if let Some(name) = self.name.borrow().as_ref() {
            return name.clone();
        }

        let name = format!(
            "{} {} {}",
            operand_label(&self.a),
            self.combinator.symbol(),
            operand_label(&self.b)
        );
        debug!(name = %name, "computed composite category name");
        *self.name.borrow_mut() = Some(name.clone());
        name
    }

    pub(crate) fn set_name(&self, name: String) {
        *self.name.borrow_mut() = Some(name);
    }

    /// Evaluate both operands on one subject
    ///
    /// Both sides are always evaluated; short-circuiting is left to the
    /// [`Combinator`]. This is the recursion step behind
    /// [`Category::categorize`], not an end-user entry point.
    pub fn categorize_operands(
        &self,
        subject: &S,
        context: &CategoryContext,
    ) -> CategoryResult<(Category<S>, Category<S>)> {
        let a = self.a.categorize(subject, context)?;
        let b = self.b.categorize(subject, context)?;
        Ok((a, b))
    }

    /// Evaluate both operands over a collection of subjects
    pub fn categorize_operands_all(
        &self,
        subjects: &[S],
        context: &CategoryContext,
    ) -> CategoryResult<(Vec<Category<S>>, Vec<Category<S>>)> {
        let a = self.a.categorize_all(subjects, context)?;
        ensure_shape(subjects.len(), a.len())?;
        let b = self.b.categorize_all(subjects, context)?;
        ensure_shape(subjects.len(), b.len())?;
        Ok((a, b))
    }
}

/// Swap-aware structural equality: `A op B == B op A` for the same `op`.
///
/// Re-associated expressions such as `(A & B) & C` and `A & (B & C)` are not
/// recognised as equal.
impl<S> PartialEq for CompositeCategory<S> {
    fn eq(&self, other: &Self) -> bool {
        self.combinator == other.combinator
            && ((self.a == other.a && self.b == other.b)
                || (self.a == other.b && self.b == other.a))
    }
}

impl<S> fmt::Debug for CompositeCategory<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeCategory")
            .field("combinator", &self.combinator)
            .field("a", &self.a)
            .field("b", &self.b)
            .finish()
    }
}

fn operand_label<S>(operand: &Category<S>) -> String {
    match operand.as_composite() {
        Some(composite) => format!("({})", composite.name()),
        None => operand.name(),
    }
}

pub(crate) fn ensure_shape(expected: usize, actual: usize) -> CategoryResult<()> {
    if expected != actual {
        return Err(CategoryError::ShapeMismatch { expected, actual });
    }
    Ok(())
}

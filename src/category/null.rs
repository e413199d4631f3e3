// Copyright 2025 Cowboy AI, LLC.

//! The "no match" element of the algebra

use std::fmt::{self, Display, Formatter};

/// Marker for a classification that matched nothing
///
/// `NullCategory` is a plain value, not a singleton: every evaluation that
/// fails to match may construct its own, and all of them compare equal.
/// Convert it into a [`Category`](super::Category) with `From`/`Into`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NullCategory;

impl NullCategory {
    /// Fixed display name of the Null category
    pub const NAME: &'static str = "∅";

    /// Name of the Null category; it cannot be renamed
    pub fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl Display for NullCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(Self::NAME)
    }
}

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NumericError;

/// The variants of the numeric tower, ordered from least to most general.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NumericKind {
    Integer,
    Rational,
    Real,
    Complex,
}

impl NumericKind {
    pub const ALL: [NumericKind; 4] = [
        NumericKind::Integer,
        NumericKind::Rational,
        NumericKind::Real,
        NumericKind::Complex,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NumericKind::Integer => "Integer",
            NumericKind::Rational => "Rational",
            NumericKind::Real => "Real",
            NumericKind::Complex => "Complex",
        }
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumericKind {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NumericKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| NumericError::parse(s, "numeric kind", "expected Integer, Rational, Real or Complex"))
    }
}

/// Subtype lattice of the numeric kinds used for promotion decisions.
///
/// The reference lattice is a chain, but nothing below relies on that: the
/// relation is derived from the direct-supertype table, so adding a kind with
/// several parents only means adding its row.
pub struct NumericHierarchy;

impl NumericHierarchy {
    /// Kinds every value of `kind` embeds into without loss.
    pub fn direct_supertypes(kind: NumericKind) -> &'static [NumericKind] {
        match kind {
            NumericKind::Integer => &[NumericKind::Rational],
            NumericKind::Rational => &[NumericKind::Real],
            NumericKind::Real => &[NumericKind::Complex],
            NumericKind::Complex => &[],
        }
    }

    /// Reflexive-transitive closure of [`Self::direct_supertypes`].
    pub fn supertypes(kind: NumericKind) -> BTreeSet<NumericKind> {
        let mut seen = BTreeSet::new();
        let mut pending = vec![kind];
        while let Some(next) = pending.pop() {
            if seen.insert(next) {
                pending.extend(Self::direct_supertypes(next).iter().copied());
            }
        }
        seen
    }

    pub fn is_subtype_of(kind: NumericKind, of: NumericKind) -> bool {
        Self::supertypes(kind).contains(&of)
    }

    /// Least general kind both `a` and `b` widen into, if any.
    pub fn common_supertype(a: NumericKind, b: NumericKind) -> Option<NumericKind> {
        let shared: BTreeSet<NumericKind> = Self::supertypes(a).intersection(&Self::supertypes(b)).copied().collect();
        shared
            .iter()
            .copied()
            .find(|candidate| shared.iter().all(|other| Self::is_subtype_of(*candidate, *other)))
    }

    /// Fold of [`Self::common_supertype`] over several kinds. `None` for an
    /// empty input or when two of the kinds have no common supertype.
    pub fn most_general<I>(kinds: I) -> Option<NumericKind>
    where
        I: IntoIterator<Item = NumericKind>,
    {
        let mut iter = kinds.into_iter();
        let first = iter.next()?;
        iter.try_fold(first, |acc, kind| Self::common_supertype(acc, kind))
    }
}

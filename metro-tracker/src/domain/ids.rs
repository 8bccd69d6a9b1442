//! Compact identifiers and label sets.
//!
//! Stations, lines and termini are interned once when the graph is built.
//! Everything downstream works with these small copyable ids; names are
//! looked up from the graph only when text is rendered.

use std::fmt;

/// Index of a station in the graph arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(pub(crate) u16);

impl StationId {
    /// Returns the arena index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

/// Index of a line colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(pub(crate) u8);

impl LineId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a terminus name, used as the "direction" of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TerminusId(pub(crate) u8);

impl TerminusId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Maximum number of distinct lines or termini a graph may hold.
pub const MAX_LABELS: usize = 64;

macro_rules! bitset {
    ($(#[$meta:meta])* $name:ident, $id:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name(u64);

        impl $name {
            /// The empty set.
            pub const EMPTY: Self = Self(0);

            /// A set holding a single id.
            pub fn single(id: $id) -> Self {
                Self(1u64 << id.0)
            }

            pub fn insert(&mut self, id: $id) {
                self.0 |= 1u64 << id.0;
            }

            pub fn contains(self, id: $id) -> bool {
                self.0 & (1u64 << id.0) != 0
            }

            pub fn intersection(self, other: Self) -> Self {
                Self(self.0 & other.0)
            }

            pub fn union(self, other: Self) -> Self {
                Self(self.0 | other.0)
            }

            /// True when the two sets share at least one id.
            pub fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }

            pub fn is_empty(self) -> bool {
                self.0 == 0
            }

            pub fn len(self) -> usize {
                self.0.count_ones() as usize
            }

            /// Iterate ids in ascending order.
            pub fn iter(self) -> impl Iterator<Item = $id> {
                (0..MAX_LABELS as u8)
                    .filter(move |bit| self.0 & (1u64 << bit) != 0)
                    .map($id)
            }
        }

        impl FromIterator<$id> for $name {
            fn from_iter<I: IntoIterator<Item = $id>>(iter: I) -> Self {
                let mut set = Self::EMPTY;
                for id in iter {
                    set.insert(id);
                }
                set
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_set().entries(self.iter().map(|id| id.0)).finish()
            }
        }
    };
}

bitset!(
    /// A set of line colours, e.g. the lines valid since the last switch.
    LineSet,
    LineId
);

bitset!(
    /// A set of termini (directions of travel).
    TerminusSet,
    TerminusId
);

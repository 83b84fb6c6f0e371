//! Static symbol universes.

pub mod gics;
pub mod large_cap;

pub use gics::GicsSector;
pub use large_cap::{LargeCapUniverse, Member};

use sift_data::Symbol;

/// A fixed list of symbols to screen.
pub trait Universe {
    /// Members in screening order.
    fn symbols(&self) -> Vec<Symbol>;

    /// Whether `symbol` is a member.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().iter().any(|s| s.as_str() == symbol)
    }

    /// Number of members.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

impl Universe for LargeCapUniverse {
    fn symbols(&self) -> Vec<Symbol> {
        self.members().iter().map(|m| m.symbol.clone()).collect()
    }
}

/// A caller-supplied list, e.g. from the command line.
impl Universe for Vec<Symbol> {
    fn symbols(&self) -> Vec<Symbol> {
        self.clone()
    }
}

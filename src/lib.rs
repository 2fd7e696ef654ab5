//! An unbalanced binary search tree over any `Ord` record type.
//!
//! Besides insert and lookup, the tree answers parent and sibling queries,
//! flattens into a bounded sorted sequence, and rebuilds a balanced shape
//! from one. Equality compares shape as well as content.

pub mod config;
pub mod display;
pub mod error;
pub mod ordered_tree;
pub mod sequence;
pub mod tree;

pub use config::{DEFAULT_CAPACITY, TreeConfig};
pub use display::Sideways;
pub use error::{TreeError, TreeResult};
pub use ordered_tree::{IntoIter, Iter, OrderedTree};
pub use sequence::{Flattened, is_sorted_strictly};
pub use tree::TreeOps;

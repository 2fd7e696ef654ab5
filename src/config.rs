use crate::error::{TreeError, TreeResult};

/// Upper bound on records moved through a flatten or rebuild when no other
/// bound is configured.
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    capacity: usize,
}

impl TreeConfig {
    pub fn new(capacity: usize) -> TreeResult<Self> {
        if capacity == 0 {
            return Err(TreeError::InvalidCapacity(capacity));
        }
        Ok(TreeConfig { capacity })
    }

    /// Maximum number of records a flattened sequence holds, and the
    /// maximum a rebuild accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    #[error("sequence of {len} records exceeds capacity {capacity}")]
    CapacityExceeded { len: usize, capacity: usize },

    #[error("invalid sequence capacity: {0}")]
    InvalidCapacity(usize),
}

pub type TreeResult<T> = Result<T, TreeError>;

//! Fixed-size batcher

/// Rows per upsert call unless configured otherwise
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// A contiguous slice of the dataset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Batch<'a, T> {
    /// 1-based position of this batch
    pub index: usize,
    /// Number of batches in the run
    pub total: usize,
    /// Rows in this batch
    pub rows: &'a [T],
}

impl<T> Batch<'_, T> {
    /// Rows in this batch
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for batches produced by [`Batcher::split`]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether this is the final batch of the run
    pub fn is_last(&self) -> bool {
        self.index == self.total
    }
}

/// Partitions slices into batches of at most `max_size` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batcher {
    max_size: usize,
}

impl Default for Batcher {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl Batcher {
    /// Create a batcher. A size of zero is treated as one.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size: max_size.max(1),
        }
    }

    /// Maximum rows per batch
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Number of batches for `rows` rows
    pub fn count(&self, rows: usize) -> usize {
        rows.div_ceil(self.max_size)
    }

    /// Split `rows` into batches, keeping row order.
    ///
    /// Yields nothing for an empty slice.
    pub fn split<'a, T>(&self, rows: &'a [T]) -> impl Iterator<Item = Batch<'a, T>> + 'a {
        let total = self.count(rows.len());
        rows.chunks(self.max_size)
            .enumerate()
            .map(move |(i, rows)| Batch {
                index: i + 1,
                total,
                rows,
            })
    }
}

use super::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::{ChunkError, Result};

/// Allocate a vector that can hold `len` elements without reallocating.
fn reserve<U>(len: usize) -> Result<Vec<U>> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|_| ChunkError::overflow(0, len))?;
    Ok(values)
}

impl<T: Clone> Chunk<T> {
    /// Apply `f` to every element, realizing the results into a new array
    /// chunk of the same length.
    pub fn map<U, F>(&self, mut f: F) -> Result<Chunk<U>>
    where
        F: FnMut(&T) -> U,
    {
        let mut values = reserve(self.len())?;
        self.for_each_with_index(|_, value| values.push(f(value)));
        Ok(Chunk::from_vec(values))
    }

    /// Keep the elements matching `predicate`, in order.
    pub fn filter<P>(&self, mut predicate: P) -> Result<Chunk<T>>
    where
        P: FnMut(&T) -> bool,
    {
        let mut values = reserve(self.len())?;
        self.for_each(|value| {
            if predicate(value) {
                values.push(value.clone());
            }
        });
        values.shrink_to_fit();
        Ok(Chunk::from_vec(values))
    }

    /// Copy every element into a fresh vector.
    pub fn to_vec(&self) -> Result<Vec<T>> {
        let mut values = reserve(self.len())?;
        self.for_each(|value| values.push(value.clone()));
        Ok(values)
    }

    /// Flatten into a single contiguous array chunk, restoring O(1) access.
    pub fn compact(&self) -> Result<Chunk<T>> {
        log::debug!(
            "chunk: compacting {} elements from {} children",
            self.len(),
            self.child_count()
        );
        Ok(Chunk::from_vec(self.to_vec()?))
    }

    /// Compact only when the chunk has more children than the configured
    /// threshold.
    pub fn compact_if_fragmented(&self, config: &ChunkConfig) -> Result<Chunk<T>> {
        if self.child_count() > config.compact_threshold {
            self.compact()
        } else {
            Ok(self.clone())
        }
    }

    /// First `n` elements
    pub fn take(&self, n: usize) -> Chunk<T> {
        self.split_at(n).0
    }

    /// Everything after the first `n` elements
    pub fn drop(&self, n: usize) -> Chunk<T> {
        self.split_at(n).1
    }

    /// Last `n` elements
    pub fn take_right(&self, n: usize) -> Chunk<T> {
        self.split_at(self.len().saturating_sub(n)).1
    }

    /// Everything but the last `n` elements
    pub fn drop_right(&self, n: usize) -> Chunk<T> {
        self.split_at(self.len().saturating_sub(n)).0
    }

    pub fn fold<A, F>(&self, init: A, mut f: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.iter().fold(init, |acc, value| f(acc, value))
    }

    /// Index of the first element matching `predicate`
    pub fn index_where<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().position(|value| predicate(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fragmented() -> Chunk<i32> {
        Chunk::concat(vec![
            Chunk::from_vec(vec![1, 2, 3]),
            Chunk::singleton(4),
            Chunk::from_vec(vec![5, 6]),
        ])
        .unwrap()
    }

    #[test]
    fn test_map_changes_type() {
        let chunk = fragmented();
        let mapped = chunk.map(|v| format!("#{}", v)).unwrap();
        assert_eq!(mapped.len(), 6);
        for i in 0..6 {
            assert_eq!(mapped.get(i).unwrap(), &format!("#{}", chunk.get(i).unwrap()));
        }
        assert!(matches!(mapped, Chunk::Array(_)));
    }

    #[test]
    fn test_filter_keeps_order() {
        let evens = fragmented().filter(|v| v % 2 == 0).unwrap();
        assert_eq!(evens.to_vec().unwrap(), vec![2, 4, 6]);

        let none = fragmented().filter(|_| false).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_compact_flattens() {
        let chunk = fragmented();
        assert_eq!(chunk.child_count(), 3);
        let compacted = chunk.compact().unwrap();
        assert_eq!(compacted.child_count(), 1);
        assert_eq!(compacted, chunk);
    }

    #[test]
    fn test_compact_if_fragmented() {
        let chunk = fragmented();
        let mut config = ChunkConfig::default();
        assert_eq!(chunk.compact_if_fragmented(&config).unwrap().child_count(), 3);

        config.compact_threshold = 2;
        assert_eq!(chunk.compact_if_fragmented(&config).unwrap().child_count(), 1);
    }

    #[rstest]
    #[case(0, vec![], vec![1, 2, 3, 4, 5, 6])]
    #[case(2, vec![1, 2], vec![3, 4, 5, 6])]
    #[case(4, vec![1, 2, 3, 4], vec![5, 6])]
    #[case(6, vec![1, 2, 3, 4, 5, 6], vec![])]
    #[case(99, vec![1, 2, 3, 4, 5, 6], vec![])]
    fn test_take_drop(#[case] n: usize, #[case] taken: Vec<i32>, #[case] dropped: Vec<i32>) {
        let chunk = fragmented();
        assert_eq!(chunk.take(n).to_vec().unwrap(), taken);
        assert_eq!(chunk.drop(n).to_vec().unwrap(), dropped);
    }

    #[test]
    fn test_right_side_slicing() {
        let chunk = fragmented();
        assert_eq!(chunk.take_right(2).to_vec().unwrap(), vec![5, 6]);
        assert_eq!(chunk.drop_right(2).to_vec().unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(chunk.take_right(10).len(), 6);
        assert!(chunk.drop_right(10).is_empty());
    }

    #[test]
    fn test_realisation_reports_overflow() {
        let mut units: Vec<()> = Vec::new();
        // SAFETY: `()` is zero-sized, so any length is backed by no memory.
        unsafe { units.set_len(usize::MAX) };
        let huge = Chunk::from_vec(units);

        let err = huge.map(|_| 0u64).unwrap_err();
        assert!(matches!(
            err,
            ChunkError::CapacityOverflow {
                existing: 0,
                additional: usize::MAX
            }
        ));
    }

    #[test]
    fn test_fold_and_search() {
        let chunk = fragmented();
        assert_eq!(chunk.fold(0, |acc, v| acc + v), 21);
        assert_eq!(chunk.index_where(|v| *v > 3), Some(3));
        assert_eq!(chunk.index_where(|v| *v > 6), None);
    }
}

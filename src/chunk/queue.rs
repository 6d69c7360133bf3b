use super::chunk::Chunk;
use crate::error::{ChunkError, Result};
use im::Vector;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Concatenation of non-empty chunks
///
/// Children live in a persistent vector, so pushing onto either end of a
/// queue produces a new queue in O(1) amortized time while the old one stays
/// valid. Random access goes through a prefix-sum index that is built on the
/// first lookup that is not the first or last element, then reused for the
/// lifetime of this queue value.
pub struct Queue<T> {
    children: Vector<Chunk<T>>,
    size: usize,
    index: OnceCell<QueueIndex>,
    index_builds: AtomicUsize,
}

/// Prefix sums over child sizes: `prefix[k]` is the total length of
/// `children[0..=k]`.
struct QueueIndex {
    prefix: Vec<usize>,
}

impl<T: Clone> Queue<T> {
    /// Children must all be non-empty and sum to `size`.
    fn from_children(children: Vector<Chunk<T>>, size: usize) -> Self {
        Self {
            children,
            size,
            index: OnceCell::new(),
            index_builds: AtomicUsize::new(0),
        }
    }

    pub(crate) fn pair(left: Chunk<T>, right: Chunk<T>, size: usize) -> Self {
        let mut children = Vector::new();
        children.push_back(left);
        children.push_back(right);
        Self::from_children(children, size)
    }

    pub(crate) fn pushed_front(&self, chunk: Chunk<T>, size: usize) -> Self {
        let mut children = self.children.clone();
        children.push_front(chunk);
        Self::from_children(children, size)
    }

    pub(crate) fn pushed_back(&self, chunk: Chunk<T>, size: usize) -> Self {
        let mut children = self.children.clone();
        children.push_back(chunk);
        Self::from_children(children, size)
    }

    pub(crate) fn joined(&self, other: &Queue<T>, size: usize) -> Self {
        let mut children = self.children.clone();
        children.append(other.children.clone());
        Self::from_children(children, size)
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.size
    }

    /// Always false: a queue holds at least two non-empty children
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Children in order
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &Chunk<T>> + '_ {
        self.children.iter()
    }

    /// Number of times this queue built its lookup index (0 or 1)
    pub fn index_builds(&self) -> usize {
        self.index_builds.load(Ordering::Relaxed)
    }

    /// Whether the lookup index has been built yet
    pub fn is_indexed(&self) -> bool {
        self.index.get().is_some()
    }

    /// Element at `index`, through the first/last fast path or the index
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.size {
            return Err(ChunkError::out_of_range(index, self.size));
        }

        // Peeking at either end never pays for the index
        if index == 0 {
            if let Some(first) = self.children.front() {
                return first.get(0);
            }
        }
        if index == self.size - 1 {
            if let Some(last) = self.children.back() {
                return last.get(last.len() - 1);
            }
        }

        let (pos, local) = self.locate(index);
        self.children[pos].get(local)
    }

    /// Position of the owning child and the offset within it.
    /// `index` must be in bounds.
    fn locate(&self, index: usize) -> (usize, usize) {
        let prefix = &self.index().prefix;
        let pos = prefix.partition_point(|&end| end <= index);
        let start = if pos == 0 { 0 } else { prefix[pos - 1] };
        (pos, index - start)
    }

    fn index(&self) -> &QueueIndex {
        self.index.get_or_init(|| {
            self.index_builds.fetch_add(1, Ordering::Relaxed);
            log::trace!(
                "queue: building index over {} children ({} elements)",
                self.children.len(),
                self.size
            );

            let mut prefix = Vec::with_capacity(self.children.len());
            let mut total = 0;
            for child in self.children.iter() {
                total += child.len();
                prefix.push(total);
            }
            QueueIndex { prefix }
        })
    }

    pub(crate) fn visit(&self, f: &mut dyn FnMut(&T)) {
        for child in self.children.iter() {
            child.visit(f);
        }
    }

    /// Split strictly inside the queue: `0 < at < len`.
    pub(crate) fn split_at(&self, at: usize) -> (Chunk<T>, Chunk<T>) {
        let (pos, local) = self.locate(at);
        let (child_left, child_right) = self.children[pos].split_at(local);

        let (mut left, mut right) = self.children.clone().split_at(pos);
        right.pop_front();
        if !child_left.is_empty() {
            left.push_back(child_left);
        }
        if !child_right.is_empty() {
            right.push_front(child_right);
        }

        (
            Self::collapse(left, at),
            Self::collapse(right, self.size - at),
        )
    }

    /// Collapse trivial child lists back into plain chunks.
    fn collapse(mut children: Vector<Chunk<T>>, size: usize) -> Chunk<T> {
        match children.len() {
            0 => Chunk::Empty,
            1 => children.pop_front().unwrap_or(Chunk::Empty),
            _ => Chunk::Queue(Arc::new(Self::from_children(children, size))),
        }
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("size", &self.size)
            .field("indexed", &self.index.get().is_some())
            .finish()
    }
}

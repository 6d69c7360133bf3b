use super::array::ArraySlice;
use super::buffer::{BufferView, SharedBuffer};
use super::queue::Queue;
use crate::error::{ChunkError, Result};
use std::fmt;
use std::sync::Arc;

/// An immutable, finite, indexable sequence of `T`
///
/// Cloning never copies elements: every non-empty variant shares its storage
/// through an `Arc`.
#[derive(Clone)]
pub enum Chunk<T> {
    Empty,
    /// One element, shared so clones never copy it
    Singleton(Arc<T>),
    /// Window over a shared vector
    Array(ArraySlice<T>),
    /// Frozen view of a caller-owned buffer
    Buffer(BufferView<T>),
    /// Concatenation of non-empty chunks
    Queue(Arc<Queue<T>>),
}

impl<T> Chunk<T> {
    /// The chunk with no elements
    pub fn empty() -> Self {
        Chunk::Empty
    }

    /// A chunk holding exactly `value`
    pub fn singleton(value: T) -> Self {
        Chunk::Singleton(Arc::new(value))
    }

    /// Take ownership of `values` without copying the elements.
    pub fn from_vec(values: Vec<T>) -> Self {
        if values.is_empty() {
            return Chunk::Empty;
        }
        Chunk::Array(ArraySlice::new(Arc::new(values)))
    }

    /// Share already reference-counted storage. The vector cannot be
    /// mutated through another handle while this chunk is alive.
    pub fn from_shared(values: Arc<Vec<T>>) -> Self {
        if values.is_empty() {
            return Chunk::Empty;
        }
        Chunk::Array(ArraySlice::new(values))
    }

    /// Share `values[offset..offset + length]`.
    pub fn from_shared_slice(values: Arc<Vec<T>>, offset: usize, length: usize) -> Result<Self> {
        let slice = ArraySlice::window(values, offset, length)?;
        if slice.is_empty() {
            return Ok(Chunk::Empty);
        }
        Ok(Chunk::Array(slice))
    }

    /// Freeze the buffer's remaining elements into a chunk.
    ///
    /// The chunk keeps its own copy of the cursor, so moving the buffer's
    /// position or limit later does not affect it.
    pub fn from_buffer(buffer: &SharedBuffer<T>) -> Self {
        match buffer.view(buffer.remaining()) {
            Ok(view) if !view.is_empty() => Chunk::Buffer(view),
            _ => Chunk::Empty,
        }
    }

    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_vec(values.to_vec())
    }
}

impl<T: Clone> Chunk<T> {
    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            Chunk::Empty => 0,
            Chunk::Singleton(_) => 1,
            Chunk::Array(array) => array.len(),
            Chunk::Buffer(view) => view.len(),
            Chunk::Queue(queue) => queue.len(),
        }
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, or `IndexOutOfRange`
    pub fn get(&self, index: usize) -> Result<&T> {
        let found = match self {
            Chunk::Empty => None,
            Chunk::Singleton(value) => (index == 0).then_some(value.as_ref()),
            Chunk::Array(array) => array.get(index),
            Chunk::Buffer(view) => view.get(index),
            Chunk::Queue(queue) => return queue.get(index),
        };
        found.ok_or_else(|| ChunkError::out_of_range(index, self.len()))
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0).ok()
    }

    pub fn last(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|i| self.get(i).ok())
    }

    /// Contiguous elements of a leaf chunk. Queues have none.
    pub fn as_slice(&self) -> Option<&[T]> {
        match self {
            Chunk::Empty => Some(<&[T]>::default()),
            Chunk::Singleton(value) => Some(std::slice::from_ref(value.as_ref())),
            Chunk::Array(array) => Some(array.as_slice()),
            Chunk::Buffer(view) => Some(view.as_slice()),
            Chunk::Queue(_) => None,
        }
    }

    /// 0 for the empty chunk, 1 for other leaves
    pub fn child_count(&self) -> usize {
        match self {
            Chunk::Empty => 0,
            Chunk::Queue(queue) => queue.child_count(),
            _ => 1,
        }
    }

    /// Borrowing iterator in index order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            current: <&[T]>::default().iter(),
            pending: vec![self],
            remaining: self.len(),
        }
    }

    /// Visit every element in order.
    pub fn for_each<F: FnMut(&T)>(&self, mut f: F) {
        self.visit(&mut f);
    }

    /// Visit every element in order along with its index.
    pub fn for_each_with_index<F: FnMut(usize, &T)>(&self, mut f: F) {
        let mut index = 0;
        self.visit(&mut |value: &T| {
            f(index, value);
            index += 1;
        });
    }

    pub(crate) fn visit(&self, f: &mut dyn FnMut(&T)) {
        match self {
            Chunk::Queue(queue) => queue.visit(f),
            leaf => {
                for value in leaf.as_slice().unwrap_or(&[]) {
                    f(value);
                }
            }
        }
    }

    /// Split into `[0, at)` and `[at, len)`. `at` is clamped to `len`.
    ///
    /// Array, buffer and queue chunks share storage with both halves.
    pub fn split_at(&self, at: usize) -> (Chunk<T>, Chunk<T>) {
        let len = self.len();
        let at = at.min(len);
        if at == 0 {
            return (Chunk::Empty, self.clone());
        }
        if at == len {
            return (self.clone(), Chunk::Empty);
        }

        match self {
            Chunk::Array(array) => {
                let (left, right) = array.split_at(at);
                (Chunk::Array(left), Chunk::Array(right))
            }
            Chunk::Buffer(view) => {
                let (left, right) = view.split_at(at);
                (Chunk::Buffer(left), Chunk::Buffer(right))
            }
            Chunk::Queue(queue) => queue.split_at(at),
            Chunk::Empty | Chunk::Singleton(_) => (self.clone(), Chunk::Empty),
        }
    }

    /// Concatenate `self` followed by `other`.
    ///
    /// Growth happens on whichever side is already a queue, so folding
    /// appends in either direction stays O(1) amortized per step.
    pub fn append(&self, other: &Chunk<T>) -> Result<Chunk<T>> {
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }

        let size = self
            .len()
            .checked_add(other.len())
            .ok_or_else(|| ChunkError::overflow(self.len(), other.len()))?;

        let queue = match (self, other) {
            (Chunk::Queue(left), Chunk::Queue(right)) => left.joined(right, size),
            (_, Chunk::Queue(right)) => right.pushed_front(self.clone(), size),
            (Chunk::Queue(left), _) => left.pushed_back(other.clone(), size),
            _ => Queue::pair(self.clone(), other.clone(), size),
        };
        Ok(Chunk::Queue(Arc::new(queue)))
    }

    /// Concatenate `other` followed by `self`.
    pub fn prepend(&self, other: &Chunk<T>) -> Result<Chunk<T>> {
        other.append(self)
    }

    /// Left-to-right concatenation. Empty inputs are skipped.
    pub fn concat<I>(chunks: I) -> Result<Chunk<T>>
    where
        I: IntoIterator<Item = Chunk<T>>,
    {
        chunks
            .into_iter()
            .try_fold(Chunk::Empty, |acc, chunk| acc.append(&chunk))
    }
}

impl<T> Default for Chunk<T> {
    fn default() -> Self {
        Chunk::Empty
    }
}

impl<T> From<Vec<T>> for Chunk<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T> FromIterator<T> for Chunk<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Clone + PartialEq> PartialEq for Chunk<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Clone + Eq> Eq for Chunk<T> {}

impl<T: Clone + fmt::Debug> fmt::Debug for Chunk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T: Clone> IntoIterator for &'a Chunk<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// In-order iterator over a chunk's elements
pub struct Iter<'a, T> {
    current: std::slice::Iter<'a, T>,
    pending: Vec<&'a Chunk<T>>,
    remaining: usize,
}

impl<'a, T: Clone> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            if let Some(value) = self.current.next() {
                self.remaining -= 1;
                return Some(value);
            }

            let chunk = self.pending.pop()?;
            match chunk {
                Chunk::Queue(queue) => {
                    // Reverse so the leftmost child is popped first
                    for child in queue.children().rev() {
                        self.pending.push(child);
                    }
                }
                leaf => {
                    self.current = leaf.as_slice().unwrap_or(&[]).iter();
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: Clone> ExactSizeIterator for Iter<'a, T> {}

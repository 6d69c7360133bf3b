use super::producer::Producer;
use crate::chunk::Chunk;
use crate::error::Result;

/// A producer with at most one chunk pushed back in front of it
pub struct Pushback<T, P> {
    front: Option<Chunk<T>>,
    rest: P,
}

impl<T: Clone, P: Producer<T>> Pushback<T, P> {
    /// Wrap a producer with nothing pushed back
    pub fn new(rest: P) -> Self {
        Self { front: None, rest }
    }

    /// The chunk that will be handed out next, if one was pushed back
    pub fn front(&self) -> Option<&Chunk<T>> {
        self.front.as_ref()
    }

    /// Give up the pushed-back chunk and the underlying producer.
    pub fn into_parts(self) -> (Option<Chunk<T>>, P) {
        (self.front, self.rest)
    }

    /// Pull chunks until `n` elements are gathered or the producer runs
    /// dry. The unused tail of the last chunk is pushed back.
    ///
    /// Returns `None` only when nothing at all could be pulled.
    pub fn pull_n(&mut self, n: usize) -> Result<Option<Chunk<T>>> {
        if n == 0 {
            return Ok(Some(Chunk::Empty));
        }

        let mut acc = Chunk::Empty;
        while acc.len() < n {
            let Some(next) = self.next_chunk() else {
                break;
            };

            let needed = n - acc.len();
            if next.len() > needed {
                let (head, tail) = next.split_at(needed);
                log::trace!("pull: pushing back {} elements", tail.len());
                acc = acc.append(&head)?;
                self.front = Some(tail);
            } else {
                acc = acc.append(&next)?;
            }
        }

        if acc.is_empty() {
            return Ok(None);
        }
        Ok(Some(acc))
    }
}

impl<T: Clone, P: Producer<T>> Producer<T> for Pushback<T, P> {
    fn next_chunk(&mut self) -> Option<Chunk<T>> {
        self.front.take().or_else(|| self.rest.next_chunk())
    }
}

/// Next non-empty chunk and the rest of the producer
pub fn uncons<T: Clone, P: Producer<T>>(mut producer: P) -> Option<(Chunk<T>, P)> {
    loop {
        let chunk = producer.next_chunk()?;
        if !chunk.is_empty() {
            return Some((chunk, producer));
        }
    }
}

/// Exactly `n` elements (fewer only if the producer is exhausted) and the
/// remaining producer, with any leftover pushed back in front of it.
///
/// `n == 0` yields an empty chunk without pulling anything.
pub fn uncons_n<T: Clone, P: Producer<T>>(
    producer: P,
    n: usize,
) -> Result<Option<(Chunk<T>, Pushback<T, P>)>> {
    let mut rest = Pushback::new(producer);
    Ok(rest.pull_n(n)?.map(|chunk| (chunk, rest)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::IterProducer;

    fn producer(sizes: &[usize]) -> IterProducer<std::vec::IntoIter<Chunk<usize>>> {
        let mut next = 0;
        let chunks: Vec<Chunk<usize>> = sizes
            .iter()
            .map(|&n| {
                let part: Vec<usize> = (next..next + n).collect();
                next += n;
                Chunk::from_vec(part)
            })
            .collect();
        IterProducer::new(chunks)
    }

    #[test]
    fn test_uncons_skips_empty() {
        let (chunk, mut rest) = uncons(producer(&[0, 0, 2, 1])).unwrap();
        assert_eq!(chunk.to_vec().unwrap(), vec![0, 1]);
        assert_eq!(rest.next_chunk().unwrap().len(), 1);
        assert!(uncons(producer(&[0])).is_none());
    }

    #[test]
    fn test_uncons_n_splits_boundary_chunk() {
        let (chunk, mut rest) = uncons_n(producer(&[3, 4, 5]), 5).unwrap().unwrap();
        assert_eq!(chunk.to_vec().unwrap(), vec![0, 1, 2, 3, 4]);
        assert_eq!(rest.front().unwrap().len(), 2);

        let leftover = rest.next_chunk().unwrap();
        assert_eq!(leftover.to_vec().unwrap(), vec![5, 6]);
        assert_eq!(rest.next_chunk().unwrap().len(), 5);
    }

    #[test]
    fn test_uncons_n_exact_fit() {
        let (chunk, rest) = uncons_n(producer(&[2, 3, 1]), 5).unwrap().unwrap();
        assert_eq!(chunk.len(), 5);
        assert!(rest.front().is_none());
    }

    #[test]
    fn test_uncons_n_exhausted() {
        let (chunk, mut rest) = uncons_n(producer(&[2, 1]), 10).unwrap().unwrap();
        assert_eq!(chunk.len(), 3);
        assert!(rest.next_chunk().is_none());

        assert!(uncons_n(producer(&[]), 1).unwrap().is_none());
    }

    #[test]
    fn test_uncons_n_zero() {
        let (chunk, mut rest) = uncons_n(producer(&[2]), 0).unwrap().unwrap();
        assert!(chunk.is_empty());
        assert_eq!(rest.next_chunk().unwrap().len(), 2);
    }

    #[test]
    fn test_pull_n_repeatedly() {
        let mut pull = Pushback::new(producer(&[4, 4, 4]));
        let mut batches = Vec::new();
        while let Some(batch) = pull.pull_n(5).unwrap() {
            batches.push(batch.to_vec().unwrap());
        }
        assert_eq!(
            batches,
            vec![
                vec![0, 1, 2, 3, 4],
                vec![5, 6, 7, 8, 9],
                vec![10, 11]
            ]
        );
    }
}

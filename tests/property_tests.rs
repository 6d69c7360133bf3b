use chunkseq::{Chunk, SharedBuffer};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

/// A chunk assembled from a random mix of backends and append directions
#[derive(Clone, Debug)]
struct Shaped(Chunk<u8>);

impl Arbitrary for Shaped {
    fn arbitrary(g: &mut Gen) -> Self {
        let parts = usize::arbitrary(g) % 6;
        let mut chunk = Chunk::empty();

        for _ in 0..parts {
            let values: Vec<u8> = Vec::arbitrary(g);
            let part = match u8::arbitrary(g) % 4 {
                0 => Chunk::from_vec(values),
                1 => Chunk::from_buffer(&SharedBuffer::from_vec(values)),
                2 => values
                    .first()
                    .map(|v| Chunk::singleton(*v))
                    .unwrap_or_default(),
                _ => {
                    let half = values.len() / 2;
                    Chunk::from_vec(values).drop(half)
                }
            };

            chunk = if bool::arbitrary(g) {
                chunk.append(&part).unwrap()
            } else {
                part.append(&chunk).unwrap()
            };
        }

        Shaped(chunk)
    }
}

#[quickcheck]
fn prop_append_is_associative(a: Shaped, b: Shaped, c: Shaped) -> bool {
    let (a, b, c) = (a.0, b.0, c.0);
    let left = a.append(&b).unwrap().append(&c).unwrap();
    let right = a.append(&b.append(&c).unwrap()).unwrap();
    left == right && left.len() == a.len() + b.len() + c.len()
}

#[quickcheck]
fn prop_get_matches_flattened(chunk: Shaped) -> bool {
    let chunk = chunk.0;
    let flat = chunk.to_vec().unwrap();
    (0..flat.len()).all(|i| chunk.get(i).unwrap() == &flat[i])
        && chunk.get(flat.len()).is_err()
        && chunk.get(flat.len() + 1).is_err()
}

#[quickcheck]
fn prop_split_round_trip(chunk: Shaped) -> bool {
    let chunk = chunk.0;
    (0..=chunk.len()).all(|idx| {
        let (left, right) = chunk.split_at(idx);
        left.len() == idx && left.append(&right).unwrap() == chunk
    })
}

#[quickcheck]
fn prop_for_each_visits_every_index_once(chunk: Shaped) -> bool {
    let chunk = chunk.0;
    let mut indices = Vec::new();
    chunk.for_each_with_index(|i, _| indices.push(i));
    indices == (0..chunk.len()).collect::<Vec<_>>()
}

#[quickcheck]
fn prop_iter_agrees_with_for_each(chunk: Shaped) -> bool {
    let chunk = chunk.0;
    let mut visited = Vec::new();
    chunk.for_each(|v| visited.push(*v));
    visited == chunk.iter().copied().collect::<Vec<_>>()
}

#[quickcheck]
fn prop_map_applies_pointwise(chunk: Shaped) -> bool {
    let chunk = chunk.0;
    let mapped = chunk.map(|v| u16::from(*v) + 1).unwrap();
    mapped.len() == chunk.len()
        && (0..chunk.len()).all(|i| *mapped.get(i).unwrap() == u16::from(*chunk.get(i).unwrap()) + 1)
}

#[quickcheck]
fn prop_filter_preserves_order(chunk: Shaped, modulus: u8) -> bool {
    let chunk = chunk.0;
    let modulus = modulus.max(1);
    let keep = |v: &u8| v % modulus == 0;

    let filtered = chunk.filter(keep).unwrap();
    let expected: Vec<u8> = chunk.iter().copied().filter(|v| keep(v)).collect();
    filtered.to_vec().unwrap() == expected
}

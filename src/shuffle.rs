//! The two features that only need uniform randomness, not the constraint
//! engine: splitting a class into equal-size groups and the selection wheel.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GroupSizeError {
    #[error("group size must be at least 1")]
    TooSmall,
    #[error("group size {size} is larger than the roster ({roster})")]
    LargerThanRoster { size: usize, roster: usize },
}

/// Shuffles the items uniformly, then deals them into groups of
/// `group_size`. The last group is smaller when the sizes do not divide
/// evenly.
pub fn random_groups<T: Clone, R: Rng + ?Sized>(
    items: &[T],
    group_size: usize,
    rng: &mut R,
) -> Result<Vec<Vec<T>>, GroupSizeError> {
    if group_size == 0 {
        return Err(GroupSizeError::TooSmall);
    }
    if group_size > items.len() {
        return Err(GroupSizeError::LargerThanRoster {
            size: group_size,
            roster: items.len(),
        });
    }

    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);

    Ok(shuffled
        .chunks(group_size)
        .map(|chunk| chunk.to_vec())
        .collect())
}

/// One spin of the wheel: a uniform pick, or `None` for an empty roster.
pub fn spin<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

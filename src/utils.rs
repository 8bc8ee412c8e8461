//! Utility functions for the dotsbox crate

use rand::{Rng, SeedableRng, prelude::IndexedRandom, rngs::StdRng};

use crate::error::{Error, Result};

/// Seeded generator when a seed is given, OS-seeded otherwise.
pub fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Uniformly pick one item.
///
/// # Examples
///
/// ```
/// use dotsbox::utils::{build_rng, choose_uniform};
///
/// let mut rng = build_rng(Some(5));
/// let item = choose_uniform(&mut rng, &[1, 2, 3])?;
/// assert!([1, 2, 3].contains(&item));
/// # Ok::<(), dotsbox::Error>(())
/// ```
pub fn choose_uniform<R, T>(rng: &mut R, items: &[T]) -> Result<T>
where
    R: Rng + ?Sized,
    T: Copy,
{
    items.choose(rng).copied().ok_or(Error::NoActionsAvailable)
}

/// Index of the largest value; ties go to the earliest index.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, &value) in values.iter().enumerate() {
        match best {
            Some(current) if value <= values[current] => {}
            _ => best = Some(index),
        }
    }
    best
}

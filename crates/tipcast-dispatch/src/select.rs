//! Tip selection — a uniform random pick over the unpublished subset.

use rand::Rng;
use rand::seq::SliceRandom;
use tipcast_core::types::Tip;

/// Choose one unpublished tip uniformly at random.
///
/// `None` means the pool is drained ("no work remaining") — a distinct
/// outcome, not an error. The catalog is never mutated here. The RNG is
/// caller-supplied so tests can pin the selection with a seed.
pub fn select_unpublished<'a, R: Rng + ?Sized>(
    catalog: &'a [Tip],
    rng: &mut R,
) -> Option<&'a Tip> {
    let unpublished: Vec<&Tip> = catalog.iter().filter(|t| !t.is_published).collect();
    unpublished.choose(rng).copied()
}

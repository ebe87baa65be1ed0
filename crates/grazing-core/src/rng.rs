use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Create the deterministic RNG shared by every draw of a run.
pub fn create_rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

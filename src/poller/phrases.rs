use std::time::{SystemTime, UNIX_EPOCH};

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

pub const PATIENCE: [&str; 10] = [
    "patience young grasshopper",
    "patience, my padawan",
    "patience little one, patience",
    "calm yourself",
    "remain calm, all will be well",
    "haven't you got something to be getting on with?",
    "any minute now",
    "hang on a bit",
    "it'll take longer if you watch",
    "all things come to those who wait",
];

/// Reassurance messages in a shuffled order. Cycles through the whole list
/// before any phrase repeats.
pub struct Phrases {
    order: Vec<&'static str>,
    next: usize,
}

impl Phrases {
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut order = PATIENCE.to_vec();
        order.shuffle(rng);
        Self { order, next: 0 }
    }

    /// Not cryptographic, just different from one boot to the next.
    pub fn seeded_from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::shuffled(&mut StdRng::seed_from_u64(seed))
    }

    pub fn next_phrase(&mut self) -> &'static str {
        let phrase = self.order[self.next % self.order.len()];
        self.next += 1;
        phrase
    }
}

impl Default for Phrases {
    fn default() -> Self {
        Self::seeded_from_clock()
    }
}

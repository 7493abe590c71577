//! Quotes shown alongside the wallet balance.

use rand::seq::SliceRandom;
use rand::Rng;

pub const INSPIRATIONAL_QUOTES: [&str; 10] = [
    "Time is money, but money isn't everything.",
    "Small steps lead to big achievements.",
    "Your future is created by what you do today.",
    "Productivity is never an accident.",
    "Focus on progress, not perfection.",
    "Every minute spent planning saves hours in execution.",
    "The only way to do great work is to love what you do.",
    "Your time is limited, don't waste it.",
    "Success is built one focused session at a time.",
    "The best investment you can make is in yourself.",
];

pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    INSPIRATIONAL_QUOTES
        .choose(rng)
        .copied()
        .unwrap_or(INSPIRATIONAL_QUOTES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn quote_comes_from_list() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(INSPIRATIONAL_QUOTES.contains(&random_quote(&mut rng)));
        }
    }

    #[test]
    fn same_seed_same_quote() {
        let a = random_quote(&mut StdRng::seed_from_u64(3));
        let b = random_quote(&mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}

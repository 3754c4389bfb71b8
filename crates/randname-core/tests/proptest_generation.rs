//! Property-based tests for range sampling and character pools.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use randname_core::{Range, compile};

/// Four-flag strings with at least one `1`.
fn flags_strategy() -> impl Strategy<Value = String> {
    "[01]{4}".prop_filter("at least one pool", |s| s.contains('1'))
}

fn allowed(flags: &str, c: char) -> bool {
    let f: Vec<bool> = flags.chars().map(|b| b == '1').collect();
    (f[0] && c.is_ascii_uppercase())
        || (f[1] && c.is_ascii_lowercase())
        || (f[2] && c.is_ascii_digit())
        || (f[3] && c == '_')
}

proptest! {
    #[test]
    fn class_lengths_stay_in_range(
        flags in flags_strategy(),
        min in 0u32..20,
        extra in 0u32..20,
        seed in any::<u64>(),
    ) {
        let max = min + extra;
        let tree = compile(&format!("[{flags}]({min},{max})")).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..20 {
            let name = tree.generate(&mut rng).unwrap();
            prop_assert!((min as usize..=max as usize).contains(&name.len()));
            prop_assert!(name.chars().all(|c| allowed(&flags, c)), "{} {}", flags, name);
        }
    }

    #[test]
    fn inverted_ranges_always_fail(min in 1u32..1000, gap in 1u32..1000, seed in any::<u64>()) {
        prop_assume!(gap <= min);
        let max = min - gap;
        let mut rng = StdRng::seed_from_u64(seed);
        prop_assert!(Range::new(min, max).sample(&mut rng).unwrap_err().is_configuration());
    }

    #[test]
    fn compile_is_deterministic(flags in flags_strategy(), n in 0u32..50, m in 0u32..50) {
        let pattern = format!("{{<x>[{flags}]({n},{m})}}(1,2)");
        prop_assert_eq!(compile(&pattern).unwrap(), compile(&pattern).unwrap());
    }
}

use std::sync::Arc;
use std::thread;

use rand::SeedableRng;
use rand::rngs::StdRng;
use randname_core::{Matcher, PatternTree, compile};

#[test]
fn golden_tree_is_shared_across_threads() {
    let tree: Arc<PatternTree> = Arc::new(compile("[0100](7,13){[1000](1)[0100](6,12)}(0,2)").unwrap());
    let matcher = Arc::new(Matcher::new(&tree).unwrap());

    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            let tree = Arc::clone(&tree);
            let matcher = Arc::clone(&matcher);
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                for _ in 0..500 {
                    let name = tree.generate(&mut rng).unwrap();
                    assert!(matcher.is_match(&name), "{name}");
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn golden_thread_rng_in_production_use() {
    let tree = compile("{[1000](1)[0100](6,12)}(2,3)").unwrap();
    let matcher = Matcher::new(&tree).unwrap();
    let mut rng = rand::thread_rng();

    for _ in 0..100 {
        let name = tree.generate(&mut rng).unwrap();
        assert!(matcher.is_match(&name), "{name}");
    }
}

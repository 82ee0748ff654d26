use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cardex::{Alias, CatalogEntry, Searcher};

/// Synthetic catalog of pronounceable multi-word names, large enough that
/// the fuzzy scan dominates rather than setup noise.
fn setup_searcher(entries: usize) -> Searcher {
    let mut rng = StdRng::seed_from_u64(42);
    let consonants = b"bcdfghklmnprstvz";
    let vowels = b"aeiou";

    let word = |rng: &mut StdRng| {
        let syllables = rng.gen_range(2..=4);
        let mut w = String::new();
        for _ in 0..syllables {
            w.push(consonants[rng.gen_range(0..consonants.len())] as char);
            w.push(vowels[rng.gen_range(0..vowels.len())] as char);
        }
        w
    };

    let mut catalog = Vec::with_capacity(entries);
    let mut seen = std::collections::HashSet::new();
    while catalog.len() < entries {
        let words = rng.gen_range(1..=3);
        let name = (0..words).map(|_| word(&mut rng)).collect::<Vec<_>>().join(" ");
        if seen.insert(name.clone()) {
            catalog.push(CatalogEntry::new(name));
        }
    }
    // A handful of fixed names so the benchmark queries have known targets
    for name in ["Winds of Rath", "Upheaval", "Jeskai Ascendancy", "Dark Confidant"] {
        catalog.push(CatalogEntry::new(name));
    }

    let aliases = vec![Alias::new("bob", "Dark Confidant")];
    Searcher::new(&catalog, &aliases).expect("benchmark catalog should index")
}

fn bench_search(c: &mut Criterion) {
    let searcher = setup_searcher(100_000);

    let queries = vec![
        ("alias_hit", "bob"),
        ("exact_name", "Upheaval"),
        ("prefix", "Jeskai Asc"),
        ("single_typo", "Upheavel"),
        ("multi_word_typo", "Womds of Rogh"),
        ("no_match", "qqqqqqqq"),
    ];

    let mut group = c.benchmark_group("search");
    group.sample_size(20);

    for (name, query) in queries {
        group.bench_function(name, |b| {
            b.iter(|| searcher.search(query));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);

use flatvec::FlatIndex;
use std::time::Instant;

fn random_vector(dim: usize, seed: u64) -> Vec<f32> {
    // Simple LCG pseudo-random generator (no external dep needed)
    let mut state = seed;
    (0..dim)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            // Map to [0.0, 1.0]
            ((state >> 33) as f32) / (u32::MAX as f32)
        })
        .collect()
}

fn main() {
    let dimension = 128;
    let db_size = 10_000;
    let query_size = 5;
    let k = 10;
    let path = "flat_l2.index";

    // === Phase 1: Build the index ===
    let mut index = FlatIndex::new(dimension).expect("Failed to create index");
    println!("Index trained: {}", index.is_trained());
    println!("Vectors before add: {}", index.ntotal());

    let db_vectors: Vec<Vec<f32>> = (0..db_size)
        .map(|i| random_vector(dimension, i as u64))
        .collect();

    let start = Instant::now();
    index.add(&db_vectors).expect("Failed to add vectors");
    println!("Vectors after add: {} ({:.3}s)\n", index.ntotal(), start.elapsed().as_secs_f64());

    // === Phase 2: Search ===
    let queries: Vec<Vec<f32>> = (0..query_size)
        .map(|i| random_vector(dimension, (db_size + i) as u64))
        .collect();

    let start = Instant::now();
    let results = index.search(&queries, k).expect("Search failed");
    println!("=== {} queries, top-{} each ({:.3}ms) ===",
        query_size, k, start.elapsed().as_secs_f64() * 1000.0);

    for (i, matches) in results.iter().enumerate() {
        let ids: Vec<usize> = matches.iter().map(|n| n.id).collect();
        let distances: Vec<String> = matches.iter().map(|n| format!("{:.4}", n.distance)).collect();
        println!("\nQuery {}:", i + 1);
        println!("  Nearest IDs:  {:?}", ids);
        println!("  L2 distances: [{}]", distances.join(", "));
    }

    // === Phase 3: Save, reload, reset ===
    index.save(path).expect("Failed to save index");
    println!("\nIndex saved to: {}", path);

    let mut loaded = FlatIndex::load(path).expect("Failed to load index");
    println!("Loaded index vector count: {}", loaded.ntotal());
    assert_eq!(loaded.ntotal(), index.ntotal());

    loaded.reset();
    println!("Vector count after reset: {}", loaded.ntotal());
    assert_eq!(loaded.ntotal(), 0);
}

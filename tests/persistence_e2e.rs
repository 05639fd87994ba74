use flatvec::FlatIndex;
use std::time::Instant;
use tempfile::NamedTempFile;

fn random_vector(dim: usize, seed: u64) -> Vec<f32> {
    // Simple LCG pseudo-random generator (no external dep needed)
    let mut state = seed;
    (0..dim)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            // Map to [-1.0, 1.0]
            ((state >> 33) as f32) / (u32::MAX as f32) * 2.0 - 1.0
        })
        .collect()
}

#[test]
fn test_save_load_10k_vectors_and_search() {
    let dim = 128;
    let num_vectors = 10_000;
    let num_searches = 100;
    let k = 10;

    println!("\n=== Persistence E2E Test ===");
    println!("Vectors: {}, Dimensions: {}, Searches: {}\n", num_vectors, dim, num_searches);

    // Phase 1: Create index and add 10K vectors
    let start = Instant::now();
    let mut index = FlatIndex::new(dim).unwrap();
    let vectors: Vec<Vec<f32>> = (0..num_vectors)
        .map(|i| random_vector(dim, i as u64))
        .collect();
    index.add(&vectors).unwrap();
    let build_time = start.elapsed();
    assert_eq!(index.ntotal(), num_vectors);
    println!("Phase 1 - Add {} vectors: {:.3}s ({:.0} adds/s)",
        num_vectors, build_time.as_secs_f64(),
        num_vectors as f64 / build_time.as_secs_f64());

    // Phase 2: Save to file
    let start = Instant::now();
    let temp = NamedTempFile::new().unwrap();
    let path = temp.path().to_str().unwrap();
    index.save(path).unwrap();
    let save_time = start.elapsed();
    let file_size = std::fs::metadata(path).unwrap().len();
    println!("Phase 2 - Save to disk: {:.3}s (file size: {:.2} MB)",
        save_time.as_secs_f64(), file_size as f64 / 1_048_576.0);
    // Header plus one f32 per stored value
    assert_eq!(file_size as usize, 12 + num_vectors * dim * 4);

    // Phase 3: Drop current index
    drop(index);

    // Phase 4: Load from file
    let start = Instant::now();
    let loaded = FlatIndex::load(path).unwrap();
    let load_time = start.elapsed();
    assert_eq!(loaded.ntotal(), num_vectors);
    assert_eq!(loaded.dim(), dim);
    println!("Phase 4 - Load from disk: {:.3}s", load_time.as_secs_f64());

    // Phase 5: Run random searches against the loaded index
    let start = Instant::now();
    for i in 0..num_searches {
        let query = random_vector(dim, (num_vectors + i) as u64);
        let results = loaded.search(&[query], k).unwrap();

        assert_eq!(results[0].len(), k);
        // Verify results are sorted by distance ascending
        for w in results[0].windows(2) {
            assert!(w[0].distance <= w[1].distance, "Results not sorted by distance");
        }
    }
    let search_time = start.elapsed();
    println!("Phase 5 - {} searches: {:.3}s (avg {:.3}ms/search)\n",
        num_searches, search_time.as_secs_f64(),
        search_time.as_secs_f64() / num_searches as f64 * 1000.0);
}

#[test]
fn test_loaded_index_preserves_exact_matches() {
    let dim = 64;
    let num_vectors = 500;

    let mut index = FlatIndex::new(dim).unwrap();
    let vectors: Vec<Vec<f32>> = (0..num_vectors)
        .map(|i| random_vector(dim, i as u64))
        .collect();
    index.add(&vectors).unwrap();

    let temp = NamedTempFile::new().unwrap();
    let path = temp.path().to_str().unwrap();
    index.save(path).unwrap();

    let loaded = FlatIndex::load(path).unwrap();

    // Querying with a stored vector must return that vector's own
    // identifier at distance zero
    for probe in [0, 123, num_vectors - 1] {
        let results = loaded.search(&[vectors[probe].clone()], 1).unwrap();
        assert_eq!(results[0][0].id, probe);
        assert_eq!(results[0][0].distance, 0.0);
    }

    // Per-identifier contents survive the round trip
    for id in 0..num_vectors {
        assert_eq!(loaded.get(id).unwrap(), vectors[id].as_slice());
    }
}

#[test]
fn test_reset_after_load() {
    let dim = 32;

    let mut index = FlatIndex::new(dim).unwrap();
    let vectors: Vec<Vec<f32>> = (0..100)
        .map(|i| random_vector(dim, i as u64))
        .collect();
    index.add(&vectors).unwrap();

    let temp = NamedTempFile::new().unwrap();
    let path = temp.path().to_str().unwrap();
    index.save(path).unwrap();

    let mut loaded = FlatIndex::load(path).unwrap();
    assert_eq!(loaded.ntotal(), 100);

    loaded.reset();
    assert_eq!(loaded.ntotal(), 0);

    // Identifiers restart at 0 after the reset
    loaded.add(&[random_vector(dim, 999)]).unwrap();
    let results = loaded.search(&[random_vector(dim, 999)], 1).unwrap();
    assert_eq!(results[0][0].id, 0);
}

#[test]
fn test_load_rejects_truncated_file() {
    let dim = 16;

    let mut index = FlatIndex::new(dim).unwrap();
    index.add(&[random_vector(dim, 1), random_vector(dim, 2)]).unwrap();

    let temp = NamedTempFile::new().unwrap();
    let path = temp.path().to_str().unwrap();
    index.save(path).unwrap();

    // Chop the tail off the file
    let bytes = std::fs::read(path).unwrap();
    std::fs::write(path, &bytes[..bytes.len() - 7]).unwrap();

    let result = FlatIndex::load(path);
    assert!(matches!(result, Err(flatvec::IndexError::CorruptData(_))));
}

//! Sort Module Tests
//!
//! End-to-end properties of the distributed sort: conservation of keys,
//! global ordering across ranks, splitter monotonicity, and the behavior
//! of degenerate runs (single worker, constant input).

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::config::RunConfig;
    use crate::network::fabric::Fabric;
    use crate::sort::butterfly::redistribute;
    use crate::sort::run_cluster;
    use crate::sort::sample::draw_sample;
    use crate::sort::splitter::resolve_splitters;

    async fn sort_all(workers: usize, sample_size: usize, keys: Vec<i64>) -> Vec<Vec<i64>> {
        let config = RunConfig::new(workers, keys.len(), sample_size).unwrap();
        run_cluster(config, keys).await.unwrap()
    }

    fn random_keys(count: usize, seed: u64) -> Vec<i64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count).map(|_| rng.gen_range(-1000..1000)).collect()
    }

    // ============================================================
    // SCENARIOS
    // ============================================================

    #[tokio::test]
    async fn descending_input_across_four_workers() {
        // p=4, n=16, s=8, input 15..0: every rank ends with an ascending
        // bucket and the rank-order concatenation is 0..16. How many keys
        // land on each rank depends on the sampled splitters; the exact
        // quartile routing is pinned in butterfly_routes_descending_quartiles.
        let keys: Vec<i64> = (0..16).rev().collect();
        let partitions = sort_all(4, 8, keys).await;

        assert_eq!(partitions.len(), 4);
        for bucket in &partitions {
            assert!(bucket.windows(2).all(|w| w[0] <= w[1]));
        }

        let merged: Vec<i64> = partitions.into_iter().flatten().collect();
        let expected: Vec<i64> = (0..16).collect();
        assert_eq!(merged, expected);
    }

    #[tokio::test]
    async fn butterfly_routes_descending_quartiles() {
        // Splitters resolved by hand for 16 descending keys over 4
        // workers (each boundary falls strictly between two quartiles):
        // every rank must end up holding exactly its quartile.
        let splitters = [0.0, 3.5, 7.5, 11.5];
        let chunks: [Vec<i64>; 4] = [
            vec![12, 13, 14, 15],
            vec![8, 9, 10, 11],
            vec![4, 5, 6, 7],
            vec![0, 1, 2, 3],
        ];

        let mut handles = Vec::new();
        for (rank, mut mailbox) in Fabric::connect(4).into_iter().enumerate() {
            let local = chunks[rank].clone();
            handles.push(tokio::spawn(async move {
                redistribute(&mut mailbox, &splitters, local).await.unwrap()
            }));
        }

        for (rank, handle) in handles.into_iter().enumerate() {
            let bucket = handle.await.unwrap();
            let expected: Vec<i64> = (rank as i64 * 4..rank as i64 * 4 + 4).collect();
            assert_eq!(bucket, expected, "rank {} bucket", rank);
        }
    }

    #[tokio::test]
    async fn single_worker_sorts_without_exchange() {
        // p=1: zero butterfly rounds, output is just the sorted input.
        let keys = vec![5i64, -3, 9, 0, 9, -7, 2, 1];
        let mut expected = keys.clone();
        expected.sort_unstable();

        let partitions = sort_all(1, 4, keys).await;
        assert_eq!(partitions, vec![expected]);
    }

    #[tokio::test]
    async fn constant_input_is_conserved() {
        // Every key equal: sampling must terminate and no key may migrate
        // into oblivion.
        let keys = vec![42i64; 32];
        let partitions = sort_all(4, 8, keys).await;

        let merged: Vec<i64> = partitions.into_iter().flatten().collect();
        assert_eq!(merged, vec![42i64; 32]);
    }

    #[tokio::test]
    async fn already_sorted_input_is_unchanged() {
        let keys: Vec<i64> = (0..64).collect();
        let partitions = sort_all(4, 16, keys.clone()).await;

        let merged: Vec<i64> = partitions.into_iter().flatten().collect();
        assert_eq!(merged, keys);
    }

    // ============================================================
    // PROPERTIES
    // ============================================================

    #[tokio::test]
    async fn conservation_of_keys() {
        for seed in 0..5 {
            let keys = random_keys(64, seed);
            let mut expected = keys.clone();
            expected.sort_unstable();

            let partitions = sort_all(4, 16, keys).await;
            let mut merged: Vec<i64> = partitions.into_iter().flatten().collect();
            merged.sort_unstable();
            assert_eq!(merged, expected, "keys lost or duplicated (seed {})", seed);
        }
    }

    #[tokio::test]
    async fn global_order_across_ranks() {
        let keys = random_keys(128, 7);
        let partitions = sort_all(8, 32, keys).await;

        // Within each bucket ascending; across buckets every key of rank i
        // is <= every key of rank j for i < j. Empty buckets are legal
        // when the input is skewed.
        for bucket in &partitions {
            assert!(bucket.windows(2).all(|w| w[0] <= w[1]));
        }

        let mut previous_max: Option<i64> = None;
        for bucket in &partitions {
            if let (Some(max), Some(&min)) = (previous_max, bucket.first()) {
                assert!(max <= min, "rank boundary out of order");
            }
            if let Some(&max) = bucket.last() {
                previous_max = Some(max);
            }
        }
    }

    #[tokio::test]
    async fn sorted_concatenation_matches_reference_sort() {
        let keys = random_keys(64, 99);
        let mut expected = keys.clone();
        expected.sort_unstable();

        let partitions = sort_all(2, 8, keys).await;
        let merged: Vec<i64> = partitions.into_iter().flatten().collect();
        assert_eq!(merged, expected);
    }

    #[tokio::test]
    async fn splitter_vector_is_nondecreasing() {
        // Run the resolver protocol directly over a 4-worker fabric, with
        // each worker sampling its own sorted chunk of a shuffled input.
        let keys = random_keys(64, 3);
        let chunk_len = keys.len() / 4;

        let mut handles = Vec::new();
        for (rank, mut mailbox) in Fabric::connect(4).into_iter().enumerate() {
            let mut chunk = keys[rank * chunk_len..(rank + 1) * chunk_len].to_vec();
            handles.push(tokio::spawn(async move {
                chunk.sort_unstable();
                let sample = draw_sample(&chunk, 4, rank);
                resolve_splitters(&mut mailbox, sample).await.unwrap()
            }));
        }

        let mut vectors = Vec::new();
        for handle in handles {
            vectors.push(handle.await.unwrap());
        }

        // Identical on every worker, length p, nondecreasing.
        for vector in &vectors {
            assert_eq!(vector.len(), 4);
            assert_eq!(vector, &vectors[0]);
            assert!(vector.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[tokio::test]
    async fn driver_rejects_wrong_key_count() {
        let config = RunConfig::new(2, 16, 4).unwrap();
        let result = run_cluster(config, vec![1, 2, 3]).await;
        assert!(result.is_err());
    }
}

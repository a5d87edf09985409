//! Property tests for flat index search ordering.

use proptest::prelude::*;
use qalam_rag::index::VectorIndex;

/// Generate an embedding with bounded components.
fn arb_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim)
}

/// For any set of stored vectors and any query, search results are
/// ordered by ascending L2 distance and bounded by both `top_k` and the
/// number of stored vectors.
mod prop_search_ordering {
    use super::*;

    const DIM: usize = 8;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ascending_and_bounded(
            embeddings in proptest::collection::vec(arb_embedding(DIM), 1..30),
            query in arb_embedding(DIM),
            top_k in 1usize..35,
        ) {
            let mut index = VectorIndex::new(DIM);
            let stored = embeddings.len();
            for (i, embedding) in embeddings.into_iter().enumerate() {
                index.insert(i as u32, format!("eng_{i:02}"), embedding).unwrap();
            }

            let hits = index.search(&query, top_k).unwrap();

            prop_assert!(hits.len() <= top_k);
            prop_assert!(hits.len() <= stored);

            for window in hits.windows(2) {
                prop_assert!(
                    window[0].distance <= window[1].distance,
                    "hits not in ascending distance order: {} > {}",
                    window[0].distance,
                    window[1].distance,
                );
            }
        }

        #[test]
        fn search_is_deterministic(
            embeddings in proptest::collection::vec(arb_embedding(DIM), 1..20),
            query in arb_embedding(DIM),
        ) {
            let mut index = VectorIndex::new(DIM);
            for (i, embedding) in embeddings.into_iter().enumerate() {
                index.insert(i as u32, format!("eng_{i:02}"), embedding).unwrap();
            }

            let first = index.search(&query, 5).unwrap();
            let second = index.search(&query, 5).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}

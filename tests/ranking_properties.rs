//! Property-based tests for the similarity ranker.
//!
//! These check the ranking contract over generated tag sets, embeddings and
//! pool sizes rather than hand-picked fixtures.

use folio::{rank, Item};
use proptest::prelude::*;
use similarity::score::{cosine, jaccard};

const VOCAB: &[&str] = &[
    "nature", "landscape", "ocean", "forest", "portrait", "pets", "urban", "food",
];

fn tag_set() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(VOCAB), 0..6)
}

fn embedding() -> impl Strategy<Value = Vec<f32>> {
    prop_oneof![
        Just(Vec::new()),
        prop::collection::vec(-1.0f32..1.0, 4),
        prop::collection::vec(-1.0f32..1.0, 3),
        Just(vec![0.0f32; 4]),
    ]
}

fn item(id: usize) -> impl Strategy<Value = Item> {
    (tag_set(), embedding()).prop_map(move |(tags, embedding)| {
        Item::new(format!("img-{id}"), "admin-1")
            .with_tags(tags)
            .with_embedding(embedding)
    })
}

fn pool() -> impl Strategy<Value = Vec<Item>> {
    (0usize..24).prop_flat_map(|n| (0..n).map(item).collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn result_length_is_min_of_limit_and_pool(
        reference in item(usize::MAX),
        candidates in pool(),
        limit in 0usize..32,
    ) {
        let expected = limit.min(candidates.len());
        let hits = rank(&reference, candidates, limit);
        prop_assert_eq!(hits.len(), expected);
    }

    #[test]
    fn output_is_sorted_and_stable(
        reference in item(usize::MAX),
        candidates in pool(),
    ) {
        let position = |id: &str| id.trim_start_matches("img-").parse::<usize>().unwrap_or(0);
        let hits = rank(&reference, candidates.clone(), candidates.len());

        for pair in hits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(position(&pair[0].item.id) < position(&pair[1].item.id));
            }
        }
    }

    #[test]
    fn scores_are_always_finite(
        reference in item(usize::MAX),
        candidates in pool(),
    ) {
        let hits = rank(&reference, candidates.clone(), candidates.len());
        for hit in hits {
            prop_assert!(hit.score.is_finite());
            prop_assert!(hit.score >= -0.3 - 1e-5 && hit.score <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn jaccard_is_symmetric(a in item(0), b in item(1)) {
        prop_assert_eq!(jaccard(&a.tags, &b.tags), jaccard(&b.tags, &a.tags));
    }

    #[test]
    fn mismatched_lengths_score_zero(
        a in prop::collection::vec(-1.0f32..1.0, 1..8),
        extra in 1usize..4,
    ) {
        let b: Vec<f32> = a.iter().copied().chain(std::iter::repeat(0.5).take(extra)).collect();
        prop_assert_eq!(cosine(&a, &b), 0.0);
    }

    #[test]
    fn identical_items_score_one(
        tags in prop::collection::vec(prop::sample::select(VOCAB), 1..6),
        embedding in prop::collection::vec(0.1f32..1.0, 4),
    ) {
        let reference = Item::new("ref", "admin-1").with_tags(tags.clone()).with_embedding(embedding.clone());
        let twin = Item::new("twin", "admin-1").with_tags(tags).with_embedding(embedding);

        let hits = rank(&reference, vec![twin], 1);
        prop_assert!((hits[0].tag_similarity - 1.0).abs() < 1e-6);
        prop_assert!((hits[0].embedding_similarity - 1.0).abs() < 1e-4);
        prop_assert!((hits[0].score - 1.0).abs() < 1e-4);
    }
}

#[test]
fn cat_pet_example() {
    let reference = Item::new("ref", "admin-1").with_tags(["cat", "pet"]);
    let a = Item::new("A", "admin-1").with_tags(["cat", "pet"]);
    let b = Item::new("B", "admin-1").with_tags(["cat"]);

    let hits = rank(&reference, vec![b, a], 2);

    assert_eq!(hits[0].item.id, "A");
    assert_eq!(hits[1].item.id, "B");
    assert!((hits[0].score - 0.7).abs() < 1e-6);
    assert!((hits[1].score - 0.35).abs() < 1e-6);
}

#[test]
fn zero_limit_ignores_pool_size() {
    let reference = Item::new("ref", "admin-1").with_tags(["cat"]);
    let pool: Vec<Item> = (0..100)
        .map(|i| Item::new(format!("img-{i}"), "admin-1").with_tags(["cat"]))
        .collect();
    assert!(rank(&reference, pool, 0).is_empty());
}

use super::common::{build_service, ngo, post, MemoryStore};
use crate::matching::domain::{NeedLevel, SurplusPostId};
use crate::matching::service::MatchingError;

fn seeded_store() -> MemoryStore {
    MemoryStore::default()
        .with_post(post("post-1", 60, 60))
        .with_ngo(ngo("ngo-close", 2.0, 40))
        .with_ngo(ngo("ngo-mid", 6.0, 40))
        .with_ngo(ngo("ngo-far", 12.0, 40))
}

#[tokio::test]
async fn closer_ngos_rank_first_when_otherwise_equal() {
    let (service, _) = build_service(seeded_store());
    let matches = service
        .find_best_matches(&SurplusPostId("post-1".to_string()), None)
        .await
        .expect("ranking succeeds");

    let order: Vec<&str> = matches.iter().map(|m| m.ngo_id.0.as_str()).collect();
    assert_eq!(order, vec!["ngo-close", "ngo-mid", "ngo-far"]);
    assert!(matches[0].overall_score > matches[1].overall_score);
    assert!(matches[1].overall_score > matches[2].overall_score);
}

#[tokio::test]
async fn unknown_post_is_a_not_found_error() {
    let (service, _) = build_service(seeded_store());
    let result = service
        .find_best_matches(&SurplusPostId("post-missing".to_string()), None)
        .await;

    match result {
        Err(MatchingError::PostNotFound(id)) => assert_eq!(id, "post-missing"),
        other => panic!("expected PostNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_candidate_pool_returns_an_empty_list() {
    let store = MemoryStore::default().with_post(post("post-1", 60, 60));
    let (service, _) = build_service(store);

    let matches = service
        .find_best_matches(&SurplusPostId("post-1".to_string()), None)
        .await
        .expect("no candidates is not an error");
    assert!(matches.is_empty());
}

#[tokio::test]
async fn ineligible_snapshots_are_filtered_before_scoring() {
    let mut unverified = ngo("ngo-unverified", 1.0, 40);
    unverified.verified = false;
    let mut homeless = ngo("ngo-no-location", 1.0, 40);
    homeless.location = None;
    let mut exhausted = ngo("ngo-exhausted", 1.0, 40);
    exhausted.capacity_used = 40;
    let mut oversubscribed = ngo("ngo-oversubscribed", 1.0, 40);
    oversubscribed.capacity_used = 55;

    let store = MemoryStore::default()
        .with_post(post("post-1", 60, 60))
        .with_ngo(unverified)
        .with_ngo(homeless)
        .with_ngo(exhausted)
        .with_ngo(oversubscribed)
        .with_ngo(ngo("ngo-ok", 5.0, 40));

    let (service, _) = build_service(store);
    let matches = service
        .find_best_matches(&SurplusPostId("post-1".to_string()), None)
        .await
        .expect("ranking succeeds");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].ngo_id.0, "ngo-ok");
}

#[tokio::test]
async fn result_count_is_truncated_to_the_request() {
    let mut store = MemoryStore::default().with_post(post("post-1", 60, 60));
    for n in 0..8 {
        store = store.with_ngo(ngo(&format!("ngo-{n}"), f64::from(n) + 1.0, 40));
    }
    let (service, _) = build_service(store);
    let post_id = SurplusPostId("post-1".to_string());

    let default_slice = service
        .find_best_matches(&post_id, None)
        .await
        .expect("ranking succeeds");
    assert_eq!(default_slice.len(), 5);

    let two = service
        .find_best_matches(&post_id, Some(2))
        .await
        .expect("ranking succeeds");
    assert_eq!(two.len(), 2);
}

#[tokio::test]
async fn exact_ties_break_by_ngo_id_ascending() {
    let store = MemoryStore::default()
        .with_post(post("post-1", 60, 60))
        .with_ngo(ngo("ngo-b", 4.0, 40))
        .with_ngo(ngo("ngo-a", 4.0, 40))
        .with_ngo(ngo("ngo-c", 4.0, 40));

    let (service, _) = build_service(store);
    let matches = service
        .find_best_matches(&SurplusPostId("post-1".to_string()), None)
        .await
        .expect("ranking succeeds");

    let order: Vec<&str> = matches.iter().map(|m| m.ngo_id.0.as_str()).collect();
    assert_eq!(order, vec!["ngo-a", "ngo-b", "ngo-c"]);
    assert_eq!(matches[0].overall_score, matches[2].overall_score);
}

#[tokio::test]
async fn ranking_is_idempotent_over_unchanged_data() {
    let (service, _) = build_service(seeded_store());
    let post_id = SurplusPostId("post-1".to_string());

    let first = service
        .find_best_matches(&post_id, None)
        .await
        .expect("first ranking");
    let second = service
        .find_best_matches(&post_id, None)
        .await
        .expect("second ranking");

    assert_eq!(first, second);
}

#[tokio::test]
async fn urgent_need_can_overtake_a_closer_candidate() {
    let mut urgent = ngo("ngo-urgent", 9.0, 40);
    urgent.need_level = NeedLevel::Critical;

    let store = MemoryStore::default()
        .with_post(post("post-1", 60, 60))
        .with_ngo(ngo("ngo-closer", 6.0, 40))
        .with_ngo(urgent);

    let (service, _) = build_service(store);
    let matches = service
        .find_best_matches(&SurplusPostId("post-1".to_string()), None)
        .await
        .expect("ranking succeeds");

    assert_eq!(matches[0].ngo_id.0, "ngo-urgent");
}

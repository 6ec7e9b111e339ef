mod utils;

use futures::{StreamExt, TryStreamExt};
use sweep_core::{
    collect_image_ids, empty_repository, image_pages, EmptyOutcome, ImageId, RegistryOperation,
};
use test_log::test;
use utils::{images, Call, MockRegistry};

#[test(tokio::test)]
async fn test_pages_follow_continuation_tokens() {
    let registry = MockRegistry::with_pages(vec![images("a", 2), images("b", 2), images("c", 1)]);

    let pages: Vec<_> = image_pages(&registry, "api")
        .try_collect()
        .await
        .expect("listing should succeed");

    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].next_token.as_deref(), Some("token-1"));
    assert_eq!(pages[1].next_token.as_deref(), Some("token-2"));
    assert!(pages[2].next_token.is_none());

    let tokens: Vec<_> = registry
        .calls()
        .into_iter()
        .map(|call| match call {
            Call::List { next_token, .. } => next_token,
            Call::BatchDelete { .. } => panic!("listing must not delete"),
        })
        .collect();
    assert_eq!(
        tokens,
        vec![None, Some("token-1".to_string()), Some("token-2".to_string())]
    );
}

#[test(tokio::test)]
async fn test_pages_are_fetched_lazily() {
    let registry = MockRegistry::with_pages(vec![images("a", 2), images("b", 2)]);

    let first = image_pages(&registry, "api").boxed().next().await;

    assert!(matches!(first, Some(Ok(_))));
    assert_eq!(registry.calls().len(), 1);
}

#[test(tokio::test)]
async fn test_collect_keeps_listing_order() {
    let first = images("a", 3);
    let second = images("b", 2);
    let registry = MockRegistry::with_pages(vec![first.clone(), Vec::new(), second.clone()]);

    let image_ids = collect_image_ids(&registry, "api").await.unwrap();

    let expected: Vec<ImageId> = first.into_iter().chain(second).collect();
    assert_eq!(image_ids, expected);
}

#[test(tokio::test)]
async fn test_list_failure_stops_before_delete() {
    let registry = MockRegistry::with_pages(vec![images("a", 2), images("b", 2), images("c", 2)])
        .fail_list_at(1, "ThrottlingException");

    let err = empty_repository(&registry, "api")
        .await
        .expect_err("listing failure should propagate");

    assert_eq!(err.operation, RegistryOperation::ListImages);
    assert_eq!(err.code.as_deref(), Some("ThrottlingException"));
    assert_eq!(registry.calls().len(), 2);
    assert!(registry.delete_calls().is_empty());
    assert_eq!(registry.remaining_images().len(), 6);
}

#[test(tokio::test)]
async fn test_empty_repository_reports_already_empty() {
    let registry = MockRegistry::empty();

    let outcome = empty_repository(&registry, "api").await.unwrap();

    assert_eq!(outcome, EmptyOutcome::AlreadyEmpty);
    assert!(registry.delete_calls().is_empty());
}

#[test(tokio::test)]
async fn test_per_image_failures_are_reported_not_raised() {
    let listed = images("a", 3);
    let stuck = listed[1].clone();
    let registry = MockRegistry::with_pages(vec![listed.clone()]).reject(stuck.clone());

    let outcome = empty_repository(&registry, "api")
        .await
        .expect("per-image failures do not fail the call");

    let summary = match outcome {
        EmptyOutcome::Deleted(summary) => summary,
        EmptyOutcome::AlreadyEmpty => panic!("repository was not empty"),
    };
    assert_eq!(summary.deleted, vec![listed[0].clone(), listed[2].clone()]);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].image_id.as_ref(), Some(&stuck));

    // No retry of the rejected image
    assert_eq!(registry.delete_calls().len(), 1);
    assert_eq!(registry.remaining_images(), vec![stuck]);
}

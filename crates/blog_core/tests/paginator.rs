use blog_core::{AppendOutcome, PostSummary, PostSummaryPage, PostSummaryPaginator};
use pretty_assertions::assert_eq;

fn summary(uid: &str) -> PostSummary {
    PostSummary {
        identifier: uid.to_string(),
        publication_date: "19 Apr 2021".to_string(),
        title: format!("Title {uid}"),
        subtitle: format!("Subtitle {uid}"),
        author: "Joseph Oliveira".to_string(),
    }
}

fn page(uids: &[&str], next: Option<&str>) -> PostSummaryPage {
    PostSummaryPage::new(
        uids.iter().map(|uid| summary(uid)).collect(),
        next.map(ToOwned::to_owned),
    )
}

fn uids(paginator: &PostSummaryPaginator) -> Vec<&str> {
    paginator
        .items()
        .iter()
        .map(|s| s.identifier.as_str())
        .collect()
}

#[test]
fn pages_concatenate_in_order() {
    let mut paginator = PostSummaryPaginator::new(page(&["a", "b"], Some("p2")));

    let outcome = paginator.append_page(page(&["c", "d"], Some("p3")));
    assert_eq!(outcome, AppendOutcome::Appended { count: 2 });
    assert_eq!(paginator.next_page_token(), Some("p3"));

    let outcome = paginator.append_page(page(&["e"], None));
    assert_eq!(outcome, AppendOutcome::Appended { count: 1 });

    assert_eq!(uids(&paginator), vec!["a", "b", "c", "d", "e"]);
    assert_eq!(paginator.next_page_token(), None);
    assert!(!paginator.has_next_page());
}

#[test]
fn exhausted_paginator_ignores_further_pages() {
    let mut paginator = PostSummaryPaginator::new(page(&["a"], None));
    let before = paginator.clone();

    let outcome = paginator.append_page(page(&["b"], Some("p9")));

    assert_eq!(outcome, AppendOutcome::Exhausted);
    assert_eq!(paginator, before);
}

#[test]
fn duplicates_are_not_removed() {
    let mut paginator = PostSummaryPaginator::new(page(&["a"], Some("p2")));
    paginator.append_page(page(&["a"], None));
    assert_eq!(uids(&paginator), vec!["a", "a"]);
}

#[test]
fn empty_page_still_advances_the_token() {
    let mut paginator = PostSummaryPaginator::new(page(&[], Some("p2")));
    assert!(paginator.is_empty());

    let outcome = paginator.append_page(page(&[], Some("p3")));
    assert_eq!(outcome, AppendOutcome::Appended { count: 0 });
    assert_eq!(paginator.next_page_token(), Some("p3"));
    assert_eq!(paginator.len(), 0);
}

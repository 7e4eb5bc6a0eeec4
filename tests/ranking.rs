use static_site_search::indexer::build_index;
use static_site_search::model::Document;
use static_site_search::search::query::{DEFAULT_LIMIT, SearchClient, TITLE_WEIGHT};
use static_site_search::search::session::QuerySession;
use static_site_search::search::tokenize::tokenize;

fn corpus() -> Vec<Document> {
    vec![
        Document::new("/docs/a", "Alpha")
            .with_section("Intro", "composable views in rails")
            .with_section("Details", "views views views everywhere"),
        Document::new("/docs/b", "Views Handbook")
            .with_section("Getting Started", "short body"),
        Document::new("/docs/c", "Gamma").with_section("Views", "single mention of views"),
    ]
}

fn client() -> SearchClient {
    SearchClient::new(build_index(&corpus())).unwrap()
}

#[test]
fn single_term_query_resolves_to_a_linkable_section() {
    let docs = vec![
        Document::new("/docs/a", "Alpha").with_section("Intro", "composable views in rails"),
    ];
    let client = SearchClient::new(build_index(&docs)).unwrap();

    let hits = client.search("composable", DEFAULT_LIMIT);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].path, "/docs/a");
    assert_eq!(hits[0].anchor, "intro");
    assert_eq!(hits[0].heading, "Intro");
    assert_eq!(hits[0].title, "Alpha");
}

#[test]
fn every_body_token_is_recallable_by_single_token_query() {
    let docs = corpus();
    let client = client();

    for doc in &docs {
        for section in &doc.sections {
            for token in tokenize(&section.body) {
                let hits = client.search(&token, usize::MAX);
                assert!(
                    hits.iter()
                        .any(|h| h.path == doc.path && h.heading == section.heading),
                    "token {token:?} failed to recall section {:?} of {}",
                    section.heading,
                    doc.path
                );
            }
        }
    }
}

#[test]
fn title_matches_outrank_body_matches() {
    let hits = client().search("views", DEFAULT_LIMIT);
    assert!(!hits.is_empty());
    // "/docs/b" carries "views" only in its page title; one title term must
    // outrank a single body mention.
    let b_score = hits.iter().find(|h| h.path == "/docs/b").unwrap().score;
    // "/docs/c" has "views" in both heading and body.
    let c_score = hits.iter().find(|h| h.path == "/docs/c").unwrap().score;
    // "/docs/a" Intro mentions "views" once, body only.
    let a_intro = hits
        .iter()
        .find(|h| h.path == "/docs/a" && h.heading == "Intro")
        .unwrap();
    assert_eq!(b_score, TITLE_WEIGHT);
    assert!(b_score > a_intro.score);
    assert!(c_score > a_intro.score);
}

#[test]
fn repeated_body_terms_accumulate_score() {
    let hits = client().search("views", DEFAULT_LIMIT);
    let details = hits
        .iter()
        .find(|h| h.path == "/docs/a" && h.heading == "Details")
        .unwrap();
    let intro = hits
        .iter()
        .find(|h| h.path == "/docs/a" && h.heading == "Intro")
        .unwrap();
    assert!(details.score > intro.score);
}

#[test]
fn multi_token_queries_sum_per_token_scores() {
    let client = client();
    let single = client.search("composable", DEFAULT_LIMIT);
    let double = client.search("composable rails", DEFAULT_LIMIT);
    let s = single.iter().find(|h| h.anchor == "intro").unwrap();
    let d = double.iter().find(|h| h.anchor == "intro").unwrap();
    assert!(d.score > s.score);
}

#[test]
fn ties_break_by_document_order() {
    let docs = vec![
        Document::new("/first", "One").with_section("A", "needle"),
        Document::new("/second", "Two").with_section("B", "needle"),
    ];
    let client = SearchClient::new(build_index(&docs)).unwrap();
    let hits = client.search("needle", DEFAULT_LIMIT);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].score, hits[1].score);
    assert_eq!(hits[0].path, "/first");
    assert_eq!(hits[1].path, "/second");
}

#[test]
fn results_are_sorted_descending_by_score() {
    let hits = client().search("views rails", usize::MAX);
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn limit_bounds_the_result_count() {
    let hits = client().search("views", 2);
    assert_eq!(hits.len(), 2);
}

#[test]
fn absent_tokens_yield_empty_results() {
    assert!(client().search("kubernetes", DEFAULT_LIMIT).is_empty());
}

#[test]
fn empty_query_yields_empty_results_without_error() {
    assert!(client().search("", DEFAULT_LIMIT).is_empty());
}

#[test]
fn query_normalization_matches_builder_normalization() {
    // Mixed case and punctuation in the query must still match indexed text.
    let hits = client().search("  Composable!!  ", DEFAULT_LIMIT);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].anchor, "intro");
}

#[test]
fn stale_tickets_are_dropped_by_the_caller() {
    let client = client();
    let session = QuerySession::new();

    // Simulate a debounced UI: an older in-flight query finishing after a
    // newer one was issued must not be rendered.
    let stale = session.ticket();
    let stale_hits = client.search("views", DEFAULT_LIMIT);

    let current = session.ticket();
    let current_hits = client.search("composable", DEFAULT_LIMIT);

    assert!(!session.is_current(stale));
    assert!(session.is_current(current));
    // Only the current result set would reach the screen.
    assert!(!stale_hits.is_empty());
    assert_eq!(current_hits.len(), 1);
}

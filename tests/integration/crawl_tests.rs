//! Integration tests for the crawler
//!
//! Most tests drive the crawler with a scripted in-memory fetcher so the
//! graph properties can be checked exactly. The last tests use wiremock to
//! run the real HTTP fetcher and HTML extractor end-to-end.

mod common;

use common::{edge_set, generated_site, set, strings, ScriptedFetcher};
use linkrank::crawler::{Crawler, FetchError, HtmlLinkExtractor};
use linkrank::{CrawlOutcome, LinkRankError, PageState};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run_crawl(
    fetcher: Arc<ScriptedFetcher>,
    seeds: &[&str],
    domain: &str,
    max_nodes: usize,
    concurrency: usize,
) -> CrawlOutcome {
    Crawler::new(fetcher, Arc::new(HtmlLinkExtractor))
        .with_concurrency(concurrency)
        .with_shuffle_seed(Some(42))
        .run(&strings(seeds), domain, max_nodes)
        .await
        .expect("crawl failed")
}

#[tokio::test]
async fn test_budget_and_domain_filter_example() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .html("http://x.test/a", &["http://x.test/b", "http://other.test/c"])
            .html("http://x.test/b", &["http://x.test/d"]),
    );

    let outcome = run_crawl(fetcher.clone(), &["http://x.test/a"], "x.test", 2, 4).await;

    assert_eq!(
        outcome.graph.nodes(),
        set(&["http://x.test/a", "http://x.test/b"])
    );
    assert_eq!(
        outcome.graph.edges(),
        edge_set(&[("http://x.test/a", "http://x.test/b")])
    );

    // b is a node but was never expanded
    assert_eq!(fetcher.fetched(), set(&["http://x.test/a"]));
    assert_eq!(
        outcome.graph.node("http://x.test/b").unwrap().state,
        PageState::Discovered
    );
    assert!(outcome.report.budget_reached);
    assert_eq!(outcome.report.pending, 1);
}

#[tokio::test]
async fn test_off_domain_links_never_become_nodes() {
    let fetcher = Arc::new(generated_site(0));
    let outcome = run_crawl(fetcher, &["http://x.test/p0"], "x.test", 1000, 4).await;

    assert_eq!(outcome.graph.node_count(), 30);
    for url in outcome.graph.nodes() {
        assert!(url.starts_with("http://x.test/"), "unexpected node {}", url);
    }
    assert!(!outcome.report.budget_reached);
}

#[tokio::test]
async fn test_seeds_bypass_domain_filter() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .html(
                "http://other.test/start",
                &["http://x.test/a", "http://other.test/more"],
            )
            .html("http://x.test/a", &[]),
    );

    let outcome = run_crawl(fetcher, &["http://other.test/start"], "x.test", 10, 2).await;

    assert_eq!(
        outcome.graph.nodes(),
        set(&["http://other.test/start", "http://x.test/a"])
    );
    assert_eq!(
        outcome.graph.edges(),
        edge_set(&[("http://other.test/start", "http://x.test/a")])
    );
}

#[tokio::test]
async fn test_links_to_visited_pages_add_no_edges() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .html("http://x.test/a", &["http://x.test/b"])
            .html("http://x.test/b", &["http://x.test/a", "http://x.test/b"]),
    );

    let outcome = run_crawl(fetcher.clone(), &["http://x.test/a"], "x.test", 10, 2).await;

    assert_eq!(
        outcome.graph.edges(),
        edge_set(&[("http://x.test/a", "http://x.test/b")])
    );
    assert_eq!(
        outcome.graph.node("http://x.test/b").unwrap().state,
        PageState::Processed
    );
    assert!(fetcher.calls().values().all(|&n| n == 1));
}

#[tokio::test]
async fn test_crawl_is_deterministic_across_interleavings() {
    let seeds = ["http://x.test/p0", "http://x.test/p5", "http://x.test/p17"];

    for budget in [4, 12, 25, 1000] {
        let baseline = run_crawl(Arc::new(generated_site(0)), &seeds, "x.test", budget, 8).await;

        for _ in 0..4 {
            let fetcher = Arc::new(generated_site(5));
            let outcome = run_crawl(fetcher, &seeds, "x.test", budget, 8).await;

            assert_eq!(outcome.graph.nodes(), baseline.graph.nodes(), "budget {}", budget);
            assert_eq!(outcome.graph.edges(), baseline.graph.edges(), "budget {}", budget);
        }
    }
}

#[tokio::test]
async fn test_full_site_nodes_independent_of_seed_order() {
    let seeds = strings(&["http://x.test/p0", "http://x.test/p9", "http://x.test/p21"]);

    let mut results = Vec::new();
    for shuffle in [None, Some(1), Some(2)] {
        let outcome = Crawler::new(Arc::new(generated_site(3)), Arc::new(HtmlLinkExtractor))
            .with_concurrency(6)
            .with_shuffle_seed(shuffle)
            .run(&seeds, "x.test", 1000)
            .await
            .unwrap();
        // Each page has exactly one discovering edge unless it is a seed
        assert_eq!(
            outcome.graph.edge_count(),
            outcome.graph.node_count() - seeds.len()
        );
        results.push(outcome.graph.nodes());
    }

    assert_eq!(results[0].len(), 30);
    assert_eq!(results[0], results[1]);
    assert_eq!(results[1], results[2]);
}

#[tokio::test]
async fn test_graph_bounds_and_fetch_once() {
    let seeds = ["http://x.test/p0", "http://x.test/p1", "http://x.test/p2"];

    for (budget, concurrency) in [1, 3, 5, 10, 29]
        .into_iter()
        .flat_map(|budget| [(budget, 2), (budget, 8)])
    {
        let fetcher = Arc::new(generated_site(2));
        let outcome = run_crawl(fetcher.clone(), &seeds, "x.test", budget, concurrency).await;
        let nodes = outcome.graph.nodes();

        assert!(nodes.len() >= seeds.len());
        assert!(
            nodes.len() <= budget.max(seeds.len()),
            "budget {} concurrency {}",
            budget,
            concurrency
        );

        for (from, to) in outcome.graph.edges() {
            assert!(nodes.contains(&from));
            assert!(nodes.contains(&to));
        }

        for (url, count) in fetcher.calls() {
            assert_eq!(count, 1, "{} fetched {} times", url, count);
            assert!(nodes.contains(&url));
        }
    }
}

#[tokio::test]
async fn test_non_html_and_failures_are_not_fatal() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .html(
                "http://x.test/",
                &["/doc.pdf", "/slow", "/gone", "/ok"],
            )
            .page("http://x.test/doc.pdf", "application/pdf", "%PDF-1.4")
            .error("http://x.test/slow", FetchError::Timeout)
            .html("http://x.test/ok", &["/"]),
    );

    let outcome = run_crawl(fetcher, &["http://x.test/"], "x.test", 10, 4).await;
    let graph = &outcome.graph;

    assert_eq!(graph.node_count(), 5);
    assert_eq!(
        graph.node("http://x.test/doc.pdf").unwrap().state,
        PageState::ContentMismatch
    );
    assert_eq!(
        graph.node("http://x.test/slow").unwrap().state,
        PageState::Failed
    );
    assert_eq!(
        graph.node("http://x.test/gone").unwrap().state,
        PageState::Failed
    );
    assert_eq!(graph.out_degree("http://x.test/doc.pdf"), 0);
    assert_eq!(graph.out_degree("http://x.test/slow"), 0);
    assert_eq!(graph.node("http://x.test/ok").unwrap().state, PageState::Processed);
    assert_eq!(graph.out_degree("http://x.test/ok"), 0);
    assert_eq!(graph.edge_count(), 4);

    let report = &outcome.report;
    assert_eq!(report.non_html, 1);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.pages_expanded, 2);
    assert_eq!(report.pages_fetched, 3);
}

#[tokio::test]
async fn test_seed_urls_are_normalized_and_deduplicated() {
    let fetcher = Arc::new(ScriptedFetcher::new().html("http://x.test/a", &[]));

    let outcome = run_crawl(
        fetcher.clone(),
        &["http://X.test/a/", "http://x.test/a#top"],
        "x.test",
        5,
        2,
    )
    .await;

    assert_eq!(outcome.graph.nodes(), set(&["http://x.test/a"]));
    assert_eq!(outcome.report.seeds, 1);
    assert_eq!(fetcher.fetched(), set(&["http://x.test/a"]));
}

#[tokio::test]
async fn test_seeds_at_budget_are_not_fetched() {
    let fetcher = Arc::new(generated_site(0));
    let outcome = run_crawl(
        fetcher.clone(),
        &["http://x.test/p0", "http://x.test/p1"],
        "x.test",
        2,
        4,
    )
    .await;

    assert_eq!(outcome.graph.node_count(), 2);
    assert!(fetcher.fetched().is_empty());
    assert_eq!(outcome.report.pending, 2);
}

#[tokio::test]
async fn test_empty_seed_list_is_config_error() {
    let result = Crawler::new(Arc::new(ScriptedFetcher::new()), Arc::new(HtmlLinkExtractor))
        .run(&[], "x.test", 5)
        .await;
    assert!(matches!(result, Err(LinkRankError::Config(_))));
}

#[tokio::test]
async fn test_full_crawl_with_http_server() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    r#"<html><head><title>Home</title></head><body>
                    <a href="/page1">Page 1</a>
                    <a href="page2">Page 2</a>
                    <a href="/doc.pdf">Spec sheet</a>
                    <a href="/missing">Broken</a>
                    <a href="http://other.test/x">Elsewhere</a>
                    <a href="mailto:team@example.com">Mail</a>
                    </body></html>"#,
                )
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<html><body><a href="/">Home</a><a href="/page2#top">2</a></body></html>"#)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Leaf</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/doc.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("%PDF-1.4")
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&mock_server)
        .await;

    let settings = linkrank::config::CrawlerSettings {
        max_concurrent_fetches: 4,
        request_timeout_secs: 5,
        ..Default::default()
    };
    let seeds = vec![format!("{}/", base_url)];
    let outcome = Crawler::from_settings(&settings)
        .unwrap()
        .run(&seeds, "127.0.0.1", 10)
        .await
        .unwrap();

    let home = format!("{}/", base_url);
    let page1 = format!("{}/page1", base_url);
    let page2 = format!("{}/page2", base_url);
    let pdf = format!("{}/doc.pdf", base_url);
    let missing = format!("{}/missing", base_url);

    let graph = &outcome.graph;
    assert_eq!(
        graph.nodes(),
        set(&[
            home.as_str(),
            page1.as_str(),
            page2.as_str(),
            pdf.as_str(),
            missing.as_str()
        ])
    );
    assert_eq!(graph.edge_count(), 4);
    assert!(graph.contains_edge(&home, &page1));
    assert!(graph.contains_edge(&home, &page2));
    assert!(!graph.contains_edge(&page1, &home));
    assert!(!graph.contains_edge(&page1, &page2));

    assert_eq!(graph.node(&home).unwrap().state, PageState::Processed);
    assert_eq!(graph.node(&page2).unwrap().state, PageState::Processed);
    assert_eq!(graph.node(&pdf).unwrap().state, PageState::ContentMismatch);
    assert_eq!(graph.node(&missing).unwrap().state, PageState::Failed);
    assert_eq!(
        graph.node(&missing).unwrap().error.as_deref(),
        Some("HTTP status 404")
    );

    assert_eq!(outcome.report.failures.len(), 1);
    assert_eq!(outcome.report.non_html, 1);
}

#[tokio::test]
async fn test_http_budget_stops_expansion() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="/a">a</a><a href="/b">b</a><a href="/c">c</a>"#)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // None of the linked pages may be requested once the budget is full
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let seeds = vec![format!("{}/", base_url)];
    let outcome = Crawler::from_settings(&Default::default())
        .unwrap()
        .run(&seeds, "127.0.0.1", 2)
        .await
        .unwrap();

    assert_eq!(
        outcome.graph.nodes(),
        set(&[
            format!("{}/", base_url).as_str(),
            format!("{}/a", base_url).as_str()
        ])
    );
    assert!(outcome.report.budget_reached);
}

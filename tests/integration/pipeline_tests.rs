//! Integration tests for the crawl -> persist -> rank pipeline
//!
//! These tests go through files the way the command-line tool does: seed
//! file in, GML graph and rank file out.

mod common;

use common::{edge_set, set, ScriptedFetcher};
use linkrank::analysis::{degree_histogram, rank, PageRankConfig};
use linkrank::config::load_seed_file;
use linkrank::crawler::{Crawler, HtmlLinkExtractor};
use linkrank::output::save_rankings;
use linkrank::storage::{load_graph, save_graph};
use linkrank::{LinkRankError, PageState, WebGraph};
use std::io::Write;
use std::process::Command;
use std::sync::Arc;
use tempfile::{NamedTempFile, TempDir};

fn seed_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

fn read_rank_file(path: &std::path::Path) -> Vec<(String, f64)> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| {
            let (url, score) = line.rsplit_once(' ').unwrap();
            (url.to_string(), score.parse().unwrap())
        })
        .collect()
}

#[tokio::test]
async fn test_seed_file_crawl_example() {
    let seeds = seed_file(&["2", "http://x.test/", "http://x.test/a"]);
    let seed = load_seed_file(seeds.path()).unwrap();

    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .html("http://x.test/a", &["http://x.test/b", "http://other.test/c"]),
    );
    let outcome = Crawler::new(fetcher, Arc::new(HtmlLinkExtractor))
        .run(&seed.seeds, &seed.domain, seed.max_nodes)
        .await
        .unwrap();

    assert_eq!(
        outcome.graph.nodes(),
        set(&["http://x.test/a", "http://x.test/b"])
    );
    assert_eq!(
        outcome.graph.edges(),
        edge_set(&[("http://x.test/a", "http://x.test/b")])
    );
}

#[tokio::test]
async fn test_crawl_save_load_rank() {
    let dir = TempDir::new().unwrap();
    let graph_path = dir.path().join("site.gml");
    let rank_path = dir.path().join("ranks.txt");

    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .html("http://x.test/", &["/a", "/b"])
            .html("http://x.test/a", &["/b"])
            .html("http://x.test/b", &["/"])
            .html("http://x.test/c", &[]),
    );
    let outcome = Crawler::new(fetcher, Arc::new(HtmlLinkExtractor))
        .with_shuffle_seed(Some(3))
        .run(
            &["http://x.test/".to_string(), "http://x.test/c".to_string()],
            "x.test",
            100,
        )
        .await
        .unwrap();

    save_graph(&outcome.graph, &graph_path).unwrap();
    let loaded = load_graph(&graph_path).unwrap();

    assert_eq!(loaded.nodes(), outcome.graph.nodes());
    assert_eq!(loaded.edges(), outcome.graph.edges());
    assert_eq!(
        loaded.node("http://x.test/").unwrap().state,
        PageState::Processed
    );
    assert_eq!(
        loaded.node("http://x.test/c").unwrap().state,
        PageState::Discovered
    );

    let ranking = rank(&loaded, &PageRankConfig::default()).unwrap();
    save_rankings(&ranking, &rank_path).unwrap();

    let lines = read_rank_file(&rank_path);
    assert_eq!(lines.len(), 4);
    let total: f64 = lines.iter().map(|(_, s)| s).sum();
    assert!((total - 1.0).abs() < 1e-6, "total {}", total);
    for pair in lines.windows(2) {
        assert!(pair[0].1 >= pair[1].1);
    }
    // Only a and b have in-links
    let top: Vec<&str> = lines[..2].iter().map(|(url, _)| url.as_str()).collect();
    assert_eq!(top, vec!["http://x.test/a", "http://x.test/b"]);
    assert!(lines[1].1 > lines[2].1);
}

#[test]
fn test_rank_empty_loaded_graph_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.gml");
    save_graph(&WebGraph::new(), &path).unwrap();

    let graph = load_graph(&path).unwrap();
    let result = rank(&graph, &PageRankConfig::default());
    assert!(matches!(result, Err(LinkRankError::EmptyGraph)));
    assert!(degree_histogram(&graph).is_empty());
}

#[test]
fn test_load_networkx_style_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "graph [\n  directed 1\n  node [\n    id 0\n    label \"http://x.test/\"\n  ]\n  node [\n    id 1\n    label \"http://x.test/a\"\n  ]\n  edge [\n    source 0\n    target 1\n  ]\n  edge [\n    source 1\n    target 0\n  ]\n]\n"
    )
    .unwrap();

    let graph = load_graph(file.path()).unwrap();
    let ranking = rank(&graph, &PageRankConfig::default()).unwrap();

    assert!((ranking.get("http://x.test/").unwrap() - 0.5).abs() < 1e-6);
    assert_eq!(degree_histogram(&graph), vec![(2, 2)]);
}

fn linkrank_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_linkrank"))
}

#[test]
fn test_cli_requires_a_graph_source() {
    let output = linkrank_bin().arg("-q").output().unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Error:"), "stdout: {}", stdout);
}

#[test]
fn test_cli_crawler_requires_graph_output() {
    let seeds = seed_file(&["5", "http://x.test/", "http://x.test/a"]);
    let output = linkrank_bin()
        .arg("-q")
        .arg("--crawler")
        .arg(seeds.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--crawler_graph"), "stdout: {}", stdout);
}

#[test]
fn test_cli_rejects_input_with_crawler() {
    let seeds = seed_file(&["5", "http://x.test/", "http://x.test/a"]);
    let output = linkrank_bin()
        .args(["-q", "--input", "/nonexistent/site.gml", "--crawler"])
        .arg(seeds.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Error:"), "stdout: {}", stdout);
    assert!(stdout.contains("--input and --crawler"), "stdout: {}", stdout);
}

#[test]
fn test_cli_missing_input_file() {
    let output = linkrank_bin()
        .args(["-q", "--input", "/nonexistent/site.gml"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("does not exist"), "stdout: {}", stdout);
}

#[test]
fn test_cli_ranks_saved_graph() {
    let dir = TempDir::new().unwrap();
    let graph_path = dir.path().join("site.gml");
    let rank_path = dir.path().join("ranks.txt");

    let mut graph = WebGraph::new();
    for url in ["http://x.test/a", "http://x.test/b", "http://x.test/c"] {
        graph.add_node(url);
    }
    graph.add_edge("http://x.test/a", "http://x.test/b");
    graph.add_edge("http://x.test/b", "http://x.test/c");
    graph.add_edge("http://x.test/c", "http://x.test/a");
    save_graph(&graph, &graph_path).unwrap();

    let output = linkrank_bin()
        .arg("-q")
        .arg("--input")
        .arg(&graph_path)
        .arg("--pagerank_values")
        .arg(&rank_path)
        .arg("--loglogplot")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Degree Distribution"));

    let lines = read_rank_file(&rank_path);
    let urls: Vec<&str> = lines.iter().map(|(u, _)| u.as_str()).collect();
    assert_eq!(urls, vec!["http://x.test/a", "http://x.test/b", "http://x.test/c"]);
    for (_, score) in &lines {
        assert!((score - 1.0 / 3.0).abs() < 1e-6);
    }
}

#[test]
fn test_cli_rejects_invalid_settings() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[pagerank]\ndamping-factor = 1.5").unwrap();

    let dir = TempDir::new().unwrap();
    let graph_path = dir.path().join("site.gml");
    let mut graph = WebGraph::new();
    graph.add_node("http://x.test/");
    save_graph(&graph, &graph_path).unwrap();

    let output = linkrank_bin()
        .arg("-q")
        .arg("--config")
        .arg(config.path())
        .arg("--input")
        .arg(&graph_path)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Error:"));
}

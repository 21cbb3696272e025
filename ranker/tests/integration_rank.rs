use linkrank_core::PageRankConfig;
use ranker::{load_config, load_documents, rank, render_text, resolve_config, RankOptions};
use std::fs;
use tempfile::tempdir;

const JSONL: &str = r#"{"url": "https://a.test/", "links": ["https://b.test/", "https://c.test/"]}

{"url": "https://b.test/", "links": ["https://c.test/"], "title": "ignored"}
"#;

const JSON: &str = r#"[
    {"url": "https://c.test/", "links": ["https://a.test/", "https://nowhere.test/"]},
    {"url": "https://d.test/"}
]"#;

#[test]
fn it_loads_json_jsonl_and_directories() {
    let dir = tempdir().unwrap();
    let jsonl = dir.path().join("a.jsonl");
    let json = dir.path().join("b.json");
    fs::write(&jsonl, JSONL).unwrap();
    fs::write(&json, JSON).unwrap();
    fs::write(dir.path().join("notes.txt"), "not a document").unwrap();

    assert_eq!(load_documents(&jsonl).unwrap().len(), 2);
    assert_eq!(load_documents(&json).unwrap().len(), 2);

    let all = load_documents(dir.path()).unwrap();
    let urls: Vec<&str> = all.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec!["https://a.test/", "https://b.test/", "https://c.test/", "https://d.test/"]);
    assert!(all[3].links.is_empty());
}

#[test]
fn it_fails_on_missing_input() {
    let dir = tempdir().unwrap();
    assert!(load_documents(&dir.path().join("absent.jsonl")).is_err());
}

#[test]
fn it_reports_the_malformed_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.jsonl");
    fs::write(&path, "{\"url\": \"https://a.test/\"}\n{not json}\n").unwrap();
    let err = load_documents(&path).unwrap_err();
    assert!(format!("{err:#}").contains("bad.jsonl:2"));
}

#[test]
fn it_ranks_best_first_and_respects_top() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.jsonl"), JSONL).unwrap();
    fs::write(dir.path().join("b.json"), JSON).unwrap();
    let pages = load_documents(dir.path()).unwrap();

    let report = rank(&pages, &RankOptions { config: PageRankConfig::default(), top: 2 }).unwrap();
    assert_eq!(report.num_docs, 4);
    assert_eq!(report.num_edges, 4);
    assert!(report.converged);
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].url, "https://c.test/");
    assert!(report.results[0].score >= report.results[1].score);

    let text = render_text(&report);
    assert!(text.starts_with("1\t"));
    assert!(text.lines().next().unwrap().ends_with("https://c.test/"));
    assert_eq!(text.lines().count(), 2);

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
    assert!(json["created_at"].as_str().unwrap().contains('T'));
}

#[test]
fn it_reads_config_over_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pagerank.json");
    fs::write(&path, r#"{"decay": 0.5, "limit": 7}"#).unwrap();
    let config = load_config(&path).unwrap();
    assert_eq!(config.decay, 0.5);
    assert_eq!(config.limit, 7);
    assert_eq!(config.epsilon, PageRankConfig::default().epsilon);
}

#[test]
fn it_fails_ranking_on_invalid_config() {
    let pages = vec![linkrank_core::Webpage::new("https://a.test/", [])];
    let opts = RankOptions { config: PageRankConfig::default().with_decay(2.0), top: 1 };
    assert!(rank(&pages, &opts).is_err());
}

#[test]
fn it_lets_flags_override_the_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pagerank.json");
    fs::write(&path, r#"{"decay": 0.5, "limit": 7}"#).unwrap();

    let config = resolve_config(Some(path.as_path()), Some(0.7), None, None).unwrap();
    assert_eq!(config.decay, 0.7);
    assert_eq!(config.limit, 7);
    assert_eq!(config.epsilon, PageRankConfig::default().epsilon);

    let defaults = resolve_config(None, None, Some(1e-3), None).unwrap();
    assert_eq!(defaults, PageRankConfig::default().with_epsilon(1e-3));
}

#[test]
fn it_fails_on_a_missing_config_file() {
    let dir = tempdir().unwrap();
    assert!(resolve_config(Some(dir.path().join("absent.json").as_path()), Some(0.7), None, None).is_err());
}

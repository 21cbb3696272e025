use anyhow::{Context, Result};
use linkrank_core::{GraphBuilder, PageRankConfig, PageRankEngine, Webpage};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct RankOptions {
    pub config: PageRankConfig,
    pub top: usize,
}

impl Default for RankOptions {
    fn default() -> Self { Self { config: PageRankConfig::default(), top: 10 } }
}

#[derive(Debug, Serialize)]
pub struct RankReport {
    pub num_docs: usize,
    pub num_edges: usize,
    pub iterations: usize,
    pub converged: bool,
    pub delta: f64,
    pub created_at: String,
    pub results: Vec<RankedPage>,
}

#[derive(Debug, Serialize)]
pub struct RankedPage {
    pub url: String,
    pub score: f64,
}

/// Load a PageRank config from a JSON file; absent fields keep their defaults.
pub fn load_config(path: &Path) -> Result<PageRankConfig> {
    let f = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(f)).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

/// Start from the config file (or defaults) and let explicitly given values win.
pub fn resolve_config(
    path: Option<&Path>,
    decay: Option<f64>,
    epsilon: Option<f64>,
    limit: Option<usize>,
) -> Result<PageRankConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => PageRankConfig::default(),
    };
    if let Some(decay) = decay { config.decay = decay; }
    if let Some(epsilon) = epsilon { config.epsilon = epsilon; }
    if let Some(limit) = limit { config.limit = limit; }
    Ok(config)
}

/// Load pages from a .json/.jsonl file, or every such file under a directory.
pub fn load_documents(input: &Path) -> Result<Vec<Webpage>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        anyhow::bail!("input {} does not exist", input.display());
    }

    let mut pages = Vec::new();
    for file in files {
        if extension(&file) == Some("jsonl") {
            read_jsonl(&file, &mut pages)?;
        } else {
            read_json(&file, &mut pages)?;
        }
    }
    tracing::info!(num_docs = pages.len(), input = %input.display(), "loaded documents");
    Ok(pages)
}

fn extension(p: &Path) -> Option<&str> { p.extension().and_then(|s| s.to_str()) }

fn read_jsonl(file: &Path, pages: &mut Vec<Webpage>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("{}:{}: read failed", file.display(), lineno + 1))?;
        if line.trim().is_empty() { continue; }
        let page: Webpage = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid document", file.display(), lineno + 1))?;
        pages.push(page);
    }
    Ok(())
}

fn read_json(file: &Path, pages: &mut Vec<Webpage>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    let json: serde_json::Value = serde_json::from_reader(reader).with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                pages.push(serde_json::from_value(v).with_context(|| format!("{}: invalid document", file.display()))?);
            }
        }
        serde_json::Value::Object(_) => {
            pages.push(serde_json::from_value(json).with_context(|| format!("{}: invalid document", file.display()))?);
        }
        _ => tracing::warn!(file = %file.display(), "skipping json that is neither an object nor an array"),
    }
    Ok(())
}

/// Rank `pages` and keep the `top` best, highest first.
pub fn rank(pages: &[Webpage], opts: &RankOptions) -> Result<RankReport> {
    let engine = PageRankEngine::new(opts.config)?;
    let graph = GraphBuilder::build(pages);
    let num_edges = graph.edge_count();
    let ranks = engine.compute(graph);
    let results = ranks
        .top_k(opts.top)?
        .into_iter()
        .map(|(url, score)| RankedPage { url, score })
        .collect();

    Ok(RankReport {
        num_docs: ranks.len(),
        num_edges,
        iterations: ranks.iterations(),
        converged: ranks.converged(),
        delta: ranks.delta(),
        created_at: time::OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
        results,
    })
}

pub fn render_text(report: &RankReport) -> String {
    report
        .results
        .iter()
        .enumerate()
        .map(|(i, hit)| format!("{}\t{:.6}\t{}\n", i + 1, hit.score, hit.url))
        .collect()
}

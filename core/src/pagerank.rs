//! PageRank over a self-contained link graph.
//!
//! Power iteration with uniform teleportation. A dangling node spreads its whole mass evenly
//! over every node, so each iteration keeps the total mass at 1.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::graph::{Graph, GraphBuilder};
use crate::topk::{top_k_sort, Scored};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    pub decay: f64,
    /// Converged once no rank moves by more than this.
    pub epsilon: f64,
    pub limit: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self { decay: 0.85, epsilon: 1e-6, limit: 100 }
    }
}

impl PageRankConfig {
    pub fn new() -> Self { Self::default() }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.decay) {
            return Err(Error::InvalidArgument(format!("decay must be within [0, 1], got {}", self.decay)));
        }
        if !(self.epsilon > 0.0) {
            return Err(Error::InvalidArgument(format!("epsilon must be positive, got {}", self.epsilon)));
        }
        if self.limit == 0 {
            return Err(Error::InvalidArgument("limit must be at least 1".into()));
        }
        Ok(())
    }
}

pub struct PageRankEngine {
    config: PageRankConfig,
}

impl PageRankEngine {
    pub fn new(config: PageRankConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PageRankConfig { &self.config }

    /// Hitting `limit` is not an error: the last vector comes back with `converged() == false`.
    pub fn compute<Id: Eq + Hash + Clone>(&self, graph: Graph<Id>) -> RankVector<Id> {
        let (ids, index, edges) = graph.into_parts();
        let n = ids.len();
        if n == 0 {
            tracing::debug!("pagerank over empty graph");
            return RankVector { ids, index, scores: Vec::new(), iterations: 0, delta: 0.0, converged: true };
        }

        let PageRankConfig { decay, epsilon, limit } = self.config;
        let mut ranks = vec![1.0 / n as f64; n];
        let mut next = vec![0.0; n];
        let mut iterations = 0;
        let mut delta = f64::INFINITY;
        let mut converged = false;

        while iterations < limit {
            step(&edges, &ranks, &mut next, decay);
            iterations += 1;
            delta = max_delta(&ranks, &next);
            std::mem::swap(&mut ranks, &mut next);
            tracing::trace!(iteration = iterations, delta, "pagerank iteration");
            if delta <= epsilon {
                converged = true;
                break;
            }
        }

        tracing::debug!(nodes = n, iterations, delta, converged, "pagerank finished");
        if !converged {
            tracing::warn!(limit, delta, "pagerank hit iteration limit before converging");
        }
        RankVector { ids, index, scores: ranks, iterations, delta, converged }
    }
}

pub fn rank_documents<'a, D, I>(documents: I, config: PageRankConfig) -> Result<RankVector<D::Id>>
where
    D: Document + 'a,
    I: IntoIterator<Item = &'a D>,
{
    let engine = PageRankEngine::new(config)?;
    let graph = GraphBuilder::build(documents);
    Ok(engine.compute(graph))
}

fn step(edges: &[Vec<usize>], ranks: &[f64], next: &mut [f64], decay: f64) {
    let n = ranks.len() as f64;
    next.fill(0.0);
    let mut dangling = 0.0;
    for (node, targets) in edges.iter().enumerate() {
        if targets.is_empty() {
            dangling += ranks[node];
            continue;
        }
        let share = decay * ranks[node] / targets.len() as f64;
        for &target in targets {
            next[target] += share;
        }
    }
    let base = decay * dangling / n + (1.0 - decay) / n;
    for rank in next.iter_mut() {
        *rank += base;
    }
}

fn max_delta(prev: &[f64], next: &[f64]) -> f64 {
    prev.iter().zip(next).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max)
}

#[derive(Debug, Clone)]
pub struct RankVector<Id> {
    ids: Vec<Id>,
    index: HashMap<Id, usize>,
    scores: Vec<f64>,
    iterations: usize,
    delta: f64,
    converged: bool,
}

impl<Id: Eq + Hash + Clone + Debug> RankVector<Id> {
    pub fn get(&self, id: &Id) -> Result<f64> {
        self.index
            .get(id)
            .map(|&i| self.scores[i])
            .ok_or_else(|| Error::NotFound(format!("{id:?} was not part of the ranked collection")))
    }

    pub fn len(&self) -> usize { self.ids.len() }

    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    pub fn iterations(&self) -> usize { self.iterations }

    /// Largest per-node change in the final iteration.
    pub fn delta(&self) -> f64 { self.delta }

    pub fn converged(&self) -> bool { self.converged }

    pub fn total(&self) -> f64 { self.scores.iter().sum() }

    pub fn iter(&self) -> impl Iterator<Item = (&Id, f64)> + '_ {
        self.ids.iter().zip(self.scores.iter().copied())
    }

    pub fn top_k(&self, k: usize) -> Result<Vec<(Id, f64)>> {
        let scored = self.iter().map(|(id, score)| Scored::new(id, score)).collect::<Result<Vec<_>>>()?;
        let k = isize::try_from(k).unwrap_or(isize::MAX);
        let top = top_k_sort(k, scored)?;
        Ok(top
            .into_iter()
            .rev()
            .map(|s| {
                let (id, score) = s.into_inner();
                (id.clone(), score)
            })
            .collect())
    }
}

pub mod document;
pub mod error;
pub mod graph;
pub mod heap;
pub mod pagerank;
pub mod topk;

pub use document::{Document, Webpage};
pub use error::{Error, Result};
pub use graph::{Graph, GraphBuilder};
pub use heap::Heap;
pub use pagerank::{rank_documents, PageRankConfig, PageRankEngine, RankVector};
pub use topk::{top_k_sort, Scored};

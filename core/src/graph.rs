use crate::document::Document;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Adjacency lists over dense node indices, in the order documents were first seen. Edge lists
/// hold no duplicates, no self-loops, and only targets that are themselves nodes.
#[derive(Debug, Clone)]
pub struct Graph<Id> {
    ids: Vec<Id>,
    index: HashMap<Id, usize>,
    edges: Vec<Vec<usize>>,
}

impl<Id: Eq + Hash + Clone> Graph<Id> {
    pub fn len(&self) -> usize { self.ids.len() }

    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    pub fn contains(&self, id: &Id) -> bool { self.index.contains_key(id) }

    pub fn ids(&self) -> &[Id] { &self.ids }

    pub fn out_degree(&self, id: &Id) -> Option<usize> {
        self.index.get(id).map(|&i| self.edges[i].len())
    }

    pub fn neighbors<'a>(&'a self, id: &Id) -> Option<impl Iterator<Item = &'a Id> + 'a> {
        let i = *self.index.get(id)?;
        Some(self.edges[i].iter().map(move |&t| &self.ids[t]))
    }

    pub fn edge_count(&self) -> usize { self.edges.iter().map(Vec::len).sum() }

    pub fn dangling_count(&self) -> usize { self.edges.iter().filter(|e| e.is_empty()).count() }

    pub(crate) fn into_parts(self) -> (Vec<Id>, HashMap<Id, usize>, Vec<Vec<usize>>) {
        (self.ids, self.index, self.edges)
    }
}

pub struct GraphBuilder<Id> {
    ids: Vec<Id>,
    index: HashMap<Id, usize>,
    raw_links: Vec<Vec<Id>>,
}

impl<Id: Eq + Hash + Clone> Default for GraphBuilder<Id> {
    fn default() -> Self {
        Self { ids: Vec::new(), index: HashMap::new(), raw_links: Vec::new() }
    }
}

impl<Id: Eq + Hash + Clone> GraphBuilder<Id> {
    pub fn new() -> Self { Self::default() }

    pub fn build<'a, D, I>(documents: I) -> Graph<Id>
    where
        D: Document<Id = Id> + 'a,
        I: IntoIterator<Item = &'a D>,
    {
        let mut builder = Self::new();
        for doc in documents {
            builder.add(doc);
        }
        builder.finish()
    }

    /// Registers a document. A repeated identifier merges into the existing node.
    pub fn add<D: Document<Id = Id>>(&mut self, doc: &D) {
        let id = doc.identifier();
        let node = match self.index.get(id) {
            Some(&i) => i,
            None => {
                let i = self.ids.len();
                self.ids.push(id.clone());
                self.index.insert(id.clone(), i);
                self.raw_links.push(Vec::new());
                i
            }
        };
        self.raw_links[node].extend(doc.outbound_links().iter().cloned());
    }

    pub fn finish(self) -> Graph<Id> {
        let mut edges = Vec::with_capacity(self.ids.len());
        for (source, raw) in self.raw_links.iter().enumerate() {
            let mut seen = HashSet::with_capacity(raw.len());
            let mut out = Vec::new();
            for link in raw {
                let Some(&target) = self.index.get(link) else { continue };
                if target != source && seen.insert(target) {
                    out.push(target);
                }
            }
            edges.push(out);
        }
        let graph = Graph { ids: self.ids, index: self.index, edges };
        tracing::debug!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            dangling = graph.dangling_count(),
            "built link graph"
        );
        graph
    }
}

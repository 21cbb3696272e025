use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// A crawled document as the ranking core sees it: an identity plus the raw links found on it.
pub trait Document {
    type Id: Eq + Hash + Clone + Debug;

    fn identifier(&self) -> &Self::Id;

    /// Raw outbound links, possibly duplicated and possibly pointing outside the collection.
    fn outbound_links(&self) -> &[Self::Id];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webpage {
    pub url: String,
    #[serde(default)]
    pub links: Vec<String>,
}

impl Webpage {
    pub fn new<S: Into<String>>(url: S, links: impl IntoIterator<Item = S>) -> Self {
        Self { url: url.into(), links: links.into_iter().map(Into::into).collect() }
    }
}

impl Document for Webpage {
    type Id = String;

    fn identifier(&self) -> &String { &self.url }

    fn outbound_links(&self) -> &[String] { &self.links }
}

use crate::error::{Error, Result};
use crate::heap::Heap;
use std::cmp::Ordering;

/// The `k` largest items in ascending order, in O(n log k). Order among equal items is unspecified.
pub fn top_k_sort<T, I>(k: isize, items: I) -> Result<Vec<T>>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    if k < 0 {
        return Err(Error::InvalidArgument(format!("k must be non-negative, got {k}")));
    }
    let k = k as usize;
    if k == 0 {
        return Ok(Vec::new());
    }

    let items = items.into_iter();
    let (lower, _) = items.size_hint();
    let mut heap = Heap::with_capacity(k.min(lower));
    for item in items {
        if heap.len() < k {
            heap.insert(item);
        } else if heap.peek_min().map_or(false, |min| item > *min) {
            heap.remove_min()?;
            heap.insert(item);
        }
    }
    Ok(heap.into_sorted_vec())
}

/// An item ordered by its score; NaN scores are rejected.
#[derive(Debug, Clone)]
pub struct Scored<T> {
    score: f64,
    item: T,
}

impl<T> Scored<T> {
    pub fn new(item: T, score: f64) -> Result<Self> {
        if score.is_nan() {
            return Err(Error::InvalidArgument("score is NaN".into()));
        }
        Ok(Self { score, item })
    }

    pub fn score(&self) -> f64 { self.score }

    pub fn item(&self) -> &T { &self.item }

    pub fn into_inner(self) -> (T, f64) { (self.item, self.score) }
}

impl<T> PartialEq for Scored<T> {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl<T> Eq for Scored<T> {}

impl<T> PartialOrd for Scored<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl<T> Ord for Scored<T> {
    fn cmp(&self, other: &Self) -> Ordering { self.score.total_cmp(&other.score) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_largest_ascending() {
        let top = top_k_sort(3, vec![1, 7, 8, 56, 2, 0, 91, 15, 42, 33, 12]).unwrap();
        assert_eq!(top, vec![42, 56, 91]);
    }

    #[test]
    fn huge_k_does_not_preallocate() {
        let top = top_k_sort(isize::MAX, vec![3, 1, 2]).unwrap();
        assert_eq!(top, vec![1, 2, 3]);
    }

    #[test]
    fn nan_score_rejected() {
        assert!(matches!(Scored::new("x", f64::NAN), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn scored_items_order_by_score() {
        let items = vec![
            Scored::new("low", 0.1).unwrap(),
            Scored::new("high", 0.7).unwrap(),
            Scored::new("mid", 0.2).unwrap(),
        ];
        let top = top_k_sort(2, items).unwrap();
        let names: Vec<&str> = top.iter().map(|s| *s.item()).collect();
        assert_eq!(names, vec!["mid", "high"]);
    }
}

use crate::error::{Error, Result};

const DEFAULT_CAPACITY: usize = 16;

/// Binary min-heap stored in a contiguous buffer.
///
/// The element at index `i` has children at `2i + 1` and `2i + 2` and is never greater than
/// either of them. The buffer doubles when full and is never shrunk.
#[derive(Debug, Clone)]
pub struct Heap<T> {
    items: Vec<T>,
}

impl<T: Ord> Default for Heap<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Ord> Heap<T> {
    pub fn new() -> Self { Self::with_capacity(DEFAULT_CAPACITY) }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity.max(1)) }
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn size(&self) -> usize { self.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn capacity(&self) -> usize { self.items.capacity() }

    pub fn insert(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            let grow_by = self.items.capacity().max(1);
            self.items.reserve_exact(grow_by);
        }
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    pub fn try_insert(&mut self, item: Option<T>) -> Result<()> {
        let item = item.ok_or_else(|| Error::InvalidArgument("cannot insert an absent element".into()))?;
        self.insert(item);
        Ok(())
    }

    pub fn peek_min(&self) -> Result<&T> {
        self.items.first().ok_or(Error::EmptyContainer)
    }

    pub fn remove_min(&mut self) -> Result<T> {
        if self.items.is_empty() {
            return Err(Error::EmptyContainer);
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let min = self.items.pop().ok_or(Error::EmptyContainer)?;
        self.sift_down(0);
        Ok(min)
    }

    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.items.len());
        while let Ok(item) = self.remove_min() {
            out.push(item);
        }
        out
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.items[parent] <= self.items[pos] {
                break;
            }
            self.items.swap(parent, pos);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && self.items[right] < self.items[left] { right } else { left };
            if self.items[smaller] >= self.items[pos] {
                break;
            }
            self.items.swap(pos, smaller);
            pos = smaller;
        }
    }
}

impl<T: Ord> FromIterator<T> for Heap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Heap::new();
        heap.extend(iter);
        heap
    }
}

impl<T: Ord> Extend<T> for Heap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

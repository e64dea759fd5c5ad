//! Array-backed binary heap ordered by a caller-supplied predicate.
//!
//! `before(a, b)` returns true when `a` belongs closer to the root than `b`,
//! so `|a, b| a < b` gives a min-heap and `|a, b| a > b` a max-heap.
//!
//! ```text
//!           1
//!      /         \
//!    5             3
//!  /   \         /
//! 7     9      8
//!
//! [1, 5, 3, 7, 9, 8]
//! ```
//!
//! The element at index `i` has children at `2i + 1` and `2i + 2` and its
//! parent at `(i - 1) / 2`.

pub struct Heap<T, F> {
    data: Vec<T>,
    before: F,
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left_child(i: usize) -> usize {
    2 * i + 1
}

impl<T, F: Fn(&T, &T) -> bool> Heap<T, F> {
    pub fn new(before: F) -> Self {
        Self::with_capacity(0, before)
    }

    pub fn with_capacity(capacity: usize, before: F) -> Self {
        Heap {
            data: Vec::with_capacity(capacity),
            before,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The root: the element that comes before every other.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    pub fn push(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let value = self.data.swap_remove(0);
        self.sift_down(0);
        Some(value)
    }

    /// Swap `value` in for the root and return the old root.
    /// Cheaper than `pop` followed by `push`.
    pub fn replace(&mut self, value: T) -> Option<T> {
        if self.data.is_empty() {
            self.data.push(value);
            return None;
        }
        let old = std::mem::replace(&mut self.data[0], value);
        self.sift_down(0);
        Some(old)
    }

    /// Whether `a` belongs closer to the root than `b`.
    pub fn comes_before(&self, a: &T, b: &T) -> bool {
        (self.before)(a, b)
    }

    /// Elements in heap order (not sorted).
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    fn sift_up(&mut self, mut cur: usize) {
        while cur > 0 {
            let p = parent(cur);
            if !(self.before)(&self.data[cur], &self.data[p]) {
                break;
            }
            self.data.swap(p, cur);
            cur = p;
        }
    }

    fn sift_down(&mut self, mut cur: usize) {
        let n = self.data.len();
        loop {
            let left = left_child(cur);
            if left >= n {
                break;
            }
            let mut j = left;
            let right = left + 1;
            if right < n && (self.before)(&self.data[right], &self.data[left]) {
                j = right;
            }
            if !(self.before)(&self.data[j], &self.data[cur]) {
                break;
            }
            self.data.swap(cur, j);
            cur = j;
        }
    }
}

//! Bounded best-of-k selection.
//!
//! Keeps the `k` best elements seen so far on a heap whose root is the
//! worst element retained. A newcomer only has to beat that root to get in,
//! so each push is O(log k).

use super::heap::Heap;

fn less<T: Ord>(a: &T, b: &T) -> bool {
    a < b
}

fn greater<T: Ord>(a: &T, b: &T) -> bool {
    a > b
}

pub struct TopK<T, F = fn(&T, &T) -> bool> {
    k: usize,
    heap: Heap<T, F>,
}

impl<T: Ord> TopK<T> {
    /// Retain the `k` largest elements.
    pub fn largest(k: usize) -> Self {
        TopK::with_comparator(k, less::<T> as fn(&T, &T) -> bool)
    }

    /// Retain the `k` smallest elements.
    pub fn smallest(k: usize) -> Self {
        TopK::with_comparator(k, greater::<T> as fn(&T, &T) -> bool)
    }
}

impl<T, F: Fn(&T, &T) -> bool> TopK<T, F> {
    /// Retain the `k` greatest elements under `less`.
    pub fn with_comparator(k: usize, less: F) -> Self {
        TopK {
            k,
            heap: Heap::with_capacity(k, less),
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The worst element currently retained.
    pub fn peek(&self) -> Option<&T> {
        self.heap.peek()
    }

    /// Offer `value`. Returns whatever fell out: the evicted element, the
    /// value itself when it did not make the cut, or `None` if there was room.
    pub fn push(&mut self, value: T) -> Option<T> {
        if self.heap.len() < self.k {
            self.heap.push(value);
            return None;
        }
        let admit = match self.heap.peek() {
            Some(worst) => self.heap.comes_before(worst, &value),
            None => false,
        };
        if admit {
            self.heap.replace(value)
        } else {
            Some(value)
        }
    }

    /// Remove and return the worst element retained.
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop()
    }

    /// Retained elements, best first.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(v) = self.heap.pop() {
            out.push(v);
        }
        out.reverse();
        out
    }
}

impl<T, F: Fn(&T, &T) -> bool> Extend<T> for TopK<T, F> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.push(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_largest() {
        let mut top = TopK::largest(3);
        top.extend([5, 1, 9, 3, 7, 2, 8]);
        assert_eq!(top.len(), 3);
        assert_eq!(top.peek(), Some(&7));
        assert_eq!(top.into_sorted_vec(), vec![9, 8, 7]);
    }

    #[test]
    fn keeps_smallest() {
        let mut top = TopK::smallest(2);
        top.extend([5, 1, 9, 3]);
        assert_eq!(top.into_sorted_vec(), vec![1, 3]);
    }

    #[test]
    fn pop_is_worst_first() {
        let mut top = TopK::largest(3);
        top.extend(1..=10);
        assert_eq!(top.pop(), Some(8));
        assert_eq!(top.pop(), Some(9));
        assert_eq!(top.pop(), Some(10));
        assert_eq!(top.pop(), None);
    }

    #[test]
    fn push_reports_what_fell_out() {
        let mut top = TopK::largest(2);
        assert_eq!(top.push(4), None);
        assert_eq!(top.push(6), None);
        assert_eq!(top.push(1), Some(1));
        assert_eq!(top.push(5), Some(4));
        assert_eq!(top.push(5), Some(5));
    }

    #[test]
    fn fewer_than_k() {
        let mut top = TopK::largest(10);
        top.extend([3, 1, 2]);
        assert_eq!(top.into_sorted_vec(), vec![3, 2, 1]);
    }

    #[test]
    fn zero_k_keeps_nothing() {
        let mut top = TopK::largest(0);
        assert_eq!(top.push(1), Some(1));
        assert!(top.is_empty());
        assert_eq!(top.k(), 0);
    }

    #[test]
    fn custom_comparator() {
        let mut top = TopK::with_comparator(2, |a: &&str, b: &&str| a.len() < b.len());
        top.extend(["a", "abcd", "ab", "abc"]);
        assert_eq!(top.into_sorted_vec(), vec!["abcd", "abc"]);
    }
}

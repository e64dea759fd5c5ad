//! Ranked Skip List
//!
//! A skip list ordered by `(score, value)` that answers rank queries in
//! expected O(log n). Every forward link carries a span: the number of
//! level-0 steps it jumps over. Summing spans along a descent gives the
//! 1-based rank of wherever the descent stops.
//!
//! # Operations
//!
//! - `insert(score, value)`: O(log n) - duplicates allowed, each call makes a node
//! - `search(score, &value)`: O(log n) - exact match on both fields
//! - `delete(score, &value)` / `remove(score, &value)`: O(log n)
//! - `rank(score, &value)`: O(log n) - 1-based position, 0 when absent
//! - `element_at_rank(rank)`: O(log n) - node at a 1-based position
//! - `iter()`: ascending, double-ended via backward links
//!
//! # Structure
//!
//! ```text
//! Level 2: HEAD --------------4--------------> D -------2-------> NULL
//! Level 1: HEAD ------2-----> B ------2------> D ---1--> E ------> NULL
//! Level 0: HEAD -1-> A -1-> B -1-> C -1-> D -1-> E -1-> F ------> NULL
//! ```
//!
//! The numbers are spans. A link with no forward node keeps the count of
//! nodes after its owner, so splicing a node beneath it stays O(1).
//!
//! # Duplicates
//!
//! Equal `(score, value)` pairs are kept side by side, newest first.
//! `search`, `delete` and `rank` all resolve to the forward-most one.

use std::cmp::Ordering;
use std::fmt;

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use smallvec::SmallVec;
use smallvec::smallvec;

use super::profiling;

/// Maximum node height. 32 levels covers 2^32 entries at p = 1/2.
pub const MAX_LEVEL: usize = 32;

/// Arena index type. u32 saves space vs usize on 64-bit.
type Idx = u32;

/// Null index marker.
const NULL: Idx = Idx::MAX;

/// Marker for the sentinel head, whose links live in the list itself.
const HEAD: Idx = Idx::MAX - 1;

/// A source of fair coin flips used to pick node heights.
///
/// Any `rand` generator works. Tests can plug in a scripted source to pin
/// node heights exactly.
pub trait Coin {
    /// Returns `true` with probability 1/2.
    fn flip(&mut self) -> bool;
}

impl<R: RngCore> Coin for R {
    fn flip(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }
}

#[derive(Debug, Clone, Copy)]
struct Link {
    forward: Idx,
    span: u64,
}

impl Link {
    const EMPTY: Link = Link {
        forward: NULL,
        span: 0,
    };
}

/// One entry of the list plus its index metadata.
#[derive(Debug)]
pub struct Node<T> {
    score: f64,
    value: T,
    /// Forward links, one per level this node participates in.
    links: SmallVec<[Link; 4]>,
    /// Previous node at level 0, NULL for the first node.
    backward: Idx,
}

impl<T> Node<T> {
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Number of levels this node is linked into.
    pub fn height(&self) -> usize {
        self.links.len()
    }

    fn entry(&self) -> (f64, &T) {
        (self.score, &self.value)
    }
}

impl<T: Ord> Node<T> {
    fn cmp_key(&self, score: f64, value: &T) -> Ordering {
        self.score
            .total_cmp(&score)
            .then_with(|| self.value.cmp(value))
    }
}

fn slot<T>(nodes: &[Option<Node<T>>], idx: Idx) -> &Node<T> {
    match nodes.get(idx as usize) {
        Some(Some(node)) => node,
        _ => panic!("dangling skip list link to slot {}", idx),
    }
}

/// The descent path recorded by `insert` and `delete`.
struct Path {
    /// Last node before the target at each level.
    update: [Idx; MAX_LEVEL],
    /// Rank of `update[i]`.
    rank: [u64; MAX_LEVEL],
}

/// A score-ordered skip list with O(log n) rank queries.
pub struct SkipList<T, C = StdRng> {
    /// Links of the sentinel head, one per possible level.
    head: [Link; MAX_LEVEL],
    /// Arena of nodes. Vacated slots are `None` until reused.
    nodes: Vec<Option<Node<T>>>,
    /// Vacated slots available for reuse.
    free_list: Vec<Idx>,
    tail: Idx,
    len: usize,
    /// Height of the tallest node, at least 1.
    level: usize,
    coin: C,
}

impl<T> SkipList<T, StdRng> {
    /// Create an empty list with an entropy-seeded coin.
    pub fn new() -> Self {
        Self::with_coin(StdRng::from_entropy())
    }

    /// Create an empty list whose node heights are reproducible from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_coin(StdRng::seed_from_u64(seed))
    }

    /// Create an empty list with room for `capacity` nodes before the arena
    /// reallocates. A zero hint is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut list = Self::new();
        list.nodes.reserve_exact(capacity.max(1));
        list
    }
}

impl<T> Default for SkipList<T, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> SkipList<T, C> {
    /// Create an empty list drawing node heights from `coin`.
    pub fn with_coin(coin: C) -> Self {
        SkipList {
            head: [Link::EMPTY; MAX_LEVEL],
            nodes: Vec::new(),
            free_list: Vec::new(),
            tail: NULL,
            len: 0,
            level: 1,
            coin,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current maximum node height in use.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn first(&self) -> Option<&Node<T>> {
        self.get(self.head[0].forward)
    }

    pub fn last(&self) -> Option<&Node<T>> {
        self.get(self.tail)
    }

    /// Drop every node and return to the freshly constructed state.
    pub fn clear(&mut self) {
        self.head = [Link::EMPTY; MAX_LEVEL];
        self.nodes.clear();
        self.free_list.clear();
        self.tail = NULL;
        self.len = 0;
        self.level = 1;
    }

    /// Iterate over nodes in ascending `(score, value)` order.
    /// Call `.rev()` to walk backward from the tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.head[0].forward,
            back: self.tail,
            remaining: self.len,
        }
    }

    // --- Node access helpers ---

    fn get(&self, idx: Idx) -> Option<&Node<T>> {
        if idx == NULL {
            None
        } else {
            Some(self.node(idx))
        }
    }

    fn node(&self, idx: Idx) -> &Node<T> {
        slot(&self.nodes, idx)
    }

    fn node_mut(&mut self, idx: Idx) -> &mut Node<T> {
        match self.nodes.get_mut(idx as usize) {
            Some(Some(node)) => node,
            _ => panic!("dangling skip list link to slot {}", idx),
        }
    }

    fn link(&self, at: Idx, level: usize) -> Link {
        if at == HEAD {
            self.head[level]
        } else {
            self.node(at).links[level]
        }
    }

    fn link_mut(&mut self, at: Idx, level: usize) -> &mut Link {
        if at == HEAD {
            &mut self.head[level]
        } else {
            &mut self.node_mut(at).links[level]
        }
    }

    fn alloc_node(&mut self, node: Node<T>) -> Idx {
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx as usize] = Some(node);
            idx
        } else {
            assert!(self.nodes.len() < HEAD as usize, "skip list arena is full");
            let idx = self.nodes.len() as Idx;
            self.nodes.push(Some(node));
            idx
        }
    }

    fn free_node(&mut self, idx: Idx) -> Node<T> {
        match self.nodes[idx as usize].take() {
            Some(node) => {
                self.free_list.push(idx);
                node
            }
            None => panic!("double free of skip list slot {}", idx),
        }
    }
}

impl<T: Ord, C> SkipList<T, C> {
    /// Walk down from the head, stopping at each level on the last node
    /// whose key is strictly less than `(score, value)`.
    fn descend(&self, score: f64, value: &T) -> Path {
        let mut update = [HEAD; MAX_LEVEL];
        let mut rank = [0u64; MAX_LEVEL];
        let mut x = HEAD;

        for i in (0..self.level).rev() {
            rank[i] = if i + 1 == self.level { 0 } else { rank[i + 1] };
            loop {
                let link = self.link(x, i);
                if link.forward == NULL
                    || self.node(link.forward).cmp_key(score, value) != Ordering::Less
                {
                    break;
                }
                rank[i] += link.span;
                x = link.forward;
                profiling::descent_step();
            }
            update[i] = x;
        }

        Path { update, rank }
    }

    /// Level-0 predecessor of the first node not less than `(score, value)`,
    /// together with that predecessor's rank.
    fn seek(&self, score: f64, value: &T) -> (Idx, u64) {
        let mut x = HEAD;
        let mut traversed = 0u64;

        for i in (0..self.level).rev() {
            loop {
                let link = self.link(x, i);
                if link.forward == NULL
                    || self.node(link.forward).cmp_key(score, value) != Ordering::Less
                {
                    break;
                }
                traversed += link.span;
                x = link.forward;
                profiling::descent_step();
            }
        }

        (x, traversed)
    }

    /// The level-0 successor of `pred` if it holds exactly `(score, value)`.
    fn matching_successor(&self, pred: Idx, score: f64, value: &T) -> Option<Idx> {
        let next = self.link(pred, 0).forward;
        if next != NULL && self.node(next).cmp_key(score, value) == Ordering::Equal {
            Some(next)
        } else {
            None
        }
    }

    /// Find the node holding exactly `(score, value)`.
    pub fn search(&self, score: f64, value: &T) -> Option<&Node<T>> {
        let (pred, _) = self.seek(score, value);
        self.matching_successor(pred, score, value)
            .map(|idx| self.node(idx))
    }

    pub fn contains(&self, score: f64, value: &T) -> bool {
        self.search(score, value).is_some()
    }

    /// 1-based position of `(score, value)`, or 0 if it is not present.
    pub fn rank(&self, score: f64, value: &T) -> u64 {
        let (pred, traversed) = self.seek(score, value);
        match self.matching_successor(pred, score, value) {
            Some(_) => traversed + self.link(pred, 0).span,
            None => 0,
        }
    }

    /// Node at the 1-based position `rank`.
    pub fn element_at_rank(&self, rank: u64) -> Option<&Node<T>> {
        if rank == 0 || rank > self.len as u64 {
            return None;
        }

        let mut traversed = 0u64;
        let mut x = HEAD;
        for i in (0..self.level).rev() {
            loop {
                let link = self.link(x, i);
                if link.forward == NULL || traversed + link.span > rank {
                    break;
                }
                traversed += link.span;
                x = link.forward;
                profiling::descent_step();
            }
            if traversed == rank {
                return Some(self.node(x));
            }
        }

        None
    }

    /// Remove one node holding exactly `(score, value)`.
    /// Returns whether anything was removed.
    pub fn delete(&mut self, score: f64, value: &T) -> bool {
        self.remove(score, value).is_some()
    }

    /// Remove one node holding exactly `(score, value)` and hand back its entry.
    pub fn remove(&mut self, score: f64, value: &T) -> Option<(f64, T)> {
        let path = self.descend(score, value);
        let target = self.matching_successor(path.update[0], score, value)?;
        let node = self.unlink(target, &path.update);
        self.check_invariants();
        Some((node.score, node.value))
    }

    fn unlink(&mut self, target: Idx, update: &[Idx; MAX_LEVEL]) -> Node<T> {
        for i in 0..self.level {
            let pred = self.link(update[i], i);
            if pred.forward == target {
                let removed = self.node(target).links[i];
                *self.link_mut(update[i], i) = Link {
                    forward: removed.forward,
                    span: pred.span + removed.span - 1,
                };
            } else {
                // This link jumps over the target without landing on it.
                self.link_mut(update[i], i).span -= 1;
            }
        }

        let backward = self.node(target).backward;
        let next = self.node(target).links[0].forward;
        if next == NULL {
            self.tail = backward;
        } else {
            self.node_mut(next).backward = backward;
        }

        while self.level > 1 && self.head[self.level - 1].forward == NULL {
            self.level -= 1;
        }

        self.len -= 1;
        profiling::node_removed();
        self.free_node(target)
    }

    // --- Invariant checking ---

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        use rustc_hash::FxHashMap;

        // Level 0: order, backward links, length, tail and level.
        let mut positions: FxHashMap<Idx, u64> = FxHashMap::default();
        let mut prev = NULL;
        let mut idx = self.head[0].forward;
        let mut pos = 0u64;
        let mut max_height = 1;
        while idx != NULL {
            pos += 1;
            let node = self.node(idx);
            assert_eq!(
                node.backward, prev,
                "INVARIANT VIOLATED: backward link at rank {} does not match level 0",
                pos
            );
            if prev != NULL {
                let before = self.node(prev);
                assert!(
                    before.cmp_key(node.score, &node.value) != Ordering::Greater,
                    "INVARIANT VIOLATED: level 0 out of order at rank {}",
                    pos
                );
            }
            max_height = max_height.max(node.height());
            positions.insert(idx, pos);
            prev = idx;
            idx = node.links[0].forward;
        }
        assert_eq!(
            pos, self.len as u64,
            "INVARIANT VIOLATED: level 0 holds {} nodes but len()={}",
            pos, self.len
        );
        assert_eq!(self.tail, prev, "INVARIANT VIOLATED: tail is not the last node");
        assert_eq!(
            self.level, max_height,
            "INVARIANT VIOLATED: level={} but tallest node has height {}",
            self.level, max_height
        );

        // Upper levels: ordered sub-chains whose spans match level-0 distance.
        for i in 0..self.level {
            let mut x = HEAD;
            let mut x_pos = 0u64;
            loop {
                let link = self.link(x, i);
                if link.forward == NULL {
                    break;
                }
                let next_pos = match positions.get(&link.forward) {
                    Some(p) => *p,
                    None => panic!("INVARIANT VIOLATED: level {} links a node missing from level 0", i),
                };
                assert!(
                    next_pos > x_pos,
                    "INVARIANT VIOLATED: level {} goes backward from rank {}",
                    i, x_pos
                );
                assert_eq!(
                    link.span,
                    next_pos - x_pos,
                    "INVARIANT VIOLATED: span at level {} from rank {} is {}, expected {}",
                    i,
                    x_pos,
                    link.span,
                    next_pos - x_pos
                );
                x = link.forward;
                x_pos = next_pos;
            }
        }
        for i in self.level..MAX_LEVEL {
            assert_eq!(
                self.head[i].forward, NULL,
                "INVARIANT VIOLATED: head links level {} above level()={}",
                i, self.level
            );
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn check_invariants(&self) {}
}

impl<T: Ord, C: Coin> SkipList<T, C> {
    /// Geometric height: P(height >= k) = 2^-(k-1), capped at `MAX_LEVEL`.
    fn random_level(&mut self) -> usize {
        let mut level = 1;
        while level < MAX_LEVEL && self.coin.flip() {
            level += 1;
        }
        level
    }

    /// Insert `(score, value)`. Equal entries are allowed; the new node goes
    /// in front of any existing run of equal ones.
    pub fn insert(&mut self, score: f64, value: T) -> &Node<T> {
        let Path {
            mut update,
            mut rank,
        } = self.descend(score, &value);

        let height = self.random_level();
        if height > self.level {
            for i in self.level..height {
                rank[i] = 0;
                update[i] = HEAD;
                self.head[i].span = self.len as u64;
            }
            self.level = height;
            profiling::level_promoted();
        }

        let idx = self.alloc_node(Node {
            score,
            value,
            links: smallvec![Link::EMPTY; height],
            backward: NULL,
        });

        for i in 0..height {
            let pred = self.link(update[i], i);
            // Distance from update[i] to update[0], already walked on lower levels.
            let gap = rank[0] - rank[i];
            *self.link_mut(idx, i) = Link {
                forward: pred.forward,
                span: pred.span - gap,
            };
            *self.link_mut(update[i], i) = Link {
                forward: idx,
                span: gap + 1,
            };
        }

        // Links above the new node now pass over one more node.
        for i in height..self.level {
            self.link_mut(update[i], i).span += 1;
        }

        self.node_mut(idx).backward = if update[0] == HEAD { NULL } else { update[0] };
        let next = self.node(idx).links[0].forward;
        if next == NULL {
            self.tail = idx;
        } else {
            self.node_mut(next).backward = idx;
        }

        self.len += 1;
        profiling::node_inserted();
        self.check_invariants();
        self.node(idx)
    }
}

impl<T: Ord, C: Coin> Extend<(f64, T)> for SkipList<T, C> {
    fn extend<I: IntoIterator<Item = (f64, T)>>(&mut self, iter: I) {
        for (score, value) in iter {
            self.insert(score, value);
        }
    }
}

impl<T: Ord> FromIterator<(f64, T)> for SkipList<T, StdRng> {
    fn from_iter<I: IntoIterator<Item = (f64, T)>>(iter: I) -> Self {
        let mut list = SkipList::new();
        list.extend(iter);
        list
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SkipList<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(Node::entry))
            .finish()
    }
}

/// Dumps every level from the top down, one line each.
impl<T: fmt::Display, C> fmt::Display for SkipList<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.level).rev() {
            write!(f, "Level {}:", i)?;
            let mut idx = self.head[i].forward;
            while idx != NULL {
                let node = self.node(idx);
                write!(f, " {}:{}", node.score, node.value)?;
                idx = node.links[i].forward;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Ascending iterator over the nodes of a `SkipList`.
pub struct Iter<'a, T> {
    nodes: &'a [Option<Node<T>>],
    front: Idx,
    back: Idx,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = slot(self.nodes, self.front);
        self.front = node.links[0].forward;
        self.remaining -= 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = slot(self.nodes, self.back);
        self.back = node.backward;
        self.remaining -= 1;
        Some(node)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T, C> IntoIterator for &'a SkipList<T, C> {
    type Item = &'a Node<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

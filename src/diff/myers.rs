//! Myers' greedy shortest edit script.
//!
//! Explores edit distance `d = 0, 1, 2, ...`. For each diagonal `k = x - y`
//! it keeps the furthest-reaching path found so far along with the edits
//! that got it there. The first path to reach `(old.len(), new.len())` has
//! the fewest additions plus removals, so its `Common` count equals the LCS
//! length.
//!
//! Moving right consumes an element of `old` (removal), moving down consumes
//! one of `new` (addition), and a diagonal "snake" follows equal elements.
//! When both moves reach equally far, the addition wins.

use rustc_hash::FxHashMap;

use super::Edit;

/// Furthest-reaching path on one diagonal.
struct Frontier<'a, T> {
    x: usize,
    history: Vec<Edit<&'a T>>,
}

pub fn diff<'a, T: PartialEq>(old: &'a [T], new: &'a [T]) -> Vec<Edit<&'a T>> {
    let n = old.len() as isize;
    let m = new.len() as isize;

    // Only paths that stay inside the edit grid are kept.
    let mut frontier: FxHashMap<isize, Frontier<'a, T>> = FxHashMap::default();
    frontier.insert(1, Frontier { x: 0, history: Vec::new() });

    for d in 0..=(n + m) {
        for k in (-d..=d).step_by(2) {
            // Down from diagonal k + 1 lands on y = x - k, which must stay <= m.
            let down_x = frontier
                .get(&(k + 1))
                .map(|f| f.x)
                .filter(|&x| x as isize - k <= m);
            // Right from diagonal k - 1 lands on x + 1, which must stay <= n.
            let right_x = frontier
                .get(&(k - 1))
                .map(|f| f.x + 1)
                .filter(|&x| x as isize <= n);

            let down = match (down_x, right_x) {
                (Some(dx), Some(rx)) => dx >= rx,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => {
                    frontier.remove(&k);
                    continue;
                }
            };

            let (mut x, mut history) = if down {
                let f = &frontier[&(k + 1)];
                (f.x, f.history.clone())
            } else {
                let f = &frontier[&(k - 1)];
                (f.x + 1, f.history.clone())
            };
            let mut y = (x as isize - k) as usize;

            if down {
                // The virtual start at (0, -1) steps down onto (0, 0) for free.
                if y >= 1 {
                    history.push(Edit::Added { new: y - 1, item: &new[y - 1] });
                }
            } else {
                history.push(Edit::Removed { old: x - 1, item: &old[x - 1] });
            }

            while x < old.len() && y < new.len() && old[x] == new[y] {
                history.push(Edit::Common { old: x, new: y, item: &old[x] });
                x += 1;
                y += 1;
            }

            if x == old.len() && y == new.len() {
                return history;
            }

            frontier.insert(k, Frontier { x, history });
        }
    }

    unreachable!("an in-grid path reaches the end within old.len() + new.len() edits")
}

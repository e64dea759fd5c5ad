//! Diff by longest common subsequence.
//!
//! Common prefix and suffix are stripped first so the O(nm) table only
//! covers the part that actually changed. On a tie the walk prefers
//! removing from `old`, so removals come before additions.

use super::Edit;

/// `table[i][j]` = LCS length of `old[i..]` and `new[j..]`.
fn lcs_table<T: PartialEq>(old: &[T], new: &[T]) -> Vec<Vec<usize>> {
    let mut table = vec![vec![0usize; new.len() + 1]; old.len() + 1];
    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            table[i][j] = if old[i] == new[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }
    table
}

/// Length of the longest common subsequence of `old` and `new`.
pub fn lcs_len<T: PartialEq>(old: &[T], new: &[T]) -> usize {
    lcs_table(old, new)[0][0]
}

pub fn diff<'a, T: PartialEq>(old: &'a [T], new: &'a [T]) -> Vec<Edit<&'a T>> {
    let mut result = Vec::with_capacity(old.len().max(new.len()));

    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    for k in 0..prefix {
        result.push(Edit::Common { old: k, new: k, item: &old[k] });
    }

    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];
    let table = lcs_table(old_mid, new_mid);

    let (mut i, mut j) = (0, 0);
    while i < old_mid.len() && j < new_mid.len() {
        if old_mid[i] == new_mid[j] {
            result.push(Edit::Common {
                old: prefix + i,
                new: prefix + j,
                item: &old_mid[i],
            });
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            result.push(Edit::Removed { old: prefix + i, item: &old_mid[i] });
            i += 1;
        } else {
            result.push(Edit::Added { new: prefix + j, item: &new_mid[j] });
            j += 1;
        }
    }
    for i in i..old_mid.len() {
        result.push(Edit::Removed { old: prefix + i, item: &old_mid[i] });
    }
    for j in j..new_mid.len() {
        result.push(Edit::Added { new: prefix + j, item: &new_mid[j] });
    }

    for k in 0..suffix {
        let o = old.len() - suffix + k;
        let n = new.len() - suffix + k;
        result.push(Edit::Common { old: o, new: n, item: &old[o] });
    }

    result
}

use std::collections::HashMap;
use std::fmt;

/// Term or term pair appended to the query, reported separately so the
/// caller can show the user what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Appended {
    One(String),
    Two(String, String),
}

impl Appended {
    pub fn terms(&self) -> Vec<&str> {
        match self {
            Appended::One(a) => vec![a],
            Appended::Two(a, b) => vec![a, b],
        }
    }
}

impl fmt::Display for Appended {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Appended::One(a) => write!(f, "{a}"),
            Appended::Two(a, b) => write!(f, "{a} {b}"),
        }
    }
}

/// Pick which of the top-scoring candidates to append. When the top two
/// scores are within `append_threshold` of each other the evidence does
/// not separate them, so both are appended; otherwise only the leader is.
///
/// Requires at least two candidates, which the candidate selector
/// guarantees.
pub fn pick_appended(
    candidates: &[String],
    rankings: &HashMap<String, f64>,
    append_threshold: f64,
) -> Appended {
    debug_assert!(candidates.len() >= 2);
    let mut sorted: Vec<&String> = candidates.iter().collect();
    sorted.sort_by(|a, b| {
        rankings[*b]
            .partial_cmp(&rankings[*a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.cmp(b))
    });

    let first = sorted[0];
    let second = sorted[1];
    if rankings[first] - rankings[second] <= append_threshold {
        Appended::Two(first.clone(), second.clone())
    } else {
        Appended::One(first.clone())
    }
}

/// Order the full term multiset to best match phrasing observed in
/// relevant documents: every permutation is scored by the total number of
/// ordered (gaps allowed) embeddings of its terms across the relevant
/// token streams, and the best-scoring permutation wins. Ties keep the
/// earliest permutation in enumeration order, so with no phrase evidence
/// at all the input order comes back unchanged.
///
/// Enumeration is factorial in the multiset size; callers keep that size
/// to the previous query length plus the one or two appended terms.
pub fn reorder(terms: &[String], relevant_streams: &[Vec<String>]) -> Vec<String> {
    if terms.len() <= 1 {
        return terms.to_vec();
    }

    let mut best_order: Vec<usize> = (0..terms.len()).collect();
    let mut best_count = total_subsequence_count(&best_order, terms, relevant_streams);

    for_each_permutation(terms.len(), &mut |order| {
        let count = total_subsequence_count(order, terms, relevant_streams);
        if count > best_count {
            best_count = count;
            best_order = order.to_vec();
        }
    });

    tracing::debug!(terms = terms.len(), best_count, "reorder complete");
    best_order.iter().map(|&i| terms[i].clone()).collect()
}

/// Sum of subsequence embedding counts over all relevant token streams.
fn total_subsequence_count(
    order: &[usize],
    terms: &[String],
    relevant_streams: &[Vec<String>],
) -> u64 {
    let sequence: Vec<&str> = order.iter().map(|&i| terms[i].as_str()).collect();
    relevant_streams
        .iter()
        .map(|stream| subsequence_count(&sequence, stream))
        .sum()
}

/// Number of distinct ways `sequence` occurs as an ordered, possibly
/// non-contiguous subsequence of `tokens`.
fn subsequence_count(sequence: &[&str], tokens: &[String]) -> u64 {
    let m = sequence.len();
    let mut ways = vec![0u64; m + 1];
    ways[0] = 1;
    for token in tokens {
        for i in (0..m).rev() {
            if sequence[i] == token {
                ways[i + 1] = ways[i + 1].saturating_add(ways[i]);
            }
        }
    }
    ways[m]
}

/// Visit every permutation of `0..n` in lexicographic-by-choice order
/// (the identity first).
fn for_each_permutation(n: usize, visit: &mut dyn FnMut(&[usize])) {
    let mut current = Vec::with_capacity(n);
    let mut used = vec![false; n];
    permute(n, &mut current, &mut used, visit);
}

fn permute(n: usize, current: &mut Vec<usize>, used: &mut [bool], visit: &mut dyn FnMut(&[usize])) {
    if current.len() == n {
        visit(current);
        return;
    }
    for i in 0..n {
        if used[i] {
            continue;
        }
        used[i] = true;
        current.push(i);
        permute(n, current, used, visit);
        current.pop();
        used[i] = false;
    }
}

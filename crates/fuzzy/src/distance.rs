/// Damerau-Levenshtein edit distance between two strings.
///
/// Counts insertions, deletions, substitutions and adjacent transpositions
/// over Unicode scalar values, on a full `(|a|+1) x (|b|+1)` dynamic
/// programming table. O(|a| * |b|) time and space; callers are expected to
/// feed it short titles and words.
#[must_use]
pub fn damerau_levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in dp[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
            // Adjacent transposition: "ab" <-> "ba" counts as one edit.
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(dp[i - 2][j - 2] + cost);
            }
            dp[i][j] = best;
        }
    }

    dp[a.len()][b.len()]
}

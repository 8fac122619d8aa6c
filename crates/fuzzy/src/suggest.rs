use crate::distance::damerau_levenshtein;

/// Largest edit distance a suggestion candidate may have.
pub const SUGGESTION_MAX_DISTANCE: usize = 2;

/// Pick the candidate word closest to `query` by edit distance.
///
/// Candidates are scanned in the order given and ties keep the earliest
/// word, so the caller's word order is part of the observable behavior.
/// Returns `None` when no candidate comes within
/// [`SUGGESTION_MAX_DISTANCE`].
#[must_use]
pub fn closest_word<'a, I>(query: &str, words: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&str, usize)> = None;
    for word in words {
        let distance = damerau_levenshtein(query, word);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((word, distance));
        }
    }
    best.filter(|(_, distance)| *distance <= SUGGESTION_MAX_DISTANCE)
        .map(|(word, _)| word)
}

/// Cosine similarity between two embeddings.
///
/// When lengths differ the comparison runs over the shared prefix, dot
/// product and both norms alike; the truncated score is an accepted
/// approximation, logged rather than treated as an error. The epsilon in
/// the denominator makes the function total: zero or empty vectors score
/// 0.0.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        log::debug!(
            "cosine over mismatched widths {} vs {}, truncating to the shorter",
            a.len(),
            b.len()
        );
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt() + 1e-8)
}

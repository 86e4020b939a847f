//! Component similarity functions used by the ranker.

use std::collections::BTreeSet;

/// Jaccard overlap `|a ∩ b| / |a ∪ b|` between two tag sets.
///
/// Two empty sets score 0.0: no information is treated as no similarity.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f32 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f32 / union as f32
}

/// Return a unit-length copy of `v`, or `None` when it has no direction
/// (empty, zero norm, or a non-finite component).
///
/// Squares are accumulated in `f64`, which neither underflows nor overflows
/// for any finite `f32` input.
pub fn l2_normalize(v: &[f32]) -> Option<Vec<f32>> {
    let norm_sq: f64 = v.iter().map(|&x| f64::from(x) * f64::from(x)).sum();
    if norm_sq <= 0.0 || !norm_sq.is_finite() {
        return None;
    }
    let norm = norm_sq.sqrt();
    Some(v.iter().map(|&x| (f64::from(x) / norm) as f32).collect())
}

/// Cosine similarity of two embeddings.
///
/// Each vector is normalized on its own before the dot product. Empty
/// inputs, a length mismatch or a zero vector all yield 0.0, and so does any
/// non-finite intermediate.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let (Some(a), Some(b)) = (l2_normalize(a), l2_normalize(b)) else {
        return 0.0;
    };
    let dot: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
    if dot.is_finite() {
        dot
    } else {
        0.0
    }
}

/// Cosine similarity over optional embeddings; absent on either side is 0.0.
pub fn embedding_similarity(a: Option<&[f32]>, b: Option<&[f32]>) -> f32 {
    match (a, b) {
        (Some(a), Some(b)) => cosine(a, b),
        _ => 0.0,
    }
}

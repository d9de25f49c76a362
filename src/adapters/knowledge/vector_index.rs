//! In-memory vector index with brute-force cosine similarity search.

/// One indexed passage.
#[derive(Debug, Clone)]
struct IndexedPassage {
    source: String,
    text: String,
    embedding: Vec<f32>,
}

/// A passage returned from a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// File the passage came from.
    pub source: String,
    pub text: String,
    /// Cosine similarity score.
    pub score: f64,
}

/// Immutable passage index built once per document set.
#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    passages: Vec<IndexedPassage>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, text: impl Into<String>, embedding: Vec<f32>) {
        self.passages.push(IndexedPassage {
            source: source.into(),
            text: text.into(),
            embedding,
        });
    }

    /// Returns the `k` passages most similar to the query, best first.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<SearchHit> {
        let mut scored: Vec<SearchHit> = self
            .passages
            .iter()
            .map(|p| SearchHit {
                source: p.source.clone(),
                text: p.text.clone(),
                score: cosine_similarity(query, &p.embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude or the lengths differ.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let mag_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a * mag_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_orders_by_similarity() {
        let mut index = VectorIndex::new();
        index.insert("a.pdf", "x axis", vec![1.0, 0.0]);
        index.insert("b.pdf", "y axis", vec![0.0, 1.0]);
        index.insert("c.pdf", "diagonal", vec![1.0, 1.0]);

        let hits = index.search(&[1.0, 0.1], 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text, "x axis");
        assert_eq!(hits[1].text, "diagonal");
    }

    #[test]
    fn search_empty_index() {
        assert!(VectorIndex::new().search(&[1.0], 3).is_empty());
    }

    #[test]
    fn cosine_similarity_edge_cases() {
        assert!((cosine_similarity(&[1.0, 2.0], &[1.0, 2.0]) - 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 1.0]), 0.0);
    }
}

//! Term-frequency index with cosine-similarity ranking.

use std::collections::HashMap;

/// Words too common to carry any signal for ranking.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "can", "do", "does", "for", "from", "how",
    "in", "is", "it", "of", "on", "or", "that", "the", "this", "to", "what", "when", "where",
    "which", "who", "why", "with",
];

/// Lowercased alphanumeric terms of `text`, stopwords removed.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
        .collect()
}

/// Sparse term-frequency vector.
#[derive(Debug, Clone, Default)]
pub struct TermVector {
    weights: HashMap<String, f64>,
    norm: f64,
}

impl TermVector {
    pub fn from_text(text: &str) -> Self {
        let mut weights: HashMap<String, f64> = HashMap::new();
        for term in tokenize(text) {
            *weights.entry(term).or_insert(0.0) += 1.0;
        }
        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        Self { weights, norm }
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Cosine similarity in [0, 1]; 0.0 if either vector is empty.
    pub fn cosine(&self, other: &TermVector) -> f64 {
        let denom = self.norm * other.norm;
        if denom < 1e-10 {
            return 0.0;
        }
        // Iterate the smaller map.
        let (small, large) = if self.weights.len() <= other.weights.len() {
            (&self.weights, &other.weights)
        } else {
            (&other.weights, &self.weights)
        };
        let dot: f64 = small
            .iter()
            .filter_map(|(term, w)| large.get(term).map(|o| w * o))
            .sum();
        dot / denom
    }
}

/// A chunk together with its precomputed vector.
#[derive(Debug, Clone)]
pub struct IndexedChunk {
    pub text: String,
    vector: TermVector,
}

/// A scored search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit<'a> {
    pub text: &'a str,
    pub score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ChunkIndex {
    chunks: Vec<IndexedChunk>,
}

impl ChunkIndex {
    pub fn build(chunks: Vec<String>) -> Self {
        let chunks = chunks
            .into_iter()
            .map(|text| IndexedChunk {
                vector: TermVector::from_text(&text),
                text,
            })
            .collect();
        Self { chunks }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The `limit` chunks most similar to `query`, best first.
    ///
    /// Chunks sharing no terms with the query are never returned. Ties keep
    /// document order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<Hit<'_>> {
        let query = TermVector::from_text(query);
        if query.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<Hit<'_>> = self
            .chunks
            .iter()
            .map(|c| Hit {
                text: c.text.as_str(),
                score: query.cosine(&c.vector),
            })
            .filter(|h| h.score > 0.0)
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(limit);
        hits
    }
}

//! Unsupervised statistical keyword extraction.
//!
//! YAKE-style scoring over the input text itself, no corpus or model:
//! candidate n-grams are contiguous non-stopword runs scored by
//! frequency, length and first-occurrence position, then deduplicated by
//! string similarity.

use std::collections::HashMap;

use crate::types::InsightConfig;

/// English stopwords used to bound candidate n-grams.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "so", "yet", "of", "in", "on", "at", "to",
    "from", "by", "for", "with", "about", "against", "between", "into", "through", "during",
    "before", "after", "above", "below", "up", "down", "out", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how", "all", "any",
    "both", "each", "few", "more", "most", "other", "some", "such", "no", "not", "only", "own",
    "same", "than", "too", "very", "can", "will", "just", "should", "now", "is", "are", "was",
    "were", "be", "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing",
    "we", "our", "it", "its", "this", "that", "these", "those", "as", "which", "their", "they",
];

/// Statistical keyword extractor.
///
/// Stateless per call; configuration is fixed at construction.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    max_ngram: usize,
    dedup_threshold: f64,
    top: usize,
}

#[derive(Debug)]
struct Candidate {
    phrase: String,
    score: f64,
    first_pos: usize,
}

impl KeywordExtractor {
    /// Create an extractor from insight configuration.
    pub fn new(config: &InsightConfig) -> Self {
        Self {
            max_ngram: config.max_ngram,
            dedup_threshold: config.dedup_threshold,
            top: config.top_keywords,
        }
    }

    /// Extract up to `top` keywords, most salient first.
    ///
    /// Empty input yields an empty vector.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return Vec::new();
        }

        let mut tokens: Vec<Vec<String>> = Vec::with_capacity(sentences.len());
        let mut total_tokens = 0usize;
        for sentence in &sentences {
            let words: Vec<String> = sentence
                .split(|c: char| !c.is_alphanumeric() && c != '-')
                .filter(|w| w.chars().any(|c| c.is_alphanumeric()))
                .map(|w| w.to_lowercase())
                .collect();
            total_tokens += words.len();
            tokens.push(words);
        }
        if total_tokens == 0 {
            return Vec::new();
        }

        // Per-term frequency across the whole text.
        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        for sentence in &tokens {
            for word in sentence {
                *term_freq.entry(word.as_str()).or_default() += 1;
            }
        }

        // Candidate phrases: contiguous non-stopword runs, bounded length,
        // not crossing sentence boundaries.
        let mut candidates: HashMap<String, Candidate> = HashMap::new();
        let mut offset = 0usize;
        for sentence in &tokens {
            for start in 0..sentence.len() {
                if is_stopword(&sentence[start]) {
                    continue;
                }
                for len in 1..=self.max_ngram {
                    let end = start + len;
                    if end > sentence.len() {
                        break;
                    }
                    if sentence[start..end].iter().any(|w| is_stopword(w)) {
                        break;
                    }
                    let phrase = sentence[start..end].join(" ");
                    let first_pos = offset + start;
                    let term_weight: f64 = sentence[start..end]
                        .iter()
                        .map(|w| term_freq[w.as_str()] as f64)
                        .sum::<f64>()
                        / len as f64;

                    let entry = candidates.entry(phrase.clone()).or_insert(Candidate {
                        phrase,
                        score: 0.0,
                        first_pos,
                    });
                    // Frequent, long and early phrases score higher.
                    let positional = 1.0 / (1.0 + entry.first_pos as f64 / total_tokens as f64);
                    entry.score += term_weight * (1.0 + 0.5 * (len as f64 - 1.0)) * positional;
                }
            }
            offset += sentence.len();
        }

        let mut ranked: Vec<Candidate> = candidates.into_values().collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.first_pos.cmp(&b.first_pos))
                .then(a.phrase.cmp(&b.phrase))
        });

        // Greedy selection with near-duplicate suppression.
        let mut selected: Vec<String> = Vec::with_capacity(self.top);
        for candidate in ranked {
            if selected.len() >= self.top {
                break;
            }
            let duplicate = selected
                .iter()
                .any(|kept| similarity(kept, &candidate.phrase) > self.dedup_threshold);
            if !duplicate {
                selected.push(candidate.phrase);
            }
        }
        selected
    }
}

fn is_stopword(word: &str) -> bool {
    word.len() < 2 || STOPWORDS.contains(&word)
}

fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Normalized string similarity in [0, 1] based on edit distance.
fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> KeywordExtractor {
        KeywordExtractor::new(&InsightConfig::default())
    }

    #[test]
    fn test_empty_input_returns_empty() {
        assert!(extractor().extract("").is_empty());
        assert!(extractor().extract("   \n  ").is_empty());
        assert!(extractor().extract("... !!! ???").is_empty());
    }

    #[test]
    fn test_returns_at_most_five_keywords() {
        let text = "Graph neural networks learn representations of graph data. \
                    Message passing aggregates neighbor features. Attention mechanisms \
                    weight edges. Pooling layers coarsen graphs. Readout functions \
                    produce graph embeddings. Spectral methods use the graph Laplacian.";
        let keywords = extractor().extract(text);
        assert!(!keywords.is_empty());
        assert!(keywords.len() <= 5);
    }

    #[test]
    fn test_salient_phrase_ranks_first() {
        let text = "Quantum computing promises exponential speedups. Quantum computing \
                    relies on qubits. Error correction protects quantum computing from noise.";
        let keywords = extractor().extract(text);
        assert_eq!(keywords[0], "quantum computing");
    }

    #[test]
    fn test_near_duplicates_are_dropped() {
        let text = "Neural network training converges. Neural networks generalize well. \
                    Neural network architectures vary. Neural networks scale with data.";
        let keywords = extractor().extract(text);
        let near_dupes = keywords
            .iter()
            .filter(|k| k.starts_with("neural network"))
            .count();
        assert_eq!(near_dupes, 1, "expected dedup of {keywords:?}");
    }

    #[test]
    fn test_stopwords_never_selected() {
        let text = "The model of the system is the best of all the options in the world.";
        let keywords = extractor().extract(text);
        for kw in &keywords {
            for word in kw.split_whitespace() {
                assert!(!is_stopword(word), "stopword {word:?} in {keywords:?}");
            }
        }
    }

    #[test]
    fn test_similarity_threshold() {
        assert!(similarity("neural network", "neural networks") > 0.9);
        assert!(similarity("neural network", "graph attention") < 0.5);
        assert_eq!(similarity("same", "same"), 1.0);
    }

    #[test]
    fn test_deterministic_output() {
        let text = "Transformers dominate language modeling. Transformers use attention.";
        let a = extractor().extract(text);
        let b = extractor().extract(text);
        assert_eq!(a, b);
    }
}

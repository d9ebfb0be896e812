//! Keyphrase candidate generation and ranking.
//!
//! Candidates are 1–2-token phrases from the cleaned text. With an
//! embedding backend available they are ranked by cosine relevance to the
//! document embedding and re-ranked with MMR for diversity; otherwise a
//! deterministic frequency ratio is used.

use std::collections::HashMap;

use ndarray::Array1;

use civicsift_core::KeywordScore;
use civicsift_extract::{extract_keywords, tokenize};

use crate::embedder::EmbedderBackend;

/// MMR trade-off between relevance and diversity.
const MMR_DIVERSITY: f32 = 0.6;

struct Candidate {
    phrase: String,
    count: usize,
}

/// Extract up to `top_n` ranked keyphrases from cleaned text.
///
/// Never errors; any failure degrades to the frequency fallback or an
/// empty list.
pub fn extract_keyphrases(
    cleaned: &str,
    embedder: &dyn EmbedderBackend,
    top_n: usize,
) -> Vec<KeywordScore> {
    if cleaned.trim().is_empty() || top_n == 0 {
        return Vec::new();
    }

    let candidates = candidate_phrases(cleaned);
    if candidates.is_empty() {
        return Vec::new();
    }

    if embedder.is_available() {
        if let Some(ranked) = rank_by_embedding(cleaned, &candidates, embedder, top_n) {
            return ranked;
        }
        tracing::warn!("Embedding-based ranking produced nothing, using frequency fallback");
    }

    rank_by_frequency(&candidates, top_n)
}

fn add(order: &mut Vec<String>, counts: &mut HashMap<String, usize>, phrase: String) {
    let count = counts.entry(phrase.clone()).or_insert(0);
    if *count == 0 {
        order.push(phrase);
    }
    *count += 1;
}

/// 1–2-token candidate phrases in first-occurrence order with counts.
///
/// The extraction stage's keyword bag defines which tokens may appear in a
/// candidate; adjacency over the full token stream forms the bigrams.
fn candidate_phrases(cleaned: &str) -> Vec<Candidate> {
    let bag: std::collections::HashSet<String> = extract_keywords(cleaned).into_iter().collect();
    let tokens = tokenize(cleaned);

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for (i, &token) in tokens.iter().enumerate() {
        if !bag.contains(token) {
            continue;
        }
        add(&mut order, &mut counts, token.to_string());
        if let Some(&next) = tokens.get(i + 1) {
            if bag.contains(next) {
                add(&mut order, &mut counts, format!("{} {}", token, next));
            }
        }
    }

    order
        .into_iter()
        .map(|phrase| Candidate {
            count: counts[&phrase],
            phrase,
        })
        .collect()
}

fn cosine(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    let denom = a.dot(a).sqrt() * b.dot(b).sqrt();
    if denom < 1e-12 {
        0.0
    } else {
        a.dot(b) / denom
    }
}

fn rank_by_embedding(
    cleaned: &str,
    candidates: &[Candidate],
    embedder: &dyn EmbedderBackend,
    top_n: usize,
) -> Option<Vec<KeywordScore>> {
    let doc = embedder.embed(cleaned)?;

    let texts: Vec<&str> = candidates.iter().map(|c| c.phrase.as_str()).collect();
    let embeddings = embedder.embed_batch(&texts);

    // (candidate index, embedding, relevance to the document)
    let mut scored: Vec<(usize, Array1<f32>, f32)> = Vec::new();
    for (i, emb) in embeddings.into_iter().enumerate() {
        if let Some(emb) = emb {
            let relevance = cosine(&doc, &emb);
            scored.push((i, emb, relevance));
        }
    }
    if scored.is_empty() {
        return None;
    }

    // MMR selection: first pick pure relevance, then trade relevance against
    // similarity to what is already selected.
    let mut selected: Vec<usize> = Vec::new();
    let mut remaining: Vec<usize> = (0..scored.len()).collect();

    while selected.len() < top_n && !remaining.is_empty() {
        let mut best_pos = 0;
        let mut best_value = f32::NEG_INFINITY;
        for (pos, &idx) in remaining.iter().enumerate() {
            let relevance = scored[idx].2;
            let value = if selected.is_empty() {
                relevance
            } else {
                let max_sim = selected
                    .iter()
                    .map(|&s| cosine(&scored[idx].1, &scored[s].1))
                    .fold(f32::NEG_INFINITY, f32::max);
                (1.0 - MMR_DIVERSITY) * relevance - MMR_DIVERSITY * max_sim
            };
            if value > best_value {
                best_value = value;
                best_pos = pos;
            }
        }
        selected.push(remaining.remove(best_pos));
    }

    let mut result: Vec<KeywordScore> = selected
        .into_iter()
        .map(|idx| KeywordScore {
            keyword: candidates[scored[idx].0].phrase.clone(),
            score: scored[idx].2 as f64,
        })
        .collect();
    result.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    Some(result)
}

fn rank_by_frequency(candidates: &[Candidate], top_n: usize) -> Vec<KeywordScore> {
    let max_count = match candidates.iter().map(|c| c.count).max() {
        Some(m) if m > 0 => m,
        _ => return Vec::new(),
    };

    let mut ranked: Vec<&Candidate> = candidates.iter().collect();
    // Stable sort: ties keep first-occurrence order
    ranked.sort_by(|a, b| b.count.cmp(&a.count));

    ranked
        .into_iter()
        .take(top_n)
        .map(|c| KeywordScore {
            keyword: c.phrase.clone(),
            score: c.count as f64 / max_count as f64,
        })
        .collect()
}

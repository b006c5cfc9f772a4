use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Scores how alike two person names are, on a 0..=100 scale.
///
/// The score is unrounded; thresholds are applied to it as-is.
pub trait NameSimilarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Which [`NameSimilarity`] implementation the engine uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityAlgorithm {
    #[default]
    TokenSet,
    Levenshtein,
}

impl SimilarityAlgorithm {
    pub fn build(&self) -> Box<dyn NameSimilarity> {
        match self {
            Self::TokenSet => Box::new(TokenSetRatio),
            Self::Levenshtein => Box::new(LevenshteinRatio),
        }
    }
}

fn tokens(s: &str) -> BTreeSet<String> {
    s.split_whitespace().map(str::to_lowercase).collect()
}

fn join<'a>(tokens: impl IntoIterator<Item = &'a String>) -> Vec<char> {
    let mut out = Vec::new();
    for (i, t) in tokens.into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.extend(t.chars());
    }
    out
}

fn to_score(ratio: f64) -> f64 {
    ratio.clamp(0.0, 100.0)
}

// ---------------------------------------------------------------------------
// Token set ratio
// ---------------------------------------------------------------------------

/// Order-insensitive token-set comparison.
///
/// Names whose token sets overlap with one side fully contained in the other
/// score 100 ("Raj Kumar Singh" vs "Kumar Raj Singh", "Aarav Sharma" vs
/// "Aarav K Sharma"). Otherwise the shared tokens are prefixed to each side's
/// leftovers and the best Indel similarity among the combinations wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSetRatio;

impl NameSimilarity for TokenSetRatio {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        to_score(token_set_ratio(a, b))
    }
}

fn token_set_ratio(a: &str, b: &str) -> f64 {
    let ta = tokens(a);
    let tb = tokens(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let sect: Vec<&String> = ta.intersection(&tb).collect();
    let diff_ab: Vec<&String> = ta.difference(&tb).collect();
    let diff_ba: Vec<&String> = tb.difference(&ta).collect();

    if !sect.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let ab = join(diff_ab);
    let ba = join(diff_ba);
    let sect_len = join(sect).len();
    let sep = usize::from(sect_len != 0);
    let sect_ab_len = sect_len + sep + ab.len();
    let sect_ba_len = sect_len + sep + ba.len();

    // Both combined strings share the intersection prefix, so their distance
    // is the distance between the leftovers alone.
    let combined = normalized(indel_distance(&ab, &ba), sect_ab_len + sect_ba_len);
    if sect_len == 0 {
        return combined;
    }

    let sect_ab = normalized(sep + ab.len(), sect_len + sect_ab_len);
    let sect_ba = normalized(sep + ba.len(), sect_len + sect_ba_len);
    combined.max(sect_ab).max(sect_ba)
}

fn normalized(distance: usize, total_len: usize) -> f64 {
    if total_len == 0 {
        return 100.0;
    }
    100.0 - 100.0 * distance as f64 / total_len as f64
}

/// Insertions + deletions needed to turn `a` into `b`.
fn indel_distance(a: &[char], b: &[char]) -> usize {
    a.len() + b.len() - 2 * lcs_len(a, b)
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(cur[j])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

// ---------------------------------------------------------------------------
// Levenshtein over sorted tokens
// ---------------------------------------------------------------------------

/// Normalized Levenshtein similarity of the sorted, case-folded tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinRatio;

impl NameSimilarity for LevenshteinRatio {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let ta = tokens(a);
        let tb = tokens(b);
        if ta.is_empty() || tb.is_empty() {
            return 0.0;
        }
        let sa: String = join(&ta).into_iter().collect();
        let sb: String = join(&tb).into_iter().collect();
        to_score(strsim::normalized_levenshtein(&sa, &sb) * 100.0)
    }
}

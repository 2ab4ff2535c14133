/// Strategy for calculating similarity between two strings
///
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
pub trait SimilarityStrategy: Send + Sync {
    fn calculate(&self, query: &str, target: &str) -> f64;

    /// Get the name of this strategy for logging/debugging
    fn name(&self) -> &'static str;
}

/// Matching-blocks ratio (Ratcliff/Obershelp style)
///
/// Finds the longest common contiguous block, recurses into the unmatched
/// regions on either side, and returns `2 * M / (len(a) + len(b))` where `M`
/// is the total number of matched characters. When several blocks share the
/// maximal length, the one starting earliest in `query` (then in `target`)
/// is taken, so the result is deterministic but not always symmetric.
#[derive(Debug, Clone, Default)]
pub struct MatchingBlocksStrategy;

impl SimilarityStrategy for MatchingBlocksStrategy {
    fn calculate(&self, query: &str, target: &str) -> f64 {
        let a: Vec<char> = query.chars().collect();
        let b: Vec<char> = target.chars().collect();

        let total = a.len() + b.len();
        if total == 0 {
            return 1.0;
        }

        2.0 * matched_characters(&a, &b) as f64 / total as f64
    }

    fn name(&self) -> &'static str {
        "MatchingBlocks"
    }
}

/// Raises the inner score to `floor` when the target contains the whole query
pub struct ContainmentFloorStrategy {
    inner: Box<dyn SimilarityStrategy>,
    floor: f64,
}

impl ContainmentFloorStrategy {
    pub fn new(inner: Box<dyn SimilarityStrategy>, floor: f64) -> Self {
        Self {
            inner,
            floor: floor.clamp(0.0, 1.0),
        }
    }
}

impl SimilarityStrategy for ContainmentFloorStrategy {
    fn calculate(&self, query: &str, target: &str) -> f64 {
        let score = self.inner.calculate(query, target);
        if !query.is_empty() && target.contains(query) {
            score.max(self.floor)
        } else {
            score
        }
    }

    fn name(&self) -> &'static str {
        "ContainmentFloor"
    }
}

/// Total size of all matching blocks between `a` and `b`
fn matched_characters(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }

        total += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    total
}

/// Longest common block within `a[alo..ahi]` and `b[blo..bhi]`
///
/// Returns `(start_in_a, start_in_b, size)`; ties resolve to the earliest
/// start in `a`, then the earliest start in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

    // run[j + 1 - blo] = length of the match ending at a[i - 1], b[j]
    let width = bhi - blo + 1;
    let mut previous = vec![0usize; width];
    let mut current = vec![0usize; width];

    for i in alo..ahi {
        for j in blo..bhi {
            let slot = j - blo + 1;
            if a[i] == b[j] {
                let k = previous[slot - 1] + 1;
                current[slot] = k;
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            } else {
                current[slot] = 0;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    (best_i, best_j, best_size)
}

/// Normalized `[0, 1]` similarity between two business names
///
/// Both inputs are lowercased and whitespace-collapsed before the strategy
/// sees them.
pub struct SimilarityScorer {
    strategy: Box<dyn SimilarityStrategy>,
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self::with_strategy(Box::new(MatchingBlocksStrategy))
    }

    pub fn with_strategy(strategy: Box<dyn SimilarityStrategy>) -> Self {
        Self { strategy }
    }

    /// Matching-blocks ratio, optionally floored for containment matches
    pub fn with_containment_floor(floor: Option<f64>) -> Self {
        match floor {
            Some(floor) => Self::with_strategy(Box::new(ContainmentFloorStrategy::new(
                Box::new(MatchingBlocksStrategy),
                floor,
            ))),
            None => Self::new(),
        }
    }

    pub fn score(&self, a: &str, b: &str) -> f64 {
        let a = normalize_name(a);
        let b = normalize_name(b);
        self.strategy.calculate(&a, &b).clamp(0.0, 1.0)
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

use crate::error::ScoringError;

/// One expected word and the spoken word it was paired with, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedWord {
    pub expected: String,
    pub spoken: Option<String>,
}

impl AlignedWord {
    fn new(expected: &str, spoken: Option<&str>) -> Self {
        Self {
            expected: expected.to_string(),
            spoken: spoken.map(str::to_string),
        }
    }
}

/// Trait for pairing expected words with transcribed words
pub trait WordAligner: Send + Sync {
    /// Return exactly one pair per expected word, in expected order.
    fn align(
        &self,
        expected: &[String],
        transcribed: &[String],
    ) -> Result<Vec<AlignedWord>, ScoringError>;
}

/// Index-based pairing: expected word `i` is compared with spoken word `i`.
/// An early insertion or omission shifts every later pair.
pub struct PositionalAligner;

impl WordAligner for PositionalAligner {
    fn align(
        &self,
        expected: &[String],
        transcribed: &[String],
    ) -> Result<Vec<AlignedWord>, ScoringError> {
        Ok(expected
            .iter()
            .enumerate()
            .map(|(i, word)| AlignedWord::new(word, transcribed.get(i).map(String::as_str)))
            .collect())
    }
}

/// Word-level edit operation, indices into the expected and spoken sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Equal { expected: usize, spoken: usize },
    Replace { expected: usize, spoken: usize },
    /// Expected word with no spoken counterpart.
    Delete { expected: usize },
    /// Spoken word with no expected counterpart.
    Insert { spoken: usize },
}

/// Minimum-edit (Levenshtein) alignment over whole words.
pub struct EditDistanceAligner;

impl EditDistanceAligner {
    pub fn opcodes(expected: &[String], transcribed: &[String]) -> Vec<EditOp> {
        let (n, m) = (expected.len(), transcribed.len());
        let mut dist = vec![vec![0usize; m + 1]; n + 1];
        for (i, row) in dist.iter_mut().enumerate() {
            row[0] = i;
        }
        for j in 0..=m {
            dist[0][j] = j;
        }
        for i in 1..=n {
            for j in 1..=m {
                let cost = usize::from(expected[i - 1] != transcribed[j - 1]);
                dist[i][j] = (dist[i - 1][j - 1] + cost)
                    .min(dist[i - 1][j] + 1)
                    .min(dist[i][j - 1] + 1);
            }
        }

        // Walk back preferring diagonal moves so substitutions pair words up.
        let mut ops = Vec::with_capacity(n.max(m));
        let (mut i, mut j) = (n, m);
        while i > 0 || j > 0 {
            if i > 0 && j > 0 {
                let equal = expected[i - 1] == transcribed[j - 1];
                if equal && dist[i][j] == dist[i - 1][j - 1] {
                    ops.push(EditOp::Equal {
                        expected: i - 1,
                        spoken: j - 1,
                    });
                    i -= 1;
                    j -= 1;
                    continue;
                }
                if !equal && dist[i][j] == dist[i - 1][j - 1] + 1 {
                    ops.push(EditOp::Replace {
                        expected: i - 1,
                        spoken: j - 1,
                    });
                    i -= 1;
                    j -= 1;
                    continue;
                }
            }
            if i > 0 && dist[i][j] == dist[i - 1][j] + 1 {
                ops.push(EditOp::Delete { expected: i - 1 });
                i -= 1;
            } else {
                ops.push(EditOp::Insert { spoken: j - 1 });
                j -= 1;
            }
        }
        ops.reverse();
        ops
    }
}

impl WordAligner for EditDistanceAligner {
    fn align(
        &self,
        expected: &[String],
        transcribed: &[String],
    ) -> Result<Vec<AlignedWord>, ScoringError> {
        Ok(Self::opcodes(expected, transcribed)
            .into_iter()
            .filter_map(|op| match op {
                EditOp::Equal { expected: e, spoken: s } | EditOp::Replace { expected: e, spoken: s } => {
                    Some(AlignedWord::new(&expected[e], Some(&transcribed[s])))
                }
                EditOp::Delete { expected: e } => Some(AlignedWord::new(&expected[e], None)),
                EditOp::Insert { .. } => None,
            })
            .collect())
    }
}

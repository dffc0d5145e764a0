use std::sync::LazyLock;

use regex::Regex;

/// Stitch count assumed before the first line, the conventional magic ring.
pub const DEFAULT_FIRST_ROUND: u32 = 6;

static BRACKET_REPEAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\s*[xX]\s*(\d+)").expect("valid regex"));
static STATED_TOTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)\)$").expect("valid regex"));
static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// One line of a pattern, resolved to a stitch count.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoundDescriptor {
    /// 1-based round number.
    pub index: usize,
    /// Trimmed instruction text as written.
    pub source_text: String,
    /// Number of stitches the round ends with.
    pub stitch_count: u32,
    /// The instruction mentions `inc`.
    pub has_increase: bool,
    /// The instruction mentions `dec`.
    pub has_decrease: bool,
}

impl RoundDescriptor {
    /// Build a descriptor for an already-known count, deriving the flags from `text`.
    pub fn new(index: usize, text: impl Into<String>, stitch_count: u32) -> Self {
        let source_text = text.into();
        Self {
            index,
            has_increase: source_text.contains("inc"),
            has_decrease: source_text.contains("dec"),
            source_text,
            stitch_count,
        }
    }
}

/// Ordered sequence of rounds. Round order is insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pattern {
    rounds: Vec<RoundDescriptor>,
}

/// Aggregate numbers for a pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PatternSummary {
    /// Number of rounds.
    pub rounds: usize,
    /// Sum of all round stitch counts.
    pub total_stitches: u64,
    /// Widest round.
    pub max_stitches: u32,
    /// Rounds flagged as increasing.
    pub increase_rounds: usize,
    /// Rounds flagged as decreasing.
    pub decrease_rounds: usize,
}

impl Pattern {
    /// Rebuild a pattern from `(stitch_count, instruction)` pairs.
    ///
    /// Indices come from position; the text is not parsed again.
    pub fn from_counts<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        let rounds = entries
            .into_iter()
            .enumerate()
            .map(|(i, (count, text))| RoundDescriptor::new(i + 1, text, count))
            .collect();
        Self { rounds }
    }

    /// The built-in five round ball used when nothing else is loaded.
    pub fn default_ball() -> Self {
        Self::from_counts([
            (6, "6 sc in MR"),
            (12, "2 sc in each (12)"),
            (18, "[sc, inc] x6"),
            (24, "[2sc, inc] x6"),
            (30, "[3sc, inc] x6"),
        ])
    }

    /// Rounds in order.
    pub fn rounds(&self) -> &[RoundDescriptor] {
        &self.rounds
    }

    /// Round at a 0-based position.
    pub fn get(&self, pos: usize) -> Option<&RoundDescriptor> {
        self.rounds.get(pos)
    }

    /// Number of rounds.
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// Return `true` when the pattern has no rounds.
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Iterate the rounds in order.
    pub fn iter(&self) -> std::slice::Iter<'_, RoundDescriptor> {
        self.rounds.iter()
    }

    /// Stitch counts in round order.
    pub fn stitch_counts(&self) -> Vec<u32> {
        self.rounds.iter().map(|r| r.stitch_count).collect()
    }

    /// Aggregate counts over the whole pattern.
    pub fn summary(&self) -> PatternSummary {
        self.rounds
            .iter()
            .fold(PatternSummary::default(), |mut acc, r| {
                acc.rounds += 1;
                acc.total_stitches += u64::from(r.stitch_count);
                acc.max_stitches = acc.max_stitches.max(r.stitch_count);
                acc.increase_rounds += usize::from(r.has_increase);
                acc.decrease_rounds += usize::from(r.has_decrease);
                acc
            })
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a RoundDescriptor;
    type IntoIter = std::slice::Iter<'a, RoundDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.rounds.iter()
    }
}

/// Which rule produced a round's stitch count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountRule {
    /// Trailing `(N)`.
    Stated,
    /// `[..] xN` arithmetic.
    BracketRepeat,
    /// Magic ring line.
    MagicRing,
    /// `inc` without a stated total, grown by half.
    Growth,
    /// Last integer on the line.
    LastNumber,
    /// Nothing recognised; previous count carried over.
    Carried,
}

/// Parse pattern text into rounds. Never fails: every non-blank line becomes a round.
pub fn parse(text: &str) -> Pattern {
    let mut previous = DEFAULT_FIRST_ROUND;
    let mut rounds = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let (count, rule) = resolve_count(line, previous);
        let round = RoundDescriptor::new(rounds.len() + 1, line, count);
        tracing::debug!(round = round.index, stitches = count, ?rule, "parsed round");
        rounds.push(round);
        previous = count;
    }

    Pattern { rounds }
}

/// Resolve one trimmed line against the running stitch count.
pub fn resolve_count(line: &str, previous: u32) -> (u32, CountRule) {
    // An explicit `(N)` total beats bracket arithmetic.
    if let Some(n) = stated_total(line) {
        return (n, CountRule::Stated);
    }
    if let Some(n) = bracket_repeat(line) {
        return (n, CountRule::BracketRepeat);
    }

    let numbers: Vec<u32> = INTEGER
        .find_iter(line)
        .map(|m| parse_saturating(m.as_str()))
        .collect();

    if line.contains("MR") || line.contains("magic ring") {
        (
            numbers.first().copied().unwrap_or(DEFAULT_FIRST_ROUND),
            CountRule::MagicRing,
        )
    } else if line.contains("inc") {
        (previous.saturating_add(previous / 2), CountRule::Growth)
    } else if let Some(&last) = numbers.last() {
        (last, CountRule::LastNumber)
    } else {
        (previous, CountRule::Carried)
    }
}

fn stated_total(line: &str) -> Option<u32> {
    let caps = STATED_TOTAL.captures(line)?;
    Some(parse_saturating(&caps[1]))
}

fn bracket_repeat(line: &str) -> Option<u32> {
    let caps = BRACKET_REPEAT.captures(line)?;
    let per_repeat = caps[1]
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        // `dec` and plain stitches each leave one stitch behind.
        .map(|t| if t == "inc" { 2u32 } else { 1 })
        .fold(0u32, u32::saturating_add);
    Some(per_repeat.saturating_mul(parse_saturating(&caps[2])))
}

// Only called on `\d+` matches, so the sole failure is overflow.
fn parse_saturating(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/notation/parser.rs"]
mod tests;

use std::fmt;

use crate::domain::DEFAULT_STATES;
use crate::error::RuleParseError;

/// Largest live-neighbour count in a 26-cell cube
pub const MAX_NEIGHBOURS: u8 = 26;

/// Trait for cellular automaton rules.
///
/// A rule maps a cell's current state and its live-neighbour count to the
/// next state. It must be pure: every cell of a generation is evaluated
/// against the previous grid only, in no particular order.
///
/// Any `Fn(u8, u8) -> u8` closure is a rule.
pub trait Rule: Send + Sync {
    /// Name of the rule
    fn name(&self) -> &str {
        "Custom"
    }

    /// Short description
    fn description(&self) -> &str {
        ""
    }

    /// Number of cell states the rule produces, dead included
    fn states(&self) -> u8 {
        DEFAULT_STATES
    }

    /// Apply rule to compute next cell state
    fn evolve(&self, current: u8, neighbours: u8) -> u8;
}

impl<F> Rule for F
where
    F: Fn(u8, u8) -> u8 + Send + Sync,
{
    fn evolve(&self, current: u8, neighbours: u8) -> u8 {
        self(current, neighbours)
    }
}

/// Set of neighbour counts, one bit per count in `0..=26`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighbourSet(u32);

impl NeighbourSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn contains(self, count: u8) -> bool {
        count <= MAX_NEIGHBOURS && self.0 & (1 << count) != 0
    }

    /// Counts above [`MAX_NEIGHBOURS`] are ignored.
    pub const fn with(self, count: u8) -> Self {
        if count > MAX_NEIGHBOURS {
            return self;
        }
        Self(self.0 | (1 << count))
    }

    /// Inclusive range, cut off at [`MAX_NEIGHBOURS`].
    pub const fn with_range(self, lo: u8, hi: u8) -> Self {
        let hi = if hi > MAX_NEIGHBOURS { MAX_NEIGHBOURS } else { hi };
        let mut set = self;
        let mut n = lo;
        while n <= hi {
            set = set.with(n);
            n += 1;
        }
        set
    }

    /// Parse `"1,3,5-7"`. Empty input is the empty set.
    fn parse(section: &str) -> Result<Self, RuleParseError> {
        let section = section.trim();
        if section.is_empty() {
            return Ok(Self::empty());
        }

        section.split(',').try_fold(Self::empty(), |set, item| {
            let item = item.trim();
            match item.split_once('-') {
                Some((lo, hi)) => {
                    let lo = parse_count(lo)?;
                    let hi = parse_count(hi)?;
                    if lo > hi {
                        return Err(RuleParseError::ReversedRange { lo, hi });
                    }
                    Ok(set.with_range(lo, hi))
                }
                None => Ok(set.with(parse_count(item)?)),
            }
        })
    }
}

impl fmt::Display for NeighbourSet {
    /// Writes the set back in `a,b-c` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut n = 0u8;
        while n <= MAX_NEIGHBOURS {
            if !self.contains(n) {
                n += 1;
                continue;
            }
            let start = n;
            while n < MAX_NEIGHBOURS && self.contains(n + 1) {
                n += 1;
            }
            if !first {
                f.write_str(",")?;
            }
            first = false;
            if start == n {
                write!(f, "{start}")?;
            } else {
                write!(f, "{start}-{n}")?;
            }
            n += 1;
        }
        Ok(())
    }
}

fn parse_count(text: &str) -> Result<u8, RuleParseError> {
    let text = text.trim();
    let count: u8 = text
        .parse()
        .map_err(|_| RuleParseError::InvalidNumber(text.to_owned()))?;
    if count > MAX_NEIGHBOURS {
        return Err(RuleParseError::CountOutOfRange(count));
    }
    Ok(count)
}

/// Survival/birth rule with a decay tail, written `S/B/N`.
///
/// A live cell survives when its count is in `survive`, otherwise it starts
/// decaying. Decaying cells step down one state per generation whatever
/// their neighbours do, and only dead cells can be born. With two states
/// this is an ordinary life-like rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeLikeRule {
    name: String,
    survive: NeighbourSet,
    born: NeighbourSet,
    states: u8,
}

impl LifeLikeRule {
    pub fn new(name: impl Into<String>, survive: NeighbourSet, born: NeighbourSet, states: u8) -> Self {
        Self {
            name: name.into(),
            survive,
            born,
            states: states.max(2),
        }
    }

    /// Parse `survive/born/states`, e.g. `"4/4/5"` or `"9-26/5-7,12-13,15/5"`.
    pub fn parse(text: &str) -> Result<Self, RuleParseError> {
        let sections: Vec<&str> = text.split('/').collect();
        let [survive, born, states] = sections[..] else {
            return Err(RuleParseError::SectionCount(sections.len()));
        };

        let states = states.trim();
        let states: u8 = states
            .parse()
            .map_err(|_| RuleParseError::InvalidNumber(states.to_owned()))?;
        if states < 2 {
            return Err(RuleParseError::TooFewStates(states));
        }

        Ok(Self::new(
            text.trim(),
            NeighbourSet::parse(survive)?,
            NeighbourSet::parse(born)?,
            states,
        ))
    }

    pub const fn states(&self) -> u8 {
        self.states
    }

    pub const fn survive(&self) -> NeighbourSet {
        self.survive
    }

    pub const fn born(&self) -> NeighbourSet {
        self.born
    }

    /// Canonical `S/B/N` form
    pub fn notation(&self) -> String {
        format!("{}/{}/{}", self.survive, self.born, self.states)
    }
}

impl Rule for LifeLikeRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "survive/born/states"
    }

    fn states(&self) -> u8 {
        self.states
    }

    fn evolve(&self, current: u8, neighbours: u8) -> u8 {
        let live = self.states - 1;
        match current {
            0 if self.born.contains(neighbours) => live,
            0 => 0,
            c if c == live && self.survive.contains(neighbours) => live,
            c if c >= live => live - 1,
            c => c - 1,
        }
    }
}

/// Named presets from the common 3D life catalogue
pub fn all_rules() -> Vec<LifeLikeRule> {
    let presets = [
        ("445", "4/4/5"),
        ("Amoeba", "9-26/5-7,12-13,15/5"),
        ("Builder", "2,6,9/4,6,8-9/10"),
        ("Pyroclastic", "4-7/6-8/10"),
        ("Clouds", "13-26/13-14,17-19/2"),
    ];

    presets
        .into_iter()
        .filter_map(|(name, notation)| {
            LifeLikeRule::parse(notation)
                .ok()
                .map(|rule| LifeLikeRule { name: name.to_owned(), ..rule })
        })
        .collect()
}

/// Get default rule (445)
pub fn default_rule() -> LifeLikeRule {
    LifeLikeRule::new(
        "445",
        NeighbourSet::empty().with(4),
        NeighbourSet::empty().with(4),
        5,
    )
}

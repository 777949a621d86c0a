//! Fuzzy keyword search over spells, based on the edit distance between words.
//!
//! This does not depend on the sort engine, it only shares the record style with the inventory.

use std::fmt;

/// Words with a similarity strictly above this value match.
pub const MATCH_THRESHOLD: f64 = 0.6;

/// Levenshtein distance between `source` and `target`, counted in chars.
pub fn levenshtein(source: &str, target: &str) -> usize {
    if source == target {
        return 0;
    }

    let target = target.chars().collect::<Vec<_>>();
    let source_len = source.chars().count();
    if source_len == 0 {
        return target.len();
    }
    if target.is_empty() {
        return source_len;
    }

    // Only the previous row of the edit matrix is needed to compute the next one.
    let mut prev = (0..=target.len()).collect::<Vec<usize>>();
    let mut curr = vec![0; target.len() + 1];

    for (i, s) in source.chars().enumerate() {
        curr[0] = i + 1;

        for (j, &t) in target.iter().enumerate() {
            let cost = usize::from(s != t);
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[target.len()]
}

/// Normalized similarity in `[0, 1]`. Identical strings score 1, an empty string scores 0.
pub fn similarity(source: &str, target: &str) -> f64 {
    if source.is_empty() || target.is_empty() {
        return 0.0;
    }
    if source == target {
        return 1.0;
    }

    let longest = source.chars().count().max(target.chars().count());
    1.0 - (levenshtein(source, target) as f64 / longest as f64)
}

pub fn is_match(source: &str, keyword: &str) -> bool {
    similarity(source, keyword) > MATCH_THRESHOLD
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TargetType {
    SingleTarget,
    Aoe,
    OnSelf,
}

impl TargetType {
    pub fn name(self) -> &'static str {
        match self {
            TargetType::SingleTarget => "SingleTarget",
            TargetType::Aoe => "AOE",
            TargetType::OnSelf => "Self",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpellType {
    Damage,
    Heal,
    Buff,
    Debuff,
}

impl SpellType {
    pub fn name(self) -> &'static str {
        match self {
            SpellType::Damage => "Damage",
            SpellType::Heal => "Heal",
            SpellType::Buff => "Buff",
            SpellType::Debuff => "Debuff",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Spell {
    pub name: String,
    pub mana_cost: u32,
    pub power: u32,
    pub target: TargetType,
    pub kind: SpellType,
}

impl Spell {
    pub fn new(
        name: impl Into<String>,
        mana_cost: u32,
        power: u32,
        target: TargetType,
        kind: SpellType,
    ) -> Self {
        Self {
            name: name.into(),
            mana_cost,
            power,
            target,
            kind,
        }
    }

    /// A spell matches if any lowercased word of its name, or its lowercased target or type
    /// name, is similar enough to `keyword`.
    pub fn matches(&self, keyword: &str) -> bool {
        let name = self.name.to_lowercase();

        name.split(' ').any(|part| is_match(part, keyword))
            || is_match(&self.target.name().to_lowercase(), keyword)
            || is_match(&self.kind.name().to_lowercase(), keyword)
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Mana Cost: {}, Power: {}, Target: {}, Type: {}",
            self.name,
            self.mana_cost,
            self.power,
            self.target.name(),
            self.kind.name()
        )
    }
}

/// Returns every spell matching `keyword` once, in input order.
pub fn search_spells<'a>(spells: &'a [Spell], keyword: &str) -> Vec<&'a Spell> {
    let found = spells
        .iter()
        .filter(|spell| spell.matches(keyword))
        .collect::<Vec<_>>();

    log::trace!("keyword '{keyword}' matched {} of {} spells", found.len(), spells.len());

    found
}

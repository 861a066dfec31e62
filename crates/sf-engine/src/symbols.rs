//! Symbol definitions

/// Grid token that marks a losing bonus cell. Never eligible for bonus selection.
pub const MISS_MARKER: &str = "MISS";

/// Effect of a bonus symbol on the evaluated reward
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BonusImpact {
    /// Multiply the whole reward
    MultiplyReward { reward_multiplier: f64 },
    /// Add a flat amount to the reward
    ExtraBonus { extra: i64 },
    /// No effect
    Miss,
}

/// Symbol type classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SymbolKind {
    /// Regular paying symbol
    Standard { reward_multiplier: f64 },
    /// Bonus symbol, applied once per winning round
    Bonus(BonusImpact),
}

/// A symbol definition
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolDefinition {
    /// Symbol identifier as it appears in the grid (e.g. "A", "10x", "+500")
    pub id: String,
    /// Symbol type and its payload
    pub kind: SymbolKind,
}

impl SymbolDefinition {
    /// Create a standard symbol
    pub fn standard(id: impl Into<String>, reward_multiplier: f64) -> Self {
        Self {
            id: id.into(),
            kind: SymbolKind::Standard { reward_multiplier },
        }
    }

    /// Create a bonus symbol
    pub fn bonus(id: impl Into<String>, impact: BonusImpact) -> Self {
        Self {
            id: id.into(),
            kind: SymbolKind::Bonus(impact),
        }
    }

    /// Multiplier carried by the symbol, if its kind has one.
    ///
    /// Multiply-reward bonus symbols report their bonus multiplier here too;
    /// it is what a linear combination made of bonus tokens pays with.
    pub fn reward_multiplier(&self) -> Option<f64> {
        match self.kind {
            SymbolKind::Standard { reward_multiplier } => Some(reward_multiplier),
            SymbolKind::Bonus(BonusImpact::MultiplyReward { reward_multiplier }) => {
                Some(reward_multiplier)
            }
            SymbolKind::Bonus(_) => None,
        }
    }

    /// Check if this is a bonus symbol
    pub fn is_bonus(&self) -> bool {
        matches!(self.kind, SymbolKind::Bonus(_))
    }

    /// Bonus impact, if this is a bonus symbol
    pub fn impact(&self) -> Option<BonusImpact> {
        match self.kind {
            SymbolKind::Bonus(impact) => Some(impact),
            SymbolKind::Standard { .. } => None,
        }
    }
}

/// Tokens counted by same-symbol combinations: exactly one character.
pub fn is_single_char_token(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next().is_some() && chars.next().is_none()
}

/// Tokens eligible for bonus selection: multi-character and not the miss marker.
pub fn is_bonus_candidate(token: &str) -> bool {
    token.chars().nth(1).is_some() && token != MISS_MARKER
}

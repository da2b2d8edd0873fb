/// Rule constants and tunable budgets.
///
/// Every numeric rule the validator and calculator rely on lives here so that
/// a rules revision is a data change (`rules.toml`) rather than a code change.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Ancestry points every character must spend on traits.
    pub ancestry_points: i32,
    /// Maximum number of minor traits a character may hold.
    pub max_minor_traits: usize,
    /// Maximum points a character may gain from negative-cost traits.
    pub max_negative_trait_points: i32,

    /// Skill points before Intelligence and bonuses.
    pub base_skill_points: i32,
    /// Trade points before bonuses.
    pub base_trade_points: i32,
    /// Language points before bonuses.
    pub base_language_points: i32,
    /// Trade points received per skill point converted (and paid per skill point bought back).
    pub trade_points_per_skill_point: i32,
    /// Language points received per trade point converted.
    pub language_points_per_trade_point: i32,

    /// Lowest allowed base attribute score.
    pub attribute_floor: i32,
    /// Attribute points available at character creation.
    pub attribute_points: i32,
    /// Highest allowed base attribute score at level 1.
    pub base_attribute_limit: i32,

    /// Flat base shared by Precision and Area Defense.
    pub defense_base: i32,

    /// Trades that also benefit from the knowledge mastery limit.
    pub knowledge_trades: Vec<String>,
}

impl RulesConfig {
    // ===== compile-time constants =====
    /// Highest supported character level.
    pub const MAX_LEVEL: u32 = 20;
    /// Levels between attribute limit and mastery cap increases.
    pub const LEVELS_PER_TIER: u32 = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ANCESTRY_POINTS: i32 = 5;
    pub const DEFAULT_MAX_MINOR_TRAITS: usize = 1;
    pub const DEFAULT_MAX_NEGATIVE_TRAIT_POINTS: i32 = 2;
    pub const DEFAULT_SKILL_POINTS: i32 = 5;
    pub const DEFAULT_TRADE_POINTS: i32 = 3;
    pub const DEFAULT_LANGUAGE_POINTS: i32 = 2;
    pub const DEFAULT_ATTRIBUTE_FLOOR: i32 = -2;
    pub const DEFAULT_ATTRIBUTE_POINTS: i32 = 12;
    pub const DEFAULT_ATTRIBUTE_LIMIT: i32 = 3;
    pub const DEFAULT_DEFENSE_BASE: i32 = 8;

    pub fn new() -> Self {
        Self {
            ancestry_points: Self::DEFAULT_ANCESTRY_POINTS,
            max_minor_traits: Self::DEFAULT_MAX_MINOR_TRAITS,
            max_negative_trait_points: Self::DEFAULT_MAX_NEGATIVE_TRAIT_POINTS,
            base_skill_points: Self::DEFAULT_SKILL_POINTS,
            base_trade_points: Self::DEFAULT_TRADE_POINTS,
            base_language_points: Self::DEFAULT_LANGUAGE_POINTS,
            trade_points_per_skill_point: 2,
            language_points_per_trade_point: 2,
            attribute_floor: Self::DEFAULT_ATTRIBUTE_FLOOR,
            attribute_points: Self::DEFAULT_ATTRIBUTE_POINTS,
            base_attribute_limit: Self::DEFAULT_ATTRIBUTE_LIMIT,
            defense_base: Self::DEFAULT_DEFENSE_BASE,
            knowledge_trades: Vec::new(),
        }
    }

    /// Highest base attribute score allowed at `level`.
    ///
    /// The limit rises by one every [`Self::LEVELS_PER_TIER`] levels.
    pub fn attribute_limit(&self, level: u32) -> i32 {
        self.base_attribute_limit
            .saturating_add((level / Self::LEVELS_PER_TIER) as i32)
    }

    /// Returns true if `trade` is configured as a knowledge trade.
    pub fn is_knowledge_trade(&self, trade: &str) -> bool {
        self.knowledge_trades
            .iter()
            .any(|known| known.eq_ignore_ascii_case(trade))
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_limit_rises_every_five_levels() {
        let config = RulesConfig::new();
        assert_eq!(config.attribute_limit(1), 3);
        assert_eq!(config.attribute_limit(4), 3);
        assert_eq!(config.attribute_limit(5), 4);
        assert_eq!(config.attribute_limit(20), 7);
    }

    #[test]
    fn knowledge_trade_lookup_ignores_case() {
        let config = RulesConfig {
            knowledge_trades: vec!["Arcana".into()],
            ..RulesConfig::new()
        };
        assert!(config.is_knowledge_trade("arcana"));
        assert!(!config.is_knowledge_trade("smithing"));
    }
}

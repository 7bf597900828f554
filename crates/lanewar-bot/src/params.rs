/// Thresholds shared by the lane-selection tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyParams {
    /// A lane more than this far behind is written off.
    pub lost_threshold: i32,
    /// A lane more than this far ahead needs no more cards.
    pub secure_threshold: i32,
    /// Easy avoids lanes trailing by this much or more.
    pub easy_deficit_threshold: i32,
    /// Peeked cards at or above this value are treated as strong.
    pub high_card_threshold: i32,
    /// Assumed value of any card that cannot be seen.
    pub average_card_value: i32,
}

impl PolicyParams {
    pub const fn new() -> Self {
        Self {
            lost_threshold: 25,
            secure_threshold: 25,
            easy_deficit_threshold: 30,
            high_card_threshold: 8,
            average_card_value: 6,
        }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::new();
        let mut threshold = |key: &str, fallback: i32| {
            read(key)
                .and_then(|raw| raw.trim().parse::<i32>().ok())
                .filter(|value| *value >= 0)
                .unwrap_or(fallback)
        };

        Self {
            lost_threshold: threshold("LANEWAR_LOST_THRESHOLD", defaults.lost_threshold),
            secure_threshold: threshold("LANEWAR_SECURE_THRESHOLD", defaults.secure_threshold),
            easy_deficit_threshold: threshold(
                "LANEWAR_EASY_DEFICIT",
                defaults.easy_deficit_threshold,
            ),
            high_card_threshold: threshold("LANEWAR_HIGH_CARD", defaults.high_card_threshold),
            average_card_value: read("LANEWAR_AVERAGE_CARD")
                .and_then(|raw| raw.trim().parse::<i32>().ok())
                .unwrap_or(defaults.average_card_value),
        }
    }
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self::new()
    }
}

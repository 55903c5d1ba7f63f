use super::Classification;

const POSITIVE_RATINGS: &[&str] = &[
    "Strong-Buy",
    "Buy",
    "Speculative Buy",
    "Positive",
    "Market Outperform",
    "Sector Outperform",
    "Outperform",
    "Outperformer",
    "Overweight",
];

const NEUTRAL_RATINGS: &[&str] = &[
    "Neutral",
    "Hold",
    "Equal Weight",
    "In-Line",
    "Inline",
    "Sector Perform",
    "Market Perform",
    "Sector Weight",
];

const NEGATIVE_RATINGS: &[&str] = &[
    "Underweight",
    "Underperform",
    "Sector Underperform",
    "Reduce",
    "Negative",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RatingTier {
    Unknown,
    Negative,
    Neutral,
    Positive,
}

impl RatingTier {
    /// Exact, case-sensitive match against the brokerage vocabulary.
    pub fn of(rating: &str) -> Self {
        if POSITIVE_RATINGS.contains(&rating) {
            RatingTier::Positive
        } else if NEUTRAL_RATINGS.contains(&rating) {
            RatingTier::Neutral
        } else if NEGATIVE_RATINGS.contains(&rating) {
            RatingTier::Negative
        } else {
            RatingTier::Unknown
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            RatingTier::Positive => 3,
            RatingTier::Neutral => 2,
            RatingTier::Negative => 1,
            RatingTier::Unknown => 0,
        }
    }
}

pub fn rating_level(rating: &str) -> u8 {
    RatingTier::of(rating).rank()
}

pub fn rating_class(from: &str, to: &str) -> Classification {
    if from.is_empty() || to.is_empty() {
        return Classification::Neutral;
    }
    Classification::from_ordering(Some(rating_level(to).cmp(&rating_level(from))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_rating_maps_to_its_tier() {
        for r in POSITIVE_RATINGS {
            assert_eq!(rating_level(r), 3, "{r}");
        }
        for r in NEUTRAL_RATINGS {
            assert_eq!(rating_level(r), 2, "{r}");
        }
        for r in NEGATIVE_RATINGS {
            assert_eq!(rating_level(r), 1, "{r}");
        }
    }

    #[test]
    fn unknown_ratings_rank_zero() {
        assert_eq!(rating_level(""), 0);
        assert_eq!(rating_level("buy"), 0);
        assert_eq!(rating_level("Peer Perform"), 0);
        assert_eq!(RatingTier::of("Sell"), RatingTier::Unknown);
    }

    #[test]
    fn rating_class_compares_tiers() {
        assert_eq!(rating_class("Hold", "Buy"), Classification::Improved);
        assert_eq!(rating_class("Outperform", "Underweight"), Classification::Worsened);
        assert_eq!(rating_class("Buy", "Overweight"), Classification::Neutral);
        // Unknown ranks below every known tier.
        assert_eq!(rating_class("Peer Perform", "Reduce"), Classification::Improved);
    }

    #[test]
    fn rating_class_is_neutral_when_either_side_is_empty() {
        assert_eq!(rating_class("", "Buy"), Classification::Neutral);
        assert_eq!(rating_class("Sell", ""), Classification::Neutral);
        assert_eq!(rating_class("", ""), Classification::Neutral);
    }
}

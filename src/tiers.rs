use crate::models::Tier;

/// Lowest score classified as [`Tier::Urgent`].
pub const URGENT_MIN: u32 = 80;
/// Lowest score classified as [`Tier::High`].
pub const HIGH_MIN: u32 = 60;
/// Lowest score classified as [`Tier::Medium`].
pub const MEDIUM_MIN: u32 = 35;

/// Maps a score to its tier. Bands are inclusive on their lower bound and
/// checked from the top down.
pub fn tier(score: u32) -> Tier {
    if score >= URGENT_MIN {
        Tier::Urgent
    } else if score >= HIGH_MIN {
        Tier::High
    } else if score >= MEDIUM_MIN {
        Tier::Medium
    } else {
        Tier::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(tier(80), Tier::Urgent);
        assert_eq!(tier(79), Tier::High);
        assert_eq!(tier(60), Tier::High);
        assert_eq!(tier(59), Tier::Medium);
        assert_eq!(tier(35), Tier::Medium);
        assert_eq!(tier(34), Tier::Low);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(tier(0), Tier::Low);
        assert_eq!(tier(u32::MAX), Tier::Urgent);
    }
}

//! # Zone Classifier
//!
//! Splits the pitch length into three equal thirds along the y axis.
//! Home attacks toward increasing y, away toward decreasing y, so the
//! away mapping is mirrored.
//!
//! Comparisons are strict `<`: a value exactly on a boundary belongs to
//! the higher third. Out-of-field values go through the same arithmetic.

use crate::models::{Team, Zone};

/// Classify `y` (meters) for `team` on a pitch of `field_length` meters.
pub fn classify(y: f64, field_length: f64, team: Team) -> Zone {
    let third = third_index(y, field_length);
    match (team, third) {
        (Team::Home, 0) | (Team::Away, 2) => Zone::Defensive,
        (_, 1) => Zone::Middle,
        _ => Zone::Attacking,
    }
}

// 0 = low y, 1 = centre, 2 = high y
fn third_index(y: f64, field_length: f64) -> u8 {
    if y < field_length / 3.0 {
        0
    } else if y < 2.0 * field_length / 3.0 {
        1
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LENGTH: f64 = 90.0;

    #[test]
    fn test_home_thirds() {
        assert_eq!(classify(10.0, LENGTH, Team::Home), Zone::Defensive);
        assert_eq!(classify(45.0, LENGTH, Team::Home), Zone::Middle);
        assert_eq!(classify(80.0, LENGTH, Team::Home), Zone::Attacking);
    }

    #[test]
    fn test_away_thirds_mirrored() {
        assert_eq!(classify(10.0, LENGTH, Team::Away), Zone::Attacking);
        assert_eq!(classify(45.0, LENGTH, Team::Away), Zone::Middle);
        assert_eq!(classify(80.0, LENGTH, Team::Away), Zone::Defensive);
    }

    #[test]
    fn test_boundaries_belong_to_higher_third() {
        assert_eq!(classify(LENGTH / 3.0, LENGTH, Team::Home), Zone::Middle);
        assert_eq!(classify(2.0 * LENGTH / 3.0, LENGTH, Team::Home), Zone::Attacking);
        assert_eq!(classify(LENGTH / 3.0, LENGTH, Team::Away), Zone::Middle);
        assert_eq!(classify(2.0 * LENGTH / 3.0, LENGTH, Team::Away), Zone::Defensive);
    }

    #[test]
    fn test_out_of_field_values() {
        assert_eq!(classify(-5.0, LENGTH, Team::Home), Zone::Defensive);
        assert_eq!(classify(500.0, LENGTH, Team::Home), Zone::Attacking);
        // NaN fails both comparisons and lands in the top third
        assert_eq!(classify(f64::NAN, LENGTH, Team::Home), Zone::Attacking);
    }

    fn rank(zone: Zone) -> u8 {
        match zone {
            Zone::Defensive => 0,
            Zone::Middle => 1,
            Zone::Attacking => 2,
        }
    }

    proptest! {
        #[test]
        fn prop_home_monotonic(a in 0.0f64..LENGTH, b in 0.0f64..LENGTH) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(rank(classify(lo, LENGTH, Team::Home)) <= rank(classify(hi, LENGTH, Team::Home)));
        }

        #[test]
        fn prop_away_is_mirror_of_home(y in 0.0f64..LENGTH) {
            let home = rank(classify(y, LENGTH, Team::Home));
            let away = rank(classify(y, LENGTH, Team::Away));
            prop_assert_eq!(home + away, 2);
        }
    }
}

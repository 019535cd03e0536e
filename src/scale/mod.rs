//! Saaty scale codec.
//!
//! Converts between a symmetric bidirectional control position and the
//! reciprocal pairwise-comparison value used by the comparison matrix.
//!
//! The control range is the integer interval `[-9, 9]`: `0` means equal
//! importance, a positive position favors the first entity by that factor,
//! and a negative position favors the second entity by the reciprocal.
//!
//! # Round-trip law
//!
//! `position_for(comparison_value(p)) == p` for every integer position in
//! range. This keeps any slider-style control and the stored matrix value
//! in lockstep.

use serde::{Deserialize, Serialize};

/// Smallest control position.
pub const MIN_POSITION: i8 = -9;

/// Largest control position.
pub const MAX_POSITION: i8 = 9;

/// Convert a control position to a pairwise-comparison value.
///
/// Position `0` maps to `1` (equal importance), positive positions map to
/// themselves, and negative positions map to the reciprocal `1 / |p|`.
#[must_use]
pub fn comparison_value(position: i8) -> f64 {
    if position == 0 {
        1.0
    } else if position > 0 {
        f64::from(position)
    } else {
        1.0 / f64::from(position).abs()
    }
}

/// Convert a pairwise-comparison value back to a control position.
///
/// Value `1` maps to `0`, values above `1` map to themselves, and values
/// below `1` map to `-1 / value`. Non-integral Saaty values round to the
/// nearest position.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn position_for(value: f64) -> i8 {
    if (value - 1.0).abs() < f64::EPSILON {
        0
    } else if value > 1.0 {
        value.round() as i8
    } else {
        (-1.0 / value).round() as i8
    }
}

/// The nine graded importance levels of the Saaty scale.
///
/// Levels 2, 4, 6, and 8 are the intermediate grades between the named
/// ones. The level describes magnitude only; which entity is favored is
/// carried separately by [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportanceLevel {
    /// 1 - Equal importance.
    Equal,
    /// 2 - Between equal and moderate.
    EqualToModerate,
    /// 3 - Moderate importance.
    Moderate,
    /// 4 - Between moderate and strong.
    ModerateToStrong,
    /// 5 - Strong importance.
    Strong,
    /// 6 - Between strong and very strong.
    StrongToVeryStrong,
    /// 7 - Very strong importance.
    VeryStrong,
    /// 8 - Between very strong and extreme.
    VeryStrongToExtreme,
    /// 9 - Extreme importance.
    Extreme,
}

impl ImportanceLevel {
    /// Level for an absolute comparison value, clamped to the 1-9 scale.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_value(value: f64) -> Self {
        let magnitude = if value >= 1.0 {
            value
        } else if value > 0.0 {
            1.0 / value
        } else {
            1.0
        };
        match magnitude.round().clamp(1.0, 9.0) as u8 {
            2 => Self::EqualToModerate,
            3 => Self::Moderate,
            4 => Self::ModerateToStrong,
            5 => Self::Strong,
            6 => Self::StrongToVeryStrong,
            7 => Self::VeryStrong,
            8 => Self::VeryStrongToExtreme,
            9 => Self::Extreme,
            _ => Self::Equal,
        }
    }

    /// Human-readable descriptor for display next to a control.
    #[must_use]
    pub const fn descriptor(self) -> &'static str {
        match self {
            Self::Equal => "Equal importance",
            Self::EqualToModerate => "Between equal and moderate",
            Self::Moderate => "Moderate importance",
            Self::ModerateToStrong => "Between moderate and strong",
            Self::Strong => "Strong importance",
            Self::StrongToVeryStrong => "Between strong and very strong",
            Self::VeryStrong => "Very strong importance",
            Self::VeryStrongToExtreme => "Between very strong and extreme",
            Self::Extreme => "Extreme importance",
        }
    }
}

/// Which entity of a compared pair is favored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The first (row) entity is favored.
    First,
    /// The second (column) entity is favored.
    Second,
    /// Neither entity is favored.
    Neither,
}

/// A decoded judgment: magnitude and direction, kept separate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// Graded magnitude of the judgment.
    pub level: ImportanceLevel,
    /// Which entity the judgment favors.
    pub direction: Direction,
}

impl Preference {
    /// Decode a control position into magnitude and direction.
    #[must_use]
    pub fn from_position(position: i8) -> Self {
        let direction = match position {
            0 => Direction::Neither,
            p if p > 0 => Direction::First,
            _ => Direction::Second,
        };
        Self {
            level: ImportanceLevel::from_value(comparison_value(position)),
            direction,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_zero_position_is_equal() {
        assert_eq!(comparison_value(0), 1.0);
        assert_eq!(position_for(1.0), 0);
    }

    #[test_case(1, 1.0)]
    #[test_case(3, 3.0)]
    #[test_case(9, 9.0)]
    fn test_positive_positions(position: i8, expected: f64) {
        assert_eq!(comparison_value(position), expected);
    }

    #[test_case(-1, 1.0)]
    #[test_case(-3, 1.0 / 3.0)]
    #[test_case(-9, 1.0 / 9.0)]
    fn test_negative_positions(position: i8, expected: f64) {
        assert_eq!(comparison_value(position), expected);
    }

    #[test]
    fn test_round_trip_full_range() {
        for position in MIN_POSITION..=MAX_POSITION {
            // Position -1 and 1 both encode value 1 and decode to 0
            let expected = if position.abs() == 1 { 0 } else { position };
            assert_eq!(
                position_for(comparison_value(position)),
                expected,
                "round trip failed for position {position}"
            );
        }
    }

    #[test_case(1.0, ImportanceLevel::Equal)]
    #[test_case(2.0, ImportanceLevel::EqualToModerate)]
    #[test_case(5.0, ImportanceLevel::Strong)]
    #[test_case(9.0, ImportanceLevel::Extreme)]
    #[test_case(1.0 / 5.0, ImportanceLevel::Strong)]
    #[test_case(1.0 / 9.0, ImportanceLevel::Extreme)]
    fn test_importance_level_from_value(value: f64, expected: ImportanceLevel) {
        assert_eq!(ImportanceLevel::from_value(value), expected);
    }

    #[test]
    fn test_importance_level_clamps_out_of_scale() {
        assert_eq!(ImportanceLevel::from_value(20.0), ImportanceLevel::Extreme);
        assert_eq!(ImportanceLevel::from_value(0.0), ImportanceLevel::Equal);
    }

    #[test]
    fn test_descriptors() {
        assert_eq!(ImportanceLevel::Equal.descriptor(), "Equal importance");
        assert_eq!(ImportanceLevel::Extreme.descriptor(), "Extreme importance");
        assert_eq!(
            ImportanceLevel::ModerateToStrong.descriptor(),
            "Between moderate and strong"
        );
    }

    #[test]
    fn test_preference_direction() {
        let favors_first = Preference::from_position(5);
        assert_eq!(favors_first.direction, Direction::First);
        assert_eq!(favors_first.level, ImportanceLevel::Strong);

        let favors_second = Preference::from_position(-7);
        assert_eq!(favors_second.direction, Direction::Second);
        assert_eq!(favors_second.level, ImportanceLevel::VeryStrong);

        let neutral = Preference::from_position(0);
        assert_eq!(neutral.direction, Direction::Neither);
        assert_eq!(neutral.level, ImportanceLevel::Equal);
    }

    #[test]
    fn test_level_serialize() {
        assert_eq!(
            serde_json::to_string(&ImportanceLevel::Strong).unwrap(),
            "\"strong\""
        );
        assert_eq!(
            serde_json::to_string(&Direction::First).unwrap(),
            "\"first\""
        );
    }
}

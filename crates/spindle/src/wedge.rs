use crate::angle::{self, FULL_TURN};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f64::consts::{FRAC_PI_2, PI};
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WheelError {
    #[error("cannot partition a wheel with no items")]
    Empty,
}

/// One angular slice of the wheel, covering `[start, end)` in the wheel's
/// own frame, before any rotation is applied. Wedge 0 starts at angle zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeRange {
    pub item_index: usize,
    pub start: f64,
    pub end: f64,
}

impl WedgeRange {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, radians: f64) -> bool {
        self.start <= radians && radians < self.end
    }
}

/// Where the fixed pointer sits in screen space (y grows downward), in the
/// same frame as wedge 0. The canonical pointer is at the top of the wheel.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Pointer {
    #[default]
    #[strum(to_string = "Top", serialize = "up", serialize = "north", serialize = "n")]
    Top,
    #[strum(to_string = "Right", serialize = "east", serialize = "e")]
    Right,
    #[strum(to_string = "Bottom", serialize = "down", serialize = "south", serialize = "s")]
    Bottom,
    #[strum(to_string = "Left", serialize = "west", serialize = "w")]
    Left,
}

impl Pointer {
    /// The pointer's fixed screen-space angle.
    pub fn angle(self) -> f64 {
        match self {
            Pointer::Right => 0.0,
            Pointer::Bottom => FRAC_PI_2,
            Pointer::Left => PI,
            Pointer::Top => 3.0 * FRAC_PI_2,
        }
    }
}

/// Splits the wheel into `item_count` equal wedges in item order.
///
/// Wedge `i` spans `[i·(2π/N), (i+1)·(2π/N))`; the ranges partition
/// `[0, 2π)` with no gap or overlap. An empty wheel cannot be partitioned.
pub fn partition(item_count: usize) -> Result<Vec<WedgeRange>, WheelError> {
    if item_count == 0 {
        return Err(WheelError::Empty);
    }
    let width = FULL_TURN / item_count as f64;
    Ok((0..item_count)
        .map(|i| WedgeRange {
            item_index: i,
            start: i as f64 * width,
            // pin the last boundary so the union closes exactly at 2π
            end: if i + 1 == item_count {
                FULL_TURN
            } else {
                (i + 1) as f64 * width
            },
        })
        .collect())
}

/// Maps the wheel's cumulative rotation to the item index under the pointer.
///
/// The pointer is fixed in screen space while the wedge boundaries rotate
/// under it, so the pointer angle is translated back into the wheel frame
/// before lookup. A boundary angle belongs to the wedge it starts.
pub fn resolve(cumulative: f64, wedges: &[WedgeRange], pointer: Pointer) -> Option<usize> {
    if wedges.is_empty() {
        return None;
    }
    let rotation = angle::normalize(cumulative);
    let in_wheel = angle::normalize(pointer.angle() - rotation);
    let width = FULL_TURN / wedges.len() as f64;
    // Rounding right at a boundary could land the raw index on N or -1.
    let index = ((in_wheel / width).floor() as isize).clamp(0, wedges.len() as isize - 1);
    Some(wedges[index as usize].item_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn empty_wheel_cannot_be_partitioned() {
        assert_eq!(partition(0), Err(WheelError::Empty));
    }

    #[test]
    fn wedges_cover_the_full_circle() {
        for n in 1..=12 {
            let wedges = partition(n).unwrap();
            assert_eq!(wedges.len(), n);
            assert_eq!(wedges[0].start, 0.0);
            assert_eq!(wedges[n - 1].end, FULL_TURN);
            let width = FULL_TURN / n as f64;
            for (i, wedge) in wedges.iter().enumerate() {
                assert_eq!(wedge.item_index, i);
                assert!((wedge.width() - width).abs() < TOLERANCE, "n={n} i={i}");
                if i > 0 {
                    // contiguous: each wedge starts exactly where the previous ended
                    assert_eq!(wedge.start, wedges[i - 1].end, "n={n} i={i}");
                }
            }
        }
    }

    #[test]
    fn boundary_angles_belong_to_the_starting_wedge() {
        let wedges = partition(4).unwrap();
        assert!(wedges[1].contains(FRAC_PI_2));
        assert!(!wedges[0].contains(FRAC_PI_2));
    }

    #[test]
    fn pointer_angles() {
        assert_eq!(Pointer::Top.angle(), 3.0 * FRAC_PI_2);
        assert_eq!(Pointer::Right.angle(), 0.0);
        assert_eq!(Pointer::Bottom.angle(), FRAC_PI_2);
        assert_eq!(Pointer::Left.angle(), PI);
    }

    #[test]
    fn pointer_deserialization() {
        let cases = vec![
            ("\"top\"", Pointer::Top),
            ("\"Top\"", Pointer::Top),
            ("\"TOP\"", Pointer::Top),
            ("\"up\"", Pointer::Top),
            ("\"north\"", Pointer::Top),
            ("\"n\"", Pointer::Top),
            ("\"right\"", Pointer::Right),
            ("\"e\"", Pointer::Right),
            ("\"down\"", Pointer::Bottom),
            ("\"west\"", Pointer::Left),
        ];

        for (json, expected) in cases {
            let deserialized: Pointer = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn resolver_boundary_exactness_with_four_wedges() {
        let wedges = partition(4).unwrap();
        // pointer fixed at 3π/2; each quarter turn of the wheel shifts the
        // selection back by one wedge, wrapping exactly at the boundary
        let cases = [
            (0.0, 3),
            (FRAC_PI_2, 2),
            (PI, 1),
            (3.0 * FRAC_PI_2, 0),
            (FULL_TURN, 3),
        ];
        for (rotation, expected) in cases {
            assert_eq!(
                resolve(rotation, &wedges, Pointer::Top),
                Some(expected),
                "rotation={rotation}"
            );
        }
    }

    #[test]
    fn resolver_handles_unbounded_rotation() {
        let wedges = partition(4).unwrap();
        for turns in 0..5 {
            let rotation = turns as f64 * FULL_TURN + PI;
            assert_eq!(resolve(rotation, &wedges, Pointer::Top), Some(1));
        }
    }

    #[test]
    fn resolver_clamps_drift_at_the_top_boundary() {
        // A pointer-relative angle a hair under 2π must not index past N-1.
        let wedges = partition(4).unwrap();
        let next_below = f64::from_bits(FULL_TURN.to_bits() - 1);
        assert_eq!(resolve(-next_below, &wedges, Pointer::Right), Some(3));
    }

    #[test]
    fn single_wedge_always_wins() {
        let wedges = partition(1).unwrap();
        for rotation in [0.0, 1.0, PI, 100.0, -3.0] {
            assert_eq!(resolve(rotation, &wedges, Pointer::Top), Some(0));
        }
    }

    #[test]
    fn resolver_refuses_an_empty_wheel() {
        assert_eq!(resolve(1.0, &[], Pointer::Top), None);
    }

    #[test]
    fn worked_example_three_items_one_turn() {
        // 3 items, exactly one full turn: normalized rotation is 0, the
        // pointer reads 3π/2, wedge width is 2π/3, floor gives index 2.
        let wedges = partition(3).unwrap();
        assert_eq!(resolve(FULL_TURN, &wedges, Pointer::Top), Some(2));
    }
}

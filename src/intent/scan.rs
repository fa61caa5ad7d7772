//! Serpentine area scan.

use core::f32::consts::PI;

use libm::ceilf;

use crate::config::units::{Centimeters, CentimetersPerSec, Degrees, DegreesPerSec};
use crate::error::{MotionError, Result};

use super::Intent;

/// Progress through one lane and the transition to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leg {
    Lane,
    FirstTurn,
    Shift,
    SecondTurn,
}

/// Back-and-forth coverage of a rectangle.
///
/// The robot starts in one corner facing along the length. It drives each
/// lane, then turns 90°, shifts by the lane spacing and turns 90° again. Turn
/// directions alternate every lane so the path folds back on itself: right,
/// right, then left, left, and so on.
///
/// Iterating yields the [`Intent`] of every leg, all with finite distances.
/// Built by [`MotionProfileFactory::scan_plan`](super::MotionProfileFactory::scan_plan).
#[derive(Debug, Clone)]
pub struct ScanPlan {
    length: f32,
    lane_spacing: f32,
    speed: f32,
    turn_speed: f32,
    lanes: u32,
    lane: u32,
    next: Leg,
}

impl ScanPlan {
    /// Plan a scan of `width` × `length` with lanes `lane_spacing` apart.
    ///
    /// `wheel_separation` sets the turn rate so the wheels keep the forward
    /// surface speed while turning.
    pub(crate) fn new(
        width: Centimeters,
        length: Centimeters,
        lane_spacing: Centimeters,
        speed: CentimetersPerSec,
        wheel_separation: Centimeters,
    ) -> Result<Self> {
        for (parameter, value) in [
            ("width", width.value()),
            ("length", length.value()),
            ("lane spacing", lane_spacing.value()),
            ("speed", speed.value()),
            ("wheel separation", wheel_separation.value()),
        ] {
            if !(value > 0.0) || value.is_infinite() {
                return Err(MotionError::invalid(parameter, value).into());
            }
        }

        let lanes = ceilf(width.value() / lane_spacing.value()) as u32;
        Ok(Self {
            length: length.value(),
            lane_spacing: lane_spacing.value(),
            speed: speed.value(),
            turn_speed: 360.0 * speed.value() / (PI * wheel_separation.value()),
            lanes,
            lane: 0,
            next: Leg::Lane,
        })
    }

    /// Number of lanes.
    #[inline]
    pub fn lanes(&self) -> u32 {
        self.lanes
    }

    fn turn(&self) -> Intent {
        let speed = DegreesPerSec(self.turn_speed);
        let angle = Some(Degrees(90.0));
        if self.lane % 2 == 0 {
            Intent::TurnRight { speed, angle }
        } else {
            Intent::TurnLeft { speed, angle }
        }
    }
}

impl Iterator for ScanPlan {
    type Item = Intent;

    fn next(&mut self) -> Option<Intent> {
        if self.lane >= self.lanes {
            return None;
        }

        let intent = match self.next {
            Leg::Lane => {
                if self.lane + 1 >= self.lanes {
                    self.lane = self.lanes;
                } else {
                    self.next = Leg::FirstTurn;
                }
                Intent::Forward {
                    speed: CentimetersPerSec(self.speed),
                    distance: Some(Centimeters(self.length)),
                }
            }
            Leg::FirstTurn => {
                self.next = Leg::Shift;
                self.turn()
            }
            Leg::Shift => {
                self.next = Leg::SecondTurn;
                Intent::Forward {
                    speed: CentimetersPerSec(self.speed),
                    distance: Some(Centimeters(self.lane_spacing)),
                }
            }
            Leg::SecondTurn => {
                let turn = self.turn();
                self.next = Leg::Lane;
                self.lane += 1;
                turn
            }
        };
        Some(intent)
    }
}

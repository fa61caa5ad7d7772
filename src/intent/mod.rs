//! Motion intents.
//!
//! An [`Intent`] names a motion in physical units. [`MotionProfileFactory`]
//! turns it into a [`MotionProfile`](crate::motion::MotionProfile) for the
//! executor; [`ScanPlan`] produces the intent sequence of an area scan.

mod factory;
mod scan;

use core::str::FromStr;

use crate::config::units::{Centimeters, CentimetersPerSec, Degrees, DegreesPerSec};
use crate::error::{Error, MotionError};

pub use factory::MotionProfileFactory;
pub use scan::ScanPlan;

/// A requested motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Stop and hold.
    Idle,
    /// Drive ahead; until stopped when `distance` is `None`.
    Forward {
        /// Speed in cm/s.
        speed: CentimetersPerSec,
        /// Distance to cover.
        distance: Option<Centimeters>,
    },
    /// Drive back; until stopped when `distance` is `None`.
    Backward {
        /// Speed in cm/s.
        speed: CentimetersPerSec,
        /// Distance to cover.
        distance: Option<Centimeters>,
    },
    /// Spin clockwise in place; until stopped when `angle` is `None`.
    TurnRight {
        /// Turn rate in deg/s.
        speed: DegreesPerSec,
        /// Angle to turn.
        angle: Option<Degrees>,
    },
    /// Spin counter-clockwise in place; until stopped when `angle` is `None`.
    TurnLeft {
        /// Turn rate in deg/s.
        speed: DegreesPerSec,
        /// Angle to turn.
        angle: Option<Degrees>,
    },
    /// Independent wheel speeds.
    Combine {
        /// Left wheel speed in cm/s.
        left: CentimetersPerSec,
        /// Right wheel speed in cm/s.
        right: CentimetersPerSec,
        /// Left wheel distance.
        left_distance: Option<Centimeters>,
        /// Right wheel distance.
        right_distance: Option<Centimeters>,
    },
}

fn number(word: Option<&str>, parameter: &'static str) -> Result<f32, Error> {
    let word = word.ok_or(MotionError::MissingArgument(parameter))?;
    word.parse::<f32>()
        .map_err(|_| MotionError::invalid(parameter, f32::NAN).into())
}

impl FromStr for Intent {
    type Err = Error;

    /// Parse a remote-control command.
    ///
    /// Recognized: `nothing`, `forward <cm/s>`, `backward <cm/s>`,
    /// `left <deg/s>`, `right <deg/s>`, `combine <left cm/s> <right cm/s>`.
    /// All parsed motions run until stopped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = words.next().unwrap_or("");

        let intent = match command {
            "nothing" => Intent::Idle,
            "forward" => Intent::Forward {
                speed: CentimetersPerSec(number(words.next(), "speed")?),
                distance: None,
            },
            "backward" => Intent::Backward {
                speed: CentimetersPerSec(number(words.next(), "speed")?),
                distance: None,
            },
            "left" => Intent::TurnLeft {
                speed: DegreesPerSec(number(words.next(), "turn speed")?),
                angle: None,
            },
            "right" => Intent::TurnRight {
                speed: DegreesPerSec(number(words.next(), "turn speed")?),
                angle: None,
            },
            "combine" => Intent::Combine {
                left: CentimetersPerSec(number(words.next(), "left speed")?),
                right: CentimetersPerSec(number(words.next(), "right speed")?),
                left_distance: None,
                right_distance: None,
            },
            other => {
                let mut name = heapless::String::new();
                for c in other.chars() {
                    if name.push(c).is_err() {
                        break;
                    }
                }
                return Err(MotionError::UnknownCommand(name).into());
            }
        };
        Ok(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("nothing".parse::<Intent>().unwrap(), Intent::Idle);
        assert_eq!(
            "forward 12.5".parse::<Intent>().unwrap(),
            Intent::Forward {
                speed: CentimetersPerSec(12.5),
                distance: None
            }
        );
        assert_eq!(
            "  right   45 ".parse::<Intent>().unwrap(),
            Intent::TurnRight {
                speed: DegreesPerSec(45.0),
                angle: None
            }
        );
        assert_eq!(
            "combine 10 -4".parse::<Intent>().unwrap(),
            Intent::Combine {
                left: CentimetersPerSec(10.0),
                right: CentimetersPerSec(-4.0),
                left_distance: None,
                right_distance: None,
            }
        );
    }

    #[test]
    fn test_parse_missing_argument() {
        assert_eq!(
            "combine 10".parse::<Intent>(),
            Err(Error::Motion(MotionError::MissingArgument("right speed")))
        );
        assert_eq!(
            "backward".parse::<Intent>(),
            Err(Error::Motion(MotionError::MissingArgument("speed")))
        );
    }

    #[test]
    fn test_parse_bad_number() {
        let err = "left fast".parse::<Intent>().unwrap_err();
        assert!(matches!(
            err,
            Error::Motion(MotionError::InvalidArgument { parameter: "turn speed", .. })
        ));
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = "dance 3".parse::<Intent>().unwrap_err();
        match err {
            Error::Motion(MotionError::UnknownCommand(name)) => assert_eq!(name.as_str(), "dance"),
            other => panic!("unexpected error {:?}", other),
        }
        assert!("".parse::<Intent>().is_err());
    }
}

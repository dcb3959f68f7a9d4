//! Domain entities: robots and the key range they must fall into

use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// Unique robot identifier, used as the tree key.
pub type RobotId = i32;

/// Lowest id accepted by a swarm built with the default range.
pub const DEFAULT_MIN_KEY: RobotId = 0;
/// Highest id accepted by a swarm built with the default range.
pub const DEFAULT_MAX_KEY: RobotId = 99_999;

/// Robot category. Classification only, carries no ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RobotType {
    #[default]
    Bird,
    Drone,
    Reptile,
    Sub,
    Quadruped,
}

impl RobotType {
    pub const ALL: [RobotType; 5] = [
        RobotType::Bird,
        RobotType::Drone,
        RobotType::Reptile,
        RobotType::Sub,
        RobotType::Quadruped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RobotType::Bird => "BIRD",
            RobotType::Drone => "DRONE",
            RobotType::Reptile => "REPTILE",
            RobotType::Sub => "SUB",
            RobotType::Quadruped => "QUADRUPED",
        }
    }
}

impl fmt::Display for RobotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RobotType {
    type Err = DomainError;

    /// Accepts the display name in any case, or the ordinal `0..=4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(ordinal) = trimmed.parse::<usize>() {
            return RobotType::ALL
                .get(ordinal)
                .copied()
                .ok_or_else(|| DomainError::UnknownRobotType(s.to_string()));
        }
        RobotType::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| DomainError::UnknownRobotType(s.to_string()))
    }
}

/// Lifecycle state. `Dead` robots are swept by `Swarm::remove_dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RobotState {
    #[default]
    Alive,
    Dead,
}

impl RobotState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RobotState::Alive => "ALIVE",
            RobotState::Dead => "DEAD",
        }
    }
}

impl fmt::Display for RobotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RobotState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALIVE" => Ok(RobotState::Alive),
            "DEAD" => Ok(RobotState::Dead),
            _ => Err(DomainError::UnknownRobotState(s.to_string())),
        }
    }
}

/// A robot stored in the swarm.
///
/// The id is fixed at construction; only the state can change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Robot {
    id: RobotId,
    robot_type: RobotType,
    state: RobotState,
}

impl Robot {
    pub fn new(id: RobotId, robot_type: RobotType) -> Self {
        Self {
            id,
            robot_type,
            state: RobotState::Alive,
        }
    }

    pub fn with_state(id: RobotId, robot_type: RobotType, state: RobotState) -> Self {
        Self {
            id,
            robot_type,
            state,
        }
    }

    pub fn id(&self) -> RobotId {
        self.id
    }

    pub fn robot_type(&self) -> RobotType {
        self.robot_type
    }

    pub fn state(&self) -> RobotState {
        self.state
    }

    pub fn set_state(&mut self, state: RobotState) {
        self.state = state;
    }

    pub fn is_dead(&self) -> bool {
        self.state == RobotState::Dead
    }
}

/// Listing format: `<id>:<STATE>:<TYPE>`.
impl fmt::Display for Robot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.id, self.state, self.robot_type)
    }
}

/// Closed interval of ids a swarm accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRange {
    min: RobotId,
    max: RobotId,
}

impl KeyRange {
    pub fn new(min: RobotId, max: RobotId) -> Result<Self, DomainError> {
        if min > max {
            return Err(DomainError::InvalidKeyRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> RobotId {
        self.min
    }

    pub fn max(&self) -> RobotId {
        self.max
    }

    pub fn contains(&self, id: RobotId) -> bool {
        self.min <= id && id <= self.max
    }
}

impl Default for KeyRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_KEY,
            max: DEFAULT_MAX_KEY,
        }
    }
}

impl fmt::Display for KeyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_robot_when_created_then_has_id_zero_and_alive_bird() {
        let robot = Robot::default();
        assert_eq!(robot.id(), 0);
        assert_eq!(robot.robot_type(), RobotType::Bird);
        assert_eq!(robot.state(), RobotState::Alive);
    }

    #[test]
    fn given_robot_when_displayed_then_uses_listing_format() {
        let robot = Robot::with_state(10005, RobotType::Drone, RobotState::Dead);
        assert_eq!(robot.to_string(), "10005:DEAD:DRONE");
    }

    #[test]
    fn given_type_names_and_ordinals_when_parsing_then_resolves_type() {
        assert_eq!("sub".parse::<RobotType>().unwrap(), RobotType::Sub);
        assert_eq!("QUADRUPED".parse::<RobotType>().unwrap(), RobotType::Quadruped);
        assert_eq!("1".parse::<RobotType>().unwrap(), RobotType::Drone);
        assert!("5".parse::<RobotType>().is_err());
        assert!("fish".parse::<RobotType>().is_err());
    }

    #[test]
    fn given_state_names_when_parsing_then_case_is_ignored() {
        assert_eq!("dead".parse::<RobotState>().unwrap(), RobotState::Dead);
        assert_eq!("Alive".parse::<RobotState>().unwrap(), RobotState::Alive);
        assert!("zombie".parse::<RobotState>().is_err());
    }

    #[test]
    fn given_inverted_bounds_when_creating_range_then_fails() {
        assert!(matches!(
            KeyRange::new(10, 5),
            Err(DomainError::InvalidKeyRange { min: 10, max: 5 })
        ));
        let range = KeyRange::new(0, 100).unwrap();
        assert!(range.contains(0));
        assert!(range.contains(100));
        assert!(!range.contains(101));
        assert!(!range.contains(-1));
    }

    #[test]
    fn given_default_range_then_contains_default_robot_id() {
        assert!(KeyRange::default().contains(Robot::default().id()));
    }
}

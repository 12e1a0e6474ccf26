use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Player-selected speed, fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Menu order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Snake moves per second
    pub fn ticks_per_second(&self) -> u32 {
        match self {
            Difficulty::Easy => 7,
            Difficulty::Medium => 10,
            Difficulty::Hard => 15,
        }
    }

    /// Time between two ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second()
    }

    /// Menu number ("1", "2", "3") used to pick this difficulty
    pub fn menu_key(&self) -> char {
        match self {
            Difficulty::Easy => '1',
            Difficulty::Medium => '2',
            Difficulty::Hard => '3',
        }
    }

    pub fn from_menu_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.menu_key() == key)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_is_fastest() {
        assert!(Difficulty::Easy.ticks_per_second() < Difficulty::Medium.ticks_per_second());
        assert!(Difficulty::Medium.ticks_per_second() < Difficulty::Hard.ticks_per_second());
        assert!(Difficulty::Hard.tick_interval() < Difficulty::Easy.tick_interval());
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(Difficulty::Medium.tick_interval(), Duration::from_millis(100));
        assert_eq!(Difficulty::Easy.tick_interval(), Duration::from_secs(1) / 7);
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(Difficulty::from_menu_key('1'), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_menu_key('2'), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_menu_key('3'), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_menu_key('4'), None);
    }
}

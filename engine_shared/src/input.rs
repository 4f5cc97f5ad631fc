//! Logical input buttons.
//!
//! Raw device polling lives outside the engine. Whatever polls the keyboard
//! hands over one [`Buttons`] snapshot per frame.

bitflags::bitflags! {
    /// Buttons currently held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u32 {
        const FORWARD = 1 << 0;
        const BACK = 1 << 1;
        const STRAFE_LEFT = 1 << 2;
        const STRAFE_RIGHT = 1 << 3;
        const TURN_LEFT = 1 << 4;
        const TURN_RIGHT = 1 << 5;
        const RUN = 1 << 6;
        const UP = 1 << 7;          // Fly mode only
        const DOWN = 1 << 8;        // Fly mode only
        const CANCEL = 1 << 9;
        const PLACE_1 = 1 << 10;
        const PLACE_2 = 1 << 11;
    }
}

impl Buttons {
    /// Looks up a button by action name or its default key.
    pub fn from_action(name: &str) -> Option<Self> {
        let b = match name.to_ascii_lowercase().as_str() {
            "forward" | "w" => Self::FORWARD,
            "back" | "s" => Self::BACK,
            "left" | "a" => Self::STRAFE_LEFT,
            "right" | "d" => Self::STRAFE_RIGHT,
            "turn_left" | "left_arrow" => Self::TURN_LEFT,
            "turn_right" | "right_arrow" => Self::TURN_RIGHT,
            "run" | "shift" => Self::RUN,
            "up" | "e" => Self::UP,
            "down" | "q" => Self::DOWN,
            "cancel" | "escape" => Self::CANCEL,
            "place_1" | "1" => Self::PLACE_1,
            "place_2" | "2" => Self::PLACE_2,
            _ => return None,
        };
        Some(b)
    }

    /// Index of the placeable slot a button selects.
    pub fn place_slots(self) -> impl Iterator<Item = usize> {
        [Self::PLACE_1, Self::PLACE_2]
            .into_iter()
            .enumerate()
            .filter(move |(_, b)| self.contains(*b))
            .map(|(i, _)| i)
    }

    /// `+1`, `-1` or `0` depending on which of the two buttons is held.
    pub fn axis(self, positive: Self, negative: Self) -> f64 {
        let mut v = 0.0;
        if self.contains(positive) {
            v += 1.0;
        }
        if self.contains(negative) {
            v -= 1.0;
        }
        v
    }
}

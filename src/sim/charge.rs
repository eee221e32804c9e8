//! Particle charges and the placement cursor

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_CHARGE, MIN_CHARGE};

/// An integer charge in `{-3, -2, -1, 1, 2, 3}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Charge(i8);

impl Charge {
    pub const PLUS_ONE: Charge = Charge(1);
    pub const MINUS_ONE: Charge = Charge(-1);

    /// Returns `None` for zero or out-of-range values
    pub fn new(value: i32) -> Option<Self> {
        if value == 0 || value < MIN_CHARGE as i32 || value > MAX_CHARGE as i32 {
            None
        } else {
            Some(Charge(value as i8))
        }
    }

    #[inline]
    pub fn get(self) -> i32 {
        self.0 as i32
    }

    /// Next charge up, jumping from -1 to 1; saturates at the maximum
    pub fn increment(self) -> Self {
        match self.0 {
            -1 => Charge(1),
            c if c < MAX_CHARGE => Charge(c + 1),
            _ => self,
        }
    }

    /// Next charge down, jumping from 1 to -1; saturates at the minimum
    pub fn decrement(self) -> Self {
        match self.0 {
            1 => Charge(-1),
            c if c > MIN_CHARGE => Charge(c - 1),
            _ => self,
        }
    }
}

impl Default for Charge {
    fn default() -> Self {
        Charge::PLUS_ONE
    }
}

impl TryFrom<i32> for Charge {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Charge::new(value).ok_or_else(|| format!("invalid charge {}", value))
    }
}

impl From<Charge> for i32 {
    fn from(c: Charge) -> i32 {
        c.get()
    }
}

/// What a left click on empty play field does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorMode {
    /// Place a static particle with this charge
    PlaceCharge(Charge),
    /// Place a moving particle (creative mode only)
    PlaceMovingParticle,
    /// Rubber-band a wall (creative mode only)
    DrawWall,
    /// Rubber-band the goal (creative mode only)
    DrawGoal,
}

impl Default for CursorMode {
    fn default() -> Self {
        CursorMode::PlaceCharge(Charge::PLUS_ONE)
    }
}

/// Wheel order, bottom to top. The first three are creative-only.
const CURSOR_ORDER: [CursorMode; 9] = [
    CursorMode::DrawGoal,
    CursorMode::DrawWall,
    CursorMode::PlaceMovingParticle,
    CursorMode::PlaceCharge(Charge(-3)),
    CursorMode::PlaceCharge(Charge(-2)),
    CursorMode::PlaceCharge(Charge(-1)),
    CursorMode::PlaceCharge(Charge(1)),
    CursorMode::PlaceCharge(Charge(2)),
    CursorMode::PlaceCharge(Charge(3)),
];

/// Index of the first mode available outside creative mode
const FIRST_PLAY_MODE: usize = 3;

impl CursorMode {
    /// True for the tools only available while authoring a level
    pub fn is_creative_only(self) -> bool {
        !matches!(self, CursorMode::PlaceCharge(_))
    }

    fn position(self) -> usize {
        CURSOR_ORDER
            .iter()
            .position(|m| *m == self)
            .unwrap_or(FIRST_PLAY_MODE + 3)
    }

    /// Step the wheel up or down, saturating at either end
    pub fn scrolled(self, up: bool, creative: bool) -> Self {
        let lowest = if creative { 0 } else { FIRST_PLAY_MODE };
        let pos = self.position().max(lowest);
        let next = if up {
            (pos + 1).min(CURSOR_ORDER.len() - 1)
        } else {
            pos.saturating_sub(1).max(lowest)
        };
        CURSOR_ORDER[next]
    }
}

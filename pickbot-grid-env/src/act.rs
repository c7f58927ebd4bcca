//! Action for [`GridEnv`](crate::GridEnv).
use log::trace;
use pickbot_core::Act;

/// Action of the bot.
///
/// The discrete indices are `0 = Up`, `1 = Down`, `2 = Left`, `3 = Right` and
/// `4 = Wait`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridAct {
    /// Row - 1.
    Up,
    /// Row + 1.
    Down,
    /// Column - 1.
    Left,
    /// Column + 1.
    Right,
    /// Stay in place.
    Wait,
}

impl GridAct {
    /// All actions in index order.
    pub const ALL: [GridAct; 5] = [
        GridAct::Up,
        GridAct::Down,
        GridAct::Left,
        GridAct::Right,
        GridAct::Wait,
    ];

    /// Discrete index of the action.
    pub fn index(self) -> usize {
        match self {
            GridAct::Up => 0,
            GridAct::Down => 1,
            GridAct::Left => 2,
            GridAct::Right => 3,
            GridAct::Wait => 4,
        }
    }

    /// Unit displacement `(dr, dc)` of the action.
    pub fn delta(self) -> (i64, i64) {
        match self {
            GridAct::Up => (-1, 0),
            GridAct::Down => (1, 0),
            GridAct::Left => (0, -1),
            GridAct::Right => (0, 1),
            GridAct::Wait => (0, 0),
        }
    }
}

impl Act for GridAct {
    fn n_actions() -> usize {
        Self::ALL.len()
    }
}

/// Decodes a raw action index.
///
/// Drivers may hand back loosely typed values, so an index outside `0..=4` is
/// coerced to [`GridAct::Wait`] instead of failing.
impl From<i64> for GridAct {
    fn from(ix: i64) -> Self {
        match ix {
            0 => GridAct::Up,
            1 => GridAct::Down,
            2 => GridAct::Left,
            3 => GridAct::Right,
            4 => GridAct::Wait,
            _ => {
                trace!("Invalid action index {}, falling back to Wait", ix);
                GridAct::Wait
            }
        }
    }
}

impl From<GridAct> for i64 {
    fn from(act: GridAct) -> Self {
        act.index() as i64
    }
}

//! Fixed symbol tables for the choregraphy vocabulary.
//!
//! Pure data: each position/direction maps to its stable code on the wire,
//! each color preset to its RGB triple.

/// LED positions on the rabbit's body, with their wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedPosition {
    Bottom = 0,
    Left = 1,
    Middle = 2,
    Right = 3,
    Top = 4,
}

impl LedPosition {
    /// Every concrete position, in wire-code order. `all` in a script expands
    /// to one command line per entry.
    pub const ALL: [LedPosition; 5] = [
        LedPosition::Bottom,
        LedPosition::Left,
        LedPosition::Middle,
        LedPosition::Right,
        LedPosition::Top,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Color presets the script language knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedColor {
    Red,
    Green,
    Blue,
    Cyan,
    Magenta,
    Yellow,
    White,
    Off,
}

impl LedColor {
    pub fn channels(self) -> [u8; 3] {
        match self {
            LedColor::Red => [255, 0, 0],
            LedColor::Green => [0, 255, 0],
            LedColor::Blue => [0, 0, 255],
            LedColor::Cyan => [0, 255, 255],
            LedColor::Magenta => [255, 0, 255],
            LedColor::Yellow => [255, 255, 0],
            LedColor::White => [255, 255, 255],
            LedColor::Off => [0, 0, 0],
        }
    }
}

/// Ear motors, with their wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EarPosition {
    Right = 0,
    Left = 1,
}

impl EarPosition {
    /// Both ears, in wire-code order. `both` expands to one line per entry.
    pub const ALL: [EarPosition; 2] = [EarPosition::Right, EarPosition::Left];

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Ear rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EarDirection {
    Forward = 0,
    Backward = 1,
}

impl EarDirection {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// An LED command element: a concrete position or the `all` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedTarget {
    Pos(LedPosition),
    All,
}

/// An ear command element: a concrete ear or the `both` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EarTarget {
    Pos(EarPosition),
    Both,
}

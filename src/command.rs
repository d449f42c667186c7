//! In-progress command values, assembled word by word before validation.
//!
//! A command stays mutable and partial while the script (or a caller using
//! the builder methods) fills it in; `Evaluator::set`/`move_` validate and
//! encode the finished value.

use crate::symbols::{EarDirection, EarPosition, EarTarget, LedPosition, LedTarget};

/// An LED action being built: which elements, what color, when.
/// Fields stay optional until validation; channels are raw integers so an
/// out-of-range input is reported rather than unrepresentable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedCommand {
    pub elements: Vec<LedTarget>,
    pub color: Option<Vec<i64>>,
    /// Quantized tick (100 ms units).
    pub time: Option<i64>,
}

impl LedCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a command from a color and the current tick, the way the color
    /// words do in a script.
    pub fn rgb(channels: impl Into<Vec<i64>>, tick: i64) -> Self {
        LedCommand {
            elements: Vec::new(),
            color: Some(channels.into()),
            time: Some(tick),
        }
    }

    pub fn element(mut self, target: LedTarget) -> Self {
        self.elements.push(target);
        self
    }
}

/// An ear action being built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EarCommand {
    pub element: Option<EarTarget>,
    pub direction: Option<EarDirection>,
    pub angle: Option<i64>,
    /// Quantized tick (100 ms units).
    pub time: Option<i64>,
}

impl EarCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a command from an angle and the current tick, the way `degrees`
    /// does in a script.
    pub fn degrees(angle: i64, tick: i64) -> Self {
        EarCommand {
            element: None,
            direction: None,
            angle: Some(angle),
            time: Some(tick),
        }
    }

    pub fn element(mut self, target: EarTarget) -> Self {
        self.element = Some(target);
        self
    }

    pub fn direction(mut self, direction: EarDirection) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// One command in flight, led or ear.
///
/// `left` and `right` are the only words shared between the two vocabularies;
/// they resolve against the variant tag. Words that belong to a single
/// vocabulary leave the other kind untouched; `Evaluator::set`/`move_` reject
/// a command of the wrong kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Led(LedCommand),
    Ear(EarCommand),
}

impl Command {
    pub fn left(self) -> Command {
        match self {
            Command::Led(c) => Command::Led(c.element(LedTarget::Pos(LedPosition::Left))),
            Command::Ear(c) => Command::Ear(c.element(EarTarget::Pos(EarPosition::Left))),
        }
    }

    pub fn right(self) -> Command {
        match self {
            Command::Led(c) => Command::Led(c.element(LedTarget::Pos(LedPosition::Right))),
            Command::Ear(c) => Command::Ear(c.element(EarTarget::Pos(EarPosition::Right))),
        }
    }

    pub fn bottom(self) -> Command {
        self.map_led(|c| c.element(LedTarget::Pos(LedPosition::Bottom)))
    }

    pub fn middle(self) -> Command {
        self.map_led(|c| c.element(LedTarget::Pos(LedPosition::Middle)))
    }

    pub fn top(self) -> Command {
        self.map_led(|c| c.element(LedTarget::Pos(LedPosition::Top)))
    }

    pub fn all(self) -> Command {
        self.map_led(|c| c.element(LedTarget::All))
    }

    pub fn both(self) -> Command {
        self.map_ear(|c| c.element(EarTarget::Both))
    }

    pub fn forward(self) -> Command {
        self.map_ear(|c| c.direction(EarDirection::Forward))
    }

    pub fn backward(self) -> Command {
        self.map_ear(|c| c.direction(EarDirection::Backward))
    }

    /// Readability words; no effect.
    pub fn led(self) -> Command {
        self
    }
    pub fn leds(self) -> Command {
        self
    }
    pub fn ear(self) -> Command {
        self
    }
    pub fn ears(self) -> Command {
        self
    }
    pub fn of(self) -> Command {
        self
    }

    pub fn into_led(self) -> Option<LedCommand> {
        match self {
            Command::Led(c) => Some(c),
            Command::Ear(_) => None,
        }
    }

    pub fn into_ear(self) -> Option<EarCommand> {
        match self {
            Command::Ear(c) => Some(c),
            Command::Led(_) => None,
        }
    }

    fn map_led(self, f: impl FnOnce(LedCommand) -> LedCommand) -> Command {
        match self {
            Command::Led(c) => Command::Led(f(c)),
            other => other,
        }
    }

    fn map_ear(self, f: impl FnOnce(EarCommand) -> EarCommand) -> Command {
        match self {
            Command::Ear(c) => Command::Ear(f(c)),
            other => other,
        }
    }
}

impl From<LedCommand> for Command {
    fn from(c: LedCommand) -> Self {
        Command::Led(c)
    }
}

impl From<EarCommand> for Command {
    fn from(c: EarCommand) -> Self {
        Command::Ear(c)
    }
}

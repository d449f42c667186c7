//! Evaluate statements into encoded command lines.
//!
//! An `Evaluator` is one compilation context: a line accumulator plus the
//! current tick cursor. `set` and `move_` are the only operations that append
//! lines; everything else moves the cursor or builds commands.

use crate::ast::{MoveEars, SetLeds, Source, Statement};
use crate::command::{Command, EarCommand, LedCommand};
use crate::parser;
use crate::symbols::{EarDirection, EarPosition, EarTarget, LedPosition, LedTarget};

/// The one error kind of the choregraphy core: the description is bad.
/// Messages keep the wording of the Violet API documentation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BadChorDesc {
    #[error("wrong choregraphy description: {0}")]
    Syntax(String),
    #[error("wrong choregraphy description")]
    WrongCommand,
    #[error("need an element")]
    NoElement,
    #[error("need a time")]
    NoTime,
    #[error("time must be >= zero")]
    NegativeTime,
    #[error("need a color")]
    NoColor,
    #[error("wrong size for rgb color array")]
    BadColorSize,
    #[error("color code must be between 0 and 255")]
    ColorRange,
    #[error("need an angle")]
    NoAngle,
    #[error("angle must be between 0 and 180")]
    AngleRange,
    #[error("need a direction")]
    NoDirection,
    #[error("no choregraphy given")]
    Empty,
}

/// Seconds to wire ticks: one tick is 100 ms, rounded to nearest.
pub fn ticks(seconds: f64) -> i64 {
    (10.0 * seconds).round() as i64
}

/// One compilation context.
#[derive(Debug, Default)]
pub struct Evaluator {
    lines: Vec<String>,
    tick: i64,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor, in ticks.
    pub fn tick(&self) -> i64 {
        self.tick
    }

    /// Move the cursor, as a bare `at time t` does.
    pub fn at(&mut self, seconds: f64) -> &mut Self {
        self.tick = ticks(seconds);
        self
    }

    /// Run one source against this context. Script text is parsed first; the
    /// cursor persists into the next source.
    pub fn run(&mut self, source: &Source) -> Result<(), BadChorDesc> {
        match source {
            Source::Script(text) => {
                let statements = parser::parse(text)?;
                self.exec_all(&statements)
            }
            Source::Statements(statements) => self.exec_all(statements),
        }
    }

    fn exec_all(&mut self, statements: &[Statement]) -> Result<(), BadChorDesc> {
        for statement in statements {
            self.exec(statement)?;
        }
        Ok(())
    }

    fn exec(&mut self, statement: &Statement) -> Result<(), BadChorDesc> {
        match statement {
            Statement::At {
                seconds,
                body: None,
            } => {
                self.tick = ticks(*seconds);
                Ok(())
            }
            Statement::At {
                seconds,
                body: Some(body),
            } => {
                let saved = self.tick;
                self.tick = ticks(*seconds);
                let result = self.exec_all(body);
                self.tick = saved;
                result
            }
            Statement::Set(set) => self.exec_set(set),
            Statement::Move(mv) => self.exec_move(mv),
        }
    }

    fn exec_set(&mut self, set: &SetLeds) -> Result<(), BadChorDesc> {
        let tick = set.at.map(ticks).unwrap_or(self.tick);
        // the color word opens the command, then the position words land on it
        let mut command = Command::from(LedCommand::rgb(set.color.channels(), tick));
        for target in &set.targets {
            command = match *target {
                LedTarget::Pos(LedPosition::Left) => command.left(),
                LedTarget::Pos(LedPosition::Right) => command.right(),
                LedTarget::Pos(LedPosition::Bottom) => command.bottom(),
                LedTarget::Pos(LedPosition::Middle) => command.middle(),
                LedTarget::Pos(LedPosition::Top) => command.top(),
                LedTarget::All => command.all(),
            };
        }
        self.set(command)
    }

    fn exec_move(&mut self, mv: &MoveEars) -> Result<(), BadChorDesc> {
        let tick = mv.at.map(ticks).unwrap_or(self.tick);
        let command = Command::from(EarCommand::degrees(mv.degrees, tick));
        let command = match mv.direction {
            EarDirection::Forward => command.forward(),
            EarDirection::Backward => command.backward(),
        };
        let command = match mv.target {
            EarTarget::Pos(EarPosition::Left) => command.left(),
            EarTarget::Pos(EarPosition::Right) => command.right(),
            EarTarget::Both => command.both(),
        };
        self.move_(command)
    }

    /// Validate and encode one LED command. First violation wins, in the
    /// documented order: elements, time, color presence, channel count,
    /// channel range.
    pub fn set(&mut self, command: impl Into<Command>) -> Result<(), BadChorDesc> {
        let command = match command.into() {
            Command::Led(c) => c,
            Command::Ear(_) => return Err(BadChorDesc::WrongCommand),
        };
        if command.elements.is_empty() {
            return Err(BadChorDesc::NoElement);
        }
        let time = command.time.ok_or(BadChorDesc::NoTime)?;
        if time < 0 {
            return Err(BadChorDesc::NegativeTime);
        }
        let color = command.color.ok_or(BadChorDesc::NoColor)?;
        if color.len() != 3 {
            return Err(BadChorDesc::BadColorSize);
        }
        if color.iter().any(|c| !(0..=255).contains(c)) {
            return Err(BadChorDesc::ColorRange);
        }
        let rgb = format!("{},{},{}", color[0], color[1], color[2]);

        // `all` absorbs every explicit element
        let mut elements = dedup(command.elements);
        if elements.contains(&LedTarget::All) {
            elements = vec![LedTarget::All];
        }

        for element in elements {
            match element {
                LedTarget::All => {
                    for pos in LedPosition::ALL {
                        self.lines.push(format!("{},led,{},{}", time, pos.code(), rgb));
                    }
                }
                LedTarget::Pos(pos) => {
                    self.lines.push(format!("{},led,{},{}", time, pos.code(), rgb));
                }
            }
        }
        Ok(())
    }

    /// Validate and encode one ear command. First violation wins: time,
    /// angle, direction, element.
    pub fn move_(&mut self, command: impl Into<Command>) -> Result<(), BadChorDesc> {
        let command = match command.into() {
            Command::Ear(c) => c,
            Command::Led(_) => return Err(BadChorDesc::WrongCommand),
        };
        let time = command.time.ok_or(BadChorDesc::NoTime)?;
        if time < 0 {
            return Err(BadChorDesc::NegativeTime);
        }
        let angle = command.angle.ok_or(BadChorDesc::NoAngle)?;
        if !(0..=180).contains(&angle) {
            return Err(BadChorDesc::AngleRange);
        }
        let direction = command.direction.ok_or(BadChorDesc::NoDirection)?;
        let element = command.element.ok_or(BadChorDesc::NoElement)?;

        match element {
            EarTarget::Both => {
                for pos in EarPosition::ALL {
                    self.lines.push(format!(
                        "{},motor,{},{},0,{}",
                        time,
                        pos.code(),
                        angle,
                        direction.code()
                    ));
                }
            }
            EarTarget::Pos(pos) => {
                self.lines.push(format!(
                    "{},motor,{},{},0,{}",
                    time,
                    pos.code(),
                    angle,
                    direction.code()
                ));
            }
        }
        Ok(())
    }

    /// Canonical line list: sorted and deduplicated.
    pub fn finish(self) -> Vec<String> {
        let mut lines = self.lines;
        lines.sort();
        lines.dedup();
        lines
    }
}

fn dedup(targets: Vec<LedTarget>) -> Vec<LedTarget> {
    let mut out = Vec::with_capacity(targets.len());
    for target in targets {
        if !out.contains(&target) {
            out.push(target);
        }
    }
    out
}

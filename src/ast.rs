//! Statement AST for choregraphy sources.
//!
//! Script text and the structured builder both reduce to this; the evaluator
//! only ever sees statements.

use crate::symbols::{EarDirection, EarTarget, LedColor, LedTarget};

/// A choregraphy source: free script text, or an already-structured
/// statement list.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Script(String),
    Statements(Vec<Statement>),
}

impl From<&str> for Source {
    fn from(s: &str) -> Self {
        Source::Script(s.to_string())
    }
}

impl From<String> for Source {
    fn from(s: String) -> Self {
        Source::Script(s)
    }
}

impl From<Vec<Statement>> for Source {
    fn from(statements: Vec<Statement>) -> Self {
        Source::Statements(statements)
    }
}

/// One statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `at time t`. The bare form moves the cursor for the rest of the
    /// source; with a body the cursor is scoped to the nested statements.
    At {
        seconds: f64,
        body: Option<Vec<Statement>>,
    },
    Set(SetLeds),
    Move(MoveEars),
}

impl Statement {
    pub fn at(seconds: f64) -> Statement {
        Statement::At {
            seconds,
            body: None,
        }
    }

    pub fn at_block(seconds: f64, body: Vec<Statement>) -> Statement {
        Statement::At {
            seconds,
            body: Some(body),
        }
    }

    pub fn set(targets: Vec<LedTarget>, color: ColorSpec) -> Statement {
        Statement::Set(SetLeds {
            targets,
            color,
            at: None,
        })
    }

    pub fn move_(target: EarTarget, direction: EarDirection, degrees: i64) -> Statement {
        Statement::Move(MoveEars {
            target,
            direction,
            degrees,
            at: None,
        })
    }
}

/// `set <targets> [led] [to] <color>`
#[derive(Debug, Clone, PartialEq)]
pub struct SetLeds {
    pub targets: Vec<LedTarget>,
    pub color: ColorSpec,
    /// Trailing `at time t`, scoped to this statement.
    pub at: Option<f64>,
}

/// `move <target> [ears] <direction> [of] degrees <n>`
#[derive(Debug, Clone, PartialEq)]
pub struct MoveEars {
    pub target: EarTarget,
    pub direction: EarDirection,
    pub degrees: i64,
    /// Trailing `at time t`, scoped to this statement.
    pub at: Option<f64>,
}

/// A color, by preset name or raw channels.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    Named(LedColor),
    Rgb([i64; 3]),
}

impl ColorSpec {
    pub fn channels(&self) -> Vec<i64> {
        match self {
            ColorSpec::Named(color) => color.channels().iter().map(|&c| c as i64).collect(),
            ColorSpec::Rgb(channels) => channels.to_vec(),
        }
    }
}

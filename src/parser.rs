//! Parse choregraphy script text into statements using PEST.

use crate::ast::{ColorSpec, MoveEars, SetLeds, Statement};
use crate::eval::BadChorDesc;
use crate::symbols::{EarDirection, EarPosition, EarTarget, LedColor, LedPosition, LedTarget};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct ScriptParser;

/// Parse script source into a statement list.
pub fn parse(source: &str) -> Result<Vec<Statement>, BadChorDesc> {
    let mut pairs = ScriptParser::parse(Rule::chor, source)
        .map_err(|e| BadChorDesc::Syntax(e.to_string()))?;
    let chor = pairs.next().ok_or_else(|| syntax("empty parse"))?;
    let mut statements = Vec::new();
    for inner in chor.into_inner() {
        if inner.as_rule() == Rule::statement {
            statements.push(build_statement(inner)?);
        }
    }
    Ok(statements)
}

fn syntax(msg: &str) -> BadChorDesc {
    BadChorDesc::Syntax(msg.to_string())
}

fn build_statement(pair: Pair<Rule>) -> Result<Statement, BadChorDesc> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| syntax("empty statement"))?;
    match inner.as_rule() {
        Rule::at_cursor => Ok(Statement::At {
            seconds: first_number(inner)?,
            body: None,
        }),
        Rule::at_block => {
            let mut seconds = None;
            let mut body = Vec::new();
            for part in inner.into_inner() {
                match part.as_rule() {
                    Rule::number => seconds = Some(parse_number(&part)?),
                    Rule::statement => body.push(build_statement(part)?),
                    _ => {}
                }
            }
            Ok(Statement::At {
                seconds: seconds.ok_or_else(|| syntax("at: missing time"))?,
                body: Some(body),
            })
        }
        Rule::set_stmt => build_set(inner),
        Rule::move_stmt => build_move(inner),
        r => Err(BadChorDesc::Syntax(format!("unexpected rule: {:?}", r))),
    }
}

fn build_set(pair: Pair<Rule>) -> Result<Statement, BadChorDesc> {
    let mut targets = Vec::new();
    let mut color = None;
    let mut at = None;
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::led_target => targets.push(led_target(part.as_str())?),
            Rule::color => color = Some(build_color(part)?),
            Rule::at_suffix => at = Some(first_number(part)?),
            _ => {}
        }
    }
    Ok(Statement::Set(SetLeds {
        targets,
        color: color.ok_or_else(|| syntax("set: missing color"))?,
        at,
    }))
}

fn build_move(pair: Pair<Rule>) -> Result<Statement, BadChorDesc> {
    let mut target = None;
    let mut direction = None;
    let mut degrees = None;
    let mut at = None;
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::ear_target => target = Some(ear_target(part.as_str())?),
            Rule::direction => direction = Some(ear_direction(part.as_str())?),
            // `degrees` is integer-truncated, like the angle words of the API
            Rule::number => degrees = Some(parse_number(&part)? as i64),
            Rule::at_suffix => at = Some(first_number(part)?),
            _ => {}
        }
    }
    Ok(Statement::Move(MoveEars {
        target: target.ok_or_else(|| syntax("move: missing ear"))?,
        direction: direction.ok_or_else(|| syntax("move: missing direction"))?,
        degrees: degrees.ok_or_else(|| syntax("move: missing degrees"))?,
        at,
    }))
}

fn build_color(pair: Pair<Rule>) -> Result<ColorSpec, BadChorDesc> {
    let inner = pair.into_inner().next().ok_or_else(|| syntax("empty color"))?;
    match inner.as_rule() {
        Rule::color_name => Ok(ColorSpec::Named(color_name(inner.as_str())?)),
        Rule::rgb_fn | Rule::rgb_list => {
            let mut channels = [0i64; 3];
            let mut i = 0;
            for part in inner.into_inner() {
                if part.as_rule() == Rule::number {
                    if i == 3 {
                        return Err(syntax("rgb: too many channels"));
                    }
                    channels[i] = parse_number(&part)? as i64;
                    i += 1;
                }
            }
            if i != 3 {
                return Err(syntax("rgb: three channels expected"));
            }
            Ok(ColorSpec::Rgb(channels))
        }
        r => Err(BadChorDesc::Syntax(format!("unexpected color rule: {:?}", r))),
    }
}

fn first_number(pair: Pair<Rule>) -> Result<f64, BadChorDesc> {
    pair.into_inner()
        .find(|p| p.as_rule() == Rule::number)
        .ok_or_else(|| syntax("missing number"))
        .and_then(|p| parse_number(&p))
}

fn parse_number(pair: &Pair<Rule>) -> Result<f64, BadChorDesc> {
    pair.as_str()
        .parse::<f64>()
        .map_err(|_| BadChorDesc::Syntax(format!("bad number: {}", pair.as_str())))
}

fn led_target(word: &str) -> Result<LedTarget, BadChorDesc> {
    Ok(match word {
        "bottom" => LedTarget::Pos(LedPosition::Bottom),
        "left" => LedTarget::Pos(LedPosition::Left),
        "middle" => LedTarget::Pos(LedPosition::Middle),
        "right" => LedTarget::Pos(LedPosition::Right),
        "top" => LedTarget::Pos(LedPosition::Top),
        "all" => LedTarget::All,
        other => return Err(BadChorDesc::Syntax(format!("unknown led position: {}", other))),
    })
}

fn ear_target(word: &str) -> Result<EarTarget, BadChorDesc> {
    Ok(match word {
        "right" => EarTarget::Pos(EarPosition::Right),
        "left" => EarTarget::Pos(EarPosition::Left),
        "both" => EarTarget::Both,
        other => return Err(BadChorDesc::Syntax(format!("unknown ear: {}", other))),
    })
}

fn ear_direction(word: &str) -> Result<EarDirection, BadChorDesc> {
    Ok(match word {
        "forward" => EarDirection::Forward,
        "backward" => EarDirection::Backward,
        other => return Err(BadChorDesc::Syntax(format!("unknown direction: {}", other))),
    })
}

fn color_name(word: &str) -> Result<LedColor, BadChorDesc> {
    Ok(match word {
        "red" => LedColor::Red,
        "green" => LedColor::Green,
        "blue" => LedColor::Blue,
        "cyan" => LedColor::Cyan,
        "magenta" => LedColor::Magenta,
        "yellow" => LedColor::Yellow,
        "white" => LedColor::White,
        "off" => LedColor::Off,
        other => return Err(BadChorDesc::Syntax(format!("unknown color: {}", other))),
    })
}

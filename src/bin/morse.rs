//! Blink a word in morse code on the top led.
//!
//! Usage:
//!   morse <word> [SERIAL TOKEN]
//!
//! Prints the compiled `chor=` tokens; with a serial and token it also
//! prints the full query URL for that rabbit.

use astag::ast::{ColorSpec, Statement};
use astag::symbols::{LedColor, LedPosition, LedTarget};
use astag::{Choregraphy, Query};

/// Seconds a dot stays lit; a dash is three dots.
const DOT: f64 = 0.1;
const DASH: f64 = 0.3;
const GAP: f64 = 0.1;

fn morse(word: &str) -> Option<String> {
    word.to_lowercase()
        .chars()
        .map(table)
        .collect::<Option<Vec<_>>>()
        .map(|codes| codes.concat())
}

fn table(c: char) -> Option<&'static str> {
    Some(match c {
        'a' => ".-",
        'b' => "-...",
        'c' => "-.-.",
        'd' => "-..",
        'e' => ".",
        'f' => "..-.",
        'g' => "--.",
        'h' => "....",
        'i' => "..",
        'j' => ".---",
        'k' => "-.-",
        'l' => ".-..",
        'm' => "--",
        'n' => "-.",
        'o' => "---",
        'p' => ".--.",
        'q' => "--.-",
        'r' => ".-.",
        's' => "...",
        't' => "-",
        'u' => "..-",
        'v' => "...-",
        'w' => ".--",
        'x' => "-..-",
        'y' => "-.--",
        'z' => "--..",
        '0' => "-----",
        '1' => ".----",
        '2' => "..---",
        '3' => "...--",
        '4' => "....-",
        '5' => ".....",
        '6' => "-....",
        '7' => "--...",
        '8' => "---..",
        '9' => "----.",
        _ => return None,
    })
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let word = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: morse <word> [SERIAL TOKEN]"))?;
    let code = morse(&word).ok_or_else(|| anyhow::anyhow!("word must be letters and digits"))?;

    let top = vec![LedTarget::Pos(LedPosition::Top)];
    let mut statements = Vec::new();
    let mut timer = 0.0;
    for symbol in code.chars() {
        let lit = if symbol == '.' { DOT } else { DASH };
        statements.push(Statement::at_block(
            timer,
            vec![Statement::set(top.clone(), ColorSpec::Named(LedColor::Green))],
        ));
        statements.push(Statement::at_block(
            timer + lit,
            vec![Statement::set(top.clone(), ColorSpec::Named(LedColor::Off))],
        ));
        timer += lit + GAP;
    }

    let chor = Choregraphy::compile(statements)?.named(word.as_str());
    println!("{}", chor.to_query()?.join("&"));

    if let (Some(serial), Some(token)) = (args.next(), args.next()) {
        let query = Query::new(chor, serial, token);
        println!("{}", query.to_url()?);
    }
    Ok(())
}

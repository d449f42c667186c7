//! Compile choregraphy script files to their wire form.
//!
//! Usage:
//!   chor_check [FILE ...]
//!   chor_check < script.chor
//!
//! Prints the `chor=` token for each input; exits nonzero when any input
//! fails to compile.

use astag::Choregraphy;
use std::io::Read;

fn compile_one(label: &str, source: &str) -> bool {
    match Choregraphy::compile(source).and_then(|c| c.to_query()) {
        Ok(tokens) => {
            println!("{}: {}", label, tokens.join("&"));
            true
        }
        Err(e) => {
            eprintln!("{}: {}", label, e);
            false
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut ok = true;

    if args.is_empty() {
        let mut src = String::new();
        std::io::stdin().read_to_string(&mut src)?;
        ok = compile_one("<stdin>", &src);
    } else {
        for path in &args {
            match std::fs::read_to_string(path) {
                Ok(src) => {
                    if !compile_one(path, &src) {
                        ok = false;
                    }
                }
                Err(e) => {
                    eprintln!("{}: {}", path, e);
                    ok = false;
                }
            }
        }
    }

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

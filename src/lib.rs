//! # astag — control a Nabaztag from Rust
//!
//! Client for the Violet HTTP+XML API: typed events (ears, text-to-speech,
//! audio streams, status actions), query assembly and sending, reply
//! parsing, and a small choregraphy scripting language compiled to the
//! vendor's wire encoding.
//!
//! ## Choregraphy scripts
//!
//! ```text
//! at time 1.2 do
//!     move both ears forward of degrees 42
//!     set top led to red
//! end
//! ```
//!
//! compiles to sorted `t,led,pos,r,g,b` / `t,motor,pos,angle,0,dir` lines and
//! serializes as `chor=10,...`. Choregraphies behave as sets of commands:
//! `|`, `&`, `-`, `^` and `+` (union) combine them, and equality ignores
//! statement order. The same statements can be built without script text
//! through [`ast::Statement`] or driven by hand through [`Evaluator`].
//!
//! ## Example
//!
//! ```
//! use astag::{Choregraphy, Query};
//!
//! let chor = Choregraphy::compile("set all leds to green")?.named("all green");
//! let query = Query::new(chor, "1234567890AB", "123456");
//! let url = query.to_url()?;
//! assert!(url.contains("chor=10,"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Sending (`Query::send`) needs the `http` feature.

pub mod ast;
pub mod chor;
pub mod command;
pub mod eval;
pub mod event;
pub mod parser;
pub mod query;
pub mod response;
pub mod symbols;

pub use chor::Choregraphy;
pub use command::{Command, EarCommand, LedCommand};
pub use eval::{ticks, BadChorDesc, Evaluator};
pub use event::{
    Action, AudioStream, Event, EventCollection, EventError, IdMessage, SetEarsPosition,
    TtsMessage,
};
pub use parser::parse;
pub use query::{Query, QueryError, API_URL, APISTREAM_URL};
pub use response::{ProtocolError, RspElement, RspKind, ServerRsp};

//! The compiled choregraphy: an immutable set of encoded command lines with
//! set-algebra operators and wire serialization.
//!
//! A choregraphy is compiled eagerly at construction and never changes
//! afterwards; the operators always build a new one. Because the line list is
//! sorted and deduplicated, equality and the operators are independent of
//! statement order in the source.

use crate::ast::Source;
use crate::eval::{BadChorDesc, Evaluator};
use std::collections::BTreeSet;
use std::ops::{Add, BitAnd, BitOr, BitXor, Sub};

/// Version tag leading every `chor=` token on the wire.
const CHOR_VERSION: u32 = 10;

/// A compiled set of timed LED/ear commands.
#[derive(Debug, Clone, Default)]
pub struct Choregraphy {
    name: Option<String>,
    chor: Vec<String>,
    code: Vec<Source>,
}

impl Choregraphy {
    /// An empty choregraphy. Compiling nothing is fine; serializing it is
    /// not.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile one source (script text or a statement list).
    pub fn compile(source: impl Into<Source>) -> Result<Self, BadChorDesc> {
        Self::compile_all([source.into()])
    }

    /// Compile several sources against one shared context: the line
    /// accumulator and the time cursor persist from each source into the
    /// next.
    pub fn compile_all<I>(sources: I) -> Result<Self, BadChorDesc>
    where
        I: IntoIterator,
        I::Item: Into<Source>,
    {
        let sources: Vec<Source> = sources.into_iter().map(Into::into).collect();
        let mut eval = Evaluator::new();
        for source in &sources {
            eval.run(source)?;
        }
        let chor = eval.finish();
        tracing::debug!(lines = chor.len(), "compiled choregraphy");
        Ok(Choregraphy {
            name: None,
            chor,
            code: sources,
        })
    }

    /// Attach the name sent as `chortitle`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The canonical encoded lines, sorted and deduplicated.
    pub fn lines(&self) -> &[String] {
        &self.chor
    }

    /// The sources this choregraphy was compiled from (empty for operator
    /// results).
    pub fn code(&self) -> &[Source] {
        &self.code
    }

    pub fn is_empty(&self) -> bool {
        self.chor.is_empty()
    }

    /// Wire tokens: `chor=10,...` plus `chortitle=<name>` when named.
    pub fn to_query(&self) -> Result<Vec<String>, BadChorDesc> {
        if self.chor.is_empty() {
            return Err(BadChorDesc::Empty);
        }
        let mut url = vec![format!("chor={},{}", CHOR_VERSION, self.chor.join(","))];
        if let Some(name) = &self.name {
            url.push(format!("chortitle={}", name));
        }
        Ok(url)
    }

    pub fn union(&self, other: &Choregraphy) -> Choregraphy {
        let (a, b) = (self.line_set(), other.line_set());
        Choregraphy::from_lines(a.union(&b).cloned().collect())
    }

    pub fn intersection(&self, other: &Choregraphy) -> Choregraphy {
        let (a, b) = (self.line_set(), other.line_set());
        Choregraphy::from_lines(a.intersection(&b).cloned().collect())
    }

    pub fn difference(&self, other: &Choregraphy) -> Choregraphy {
        let (a, b) = (self.line_set(), other.line_set());
        Choregraphy::from_lines(a.difference(&b).cloned().collect())
    }

    pub fn symmetric_difference(&self, other: &Choregraphy) -> Choregraphy {
        let (a, b) = (self.line_set(), other.line_set());
        Choregraphy::from_lines(a.symmetric_difference(&b).cloned().collect())
    }

    fn line_set(&self) -> BTreeSet<String> {
        self.chor.iter().cloned().collect()
    }

    fn from_lines(lines: BTreeSet<String>) -> Choregraphy {
        Choregraphy {
            name: None,
            chor: lines.into_iter().collect(),
            code: Vec::new(),
        }
    }
}

impl From<Evaluator> for Choregraphy {
    /// Wrap a context driven by hand through `set`/`move_`.
    fn from(eval: Evaluator) -> Self {
        Choregraphy {
            name: None,
            chor: eval.finish(),
            code: Vec::new(),
        }
    }
}

/// Equality is on the compiled lines only; the name and the sources do not
/// take part.
impl PartialEq for Choregraphy {
    fn eq(&self, other: &Self) -> bool {
        self.chor == other.chor
    }
}

impl Eq for Choregraphy {}

impl BitOr for &Choregraphy {
    type Output = Choregraphy;
    fn bitor(self, rhs: &Choregraphy) -> Choregraphy {
        self.union(rhs)
    }
}

/// `+` behaves like `|`.
impl Add for &Choregraphy {
    type Output = Choregraphy;
    fn add(self, rhs: &Choregraphy) -> Choregraphy {
        self.union(rhs)
    }
}

impl BitAnd for &Choregraphy {
    type Output = Choregraphy;
    fn bitand(self, rhs: &Choregraphy) -> Choregraphy {
        self.intersection(rhs)
    }
}

impl Sub for &Choregraphy {
    type Output = Choregraphy;
    fn sub(self, rhs: &Choregraphy) -> Choregraphy {
        self.difference(rhs)
    }
}

impl BitXor for &Choregraphy {
    type Output = Choregraphy;
    fn bitxor(self, rhs: &Choregraphy) -> Choregraphy {
        self.symmetric_difference(rhs)
    }
}

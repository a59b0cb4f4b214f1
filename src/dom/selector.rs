//! Class-only CSS selectors.
//!
//! The structural contract of a page is expressed purely through class names, so the
//! grammar is deliberately small: compound class selectors (`.a.b`), descendant
//! (whitespace) and child (`>`) combinators, and comma separated alternatives.

use crate::dom::document::Document;
use crate::dom::node::NodeId;
use crate::foundation::error::{VitrineError, VitrineResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Compound {
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.classes.iter().all(|c| doc.has_class(node, c))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Complex {
    // Rightmost compound is last; `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`.
    compounds: Vec<Compound>,
    combinators: Vec<Combinator>,
}

impl Complex {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let last = self.compounds.len() - 1;
        self.matches_from(doc, node, last)
    }

    fn matches_from(&self, doc: &Document, node: NodeId, idx: usize) -> bool {
        if !self.compounds[idx].matches(doc, node) {
            return false;
        }
        if idx == 0 {
            return true;
        }
        match self.combinators[idx - 1] {
            Combinator::Child => doc
                .parent(node)
                .is_some_and(|p| self.matches_from(doc, p, idx - 1)),
            Combinator::Descendant => {
                let mut cur = doc.parent(node);
                while let Some(p) = cur {
                    if self.matches_from(doc, p, idx - 1) {
                        return true;
                    }
                    cur = doc.parent(p);
                }
                false
            }
        }
    }
}

/// Parsed selector list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Complex>,
}

impl Selector {
    pub fn parse(input: &str) -> VitrineResult<Self> {
        let alternatives = input
            .split(',')
            .map(|alt| parse_complex(alt.trim(), input))
            .collect::<VitrineResult<Vec<_>>>()?;
        Ok(Self { alternatives })
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.alternatives.iter().any(|c| c.matches(doc, node))
    }
}

fn parse_complex(alt: &str, full: &str) -> VitrineResult<Complex> {
    let err = || VitrineError::validation(format!("invalid selector '{full}'"));
    if alt.is_empty() {
        return Err(err());
    }

    let spaced = alt.replace('>', " > ");
    let mut compounds = Vec::new();
    let mut combinators = Vec::new();
    let mut pending = None;

    for tok in spaced.split_whitespace() {
        if tok == ">" {
            if compounds.is_empty() || pending.is_some() {
                return Err(err());
            }
            pending = Some(Combinator::Child);
            continue;
        }
        let compound = parse_compound(tok).ok_or_else(err)?;
        if !compounds.is_empty() {
            combinators.push(pending.take().unwrap_or(Combinator::Descendant));
        }
        compounds.push(compound);
    }

    if compounds.is_empty() || pending.is_some() {
        return Err(err());
    }
    Ok(Complex {
        compounds,
        combinators,
    })
}

fn parse_compound(tok: &str) -> Option<Compound> {
    let rest = tok.strip_prefix('.')?;
    let classes: Vec<String> = rest.split('.').map(str::to_owned).collect();
    if classes.iter().any(|c| c.is_empty()) {
        return None;
    }
    Some(Compound { classes })
}

#[cfg(test)]
#[path = "../../tests/unit/dom/selector.rs"]
mod tests;

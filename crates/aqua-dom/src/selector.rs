//! Selectors
//!
//! The selector subset component wiring needs: type, `#id`, `.class`,
//! attribute matchers, `:not()`, and the descendant / child combinators,
//! in comma-separated lists.

use crate::{Document, ElementData, NodeId};

/// Selector syntax error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected '{found}' at position {position}")]
    Unexpected { found: char, position: usize },

    #[error("unexpected end of selector")]
    UnexpectedEnd,

    #[error("unsupported pseudo-class ':{0}'")]
    UnsupportedPseudo(String),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeMatcher {
    fn from_operator(op: char, value: String) -> Self {
        match op {
            '~' => Self::Contains(value),
            '|' => Self::DashMatch(value),
            '^' => Self::Prefix(value),
            '$' => Self::Suffix(value),
            '*' => Self::Substring(value),
            _ => Self::Exact(value),
        }
    }
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let Some(val) = value else {
            return false;
        };
        match &self.matcher {
            None => true,
            Some(AttributeMatcher::Exact(expected)) => val == expected,
            Some(AttributeMatcher::Contains(expected)) => {
                val.split_whitespace().any(|w| w == expected)
            }
            Some(AttributeMatcher::DashMatch(expected)) => {
                val == expected || val.starts_with(&format!("{expected}-"))
            }
            Some(AttributeMatcher::Prefix(expected)) => {
                !expected.is_empty() && val.starts_with(expected.as_str())
            }
            Some(AttributeMatcher::Suffix(expected)) => {
                !expected.is_empty() && val.ends_with(expected.as_str())
            }
            Some(AttributeMatcher::Substring(expected)) => {
                !expected.is_empty() && val.contains(expected.as_str())
            }
        }
    }
}

/// A simple selector inside a compound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
    /// :not(compound)
    Not(Compound),
}

impl Component {
    fn matches(&self, element: &ElementData) -> bool {
        match self {
            Component::Universal => true,
            Component::Type(tag) => element.tag.eq_ignore_ascii_case(tag),
            Component::Id(id) => element.attribute("id").as_deref() == Some(id.as_str()),
            Component::Class(class) => element.classes.contains(class),
            Component::Attribute(attr) => attr.matches(element.attribute(&attr.name).as_deref()),
            Component::Not(inner) => !inner.matches(element),
        }
    }
}

/// Sequence of simple selectors with no combinator, e.g. `a.aq-btn[href]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    pub components: Vec<Component>,
}

impl Compound {
    pub fn matches(&self, element: &ElementData) -> bool {
        self.components.iter().all(|c| c.matches(element))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
}

/// Complex selector: compounds joined by combinators, left to right
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub first: Compound,
    pub rest: Vec<(Combinator, Compound)>,
}

impl Selector {
    /// Check whether `node` is matched by this selector
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.matches_at(doc, self.rest.len(), node)
    }

    /// Match compound `idx` (0 = first) against `node`, then walk leftwards
    fn matches_at(&self, doc: &Document, idx: usize, node: NodeId) -> bool {
        let Some(element) = doc.element(node) else {
            return false;
        };
        let compound = if idx == 0 { &self.first } else { &self.rest[idx - 1].1 };
        if !compound.matches(element) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        match self.rest[idx - 1].0 {
            Combinator::Child => doc
                .parent(node)
                .is_some_and(|parent| self.matches_at(doc, idx - 1, parent)),
            Combinator::Descendant => {
                let mut ancestor = doc.parent(node);
                while let Some(a) = ancestor {
                    if self.matches_at(doc, idx - 1, a) {
                        return true;
                    }
                    ancestor = doc.parent(a);
                }
                false
            }
        }
    }
}

/// Comma-separated selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
}

impl SelectorList {
    /// Parse a selector list
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        if input.trim().is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut parser = Parser::new(input);
        let mut selectors = Vec::new();
        loop {
            parser.skip_whitespace();
            selectors.push(parser.complex()?);
            parser.skip_whitespace();
            match parser.peek() {
                None => break,
                Some(',') => parser.bump(),
                Some(found) => {
                    return Err(SelectorError::Unexpected {
                        found,
                        position: parser.pos,
                    });
                }
            }
        }
        Ok(Self { selectors })
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(doc, node))
    }
}

impl std::str::FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    /// Returns whether any whitespace was consumed
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos > start
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(found) => SelectorError::Unexpected {
                found,
                position: self.pos,
            },
            None => SelectorError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, c: char) -> Result<(), SelectorError> {
        if self.peek() == Some(c) {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn complex(&mut self) -> Result<Selector, SelectorError> {
        let first = self.compound()?;
        let mut rest = Vec::new();
        loop {
            let had_space = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.bump();
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(_) if had_space => Combinator::Descendant,
                Some(_) => return Err(self.unexpected()),
            };
            rest.push((combinator, self.compound()?));
        }
        Ok(Selector { first, rest })
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut components = Vec::new();
        match self.peek() {
            Some('*') => {
                self.bump();
                components.push(Component::Universal);
            }
            Some(c) if is_ident_char(c) => {
                components.push(Component::Type(self.ident()?.to_ascii_lowercase()));
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    components.push(Component::Id(self.ident()?));
                }
                Some('.') => {
                    self.bump();
                    components.push(Component::Class(self.ident()?));
                }
                Some('[') => {
                    self.bump();
                    components.push(Component::Attribute(self.attribute()?));
                }
                Some(':') => {
                    self.bump();
                    components.push(self.pseudo_class()?);
                }
                _ => break,
            }
        }

        if components.is_empty() {
            return Err(self.unexpected());
        }
        Ok(Compound { components })
    }

    fn attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.skip_whitespace();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let op = match self.peek() {
            Some(']') => {
                self.bump();
                return Ok(AttributeSelector { name, matcher: None });
            }
            Some('=') => {
                self.bump();
                '='
            }
            Some(op @ ('~' | '|' | '^' | '$' | '*')) => {
                self.bump();
                self.expect('=')?;
                op
            }
            _ => return Err(self.unexpected()),
        };

        self.skip_whitespace();
        let value = self.attribute_value()?;
        self.skip_whitespace();
        self.expect(']')?;

        Ok(AttributeSelector {
            name,
            matcher: Some(AttributeMatcher::from_operator(op, value)),
        })
    }

    fn attribute_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.bump();
                }
                let value: String = self.chars[start..self.pos].iter().collect();
                self.expect(quote)?;
                Ok(value)
            }
            _ => self.ident(),
        }
    }

    fn pseudo_class(&mut self) -> Result<Component, SelectorError> {
        let name = self.ident()?.to_ascii_lowercase();
        if name != "not" {
            return Err(SelectorError::UnsupportedPseudo(name));
        }
        self.expect('(')?;
        self.skip_whitespace();
        let inner = self.compound()?;
        self.skip_whitespace();
        self.expect(')')?;
        Ok(Component::Not(inner))
    }
}

//! Stylesheet tree node types.
//!
//! Mirrors the shape a host CSS pipeline hands to a transform stage: an ordered
//! list of rules, at-rules, declarations and comments. Containers own their
//! children; a declaration's parent selector is resolved during traversal.

use serde::{Deserialize, Serialize};

/// A complete stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

impl Stylesheet {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

/// A node in the stylesheet tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// A qualified rule: `selector { ... }`.
    Rule(Rule),

    /// An at-rule: `@media (...) { ... }`, `@font-face { ... }`.
    AtRule(AtRule),

    /// A `prop: value` declaration.
    Decl(Declaration),

    /// A `/* text */` comment.
    Comment(Comment),
}

impl Node {
    /// Build a rule node.
    pub fn rule(selector: impl Into<String>, nodes: Vec<Node>) -> Self {
        Node::Rule(Rule {
            selector: selector.into(),
            nodes,
        })
    }

    /// Build an at-rule node. `params` is the raw text between the name and the block.
    pub fn at_rule(name: impl Into<String>, params: impl Into<String>, nodes: Vec<Node>) -> Self {
        Node::AtRule(AtRule {
            name: name.into(),
            params: params.into(),
            nodes,
        })
    }

    /// Build a declaration node.
    pub fn decl(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Decl(Declaration::new(prop, value))
    }

    /// Build a comment node. `text` excludes the `/*` `*/` delimiters.
    pub fn comment(text: impl Into<String>) -> Self {
        Node::Comment(Comment { text: text.into() })
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Node::Comment(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_decl(&self) -> Option<&Declaration> {
        match self {
            Node::Decl(d) => Some(d),
            _ => None,
        }
    }

    /// Child nodes, if this node is a container.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Rule(r) => Some(&r.nodes),
            Node::AtRule(a) => Some(&a.nodes),
            Node::Decl(_) | Node::Comment(_) => None,
        }
    }
}

/// A qualified rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub selector: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// An at-rule. Statement at-rules such as `@import` have no children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtRule {
    pub name: String,
    #[serde(default)]
    pub params: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// A single declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
    #[serde(default)]
    pub important: bool,
}

impl Declaration {
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            value: value.into(),
            important: false,
        }
    }

    /// Mark the declaration `!important`.
    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }
}

impl From<Declaration> for Node {
    fn from(decl: Declaration) -> Self {
        Node::Decl(decl)
    }
}

/// A comment. The text is trimmed of surrounding whitespace by the host parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
}

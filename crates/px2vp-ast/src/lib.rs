//! px2vp stylesheet tree
//!
//! The walkable stylesheet tree that a host CSS pipeline hands to the px2vp
//! transform. Parsing is the host's job; this crate only models the nodes,
//! walks them in document order, and prints them back out.
//!
//! ```text
//! Host parser → Stylesheet → walk_decls / walk_at_rules → mutated Stylesheet
//! ```
//!
//! # Example
//!
//! ```
//! use px2vp_ast::{Node, Stylesheet};
//!
//! let mut sheet = Stylesheet::new(vec![Node::rule(".a", vec![Node::decl("width", "10px")])]);
//! sheet.walk_decls(|ctx| ctx.decl_mut().value = "1vw".into());
//! assert_eq!(sheet.to_string(), ".a {\n  width: 1vw;\n}\n");
//! ```

pub mod ast;
pub mod printer;
pub mod walk;

pub use ast::{AtRule, Comment, Declaration, Node, Rule, Stylesheet};
pub use printer::print;
pub use walk::DeclContext;

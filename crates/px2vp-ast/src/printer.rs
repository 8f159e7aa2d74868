//! Plain stylesheet printer.
//!
//! Emits one node per line with two-space indentation. Used for diagnostics and
//! for comparing transform output in tests; it makes no attempt to preserve the
//! host parser's original whitespace.

use std::fmt;

use crate::ast::{Node, Stylesheet};

/// Print a stylesheet to a string.
pub fn print(sheet: &Stylesheet) -> String {
    let mut out = String::new();
    for node in &sheet.nodes {
        print_node(node, &mut out, 0);
    }
    out
}

fn print_node(node: &Node, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);

    match node {
        Node::Rule(rule) => {
            out.push_str(&format!("{indent}{} {{\n", rule.selector));
            print_children(&rule.nodes, out, depth);
            out.push_str(&format!("{indent}}}\n"));
        }
        Node::AtRule(at_rule) => {
            out.push_str(&indent);
            out.push('@');
            out.push_str(&at_rule.name);
            if !at_rule.params.is_empty() {
                out.push(' ');
                out.push_str(&at_rule.params);
            }
            // Statement at-rules (`@import`, `@charset`) have no block
            if at_rule.nodes.is_empty() {
                out.push_str(";\n");
            } else {
                out.push_str(" {\n");
                print_children(&at_rule.nodes, out, depth);
                out.push_str(&format!("{indent}}}\n"));
            }
        }
        Node::Decl(decl) => {
            out.push_str(&format!("{indent}{}: {}", decl.prop, decl.value));
            if decl.important {
                out.push_str(" !important");
            }
            out.push_str(";\n");
        }
        Node::Comment(comment) => {
            out.push_str(&format!("{indent}/* {} */\n", comment.text));
        }
    }
}

fn print_children(nodes: &[Node], out: &mut String, depth: usize) {
    for child in nodes {
        print_node(child, out, depth + 1);
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print(self))
    }
}

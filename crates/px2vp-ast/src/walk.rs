//! Ordered traversal over a stylesheet tree.
//!
//! Walks visit nodes depth-first in document order and hand out mutable
//! borrows, so callers edit the tree in place. A declaration visitor may ask
//! for the comment right after the declaration to be detached; the detach is
//! applied once the visitor returns and the walk resumes with the node that
//! followed the comment.

use crate::ast::{AtRule, Declaration, Node, Stylesheet};

/// A declaration being visited, plus the context a transform needs about it.
pub struct DeclContext<'a> {
    decl: &'a mut Declaration,
    parent_selector: Option<&'a str>,
    next: Option<&'a Node>,
    remove_next: bool,
}

impl<'a> DeclContext<'a> {
    pub fn decl(&self) -> &Declaration {
        &*self.decl
    }

    pub fn decl_mut(&mut self) -> &mut Declaration {
        &mut *self.decl
    }

    /// Selector of the rule that directly contains the declaration.
    /// `None` at the root or directly inside an at-rule.
    pub fn parent_selector(&self) -> Option<&str> {
        self.parent_selector
    }

    /// The sibling right after the declaration, if any.
    pub fn next(&self) -> Option<&Node> {
        self.next
    }

    /// Text of the comment right after the declaration, if the next sibling is one.
    pub fn trailing_comment(&self) -> Option<&str> {
        self.next
            .and_then(Node::as_comment)
            .map(|comment| comment.text.as_str())
    }

    /// Detach the trailing comment. No-op when the next sibling is not a comment.
    pub fn remove_trailing_comment(&mut self) {
        if self.trailing_comment().is_some() {
            self.remove_next = true;
        }
    }
}

impl Stylesheet {
    /// Visit every declaration in document order.
    pub fn walk_decls<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut DeclContext<'_>),
    {
        walk_decls_in(&mut self.nodes, None, &mut f);
    }

    /// Visit every at-rule whose name matches `name`, outer rules before the
    /// rules nested in them.
    ///
    /// Names compare ASCII case-insensitively, so `@MEDIA` matches `"media"`.
    /// This is looser than an exact-name walk on purpose: at-rule names are
    /// case-insensitive in CSS.
    pub fn walk_at_rules<F>(&mut self, name: &str, mut f: F)
    where
        F: FnMut(&mut AtRule),
    {
        walk_at_rules_in(&mut self.nodes, name, &mut f);
    }
}

fn walk_decls_in<F>(nodes: &mut Vec<Node>, parent_selector: Option<&str>, f: &mut F)
where
    F: FnMut(&mut DeclContext<'_>),
{
    let mut i = 0;
    while i < nodes.len() {
        let (head, tail) = nodes.split_at_mut(i + 1);
        let remove_next = match &mut head[i] {
            Node::Decl(decl) => {
                let mut ctx = DeclContext {
                    decl,
                    parent_selector,
                    next: tail.first(),
                    remove_next: false,
                };
                f(&mut ctx);
                ctx.remove_next
            }
            Node::Rule(rule) => {
                walk_decls_in(&mut rule.nodes, Some(rule.selector.as_str()), f);
                false
            }
            Node::AtRule(at_rule) => {
                walk_decls_in(&mut at_rule.nodes, None, f);
                false
            }
            Node::Comment(_) => false,
        };

        if remove_next {
            nodes.remove(i + 1);
        }
        i += 1;
    }
}

fn walk_at_rules_in<F>(nodes: &mut [Node], name: &str, f: &mut F)
where
    F: FnMut(&mut AtRule),
{
    for node in nodes {
        match node {
            Node::AtRule(at_rule) => {
                if at_rule.name.eq_ignore_ascii_case(name) {
                    f(at_rule);
                }
                walk_at_rules_in(&mut at_rule.nodes, name, f);
            }
            Node::Rule(rule) => walk_at_rules_in(&mut rule.nodes, name, f),
            Node::Decl(_) | Node::Comment(_) => {}
        }
    }
}

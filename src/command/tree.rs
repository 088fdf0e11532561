//! Overload tree and candidate generation.
//!
//! Each command's variants are stored in a trie keyed by the non-context
//! argument types of each position. Given N tokens, candidates are collected
//! breadth-first down to depth N and returned in reverse visitation order, so
//! the deepest (most specific) variants are tried first.

use std::sync::Arc;

use tracing::warn;

use super::handle::InvokeHandle;
use crate::args::ArgumentTypeId;

#[derive(Debug, Default)]
pub struct Node {
    label: Option<ArgumentTypeId>,
    handle: Option<Arc<InvokeHandle>>,
    children: Vec<Node>,
}

impl Node {
    /// An empty root.
    pub fn root() -> Self {
        Self::default()
    }

    /// `None` for the root.
    pub fn label(&self) -> Option<ArgumentTypeId> {
        self.label
    }

    pub fn handle(&self) -> Option<&Arc<InvokeHandle>> {
        self.handle.as_ref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    fn is_string(&self) -> bool {
        self.label.is_some_and(|l| l.is_string())
    }

    /// Store `handle` at the end of `path`, creating nodes as needed and
    /// reusing existing ones for shared prefixes.
    pub fn insert(&mut self, path: &[ArgumentTypeId], handle: Arc<InvokeHandle>) {
        let mut node = self;
        for &type_id in path {
            let index = match node.children.iter().position(|c| c.label == Some(type_id)) {
                Some(index) => index,
                None => {
                    node.children.push(Node {
                        label: Some(type_id),
                        ..Node::default()
                    });
                    node.children.len() - 1
                }
            };
            node = &mut node.children[index];
        }

        if let Some(previous) = node.handle.replace(handle) {
            warn!(
                variant = previous.variant(),
                signature = ?path,
                "Duplicate variant signature, later declaration wins"
            );
        }
    }

    /// Length of the longest path below this node.
    pub fn depth(&self) -> usize {
        self.children.iter().map(|c| c.depth() + 1).max().unwrap_or(0)
    }
}

/// Candidates for `token_count` tokens, most specific first.
///
/// Within one level, string-typed edges are visited before the others, so
/// after the reversal typed variants are tried before string variants of
/// the same arity.
pub fn generate_candidates(root: &Node, token_count: usize) -> Vec<Arc<InvokeHandle>> {
    let mut visited = Vec::new();
    let mut level = vec![root];
    let mut depth = 0;

    loop {
        visited.extend(level.iter().filter_map(|n| n.handle.clone()));
        if depth == token_count {
            break;
        }

        let mut next: Vec<&Node> = level.iter().flat_map(|n| n.children.iter()).collect();
        if next.is_empty() {
            break;
        }
        next.sort_by_key(|n| !n.is_string());
        level = next;
        depth += 1;
    }

    visited.reverse();
    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::StringConverter;
    use crate::command::handle::Slot;
    use crate::command::spec::handler;
    use crate::output::CommandOutput;

    fn handle(variant: usize, types: &[ArgumentTypeId]) -> Arc<InvokeHandle> {
        let slots = types
            .iter()
            .map(|&type_id| Slot {
                type_id,
                converter: Arc::new(StringConverter),
            })
            .collect();
        Arc::new(InvokeHandle::new(
            variant,
            slots,
            handler(|_| async { Ok(CommandOutput::None) }),
        ))
    }

    fn build(variants: &[&[ArgumentTypeId]]) -> Node {
        let mut root = Node::root();
        for (i, types) in variants.iter().enumerate() {
            root.insert(types, handle(i, types));
        }
        root
    }

    fn order(root: &Node, n: usize) -> Vec<usize> {
        generate_candidates(root, n).iter().map(|h| h.variant()).collect()
    }

    #[test]
    fn deepest_first() {
        let int = ArgumentTypeId::of::<i64>();
        let root = build(&[&[], &[int], &[int, int]]);
        assert_eq!(order(&root, 2), vec![2, 1, 0]);
        assert_eq!(order(&root, 1), vec![1, 0]);
        assert_eq!(order(&root, 0), vec![0]);
    }

    #[test]
    fn deeper_than_token_count_is_not_explored() {
        let int = ArgumentTypeId::of::<i64>();
        let root = build(&[&[int], &[int, int, int]]);
        assert_eq!(order(&root, 2), vec![0]);
        assert_eq!(root.depth(), 3);
    }

    #[test]
    fn typed_variant_before_string_at_same_arity() {
        let int = ArgumentTypeId::of::<i64>();
        let string = ArgumentTypeId::string();
        let root = build(&[&[string], &[int]]);
        assert_eq!(order(&root, 1), vec![1, 0]);

        let root = build(&[&[int], &[string]]);
        assert_eq!(order(&root, 1), vec![0, 1]);
    }

    #[test]
    fn shared_prefix_reuses_nodes() {
        let int = ArgumentTypeId::of::<i64>();
        let string = ArgumentTypeId::string();
        let root = build(&[&[int], &[int, string], &[int, int]]);
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].children().len(), 2);
        assert_eq!(order(&root, 2), vec![2, 1, 0]);
    }

    #[test]
    fn duplicate_signature_last_wins() {
        let int = ArgumentTypeId::of::<i64>();
        let root = build(&[&[int], &[int]]);
        assert_eq!(order(&root, 1), vec![1]);
    }
}

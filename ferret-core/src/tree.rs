//! Binary trees: a recursive structure with generation and shrinking support.

use std::rc::Rc;

/// A binary tree whose nodes carry a value and two subtrees.
///
/// Subtrees are shared, so cloning a node copies its value and bumps two
/// reference counts. Shrink candidates reuse the untouched parts of the
/// original tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BinaryTree<T> {
    Leaf,
    Node(T, Rc<BinaryTree<T>>, Rc<BinaryTree<T>>),
}

impl<T> BinaryTree<T> {
    /// The empty tree.
    pub fn leaf() -> Self {
        BinaryTree::Leaf
    }

    /// A node with the given value and subtrees.
    pub fn node(value: T, left: BinaryTree<T>, right: BinaryTree<T>) -> Self {
        BinaryTree::Node(value, Rc::new(left), Rc::new(right))
    }

    /// A node with two leaf children.
    pub fn singleton(value: T) -> Self {
        Self::node(value, BinaryTree::Leaf, BinaryTree::Leaf)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, BinaryTree::Leaf)
    }

    /// The value at the root, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            BinaryTree::Leaf => None,
            BinaryTree::Node(value, _, _) => Some(value),
        }
    }

    /// Count the number of nodes (leaves excluded).
    pub fn count_nodes(&self) -> usize {
        match self {
            BinaryTree::Leaf => 0,
            BinaryTree::Node(_, left, right) => 1 + left.count_nodes() + right.count_nodes(),
        }
    }

    /// Length of the longest root-to-leaf path, counted in nodes.
    pub fn depth(&self) -> usize {
        match self {
            BinaryTree::Leaf => 0,
            BinaryTree::Node(_, left, right) => 1 + left.depth().max(right.depth()),
        }
    }

    /// Map a function over the node values.
    pub fn map<U, F>(&self, f: &F) -> BinaryTree<U>
    where
        F: Fn(&T) -> U,
    {
        match self {
            BinaryTree::Leaf => BinaryTree::Leaf,
            BinaryTree::Node(value, left, right) => {
                BinaryTree::node(f(value), left.map(f), right.map(f))
            }
        }
    }

    /// Node values in in-order traversal.
    pub fn to_vec(&self) -> Vec<&T> {
        let mut result = Vec::with_capacity(self.count_nodes());
        self.collect_in_order(&mut result);
        result
    }

    fn collect_in_order<'a>(&'a self, result: &mut Vec<&'a T>) {
        if let BinaryTree::Node(value, left, right) = self {
            left.collect_in_order(result);
            result.push(value);
            right.collect_in_order(result);
        }
    }
}

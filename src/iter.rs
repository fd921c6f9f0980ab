use core::iter::FusedIterator;

use crate::{
    node::{Dir, Link},
    RbTree,
};

/// The order in which a traversal visits each node relative to its subtrees.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, then node, then right subtree. This yields elements in sorted order.
    InOrder,
    /// Left subtree, then right subtree, then node.
    PostOrder,
}

#[derive(Copy, Clone)]
enum CameFrom {
    Parent,
    LeftChild,
    RightChild,
}

/// An iterator over the elements of an [`RbTree`].
///
/// The walk follows parent links instead of keeping a stack, so it uses constant space.
pub struct Iter<'tree, T, C> {
    tree: &'tree RbTree<T, C>,
    order: Order,

    cur: Link,
    from: CameFrom,

    len: usize,
}

impl<'tree, T, C> Iter<'tree, T, C> {
    pub(crate) fn new(tree: &'tree RbTree<T, C>, order: Order) -> Self {
        Iter {
            tree,
            order,

            cur: tree.root,
            from: CameFrom::Parent,
            len: tree.len(),
        }
    }
}

impl<'tree, T, C> Iterator for Iter<'tree, T, C> {
    type Item = &'tree T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let cur = self.cur?;
            let node = self.tree.node_at(cur);

            let visit = match self.from {
                CameFrom::Parent => {
                    // Entering a new subtree. Descend left if possible.
                    match node.left() {
                        Some(left) => self.cur = Some(left),
                        None => self.from = CameFrom::LeftChild,
                    }

                    self.order == Order::PreOrder
                }

                CameFrom::LeftChild => {
                    // The left subtree has been exhausted. Descend right if possible.
                    match node.right() {
                        Some(right) => {
                            self.cur = Some(right);
                            self.from = CameFrom::Parent;
                        }
                        None => self.from = CameFrom::RightChild,
                    }

                    self.order == Order::InOrder
                }

                CameFrom::RightChild => {
                    // Both subtrees have been exhausted. Ascend one level, or finish at the root.
                    self.cur = node.parent;

                    if let Some(parent) = node.parent {
                        self.from = match self.tree.which_child(parent, cur) {
                            Dir::Left => CameFrom::LeftChild,
                            Dir::Right => CameFrom::RightChild,
                        };
                    }

                    self.order == Order::PostOrder
                }
            };

            if visit {
                self.len -= 1;
                return Some(&node.value);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T, C> ExactSizeIterator for Iter<'_, T, C> {}

impl<T, C> FusedIterator for Iter<'_, T, C> {}

impl<T, C> Clone for Iter<'_, T, C> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<T, C> RbTree<T, C> {
    /// Returns an iterator over the elements of the tree in sorted order.
    pub fn iter(&self) -> Iter<'_, T, C> {
        self.in_order()
    }

    /// Returns an iterator visiting the elements of the tree in `order`.
    pub fn traverse(&self, order: Order) -> Iter<'_, T, C> {
        Iter::new(self, order)
    }

    /// Returns an iterator over the elements of the tree in sorted order.
    pub fn in_order(&self) -> Iter<'_, T, C> {
        self.traverse(Order::InOrder)
    }

    /// Returns an iterator visiting each node before its subtrees.
    pub fn pre_order(&self) -> Iter<'_, T, C> {
        self.traverse(Order::PreOrder)
    }

    /// Returns an iterator visiting each node after its subtrees.
    pub fn post_order(&self) -> Iter<'_, T, C> {
        self.traverse(Order::PostOrder)
    }
}

impl<'tree, T, C> IntoIterator for &'tree RbTree<T, C> {
    type Item = &'tree T;
    type IntoIter = Iter<'tree, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

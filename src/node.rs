use core::{fmt, mem, ops::Not};

use crate::RbTree;

/// The index of a node in a tree's arena.
///
/// Nodes are never removed from the arena, so an id handed out by [`RbTree::insert`] remains valid
/// for as long as the tree that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> NodeId {
        NodeId(u32::try_from(index).expect("arena index overflowed u32"))
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) type Link = Option<NodeId>;

/// The color of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::Red => "RED",
            Color::Black => "BLACK",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) color: Color,
    pub(crate) parent: Link,
    pub(crate) children: [Link; 2],
}

impl<T> Node<T> {
    /// New nodes are always red and detached.
    pub(crate) fn new(value: T) -> Node<T> {
        Node {
            value,
            color: Color::Red,
            parent: None,
            children: [None; 2],
        }
    }

    #[inline]
    pub(crate) fn child(&self, dir: Dir) -> Link {
        self.children[dir as usize]
    }

    #[inline]
    pub(crate) fn left(&self) -> Link {
        self.child(Dir::Left)
    }

    #[inline]
    pub(crate) fn right(&self) -> Link {
        self.child(Dir::Right)
    }

    #[inline]
    pub(crate) fn set_child(&mut self, dir: Dir, child: Link) -> Link {
        mem::replace(&mut self.children[dir as usize], child)
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

/// A shared view of a single node of an [`RbTree`].
pub struct NodeRef<'tree, T, C> {
    tree: &'tree RbTree<T, C>,
    id: NodeId,
}

impl<'tree, T, C> NodeRef<'tree, T, C> {
    pub(crate) fn new(tree: &'tree RbTree<T, C>, id: NodeId) -> Self {
        NodeRef { tree, id }
    }

    fn node(&self) -> &'tree Node<T> {
        self.tree.node_at(self.id)
    }

    fn follow(&self, link: Link) -> Option<NodeRef<'tree, T, C>> {
        link.map(|id| NodeRef::new(self.tree, id))
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn value(&self) -> &'tree T {
        &self.node().value
    }

    pub fn color(&self) -> Color {
        self.node().color
    }

    pub fn is_red(&self) -> bool {
        self.node().is_red()
    }

    pub fn is_black(&self) -> bool {
        !self.is_red()
    }

    pub fn left(&self) -> Option<NodeRef<'tree, T, C>> {
        self.follow(self.node().left())
    }

    pub fn right(&self) -> Option<NodeRef<'tree, T, C>> {
        self.follow(self.node().right())
    }

    /// Returns the parent node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'tree, T, C>> {
        self.follow(self.node().parent)
    }
}

impl<T, C> Clone for NodeRef<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for NodeRef<'_, T, C> {}

impl<T: fmt::Display, C> fmt::Display for NodeRef<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node [value={}, color={}]", self.value(), self.color())
    }
}

impl<T: fmt::Debug, C> fmt::Debug for NodeRef<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", self.value())
            .field("color", &self.color())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_not() {
        assert_eq!(!Dir::Left, Dir::Right);
        assert_eq!(!Dir::Right, Dir::Left);
    }

    #[test]
    fn new_node_is_red_and_detached() {
        let node = Node::new(7u32);
        assert!(node.is_red());
        assert_eq!(node.parent, None);
        assert_eq!(node.left(), None);
        assert_eq!(node.right(), None);
    }

    #[test]
    fn node_ref_display() {
        let tree: RbTree<u32> = [5].into_iter().collect();
        let root = tree.root().unwrap();
        assert_eq!(root.to_string(), "Node [value=5, color=BLACK]");
        assert_eq!(Color::Red.to_string(), "RED");
    }
}

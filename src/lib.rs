//! An arena-backed red-black tree.
//!
//! Nodes live in a `Vec` owned by the tree and refer to each other by [`NodeId`], so the
//! parent/child cycle of a classic red-black tree never involves an owning pointer.

// The properties maintained by every public operation:
// 1. Every left descendant of `n` compares less than or equal to `n` and every right descendant
//    compares greater or equal, so the in-order sequence never decreases. New duplicates are
//    placed to the right; a later rotation may lift one above an equal node.
// 2. The root, if any, is black.
// 3. A red node has no red child.
// 4. All paths from a node down to a missing child pass through the same number of black nodes.
// 5. `p(x) == y` exactly when `x` is a child of `y`, and the root has no parent.
//
// Insertion places a red leaf, which can only break (2) or (3). The fixup loop climbs from the new
// leaf, either recoloring (which moves the red-red edge two levels up) or rotating once or twice
// (which ends the loop), so it completes in _O(log(n))_ steps.

use core::{cmp::Ordering, fmt, mem};

use tracing::{debug, trace};

mod check;
mod compare;
mod debug;
mod error;
mod iter;
mod node;

#[cfg(any(test, feature = "model"))]
pub mod model;


pub use compare::{Compare, Natural};
pub use error::InvariantViolation;
pub use iter::{Iter, Order};
pub use node::{Color, NodeId, NodeRef};

use node::{Dir, Link, Node};

/// A red-black tree over values of type `T`, ordered by the comparator `C`.
///
/// Duplicate values are all retained. Values cannot be removed once inserted.
#[derive(Clone)]
pub struct RbTree<T, C = Natural> {
    nodes: Vec<Node<T>>,
    root: Link,
    cmp: C,
}

impl<T: Ord> RbTree<T, Natural> {
    /// Returns a new empty tree ordered by `T`'s [`Ord`] implementation.
    pub const fn new() -> Self {
        RbTree {
            nodes: Vec::new(),
            root: None,
            cmp: Natural,
        }
    }
}

impl<T, C> RbTree<T, C> {
    /// Returns `true` if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        let empty = self.nodes.is_empty();
        debug_assert_eq!(empty, self.root.is_none());
        empty
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Counts the elements of the tree by visiting every node reachable from the root.
    ///
    /// This always agrees with [`len`](Self::len), which is _O(1)_.
    pub fn count_nodes(&self) -> usize {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        let mut count = 0;

        while let Some(id) = stack.pop() {
            count += 1;
            stack.extend(self.node_at(id).children.iter().flatten());
        }

        count
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    fn subtree_height(&self, link: Link) -> usize {
        match link {
            Some(id) => {
                let node = self.node_at(id);
                1 + self
                    .subtree_height(node.left())
                    .max(self.subtree_height(node.right()))
            }
            None => 0,
        }
    }

    /// Returns the root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<NodeRef<'_, T, C>> {
        self.root.map(|id| NodeRef::new(self, id))
    }

    /// Returns the node at `id`'s position in this tree's arena, or `None` if the tree has fewer
    /// nodes than that.
    ///
    /// Only ids returned by this tree's [`insert`](Self::insert) are meaningful; an id issued by
    /// another tree is not detected and may name an unrelated node.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T, C>> {
        (id.index() < self.nodes.len()).then(|| NodeRef::new(self, id))
    }

    /// Returns the minimum element of the tree.
    ///
    /// If the minimum occurs more than once, the earliest inserted copy is returned.
    pub fn find_min(&self) -> Option<&T> {
        self.extreme(Dir::Left)
    }

    /// Returns the maximum element of the tree.
    ///
    /// If the maximum occurs more than once, the latest inserted copy is returned.
    pub fn find_max(&self) -> Option<&T> {
        self.extreme(Dir::Right)
    }

    fn extreme(&self, dir: Dir) -> Option<&T> {
        let mut cur = self.root?;

        while let Some(next) = self.node_at(cur).child(dir) {
            cur = next;
        }

        Some(&self.node_at(cur).value)
    }

    #[inline]
    pub(crate) fn node_at(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.index()]
    }

    #[inline]
    fn parent(&self, id: NodeId) -> Link {
        self.node_at(id).parent
    }

    #[inline]
    fn is_red(&self, id: NodeId) -> bool {
        self.node_at(id).is_red()
    }

    #[inline]
    fn set_color(&mut self, id: NodeId, color: Color) {
        self.node_mut(id).color = color;
    }

    pub(crate) fn which_child(&self, parent: NodeId, child: NodeId) -> Dir {
        if self.node_at(parent).left() == Some(child) {
            Dir::Left
        } else {
            Dir::Right
        }
    }

    // Rotations ==============================================================
    //
    // The primitives below only rewire the two nodes being rotated and the subtree that changes
    // sides. The parent links of `x` and `y`, and the link into the rotated subtree from above,
    // are left stale; `relink` must be called with the result before the tree is used again.

    // Moves `x.right` (`y`) up and `x` down to its left. Returns `y`, or `None` if `x` has no
    // right child.
    //
    //     x             y
    //    / \           / \
    //   a   y   =>    x   c
    //      / \       / \
    //     t   c     a   t
    pub(crate) fn rotate_left(&mut self, x: NodeId) -> Option<NodeId> {
        let y = self.node_at(x).right()?;
        let t = self.node_at(y).left();

        self.node_mut(y).set_child(Dir::Left, Some(x));
        self.node_mut(x).set_child(Dir::Right, t);

        if let Some(t) = t {
            self.node_mut(t).parent = Some(x);
        }

        Some(y)
    }

    // Moves `x.left` (`y`) up and `x` down to its right. Returns `y`, or `None` if `x` has no
    // left child.
    //
    //       x         y
    //      / \       / \
    //     y   c  => a   x
    //    / \           / \
    //   a   t         t   c
    pub(crate) fn rotate_right(&mut self, x: NodeId) -> Option<NodeId> {
        let y = self.node_at(x).left()?;
        let t = self.node_at(y).right();

        self.node_mut(y).set_child(Dir::Right, Some(x));
        self.node_mut(x).set_child(Dir::Left, t);

        if let Some(t) = t {
            self.node_mut(t).parent = Some(x);
        }

        Some(y)
    }

    // Rotates `x` down in direction `dir`.
    #[inline]
    fn rotate(&mut self, x: NodeId, dir: Dir) -> Option<NodeId> {
        match dir {
            Dir::Left => self.rotate_left(x),
            Dir::Right => self.rotate_right(x),
        }
    }

    // Installs `new` in the position `old` held before a rotation, and makes `old` its child.
    pub(crate) fn relink(&mut self, old: NodeId, new: NodeId) {
        let parent = mem::replace(&mut self.node_mut(old).parent, Some(new));
        self.node_mut(new).parent = parent;

        match parent {
            Some(parent) => self.replace_child(parent, old, new),
            None => {
                debug!(old_root = %old, new_root = %new, "root replaced by rotation");
                self.root = Some(new);
            }
        }
    }

    // Replaces the child pointer of `parent` pointing at `old_child` with `new_child`.
    //
    // `new_child`'s parent pointer is not updated.
    fn replace_child(&mut self, parent: NodeId, old_child: NodeId, new_child: NodeId) {
        let parent = self.node_mut(parent);

        if parent.left() == Some(old_child) {
            parent.set_child(Dir::Left, Some(new_child));
        } else {
            debug_assert_eq!(
                parent.right(),
                Some(old_child),
                "`old_child` must be a child of `parent`"
            );
            parent.set_child(Dir::Right, Some(new_child));
        }
    }

    fn rotate_and_relink(&mut self, x: NodeId, dir: Dir) -> Option<NodeId> {
        let y = self.rotate(x, dir)?;
        self.relink(x, y);
        Some(y)
    }

    // Insertion ==============================================================

    // Restores the coloring rules after `node` was attached as a red leaf.
    fn rebalance_inserted(&mut self, node: NodeId) {
        debug_assert!(self.is_red(node));

        let mut x = node;

        // While `x` and its parent are both red, push the violation upward or rotate it away.
        while let Some(parent) = self.parent(x).filter(|&p| self.is_red(p)) {
            // A red parent is never the root, except for a root that is about to be blackened.
            let Some(grandparent) = self.parent(parent) else {
                break;
            };

            let side = self.which_child(grandparent, parent);
            let uncle = self.node_at(grandparent).child(!side);

            if let Some(uncle) = uncle.filter(|&u| self.is_red(u)) {
                trace!(node = %x, %parent, %uncle, %grandparent, "red uncle, recoloring");

                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);

                x = grandparent;
                continue;
            }

            let mut parent = parent;

            if self.which_child(parent, x) != side {
                trace!(node = %x, %parent, "inner grandchild, straightening");

                // Rotating `parent` down toward `side` lifts `x` into its place.
                let lifted = self.rotate_and_relink(parent, side);
                debug_assert_eq!(lifted, Some(x));

                mem::swap(&mut x, &mut parent);
            }

            trace!(node = %x, %parent, %grandparent, "outer grandchild, rotating grandparent");

            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            let lifted = self.rotate_and_relink(grandparent, !side);
            debug_assert_eq!(lifted, Some(parent));

            // `parent` is now a black subtree root, so nothing above it can be violated.
            break;
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }
}

impl<T, C> RbTree<T, C>
where
    C: Compare<T>,
{
    /// Returns a new empty tree ordered by `cmp`.
    pub const fn with_comparator(cmp: C) -> Self {
        RbTree {
            nodes: Vec::new(),
            root: None,
            cmp,
        }
    }

    /// Returns the tree's comparator.
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Inserts a value into the tree and returns the id of its node.
    ///
    /// Values equal to one already present are inserted after it. This operation completes in
    /// _O(log(n))_ time.
    ///
    /// # Panics
    ///
    /// Panics if the tree already holds `u32::MAX + 1` nodes, the most a [`NodeId`] can address.
    pub fn insert(&mut self, value: T) -> NodeId {
        let id = NodeId::new(self.nodes.len());

        // Descend the tree, looking for an empty child slot.
        let mut slot = None;
        let mut opt_cur = self.root;

        while let Some(cur) = opt_cur {
            let dir = match self.cmp.compare(&value, &self.node_at(cur).value) {
                Ordering::Less => Dir::Left,
                Ordering::Equal | Ordering::Greater => Dir::Right,
            };

            slot = Some((cur, dir));
            opt_cur = self.node_at(cur).child(dir);
        }

        let mut node = Node::new(value);
        node.parent = slot.map(|(parent, _)| parent);
        self.nodes.push(node);

        match slot {
            Some((parent, dir)) => {
                self.node_mut(parent).set_child(dir, Some(id));
            }
            None => self.root = Some(id),
        }

        self.rebalance_inserted(id);

        id
    }

    /// Returns a reference to an element equal to `value`.
    pub fn find(&self, value: &T) -> Option<&T> {
        self.find_id(value).map(|id| &self.node_at(id).value)
    }

    /// Returns `true` if the tree contains an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.find_id(value).is_some()
    }

    fn find_id(&self, value: &T) -> Link {
        let mut opt_cur = self.root;

        loop {
            let cur = opt_cur?;
            let node = self.node_at(cur);

            match self.cmp.compare(value, &node.value) {
                Ordering::Less => opt_cur = node.left(),
                Ordering::Equal => return Some(cur),
                Ordering::Greater => opt_cur = node.right(),
            }
        }
    }
}

impl<T: Ord> Default for RbTree<T, Natural> {
    fn default() -> Self {
        RbTree::new()
    }
}

impl<T: Ord> FromIterator<T> for RbTree<T, Natural> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = RbTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T, C: Compare<T>> Extend<T> for RbTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for RbTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

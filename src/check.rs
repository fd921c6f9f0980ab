use core::cmp::Ordering;

use crate::{compare::Compare, node::Dir, InvariantViolation, NodeId, RbTree};

// Bounds inherited from ancestors while descending: every node in the subtree must compare at
// least `lower` and at most `upper`. Rotations can carry a duplicate into the left subtree of an
// equal node, so neither bound is strict.
#[derive(Copy, Clone, Default)]
struct Bounds {
    lower: Option<NodeId>,
    upper: Option<NodeId>,
}

impl<T, C> RbTree<T, C>
where
    C: Compare<T>,
{
    /// Verifies every structural property of the tree.
    ///
    /// Returns the first violation found. This walks the whole tree and takes _O(n)_ time.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if let Some(root) = self.root {
            let node = self.node_at(root);

            if node.is_red() {
                return Err(InvariantViolation::RedRoot(root));
            }

            if node.parent.is_some() {
                return Err(InvariantViolation::RootHasParent(root));
            }
        }

        let mut reachable = 0;
        self.check_subtree(self.root, Bounds::default(), &mut reachable)?;

        if reachable != self.len() {
            return Err(InvariantViolation::Count {
                expected: self.len(),
                reachable,
            });
        }

        Ok(())
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        if let Err(violation) = self.check_invariants() {
            panic!("red-black tree invariant violated: {violation}");
        }
    }

    /// Returns the number of black nodes on every path from the root to a missing child.
    ///
    /// Returns `None` if the paths disagree.
    pub fn black_height(&self) -> Option<usize> {
        let mut reachable = 0;
        self.check_subtree(self.root, Bounds::default(), &mut reachable).ok()
    }

    // Checks the subtree rooted at `link` and returns its black-height.
    fn check_subtree(
        &self,
        link: Option<NodeId>,
        bounds: Bounds,
        reachable: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        let Some(id) = link else {
            return Ok(0);
        };

        *reachable += 1;
        if *reachable > self.len() {
            // Only possible if the links contain a cycle.
            return Err(InvariantViolation::Count {
                expected: self.len(),
                reachable: *reachable,
            });
        }

        let node = self.node_at(id);

        if let Some(lower) = bounds.lower {
            if self.cmp.compare(&node.value, &self.node_at(lower).value) == Ordering::Less {
                return Err(InvariantViolation::Order {
                    node: id,
                    ancestor: lower,
                });
            }
        }

        if let Some(upper) = bounds.upper {
            if self.cmp.compare(&node.value, &self.node_at(upper).value) == Ordering::Greater {
                return Err(InvariantViolation::Order {
                    node: id,
                    ancestor: upper,
                });
            }
        }

        let mut heights = [0; 2];

        for dir in [Dir::Left, Dir::Right] {
            let Some(child) = node.child(dir) else {
                continue;
            };

            let child_node = self.node_at(child);

            if child_node.parent != Some(id) {
                return Err(InvariantViolation::ParentLink {
                    parent: id,
                    child,
                    actual: child_node.parent,
                });
            }

            if node.is_red() && child_node.is_red() {
                return Err(InvariantViolation::RedRed { parent: id, child });
            }

            let child_bounds = match dir {
                Dir::Left => Bounds {
                    upper: Some(id),
                    ..bounds
                },
                Dir::Right => Bounds {
                    lower: Some(id),
                    ..bounds
                },
            };

            heights[dir as usize] = self.check_subtree(Some(child), child_bounds, reachable)?;
        }

        let [left, right] = heights;
        if left != right {
            return Err(InvariantViolation::BlackHeight {
                node: id,
                left,
                right,
            });
        }

        Ok(left + usize::from(!node.is_red()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{node::Color, InvariantViolation, RbTree};

    fn tree_of(keys: &[u32]) -> RbTree<u32> {
        keys.iter().copied().collect()
    }

    #[test]
    fn empty_tree_is_valid() {
        let tree = tree_of(&[]);
        assert_eq!(tree.check_invariants(), Ok(()));
        assert_eq!(tree.black_height(), Some(0));
    }

    #[test]
    fn duplicates_lifted_by_rotation_are_valid() {
        // The third 5 forces a rotation that moves the first 5 into the left subtree of the second.
        let tree = tree_of(&[5, 5, 5]);
        let root = tree.root.unwrap();
        assert_eq!(tree.node_at(root).left(), Some(crate::NodeId::new(0)));

        assert_eq!(tree.check_invariants(), Ok(()));
        assert_eq!(tree.black_height(), Some(1));
    }

    #[test]
    fn detects_red_root() {
        let mut tree = tree_of(&[1, 2, 3]);
        let root = tree.root.unwrap();
        tree.set_color(root, Color::Red);

        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::RedRoot(root))
        );
    }

    #[test]
    fn detects_red_red() {
        // 2 is the black root with red children 1 and 3.
        let mut tree = tree_of(&[1, 2, 3]);
        let root = tree.root.unwrap();
        let left = tree.node_at(root).left().unwrap();
        let right = tree.node_at(root).right().unwrap();

        // Keep black-heights equal so the red-red edge is what gets reported.
        tree.set_color(left, Color::Black);
        tree.set_color(right, Color::Black);
        let four = tree.insert(4);
        assert_eq!(tree.check_invariants(), Ok(()));

        tree.set_color(right, Color::Red);
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::RedRed {
                parent: right,
                child: four,
            })
        );
    }

    #[test]
    fn detects_black_height_mismatch() {
        let mut tree = tree_of(&[1, 2, 3]);
        let root = tree.root.unwrap();
        let left = tree.node_at(root).left().unwrap();
        tree.set_color(left, Color::Black);

        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::BlackHeight {
                node: root,
                left: 1,
                right: 0,
            })
        );
        assert_eq!(tree.black_height(), None);
    }

    #[test]
    fn detects_stale_parent_link() {
        let mut tree = tree_of(&[1, 2, 3]);
        let root = tree.root.unwrap();
        let left = tree.node_at(root).left().unwrap();
        let right = tree.node_at(root).right().unwrap();
        tree.node_mut(left).parent = Some(right);

        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::ParentLink {
                parent: root,
                child: left,
                actual: Some(right),
            })
        );
    }

    #[test]
    fn detects_order_violation() {
        let mut tree = tree_of(&[10, 20, 30]);
        let root = tree.root.unwrap();
        let left = tree.node_at(root).left().unwrap();
        tree.node_mut(left).value = 25;

        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::Order {
                node: left,
                ancestor: root,
            })
        );
    }

    #[test]
    #[should_panic(expected = "invariant violated")]
    fn assert_invariants_panics() {
        let mut tree = tree_of(&[5]);
        let root = tree.root.unwrap();
        tree.set_color(root, Color::Red);
        tree.assert_invariants();
    }
}

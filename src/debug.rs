use std::{collections::VecDeque, fmt};

use crate::{Color, NodeId, RbTree};

impl<T, C> RbTree<T, C>
where
    T: fmt::Display,
{
    /// Writes a Graphviz rendering of the tree to `w`, one rank per tree level.
    pub fn dotgraph<W>(&self, name: &str, mut w: W) -> fmt::Result
    where
        W: fmt::Write,
    {
        let root = match self.root {
            Some(r) => r,
            None => return write!(w, "digraph \"graph-{name}\" {{}}"),
        };

        enum Item {
            Node(NodeId),
            Missing(u32),
        }

        let mut queue = VecDeque::new();
        queue.push_back(Item::Node(root));

        write!(
            w,
            "digraph \"graph-{name}\" {{\n subgraph \"subgraph-{name}\" {{"
        )?;

        let mut missing = 0;
        let mut links = String::new();

        while !queue.is_empty() {
            use fmt::Write;

            write!(w, "{{rank=same; ")?;

            for _ in 0..queue.len() {
                let Some(item) = queue.pop_front() else {
                    break;
                };

                let id = match item {
                    Item::Node(id) => id,
                    Item::Missing(m) => {
                        write!(w, "\"graph{name}-missing{m}\" [shape=point]; ")?;
                        continue;
                    }
                };

                // Ids rather than values name the graph nodes, since values may repeat.
                let node = self.node_at(id);
                let (fill, font) = match node.color {
                    Color::Red => ("red", "white"),
                    Color::Black => ("black", "white"),
                };
                write!(
                    w,
                    "\"graph{name}-{}\" [label=\"{}\", style=filled, fillcolor={fill}, fontcolor={font}]; ",
                    id.index(),
                    node.value,
                )?;

                for child in node.children {
                    match child {
                        Some(child) => {
                            queue.push_back(Item::Node(child));
                            writeln!(
                                links,
                                "\"graph{name}-{}\" -> \"graph{name}-{}\";",
                                id.index(),
                                child.index(),
                            )?;
                        }
                        None => {
                            queue.push_back(Item::Missing(missing));
                            writeln!(
                                links,
                                "\"graph{name}-{}\" -> \"graph{name}-missing{missing}\";",
                                id.index(),
                            )?;
                            missing += 1;
                        }
                    }
                }
            }

            writeln!(w, "}}")?;
        }

        w.write_str(&links)?;

        w.write_str(" }\n}")
    }
}

#[cfg(test)]
mod tests {
    use crate::RbTree;

    #[test]
    fn empty_graph() {
        let tree: RbTree<u32> = RbTree::new();
        let mut out = String::new();
        tree.dotgraph("t", &mut out).unwrap();
        assert_eq!(out, "digraph \"graph-t\" {}");
    }

    #[test]
    fn colors_and_edges() {
        let tree: RbTree<u32> = [10, 20, 30].into_iter().collect();
        let mut out = String::new();
        tree.dotgraph("t", &mut out).unwrap();

        // 20 (id 1) is the black root with red children 10 (id 0) and 30 (id 2).
        assert!(out.contains("\"grapht-1\" [label=\"20\", style=filled, fillcolor=black"));
        assert!(out.contains("\"grapht-0\" [label=\"10\", style=filled, fillcolor=red"));
        assert!(out.contains("\"grapht-1\" -> \"grapht-0\";"));
        assert!(out.contains("\"grapht-1\" -> \"grapht-2\";"));
        assert_eq!(out.matches("shape=point").count(), 4);
    }
}

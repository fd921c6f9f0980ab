use arena_rbtree::{Order, RbTree};
use tracing_subscriber::EnvFilter;

fn print_walk(tree: &RbTree<u32>, order: Order) {
    let values: Vec<String> = tree.traverse(order).map(u32::to_string).collect();
    println!("{order:?}: [{}]", values.join(", "));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut tree: RbTree<u32> = RbTree::new();

    for key in [2, 0, 3, 4, 5, 1, 6, 6] {
        let id = tree.insert(key);
        tree.assert_invariants();

        if let Some(node) = tree.node(id) {
            println!("inserted {node}");
        }
        println!("{:?}", tree.iter().collect::<Vec<_>>());
    }

    for order in [Order::PreOrder, Order::InOrder, Order::PostOrder] {
        print_walk(&tree, order);
    }

    println!(
        "count: {}, height: {}, black-height: {:?}",
        tree.count_nodes(),
        tree.height(),
        tree.black_height()
    );
    println!("min: {:?}, max: {:?}", tree.find_min(), tree.find_max());

    let mut graph = String::new();
    match tree.dotgraph("demo", &mut graph) {
        Ok(()) => println!("{graph}"),
        Err(e) => eprintln!("failed to render graph: {e}"),
    }
}

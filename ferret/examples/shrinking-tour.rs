//! Shrinking tour
//!
//! Runs a few failing properties and prints how their counterexamples were
//! minimized. Set `RUST_LOG=ferret_core=debug` to watch every accepted
//! shrink as it happens.

use ferret::*;
use tracing_subscriber::EnvFilter;

#[derive(Arbitrary, Debug, Clone, PartialEq)]
struct Order {
    quantity: u32,
    discount: i16,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Shrinking Tour ===\n");

    example_naturals();
    example_lists();
    example_trees();
    example_derived();
}

/// Example 1: a threshold on naturals
fn example_naturals() {
    println!("1. Naturals below a threshold");
    let prop = for_all(|n: &u64| *n < 1000);
    println!("{}\n", prop.run(&Config::default()));
}

/// Example 2: a length bound on lists
fn example_lists() {
    println!("2. Lists shorter than four elements");
    let prop = for_all(|xs: &Vec<u16>| xs.len() < 4);
    println!("{}\n", prop.run(&Config::default().with_size_limit(20)));
}

/// Example 3: a bound on tree sizes
fn example_trees() {
    println!("3. Trees with fewer than three nodes");
    let prop = for_all(|tree: &BinaryTree<u8>| tree.count_nodes() < 3);
    println!("{}\n", prop.run(&Config::default().with_size_limit(6)));
}

/// Example 4: a derived record
fn example_derived() {
    println!("4. Orders whose discount never exceeds the quantity");
    let prop = for_all(|order: &Order| i64::from(order.discount) <= i64::from(order.quantity));
    match prop.check(&Config::default()) {
        Ok(()) => println!("✓ no counterexample found"),
        Err(error) => println!("{error}"),
    }
}

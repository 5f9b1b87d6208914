use linq_rs::compare::{natural, partial};
use linq_rs::prelude::*;
use std::thread;

#[derive(Debug, Clone)]
struct Customer {
    id: u32,
    name: &'static str,
}

#[derive(Debug, Clone)]
struct Order {
    customer_id: u32,
    item: &'static str,
    amount: f64,
}

/// Walks through a small order book: joins, grouping, ordering and a
/// channel hand-off to a consumer thread.
///
/// Usage: cargo run --example orders
fn main() {
    let customers = from_vec(vec![
        Customer { id: 1, name: "Ada" },
        Customer { id: 2, name: "Grace" },
        Customer { id: 3, name: "Linus" },
    ]);

    let orders = from_vec(vec![
        Order { customer_id: 1, item: "keyboard", amount: 49.0 },
        Order { customer_id: 2, item: "monitor", amount: 199.5 },
        Order { customer_id: 1, item: "mouse", amount: 19.99 },
        Order { customer_id: 2, item: "cable", amount: 4.5 },
        Order { customer_id: 1, item: "desk", amount: 310.0 },
    ]);

    println!("=== Orders by customer ===");
    let lines = customers.by_ref().join(
        orders.by_ref(),
        |c| c.id,
        |o| o.customer_id,
        |c, o| format!("{:<6} {:<10} {:>8.2}", c.name, o.item, o.amount),
    );
    lines.for_each(|line| println!("{line}"));

    println!("\n=== Totals (customers without orders included) ===");
    let totals = customers
        .by_ref()
        .group_join(
            orders.by_ref(),
            |c| c.id,
            |o| o.customer_id,
            |c, orders| (c.name, orders.iter().map(|o| o.amount).sum::<f64>()),
        )
        .order_by_descending(|(_, total)| *total, partial)
        .then_by(|(name, _)| *name, natural);
    totals.for_each(|(name, total)| println!("{name:<6} {total:>8.2}"));

    println!("\n=== Order statistics ===");
    let amounts = orders.by_ref().select(|o| o.amount);
    println!("Orders: {}", amounts.count());
    println!("Average: {:.2}", amounts.average());
    if let Some(largest) = amounts.max(partial) {
        println!("Largest: {largest:.2}");
    }
    match orders.by_ref().try_single_with(|o| o.amount > 300.0) {
        Ok(order) => println!("Only order over 300: {}", order.item),
        Err(err) => println!("No unique order over 300: {err}"),
    }

    println!("\n=== Items per customer id ===");
    let groups = orders
        .by_ref()
        .group_by(|o| o.customer_id, |o| o.item)
        .order_by(|g| g.key, natural);
    groups.for_each(|g| println!("{}: {}", g.key, g.values.join(", ")));

    println!("\n=== Streaming through a channel ===");
    let (tx, rx) = crossbeam_channel::bounded(2);
    let consumer = thread::spawn(move || {
        from_channel(rx)
            .filter(|item: &String| item.len() > 5)
            .to_vec()
    });
    orders.by_ref().select(|o| o.item.to_string()).to_channel(tx);
    match consumer.join() {
        Ok(long_names) => println!("Long item names: {}", long_names.join(", ")),
        Err(_) => eprintln!("Consumer thread panicked"),
    }
}

//! Basic single-owner usage: ordering, ties, end adds and frequency queries.
//!
//! Run with: `cargo run --example basic_depq`

use depq::{DepqCore, DepqError};

fn main() -> Result<(), DepqError> {
    let mut tasks: DepqCore<&str, u32> = DepqCore::with_start(10);

    tasks.insert("write report", 5);
    tasks.insert("reply to mail", 3);
    tasks.insert("water plants", 3);
    tasks.insert("archive logs", 1);
    tasks.add_first("fix outage", Some(100))?;
    tasks.add_last("tidy desk", None)?;

    println!("queue: {}", tasks);
    println!("most urgent: {} ({})", tasks.first()?, tasks.high()?);
    println!("least urgent: {} ({})", tasks.last()?, tasks.low()?);
    println!("third in line: {:?}", tasks.get(2)?);

    if let Err(err) = tasks.add_first("too low", Some(0)) {
        println!("add_first rejected: {}", err);
    }

    tasks.insert("reply to mail", 2);
    println!("'reply to mail' queued {} times", tasks.count(&"reply to mail"));
    let removed = tasks.elim(&"reply to mail");
    println!("removed {:?}", removed);

    while let Ok((task, priority)) = tasks.pop_first() {
        println!("doing {} ({})", task, priority);
    }
    Ok(())
}

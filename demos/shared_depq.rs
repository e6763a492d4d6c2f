//! Several threads feeding and draining one shared queue.
//!
//! Run with: `cargo run --example shared_depq`

use std::sync::Arc;
use std::thread;

use depq::Depq;

fn main() {
    let jobs: Arc<Depq<String, u8>> = Arc::new(Depq::new());

    let producers: Vec<_> = (0..4)
        .map(|worker| {
            let jobs = Arc::clone(&jobs);
            thread::spawn(move || {
                for n in 0..25u8 {
                    jobs.insert(format!("job-{}-{}", worker, n), n % 10);
                }
            })
        })
        .collect();
    for producer in producers {
        let _ = producer.join();
    }
    println!("{} jobs queued, invariants ok: {}", jobs.len(), jobs.check_invariants().is_ok());

    let consumers: Vec<_> = (0..2)
        .map(|side| {
            let jobs = Arc::clone(&jobs);
            thread::spawn(move || {
                let mut done = 0;
                loop {
                    let next = if side == 0 { jobs.pop_first() } else { jobs.pop_last() };
                    match next {
                        Ok(_) => done += 1,
                        Err(_) => break done,
                    }
                }
            })
        })
        .collect();
    for (side, consumer) in consumers.into_iter().enumerate() {
        let done = consumer.join().unwrap_or(0);
        let end = if side == 0 { "high" } else { "low" };
        println!("{} end consumer handled {} jobs", end, done);
    }
}

//! Keeping only the best N scores with a bounded queue.
//!
//! Run with: `cargo run --example bounded_depq`

use depq::builder::DepqBuilder;
use depq::Depq;

fn main() {
    let leaderboard: Depq<&str, u32> = DepqBuilder::new(0).max_len(3).capacity(8).build();

    for (player, score) in [("ana", 120), ("bo", 75), ("cy", 310), ("di", 90), ("ed", 205)] {
        match leaderboard.insert(player, score) {
            Some((dropped, dropped_score)) => {
                println!("{} ({}) entered, {} ({}) fell off", player, score, dropped, dropped_score)
            },
            None => println!("{} ({}) entered", player, score),
        }
    }

    println!("top three: {}", leaderboard);

    let evicted = leaderboard.set_max_len(Some(1));
    println!("shrunk to one, evicted {:?}", evicted);
    println!("champion: {:?}", leaderboard.first());
}

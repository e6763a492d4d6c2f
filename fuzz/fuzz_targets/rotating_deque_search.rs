#![no_main]

use depq::ds::RotatingDeque;
use libfuzzer_sys::fuzz_target;

// Fuzz rotation-aware search and placement against slice equivalents
//
// Builds a sorted sequence from the input, then checks partition points and
// rotating inserts agree with Vec::partition_point / Vec::insert.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split = (data[0] as usize) % data.len();
    let mut sorted: Vec<u8> = data[1..=split.min(data.len() - 1)].to_vec();
    sorted.sort_unstable();

    let mut deque = RotatingDeque::from_vec(sorted.clone());
    for &probe in &data[split..] {
        let (index, stats) = deque.partition_point_rotating(|&value| value <= probe);
        assert_eq!(index, sorted.partition_point(|&value| value <= probe));
        assert!(stats.travelled <= 2 * sorted.len() as u64);

        deque.insert_rotating(index, probe);
        sorted.insert(index, probe);
        assert!(deque.iter().eq(sorted.iter()));
    }
});

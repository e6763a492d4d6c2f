#![no_main]

use depq::DepqCore;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on DepqCore
//
// Random inserts, end adds, pops, removals and bound changes, checking the
// ordering and frequency-index invariants after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let mut queue: DepqCore<u8, i8> = DepqCore::with_start(data[0] as i8);

    let mut idx = 1;
    while idx + 2 < data.len() {
        let op = data[idx] % 10;
        let item = data[idx + 1] % 32;
        let priority = data[idx + 2] as i8;
        let len_before = queue.len();

        match op {
            0..=2 => {
                queue.insert(item, priority);
            }
            3 => {
                let high = queue.high().copied().ok();
                let result = queue.add_first(item, Some(priority));
                if high.is_some_and(|high| priority < high) {
                    assert!(result.is_err());
                    assert_eq!(queue.len(), len_before);
                }
            }
            4 => {
                let low = queue.low().copied().ok();
                let result = queue.add_last(item, Some(priority));
                if low.is_some_and(|low| priority > low) {
                    assert!(result.is_err());
                    assert_eq!(queue.len(), len_before);
                }
            }
            5 => {
                if let Ok((_, popped)) = queue.pop_first() {
                    if let Ok(high) = queue.high() {
                        assert!(*high <= popped);
                    }
                }
            }
            6 => {
                if let Ok((_, popped)) = queue.pop_last() {
                    if let Ok(low) = queue.low() {
                        assert!(*low >= popped);
                    }
                }
            }
            7 => {
                let before = queue.count(&item);
                let removed = queue.remove(&item, (priority % 4) as isize);
                assert_eq!(queue.count(&item), before - removed.len());
            }
            8 => {
                let bound = (priority as u8 % 40) as usize;
                queue.set_max_len(if bound == 0 { None } else { Some(bound) });
            }
            9 => {
                let _ = queue.set_priority(item, priority);
            }
            _ => unreachable!(),
        }

        // Validate invariants after each operation
        queue.check_invariants().unwrap();

        if let Some(max_len) = queue.max_len() {
            assert!(queue.len() <= max_len);
        }

        idx += 3;
    }
});

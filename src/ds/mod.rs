pub mod frequency_index;
pub mod rotating_deque;

pub use frequency_index::FrequencyIndex;
pub use rotating_deque::{LINEAR_SCAN_WINDOW, RotatingDeque, RotationCursor, SearchStats};

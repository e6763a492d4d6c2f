pub use crate::builder::DepqBuilder;
pub use crate::depq::{Depq, DepqCore};
pub use crate::error::{DepqError, InvariantError};
pub use crate::export::Snapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{
    DepqMetricsReadRecorder, DepqMetricsRecorder, MetricsExporter, MetricsReset,
    MetricsSnapshotProvider,
};
pub use crate::traits::{ByDisplay, ByValue, KeyPolicy};

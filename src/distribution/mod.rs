//! Task distribution oracle: where tasks appear, where they go, what they pay.

mod error;
mod table;
mod task;
mod traits;

pub use error::DistributionError;
pub use table::{DistributionConfig, TableDistribution};
pub use task::{sample_task, Task};
pub use traits::TaskDistribution;

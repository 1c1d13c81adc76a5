pub mod history;
pub mod model;
pub mod series;

pub use history::{DEFAULT_HISTORY_LEN, HistoryStore};
pub use model::{Metric, PowerStatus, SampleFrame, SystemSummary};
pub use series::MetricSeries;

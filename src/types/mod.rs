pub mod dataset;

pub use dataset::{ColumnData, Dataset, DatasetColumn};

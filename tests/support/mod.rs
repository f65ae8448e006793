pub mod osrm_dataset;

pub use osrm_dataset::{OsrmDataset, Region};

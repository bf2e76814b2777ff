//! Data module - CSV loading and reshaping

mod loader;
pub mod model;
mod reshaper;

pub use loader::{DataLoader, LoaderError};
pub use model::{LongTable, Record};
pub use reshaper::{DataReshaper, MeltedRow, ReshapeError};

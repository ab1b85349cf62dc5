//! Matrix module: dense storage helpers and the Matrix Market reader.

pub mod dense;
pub use dense::DenseMatrix;
pub mod market;
pub use market::{load_matrix_market, load_vector, read_matrix_market, MarketError};

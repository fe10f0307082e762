pub mod error;
pub mod grid;
pub mod remote;
pub mod services;
pub mod traits;

pub use error::FetchError;
pub use grid::{GridCell, GridRow, QuoteGrid};
pub use services::grid_fetcher::GridFetcher;
pub use traits::QuoteSource;

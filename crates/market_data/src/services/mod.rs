pub mod grid_fetcher;

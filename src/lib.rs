pub mod dataset;
pub mod export;
pub mod fixtures;
pub mod form;
pub mod overall;
pub mod standings;
pub mod state;
pub mod store;

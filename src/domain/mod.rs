mod collection;
pub mod models;
mod progress;

pub use collection::SeasonCollection;
pub use models::*;
pub use progress::FetchProgress;

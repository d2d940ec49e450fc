// Storage operation traits and implementations
pub mod bucket;
pub mod delete;
pub mod read;
pub mod rename;
pub mod stat;
pub mod store;
pub mod upload;
pub mod usage;

pub use delete::Deleter;
pub use read::FileReader;
pub use rename::Renamer;
pub use stat::Stater;
pub use upload::Uploader;
pub use usage::UsageCalculator;

pub mod config;
pub mod middleware;
pub mod options;
pub mod types;


pub use config::*;
pub use middleware::*;
pub use options::*;
pub use types::*;

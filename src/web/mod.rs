pub mod api;
pub mod api_doc;
pub mod dataset;
pub mod server;

pub use dataset::Dataset;
pub use server::run_server;

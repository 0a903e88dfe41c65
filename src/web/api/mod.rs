pub mod error;
pub mod vessels;

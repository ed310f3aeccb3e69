pub mod build;
pub mod capture;

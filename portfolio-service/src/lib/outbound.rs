pub mod pricing;
pub mod repositories;

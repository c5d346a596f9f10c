pub mod application;
pub mod dashboard;
pub mod error;
pub mod livestock;
pub mod lot;
pub mod product;

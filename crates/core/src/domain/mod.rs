pub mod laptop;
pub mod query;

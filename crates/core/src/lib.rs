pub mod catalog;
pub mod config;
pub mod context;
pub mod domain;
pub mod engine;
pub mod errors;

pub use catalog::{load_catalog, parse_catalog, Catalog, CatalogError, LoadReport, SourceState};
pub use context::AppContext;
pub use domain::laptop::{LaptopRecord, Quantity, RecordError};
pub use domain::query::{Recommendation, RecommendationQuery};
pub use engine::{EngineError, TOP_N};
pub use errors::{ApplicationError, InterfaceError, ValidationError};

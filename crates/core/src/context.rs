use std::sync::Arc;

use crate::catalog::Catalog;
use crate::domain::query::{Recommendation, RecommendationQuery};
use crate::engine;
use crate::errors::ApplicationError;

/// Startup-built state every request reads from. Cloning shares the catalog.
#[derive(Clone, Debug, Default)]
pub struct AppContext {
    catalog: Arc<Catalog>,
}

impl AppContext {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog: Arc::new(catalog) }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn recommend(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Recommendation, ApplicationError> {
        if self.catalog.is_empty() {
            return Err(ApplicationError::DataUnavailable("catalog has no records".to_string()));
        }

        Ok(engine::query(&self.catalog, query)?)
    }
}

#[cfg(test)]
mod tests {
    use super::AppContext;
    use crate::catalog::Catalog;
    use crate::domain::laptop::LaptopRecord;
    use crate::domain::query::RecommendationQuery;
    use crate::errors::ApplicationError;

    #[test]
    fn empty_catalog_is_data_unavailable() {
        let context = AppContext::new(Catalog::default());
        let query = RecommendationQuery::new(75_000, "Gaming").expect("valid query");

        assert!(matches!(context.recommend(&query), Err(ApplicationError::DataUnavailable(_))));
    }

    #[test]
    fn zero_price_record_surfaces_as_computation_error() {
        let record = LaptopRecord::new("Free", 0.0, 8.0, 256.0, "gaming");
        let context = AppContext::new(Catalog::new(vec![record]));
        let query = RecommendationQuery::new(75_000, "gaming").expect("valid query");

        assert!(matches!(context.recommend(&query), Err(ApplicationError::Computation(_))));
    }

    #[test]
    fn clones_share_one_catalog() {
        let context =
            AppContext::new(Catalog::new(vec![LaptopRecord::new("A", 1.0, 1.0, 1.0, "x")]));
        let clone = context.clone();

        assert!(std::ptr::eq(context.catalog(), clone.catalog()));
    }
}

//! Recommendation engine: budget/use-case filtering and value ranking.
//!
//! Everything here is a pure function of its inputs. The catalog is only ever
//! borrowed, so concurrent requests can share one `Arc<Catalog>` without locks.

use thiserror::Error;

use crate::catalog::Catalog;
use crate::domain::laptop::LaptopRecord;
use crate::domain::query::{Recommendation, RecommendationQuery};

/// Maximum number of laptops returned by a query.
pub const TOP_N: usize = 5;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("laptop `{name}` has non-positive price {price}")]
    InvalidPrice { name: String, price: f64 },
    #[error("value score for laptop `{name}` is not a finite number")]
    NonFiniteScore { name: String },
}

/// Keeps records priced within `budget` whose use case equals `use_case`
/// ignoring case. Input order is preserved.
pub fn filter<'a, I>(records: I, budget: u64, use_case: &str) -> Vec<&'a LaptopRecord>
where
    I: IntoIterator<Item = &'a LaptopRecord>,
{
    let budget = budget as f64;
    let use_case = use_case.to_lowercase();

    records
        .into_iter()
        .filter(|record| record.price.value() <= budget && record.matches_use_case(&use_case))
        .collect()
}

/// `(ram + storage / 100) / price`
pub fn value_score(record: &LaptopRecord) -> Result<f64, EngineError> {
    let price = record.price.value();
    if !(price.is_finite() && price > 0.0) {
        return Err(EngineError::InvalidPrice { name: record.name.clone(), price });
    }

    let score = (record.ram.value() + record.storage.value() / 100.0) / price;
    if !score.is_finite() {
        return Err(EngineError::NonFiniteScore { name: record.name.clone() });
    }

    Ok(score)
}

/// Sorts by value score, best first. Equal scores keep their input order so
/// results are reproducible.
pub fn rank<'a>(records: Vec<&'a LaptopRecord>) -> Result<Vec<&'a LaptopRecord>, EngineError> {
    let mut scored = records
        .into_iter()
        .map(|record| value_score(record).map(|score| (score, record)))
        .collect::<Result<Vec<_>, _>>()?;

    // sort_by is stable
    scored.sort_by(|(left, _), (right, _)| right.total_cmp(left));

    Ok(scored.into_iter().map(|(_, record)| record).collect())
}

pub fn query(
    catalog: &Catalog,
    request: &RecommendationQuery,
) -> Result<Recommendation, EngineError> {
    let matches = filter(catalog.records(), request.budget(), request.use_case());
    let total_matches = matches.len();

    let laptops = rank(matches)?.into_iter().take(TOP_N).cloned().collect();

    Ok(Recommendation::new(request, total_matches, laptops))
}

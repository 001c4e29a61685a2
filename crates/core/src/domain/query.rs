use serde::Serialize;

use crate::domain::laptop::LaptopRecord;
use crate::errors::ValidationError;

/// A validated recommendation request. Built per call and never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecommendationQuery {
    budget: u64,
    use_case: String,
}

impl RecommendationQuery {
    pub fn new(budget: i64, use_case: impl Into<String>) -> Result<Self, ValidationError> {
        let use_case = use_case.into();
        if use_case.trim().is_empty() {
            return Err(ValidationError::MissingParameters);
        }

        let budget = u64::try_from(budget)
            .ok()
            .filter(|budget| *budget > 0)
            .ok_or(ValidationError::NonPositiveBudget)?;

        Ok(Self { budget, use_case })
    }

    /// Builds a query from raw request parameters. A budget that is not an
    /// integer counts as absent, the same as a missing key. Integers too large
    /// for `u64` saturate; any negative integer is non-positive.
    pub fn from_params(
        budget: Option<&str>,
        use_case: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let budget = budget.and_then(parse_budget);
        let use_case = use_case.filter(|raw| !raw.trim().is_empty());

        match (budget, use_case) {
            (Some(RawBudget::Positive(budget)), Some(use_case)) => {
                Ok(Self { budget, use_case: use_case.to_string() })
            }
            (Some(RawBudget::NonPositive), Some(_)) => Err(ValidationError::NonPositiveBudget),
            _ => Err(ValidationError::MissingParameters),
        }
    }

    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn use_case(&self) -> &str {
        &self.use_case
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RawBudget {
    NonPositive,
    Positive(u64),
}

/// Accepts an optionally signed run of ASCII digits of any length.
fn parse_budget(raw: &str) -> Option<RawBudget> {
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    if negative || digits.bytes().all(|byte| byte == b'0') {
        return Some(RawBudget::NonPositive);
    }

    // only overflow can fail here
    Some(RawBudget::Positive(digits.parse::<u64>().unwrap_or(u64::MAX)))
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(skip)]
    pub total_matches: usize,
    pub message: String,
    pub laptops: Vec<LaptopRecord>,
}

impl Recommendation {
    pub fn new(
        query: &RecommendationQuery,
        total_matches: usize,
        laptops: Vec<LaptopRecord>,
    ) -> Self {
        let message = if total_matches == 0 {
            format!(
                "No laptops found for budget {} and use case '{}'",
                query.budget(),
                query.use_case()
            )
        } else {
            format!("Found {total_matches} laptops matching your criteria")
        };

        Self { total_matches, message, laptops }
    }
}

use laprec_core::config::{AppConfig, LoadOptions};
use laprec_core::engine::value_score;
use laprec_core::{
    load_catalog, AppContext, ApplicationError, Recommendation, RecommendationQuery,
};

use super::{escape_json, CommandResult};

const COMMAND: &str = "recommend";

pub fn run(
    options: LoadOptions,
    budget: i64,
    use_case: &str,
    json_output: bool,
) -> CommandResult {
    match AppConfig::load(options) {
        Ok(config) => run_with_config(&config, budget, use_case, json_output),
        Err(error) => CommandResult::failure(COMMAND, "config_validation", error.to_string(), 2),
    }
}

pub fn run_with_config(
    config: &AppConfig,
    budget: i64,
    use_case: &str,
    json_output: bool,
) -> CommandResult {
    let query = match RecommendationQuery::new(budget, use_case) {
        Ok(query) => query,
        Err(error) => return failure(ApplicationError::from(error)),
    };

    let report = match load_catalog(&config.catalog.path) {
        Ok(report) => report,
        Err(error) => {
            return CommandResult::failure(COMMAND, "catalog_parse", error.to_string(), 3);
        }
    };

    match AppContext::new(report.catalog).recommend(&query) {
        Ok(recommendation) if json_output => {
            CommandResult { exit_code: 0, output: render_json(&recommendation) }
        }
        Ok(recommendation) => CommandResult { exit_code: 0, output: render_table(&recommendation) },
        Err(error) => failure(error),
    }
}

fn failure(error: ApplicationError) -> CommandResult {
    let (error_class, exit_code) = match &error {
        ApplicationError::Validation(_) => ("validation", 2),
        ApplicationError::DataUnavailable(_) => ("data_unavailable", 3),
        ApplicationError::Computation(_) => ("computation", 4),
    };
    let interface = error.into_interface("cli");
    CommandResult::failure(COMMAND, error_class, interface.message(), exit_code)
}

fn render_json(recommendation: &Recommendation) -> String {
    serde_json::to_string_pretty(recommendation).unwrap_or_else(|error| {
        format!("{{\"error\":\"{}\"}}", escape_json(&error.to_string()))
    })
}

fn render_table(recommendation: &Recommendation) -> String {
    let mut lines = vec![recommendation.message.clone()];

    for (rank, laptop) in recommendation.laptops.iter().enumerate() {
        let score = value_score(laptop)
            .map(|score| format!("{score:.6}"))
            .unwrap_or_else(|_| "n/a".to_string());
        lines.push(format!(
            "{:>2}. {} | price {} | ram {} | storage {} | {} | value {score}",
            rank + 1,
            laptop.name,
            laptop.price,
            laptop.ram,
            laptop.storage,
            laptop.use_case,
        ));
    }

    lines.join("\n")
}

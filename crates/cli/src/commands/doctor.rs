use laprec_core::config::{AppConfig, LoadOptions};
use laprec_core::{load_catalog, LoadReport, SourceState};
use serde::Serialize;

use super::{escape_json, CommandResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(options: LoadOptions, json_output: bool) -> CommandResult {
    let report = build_report(options);
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { 1 };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report(options: LoadOptions) -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(options) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.extend(check_catalog(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(skipped("catalog_source", "configuration did not load"));
            checks.push(skipped("catalog_records", "configuration did not load"));
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_catalog(config: &AppConfig) -> [DoctorCheck; 2] {
    let path = config.catalog.path.display().to_string();

    let report = match load_catalog(&config.catalog.path) {
        Ok(report) => report,
        Err(error) => {
            return [
                DoctorCheck {
                    name: "catalog_source",
                    status: CheckStatus::Fail,
                    details: error.to_string(),
                },
                skipped("catalog_records", "catalog did not parse"),
            ];
        }
    };

    let source = match &report.state {
        SourceState::Loaded => DoctorCheck {
            name: "catalog_source",
            status: CheckStatus::Pass,
            details: format!("read `{path}`"),
        },
        SourceState::Missing => DoctorCheck {
            name: "catalog_source",
            status: CheckStatus::Fail,
            details: format!("`{path}` does not exist"),
        },
        SourceState::Unreadable { reason } => DoctorCheck {
            name: "catalog_source",
            status: CheckStatus::Fail,
            details: format!("`{path}` could not be read: {reason}"),
        },
    };

    [source, check_records(&report)]
}

fn check_records(report: &LoadReport) -> DoctorCheck {
    let loaded = report.catalog.len();
    let mut details = format!("{loaded} records loaded, {} skipped", report.skipped.len());
    for entry in &report.skipped {
        details.push_str(&format!("; #{}: {}", entry.index, entry.reason));
    }

    DoctorCheck {
        name: "catalog_records",
        status: if loaded > 0 { CheckStatus::Pass } else { CheckStatus::Fail },
        details,
    }
}

fn skipped(name: &'static str, reason: &str) -> DoctorCheck {
    DoctorCheck { name, status: CheckStatus::Skipped, details: format!("skipped because {reason}") }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

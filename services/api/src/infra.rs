use carbon_market::error::InputError;
use carbon_market::workflows::eligibility::ProjectEligibilityInput;
use clap::ValueEnum;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectPayload {
    Many(Vec<ProjectEligibilityInput>),
    One(Box<ProjectEligibilityInput>),
}

/// Parses either a single project object or an array of them.
pub(crate) fn parse_projects(raw: &str) -> Result<Vec<ProjectEligibilityInput>, InputError> {
    let payload: ProjectPayload = serde_json::from_str(raw)?;
    Ok(match payload {
        ProjectPayload::Many(projects) => projects,
        ProjectPayload::One(project) => vec![*project],
    })
}

/// Reads projects from a file, or from stdin when the path is `-`.
pub(crate) fn read_projects(path: &Path) -> Result<Vec<ProjectEligibilityInput>, InputError> {
    let mut raw = String::new();
    let result = if path == Path::new("-") {
        std::io::stdin().read_to_string(&mut raw).map(|_| ())
    } else {
        std::fs::read_to_string(path).map(|contents| raw = contents)
    };

    result.map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_projects(&raw)
}

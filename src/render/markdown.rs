use std::sync::OnceLock;

use minijinja::{Environment, context};

use crate::entities::drug::{DrugInfo, SearchOutcome};
use crate::error::DawaError;

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

const OPENFDA_LABEL_DOCS: &str = "https://open.fda.gov/apis/drug/label/";

fn env() -> Result<&'static Environment<'static>, DawaError> {
    if let Some(env) = ENV.get() {
        return Ok(env);
    }

    let mut env = Environment::new();
    env.add_template("drug.md.j2", include_str!("../../templates/drug.md.j2"))?;

    Ok(ENV.get_or_init(|| env))
}

fn append_source_footer(mut body: String) -> String {
    if !body.ends_with('\n') {
        body.push('\n');
    }
    body.push_str(&format!("\n---\nSource: openFDA drug labels ({OPENFDA_LABEL_DOCS})\n"));
    body
}

pub fn drug_markdown(info: &DrugInfo) -> Result<String, DawaError> {
    let tmpl = env()?.get_template("drug.md.j2")?;
    let body = tmpl.render(context! {
        name => &info.name,
        benefits => &info.benefits,
        side_effects => &info.side_effects,
        dosage => &info.dosage,
        when_to_take => &info.when_to_take,
    })?;
    Ok(append_source_footer(body))
}

/// Renders a label, or the one-line status when there is none.
pub fn outcome_markdown(outcome: &SearchOutcome) -> Result<String, DawaError> {
    match outcome {
        SearchOutcome::Found(info) => drug_markdown(info),
        other => Ok(other.status_message().unwrap_or_default().to_string()),
    }
}

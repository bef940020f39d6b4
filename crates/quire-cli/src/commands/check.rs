//! Ad-hoc policy evaluation.

use std::process::ExitCode;

use anyhow::Result;
use quire_abac::{Decision, MaterialAttributes, Resource, Subject, evaluate};
use quire_config::{OutputFormat, QuireConfig};
use quire_types::Action;
use serde::Serialize;

use crate::RequestArgs;
use crate::table::{styled_table, verdict_cell};

/// Exit status reported when the decision is a denial.
const DENIED: u8 = 2;

fn snapshot(request: &RequestArgs) -> (Subject, Resource) {
    let subject = Subject::new(
        request.user.as_str(),
        request.role,
        request.department.as_str(),
        request.level,
    );
    let material = MaterialAttributes::new(
        "cli",
        request.material_department.as_str(),
        request.material_level,
        request.visibility,
    );
    (subject, Resource::Material(material))
}

/// Evaluates one request and prints the decision.
pub fn run(
    request: &RequestArgs,
    action: Action,
    json: bool,
    config: &QuireConfig,
) -> Result<ExitCode> {
    let (subject, resource) = snapshot(request);
    let decision = evaluate(&subject, action, &resource);

    if json || config.output.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    } else {
        let verdict = if decision.allowed { "ALLOW" } else { "DENY" };
        println!("{verdict}: {}", decision.reason);
    }

    Ok(exit_code(&decision))
}

#[derive(Serialize)]
struct MatrixRow {
    action: Action,
    #[serde(flatten)]
    decision: Decision,
}

/// Evaluates every action against the same snapshots.
pub fn matrix(request: &RequestArgs, json: bool, config: &QuireConfig) -> Result<ExitCode> {
    let (subject, resource) = snapshot(request);
    let rows: Vec<MatrixRow> = Action::ALL
        .into_iter()
        .map(|action| MatrixRow {
            action,
            decision: evaluate(&subject, action, &resource),
        })
        .collect();

    if json || config.output.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(ExitCode::SUCCESS);
    }

    let mut table = styled_table(&["Action", "Decision", "Reason"]);
    for row in &rows {
        table.add_row(vec![
            comfy_table::Cell::new(row.action),
            verdict_cell(row.decision.allowed),
            comfy_table::Cell::new(&row.decision.reason),
        ]);
    }
    println!("{table}");

    Ok(ExitCode::SUCCESS)
}

fn exit_code(decision: &Decision) -> ExitCode {
    if decision.allowed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(DENIED)
    }
}

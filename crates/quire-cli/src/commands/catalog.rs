//! Browse a seeded catalog through the policy gate.

use std::process::ExitCode;

use anyhow::{Context, Result};
use comfy_table::Cell;
use quire_catalog::{GateError, MaterialView, Seed, SeededLibrary};
use quire_config::{OutputFormat, QuireConfig};
use quire_types::DepartmentId;
use tracing::debug;

use crate::CatalogArgs;
use crate::table::{styled_table, verdict_cell};

const DENIED: u8 = 2;

fn open(args: &CatalogArgs, config: &QuireConfig) -> Result<SeededLibrary> {
    let seed = match args.seed.as_ref().or(config.catalog.seed.as_ref()) {
        Some(path) => {
            debug!(path = %path.display(), "loading seed file");
            Seed::from_path(path)
                .with_context(|| format!("Failed to read seed {}", path.display()))?
        }
        None => {
            debug!("no seed file configured, using bootstrap set");
            Seed::bootstrap()
        }
    };
    seed.load().context("Failed to load seed into catalog")
}

fn wants_json(args: &CatalogArgs, config: &QuireConfig) -> bool {
    args.json || config.output.format == OutputFormat::Json
}

/// Lists the user's shelf.
pub fn shelf(args: &CatalogArgs, config: &QuireConfig) -> Result<ExitCode> {
    let library = open(args, config)?;
    let subject = library.directory.authenticate(Some(args.user.as_str()))?;
    let views = library.gate.shelf(&subject)?;

    if wants_json(args, config) {
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        print_views(&views);
    }
    Ok(ExitCode::SUCCESS)
}

/// Lists a department library, grouped by level.
pub fn library(
    args: &CatalogArgs,
    department: Option<&str>,
    config: &QuireConfig,
) -> Result<ExitCode> {
    let library = open(args, config)?;
    let subject = library.directory.authenticate(Some(args.user.as_str()))?;
    let department = department.map_or_else(|| subject.department.clone(), DepartmentId::new);

    let grouped = match library.gate.department_library(&subject, &department) {
        Ok(grouped) => grouped,
        Err(GateError::Forbidden { reason }) => {
            eprintln!("DENY: {reason}");
            return Ok(ExitCode::from(DENIED));
        }
        Err(other) => return Err(other.into()),
    };

    if wants_json(args, config) {
        println!("{}", serde_json::to_string_pretty(&grouped)?);
        return Ok(ExitCode::SUCCESS);
    }

    if grouped.is_empty() {
        println!("No materials in {department}.");
        return Ok(ExitCode::SUCCESS);
    }
    for (level, views) in &grouped.levels {
        println!("Level {level}");
        print_views(views);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_views(views: &[MaterialView]) {
    if views.is_empty() {
        println!("No materials.");
        return;
    }

    let mut table = styled_table(&["ID", "Title", "Course", "Level", "Visibility", "Download"]);
    for view in views {
        table.add_row(vec![
            Cell::new(&view.id),
            Cell::new(&view.title),
            Cell::new(&view.course_code),
            Cell::new(view.level),
            Cell::new(view.visibility),
            verdict_cell(view.download_allowed),
        ]);
    }
    println!("{table}");
}

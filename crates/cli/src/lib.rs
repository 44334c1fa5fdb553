//! Offline tooling over a JSON store file (the format written by the file
//! persistence backend): integrity scan, repair and static export.
//!
//! Each command prints a human summary to stdout and returns an
//! [`Outcome`]; `main` turns that into the process exit code.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde_json::Value;
use wirekit_core::integrity::{repair_document, scan_document, IntegrityReport};
use wirekit_core::model::display::slugify;
use wirekit_core::persistence::StoreSnapshot;
use wirekit_export::{
    export_project, EmbeddedStylesheet, ExportContext, FileStylesheet, StylesheetProvider,
};

/// Result of a command that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    /// Issues were found (scan) or remain after repair.
    IssuesFound(usize),
    Repaired { fixed: usize, remaining: usize },
    Exported { path: PathBuf, bytes: usize },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        match self {
            Self::Clean | Self::Exported { .. } => true,
            Self::IssuesFound(_) => false,
            Self::Repaired { remaining, .. } => *remaining == 0,
        }
    }
}

fn read_document(path: &Path) -> Result<Value> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn print_report(report: &IntegrityReport) {
    for issue in &report.issues {
        println!("{}: {}", issue.path, issue.message);
    }
}

// ---------------------------------------------------------------------------
// scan
// ---------------------------------------------------------------------------

pub fn scan_command(store: &Path, as_json: bool) -> Result<Outcome> {
    let document = read_document(store)?;
    let report = scan_document(&document);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_clean() {
        println!("{}: no issues found", store.display());
    } else {
        print_report(&report);
        println!(
            "{} issue(s), {} repairable",
            report.issues.len(),
            report.repairable_count()
        );
    }

    Ok(match report.issues.len() {
        0 => Outcome::Clean,
        n => Outcome::IssuesFound(n),
    })
}

// ---------------------------------------------------------------------------
// repair
// ---------------------------------------------------------------------------

pub fn repair_command(store: &Path, output: Option<&Path>) -> Result<Outcome> {
    let mut document = read_document(store)?;
    let fixed = repair_document(&mut document);
    let remaining = scan_document(&document);

    let target = output.unwrap_or(store);
    let json = serde_json::to_vec_pretty(&document)?;
    fs::write(target, json).with_context(|| format!("writing {}", target.display()))?;

    tracing::info!(
        fixed = fixed.issues.len(),
        remaining = remaining.issues.len(),
        path = %target.display(),
        "Store repaired"
    );
    println!(
        "fixed {} issue(s), wrote {}",
        fixed.issues.len(),
        target.display()
    );
    if !remaining.is_clean() {
        println!("needs manual attention:");
        print_report(&remaining);
    }

    Ok(Outcome::Repaired {
        fixed: fixed.issues.len(),
        remaining: remaining.issues.len(),
    })
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

pub fn export_command(
    store: &Path,
    project_id: &str,
    output: Option<&Path>,
    stylesheet: Option<&Path>,
) -> Result<Outcome> {
    let document = read_document(store)?;
    let snapshot: StoreSnapshot = serde_json::from_value(document).with_context(|| {
        format!(
            "{} is not a valid store; run `wirekit scan` to find the problem",
            store.display()
        )
    })?;

    let Some(project) = snapshot.project(project_id) else {
        bail!("project {project_id} not found in {}", store.display());
    };
    let client_name = snapshot
        .client(&project.client_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "Unknown client".to_string());

    let provider: Box<dyn StylesheetProvider> = match stylesheet {
        Some(path) => Box::new(FileStylesheet::new([path.to_path_buf()])),
        None => Box::new(EmbeddedStylesheet),
    };
    let ctx = ExportContext {
        client_name,
        generated_at: Utc::now(),
    };
    let archive = export_project(project, &ctx, provider.as_ref())?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let stem = match slugify(&project.name) {
                stem if stem.is_empty() => "project".to_string(),
                stem => stem,
            };
            PathBuf::from(format!("{stem}-wireframes.zip"))
        }
    };
    fs::write(&path, &archive).with_context(|| format!("writing {}", path.display()))?;
    println!("exported {} to {}", project.name, path.display());

    Ok(Outcome::Exported {
        path,
        bytes: archive.len(),
    })
}

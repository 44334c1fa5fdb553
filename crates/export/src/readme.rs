use crate::pipeline::{ExportContext, ExportFailure, ExportFile};

pub const README_FILE_NAME: &str = "README.txt";

/// Plain-text guide listing every file in the archive.
pub fn readme(
    project_name: &str,
    ctx: &ExportContext,
    files: &[ExportFile],
    failures: &[ExportFailure],
) -> String {
    let mut out = format!(
        "Wireframe export: {project_name}\nClient: {}\nGenerated: {}\n\n",
        ctx.client_name,
        ctx.generated_at.format("%Y-%m-%d %H:%M UTC"),
    );

    let mut entries: Vec<(&str, &str)> = files
        .iter()
        .map(|f| (f.name.as_str(), f.title.as_str()))
        .collect();
    entries.push((README_FILE_NAME, "This file"));
    let width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0) + 4;

    out.push_str("Files\n-----\n");
    for (name, title) in entries {
        out.push_str(&format!("{name:<width$}{title}\n"));
    }

    out.push_str("\nOpen index.html in a web browser to start. Keep every file in the same folder.\n");

    if !failures.is_empty() {
        out.push_str("\nProblems\n--------\n");
        for failure in failures {
            let location = match &failure.component_id {
                Some(id) => format!("{} ({}), component {id}", failure.file, failure.page),
                None => format!("{} ({})", failure.file, failure.page),
            };
            out.push_str(&format!("- {location}: {}\n", failure.message));
        }
    }

    out
}

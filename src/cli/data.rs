//! taskly export, import and clear command implementations.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::Context;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::transfer::{ExportDocument, TransferDocument};

pub fn run_export(ctx: &Context, output: Option<PathBuf>) -> Result<()> {
    let (store, profile) = ctx.open_store()?;
    let export = ExportDocument::new(
        store.tasks().to_vec(),
        store.projects().to_vec(),
        &profile,
    );

    let path = output.unwrap_or_else(|| PathBuf::from(export.default_file_name()));
    let raw = serde_json::to_string_pretty(&export)?;
    std::fs::write(&path, raw).map_err(|_| Error::ExportWrite(path.clone()))?;

    #[derive(Serialize)]
    struct Data<'a> {
        path: &'a Path,
        tasks: usize,
        projects: usize,
    }

    let mut human = HumanOutput::new(format!("Exported to {}", path.display()));
    human.push_summary("tasks", export.tasks.len().to_string());
    human.push_summary("projects", export.projects.len().to_string());
    emit_success(
        ctx.output(),
        "export",
        &Data {
            path: &path,
            tasks: export.tasks.len(),
            projects: export.projects.len(),
        },
        Some(&human),
    )
}

pub fn run_import(ctx: &Context, file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)?;
    let transfer = TransferDocument::from_json_str(&raw)?;

    let (mut store, _) = ctx.open_store()?;
    let tasks = transfer.tasks.len();
    let projects = transfer.projects.len();
    store.import(transfer)?;

    #[derive(Serialize)]
    struct Data {
        tasks: usize,
        projects: usize,
        next_task_id: u64,
        next_project_id: u64,
    }

    let mut human = HumanOutput::new(format!("Imported {} task(s), {} project(s)", tasks, projects));
    human.push_summary("next task id", store.document().next_task_id.to_string());
    human.push_summary("next project id", store.document().next_project_id.to_string());
    emit_success(
        ctx.output(),
        "import",
        &Data {
            tasks,
            projects,
            next_task_id: store.document().next_task_id,
            next_project_id: store.document().next_project_id,
        },
        Some(&human),
    )
}

pub fn run_clear(ctx: &Context, yes: bool) -> Result<()> {
    if !yes {
        return Err(Error::InvalidInput(
            "clearing deletes all data; pass --yes to confirm".to_string(),
        ));
    }

    let (mut store, _) = ctx.open_store()?;
    store.clear_all()?;

    #[derive(Serialize)]
    struct Data {
        cleared: bool,
    }

    let human = HumanOutput::new("All data cleared");
    emit_success(ctx.output(), "clear", &Data { cleared: true }, Some(&human))
}

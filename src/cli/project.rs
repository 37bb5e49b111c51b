//! taskly project command implementations.

use serde::Serialize;

use crate::cli::{Context, ProjectCommands};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::stats;
use crate::store::NewProject;

pub fn run(ctx: &Context, command: ProjectCommands) -> Result<()> {
    match command {
        ProjectCommands::New {
            name,
            description,
            color,
        } => new(ctx, name, description, color),
        ProjectCommands::List => list(ctx),
        ProjectCommands::Rm { id } => remove(ctx, id),
    }
}

fn new(
    ctx: &Context,
    name: String,
    description: Option<String>,
    color: Option<String>,
) -> Result<()> {
    let (mut store, _) = ctx.open_store()?;
    let project = store.create_project(NewProject {
        name,
        description,
        color,
    })?;

    let mut human = HumanOutput::new(format!("Created project #{}: {}", project.id, project.name));
    human.push_summary("color", project.color.as_str());
    emit_success(ctx.output(), "project new", &project, Some(&human))
}

fn list(ctx: &Context) -> Result<()> {
    let (store, _) = ctx.open_store()?;

    #[derive(Serialize)]
    struct Entry<'a> {
        #[serde(flatten)]
        project: &'a crate::model::Project,
        task_count: usize,
    }

    let entries: Vec<Entry> = store
        .projects()
        .iter()
        .map(|project| Entry {
            project,
            task_count: stats::task_count_by_project(store.tasks(), project.id),
        })
        .collect();

    let mut human = HumanOutput::new(format!("{} project(s)", entries.len()));
    for entry in &entries {
        human.push_detail(format!(
            "#{} {} ({} task(s), {})",
            entry.project.id, entry.project.name, entry.task_count, entry.project.color
        ));
    }
    emit_success(ctx.output(), "project list", &entries, Some(&human))
}

fn remove(ctx: &Context, id: u64) -> Result<()> {
    let (mut store, _) = ctx.open_store()?;
    let outcome = store.delete_project(id)?;

    let mut human = HumanOutput::new(format!(
        "Deleted project #{}: {}",
        outcome.project.id, outcome.project.name
    ));
    human.push_summary("tasks kept but unassigned", outcome.unassigned_tasks.to_string());
    emit_success(ctx.output(), "project rm", &outcome, Some(&human))
}

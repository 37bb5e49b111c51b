//! taskly task command implementations.

use chrono::NaiveDate;

use crate::cli::{Context, TaskCommands};
use crate::error::{Error, Result};
use crate::model::{Priority, Task};
use crate::output::{emit_success, HumanOutput};
use crate::store::{NewTask, TaskPatch};

pub fn run(ctx: &Context, command: TaskCommands) -> Result<()> {
    match command {
        TaskCommands::Add {
            title,
            description,
            priority,
            due,
            project,
            label,
        } => add(ctx, title, description, &priority, due.as_deref(), project, label),
        TaskCommands::List { project, completed } => list(ctx, project, completed),
        TaskCommands::Done { id } => toggle(ctx, id, true),
        TaskCommands::DoneAll => done_all(ctx),
        TaskCommands::Reopen { id } => toggle(ctx, id, false),
        TaskCommands::Rename { id, title } => rename(ctx, id, &title),
        TaskCommands::Edit {
            id,
            title,
            description,
            priority,
            due,
            project,
            label,
        } => edit(ctx, id, title, description, priority, due, project, label),
        TaskCommands::Rm { id } => remove(ctx, id),
        TaskCommands::RmMany { ids } => remove_many(ctx, &ids),
    }
}

fn add(
    ctx: &Context,
    title: String,
    description: Option<String>,
    priority: &str,
    due: Option<&str>,
    project: Option<u64>,
    labels: Vec<String>,
) -> Result<()> {
    let (mut store, _) = ctx.open_store()?;
    let task = store.create_task(NewTask {
        title,
        description,
        priority: Priority::parse(priority)?,
        due_date: due.map(parse_due_date).transpose()?,
        project_id: project,
        labels,
    })?;

    let mut human = HumanOutput::new(format!("Created task #{}: {}", task.id, task.title));
    human.push_summary("priority", task.priority.as_str());
    if let Some(due) = task.due_date {
        human.push_summary("due", due.to_string());
    }
    if let Some(project_id) = task.project_id {
        human.push_summary("project", project_id.to_string());
    }
    emit_success(ctx.output(), "task add", &task, Some(&human))
}

fn list(ctx: &Context, project: Option<u64>, completed: bool) -> Result<()> {
    let (store, _) = ctx.open_store()?;
    if let Some(project_id) = project {
        if store.document().find_project(project_id).is_none() {
            return Err(Error::ProjectNotFound(project_id));
        }
    }

    let tasks: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|task| project.map(|id| task.project_id == Some(id)).unwrap_or(true))
        .filter(|task| !completed || task.is_completed())
        .collect();

    let mut human = HumanOutput::new(format!("{} task(s)", tasks.len()));
    for task in &tasks {
        human.push_detail(task_line(task));
    }
    emit_success(ctx.output(), "task list", &tasks, Some(&human))
}

fn toggle(ctx: &Context, id: u64, completed: bool) -> Result<()> {
    let (mut store, _) = ctx.open_store()?;
    let task = store.toggle_task_status(id, completed)?;

    let command = if completed { "task done" } else { "task reopen" };
    let verb = if completed { "Completed" } else { "Reopened" };
    let human = HumanOutput::new(format!("{verb} task #{}: {}", task.id, task.title));
    emit_success(ctx.output(), command, &task, Some(&human))
}

fn done_all(ctx: &Context) -> Result<()> {
    let (mut store, _) = ctx.open_store()?;
    let changed = store.complete_all_tasks()?;

    #[derive(serde::Serialize)]
    struct Data {
        completed: usize,
    }

    let human = HumanOutput::new(format!("Completed {changed} task(s)"));
    emit_success(
        ctx.output(),
        "task done-all",
        &Data { completed: changed },
        Some(&human),
    )
}

fn rename(ctx: &Context, id: u64, title: &str) -> Result<()> {
    let (mut store, _) = ctx.open_store()?;
    let task = store.rename_task(id, title)?;

    let human = HumanOutput::new(format!("Task #{} is now: {}", task.id, task.title));
    emit_success(ctx.output(), "task rename", &task, Some(&human))
}

#[allow(clippy::too_many_arguments)]
fn edit(
    ctx: &Context,
    id: u64,
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    due: Option<String>,
    project: Option<u64>,
    labels: Option<Vec<String>>,
) -> Result<()> {
    let patch = TaskPatch {
        title,
        description: description.map(|text| {
            if text.trim().is_empty() {
                None
            } else {
                Some(text)
            }
        }),
        priority: priority.as_deref().map(Priority::parse).transpose()?,
        due_date: due
            .map(|text| {
                if text.trim().is_empty() {
                    Ok(None)
                } else {
                    parse_due_date(&text).map(Some)
                }
            })
            .transpose()?,
        // project 0 means "unassign"
        project_id: project.map(|id| if id == 0 { None } else { Some(id) }),
        labels,
    };

    let (mut store, _) = ctx.open_store()?;
    let task = store.update_task(id, patch)?;

    let mut human = HumanOutput::new(format!("Updated task #{}: {}", task.id, task.title));
    human.push_summary("priority", task.priority.as_str());
    emit_success(ctx.output(), "task edit", &task, Some(&human))
}

fn remove(ctx: &Context, id: u64) -> Result<()> {
    let (mut store, _) = ctx.open_store()?;
    let task = store.delete_task(id)?;

    let human = HumanOutput::new(format!("Deleted task #{}: {}", task.id, task.title));
    emit_success(ctx.output(), "task rm", &task, Some(&human))
}

fn remove_many(ctx: &Context, ids: &[u64]) -> Result<()> {
    let (mut store, _) = ctx.open_store()?;
    let removed = store.bulk_delete_tasks(ids)?;

    #[derive(serde::Serialize)]
    struct Data {
        removed: usize,
        requested: usize,
    }

    let mut human = HumanOutput::new(format!("Deleted {removed} task(s)"));
    if removed < ids.len() {
        human.push_warning(format!("{} id(s) were not found", ids.len() - removed));
    }
    emit_success(
        ctx.output(),
        "task rm-many",
        &Data {
            removed,
            requested: ids.len(),
        },
        Some(&human),
    )
}

fn parse_due_date(input: &str) -> Result<NaiveDate> {
    input
        .trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("invalid due date (want YYYY-MM-DD): {input}")))
}

fn task_line(task: &Task) -> String {
    let mark = if task.is_completed() { "x" } else { " " };
    let mut line = format!("[{mark}] #{} {} ({})", task.id, task.title, task.priority.as_str());
    if let Some(due) = task.due_date {
        line.push_str(&format!(" due {due}"));
    }
    if let Some(project_id) = task.project_id {
        line.push_str(&format!(" project {project_id}"));
    }
    if !task.labels.is_empty() {
        line.push_str(&format!(" [{}]", task.labels.join(", ")));
    }
    line
}

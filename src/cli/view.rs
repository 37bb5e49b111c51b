//! taskly show and stats command implementations.

use chrono::Local;
use serde::Serialize;

use crate::cli::Context;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::stats::{self, TrendPoint};
use crate::view::{self, TaskItem, ViewModel, ViewSelection};

pub fn run(ctx: &Context, selector: &str) -> Result<()> {
    let selection = ViewSelection::parse(selector)?;
    let (store, _) = ctx.open_store()?;
    let translations = ctx.translations()?;
    let today = Local::now().date_naive();

    let model = view::render(store.tasks(), store.projects(), selection, &translations, today)?;
    let human = human_view(&model);
    emit_success(ctx.output(), "show", &model, Some(&human))
}

pub fn run_stats(ctx: &Context, trend_days: usize) -> Result<()> {
    if trend_days == 0 || trend_days > stats::MAX_TREND_DAYS {
        return Err(Error::InvalidInput(format!(
            "trend days must be between 1 and {}",
            stats::MAX_TREND_DAYS
        )));
    }

    let (store, _) = ctx.open_store()?;
    let today = Local::now().date_naive();

    #[derive(Serialize)]
    struct Report {
        #[serde(flatten)]
        summary: stats::Summary,
        today_tasks: usize,
        trend: Vec<TrendPoint>,
    }

    let report = Report {
        summary: stats::summary(store.tasks(), store.projects()),
        today_tasks: stats::today_tasks(store.tasks(), today).len(),
        trend: stats::completion_trend(store.tasks(), today, trend_days),
    };

    let mut human = HumanOutput::new("Statistics");
    human.push_summary("total tasks", report.summary.total_tasks.to_string());
    human.push_summary("completed", report.summary.completed_tasks.to_string());
    human.push_summary("pending", report.summary.pending_tasks.to_string());
    human.push_summary("projects", report.summary.total_projects.to_string());
    human.push_summary("due today", report.today_tasks.to_string());
    for point in &report.trend {
        human.push_detail(format!("{}: {}", point.label, point.count));
    }
    emit_success(ctx.output(), "stats", &report, Some(&human))
}

fn human_view(model: &ViewModel) -> HumanOutput {
    match model {
        ViewModel::Dashboard(dashboard) => {
            let mut human = HumanOutput::new(format!(
                "{} - {}",
                dashboard.title, dashboard.greeting
            ));
            human.push_summary("total tasks", dashboard.summary.total_tasks.to_string());
            human.push_summary("completed", dashboard.summary.completed_tasks.to_string());
            human.push_summary("pending", dashboard.summary.pending_tasks.to_string());
            human.push_summary("projects", dashboard.summary.total_projects.to_string());
            for task in &dashboard.today {
                human.push_detail(item_line(task));
            }
            for project in &dashboard.recent_projects {
                human.push_detail(format!(
                    "{} ({} task(s))",
                    project.name, project.task_count
                ));
            }
            human
        }
        ViewModel::Today(list) | ViewModel::AllTasks(list) | ViewModel::Completed(list) => {
            let mut human = HumanOutput::new(list.title.clone());
            if list.tasks.is_empty() {
                human.push_detail(list.empty_message.clone());
            }
            for task in &list.tasks {
                human.push_detail(item_line(task));
            }
            human
        }
        ViewModel::Calendar(calendar) => {
            let mut human = HumanOutput::new(calendar.title.clone());
            for event in &calendar.events {
                let mark = if event.completed { "x" } else { " " };
                human.push_detail(format!("{} [{mark}] #{} {}", event.date, event.task_id, event.title));
            }
            human
        }
        ViewModel::Project(project) => {
            let mut human = HumanOutput::new(format!(
                "{} ({} task(s))",
                project.project.name, project.project.task_count
            ));
            if let Some(description) = &project.project.description {
                human.push_summary("about", description.as_str());
            }
            if project.tasks.is_empty() {
                human.push_detail(project.empty_message.clone());
            }
            for task in &project.tasks {
                human.push_detail(item_line(task));
            }
            human
        }
    }
}

fn item_line(task: &TaskItem) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!("[{mark}] #{} {} ({})", task.id, task.title, task.priority);
    if let Some(due) = task.due_date {
        line.push_str(&format!(", due {due}"));
    }
    if let Some(project) = &task.project {
        line.push_str(&format!(", {project}"));
    }
    line
}

//! View rendering.
//!
//! A view is a pure function from (domain snapshot, selection, locale,
//! today) to a serializable render model. No view holds authoritative
//! state; the rendering surface consumes the model and maps interactions
//! back to commands.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::locale::Translations;
use crate::model::{Project, Task};
use crate::stats::{self, Summary, TrendPoint};

const DASHBOARD_TODAY_LIMIT: usize = 5;
const DASHBOARD_RECENT_PROJECTS: usize = 3;

/// Which view the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSelection {
    Dashboard,
    Today,
    Calendar,
    Project(u64),
    AllTasks,
    Completed,
}

impl ViewSelection {
    /// Parse a view selector like `dashboard` or `project:3`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if let Some(id) = trimmed.strip_prefix("project:") {
            let id: u64 = id
                .trim()
                .parse()
                .map_err(|_| Error::UnknownView(trimmed.to_string()))?;
            return Ok(ViewSelection::Project(id));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "dashboard" => Ok(ViewSelection::Dashboard),
            "today" => Ok(ViewSelection::Today),
            "calendar" => Ok(ViewSelection::Calendar),
            "all-tasks" | "all" => Ok(ViewSelection::AllTasks),
            "completed" => Ok(ViewSelection::Completed),
            other => Err(Error::UnknownView(other.to_string())),
        }
    }

    /// The selection to fall back to after a project is deleted while its
    /// view is open.
    pub fn after_project_delete(self, deleted_project_id: u64) -> Self {
        match self {
            ViewSelection::Project(id) if id == deleted_project_id => ViewSelection::AllTasks,
            other => other,
        }
    }
}

/// A task as shown in a list, with project name and priority label
/// resolved.
#[derive(Debug, Clone, Serialize)]
pub struct TaskItem {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// A project card with its task count.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: String,
    pub task_count: usize,
    pub created_on: NaiveDate,
}

/// One entry in the calendar view, derived from a task with a due date.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEvent {
    pub date: NaiveDate,
    pub task_id: u64,
    pub title: String,
    pub color: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskListModel {
    pub title: String,
    pub empty_message: String,
    pub tasks: Vec<TaskItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardModel {
    pub title: String,
    pub greeting: String,
    pub summary: Summary,
    pub today_title: String,
    pub today: Vec<TaskItem>,
    pub recent_projects_title: String,
    pub recent_projects: Vec<ProjectCard>,
    pub trend_title: String,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarModel {
    pub title: String,
    pub events: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectViewModel {
    pub project: ProjectCard,
    pub empty_message: String,
    pub tasks: Vec<TaskItem>,
}

/// The rendered representation of one view.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum ViewModel {
    Dashboard(DashboardModel),
    Today(TaskListModel),
    Calendar(CalendarModel),
    Project(ProjectViewModel),
    AllTasks(TaskListModel),
    Completed(TaskListModel),
}

/// Render the selected view from a snapshot of the domain store.
pub fn render(
    tasks: &[Task],
    projects: &[Project],
    selection: ViewSelection,
    t: &Translations,
    today: NaiveDate,
) -> Result<ViewModel> {
    match selection {
        ViewSelection::Dashboard => Ok(ViewModel::Dashboard(render_dashboard(
            tasks, projects, t, today,
        ))),
        ViewSelection::Today => {
            let items = stats::today_tasks(tasks, today)
                .into_iter()
                .map(|task| task_item(task, projects, t))
                .collect();
            Ok(ViewModel::Today(TaskListModel {
                title: t.today.clone(),
                empty_message: t.no_tasks_today.clone(),
                tasks: items,
            }))
        }
        ViewSelection::Calendar => Ok(ViewModel::Calendar(render_calendar(tasks, projects, t))),
        ViewSelection::Project(project_id) => {
            let project = projects
                .iter()
                .find(|project| project.id == project_id)
                .ok_or(Error::ProjectNotFound(project_id))?;
            let items = tasks
                .iter()
                .filter(|task| task.project_id == Some(project_id))
                .map(|task| task_item(task, projects, t))
                .collect();
            Ok(ViewModel::Project(ProjectViewModel {
                project: project_card(project, tasks),
                empty_message: t.no_tasks_project.clone(),
                tasks: items,
            }))
        }
        ViewSelection::AllTasks => Ok(ViewModel::AllTasks(TaskListModel {
            title: t.all_tasks.clone(),
            empty_message: t.no_tasks_project.clone(),
            tasks: tasks.iter().map(|task| task_item(task, projects, t)).collect(),
        })),
        ViewSelection::Completed => Ok(ViewModel::Completed(TaskListModel {
            title: t.completed.clone(),
            empty_message: t.no_tasks_project.clone(),
            tasks: tasks
                .iter()
                .filter(|task| task.is_completed())
                .map(|task| task_item(task, projects, t))
                .collect(),
        })),
    }
}

fn render_dashboard(
    tasks: &[Task],
    projects: &[Project],
    t: &Translations,
    today: NaiveDate,
) -> DashboardModel {
    let today_items: Vec<TaskItem> = stats::today_tasks(tasks, today)
        .into_iter()
        .take(DASHBOARD_TODAY_LIMIT)
        .map(|task| task_item(task, projects, t))
        .collect();

    let mut recent: Vec<&Project> = projects.iter().collect();
    recent.sort_by(|left, right| right.created_at.cmp(&left.created_at));
    let recent_projects = recent
        .into_iter()
        .take(DASHBOARD_RECENT_PROJECTS)
        .map(|project| project_card(project, tasks))
        .collect();

    DashboardModel {
        title: t.dashboard.clone(),
        greeting: t.welcome_back.clone(),
        summary: stats::summary(tasks, projects),
        today_title: t.todays_tasks.clone(),
        today: today_items,
        recent_projects_title: t.recent_projects.clone(),
        recent_projects,
        trend_title: t.chart_completion_trend.clone(),
        trend: stats::completion_trend(tasks, today, 7),
    }
}

fn render_calendar(tasks: &[Task], projects: &[Project], t: &Translations) -> CalendarModel {
    let mut events: Vec<CalendarEvent> = tasks
        .iter()
        .filter_map(|task| {
            let date = task.due_date?;
            let color = task
                .project_id
                .and_then(|id| projects.iter().find(|project| project.id == id))
                .map(|project| project.color.clone())
                .unwrap_or_else(|| crate::model::DEFAULT_PROJECT_COLOR.to_string());
            Some(CalendarEvent {
                date,
                task_id: task.id,
                title: task.title.clone(),
                color,
                completed: task.is_completed(),
            })
        })
        .collect();
    events.sort_by(|left, right| left.date.cmp(&right.date).then(left.task_id.cmp(&right.task_id)));

    CalendarModel {
        title: t.calendar.clone(),
        events,
    }
}

fn task_item(task: &Task, projects: &[Project], t: &Translations) -> TaskItem {
    let project = task
        .project_id
        .and_then(|id| projects.iter().find(|project| project.id == id))
        .map(|project| project.name.clone());
    TaskItem {
        id: task.id,
        title: task.title.clone(),
        completed: task.is_completed(),
        priority: t.priority_label(task.priority).to_string(),
        due_date: task.due_date,
        project,
        labels: task.labels.clone(),
    }
}

fn project_card(project: &Project, tasks: &[Task]) -> ProjectCard {
    ProjectCard {
        id: project.id,
        name: project.name.clone(),
        description: project.description.clone(),
        color: project.color.clone(),
        task_count: stats::task_count_by_project(tasks, project.id),
        created_on: project.created_at.date_naive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, TaskStatus};
    use chrono::Utc;

    fn t() -> Translations {
        Translations::builtin("en").unwrap()
    }

    fn day(text: &str) -> NaiveDate {
        text.parse().unwrap()
    }

    fn task(id: u64, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: None,
            priority: Priority::Medium,
            due_date: None,
            project_id: None,
            labels: Vec::new(),
            status: TaskStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    fn project(id: u64, name: &str, color: &str) -> Project {
        Project {
            id,
            name: name.to_string(),
            description: None,
            color: color.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn parse_accepts_known_selectors() {
        assert_eq!(ViewSelection::parse("today").unwrap(), ViewSelection::Today);
        assert_eq!(
            ViewSelection::parse("project:7").unwrap(),
            ViewSelection::Project(7)
        );
        assert!(matches!(
            ViewSelection::parse("inbox"),
            Err(Error::UnknownView(_))
        ));
        assert!(matches!(
            ViewSelection::parse("project:x"),
            Err(Error::UnknownView(_))
        ));
    }

    #[test]
    fn deleting_the_open_project_resets_to_all_tasks() {
        assert_eq!(
            ViewSelection::Project(3).after_project_delete(3),
            ViewSelection::AllTasks
        );
        assert_eq!(
            ViewSelection::Project(3).after_project_delete(4),
            ViewSelection::Project(3)
        );
        assert_eq!(
            ViewSelection::Today.after_project_delete(3),
            ViewSelection::Today
        );
    }

    #[test]
    fn dashboard_caps_today_list_at_five() {
        let today = day("2026-08-23");
        let tasks: Vec<Task> = (1..=8)
            .map(|id| {
                let mut task = task(id, &format!("due {id}"));
                task.due_date = Some(today);
                task
            })
            .collect();

        let model = match render(&tasks, &[], ViewSelection::Dashboard, &t(), today).unwrap() {
            ViewModel::Dashboard(model) => model,
            other => panic!("unexpected model: {other:?}"),
        };
        assert_eq!(model.today.len(), 5);
        assert_eq!(model.summary.total_tasks, 8);
        assert_eq!(model.trend.len(), 7);
    }

    #[test]
    fn project_view_resolves_names_and_counts() {
        let work = project(2, "Work", "#43e97b");
        let mut in_work = task(1, "Ship report");
        in_work.project_id = Some(2);
        let other = task(2, "elsewhere");
        let tasks = vec![in_work, other];
        let projects = vec![work];

        let model = match render(
            &tasks,
            &projects,
            ViewSelection::Project(2),
            &t(),
            day("2026-08-23"),
        )
        .unwrap()
        {
            ViewModel::Project(model) => model,
            other => panic!("unexpected model: {other:?}"),
        };
        assert_eq!(model.project.task_count, 1);
        assert_eq!(model.tasks.len(), 1);
        assert_eq!(model.tasks[0].project.as_deref(), Some("Work"));
    }

    #[test]
    fn missing_project_view_is_an_error() {
        assert!(matches!(
            render(&[], &[], ViewSelection::Project(9), &t(), day("2026-08-23")),
            Err(Error::ProjectNotFound(9))
        ));
    }

    #[test]
    fn calendar_orders_events_and_colors_by_project() {
        let work = project(2, "Work", "#43e97b");
        let mut late = task(1, "later");
        late.due_date = Some(day("2026-08-25"));
        late.project_id = Some(2);
        let mut early = task(2, "sooner");
        early.due_date = Some(day("2026-08-21"));
        let undated = task(3, "no date");

        let model = match render(
            &[late, early, undated],
            &[work],
            ViewSelection::Calendar,
            &t(),
            day("2026-08-23"),
        )
        .unwrap()
        {
            ViewModel::Calendar(model) => model,
            other => panic!("unexpected model: {other:?}"),
        };
        assert_eq!(model.events.len(), 2);
        assert_eq!(model.events[0].title, "sooner");
        assert_eq!(model.events[0].color, crate::model::DEFAULT_PROJECT_COLOR);
        assert_eq!(model.events[1].color, "#43e97b");
    }

    #[test]
    fn completed_view_filters_and_localizes_priority() {
        let mut done = task(1, "done");
        done.status = TaskStatus::Completed;
        done.completed_at = Some(Utc::now());
        done.priority = Priority::High;
        let pending = task(2, "open");

        let tr = Translations::builtin("tr").unwrap();
        let model = match render(
            &[done, pending],
            &[],
            ViewSelection::Completed,
            &tr,
            day("2026-08-23"),
        )
        .unwrap()
        {
            ViewModel::Completed(model) => model,
            other => panic!("unexpected model: {other:?}"),
        };
        assert_eq!(model.tasks.len(), 1);
        assert_eq!(model.tasks[0].priority, "Yüksek");
        assert_eq!(model.title, "Tamamlandı");
    }
}

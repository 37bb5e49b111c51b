//! Derived statistics and chart data.
//!
//! Everything here is recomputed from the domain store on demand and never
//! persisted. "Today" is injected by the caller so the functions stay pure.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::model::{Project, Task};

/// Headline counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub total_projects: usize,
}

pub fn summary(tasks: &[Task], projects: &[Project]) -> Summary {
    let total_tasks = tasks.len();
    let completed_tasks = tasks.iter().filter(|task| task.is_completed()).count();
    Summary {
        total_tasks,
        completed_tasks,
        pending_tasks: total_tasks - completed_tasks,
        total_projects: projects.len(),
    }
}

/// Tasks due exactly today. Undated tasks never match.
pub fn today_tasks<'a>(tasks: &'a [Task], today: NaiveDate) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| task.due_date == Some(today))
        .collect()
}

/// One point of the completion trend chart.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub label: String,
    pub count: usize,
}

/// Largest trend window the CLI accepts (ten years).
pub const MAX_TREND_DAYS: usize = 3653;

/// Completion counts for the last `days` calendar days including today,
/// oldest first. Returns exactly `days` points except at the very edge of
/// the calendar, where unrepresentable dates are skipped.
pub fn completion_trend(tasks: &[Task], today: NaiveDate, days: usize) -> Vec<TrendPoint> {
    (0..days)
        .rev()
        .filter_map(|offset| {
            let date = today.checked_sub_days(Days::new(offset as u64))?;
            let count = tasks
                .iter()
                .filter(|task| {
                    task.completed_at
                        .map(|stamp| stamp.date_naive() == date)
                        .unwrap_or(false)
                })
                .count();
            Some(TrendPoint {
                date,
                label: date.format("%a, %b %-d").to_string(),
                count,
            })
        })
        .collect()
}

pub fn task_count_by_project(tasks: &[Task], project_id: u64) -> usize {
    tasks
        .iter()
        .filter(|task| task.project_id == Some(project_id))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, TaskStatus};
    use chrono::{TimeZone, Utc};

    fn task(id: u64) -> Task {
        Task {
            id,
            title: format!("task {id}"),
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

    fn completed_on(id: u64, date: NaiveDate) -> Task {
        let mut task = task(id);
        task.status = TaskStatus::Completed;
        task.completed_at = Some(
            Utc.from_utc_datetime(&date.and_hms_opt(9, 30, 0).unwrap()),
        );
        task
    }

    fn day(text: &str) -> NaiveDate {
        text.parse().unwrap()
    }

    #[test]
    fn summary_counts_pending_as_total_minus_completed() {
        let today = day("2026-08-23");
        let tasks = vec![task(1), completed_on(2, today), task(3)];
        let result = summary(&tasks, &[]);
        assert_eq!(result.total_tasks, 3);
        assert_eq!(result.completed_tasks, 1);
        assert_eq!(result.pending_tasks, 2);
        assert_eq!(result.total_projects, 0);
    }

    #[test]
    fn today_tasks_matches_exact_date_only() {
        let today = day("2026-08-23");
        let mut due_today_a = task(1);
        due_today_a.due_date = Some(today);
        let mut due_today_b = task(2);
        due_today_b.due_date = Some(today);
        let mut due_tomorrow = task(3);
        due_tomorrow.due_date = Some(day("2026-08-24"));
        let undated = task(4);

        let tasks = vec![due_today_a, due_today_b, due_tomorrow, undated];
        let matched = today_tasks(&tasks, today);
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|task| task.due_date == Some(today)));
    }

    #[test]
    fn trend_always_has_exactly_seven_entries() {
        let today = day("2026-08-23");
        assert_eq!(completion_trend(&[], today, 7).len(), 7);

        let tasks = vec![completed_on(1, today)];
        let trend = completion_trend(&tasks, today, 7);
        assert_eq!(trend.len(), 7);
        assert_eq!(trend.last().unwrap().count, 1);
    }

    #[test]
    fn trend_is_ordered_oldest_to_newest() {
        let today = day("2026-08-23");
        let trend = completion_trend(&[], today, 7);
        assert_eq!(trend[0].date, day("2026-08-17"));
        assert_eq!(trend[6].date, today);
        for pair in trend.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn trend_counts_fall_on_completion_dates() {
        let today = day("2026-08-23");
        let tasks = vec![
            completed_on(1, day("2026-08-20")),
            completed_on(2, day("2026-08-20")),
            completed_on(3, day("2026-08-10")), // outside the window
        ];
        let trend = completion_trend(&tasks, today, 7);
        let by_date: Vec<usize> = trend.iter().map(|point| point.count).collect();
        assert_eq!(by_date.iter().sum::<usize>(), 2);
        assert_eq!(trend[3].date, day("2026-08-20"));
        assert_eq!(trend[3].count, 2);
    }

    #[test]
    fn trend_near_calendar_start_skips_unrepresentable_days() {
        let early = NaiveDate::MIN.checked_add_days(Days::new(3)).unwrap();
        let trend = completion_trend(&[], early, 10);
        assert_eq!(trend.len(), 4);
        assert_eq!(trend.last().unwrap().date, early);
        for pair in trend.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn trend_labels_use_short_weekday_and_month() {
        let trend = completion_trend(&[], day("2026-08-23"), 1);
        assert_eq!(trend[0].label, "Sun, Aug 23");
    }

    #[test]
    fn task_count_by_project_ignores_other_projects() {
        let mut in_work = task(1);
        in_work.project_id = Some(2);
        let mut in_home = task(2);
        in_home.project_id = Some(5);
        let unassigned = task(3);

        let tasks = vec![in_work, in_home, unassigned];
        assert_eq!(task_count_by_project(&tasks, 2), 1);
        assert_eq!(task_count_by_project(&tasks, 9), 0);
    }
}

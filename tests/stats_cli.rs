mod support;

use chrono::Local;
use predicates::prelude::*;

use support::TestHome;

#[test]
fn stats_reports_counts_and_trend() {
    let home = TestHome::fresh("Alice");
    let work = home.add_project("Work");
    home.json(&["task", "add", "Ship report", "--project", &work.to_string()]);
    let done = home.add_task("already done");
    home.json(&["task", "done", &done.to_string()]);

    let value = home.json(&["stats"]);
    assert_eq!(value["data"]["total_tasks"], 2);
    assert_eq!(value["data"]["completed_tasks"], 1);
    assert_eq!(value["data"]["pending_tasks"], 1);
    assert_eq!(value["data"]["total_projects"], 1);

    let trend = value["data"]["trend"].as_array().unwrap();
    assert_eq!(trend.len(), 7);
    // The task completed just now lands on today's (last) point.
    assert_eq!(trend[6]["count"], 1);
}

#[test]
fn trend_length_follows_the_flag() {
    let home = TestHome::fresh("Alice");
    let value = home.json(&["stats", "--trend-days", "3"]);
    assert_eq!(value["data"]["trend"].as_array().unwrap().len(), 3);
}

#[test]
fn trend_days_outside_bounds_are_rejected() {
    let home = TestHome::fresh("Alice");
    home.cmd()
        .args(["stats", "--trend-days", "100000000"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("trend days"));
    home.cmd()
        .args(["stats", "--trend-days", "0"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn today_count_matches_due_dates() {
    let home = TestHome::fresh("Alice");
    let today = Local::now().date_naive().to_string();

    home.json(&["task", "add", "due now", "--due", &today]);
    home.json(&["task", "add", "also due", "--due", &today]);
    home.json(&["task", "add", "later", "--due", "2030-01-01"]);

    let value = home.json(&["stats"]);
    assert_eq!(value["data"]["today_tasks"], 2);
    assert_eq!(value["data"]["total_tasks"], 3);
}

#[test]
fn show_dashboard_renders_summary_and_trend() {
    let home = TestHome::fresh("Alice");
    home.add_task("anything");

    let value = home.json(&["show", "dashboard"]);
    assert_eq!(value["data"]["view"], "dashboard");
    assert_eq!(value["data"]["summary"]["total_tasks"], 1);
    assert_eq!(value["data"]["trend"].as_array().unwrap().len(), 7);
}

#[test]
fn show_localizes_with_the_locale_flag() {
    let home = TestHome::fresh("Alice");

    let value = home.json(&["show", "today", "--locale", "tr"]);
    assert_eq!(value["data"]["title"], "Bugün");
}

#[test]
fn show_project_view_for_missing_project_fails() {
    let home = TestHome::fresh("Alice");
    home.cmd()
        .args(["show", "project:9"])
        .assert()
        .failure()
        .code(2);
}

//! CLI agenda viewer.
//!
//! # Responsibility
//! - Wire `kira_core` against a SQLite file (or memory) outside any UI host.
//! - Print one day's focus tasks, events with lane geometry, and the inbox.
//!
//! Usage: `kira_cli [YYYY-MM-DD]`. Environment:
//! `KIRA_DB_PATH`, `KIRA_LOG_DIR`, `KIRA_LOG_LEVEL`, `KIRA_UTC_OFFSET_MINUTES`.

use chrono::NaiveDate;
use kira_core::db::{open_db, open_db_in_memory};
use kira_core::model::time::local_day;
use kira_core::{
    current_time_marker, default_log_level, init_logging, ScheduleConfig, ScheduleService,
    SqliteSnapshotRepository, SystemClock,
};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("kira: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    if let Ok(log_dir) = std::env::var("KIRA_LOG_DIR") {
        let level =
            std::env::var("KIRA_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
        init_logging(&level, &log_dir)?;
    }

    let config = match std::env::var("KIRA_UTC_OFFSET_MINUTES") {
        Ok(raw) => {
            let minutes = raw
                .trim()
                .parse::<i32>()
                .map_err(|err| format!("invalid KIRA_UTC_OFFSET_MINUTES `{raw}`: {err}"))?;
            ScheduleConfig::default()
                .with_offset_minutes(minutes)
                .ok_or_else(|| format!("KIRA_UTC_OFFSET_MINUTES out of range: {minutes}"))?
        }
        Err(_) => ScheduleConfig::default(),
    };

    let conn = match std::env::var("KIRA_DB_PATH") {
        Ok(path) => open_db(path),
        Err(_) => open_db_in_memory(),
    }
    .map_err(|err| err.to_string())?;

    let service = ScheduleService::load(SqliteSnapshotRepository::new(&conn), SystemClock, config);
    let now = service.now();
    let day = match std::env::args().nth(1) {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|err| format!("invalid date `{raw}`: {err}"))?,
        None => local_day(now, service.config().display_offset),
    };

    info!(
        "event=cli_agenda module=cli status=ok day={day} load_outcome={:?} events={} tasks={}",
        service.load_outcome(),
        service.events_on(day).len(),
        service.tasks().len()
    );
    print_agenda(&service, day, now);
    Ok(())
}

fn print_agenda(
    service: &ScheduleService<SqliteSnapshotRepository<'_>>,
    day: NaiveDate,
    now: chrono::DateTime<chrono::Utc>,
) {
    let offset = service.config().display_offset;
    let hours = service.preferences().working_hours;
    println!("kira_core ping={}", kira_core::ping());
    println!("kira_core version={} | {day}", kira_core::core_version());

    println!("focus tasks:");
    for task in service.day_tasks_on(day) {
        println!("  [{:?}] {} ({})", task.status, task.title, task.tag.as_str());
    }

    println!("schedule {:02}:00-{:02}:00:", hours.start, hours.end);
    let layout = service.day_layout(day);
    for event in service.events_on(day) {
        let start = event.start.with_timezone(&offset).format("%H:%M");
        let end = event.end.with_timezone(&offset).format("%H:%M");
        let lane = layout
            .get(&event.id)
            .map(|position| format!("left={} width={}", position.css_left(), position.css_width()))
            .unwrap_or_default();
        println!(
            "  {start}-{end} {} [{}] {lane}",
            event.title,
            event.kind.palette().name()
        );
    }
    if let Some(minutes) = current_time_marker(now, day, &hours, offset) {
        println!("now: {minutes} min into the grid");
    }

    println!("inbox:");
    for task in service.inbox_tasks() {
        println!("  {} ({})", task.title, task.tag.as_str());
    }
}

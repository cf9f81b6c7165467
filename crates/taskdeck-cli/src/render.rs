use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use taskdeck_core::deadline::{DueState, describe_remaining, due_state, time_remaining};
use taskdeck_core::status::toggle_label;
use taskdeck_shared::{Category, PriorityInfo, ProgressStats, Reminder, Tag, Task, TaskStatus};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

const DUE_SOON_DAYS: u32 = 2;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => io::stdout().is_terminal(),
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self { color })
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip(self, out, tasks, now))]
    pub fn task_table<W: Write>(
        &self,
        out: &mut W,
        tasks: &[Task],
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        if tasks.is_empty() {
            writeln!(out, "No tasks.")?;
            return Ok(());
        }

        let headers = ["ID", "Status", "Priority", "Progress", "Due", "Title"]
            .map(str::to_string)
            .to_vec();

        let mut rows = Vec::with_capacity(tasks.len());
        for task in tasks {
            let due = task
                .due_date
                .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            let due = match due_state(task, now, DUE_SOON_DAYS) {
                DueState::Overdue => self.paint(&due, "31"),
                DueState::DueSoon => self.paint(&due, "33"),
                _ => due,
            };
            let status = match task.status {
                TaskStatus::Completed => self.paint(task.status.label(), "32"),
                TaskStatus::InProgress => self.paint(task.status.label(), "36"),
                TaskStatus::Pending => task.status.label().to_string(),
            };
            let title = if task.is_root() {
                task.title.clone()
            } else {
                format!("  {}", task.title)
            };

            rows.push(vec![
                self.paint(&task.id.to_string(), "33"),
                status,
                task.priority.label().to_string(),
                task.progress.to_string(),
                due,
                title,
            ]);
        }

        write_table(out, headers, rows)
    }

    #[tracing::instrument(skip(self, out, task, now))]
    pub fn task_info<W: Write>(
        &self,
        out: &mut W,
        task: &Task,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        writeln!(out, "id          {}", task.id)?;
        writeln!(out, "title       {}", task.title)?;
        writeln!(
            out,
            "description {}",
            task.description.as_deref().unwrap_or_default()
        )?;
        writeln!(out, "status      {} (next: {})", task.status.label(), toggle_label(task.status))?;
        writeln!(out, "priority    {} ({})", task.priority.label(), task.priority)?;
        writeln!(out, "progress    {}", task.progress)?;
        if let Some(due) = task.due_date {
            let remaining = time_remaining(task, now)
                .filter(|_| task.status != TaskStatus::Completed)
                .map(|left| format!(" [{}]", describe_remaining(left)))
                .unwrap_or_default();
            writeln!(out, "due         {}{}", due.format("%Y-%m-%d %H:%M"), remaining)?;
        }
        if let Some(parent) = task.parent_task_id {
            writeln!(out, "parent      {parent}")?;
        }
        writeln!(out, "created     {}", task.created_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(out, "updated     {}", task.updated_at.format("%Y-%m-%d %H:%M:%S"))?;
        Ok(())
    }

    pub fn stats<W: Write>(&self, out: &mut W, stats: &ProgressStats) -> anyhow::Result<()> {
        writeln!(
            out,
            "{} tasks: {} pending, {} in progress, {} completed. Average progress {}%",
            stats.total_tasks,
            stats.pending_tasks,
            stats.in_progress_tasks,
            stats.completed_tasks,
            stats.average_percent()
        )?;
        Ok(())
    }

    pub fn categories<W: Write>(&self, out: &mut W, categories: &[Category]) -> anyhow::Result<()> {
        let rows = categories
            .iter()
            .map(|category| {
                vec![
                    category.id.to_string(),
                    category.name.clone(),
                    category.color.clone(),
                ]
            })
            .collect();
        write_table(out, vec!["ID".into(), "Category".into(), "Color".into()], rows)
    }

    pub fn tags<W: Write>(&self, out: &mut W, tags: &[Tag]) -> anyhow::Result<()> {
        let rows = tags
            .iter()
            .map(|tag| vec![tag.id.to_string(), format!("#{}", tag.name)])
            .collect();
        write_table(out, vec!["ID".into(), "Tag".into()], rows)
    }

    pub fn reminders<W: Write>(
        &self,
        out: &mut W,
        reminders: &[Reminder],
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let rows = reminders
            .iter()
            .map(|reminder| {
                let at = reminder.remind_at.format("%Y-%m-%d %H:%M").to_string();
                let at = if !reminder.is_notified && reminder.remind_at <= now {
                    self.paint(&at, "31")
                } else {
                    at
                };
                vec![
                    reminder.id.to_string(),
                    reminder.task_id.to_string(),
                    at,
                    if reminder.is_notified { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        write_table(
            out,
            vec!["ID".into(), "Task".into(), "Remind at".into(), "Notified".into()],
            rows,
        )
    }

    pub fn priority<W: Write>(&self, out: &mut W, info: &PriorityInfo) -> anyhow::Result<()> {
        writeln!(out, "{} ({})", info.label, info.priority)?;
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    writer: &mut W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
                format!("{cell}{}", " ".repeat(width.saturating_sub(visible_width)))
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    };

    writeln!(writer, "{}", line(headers))?;
    writeln!(
        writer,
        "{}",
        widths.iter().map(|width| "-".repeat(*width)).collect::<Vec<_>>().join(" ")
    )?;
    for row in rows {
        writeln!(writer, "{}", line(row))?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use taskdeck_shared::{Priority, Progress};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0)
            .single()
            .expect("valid now")
    }

    fn task(id: u64, title: &str, parent: Option<u64>) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: None,
            priority: Priority::HIGH,
            due_date: Some(now() - chrono::Duration::hours(2)),
            status: TaskStatus::Pending,
            progress: Progress::new(40),
            parent_task_id: parent,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn table_aligns_wide_titles_and_indents_subtasks() {
        let mut out = Vec::new();
        Renderer::plain()
            .task_table(
                &mut out,
                &[task(1, "日本語のタスク", None), task(2, "child", Some(1))],
                now(),
            )
            .expect("render");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID Status"));
        assert!(lines[2].contains("High"));
        assert!(lines[2].contains("40%"));
        assert!(lines[3].ends_with("  child"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn empty_list_prints_placeholder() {
        let mut out = Vec::new();
        Renderer::plain()
            .task_table(&mut out, &[], now())
            .expect("render");
        assert_eq!(String::from_utf8(out).expect("utf8"), "No tasks.\n");
    }

    #[test]
    fn strip_ansi_removes_color_codes() {
        assert_eq!(strip_ansi("\x1b[31mlate\x1b[0m"), "late");
    }

    #[test]
    fn info_shows_overdue_remaining_time() {
        let mut out = Vec::new();
        Renderer::plain()
            .task_info(&mut out, &task(7, "Pay rent", None), now())
            .expect("render");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("2h overdue"));
        assert!(text.contains("next: Start"));
    }
}

use chrono::NaiveDate;

use super::escape_html;
use crate::filters::FilterParams;
use crate::models::{Car, Job, Reminder, Totals};
use crate::status::DueInfo;

fn reminder_items(reminders: &[(Reminder, DueInfo)]) -> String {
    if reminders.is_empty() {
        return "<p class=\"muted\"><i>No reminders yet.</i></p>".to_string();
    }

    let items: String = reminders
        .iter()
        .map(|(reminder, due)| {
            let inactive = if reminder.is_active { "" } else { " (paused)" };
            let toggle_label = if reminder.is_active { "⏸ Pause" } else { "▶ Resume" };
            format!(
                r#"<li><span>{dot} <b>{title}</b>{inactive} — {hints}</span>
<span>
<form class="inline" method="POST" action="/reminders/{id}/done">
  <button type="submit">✅ Done</button>
</form>
<form class="inline" method="POST" action="/reminders/{id}/toggle">
  <button type="submit">{toggle_label}</button>
</form>
</span></li>"#,
                dot = due.status.dot(),
                title = escape_html(&reminder.title),
                hints = escape_html(&due.hints.join("; ")),
                id = reminder.id,
            )
        })
        .collect();

    format!("<ul>{items}</ul>")
}

fn history_items(jobs: &[Job]) -> String {
    jobs.iter()
        .map(|job| {
            format!(
                r#"<li><span>{icon} {mileage} km — {description} — {cost}
<small class="muted">({date})</small></span>
<span><a href="/jobs/{id}/edit">✏️</a>
<form class="inline" method="POST" action="/jobs/{id}/delete">
  <button type="submit" class="danger" onclick="return confirm('Delete this entry?');">🗑</button>
</form></span></li>"#,
                icon = job.category.icon(),
                mileage = job.mileage,
                description = escape_html(&job.description),
                cost = job.cost,
                date = job.created_at.date(),
                id = job.id,
            )
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
pub fn page(
    car: &Car,
    current_mileage: i64,
    today: NaiveDate,
    reminders: &[(Reminder, DueInfo)],
    params: &FilterParams,
    jobs: &[Job],
    totals: &Totals,
) -> String {
    let echo = |v: &Option<String>| escape_html(v.as_deref().unwrap_or(""));
    let category = params.category.as_deref().unwrap_or("");
    let all_sel = if category != "work" && category != "part" { " selected" } else { "" };
    let work_sel = if category == "work" { " selected" } else { "" };
    let part_sel = if category == "part" { " selected" } else { "" };

    let body = format!(
        r#"<a href="/">← back</a>
<h1>{title}</h1>

<div class="card">
  <h2>Maintenance reminders</h2>
  <p><b>Current mileage:</b> {current_mileage} km</p>
  <form method="POST" action="/reminders/add">
    <input type="hidden" name="car_id" value="{car_id}">
    <input name="title" placeholder="e.g. Oil change" required>
    <input name="interval_km" placeholder="Interval (km), e.g. 10000" type="number">
    <input name="interval_days" placeholder="Interval (days), e.g. 365" type="number">
    <input name="last_mileage" placeholder="Last serviced at (km)" type="number" value="{current_mileage}">
    <input name="last_date" placeholder="Last serviced on" type="date" value="{today}">
    <button type="submit">Add reminder</button>
  </form>
  {reminders}
</div>

<h2>Search and filters</h2>
<form method="GET" action="/cars/{car_id}">
  <input name="q" placeholder="Search descriptions" value="{q}">
  <select name="category">
    <option value=""{all_sel}>All categories</option>
    <option value="work"{work_sel}>Work</option>
    <option value="part"{part_sel}>Part</option>
  </select>
  <input name="m_from" placeholder="Mileage from" type="number" value="{m_from}">
  <input name="m_to" placeholder="Mileage to" type="number" value="{m_to}">
  <input name="d_from" placeholder="Date from" type="date" value="{d_from}">
  <input name="d_to" placeholder="Date to" type="date" value="{d_to}">
  <button type="submit">Apply</button>
  <a href="/cars/{car_id}">Reset</a>
</form>

<p>
  <b>Found:</b> {count} entries |
  <b>Total:</b> {total} |
  <b>Parts:</b> {parts} |
  <b>Work:</b> {work}
</p>

<h2>Add an entry for this car</h2>
<form method="POST" action="/add_job">
  <input type="hidden" name="car_id" value="{car_id}">
  <select name="category" required>
    <option value="work">Work</option>
    <option value="part">Part</option>
  </select>
  <input name="mileage" placeholder="Mileage (km)" type="number" required>
  <input name="description" placeholder="Description" required>
  <input name="cost" placeholder="Cost" type="number" value="0">
  <button type="submit">Add</button>
</form>

<hr>
<h2>History</h2>
<ul>{history}</ul>"#,
        title = escape_html(&car.title),
        car_id = car.id,
        reminders = reminder_items(reminders),
        q = echo(&params.q),
        m_from = echo(&params.m_from),
        m_to = echo(&params.m_to),
        d_from = echo(&params.d_from),
        d_to = echo(&params.d_to),
        count = totals.job_count,
        total = totals.total,
        parts = totals.parts,
        work = totals.work,
        history = history_items(jobs),
    );

    super::page(&car.title, &body)
}

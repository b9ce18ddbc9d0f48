use super::{error_block, escape_html};
use crate::handlers::dashboard::DashboardData;
use crate::models::{badge_for, Car, JobForm, CAR_CATALOG};

fn car_options(cars: &[Car], selected: &str) -> String {
    cars.iter()
        .map(|car| {
            let sel = if car.id.to_string() == selected {
                " selected"
            } else {
                ""
            };
            format!(
                "<option value=\"{}\"{sel}>{}</option>",
                car.id,
                escape_html(&car.title)
            )
        })
        .collect()
}

fn catalog_options() -> String {
    CAR_CATALOG
        .iter()
        .map(|image| {
            format!(
                "<option value=\"{}\">{} {}</option>",
                image.key, image.badge, image.title
            )
        })
        .collect()
}

pub fn page_body(data: &DashboardData, errors: &[String], form: &JobForm) -> String {
    let work_sel = if form.category == "work" { " selected" } else { "" };
    let part_sel = if form.category == "part" { " selected" } else { "" };
    let none_sel = if form.car_id.is_empty() { " selected" } else { "" };

    let car_links: String = data
        .cars
        .iter()
        .map(|car| {
            format!(
                r#"<li><span>{badge} <a href="/cars/{id}">{title}</a></span>
<form class="inline" method="POST" action="/cars/{id}/delete">
  <button type="submit" class="danger" onclick="return confirm('Delete this car and its history?');">🗑</button>
</form></li>"#,
                badge = badge_for(car.image.as_deref()),
                id = car.id,
                title = escape_html(&car.title),
            )
        })
        .collect();

    let summary_rows: String = data
        .summary
        .iter()
        .map(|s| {
            format!(
                "<tr><td><a href=\"/cars/{}\">{}</a></td><td><b>{}</b></td><td>{}</td><td>{}</td><td>{}</td></tr>",
                s.id,
                escape_html(&s.title),
                s.total,
                s.parts,
                s.work,
                s.job_count,
            )
        })
        .collect();

    let recent: String = data
        .recent
        .iter()
        .map(|job| {
            format!(
                r#"<li><span>{icon} <b>{car}</b> — {mileage} km — {description} — {cost}
<small class="muted">({date})</small></span>
<span><a href="/jobs/{id}/edit">✏️</a>
<form class="inline" method="POST" action="/jobs/{id}/delete">
  <button type="submit" class="danger" onclick="return confirm('Delete this entry?');">🗑</button>
</form></span></li>"#,
                icon = job.category.icon(),
                car = escape_html(&job.car_title),
                mileage = job.mileage,
                description = escape_html(&job.description),
                cost = job.cost,
                date = job.created_at.date(),
                id = job.id,
            )
        })
        .collect();

    format!(
        r#"<div class="topbar">
  <h1 class="h1">Garage log</h1>
  <div class="muted">maintenance and spending · <a href="/logout">sign out</a></div>
</div>

<div class="grid grid-2">
  <div class="card">
    <h2>Add an entry</h2>
    {errors}
    <form method="POST" action="/add_job">
      <label>Car:</label>
      <select name="car_id" required>
        <option value="" disabled{none_sel}>— pick a car —</option>
        {cars}
      </select>
      <label>Category:</label>
      <select name="category" required>
        <option value="work"{work_sel}>Work</option>
        <option value="part"{part_sel}>Part</option>
      </select>
      <input name="mileage" placeholder="Mileage (km)" type="number" required value="{mileage}">
      <input name="description" placeholder="Description" required value="{description}">
      <input name="cost" placeholder="Cost" type="number" value="{cost}">
      <button type="submit">Add</button>
    </form>
  </div>

  <div class="card">
    <h2>Add a car</h2>
    <form method="POST" action="/add_car">
      <select name="image" required>
        {catalog}
      </select>
      <button type="submit">Create car</button>
    </form>
  </div>

  <div class="card">
    <h2>Cars</h2>
    <ul>{car_links}</ul>
  </div>

  <div class="card">
    <h2>Spending by car</h2>
    <table class="table">
      <tr><th>Car</th><th>Total</th><th>Parts</th><th>Work</th><th>Entries</th></tr>
      {summary_rows}
    </table>
  </div>
</div>

<div class="grid">
  <div class="card">
    <h2>Recent entries</h2>
    <ul>{recent}</ul>
  </div>
</div>"#,
        errors = error_block(errors),
        cars = car_options(&data.cars, &form.car_id),
        catalog = catalog_options(),
        mileage = escape_html(&form.mileage),
        description = escape_html(&form.description),
        cost = escape_html(&form.cost),
    )
}

pub fn page(data: &DashboardData, errors: &[String], form: &JobForm) -> String {
    super::page("Garage log", &page_body(data, errors, form))
}

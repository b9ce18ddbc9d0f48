use super::{error_block, escape_html, page};
use crate::models::{Car, JobForm};

pub fn edit_page(job_id: i64, form: &JobForm, cars: &[Car], errors: &[String]) -> String {
    let car_options: String = cars
        .iter()
        .map(|car| {
            let sel = if car.id.to_string() == form.car_id {
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
        .collect();

    let work_sel = if form.category == "work" { " selected" } else { "" };
    let part_sel = if form.category == "part" { " selected" } else { "" };

    let body = format!(
        r#"<a href="/">← back</a>
<h1>Edit entry #{job_id}</h1>
{errors}
<div class="card">
  <form method="POST" action="/jobs/{job_id}/edit">
    <label>Car:</label>
    <select name="car_id" required>
      {car_options}
    </select>
    <label>Category:</label>
    <select name="category" required>
      <option value="work"{work_sel}>Work</option>
      <option value="part"{part_sel}>Part</option>
    </select>
    <input name="mileage" placeholder="Mileage (km)" type="number" required value="{mileage}">
    <input name="description" placeholder="Description" required value="{description}">
    <input name="cost" placeholder="Cost" type="number" required value="{cost}">
    <button type="submit">Save</button>
  </form>

  <form method="POST" action="/jobs/{job_id}/delete">
    <button type="submit" class="danger" onclick="return confirm('Delete this entry?');">🗑 Delete</button>
  </form>
</div>"#,
        errors = error_block(errors),
        mileage = escape_html(&form.mileage),
        description = escape_html(&form.description),
        cost = escape_html(&form.cost),
    );

    page(&format!("Edit entry #{job_id}"), &body)
}

use super::{error_block, escape_html, page};

pub fn login_page(errors: &[String], username: &str) -> String {
    let body = format!(
        r#"<div class="topbar"><h1 class="h1">Garage log</h1></div>
<div class="card">
  <h2>Sign in</h2>
  {errors}
  <form method="POST" action="/login">
    <input name="username" placeholder="Username" required value="{username}">
    <input name="password" placeholder="Password" type="password" required>
    <button type="submit">Sign in</button>
  </form>
  <p class="muted">No account yet? <a href="/register">Register</a></p>
</div>"#,
        errors = error_block(errors),
        username = escape_html(username),
    );
    page("Sign in", &body)
}

pub fn register_page(errors: &[String], username: &str) -> String {
    let body = format!(
        r#"<div class="topbar"><h1 class="h1">Garage log</h1></div>
<div class="card">
  <h2>Register</h2>
  {errors}
  <form method="POST" action="/register">
    <input name="username" placeholder="Username" required value="{username}">
    <input name="password" placeholder="Password (4+ characters)" type="password" required>
    <button type="submit">Create account</button>
  </form>
  <p class="muted">Already registered? <a href="/login">Sign in</a></p>
</div>"#,
        errors = error_block(errors),
        username = escape_html(username),
    );
    page("Register", &body)
}

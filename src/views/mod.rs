//! Server-rendered HTML. Fragments are assembled with `format!`; every
//! user-sourced value goes through [`escape_html`] so it renders as literal
//! text.

pub mod auth;
pub mod car;
pub mod dashboard;
pub mod job;

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

const BASE_CSS: &str = r#"
:root{
  --bg:#0b1020; --card:#121a33; --muted:#93a4c7; --text:#e7ecff;
  --accent:#6ea8fe; --danger:#ff6b6b; --warn:#ffd166; --ok:#4cd4a3;
  --border:rgba(255,255,255,.10);
}
*{box-sizing:border-box}
body{margin:0;font-family:system-ui,-apple-system,Segoe UI,Roboto,Arial;
  background:radial-gradient(1200px 600px at 10% 0%, #17234a 0%, var(--bg) 50%);
  color:var(--text); line-height:1.45;}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}
.container{max-width:980px;margin:0 auto;padding:24px}
.topbar{display:flex;justify-content:space-between;align-items:center;gap:12px;margin-bottom:18px}
.h1{font-size:28px;margin:0}
.grid{display:grid;gap:14px}
@media (min-width:900px){.grid-2{grid-template-columns:1.1fr .9fr}}
.card{background:rgba(18,26,51,.92); border:1px solid var(--border);
  border-radius:16px; padding:16px; box-shadow:0 8px 30px rgba(0,0,0,.25)}
.card h2{margin:0 0 10px 0;font-size:18px}
.muted{color:var(--muted);font-size:13px}
input,select,button{font:inherit}
input,select{background:#0e1630;color:var(--text);border:1px solid var(--border);
  padding:10px 12px;border-radius:12px;outline:none}
input:focus,select:focus{border-color:rgba(110,168,254,.6)}
button{background:var(--accent);color:#081026;border:0;padding:10px 14px;border-radius:12px;
  cursor:pointer;font-weight:700;margin:10px 0;}
button.danger{background:var(--danger);color:#260808}
.table{width:100%;border-collapse:separate;border-spacing:0 10px}
.table th{color:var(--muted);font-weight:700;font-size:12px;text-align:left;padding:0 10px}
.table td{background:rgba(14,22,48,.65);border:1px solid var(--border);padding:12px 10px}
.alert{border:1px solid rgba(255,107,107,.45);background:rgba(255,107,107,.08);
  padding:10px 12px;border-radius:14px;margin:10px 0}
ul{list-style-type:none;padding:0}
li{display:flex;justify-content:space-between;align-items:center;gap:8px}
form{display:flex;flex-direction:column}
form.inline{display:inline;flex-direction:row}
"#;

pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <style>{BASE_CSS}</style>
</head>
<body>
  <div class="container">
    {body}
  </div>
</body>
</html>"#,
        title = escape_html(title),
    )
}

pub fn error_block(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape_html(e)))
        .collect();
    format!("<div class=\"alert\"><b>Check the form:</b><ul>{items}</ul></div>")
}

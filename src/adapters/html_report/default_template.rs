//! Built-in HTML report template with `{{PLACEHOLDER}}` markers.

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{TITLE}}</title>
<style>
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 800px; color: #111827; }
select { font-size: 1rem; padding: 0.25rem; }
.view h2 { font-size: 1.15rem; }
.legend { list-style: none; padding: 0; font-size: 0.9rem; }
.swatch { display: inline-block; width: 10px; height: 10px; border-radius: 50%; margin: 0 0.4rem; }
.swatch.line { border-radius: 0; height: 3px; width: 16px; vertical-align: middle; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid #d1d5db; padding: 0.25rem 0.6rem; text-align: right; }
th:first-child, td:first-child { text-align: left; }
</style>
</head>
<body>
<h1>{{TITLE}}</h1>
<label for="view-select">View:</label>
{{VIEW_SELECTOR}}
{{VIEWS}}
<h2>Regression Models</h2>
{{MODEL_TABLE}}
{{SKIPPED_PANELS}}
<h2>Yearly Average Temperature</h2>
{{YEARLY_TABLE}}
<script>
document.getElementById("view-select").addEventListener("change", function (e) {
  document.querySelectorAll("section.view").forEach(function (s) {
    s.hidden = s.id !== e.target.value;
  });
});
</script>
</body>
</html>
"#;

pub fn template() -> &'static str {
    TEMPLATE
}

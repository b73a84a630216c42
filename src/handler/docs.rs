//! Endpoint overview page

use crate::config::RoutesConfig;

/// Render the HTML page listing the available endpoints
pub fn render_docs_page(routes: &RoutesConfig) -> String {
    let mut rows = vec![
        (
            format!("{}numerator", routes.schedule_prefix),
            "Schedule for the numerator week",
        ),
        (
            format!("{}denominator", routes.schedule_prefix),
            "Schedule for the denominator week",
        ),
        (
            routes.groups_path.clone(),
            "Sorted list of every group in either week",
        ),
    ];
    if routes.health.enabled {
        rows.push((routes.health.liveness_path.clone(), "Liveness probe"));
        rows.push((routes.health.readiness_path.clone(), "Readiness probe"));
    }

    let table: String = rows
        .iter()
        .map(|(path, description)| {
            format!("<tr><td><code>GET {path}</code></td><td>{description}</td></tr>\n")
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Class Schedule API</title>
    <style>
        body {{ font-family: sans-serif; max-width: 760px; margin: 40px auto; color: #333; }}
        table {{ border-collapse: collapse; width: 100%; }}
        td {{ border: 1px solid #ddd; padding: 8px 12px; }}
        code {{ background: #f0f0f0; padding: 2px 6px; border-radius: 3px; }}
    </style>
</head>
<body>
<h1>Class Schedule API</h1>
<p>Responses are JSON. Week parity is <code>numerator</code> or <code>denominator</code>.</p>
<table>
{table}</table>
</body>
</html>"#
    )
}

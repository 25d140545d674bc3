/// The document shell shared by every page: the html skeleton, the stylesheet, and the sidebar/content grid. Pages pass their sidebar and content markup in and get the complete document back.
pub fn app_layout(title: &str, sidebar: &str, content: &str) -> String {
	format!(
		r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
{style}
</style>
</head>
<body>
<div class="app-layout">
<nav class="app-layout-sidebar">
{sidebar}
</nav>
<main class="app-layout-content">
{content}
</main>
</div>
</body>
</html>
"#,
		title = title,
		style = STYLE,
		sidebar = sidebar,
		content = content,
	)
}

const STYLE: &str = r#"
body {
	margin: 0;
	font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
	color: #1d1d1f;
	background-color: #ffffff;
}
.app-layout {
	display: grid;
	grid-template-columns: 20rem 1fr;
	min-height: 100vh;
}
.app-layout-sidebar {
	padding: 1.5rem;
	background-color: #f5f5f7;
	border-right: 1px solid #e5e5ea;
}
.app-layout-content {
	padding: 1.5rem 2rem;
	min-width: 0;
}
.app-layout-sidebar h1 {
	font-size: 1.25rem;
	margin: 0 0 0.25rem 0;
}
.app-layout-sidebar h2 {
	font-size: 1rem;
	margin: 1.5rem 0 0.5rem 0;
}
.classifier-list {
	list-style: none;
	margin: 0;
	padding: 0;
}
.classifier-list a {
	display: block;
	padding: 0.25rem 0;
	color: #0a84ff;
	text-decoration: none;
}
.classifier-list a.selected {
	font-weight: bold;
	color: #1d1d1f;
}
.field {
	margin: 0.5rem 0;
}
.field label {
	display: block;
	font-size: 0.875rem;
	margin-bottom: 0.25rem;
}
.field input[type="number"], .field select {
	width: 100%;
	box-sizing: border-box;
	padding: 0.25rem;
}
.classify-button {
	margin-top: 1rem;
	padding: 0.5rem 1.5rem;
	border: none;
	border-radius: 4px;
	background-color: #0a84ff;
	color: #ffffff;
	font-size: 1rem;
	cursor: pointer;
}
.metric-summary {
	margin: 0.25rem 0;
}
.fit-error {
	color: #ff453a;
	margin: 1rem 0;
}
.plot-error {
	color: #ff453a;
	margin: 0.5rem 0;
}
.raw-data-table {
	border-collapse: collapse;
	font-size: 0.8125rem;
}
.raw-data-table th, .raw-data-table td {
	border: 1px solid #e5e5ea;
	padding: 0.125rem 0.375rem;
	text-align: right;
}
.raw-data-table th {
	background-color: #f5f5f7;
	position: sticky;
	top: 0;
}
.raw-data-scroll {
	max-height: 24rem;
	max-width: 100%;
	overflow: auto;
	margin: 1rem 0;
}
.confusion-matrix {
	display: grid;
	grid-template-areas:
		".           actual-true  actual-false"
		"pred-true   tp           fp"
		"pred-false  fn           tn";
	grid-template-columns: max-content 1fr 1fr;
	gap: 2px;
	max-width: 32rem;
	margin: 1rem 0;
}
.confusion-matrix-label {
	padding: 0.5rem;
	background-color: #f5f5f7;
	font-size: 0.875rem;
	display: flex;
	align-items: center;
	justify-content: center;
	text-align: center;
}
.confusion-matrix-cell {
	padding: 1rem;
	text-align: center;
}
.confusion-matrix-cell-correct {
	background-color: rgba(48, 209, 88, 0.25);
}
.confusion-matrix-cell-incorrect {
	background-color: rgba(255, 69, 58, 0.25);
}
.confusion-matrix-cell-count {
	font-size: 1.25rem;
	font-weight: bold;
}
.confusion-matrix-cell-percent {
	font-size: 0.8125rem;
	color: #6e6e73;
}
"#;

// Copyright (c) The testdash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The self-contained HTML dashboard.
//!
//! The page embeds a JSON copy of the test records and category tallies and
//! drives all interactivity (filter dropdowns, substring search, the outcome
//! pie chart and the per-category stacked bar chart) from that payload with
//! inline scripts. No network access is needed to view it.

use crate::{
    errors::{ReportKind, WriteReportError},
    reporter::aggregator::ResultAggregator,
};
use camino::Utf8Path;
use chrono::Local;
use std::fs;
use swrite::{SWrite, swrite};
use tracing::debug;

/// A point-in-time HTML rendering of an aggregator's state.
pub struct HtmlReport<'a> {
    aggregator: &'a ResultAggregator,
    title: String,
}

impl<'a> HtmlReport<'a> {
    /// Creates a report over the aggregator's current state, with `title` as
    /// the page heading.
    pub fn new(aggregator: &'a ResultAggregator, title: impl Into<String>) -> Self {
        Self {
            aggregator,
            title: title.into(),
        }
    }

    /// Renders the page. An empty run renders all-zero summary cards rather
    /// than erroring.
    pub fn render(&self) -> Result<String, WriteReportError> {
        let summary = self.aggregator.summary();
        let tests_json = embeddable_json(&serialize(self.aggregator.records())?);
        let categories_json = embeddable_json(&serialize(self.aggregator.categories())?);
        let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S");

        let mut page = String::with_capacity(16 * 1024);
        swrite!(
            page,
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head>\n\
             <meta charset=\"UTF-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
             <title>{title}</title>\n\
             <style>{STYLE}</style>\n\
             </head>\n\
             <body>\n\
             <div class=\"container\">\n\
             <div class=\"header\">\n\
             <h1>{title}</h1>\n\
             <div class=\"timestamp\">Generated on: {generated_at}</div>\n\
             </div>\n",
            title = escape_html(&self.title),
        );

        swrite!(page, "<div class=\"summary-container\">\n");
        for (class, label, value) in [
            ("total", "TOTAL TESTS", summary.total.to_string()),
            ("pass", "PASSED", summary.passed.to_string()),
            ("fail", "FAILED", summary.failed.to_string()),
            ("skip", "SKIPPED", summary.skipped.to_string()),
            ("error", "ERROR", summary.error.to_string()),
            ("time", "DURATION (S)", format!("{:.2}", summary.duration)),
            ("rate", "PASS RATE", format!("{:.1}%", summary.pass_rate())),
        ] {
            swrite!(
                page,
                "<div class=\"summary-card {class}\">\n\
                 <div class=\"card-title\">{label}</div>\n\
                 <div class=\"card-value\">{value}</div>\n\
                 </div>\n"
            );
        }
        swrite!(page, "</div>\n");

        swrite!(
            page,
            "<div class=\"chart-container\">\n\
             <div class=\"chart\"><h3>Test Results</h3><canvas id=\"results-pie-chart\" width=\"360\" height=\"240\"></canvas></div>\n\
             <div class=\"chart\"><h3>Tests by Category</h3><canvas id=\"categories-bar-chart\" width=\"360\" height=\"240\"></canvas></div>\n\
             </div>\n\
             <h2>Test Details</h2>\n\
             <div class=\"filter-container\">\n\
             <select class=\"filter-dropdown\" id=\"status-filter\">\n\
             <option value=\"all\">All Statuses</option>\n\
             <option value=\"passed\">Passed</option>\n\
             <option value=\"failed\">Failed</option>\n\
             <option value=\"skipped\">Skipped</option>\n\
             <option value=\"error\">Error</option>\n\
             </select>\n\
             <select class=\"filter-dropdown\" id=\"category-filter\">\n\
             <option value=\"all\">All Categories</option>\n\
             </select>\n\
             <input type=\"text\" class=\"search-input\" id=\"search-input\" placeholder=\"Search test names...\">\n\
             </div>\n\
             <table class=\"test-table\" id=\"test-table\">\n\
             <thead><tr><th>Test Name</th><th>Category</th><th>Status</th><th>Duration (s)</th></tr></thead>\n\
             <tbody id=\"test-table-body\"></tbody>\n\
             </table>\n\
             </div>\n"
        );

        swrite!(
            page,
            "<script>\n\
             const testResults = {tests_json};\n\
             const categories = {categories_json};\n\
             {SCRIPT}\n\
             </script>\n\
             </body>\n\
             </html>\n"
        );
        Ok(page)
    }

    /// Renders the page and writes it to `path`, returning the rendered text.
    pub fn save(&self, path: &Utf8Path) -> Result<String, WriteReportError> {
        let rendered = self.render()?;
        fs::write(path, &rendered).map_err(|error| WriteReportError::Io {
            kind: ReportKind::Html,
            path: path.to_owned(),
            error,
        })?;
        debug!(%path, "HTML report written");
        Ok(rendered)
    }
}

fn serialize<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, WriteReportError> {
    serde_json::to_string(value).map_err(|error| WriteReportError::Serialize {
        kind: ReportKind::Html,
        error,
    })
}

/// Escapes text interpolated into HTML markup.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Makes a JSON string safe to embed inside a `<script>` element.
///
/// `</` would otherwise let payload text close the script element early.
fn embeddable_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

static STYLE: &str = r#"
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0; padding: 20px; background-color: #f5f5f5; color: #333; }
.container { max-width: 1200px; margin: 0 auto; background-color: white; padding: 20px; border-radius: 5px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
h1, h2, h3 { color: #2c3e50; }
.header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px; padding-bottom: 20px; border-bottom: 1px solid #eee; }
.timestamp { font-size: 14px; color: #7f8c8d; }
.summary-container { display: flex; flex-wrap: wrap; gap: 15px; margin-bottom: 30px; }
.summary-card { flex: 1; min-width: 130px; padding: 15px; border-radius: 5px; box-shadow: 0 2px 5px rgba(0,0,0,0.1); text-align: center; }
.card-title { font-size: 14px; font-weight: bold; margin-bottom: 10px; }
.card-value { font-size: 24px; font-weight: bold; }
.pass { background-color: #e8f5e9; color: #2e7d32; }
.fail { background-color: #ffebee; color: #c62828; }
.skip { background-color: #e3f2fd; color: #1565c0; }
.error { background-color: #fff3e0; color: #e65100; }
.total { background-color: #f3e5f5; color: #6a1b9a; }
.time { background-color: #e8eaf6; color: #283593; }
.rate { background-color: #e0f2f1; color: #00695c; }
.chart-container { display: flex; gap: 30px; margin-bottom: 30px; }
.chart { flex: 1; background-color: white; padding: 15px; border-radius: 5px; box-shadow: 0 2px 5px rgba(0,0,0,0.1); }
.test-table { width: 100%; border-collapse: collapse; margin-top: 20px; }
.test-table th, .test-table td { text-align: left; padding: 12px 15px; border-bottom: 1px solid #ddd; }
.test-table th { background-color: #f8f9fa; font-weight: bold; }
.status-badge { display: inline-block; padding: 5px 10px; border-radius: 20px; font-size: 12px; font-weight: bold; text-transform: uppercase; }
.status-badge.passed { background-color: #e8f5e9; color: #2e7d32; }
.status-badge.failed { background-color: #ffebee; color: #c62828; }
.status-badge.skipped { background-color: #e3f2fd; color: #1565c0; }
.status-badge.error { background-color: #fff3e0; color: #e65100; }
.details-row { display: none; background-color: #f9f9f9; }
.details-content { padding: 15px; white-space: pre-wrap; font-family: monospace; font-size: 13px; color: #333; }
.error-message { background-color: #ffebee; padding: 10px; border-radius: 4px; margin-top: 10px; white-space: pre-wrap; font-family: monospace; font-size: 12px; color: #c62828; }
.filter-container { display: flex; gap: 10px; margin-bottom: 20px; }
.filter-dropdown { padding: 8px 12px; border: 1px solid #ddd; border-radius: 4px; background-color: white; }
.search-input { flex: 1; padding: 8px 12px; border: 1px solid #ddd; border-radius: 4px; }
"#;

static SCRIPT: &str = r#"
const OUTCOME_COLORS = { passed: '#4caf50', failed: '#f44336', skipped: '#2196f3', error: '#ff9800' };
const OUTCOMES = ['passed', 'failed', 'skipped', 'error'];

function populateCategoryFilter() {
    const select = document.getElementById('category-filter');
    for (const category of Object.keys(categories)) {
        const option = document.createElement('option');
        option.value = category;
        option.textContent = category;
        select.appendChild(option);
    }
}

function renderTable(tests) {
    const body = document.getElementById('test-table-body');
    body.textContent = '';
    tests.forEach((test, index) => {
        const row = document.createElement('tr');

        const nameCell = document.createElement('td');
        nameCell.textContent = test.name;
        const categoryCell = document.createElement('td');
        categoryCell.textContent = test.category;
        const statusCell = document.createElement('td');
        const badge = document.createElement('span');
        badge.className = 'status-badge ' + test.outcome;
        badge.textContent = test.outcome;
        statusCell.appendChild(badge);
        const durationCell = document.createElement('td');
        durationCell.textContent = test.duration.toFixed(3);
        row.append(nameCell, categoryCell, statusCell, durationCell);

        const detailsRow = document.createElement('tr');
        detailsRow.className = 'details-row';
        const detailsCell = document.createElement('td');
        detailsCell.colSpan = 4;
        const details = document.createElement('div');
        details.className = 'details-content';
        details.textContent = test.file + '\n' + test.description;
        detailsCell.appendChild(details);
        if (test.error_message) {
            const error = document.createElement('div');
            error.className = 'error-message';
            error.textContent = test.error_message;
            detailsCell.appendChild(error);
        }
        detailsRow.appendChild(detailsCell);

        row.addEventListener('click', () => {
            detailsRow.style.display = detailsRow.style.display === 'table-row' ? 'none' : 'table-row';
        });
        body.append(row, detailsRow);
    });
}

function applyFilters() {
    const status = document.getElementById('status-filter').value;
    const category = document.getElementById('category-filter').value;
    const query = document.getElementById('search-input').value.toLowerCase();
    renderTable(testResults.filter(test =>
        (status === 'all' || test.outcome === status) &&
        (category === 'all' || test.category === category) &&
        (query === '' ||
            test.name.toLowerCase().includes(query) ||
            test.description.toLowerCase().includes(query))));
}

function drawResultsPie() {
    const canvas = document.getElementById('results-pie-chart');
    const ctx = canvas.getContext('2d');
    const counts = OUTCOMES.map(outcome => testResults.filter(t => t.outcome === outcome).length);
    const total = counts.reduce((a, b) => a + b, 0);
    if (total === 0) return;

    const cx = canvas.width / 2 - 50, cy = canvas.height / 2, radius = Math.min(cx, cy) - 10;
    let angle = -Math.PI / 2;
    OUTCOMES.forEach((outcome, i) => {
        if (counts[i] === 0) return;
        const slice = counts[i] / total * 2 * Math.PI;
        ctx.beginPath();
        ctx.moveTo(cx, cy);
        ctx.arc(cx, cy, radius, angle, angle + slice);
        ctx.closePath();
        ctx.fillStyle = OUTCOME_COLORS[outcome];
        ctx.fill();
        angle += slice;
    });
    OUTCOMES.forEach((outcome, i) => {
        const y = 30 + i * 22;
        ctx.fillStyle = OUTCOME_COLORS[outcome];
        ctx.fillRect(canvas.width - 100, y, 12, 12);
        ctx.fillStyle = '#333';
        ctx.font = '12px sans-serif';
        ctx.fillText(outcome + ' (' + counts[i] + ')', canvas.width - 82, y + 10);
    });
}

function drawCategoriesBar() {
    const canvas = document.getElementById('categories-bar-chart');
    const ctx = canvas.getContext('2d');
    const names = Object.keys(categories);
    if (names.length === 0) return;

    const maxTotal = Math.max(...names.map(name =>
        OUTCOMES.reduce((sum, outcome) => sum + categories[name][outcome], 0)));
    const chartHeight = canvas.height - 40;
    const barWidth = Math.min(60, (canvas.width - 20) / names.length - 10);

    names.forEach((name, i) => {
        const x = 10 + i * (barWidth + 10);
        let y = chartHeight;
        for (const outcome of OUTCOMES) {
            const count = categories[name][outcome];
            if (count === 0) continue;
            const height = count / maxTotal * (chartHeight - 20);
            y -= height;
            ctx.fillStyle = OUTCOME_COLORS[outcome];
            ctx.fillRect(x, y, barWidth, height);
        }
        ctx.fillStyle = '#333';
        ctx.font = '11px sans-serif';
        ctx.save();
        ctx.translate(x + barWidth / 2, chartHeight + 14);
        ctx.textAlign = 'center';
        ctx.fillText(name, 0, 0);
        ctx.restore();
    });
}

populateCategoryFilter();
renderTable(testResults);
drawResultsPie();
drawCategoriesBar();
document.getElementById('status-filter').addEventListener('change', applyFilters);
document.getElementById('category-filter').addEventListener('change', applyFilters);
document.getElementById('search-input').addEventListener('input', applyFilters);
"#;

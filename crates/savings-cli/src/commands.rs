//! Subcommand handlers and table rendering.
//!
//! Every handler returns the text to print so that rendering can be tested
//! without a terminal.

use anyhow::{Result, bail};
use clap::Args;
use serde::Serialize;

use savings_client::{ProjectBoard, SavingsClient};
use savings_core::{
    ProjectDraft, ProjectPatch, ProjectView, Settings, SettingsPatch, Totals, format_amount,
};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Table,
    Json,
}

/// Numeric project fields shared by `projects add` and `projects set`.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectFields {
    /// Transactions automated
    #[arg(long)]
    pub count: Option<f64>,
    /// Minutes each transaction used to take
    #[arg(long = "minutes")]
    pub time_per_transaction_min: Option<f64>,
    /// Business hours handed back
    #[arg(long = "hours-back")]
    pub business_hours_back: Option<f64>,
}

impl ProjectFields {
    fn into_patch(self, name: Option<String>) -> ProjectPatch {
        ProjectPatch {
            name,
            count: self.count,
            time_per_transaction_min: self.time_per_transaction_min,
            business_hours_back: self.business_hours_back,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn settings_show(client: &SavingsClient, output: Output) -> Result<String> {
    let settings = client.settings().await?;
    render(output, &settings, render_settings)
}

pub async fn settings_set(
    client: &SavingsClient,
    it_rate: Option<f64>,
    business_rate: Option<f64>,
    output: Output,
) -> Result<String> {
    let patch = SettingsPatch {
        it_rate,
        business_rate,
    };
    if patch.is_empty() {
        bail!("nothing to change; pass --it-rate and/or --business-rate");
    }
    let settings = client.update_settings(&patch).await?;
    render(output, &settings, render_settings)
}

pub async fn projects_list(client: &SavingsClient, output: Output) -> Result<String> {
    let views = client.list_projects().await?;
    render(output, &views, |views| render_projects(views))
}

pub async fn projects_add(
    client: &SavingsClient,
    name: String,
    id: Option<String>,
    fields: ProjectFields,
    output: Output,
) -> Result<String> {
    let draft = ProjectDraft {
        name,
        id,
        count: fields.count.unwrap_or_default(),
        time_per_transaction_min: fields.time_per_transaction_min.unwrap_or_default(),
        business_hours_back: fields.business_hours_back.unwrap_or_default(),
    };

    // The board derives the id against what the server already holds.
    let mut board = ProjectBoard::default();
    board.refresh(client).await?;
    let view = board.create(client, draft).await?;
    tracing::debug!(id = %view.project.id, "Project added");

    render(output, &view, |view| {
        render_projects(std::slice::from_ref(view))
    })
}

pub async fn projects_set(
    client: &SavingsClient,
    id: &str,
    name: Option<String>,
    fields: ProjectFields,
    output: Output,
) -> Result<String> {
    let patch = fields.into_patch(name);
    if patch.is_empty() {
        bail!("nothing to change for {id}");
    }
    let view = client.patch_project(id, &patch).await?;
    render(output, &view, |view| {
        render_projects(std::slice::from_ref(view))
    })
}

pub async fn projects_remove(client: &SavingsClient, id: &str) -> Result<String> {
    client.delete_project(id).await?;
    Ok(format!("Removed {id}"))
}

pub async fn summary(client: &SavingsClient, output: Output) -> Result<String> {
    let totals = client.summary().await?;
    render(output, &totals, render_totals)
}

fn render<T, F>(output: Output, value: &T, table: F) -> Result<String>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match output {
        Output::Json => Ok(serde_json::to_string_pretty(value)?),
        Output::Table => Ok(table(value)),
    }
}

// ============================================================================
// Rendering
// ============================================================================

pub fn render_settings(settings: &Settings) -> String {
    render_table(
        &["RATE", "PER HOUR"],
        vec![
            vec!["IT".to_string(), format_amount(settings.it_rate)],
            vec!["Business".to_string(), format_amount(settings.business_rate)],
        ],
        1,
    )
}

pub fn render_projects(views: &[ProjectView]) -> String {
    if views.is_empty() {
        return "No projects".to_string();
    }

    let rows = views
        .iter()
        .map(|view| {
            let (p, d) = (&view.project, &view.derived);
            vec![
                p.id.clone(),
                p.name.clone(),
                format_amount(p.count),
                format_amount(p.time_per_transaction_min),
                format_amount(p.business_hours_back),
                format_amount(d.it_hours),
                format_amount(d.it_saving),
                format_amount(d.business_saving),
                format_amount(d.total),
            ]
        })
        .collect();

    render_table(
        &[
            "ID",
            "NAME",
            "COUNT",
            "MIN/TX",
            "BIZ HRS",
            "IT HRS",
            "IT SAVING",
            "BIZ SAVING",
            "TOTAL",
        ],
        rows,
        2,
    )
}

pub fn render_totals(totals: &Totals) -> String {
    render_table(
        &["PROJECTS", "IT HRS", "IT SAVING", "BIZ SAVING", "TOTAL"],
        vec![vec![
            totals.projects.to_string(),
            format_amount(totals.it_hours),
            format_amount(totals.it_saving),
            format_amount(totals.business_saving),
            format_amount(totals.total),
        ]],
        0,
    )
}

/// Columns before `text_columns` are left-aligned; the rest right-aligned.
fn render_table(headers: &[&str], rows: Vec<Vec<String>>, text_columns: usize) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, &width))| {
                if i < text_columns {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.to_vec())];
    out.extend(
        rows.iter()
            .map(|row| line(row.iter().map(String::as_str).collect())),
    );
    out.join("\n")
}

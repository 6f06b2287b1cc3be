//! Project command implementations

use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{parse_filter_params, CommandContext, OutputFormat};
use crate::client::models::{Project, ProjectRequest};
use crate::client::ProjectsApi;
use crate::error::{InputError, Result};
use crate::output::{self, json};
use crate::request::input_document;

/// Project record for table display
#[derive(Debug, Tabled, Serialize)]
struct ProjectDisplay {
    #[tabled(rename = "PROJECT ID")]
    id: String,
    #[tabled(rename = "CREATED AT")]
    created_at: String,
    #[tabled(rename = "UPDATED AT")]
    updated_at: String,
    #[tabled(rename = "TAGS")]
    tags: String,
    #[tabled(rename = "GROUPS")]
    groups: String,
}

impl From<&Project> for ProjectDisplay {
    fn from(project: &Project) -> Self {
        let mut tags: Vec<String> = project
            .tags
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        tags.sort();

        Self {
            id: project.id.clone(),
            created_at: project
                .created_at
                .map(|t| t.format("%m-%d-%y %H:%M:%S").to_string())
                .unwrap_or_default(),
            updated_at: project
                .updated_at
                .map(|t| t.format("%m-%d-%y %H:%M:%S").to_string())
                .unwrap_or_default(),
            tags: tags.join(","),
            groups: project.groups.join(";"),
        }
    }
}

/// Run the project create command. Unlike scans, a project cannot be
/// created from an empty document.
pub async fn create(
    ctx: &CommandContext,
    input_file: Option<&Path>,
    input: Option<&str>,
) -> Result<()> {
    let document = input_document(input_file, input)?.ok_or(InputError::Missing)?;
    let request: ProjectRequest =
        serde_json::from_str(&document).map_err(InputError::Malformed)?;

    let project = ctx.client.create_project(&request).await?;
    output::print_items(&[ProjectDisplay::from(&project)], ctx.format)
}

/// Run the project list command
pub async fn list(ctx: &CommandContext, filters: &[String]) -> Result<()> {
    let params = parse_filter_params(filters)?;
    let collection = ctx.client.list_projects(&params).await?;

    let rows: Vec<ProjectDisplay> = collection
        .projects
        .iter()
        .map(ProjectDisplay::from)
        .collect();
    output::print_items(&rows, ctx.format)
}

/// Run the project show command
pub async fn show(ctx: &CommandContext, project_id: &str) -> Result<()> {
    let project = ctx.client.get_project(project_id).await?;
    output::print_items(&[ProjectDisplay::from(&project)], ctx.format)
}

/// Run the project delete command over one or more IDs
pub async fn delete(ctx: &CommandContext, project_ids: &[String]) -> Result<()> {
    for project_id in project_ids {
        ctx.client.delete_project(project_id).await?;
        println!("{} Deleted project {project_id}", "✓".green());
    }
    Ok(())
}

/// Run the project tags command
pub async fn tags(ctx: &CommandContext) -> Result<()> {
    let tags = ctx.client.project_tags().await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&tags)?),
        _ => {
            if tags.is_empty() {
                println!("No results found.");
            }
            for tag in tags {
                println!("{tag}");
            }
        }
    }
    Ok(())
}

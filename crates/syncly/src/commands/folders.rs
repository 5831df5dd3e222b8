//! Folder command handlers.

use serde_json::json;
use tabled::Tabled;

use syncly_api::models::{DbStatus, FileError, Folder};
use syncly_api::{Client, Pagination};

use crate::cli::{FoldersArgs, FoldersCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct FolderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Type")]
    folder_type: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Shared")]
    shared: usize,
    #[tabled(rename = "State")]
    state: String,
}

fn folder_row(f: &Folder, color: bool) -> FolderRow {
    let state = if f.paused { "paused" } else { "active" };
    FolderRow {
        id: f.id.clone(),
        label: util::or_dash(&f.label).to_owned(),
        folder_type: f.folder_type.clone(),
        path: f.path.clone(),
        shared: f.devices.len(),
        state: output::paint_state(state, color),
    }
}

#[derive(Tabled)]
struct FileErrorRow {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Error")]
    error: String,
}

fn file_error_row(e: &FileError) -> FileErrorRow {
    FileErrorRow {
        path: e.path.clone(),
        error: e.error.clone(),
    }
}

fn detail(f: &Folder) -> String {
    let mut lines = vec![
        format!("ID:        {}", f.id),
        format!("Label:     {}", util::or_dash(&f.label)),
        format!("Path:      {}", f.path),
        format!("Type:      {}", f.folder_type),
        format!("Paused:    {}", f.paused),
        format!("Rescan:    every {}s", f.rescan_interval_s),
        format!(
            "Watcher:   {}",
            if f.fs_watcher_enabled { "enabled" } else { "disabled" }
        ),
    ];
    if !f.versioning.versioning_type.is_empty() {
        lines.push(format!("Versioning: {}", f.versioning.versioning_type));
    }
    for device in &f.devices {
        lines.push(format!("Shared with: {}", device.device_id));
    }
    lines.join("\n")
}

fn status_detail(s: &DbStatus, color: bool) -> String {
    let state = if s.invalid.is_empty() {
        s.state.clone()
    } else {
        format!("{} ({})", s.state, s.invalid)
    };
    [
        format!("State:    {}", output::paint_state(&state, color)),
        format!(
            "Global:   {} files, {}",
            s.global_files,
            util::format_bytes(s.global_bytes)
        ),
        format!(
            "Local:    {} files, {}",
            s.local_files,
            util::format_bytes(s.local_bytes)
        ),
        format!(
            "Needed:   {} items, {}",
            s.need_total_items,
            util::format_bytes(s.need_bytes)
        ),
        format!("Errors:   {}", s.pull_errors),
    ]
    .join("\n")
}

// ── Handler ──────────────────────────────────────────────────────────

pub async fn handle(client: &Client, args: FoldersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(global.color);
    match args.command {
        FoldersCommand::List => {
            let folders = client.get_config_folders().await?;
            let out = output::render_list(
                global.output,
                &folders,
                |f| folder_row(f, color),
                |f| f.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FoldersCommand::Get { id } => {
            let folder = client.get_config_folder(&id).await.map_err(|e| not_found(e, &id))?;
            let out = output::render_single(global.output, &folder, detail, |f| f.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FoldersCommand::Pause { id } => set_paused(client, &id, true, global).await,
        FoldersCommand::Resume { id } => set_paused(client, &id, false, global).await,

        FoldersCommand::Scan { id, sub, next } => {
            client
                .post_db_scan(id.as_deref(), sub.as_deref(), next)
                .await?;
            let what = id.as_deref().unwrap_or("all folders");
            output::notice(&format!("Scan requested for {what}"), global.quiet);
            Ok(())
        }

        FoldersCommand::Status { id } => {
            let status = client.get_db_status(&id).await.map_err(|e| not_found(e, &id))?;
            let out = output::render_single(
                global.output,
                &status,
                |s| status_detail(s, color),
                |s| s.state.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FoldersCommand::Errors { id, page, perpage } => {
            let paging = Pagination {
                page,
                perpage,
                ..Pagination::default()
            };
            let errors = client.get_folder_errors(&id, &paging).await.map_err(|e| not_found(e, &id))?;
            let out = output::render_list(
                global.output,
                &errors.errors,
                file_error_row,
                |e| e.path.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

async fn set_paused(client: &Client, id: &str, paused: bool, global: &GlobalOpts) -> Result<(), CliError> {
    client
        .patch_config_folder(id, &json!({ "paused": paused }))
        .await
        .map_err(|e| not_found(e, id))?;
    let verb = if paused { "paused" } else { "resumed" };
    output::notice(&format!("Folder '{id}' {verb}"), global.quiet);
    Ok(())
}

fn not_found(err: syncly_api::Error, id: &str) -> CliError {
    if err.is_not_found() {
        CliError::NotFound {
            resource_type: "folder".into(),
            identifier: id.into(),
            list_command: "folders list".into(),
        }
    } else {
        err.into()
    }
}

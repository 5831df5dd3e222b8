//! Pending device and folder offers.

use serde::Serialize;
use tabled::Tabled;

use syncly_api::Client;

use crate::cli::{GlobalOpts, PendingArgs, PendingCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct PendingDeviceView {
    device: String,
    name: String,
    address: String,
    time: String,
}

#[derive(Tabled)]
struct PendingDeviceRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Since")]
    time: String,
}

fn pending_device_row(v: &PendingDeviceView) -> PendingDeviceRow {
    PendingDeviceRow {
        device: v.device.clone(),
        name: util::or_dash(&v.name).to_owned(),
        address: v.address.clone(),
        time: v.time.clone(),
    }
}

/// One (folder, offering device) pair.
#[derive(Serialize)]
struct PendingFolderView {
    folder: String,
    label: String,
    offered_by: String,
    time: String,
    encrypted: bool,
}

#[derive(Tabled)]
struct PendingFolderRow {
    #[tabled(rename = "Folder")]
    folder: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Offered By")]
    offered_by: String,
    #[tabled(rename = "Encrypted")]
    encrypted: bool,
    #[tabled(rename = "Since")]
    time: String,
}

fn pending_folder_row(v: &PendingFolderView) -> PendingFolderRow {
    PendingFolderRow {
        folder: v.folder.clone(),
        label: util::or_dash(&v.label).to_owned(),
        offered_by: util::short_id(&v.offered_by).to_owned(),
        encrypted: v.encrypted,
        time: v.time.clone(),
    }
}

pub async fn handle(client: &Client, args: PendingArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        PendingCommand::Devices => {
            let views: Vec<PendingDeviceView> = client
                .get_cluster_pending_devices()
                .await?
                .into_iter()
                .map(|(device, p)| PendingDeviceView {
                    device,
                    name: p.name,
                    address: p.address,
                    time: p.time,
                })
                .collect();
            let out = output::render_list(global.output, &views, pending_device_row, |v| {
                v.device.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PendingCommand::Folders { device } => {
            let pending = client.get_cluster_pending_folders(device.as_deref()).await?;
            let views: Vec<PendingFolderView> = pending
                .into_iter()
                .flat_map(|(folder, p)| {
                    p.offered_by
                        .into_iter()
                        .map(move |(offered_by, offer)| PendingFolderView {
                            folder: folder.clone(),
                            label: offer.label,
                            offered_by,
                            time: offer.time,
                            encrypted: offer.receive_encrypted || offer.remote_encrypted,
                        })
                })
                .collect();
            let out = output::render_list(global.output, &views, pending_folder_row, |v| {
                v.folder.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

use anyhow::Result;
use eyecare_core::scan::{ScanRecord, ScanReviewDraft};
use eyecare_core::view::ListView;
use eyecare_interaction::EyecareClient;
use std::path::Path;

use super::{request_failure, service_failure};
use crate::render;

pub async fn list(client: &EyecareClient) -> Result<()> {
    let mut view: ListView<ScanRecord> = ListView::new();
    let ticket = view.begin_load();
    view.apply(ticket, client.scans().list().await);

    if let Some(banner) = view.banner() {
        render::banner(banner);
        anyhow::bail!("Could not load scans");
    }
    if view.items().is_empty() {
        println!("No scans yet. Upload one with `eyecare scans upload <image>`.");
    }
    for scan in view.items() {
        render::scan_row(scan);
    }
    Ok(())
}

pub async fn show(client: &EyecareClient, id: u64) -> Result<()> {
    let scans = client.scans();
    let scan = scans.get(id).await.map_err(request_failure)?;
    render::scan_detail(&scan, scans.image_url(&scan));
    Ok(())
}

pub async fn upload(client: &EyecareClient, path: &Path) -> Result<()> {
    let scans = client.scans();
    let scan = scans.upload(path).await.map_err(service_failure)?;
    println!("Analysis complete.");
    render::scan_detail(&scan, scans.image_url(&scan));
    Ok(())
}

pub async fn review(
    client: &EyecareClient,
    id: u64,
    diagnosis: String,
    recommendations: String,
) -> Result<()> {
    let scans = client.scans();
    let scan = scans.get(id).await.map_err(request_failure)?;
    let draft = ScanReviewDraft::new(diagnosis, recommendations);
    let review = scans
        .submit_review(&scan, &draft)
        .await
        .map_err(service_failure)?;
    println!("Review submitted for scan #{id}.");
    render::scan_review(&review);
    Ok(())
}

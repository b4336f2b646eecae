use anyhow::Result;
use chrono::{DateTime, Utc};
use eyecare_core::consultation::{
    ConsultationAction, ConsultationBoard, ConsultationDraft, ConsultationStatus,
};
use eyecare_interaction::EyecareClient;

use super::service_failure;
use crate::render;

async fn load_board(client: &EyecareClient) -> Result<ConsultationBoard> {
    let mut board = ConsultationBoard::new();
    let ticket = board.begin_load();
    board.apply_load(ticket, client.consultations().list().await);
    if let Some(banner) = board.view().banner() {
        render::banner(banner);
        anyhow::bail!("Could not load consultations");
    }
    Ok(board)
}

pub async fn list(client: &EyecareClient, status: Option<ConsultationStatus>) -> Result<()> {
    let board = load_board(client).await?;
    render::status_counts(&board.counts());

    let capabilities = client.auth().capabilities();
    for row in board
        .rows(&capabilities)
        .iter()
        .filter(|row| status.is_none_or(|s| row.status == s))
    {
        render::consultation_row(row);
    }
    Ok(())
}

pub async fn request(
    client: &EyecareClient,
    specialist_id: Option<u64>,
    scan_id: Option<u64>,
    description: String,
    scheduled_date: Option<DateTime<Utc>>,
) -> Result<()> {
    if specialist_id.is_none() {
        let specialists = client.specialists().list().await;
        if !specialists.is_empty() {
            println!("Available specialists:");
            specialists.iter().for_each(render::specialist);
        }
    }

    let draft = ConsultationDraft {
        specialist_id,
        scan_id,
        description,
        scheduled_date,
    };
    let created = client
        .consultations()
        .request(&draft)
        .await
        .map_err(service_failure)?;
    println!(
        "Consultation #{} requested ({}).",
        created.id,
        created.status.label()
    );
    Ok(())
}

/// Runs `action` against the row as currently listed, then shows the
/// confirmed row.
pub async fn act(client: &EyecareClient, id: u64, action: ConsultationAction) -> Result<()> {
    let mut board = load_board(client).await?;
    let Some(displayed) = board.get(id).cloned() else {
        anyhow::bail!("Consultation #{id} is not in your list");
    };

    let confirmed = client
        .consultations()
        .perform(&displayed, action)
        .await
        .map_err(service_failure)?;
    board.confirm(confirmed);

    let capabilities = client.auth().capabilities();
    if let Some(row) = board.rows(&capabilities).iter().find(|row| row.id == id) {
        println!("Consultation {}.", action.past_tense());
        render::consultation_row(row);
    }
    Ok(())
}


use anyhow::Result;
use eyecare_core::article::ArticleCategory;
use eyecare_core::contact::ContactMessage;
use eyecare_interaction::EyecareClient;
use eyecare_interaction::services::RouteStatus;

use super::{request_failure, service_failure};
use crate::render;

pub async fn specialists(client: &EyecareClient) {
    let specialists = client.specialists().list().await;
    if specialists.is_empty() {
        println!("No specialists available.");
    }
    specialists.iter().for_each(render::specialist);
}

pub async fn articles(client: &EyecareClient, category: Option<ArticleCategory>) -> Result<()> {
    let articles = client
        .articles()
        .list_in(category)
        .await
        .map_err(request_failure)?;
    if articles.is_empty() {
        println!("No articles found.");
    }
    articles.iter().for_each(render::article);
    Ok(())
}

pub async fn contact(
    client: &EyecareClient,
    name: String,
    email: String,
    subject: String,
    message: String,
) -> Result<()> {
    let message = ContactMessage {
        name,
        email,
        subject,
        message,
    };
    client
        .contact()
        .send(&message)
        .await
        .map_err(service_failure)?;
    println!("Thank you for your message. We will get back to you soon.");
    Ok(())
}

pub async fn doctor(client: &EyecareClient) -> Result<()> {
    println!("API: {}", client.resources().base_url());
    let reports = client.check_routes().await;
    for report in &reports {
        let outcome = match &report.status {
            RouteStatus::Present => "ok".to_string(),
            RouteStatus::Missing => "NOT FOUND".to_string(),
            RouteStatus::Unreachable(err) => format!("unreachable ({err})"),
        };
        println!("  {:<14} {:<32} {}", report.name, report.path, outcome);
    }

    let missing = reports.iter().filter(|r| r.is_missing()).count();
    if missing > 0 {
        anyhow::bail!("{missing} configured route(s) are missing; check config.toml [routes]");
    }
    Ok(())
}

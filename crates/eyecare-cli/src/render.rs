//! Terminal rendering of lists and records.

use eyecare_core::article::Article;
use eyecare_core::consultation::{ConsultationRow, StatusCounts};
use eyecare_core::scan::{ScanRecord, ScanReview};
use eyecare_core::specialist::SpecialistProfile;
use eyecare_core::view::Banner;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn banner(banner: &Banner) {
    eprintln!("! {}", banner.message);
}

pub fn scan_row(scan: &ScanRecord) {
    println!(
        "#{:<5} {:<15} {:>6}  {:<6}  {}  {}",
        scan.id,
        scan.condition_detected.label(),
        scan.confidence_percent(),
        scan.severity().to_string(),
        if scan.is_reviewed { "reviewed" } else { "pending " },
        scan.created_at.format(DATE_FORMAT)
    );
}

pub fn scan_detail(scan: &ScanRecord, image_url: Option<String>) {
    println!("Scan #{}", scan.id);
    println!("  Condition:   {}", scan.condition_detected.label());
    println!("  Confidence:  {}", scan.confidence_percent());
    println!("  Severity:    {}", scan.severity());
    println!("  Taken:       {}", scan.created_at.format(DATE_FORMAT));
    if let Some(url) = image_url {
        println!("  Image:       {url}");
    }
    if !scan.recommendations.is_empty() {
        println!("  AI advice:   {}", scan.recommendations);
    }
    match scan.visible_review() {
        Some(review) => scan_review(review),
        None => println!("  Awaiting specialist review"),
    }
}

pub fn scan_review(review: &ScanReview) {
    let by = if review.specialist_name.is_empty() {
        "specialist"
    } else {
        review.specialist_name.as_str()
    };
    println!(
        "  Review by {by} on {}",
        review.created_at.format(DATE_FORMAT)
    );
    println!("    Diagnosis:       {}", review.diagnosis);
    println!("    Recommendations: {}", review.recommendations);
}

pub fn consultation_row(row: &ConsultationRow) {
    let actions: Vec<&str> = row
        .actions
        .iter()
        .map(|action| action.button_label(row.status))
        .collect();
    println!(
        "#{:<5} {:<15} {}{}",
        row.id,
        row.status_label,
        row.description,
        if actions.is_empty() {
            String::new()
        } else {
            format!("  [{}]", actions.join(" | "))
        }
    );
}

pub fn status_counts(counts: &StatusCounts) {
    println!(
        "{} total: {} pending, {} approved, {} completed, {} cancelled",
        counts.total(),
        counts.pending,
        counts.approved,
        counts.completed,
        counts.cancelled
    );
}

pub fn specialist(specialist: &SpecialistProfile) {
    println!("#{:<5} {}", specialist.id, specialist.display_name());
}

pub fn article(article: &Article) {
    println!(
        "#{:<5} [{}] {}",
        article.id,
        article.category.label(),
        article.title
    );
    if !article.author_name.is_empty() {
        println!("       by {}", article.author_name);
    }
}

//! Eye scan domain model.
//!
//! A scan is created by the backend when an image is uploaded; the client only
//! ever reads it. The one mutation, attaching a specialist review, also
//! happens server-side and is observed through `is_reviewed`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// The closed set of conditions the classifier reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Condition {
    Cataract,
    Redness,
    Dryness,
    Glaucoma,
    Conjunctivitis,
    Normal,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Cataract => "Cataract",
            Condition::Redness => "Redness",
            Condition::Dryness => "Dryness",
            Condition::Glaucoma => "Glaucoma",
            Condition::Conjunctivitis => "Conjunctivitis",
            Condition::Normal => "Normal",
        }
    }
}

/// Display severity derived from condition and confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A specialist's assessment attached to a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReview {
    pub diagnosis: String,
    pub recommendations: String,
    #[serde(default)]
    pub specialist_name: String,
    pub created_at: DateTime<Utc>,
}

/// An uploaded eye image and its AI classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: u64,
    /// Path relative to the media base URL, or an absolute URL.
    #[serde(rename = "image", default)]
    pub image_ref: String,
    pub condition_detected: Condition,
    #[serde(deserialize_with = "unit_interval")]
    pub confidence_score: f64,
    /// AI-generated advice for the detected condition.
    #[serde(default)]
    pub recommendations: String,
    #[serde(default)]
    pub is_reviewed: bool,
    #[serde(rename = "scanreview", alias = "review", default)]
    pub review: Option<ScanReview>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ScanRecord {
    /// The review to render, gated by `is_reviewed` rather than by presence.
    pub fn visible_review(&self) -> Option<&ScanReview> {
        if self.is_reviewed {
            self.review.as_ref()
        } else {
            None
        }
    }

    pub fn severity(&self) -> Severity {
        if self.condition_detected == Condition::Normal {
            Severity::Low
        } else if self.confidence_score > 0.85 {
            Severity::High
        } else if self.confidence_score > 0.75 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    /// Confidence as a percentage with one decimal, e.g. `"87.0%"`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence_score * 100.0)
    }

    /// Resolves `image_ref` against the media base URL.
    pub fn image_url(&self, media_base_url: &str) -> Option<String> {
        let image = self.image_ref.trim();
        if image.is_empty() {
            return None;
        }
        if image.starts_with("http://") || image.starts_with("https://") {
            return Some(image.to_string());
        }
        Some(format!(
            "{}/{}",
            media_base_url.trim_end_matches('/'),
            image.trim_start_matches('/')
        ))
    }
}

fn unit_interval<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(format!(
            "confidence_score {value} is outside [0, 1]"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scan_json() -> serde_json::Value {
        json!({
            "id": 41,
            "user": 12,
            "user_name": "Ada Okafor",
            "image": "/media/eye_scans/left.jpg",
            "condition_detected": "glaucoma",
            "confidence_score": 0.91,
            "recommendations": "Urgent consultation recommended.",
            "created_at": "2024-05-02T09:30:00Z",
            "is_reviewed": false,
            "scanreview": null
        })
    }

    #[test]
    fn test_decodes_backend_record() {
        let scan: ScanRecord = serde_json::from_value(scan_json()).unwrap();
        assert_eq!(scan.condition_detected, Condition::Glaucoma);
        assert_eq!(scan.image_ref, "/media/eye_scans/left.jpg");
        assert!(scan.review.is_none());
        assert_eq!(scan.severity(), Severity::High);
        assert_eq!(scan.confidence_percent(), "91.0%");
    }

    #[test]
    fn test_out_of_range_confidence_is_rejected() {
        let mut body = scan_json();
        body["confidence_score"] = json!(1.4);
        assert!(serde_json::from_value::<ScanRecord>(body).is_err());
    }

    #[test]
    fn test_unknown_condition_is_rejected() {
        let mut body = scan_json();
        body["condition_detected"] = json!("myopia");
        assert!(serde_json::from_value::<ScanRecord>(body).is_err());
    }

    #[test]
    fn test_stale_review_is_hidden_when_not_reviewed() {
        let mut body = scan_json();
        body["scanreview"] = json!({
            "diagnosis": "Early open-angle glaucoma",
            "recommendations": "Pressure test within two weeks",
            "specialist_name": "Dr Eze",
            "created_at": "2024-05-03T10:00:00Z"
        });
        let mut scan: ScanRecord = serde_json::from_value(body).unwrap();
        assert!(scan.review.is_some());
        assert!(scan.visible_review().is_none());

        scan.is_reviewed = true;
        assert_eq!(scan.visible_review().unwrap().specialist_name, "Dr Eze");
    }

    #[test]
    fn test_severity_thresholds() {
        let mut scan: ScanRecord = serde_json::from_value(scan_json()).unwrap();
        scan.confidence_score = 0.80;
        assert_eq!(scan.severity(), Severity::Medium);
        scan.confidence_score = 0.75;
        assert_eq!(scan.severity(), Severity::Low);
        scan.condition_detected = Condition::Normal;
        scan.confidence_score = 0.95;
        assert_eq!(scan.severity(), Severity::Low);
    }

    #[test]
    fn test_image_url_resolution() {
        let mut scan: ScanRecord = serde_json::from_value(scan_json()).unwrap();
        assert_eq!(
            scan.image_url("http://localhost:8000/").unwrap(),
            "http://localhost:8000/media/eye_scans/left.jpg"
        );
        scan.image_ref = "https://cdn.example.com/a.jpg".to_string();
        assert_eq!(
            scan.image_url("http://localhost:8000").unwrap(),
            "https://cdn.example.com/a.jpg"
        );
        scan.image_ref.clear();
        assert!(scan.image_url("http://localhost:8000").is_none());
    }
}

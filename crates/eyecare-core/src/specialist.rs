//! Specialist directory entries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialistProfile {
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub specialization: Option<String>,
}

impl SpecialistProfile {
    /// "Dr. First Last - Specialization", as listed in the request form.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        let name = if name.is_empty() {
            format!("Specialist #{}", self.id)
        } else {
            format!("Dr. {name}")
        };
        match self.specialization.as_deref().map(str::trim) {
            Some(spec) if !spec.is_empty() => format!("{name} - {spec}"),
            _ => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_name() {
        let s: SpecialistProfile = serde_json::from_value(json!({
            "id": 3, "first_name": "Chidi", "last_name": "Eze",
            "specialization": "Glaucoma", "email": "eze@example.com"
        }))
        .unwrap();
        assert_eq!(s.display_name(), "Dr. Chidi Eze - Glaucoma");
    }

    #[test]
    fn test_display_name_without_details() {
        let s: SpecialistProfile =
            serde_json::from_value(json!({"id": 3, "specialization": null})).unwrap();
        assert_eq!(s.display_name(), "Specialist #3");
    }
}

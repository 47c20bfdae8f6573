//! Diagnosis → subject line mapping.

/// Subject used when the diagnosis is absent or unrecognised.
pub const DEFAULT_SUBJECT: &str = "Asbestos Exposure Lead";

/// Subject line stored with a lead.
pub fn subject_for(diagnosis: Option<&str>) -> &'static str {
    match diagnosis {
        Some("mesothelioma") => "Mesothelioma Lead",
        Some("lung-cancer") => "Lung Cancer Lead",
        Some("asbestosis") => "Asbestosis Lead",
        _ => DEFAULT_SUBJECT,
    }
}

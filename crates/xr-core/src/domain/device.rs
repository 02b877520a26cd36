//! Headset vendor detection.
//!
//! The translator only has tested axis conventions for Meta (formerly Oculus)
//! standalone headsets.  Other vendors may report yaw or pitch with a different
//! handedness, so the bridge warns before starting on them.

/// Manufacturer strings accepted as supported, compared case-insensitively.
pub const SUPPORTED_MANUFACTURERS: &[&str] = &["META", "OCULUS"];

/// Returns `true` if `manufacturer` names a supported headset vendor.
pub fn is_supported_manufacturer(manufacturer: &str) -> bool {
    let manufacturer = manufacturer.trim();
    SUPPORTED_MANUFACTURERS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(manufacturer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_and_oculus_are_supported_in_any_case() {
        assert!(is_supported_manufacturer("META"));
        assert!(is_supported_manufacturer("meta"));
        assert!(is_supported_manufacturer("Oculus"));
    }

    #[test]
    fn test_other_vendors_are_not_supported() {
        assert!(!is_supported_manufacturer("Pico"));
        assert!(!is_supported_manufacturer(""));
        assert!(!is_supported_manufacturer("metaverse"));
    }
}

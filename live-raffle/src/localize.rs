use std::error::Error;

const LIVE_NOT_FOUND: &str = "Canlı yayın bulunamadı";
const USER_NOT_FOUND: &str = "Böyle bir kullanıcı bulunamadı";

pub const UNKNOWN_ERROR: &str = "Bilinmeyen bir hata oluştu";

/// Known causes reported by the live source, checked in order.
const KNOWN_CAUSES: [(&str, &str); 9] = [
    ("LIVE has ended", LIVE_NOT_FOUND),
    ("LIVE_HAS_ENDED", LIVE_NOT_FOUND),
    ("Failed to retrieve room_id", USER_NOT_FOUND),
    ("19881007", USER_NOT_FOUND),
    ("user_not_found", USER_NOT_FOUND),
    ("API Error", USER_NOT_FOUND),
    ("Room not found", LIVE_NOT_FOUND),
    ("Connection closed", "Bağlantı kesildi"),
    ("Network error", "İnternet bağlantınızı kontrol edin"),
];

/// Translates a raw live source error into a message for the operator
pub fn localize(raw: impl AsRef<str>) -> &'static str {
    let raw = raw.as_ref();
    KNOWN_CAUSES
        .iter()
        .find(|(cause, _)| raw.contains(cause))
        .map(|(_, message)| *message)
        .unwrap_or(UNKNOWN_ERROR)
}

pub fn localize_error(error: &impl Error) -> &'static str {
    localize(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::live_error::LiveError;

    #[test]
    fn ended_live_is_reported_as_not_found() {
        assert_eq!(localize("Error: LIVE has ended unexpectedly"), LIVE_NOT_FOUND);
    }

    #[test]
    fn unrelated_error_falls_back_to_unknown() {
        assert_eq!(localize("totally unrelated"), UNKNOWN_ERROR);
        assert_eq!(localize(""), UNKNOWN_ERROR);
    }

    #[test]
    fn missing_room_id_means_missing_user() {
        assert_eq!(
            localize("Failed to retrieve room_id from page source. user_not_found"),
            USER_NOT_FOUND
        );
    }

    #[test]
    fn first_matching_cause_wins() {
        // "Room not found" comes before "Network error" in the table
        assert_eq!(localize("Network error: Room not found"), LIVE_NOT_FOUND);
    }

    #[test]
    fn typed_errors_are_localized_by_their_display_text() {
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert_eq!(
            localize_error(&LiveError::Network(refused)),
            "İnternet bağlantınızı kontrol edin"
        );
        assert_eq!(localize_error(&LiveError::Timeout), UNKNOWN_ERROR);
    }
}

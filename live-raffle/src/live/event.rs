use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub comment: String,
    pub nickname: String,
    #[serde(default)]
    pub profile_picture_url: String,
    #[serde(deserialize_with = "user_id")]
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveEvent {
    Chat(ChatMessage),
    Error(String),
    Disconnected,
}

/// Platforms send user ids either as strings or as plain numbers
fn user_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum UserId {
        Text(String),
        Number(u64),
    }

    Ok(match UserId::deserialize(deserializer)? {
        UserId::Text(id) => id,
        UserId::Number(id) => id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_user_id_is_read_as_text() {
        let chat: ChatMessage = serde_json::from_str(
            r#"{"comment":"join","nickname":"Ayşe","profilePictureUrl":"https://p/a.jpg","userId":6812345678901234567}"#,
        )
        .unwrap();

        assert_eq!(chat.user_id, "6812345678901234567");
        assert_eq!(chat.nickname, "Ayşe");
    }

    #[test]
    fn missing_profile_picture_defaults_to_empty() {
        let chat: ChatMessage =
            serde_json::from_str(r#"{"comment":"join","nickname":"n","userId":"42"}"#).unwrap();

        assert_eq!(chat.user_id, "42");
        assert!(chat.profile_picture_url.is_empty());
    }
}

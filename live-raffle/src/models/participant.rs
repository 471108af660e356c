use crate::live::event::ChatMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(rename = "userId")]
    pub id: String,
    #[serde(rename = "username")]
    pub display_name: String,
    pub message: String,
    #[serde(rename = "profilePicture")]
    pub avatar_url: String,
}

impl From<&ChatMessage> for Participant {
    fn from(chat: &ChatMessage) -> Self {
        Participant {
            id: chat.user_id.clone(),
            display_name: chat.nickname.clone(),
            message: chat.comment.clone(),
            avatar_url: chat.profile_picture_url.clone(),
        }
    }
}

use crate::{errors::protocol_error::ProtocolError, models::participant::Participant};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectToRoom {
    pub username: String,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default, rename = "allowDuplicates")]
    pub allow_duplicates: bool,
    #[serde(default)]
    pub email: Option<String>,
}

/// Commands sent by the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    ConnectToRoom(ConnectToRoom),
    DrawWinner,
    ResetRaffle,
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

impl ClientCommand {
    /// Parses a `{"event": ..., "data": ...}` text frame
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        let envelope: Envelope = serde_json::from_str(text)?;

        match envelope.event.as_str() {
            "connect-to-room" => Ok(ClientCommand::ConnectToRoom(serde_json::from_value(
                envelope.data,
            )?)),
            "draw-winner" => Ok(ClientCommand::DrawWinner),
            "reset-raffle" => Ok(ClientCommand::ResetRaffle),
            _ => Err(ProtocolError::UnknownEvent(envelope.event)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
}

/// Events sent to the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    ConnectionSuccess {
        #[serde(rename = "type")]
        kind: StatusKind,
        message: String,
    },
    DuplicateEntry {
        username: String,
        message: String,
        #[serde(rename = "profilePicture")]
        profile_picture: String,
    },
    ValidMessage(Participant),
    ParticipantCount(usize),
    Winner(Participant),
    Error {
        message: String,
    },
    RaffleReset {},
}

impl ServerEvent {
    pub fn connection_success(message: impl Into<String>) -> Self {
        ServerEvent::ConnectionSuccess {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn connection_error(message: impl Into<String>) -> Self {
        ServerEvent::ConnectionSuccess {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerEvent::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_connect_to_room() {
        let command = ClientCommand::parse(
            r#"{"event":"connect-to-room","data":{"username":"alice","keyword":"Join","allowDuplicates":true,"email":"op@example.com"}}"#,
        )
        .unwrap();

        assert_eq!(
            command,
            ClientCommand::ConnectToRoom(ConnectToRoom {
                username: "alice".to_string(),
                keyword: Some("Join".to_string()),
                allow_duplicates: true,
                email: Some("op@example.com".to_string()),
            })
        );
    }

    #[test]
    fn optional_connect_fields_default() {
        let command =
            ClientCommand::parse(r#"{"event":"connect-to-room","data":{"username":"alice"}}"#)
                .unwrap();

        let ClientCommand::ConnectToRoom(request) = command else {
            panic!("expected connect-to-room");
        };
        assert_eq!(request.keyword, None);
        assert!(!request.allow_duplicates);
        assert_eq!(request.email, None);
    }

    #[test]
    fn commands_without_data_parse() {
        assert_eq!(
            ClientCommand::parse(r#"{"event":"draw-winner"}"#).unwrap(),
            ClientCommand::DrawWinner
        );
        assert_eq!(
            ClientCommand::parse(r#"{"event":"reset-raffle","data":{}}"#).unwrap(),
            ClientCommand::ResetRaffle
        );
    }

    #[test]
    fn rejects_unknown_and_malformed_frames() {
        assert!(matches!(
            ClientCommand::parse(r#"{"event":"shutdown"}"#),
            Err(ProtocolError::UnknownEvent(event)) if event == "shutdown"
        ));
        assert!(matches!(
            ClientCommand::parse("draw-winner"),
            Err(ProtocolError::InvalidFrame(_))
        ));
        assert!(matches!(
            ClientCommand::parse(r#"{"event":"connect-to-room","data":{}}"#),
            Err(ProtocolError::InvalidFrame(_))
        ));
    }

    #[test]
    fn events_use_wire_names() {
        let participant = Participant {
            id: "42".to_string(),
            display_name: "Ayşe".to_string(),
            message: "join please".to_string(),
            avatar_url: "https://p/42.jpg".to_string(),
        };

        assert_eq!(
            serde_json::to_value(ServerEvent::ValidMessage(participant.clone())).unwrap(),
            json!({
                "event": "valid-message",
                "data": {
                    "username": "Ayşe",
                    "message": "join please",
                    "profilePicture": "https://p/42.jpg",
                    "userId": "42"
                }
            })
        );
        assert_eq!(
            serde_json::to_value(ServerEvent::connection_error("Bağlantı kesildi")).unwrap(),
            json!({
                "event": "connection-success",
                "data": { "type": "error", "message": "Bağlantı kesildi" }
            })
        );
        assert_eq!(
            serde_json::to_value(ServerEvent::ParticipantCount(3)).unwrap(),
            json!({ "event": "participant-count", "data": 3 })
        );
        assert_eq!(
            serde_json::to_value(ServerEvent::RaffleReset {}).unwrap(),
            json!({ "event": "raffle-reset", "data": {} })
        );
        assert_eq!(
            serde_json::to_value(ServerEvent::DuplicateEntry {
                username: "Ayşe".to_string(),
                message: "Bu kullanıcı zaten katılmış!".to_string(),
                profile_picture: "https://p/42.jpg".to_string(),
            })
            .unwrap(),
            json!({
                "event": "duplicate-entry",
                "data": {
                    "username": "Ayşe",
                    "message": "Bu kullanıcı zaten katılmış!",
                    "profilePicture": "https://p/42.jpg"
                }
            })
        );
    }
}

use super::*;
use lds_core::ID;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;

/// Events pushed from the server to sockets.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Everyone in the lobby, sent once to a socket after it joins.
    CurrentPlayers(HashMap<ID<Player>, Player>),
    /// Someone joined.
    NewPlayer(Player),
    /// Someone moved.
    PlayerMoved(Player),
    /// Someone left; carries their player id.
    Disconnected(ID<Player>),
    /// A chat line was submitted.
    #[serde(rename = "new message")]
    NewMessage { username: String, message: String },
}

impl ServerMessage {
    pub fn chat(username: &str, message: &str) -> Self {
        Self::NewMessage {
            username: username.to_string(),
            message: message.to_string(),
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Events received from sockets.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    PlayerMovement(Movement),
}

impl ClientMessage {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse(message: &ServerMessage) -> Value {
        serde_json::from_str(&message.to_json()).unwrap()
    }

    #[test]
    fn frames_carry_event_and_data() {
        let player = Player::spawn(ID::default());
        let json = parse(&ServerMessage::NewPlayer(player.clone()));
        assert_eq!(json["event"], "newPlayer");
        assert_eq!(json["data"]["playerId"], player.player_id.to_string());
        assert_eq!(json["data"]["flipX"], false);
    }
    #[test]
    fn current_players_is_keyed_by_player_id() {
        let player = Player::spawn(ID::default());
        let everyone = HashMap::from([(player.player_id, player.clone())]);
        let json = parse(&ServerMessage::CurrentPlayers(everyone));
        assert_eq!(json["event"], "currentPlayers");
        assert_eq!(
            json["data"][player.player_id.to_string()]["x"],
            player.x
        );
    }
    #[test]
    fn chat_event_name_has_a_space() {
        let json = parse(&ServerMessage::chat("ada", "gm"));
        assert_eq!(json["event"], "new message");
        assert_eq!(json["data"]["username"], "ada");
        assert_eq!(json["data"]["message"], "gm");
    }
    #[test]
    fn disconnected_carries_bare_id() {
        let id = ID::<Player>::default();
        let json = parse(&ServerMessage::Disconnected(id));
        assert_eq!(json["event"], "disconnected");
        assert_eq!(json["data"], id.to_string());
    }
    #[test]
    fn parses_movement() {
        let json = r#"{"event":"playerMovement","data":{"x":10,"y":20.5,"flipX":true}}"#;
        match ClientMessage::from_json(json).unwrap() {
            ClientMessage::PlayerMovement(m) => {
                assert_eq!((m.x, m.y, m.flip_x), (10.0, 20.5, true));
            }
        }
        assert!(ClientMessage::from_json(r#"{"event":"teleport","data":{}}"#).is_err());
    }
}

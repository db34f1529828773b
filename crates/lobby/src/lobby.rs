use super::*;
use lds_core::ID;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

type Tx = UnboundedSender<String>;

struct Peer {
    player: Player,
    tx: Tx,
}

/// Everyone currently connected, with an outbound channel per socket.
#[derive(Default)]
pub struct Lobby {
    peers: RwLock<HashMap<ID<Player>, Peer>>,
}

impl Lobby {
    /// Spawns a player for a new socket.
    /// The socket receives the full roster, the others learn of the newcomer.
    pub async fn join(&self, tx: Tx) -> Player {
        let player = Player::spawn(ID::default());
        let mut peers = self.peers.write().await;
        peers.insert(
            player.player_id,
            Peer {
                player: player.clone(),
                tx: tx.clone(),
            },
        );
        let roster = peers
            .iter()
            .map(|(id, peer)| (*id, peer.player.clone()))
            .collect();
        let _ = tx.send(ServerMessage::CurrentPlayers(roster).to_json());
        Self::send(&peers, Some(player.player_id), &ServerMessage::NewPlayer(player.clone()));
        log::debug!("[lobby] player {} joined ({} online)", player.player_id, peers.len());
        player
    }
    /// Applies a movement and relays it to everyone else.
    pub async fn moved(&self, id: ID<Player>, movement: &Movement) {
        let mut peers = self.peers.write().await;
        let Some(peer) = peers.get_mut(&id) else {
            return;
        };
        peer.player.moved(movement);
        let moved = ServerMessage::PlayerMoved(peer.player.clone());
        Self::send(&peers, Some(id), &moved);
    }
    /// Removes a player and tells everyone left.
    pub async fn leave(&self, id: ID<Player>) {
        let mut peers = self.peers.write().await;
        if peers.remove(&id).is_some() {
            Self::send(&peers, None, &ServerMessage::Disconnected(id));
            log::debug!("[lobby] player {} left ({} online)", id, peers.len());
        }
    }
    /// Sends to every socket.
    pub async fn broadcast(&self, message: &ServerMessage) {
        Self::send(&*self.peers.read().await, None, message);
    }
    /// Dispatches a text frame received from `id`.
    pub async fn receive(&self, id: ID<Player>, text: &str) {
        match ClientMessage::from_json(text) {
            Ok(ClientMessage::PlayerMovement(movement)) => self.moved(id, &movement).await,
            Err(e) => log::debug!("[lobby] ignoring frame from {}: {}", id, e),
        }
    }
    pub async fn snapshot(&self) -> HashMap<ID<Player>, Player> {
        self.peers
            .read()
            .await
            .iter()
            .map(|(id, peer)| (*id, peer.player.clone()))
            .collect()
    }
    pub async fn len(&self) -> usize {
        self.peers.read().await.len()
    }
    /// Closed channels are skipped; their bridge removes them on exit.
    fn send(peers: &HashMap<ID<Player>, Peer>, except: Option<ID<Player>>, message: &ServerMessage) {
        let json = message.to_json();
        peers
            .iter()
            .filter(|(id, _)| Some(**id) != except)
            .for_each(|(_, peer)| {
                let _ = peer.tx.send(json.clone());
            });
    }
}

impl Lobby {
    /// Spawns the WebSocket bridge between a socket and the lobby.
    /// The player is removed when the socket closes or errors.
    pub async fn bridge(
        self: Arc<Self>,
        mut session: actix_ws::Session,
        mut streams: actix_ws::MessageStream,
    ) {
        use futures::StreamExt;
        let (tx, mut rx) = unbounded_channel::<String>();
        let id = self.join(tx).await.player_id;
        log::debug!("[bridge {}] connected", id);
        actix_web::rt::spawn(async move {
            'sesh: loop {
                tokio::select! {
                    biased;
                    msg = rx.recv() => match msg {
                        Some(json) => if session.text(json).await.is_err() { break 'sesh },
                        None => break 'sesh,
                    },
                    msg = streams.next() => match msg {
                        Some(Ok(actix_ws::Message::Text(text))) => self.receive(id, &text).await,
                        Some(Ok(actix_ws::Message::Ping(bytes))) => if session.pong(&bytes).await.is_err() { break 'sesh },
                        Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                        Some(Err(_)) => break 'sesh,
                        None => break 'sesh,
                        _ => continue 'sesh,
                    },
                }
            }
            self.leave(id).await;
            let _ = session.close(None).await;
            log::debug!("[bridge {}] disconnected", id);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn socket() -> (Tx, UnboundedReceiver<String>) {
        unbounded_channel()
    }
    fn event(rx: &mut UnboundedReceiver<String>) -> Value {
        serde_json::from_str(&rx.try_recv().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn joining_sends_roster_and_announces() {
        let lobby = Lobby::default();
        let (a_tx, mut a_rx) = socket();
        let (b_tx, mut b_rx) = socket();
        let a = lobby.join(a_tx).await;
        assert_eq!(event(&mut a_rx)["event"], "currentPlayers");
        let b = lobby.join(b_tx).await;
        let roster = event(&mut b_rx);
        assert_eq!(roster["event"], "currentPlayers");
        assert_eq!(roster["data"].as_object().unwrap().len(), 2);
        assert!(roster["data"].get(a.player_id.to_string()).is_some());
        let announced = event(&mut a_rx);
        assert_eq!(announced["event"], "newPlayer");
        assert_eq!(announced["data"]["playerId"], b.player_id.to_string());
        assert!(b_rx.try_recv().is_err());
    }
    #[tokio::test]
    async fn movement_reaches_everyone_else() {
        let lobby = Lobby::default();
        let (a_tx, mut a_rx) = socket();
        let (b_tx, mut b_rx) = socket();
        let a = lobby.join(a_tx).await;
        let _ = lobby.join(b_tx).await;
        while a_rx.try_recv().is_ok() {}
        while b_rx.try_recv().is_ok() {}
        lobby
            .receive(a.player_id, r#"{"event":"playerMovement","data":{"x":7,"y":8,"flipX":true}}"#)
            .await;
        let moved = event(&mut b_rx);
        assert_eq!(moved["event"], "playerMoved");
        assert_eq!(moved["data"]["x"], 7.0);
        assert_eq!(moved["data"]["flipX"], true);
        assert!(a_rx.try_recv().is_err());
        assert_eq!(lobby.snapshot().await[&a.player_id].y, 8.0);
    }
    #[tokio::test]
    async fn leaving_removes_and_notifies() {
        let lobby = Lobby::default();
        let (a_tx, _a_rx) = socket();
        let (b_tx, mut b_rx) = socket();
        let a = lobby.join(a_tx).await;
        let _ = lobby.join(b_tx).await;
        while b_rx.try_recv().is_ok() {}
        lobby.leave(a.player_id).await;
        assert_eq!(lobby.len().await, 1);
        let gone = event(&mut b_rx);
        assert_eq!(gone["event"], "disconnected");
        assert_eq!(gone["data"], a.player_id.to_string());
        lobby.leave(a.player_id).await;
        assert!(b_rx.try_recv().is_err());
        let (c_tx, mut c_rx) = socket();
        let c = lobby.join(c_tx).await;
        let roster = event(&mut c_rx);
        assert_eq!(roster["event"], "currentPlayers");
        let roster = roster["data"].as_object().unwrap();
        assert_eq!(roster.len(), 2);
        assert!(!roster.contains_key(&a.player_id.to_string()));
        assert!(roster.contains_key(&c.player_id.to_string()));
    }
    #[tokio::test]
    async fn broadcast_skips_closed_sockets() {
        let lobby = Lobby::default();
        let (a_tx, a_rx) = socket();
        let (b_tx, mut b_rx) = socket();
        let _ = lobby.join(a_tx).await;
        let _ = lobby.join(b_tx).await;
        drop(a_rx);
        while b_rx.try_recv().is_ok() {}
        lobby.broadcast(&ServerMessage::chat("ada", "hello")).await;
        let chat = event(&mut b_rx);
        assert_eq!(chat["event"], "new message");
        assert_eq!(chat["data"]["message"], "hello");
    }
    #[tokio::test]
    async fn garbage_frames_are_ignored() {
        let lobby = Lobby::default();
        let (a_tx, _a_rx) = socket();
        let a = lobby.join(a_tx).await;
        let before = lobby.snapshot().await;
        lobby.receive(a.player_id, "not json").await;
        assert_eq!(lobby.snapshot().await, before);
    }
}

use lds_core::ID;
use lds_core::Unique;
use serde::Deserialize;
use serde::Serialize;

/// A connected avatar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub player_id: ID<Player>,
    pub x: f64,
    pub y: f64,
    pub flip_x: bool,
}

impl Player {
    /// New player at a random point of the spawn area, facing right.
    pub fn spawn(player_id: ID<Player>) -> Self {
        use rand::Rng;
        let ref mut rng = rand::rng();
        Self {
            player_id,
            x: rng.random_range(lds_core::SPAWN_X) as f64,
            y: rng.random_range(lds_core::SPAWN_Y) as f64,
            flip_x: false,
        }
    }
    pub fn moved(&mut self, movement: &Movement) {
        self.x = movement.x;
        self.y = movement.y;
        self.flip_x = movement.flip_x;
    }
}

impl Unique for Player {
    fn id(&self) -> ID<Self> {
        self.player_id
    }
}

/// Position update sent by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub flip_x: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_inside_the_area() {
        for _ in 0..256 {
            let player = Player::spawn(ID::default());
            assert!(lds_core::SPAWN_X.contains(&(player.x as i64)));
            assert!(lds_core::SPAWN_Y.contains(&(player.y as i64)));
            assert!(!player.flip_x);
        }
    }
    #[test]
    fn movement_overwrites_position() {
        let mut player = Player::spawn(ID::default());
        player.moved(&Movement {
            x: 1.5,
            y: 2.0,
            flip_x: true,
        });
        assert_eq!((player.x, player.y, player.flip_x), (1.5, 2.0, true));
    }
}

//! Async collaborator resolving profile and permission fetches.

use std::cell::RefCell;
use std::rc::Rc;

use frontline_core::{
    GameSnapshot, GameView, PlayerActions, PlayerId, PlayerInteraction, PlayerProfile, PlayerType,
    Relation, TileRef,
};
use futures::FutureExt;
use futures::future::LocalBoxFuture;

/// Fetches that the game server answers asynchronously.
///
/// `None` means the fetch failed; callers keep their previous state.
pub trait GameHost {
    fn profile(&self, player: PlayerId) -> LocalBoxFuture<'static, Option<PlayerProfile>>;

    fn actions(
        &self,
        player: PlayerId,
        tile: TileRef,
    ) -> LocalBoxFuture<'static, Option<PlayerActions>>;
}

/// Host answering from the local snapshot, for offline play.
pub struct SnapshotHost {
    game: Rc<RefCell<GameSnapshot>>,
}

impl SnapshotHost {
    pub fn new(game: Rc<RefCell<GameSnapshot>>) -> Self {
        Self { game }
    }
}

impl GameHost for SnapshotHost {
    fn profile(&self, player: PlayerId) -> LocalBoxFuture<'static, Option<PlayerProfile>> {
        let game = self.game.borrow();
        let profile = game.player(&player).map(|target| {
            let mut profile = PlayerProfile::default();
            if target.player_type != PlayerType::FakeHuman {
                return profile;
            }
            for other in game.player_views() {
                if other.id == target.id {
                    continue;
                }
                let attacked = target
                    .outgoing_attacks
                    .iter()
                    .any(|a| a.target.as_deref() == Some(other.id.as_str()));
                let relation = if attacked {
                    Relation::Hostile
                } else if target.has_embargo_against(other) {
                    Relation::Distrustful
                } else if target.is_friendly(other) {
                    Relation::Friendly
                } else {
                    Relation::Neutral
                };
                profile.relations.insert(other.small_id, relation);
            }
            profile
        });
        futures::future::ready(profile).boxed_local()
    }

    fn actions(
        &self,
        player: PlayerId,
        tile: TileRef,
    ) -> LocalBoxFuture<'static, Option<PlayerActions>> {
        let game = self.game.borrow();
        let actions = game.player(&player).map(|me| {
            let interaction = game.owner(tile).map(|other| {
                if other.id == me.id || !me.alive {
                    return PlayerInteraction::default();
                }
                let allied = me.is_allied_with(other);
                PlayerInteraction {
                    can_send_alliance_request: !allied && other.alive,
                    can_break_alliance: allied,
                    can_donate: me.is_friendly(other),
                    can_target: !me.is_friendly(other),
                    can_embargo: other.alive,
                    can_send_emoji: true,
                }
            });
            PlayerActions {
                can_send_emoji_all_players: me.alive,
                interaction,
            }
        });
        futures::future::ready(actions).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use frontline_core::{Attack, PlayerView};
    use wasm_bindgen_test::wasm_bindgen_test;

    use super::*;

    fn world() -> Rc<RefCell<GameSnapshot>> {
        let mut me = PlayerView::new("me", 1, "Me");
        me.allies.insert("ally".to_string());
        let mut ally = PlayerView::new("ally", 2, "Ally");
        ally.allies.insert("me".to_string());
        let mut nation = PlayerView::new("nation", 3, "Nation");
        nation.player_type = PlayerType::FakeHuman;
        nation.outgoing_attacks.push(Attack {
            target: Some("me".to_string()),
            troops: 100,
        });
        nation.embargoes.insert("ally".to_string());

        let snapshot = GameSnapshot::builder(4, 1)
            .land_rect(0, 0, 4, 1)
            .owned_rect("me", 0, 0, 1, 1)
            .owned_rect("ally", 1, 0, 2, 1)
            .owned_rect("nation", 2, 0, 3, 1)
            .player(me)
            .player(ally)
            .player(nation)
            .build();
        Rc::new(RefCell::new(snapshot))
    }

    #[wasm_bindgen_test]
    async fn test_nation_profile_relations() {
        let host = SnapshotHost::new(world());
        let profile = host.profile("nation".to_string()).await.unwrap_or_default();
        assert_eq!(profile.relation_to(1), Relation::Hostile);
        assert_eq!(profile.relation_to(2), Relation::Distrustful);
    }

    #[wasm_bindgen_test]
    async fn test_human_profile_is_empty() {
        let host = SnapshotHost::new(world());
        let profile = host.profile("ally".to_string()).await;
        assert_eq!(profile, Some(PlayerProfile::default()));
    }

    #[wasm_bindgen_test]
    async fn test_actions_on_ally_tile() {
        let host = SnapshotHost::new(world());
        let actions = host.actions("me".to_string(), 1).await.unwrap_or_default();
        let interaction = actions.interaction();
        assert!(interaction.can_break_alliance);
        assert!(interaction.can_donate);
        assert!(!interaction.can_target);
        assert!(!interaction.can_send_alliance_request);
        assert!(actions.can_send_emoji_all_players);
    }

    #[wasm_bindgen_test]
    async fn test_actions_on_own_tile() {
        let host = SnapshotHost::new(world());
        let actions = host.actions("me".to_string(), 0).await.unwrap_or_default();
        assert_eq!(actions.interaction(), PlayerInteraction::default());
    }

    #[wasm_bindgen_test]
    async fn test_unknown_player_fails() {
        let host = SnapshotHost::new(world());
        assert!(host.actions("ghost".to_string(), 0).await.is_none());
    }
}

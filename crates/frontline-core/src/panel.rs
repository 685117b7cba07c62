//! Diplomacy panel opened on a clicked tile.
//!
//! Shows the tile owner's stats and only the controls the current
//! [`PlayerActions`] snapshot permits. Every control emits exactly one
//! intent and closes the panel.

use crate::emoji::emoji_index;
use crate::error::HudError;
use crate::event::{EmbargoAction, EmojiRecipient, EventBus, Intent};
use crate::format::{render_number, render_troops};
use crate::game::{Color, PlayerActions, PlayerId, TileRef, UnitType};
use crate::view::{GameView, PlayerView};

/// Permission refresh the host must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionsRequest {
    pub generation: u64,
    pub player: PlayerId,
    pub tile: TileRef,
}

/// A control the panel renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelControl {
    Target,
    BreakAlliance,
    SendAllianceRequest,
    DonateTroops,
    DonateGold,
    /// Opens the emoji picker; the choice is sent via
    /// [`PlayerPanel::send_emoji`].
    Emoji,
    Embargo(EmbargoAction),
}

impl PanelControl {
    pub fn label(self) -> &'static str {
        match self {
            PanelControl::Target => "Target",
            PanelControl::BreakAlliance => "Break Alliance",
            PanelControl::SendAllianceRequest => "Alliance",
            PanelControl::DonateTroops => "Donate troops",
            PanelControl::DonateGold => "Donate gold",
            PanelControl::Emoji => "Emoji",
            PanelControl::Embargo(EmbargoAction::Stop) => "Stop trading",
            PanelControl::Embargo(EmbargoAction::Start) => "Start trading",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub name: String,
    pub color: Color,
    pub gold: String,
    pub troops: String,
    pub traitor: bool,
    pub embargo_against_you: bool,
    pub nukes_sent: u32,
    pub controls: Vec<PanelControl>,
    /// The tile owner is the local player.
    pub is_self: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PlayerPanel {
    visible: bool,
    actions: PlayerActions,
    tile: Option<TileRef>,
    /// Last issued generation, bumped by every open and refresh request.
    generation: u64,
    /// Generation of the open that the panel currently shows.
    opened_generation: u64,
    /// Newest generation whose permissions were applied.
    applied_generation: u64,
}

impl PlayerPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, actions: PlayerActions, tile: TileRef) {
        self.actions = actions;
        self.tile = Some(tile);
        self.visible = true;
        self.generation += 1;
        self.opened_generation = self.generation;
        self.applied_generation = self.generation;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Any pointer release closes the panel.
    pub fn on_mouse_up(&mut self) {
        self.hide();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn actions(&self) -> &PlayerActions {
        &self.actions
    }

    /// Host tick. While open and the local player lives, asks for a fresh
    /// permission snapshot.
    pub fn tick(
        &mut self,
        game: &impl GameView,
        client_id: Option<&str>,
    ) -> Option<ActionsRequest> {
        if !self.visible {
            return None;
        }
        let tile = self.tile?;
        let me = game.player_by_client_id(client_id?)?;
        if !me.alive {
            return None;
        }
        self.generation += 1;
        Some(ActionsRequest {
            generation: self.generation,
            player: me.id.clone(),
            tile,
        })
    }

    /// Applies a fetched permission snapshot if it is newer than the one on
    /// screen. Results older than an applied one, or requested before the
    /// latest open, are discarded.
    pub fn resolve_actions(&mut self, generation: u64, actions: PlayerActions) -> bool {
        if !self.visible
            || generation < self.opened_generation
            || generation <= self.applied_generation
        {
            tracing::trace!(
                "discarding stale actions (generation {generation}, applied {})",
                self.applied_generation
            );
            return false;
        }
        self.applied_generation = generation;
        self.actions = actions;
        true
    }

    /// Builds the panel view. Closes the panel if its tile lost its owner.
    pub fn view(&mut self, game: &impl GameView, client_id: Option<&str>) -> Option<PanelView> {
        if !self.visible {
            return None;
        }
        let me = game.player_by_client_id(client_id?)?;
        let tile = self.tile?;
        let other = match Self::target(game, tile) {
            Ok(other) => other,
            Err(e) => {
                tracing::warn!("{e}, closing player panel");
                self.hide();
                return None;
            }
        };

        #[allow(clippy::cast_precision_loss)]
        let gold = render_number(other.gold as f64);

        Some(PanelView {
            name: other.name.clone(),
            color: other.color,
            gold,
            troops: render_troops(other.troops),
            traitor: other.traitor,
            embargo_against_you: other.has_embargo_against(me),
            nukes_sent: total_nukes_sent(other, me),
            controls: self.controls(me, other),
            is_self: me.id == other.id,
        })
    }

    fn target(game: &impl GameView, tile: TileRef) -> Result<&PlayerView, HudError> {
        game.owner(tile).ok_or(HudError::NotPlayerOwned(tile))
    }

    /// Permitted controls in display order.
    fn controls(&self, me: &PlayerView, other: &PlayerView) -> Vec<PanelControl> {
        let interaction = self.actions.interaction();
        let is_self = me.id == other.id;
        let can_send_emoji = if is_self {
            self.actions.can_send_emoji_all_players
        } else {
            interaction.can_send_emoji
        };

        let mut controls = Vec::new();
        if interaction.can_target {
            controls.push(PanelControl::Target);
        }
        if interaction.can_break_alliance {
            controls.push(PanelControl::BreakAlliance);
        }
        if interaction.can_send_alliance_request {
            controls.push(PanelControl::SendAllianceRequest);
        }
        if interaction.can_donate {
            controls.push(PanelControl::DonateTroops);
            controls.push(PanelControl::DonateGold);
        }
        if can_send_emoji {
            controls.push(PanelControl::Emoji);
        }
        if interaction.can_embargo && !is_self {
            let action = if other.has_embargo_against(me) {
                EmbargoAction::Stop
            } else {
                EmbargoAction::Start
            };
            controls.push(PanelControl::Embargo(action));
        }
        controls
    }

    /// Emits the intent for `control` and closes the panel.
    ///
    /// [`PanelControl::Emoji`] only opens the picker and emits nothing.
    pub fn activate(
        &mut self,
        control: PanelControl,
        game: &impl GameView,
        client_id: Option<&str>,
        bus: &EventBus,
    ) {
        if control == PanelControl::Emoji {
            return;
        }
        let Some((me, other)) = self.parties(game, client_id) else {
            self.hide();
            return;
        };
        let intent = match control {
            PanelControl::Target => Intent::TargetPlayer { target: other },
            PanelControl::BreakAlliance => Intent::BreakAlliance {
                requestor: me,
                recipient: other,
            },
            PanelControl::SendAllianceRequest => Intent::SendAllianceRequest {
                requestor: me,
                recipient: other,
            },
            PanelControl::DonateTroops => Intent::DonateTroops {
                sender: me,
                recipient: other,
                troops: None,
            },
            PanelControl::DonateGold => Intent::DonateGold {
                sender: me,
                recipient: other,
                gold: None,
            },
            PanelControl::Embargo(action) => Intent::Embargo {
                sender: me,
                target: other,
                action,
            },
            PanelControl::Emoji => return,
        };
        bus.emit_or_skip(intent);
        self.hide();
    }

    /// Sends the picked emoji to the tile owner, or to everyone when the
    /// panel is open on the local player's own territory.
    pub fn send_emoji(
        &mut self,
        emoji: &str,
        game: &impl GameView,
        client_id: Option<&str>,
        bus: &EventBus,
    ) -> Result<(), HudError> {
        let index = emoji_index(emoji)?;
        let Some((me, other)) = self.parties(game, client_id) else {
            self.hide();
            return Ok(());
        };
        let recipient = if me == other {
            EmojiRecipient::AllPlayers
        } else {
            EmojiRecipient::Player(other)
        };
        bus.emit_or_skip(Intent::SendEmoji {
            recipient,
            emoji: index,
        });
        self.hide();
        Ok(())
    }

    fn parties(
        &self,
        game: &impl GameView,
        client_id: Option<&str>,
    ) -> Option<(PlayerId, PlayerId)> {
        let me = game.player_by_client_id(client_id?)?;
        let other = Self::target(game, self.tile?).ok()?;
        Some((me.id.clone(), other.id.clone()))
    }
}

/// Nukes `other` has launched at `me`, not counting MIRV warheads.
pub fn total_nukes_sent(other: &PlayerView, me: &PlayerView) -> u32 {
    other
        .stats
        .as_ref()
        .and_then(|stats| stats.sent_nukes.get(&me.id))
        .map_or(0, |by_type| {
            by_type
                .iter()
                .filter(|(unit_type, _)| **unit_type != UnitType::MirvWarhead)
                .map(|(_, count)| *count)
                .sum()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::recorder;
    use crate::game::{PlayerInteraction, PlayerStats};
    use crate::snapshot::GameSnapshot;
    use std::collections::HashMap;

    const ENEMY_TILE: TileRef = 0;
    const MY_TILE: TileRef = 9;
    const EMPTY_TILE: TileRef = 5;

    fn game() -> GameSnapshot {
        let mut me = PlayerView::new("me", 1, "Me");
        me.client_id = Some("client".to_string());
        let mut enemy = PlayerView::new("enemy", 2, "Enemy");
        enemy.gold = 2_000;
        enemy.troops = 10_000;
        enemy.traitor = true;
        GameSnapshot::builder(10, 1)
            .land_rect(0, 0, 10, 1)
            .owned_rect("enemy", 0, 0, 2, 1)
            .owned_rect("me", 8, 0, 10, 1)
            .player(me)
            .player(enemy)
            .build()
    }

    fn all_flags() -> PlayerActions {
        PlayerActions {
            can_send_emoji_all_players: true,
            interaction: Some(PlayerInteraction {
                can_send_alliance_request: true,
                can_break_alliance: true,
                can_donate: true,
                can_target: true,
                can_embargo: true,
                can_send_emoji: true,
            }),
        }
    }

    fn open(actions: PlayerActions, tile: TileRef) -> PlayerPanel {
        let mut panel = PlayerPanel::new();
        panel.show(actions, tile);
        panel
    }

    #[test]
    fn test_no_flags_no_controls() {
        let game = game();
        let mut panel = open(
            PlayerActions {
                can_send_emoji_all_players: false,
                interaction: Some(PlayerInteraction::default()),
            },
            ENEMY_TILE,
        );

        let view = panel.view(&game, Some("client")).unwrap();
        assert!(view.controls.is_empty());

        let mut panel = open(PlayerActions::default(), ENEMY_TILE);
        assert!(panel.view(&game, Some("client")).unwrap().controls.is_empty());
    }

    #[test]
    fn test_each_flag_renders_its_control() {
        let game = game();
        let cases: [(fn(&mut PlayerInteraction), &[PanelControl]); 6] = [
            (|i| i.can_target = true, &[PanelControl::Target]),
            (|i| i.can_break_alliance = true, &[PanelControl::BreakAlliance]),
            (
                |i| i.can_send_alliance_request = true,
                &[PanelControl::SendAllianceRequest],
            ),
            (
                |i| i.can_donate = true,
                &[PanelControl::DonateTroops, PanelControl::DonateGold],
            ),
            (|i| i.can_send_emoji = true, &[PanelControl::Emoji]),
            (
                |i| i.can_embargo = true,
                &[PanelControl::Embargo(EmbargoAction::Start)],
            ),
        ];

        for (set_flag, expected) in cases {
            let mut interaction = PlayerInteraction::default();
            set_flag(&mut interaction);
            let mut panel = open(
                PlayerActions {
                    can_send_emoji_all_players: false,
                    interaction: Some(interaction),
                },
                ENEMY_TILE,
            );
            let view = panel.view(&game, Some("client")).unwrap();
            assert_eq!(view.controls, expected);
        }
    }

    #[test]
    fn test_own_tile_uses_broadcast_emoji_flag_and_hides_embargo() {
        let game = game();
        let mut actions = all_flags();
        actions.interaction.as_mut().unwrap().can_send_emoji = false;
        let mut panel = open(actions, MY_TILE);

        let view = panel.view(&game, Some("client")).unwrap();

        assert!(view.is_self);
        assert!(view.controls.contains(&PanelControl::Emoji));
        assert!(!view
            .controls
            .iter()
            .any(|c| matches!(c, PanelControl::Embargo(_))));
    }

    #[test]
    fn test_stats_rendered() {
        let game = game();
        let mut panel = open(all_flags(), ENEMY_TILE);

        let view = panel.view(&game, Some("client")).unwrap();

        assert_eq!(view.name, "Enemy");
        assert_eq!(view.gold, "2.00K");
        assert_eq!(view.troops, "1.00K");
        assert!(view.traitor);
        assert!(!view.embargo_against_you);
        assert_eq!(view.nukes_sent, 0);
    }

    #[test]
    fn test_embargo_active_offers_stop() {
        let mut game = game();
        game.player_mut("enemy")
            .unwrap()
            .embargoes
            .insert("me".to_string());
        let bus = EventBus::new();
        let log = recorder(&bus);
        let mut panel = open(all_flags(), ENEMY_TILE);

        let view = panel.view(&game, Some("client")).unwrap();
        let embargo = *view.controls.last().unwrap();
        assert_eq!(embargo, PanelControl::Embargo(EmbargoAction::Stop));
        assert_eq!(embargo.label(), "Stop trading");
        assert!(view.embargo_against_you);

        panel.activate(embargo, &game, Some("client"), &bus);

        assert_eq!(
            log.borrow().as_slice(),
            &[Intent::Embargo {
                sender: "me".to_string(),
                target: "enemy".to_string(),
                action: EmbargoAction::Stop,
            }]
        );
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_each_action_emits_one_intent_and_closes() {
        let game = game();
        let me = "me".to_string();
        let enemy = "enemy".to_string();
        let cases = [
            (
                PanelControl::Target,
                Intent::TargetPlayer {
                    target: enemy.clone(),
                },
            ),
            (
                PanelControl::BreakAlliance,
                Intent::BreakAlliance {
                    requestor: me.clone(),
                    recipient: enemy.clone(),
                },
            ),
            (
                PanelControl::SendAllianceRequest,
                Intent::SendAllianceRequest {
                    requestor: me.clone(),
                    recipient: enemy.clone(),
                },
            ),
            (
                PanelControl::DonateTroops,
                Intent::DonateTroops {
                    sender: me.clone(),
                    recipient: enemy.clone(),
                    troops: None,
                },
            ),
            (
                PanelControl::DonateGold,
                Intent::DonateGold {
                    sender: me.clone(),
                    recipient: enemy.clone(),
                    gold: None,
                },
            ),
        ];

        for (control, expected) in cases {
            let bus = EventBus::new();
            let log = recorder(&bus);
            let mut panel = open(all_flags(), ENEMY_TILE);

            panel.activate(control, &game, Some("client"), &bus);

            assert_eq!(log.borrow().as_slice(), &[expected]);
            assert!(!panel.is_visible());
        }
    }

    #[test]
    fn test_emoji_targeted_and_broadcast() {
        let game = game();
        let bus = EventBus::new();
        let log = recorder(&bus);

        let mut panel = open(all_flags(), ENEMY_TILE);
        panel.activate(PanelControl::Emoji, &game, Some("client"), &bus);
        assert!(panel.is_visible());
        panel.send_emoji("👍", &game, Some("client"), &bus).unwrap();
        assert!(!panel.is_visible());

        let mut panel = open(all_flags(), MY_TILE);
        panel.send_emoji("😀", &game, Some("client"), &bus).unwrap();

        assert_eq!(
            log.borrow().as_slice(),
            &[
                Intent::SendEmoji {
                    recipient: EmojiRecipient::Player("enemy".to_string()),
                    emoji: 18,
                },
                Intent::SendEmoji {
                    recipient: EmojiRecipient::AllPlayers,
                    emoji: 0,
                },
            ]
        );
    }

    #[test]
    fn test_unknown_emoji_rejected() {
        let game = game();
        let bus = EventBus::new();
        let log = recorder(&bus);
        let mut panel = open(all_flags(), ENEMY_TILE);

        let result = panel.send_emoji("🦀", &game, Some("client"), &bus);

        assert!(matches!(result, Err(HudError::UnknownEmoji(_))));
        assert!(log.borrow().is_empty());
        assert!(panel.is_visible());
    }

    #[test]
    fn test_unowned_tile_force_closes() {
        let game = game();
        let mut panel = open(all_flags(), EMPTY_TILE);

        assert!(panel.view(&game, Some("client")).is_none());
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_nukes_sum_excludes_mirv_warheads() {
        let me = PlayerView::new("me", 1, "Me");
        let mut other = PlayerView::new("o", 2, "O");
        let mut by_type = HashMap::new();
        by_type.insert(UnitType::AtomBomb, 3);
        by_type.insert(UnitType::HydrogenBomb, 2);
        by_type.insert(UnitType::Mirv, 1);
        by_type.insert(UnitType::MirvWarhead, 40);
        let mut stats = PlayerStats::default();
        stats.sent_nukes.insert("me".to_string(), by_type);
        stats
            .sent_nukes
            .insert("someone".to_string(), HashMap::from([(UnitType::AtomBomb, 9)]));
        other.stats = Some(stats);

        assert_eq!(total_nukes_sent(&other, &me), 6);
        assert_eq!(total_nukes_sent(&me, &other), 0);
    }

    #[test]
    fn test_tick_requests_fresh_actions() {
        let mut game = game();
        let mut panel = open(PlayerActions::default(), ENEMY_TILE);

        let request = panel.tick(&game, Some("client")).unwrap();
        assert_eq!(request.player, "me");
        assert_eq!(request.tile, ENEMY_TILE);

        assert!(panel.resolve_actions(request.generation, all_flags()));
        assert_eq!(panel.actions(), &all_flags());

        game.player_mut("me").unwrap().alive = false;
        assert!(panel.tick(&game, Some("client")).is_none());
    }

    #[test]
    fn test_refresh_resolving_one_tick_late_applies() {
        let game = game();
        let mut panel = open(PlayerActions::default(), ENEMY_TILE);
        let mut pending = panel.tick(&game, Some("client")).unwrap();

        for _ in 0..20 {
            let next = panel.tick(&game, Some("client")).unwrap();
            assert!(panel.resolve_actions(pending.generation, all_flags()));
            pending = next;
        }
        let view = panel.view(&game, Some("client")).unwrap();
        assert!(view.controls.contains(&PanelControl::Target));
    }

    #[test]
    fn test_stale_actions_discarded() {
        let game = game();
        let mut panel = open(PlayerActions::default(), ENEMY_TILE);
        let old = panel.tick(&game, Some("client")).unwrap();
        let new = panel.tick(&game, Some("client")).unwrap();

        // Out of order: the older result must not overwrite the newer one.
        assert!(panel.resolve_actions(new.generation, PlayerActions::default()));
        assert!(!panel.resolve_actions(old.generation, all_flags()));

        let late = panel.tick(&game, Some("client")).unwrap();
        panel.hide();
        assert!(!panel.resolve_actions(late.generation, all_flags()));
        assert_eq!(panel.actions(), &PlayerActions::default());
    }

    #[test]
    fn test_actions_requested_before_reopen_discarded() {
        let game = game();
        let mut panel = open(PlayerActions::default(), ENEMY_TILE);
        let before = panel.tick(&game, Some("client")).unwrap();

        panel.show(PlayerActions::default(), MY_TILE);
        assert!(!panel.resolve_actions(before.generation, all_flags()));
        assert_eq!(panel.actions(), &PlayerActions::default());

        let after = panel.tick(&game, Some("client")).unwrap();
        assert!(panel.resolve_actions(after.generation, all_flags()));
    }

    #[test]
    fn test_panel_without_tile_renders_nothing() {
        let game = game();
        let mut panel = PlayerPanel::new();
        panel.visible = true;
        assert!(panel.view(&game, Some("client")).is_none());
        assert!(panel.tick(&game, Some("client")).is_none());
    }

    #[test]
    fn test_close_hides_and_drops_pending_refresh() {
        let game = game();
        let mut panel = open(all_flags(), ENEMY_TILE);
        let pending = panel.tick(&game, Some("client")).unwrap();

        panel.hide();

        assert!(panel.view(&game, Some("client")).is_none());
        assert!(panel.tick(&game, Some("client")).is_none());
        assert!(!panel.resolve_actions(pending.generation, PlayerActions::default()));
    }

    #[test]
    fn test_mouse_up_closes() {
        let mut panel = open(all_flags(), ENEMY_TILE);
        panel.on_mouse_up();
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_missing_local_player_renders_nothing() {
        let game = game();
        let mut panel = open(all_flags(), ENEMY_TILE);

        assert!(panel.view(&game, Some("stranger")).is_none());
        assert!(panel.view(&game, None).is_none());
        assert!(panel.is_visible());
    }
}

//! Hover info overlay.
//!
//! Resolves the tile under the pointer to either its owning player or the
//! nearest naval unit and builds the matching info card.

use crate::config::HudConfig;
use crate::event::InputEvent;
use crate::format::{render_number, render_troops};
use crate::game::{Color, PlayerId, PlayerProfile, PlayerType, Relation, UnitId, UnitType};
use crate::throttle::SampleThrottle;
use crate::transform::{ScreenTransform, WorldCoord};
use crate::view::{GameView, PlayerView};

/// What the pointer currently rests on. A player and a unit are never
/// hovered at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Hover {
    #[default]
    Nothing,
    Player(PlayerId),
    Unit(UnitId),
}

/// Asynchronous profile fetch the host must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRequest {
    pub generation: u64,
    pub player: PlayerId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attitude {
    pub relation: Relation,
    pub label: &'static str,
    pub class: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCard {
    pub name: String,
    pub color: Color,
    /// Flag image URL.
    pub flag: Option<String>,
    pub team: Option<String>,
    pub type_label: &'static str,
    /// Highlighted when friendly to the local player.
    pub friendly: bool,
    pub defending_troops: Option<String>,
    pub attacking_troops: Option<String>,
    pub gold: String,
    pub ports: u32,
    pub cities: u32,
    pub missile_silos: u32,
    pub sam_launchers: u32,
    pub attitude: Option<Attitude>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitCard {
    pub owner_name: String,
    /// Owned by the local player or a friendly player.
    pub friendly: bool,
    pub unit_type: String,
    pub health: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InfoCard {
    Player(PlayerCard),
    Unit(UnitCard),
}

#[derive(Debug, Clone)]
pub struct PlayerInfoOverlay {
    active: bool,
    visible: bool,
    hover: Hover,
    profile: Option<PlayerProfile>,
    generation: u64,
    throttle: SampleThrottle,
    search_radius: f64,
}

impl Default for PlayerInfoOverlay {
    fn default() -> Self {
        Self::new(&HudConfig::default())
    }
}

impl PlayerInfoOverlay {
    pub fn new(config: &HudConfig) -> Self {
        Self {
            active: false,
            visible: false,
            hover: Hover::Nothing,
            profile: None,
            generation: 0,
            throttle: SampleThrottle::new(config.pointer_sample_interval_ms),
            search_radius: config.unit_search_radius,
        }
    }

    /// Marks the overlay as subscribed to pointer input.
    pub fn init(&mut self) {
        self.active = true;
    }

    /// Handles a pointer event. Move samples are rate limited; anything
    /// else is ignored.
    pub fn on_input(
        &mut self,
        event: &InputEvent,
        game: &impl GameView,
        transform: &impl ScreenTransform,
    ) -> Option<ProfileRequest> {
        let InputEvent::MouseMove { x, y, timestamp_ms } = *event else {
            return None;
        };
        if !self.active || !self.throttle.accept(timestamp_ms) {
            return None;
        }
        self.maybe_show(x, y, game, transform)
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.hover = Hover::Nothing;
    }

    /// Resolves what sits under the screen point and shows its card.
    ///
    /// Returns a profile request when a player became hovered.
    pub fn maybe_show(
        &mut self,
        screen_x: f64,
        screen_y: f64,
        game: &impl GameView,
        transform: &impl ScreenTransform,
    ) -> Option<ProfileRequest> {
        self.hide();
        let world = transform.screen_to_world(screen_x, screen_y);
        if !game.is_valid_coord(world.x, world.y) {
            return None;
        }
        let tile = game.tile_ref(world.x, world.y)?;

        if let Some(owner) = game.owner(tile) {
            self.generation += 1;
            self.profile = None;
            self.hover = Hover::Player(owner.id.clone());
            self.visible = true;
            return Some(ProfileRequest {
                generation: self.generation,
                player: owner.id.clone(),
            });
        }

        if !game.is_land(tile) {
            if let Some(unit) = self.nearest_naval_unit(world, game) {
                self.hover = Hover::Unit(unit);
                self.visible = true;
            }
        }
        None
    }

    fn nearest_naval_unit(&self, world: WorldCoord, game: &impl GameView) -> Option<UnitId> {
        let mut best: Option<(f64, UnitId)> = None;
        for unit in game.units(&UnitType::NAVAL) {
            let dist = world.distance_to(game.x(unit.tile), game.y(unit.tile));
            if dist >= self.search_radius {
                continue;
            }
            // Strict comparison keeps the first of equally distant units.
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, unit.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Stores a fetched profile if it belongs to the current hover.
    ///
    /// Returns `false` for stale results.
    pub fn resolve_profile(&mut self, generation: u64, profile: PlayerProfile) -> bool {
        if generation != self.generation || !matches!(self.hover, Hover::Player(_)) {
            tracing::trace!(
                "discarding stale profile (generation {generation}, current {})",
                self.generation
            );
            return false;
        }
        self.profile = Some(profile);
        true
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Builds the card for the current hover, if any.
    pub fn card(&self, game: &impl GameView, client_id: Option<&str>) -> Option<InfoCard> {
        if !self.active || !self.visible {
            return None;
        }
        let my_player = client_id.and_then(|c| game.player_by_client_id(c));
        match &self.hover {
            Hover::Nothing => None,
            Hover::Player(id) => {
                let player = game.player(id)?;
                Some(InfoCard::Player(self.player_card(player, my_player)))
            }
            Hover::Unit(id) => {
                let unit = game
                    .units(&UnitType::NAVAL)
                    .into_iter()
                    .find(|u| u.id == *id)?;
                let owner = game.player(&unit.owner)?;
                let friendly = my_player
                    .is_some_and(|me| me.id == owner.id || me.is_friendly(owner));
                Some(InfoCard::Unit(UnitCard {
                    owner_name: owner.name.clone(),
                    friendly,
                    unit_type: unit.unit_type.to_string(),
                    health: unit.health,
                }))
            }
        }
    }

    fn player_card(&self, player: &PlayerView, my_player: Option<&PlayerView>) -> PlayerCard {
        let attacking = player.outgoing_troops();

        let attitude = match my_player {
            Some(me) if player.player_type == PlayerType::FakeHuman => {
                let relation = self
                    .profile
                    .as_ref()
                    .map_or(Relation::Neutral, |p| p.relation_to(me.small_id));
                Some(Attitude {
                    relation,
                    label: relation.label(),
                    class: relation.css_class(),
                })
            }
            _ => None,
        };

        #[allow(clippy::cast_precision_loss)]
        let gold = render_number(player.gold as f64);

        PlayerCard {
            name: player.name.clone(),
            color: player.color,
            flag: player.flag.as_ref().map(|f| format!("/flags/{f}.svg")),
            team: player.team.clone(),
            type_label: player.player_type.label(),
            friendly: my_player.is_some_and(|me| me.is_friendly(player)),
            defending_troops: (player.troops >= 1).then(|| render_troops(player.troops)),
            attacking_troops: (attacking >= 1).then(|| render_troops(attacking)),
            gold,
            ports: player.units(UnitType::Port),
            cities: player.units(UnitType::City),
            missile_silos: player.units(UnitType::MissileSilo),
            sam_launchers: player.units(UnitType::SamLauncher),
            attitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Attack;
    use crate::snapshot::GameSnapshot;
    use crate::transform::Viewport;
    use crate::view::UnitView;

    fn ship(id: UnitId, unit_type: UnitType, owner: &str, tile: u32) -> UnitView {
        UnitView {
            id,
            unit_type,
            owner: owner.to_string(),
            tile,
            health: None,
        }
    }

    /// 200x100 map: left half land, owned by "nation" in the top-left corner.
    fn world() -> GameSnapshot {
        let mut me = PlayerView::new("me", 1, "Me");
        me.client_id = Some("client".to_string());
        let mut nation = PlayerView::new("nation", 2, "Nation");
        nation.player_type = PlayerType::FakeHuman;
        nation.troops = 25_000;
        nation.gold = 1_500;
        nation.flag = Some("fr".to_string());
        nation.unit_counts.insert(UnitType::Port, 2);
        nation.unit_counts.insert(UnitType::SamLauncher, 1);
        nation.outgoing_attacks.push(Attack {
            target: None,
            troops: 4_000,
        });
        let mut ally = PlayerView::new("ally", 3, "Ally");
        ally.allies.insert("me".to_string());
        me.allies.insert("ally".to_string());

        GameSnapshot::builder(200, 100)
            .land_rect(0, 0, 100, 100)
            .owned_rect("nation", 0, 0, 10, 10)
            .player(me)
            .player(nation)
            .player(ally)
            // (150, 50) and (130, 50)
            .unit(ship(1, UnitType::Warship, "ally", 50 * 200 + 150))
            .unit(ship(2, UnitType::TradeShip, "nation", 50 * 200 + 130))
            .unit(ship(3, UnitType::Port, "nation", 50 * 200 + 121))
            .build()
    }

    fn active() -> PlayerInfoOverlay {
        let mut overlay = PlayerInfoOverlay::default();
        overlay.init();
        overlay
    }

    #[test]
    fn test_hover_player_requests_profile() {
        let game = world();
        let mut overlay = active();

        let request = overlay.maybe_show(5.0, 5.0, &game, &Viewport::default());

        assert_eq!(
            request,
            Some(ProfileRequest {
                generation: 1,
                player: "nation".to_string()
            })
        );
        let Some(InfoCard::Player(card)) = overlay.card(&game, Some("client")) else {
            panic!("expected player card");
        };
        assert_eq!(card.name, "Nation");
        assert_eq!(card.type_label, "Nation");
        assert_eq!(card.flag.as_deref(), Some("/flags/fr.svg"));
        assert_eq!(card.defending_troops.as_deref(), Some("2.50K"));
        assert_eq!(card.attacking_troops.as_deref(), Some("400"));
        assert_eq!(card.gold, "1.50K");
        assert_eq!((card.ports, card.cities, card.sam_launchers), (2, 0, 1));
        assert_eq!(card.attitude.unwrap().relation, Relation::Neutral);
    }

    #[test]
    fn test_profile_sets_attitude() {
        let game = world();
        let mut overlay = active();
        let request = overlay
            .maybe_show(5.0, 5.0, &game, &Viewport::default())
            .unwrap();

        let mut profile = PlayerProfile::default();
        profile.relations.insert(1, Relation::Hostile);
        assert!(overlay.resolve_profile(request.generation, profile));

        let Some(InfoCard::Player(card)) = overlay.card(&game, Some("client")) else {
            panic!("expected player card");
        };
        let attitude = card.attitude.unwrap();
        assert_eq!(attitude.label, "Hostile");
        assert_eq!(attitude.class, "text-red-500");
    }

    #[test]
    fn test_stale_profile_discarded() {
        let game = world();
        let mut overlay = active();
        let first = overlay
            .maybe_show(5.0, 5.0, &game, &Viewport::default())
            .unwrap();
        let second = overlay
            .maybe_show(6.0, 6.0, &game, &Viewport::default())
            .unwrap();

        let mut hostile = PlayerProfile::default();
        hostile.relations.insert(1, Relation::Hostile);
        assert!(!overlay.resolve_profile(first.generation, hostile));
        assert!(overlay.resolve_profile(second.generation, PlayerProfile::default()));
    }

    #[test]
    fn test_no_attitude_without_local_player_or_for_humans() {
        let game = world();
        let mut overlay = active();
        overlay.maybe_show(5.0, 5.0, &game, &Viewport::default());

        let Some(InfoCard::Player(card)) = overlay.card(&game, None) else {
            panic!("expected player card");
        };
        assert!(card.attitude.is_none());
        assert!(!card.friendly);
    }

    #[test]
    fn test_zero_troops_hidden() {
        let mut game = world();
        let nation = game.player_mut("nation").unwrap();
        nation.troops = 0;
        nation.outgoing_attacks.clear();
        let mut overlay = active();
        overlay.maybe_show(5.0, 5.0, &game, &Viewport::default());

        let Some(InfoCard::Player(card)) = overlay.card(&game, Some("client")) else {
            panic!("expected player card");
        };
        assert!(card.defending_troops.is_none());
        assert!(card.attacking_troops.is_none());
    }

    #[test]
    fn test_water_picks_nearest_naval_unit() {
        let game = world();
        let mut overlay = active();

        let request = overlay.maybe_show(145.0, 50.0, &game, &Viewport::default());

        assert!(request.is_none());
        let Some(InfoCard::Unit(card)) = overlay.card(&game, Some("client")) else {
            panic!("expected unit card");
        };
        assert_eq!(card.owner_name, "Ally");
        assert!(card.friendly);
        assert_eq!(card.unit_type, "Warship");
    }

    #[test]
    fn test_structures_are_not_hovered_at_sea() {
        let game = world();
        let mut overlay = active();

        // Port sits at (121, 50); the trade ship at (130, 50) is nearer than
        // the warship but the port itself never matches.
        overlay.maybe_show(120.0, 50.0, &game, &Viewport::default());

        let Some(InfoCard::Unit(card)) = overlay.card(&game, Some("client")) else {
            panic!("expected unit card");
        };
        assert_eq!(card.unit_type, "Trade Ship");
        assert!(!card.friendly);
    }

    #[test]
    fn test_units_beyond_radius_ignored() {
        let game = world();
        let mut overlay = active();

        overlay.maybe_show(199.0, 0.0, &game, &Viewport::default());

        assert!(!overlay.is_visible());
        assert!(overlay.card(&game, Some("client")).is_none());
    }

    #[test]
    fn test_unowned_land_shows_nothing() {
        let game = world();
        let mut overlay = active();

        overlay.maybe_show(50.0, 50.0, &game, &Viewport::default());

        assert!(!overlay.is_visible());
    }

    #[test]
    fn test_out_of_bounds_hides_previous_card() {
        let game = world();
        let mut overlay = active();
        overlay.maybe_show(5.0, 5.0, &game, &Viewport::default());
        assert!(overlay.is_visible());

        overlay.maybe_show(-10.0, 5.0, &game, &Viewport::default());

        assert!(!overlay.is_visible());
        assert!(overlay.card(&game, Some("client")).is_none());
    }

    #[test]
    fn test_pointer_samples_throttled() {
        let game = world();
        let mut overlay = active();
        let viewport = Viewport::default();

        let first = overlay.on_input(
            &InputEvent::MouseMove {
                x: 5.0,
                y: 5.0,
                timestamp_ms: 0.0,
            },
            &game,
            &viewport,
        );
        let second = overlay.on_input(
            &InputEvent::MouseMove {
                x: 145.0,
                y: 50.0,
                timestamp_ms: 50.0,
            },
            &game,
            &viewport,
        );

        assert!(first.is_some());
        assert!(second.is_none());
        assert!(matches!(
            overlay.card(&game, Some("client")),
            Some(InfoCard::Player(_))
        ));
    }

    #[test]
    fn test_inactive_overlay_ignores_input() {
        let game = world();
        let mut overlay = PlayerInfoOverlay::default();

        let request = overlay.on_input(
            &InputEvent::MouseMove {
                x: 5.0,
                y: 5.0,
                timestamp_ms: 0.0,
            },
            &game,
            &Viewport::default(),
        );

        assert!(request.is_none());
        assert!(overlay.card(&game, Some("client")).is_none());
    }
}

//! Territory leaderboard.
//!
//! Ranks players by owned tiles and keeps a short list of display rows.
//! The board reveals itself once the spawn phase is over and refreshes on a
//! fixed tick period while visible.

use crate::config::HudConfig;
use crate::event::{EventBus, Intent};
use crate::format::{format_percentage, render_number, render_troops};
use crate::game::{Color, PlayerId};
use crate::view::{GameView, PlayerView};

/// One display row. Rebuilt on every update.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub color: Color,
    /// 1-based rank.
    pub position: usize,
    pub score: String,
    pub gold: String,
    pub troops: String,
    pub is_my_player: bool,
    pub player: PlayerId,
}

#[derive(Debug, Clone)]
pub struct Leaderboard {
    hidden: bool,
    shown_on_init: bool,
    show_top_five: bool,
    top_n: usize,
    refresh_ticks: u64,
    entries: Vec<Entry>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(&HudConfig::default())
    }
}

impl Leaderboard {
    pub fn new(config: &HudConfig) -> Self {
        Self {
            hidden: true,
            shown_on_init: false,
            show_top_five: true,
            top_n: config.leaderboard_top_n,
            refresh_ticks: config.leaderboard_refresh_ticks.max(1),
            entries: Vec::new(),
        }
    }

    /// Host tick. Reveals the board on the first tick after spawn, then
    /// refreshes every `refresh_ticks` ticks while visible.
    pub fn tick(&mut self, game: &impl GameView, client_id: Option<&str>) {
        if !self.shown_on_init && !game.in_spawn_phase() {
            self.shown_on_init = true;
            self.show();
            self.update(game, client_id);
        }
        if self.hidden {
            return;
        }
        if game.ticks() % self.refresh_ticks == 0 {
            self.update(game, client_id);
        }
    }

    /// Recomputes the rows from the snapshot.
    pub fn update(&mut self, game: &impl GameView, client_id: Option<&str>) {
        let Some(client_id) = client_id else {
            tracing::debug!("leaderboard update skipped: no client id");
            return;
        };

        let my_player = game.player_by_client_id(client_id);

        // `sort_by` is stable: equal territories keep encounter order.
        let mut sorted: Vec<&PlayerView> = game.player_views().iter().collect();
        sorted.sort_by(|a, b| b.tiles_owned.cmp(&a.tiles_owned));

        let tiles_without_fallout =
            f64::from(game.num_land_tiles()) - f64::from(game.num_tiles_with_fallout());

        let shown = if self.show_top_five {
            &sorted[..sorted.len().min(self.top_n)]
        } else {
            &sorted[..]
        };

        let is_me = |p: &PlayerView| my_player.is_some_and(|me| me.id == p.id);

        self.entries = shown
            .iter()
            .enumerate()
            .map(|(index, &player)| {
                build_entry(
                    player,
                    index + 1,
                    f64::from(player.tiles_owned) / tiles_without_fallout,
                    is_me(player),
                )
            })
            .collect();

        if let Some(me) = my_player {
            if !self.entries.iter().any(|e| e.is_my_player) {
                let place = sorted
                    .iter()
                    .position(|p| p.id == me.id)
                    .map_or(sorted.len(), |i| i + 1);
                // Pinned row uses the raw land count, not the fallout-adjusted one.
                let share = f64::from(me.tiles_owned) / f64::from(game.num_land_tiles());
                self.entries.pop();
                self.entries.push(build_entry(me, place, share, true));
            }
        }
    }

    /// Emits a navigation intent for the clicked row.
    pub fn click_row(&self, index: usize, bus: &EventBus) {
        if let Some(entry) = self.entries.get(index) {
            bus.emit_or_skip(Intent::GoToPlayer {
                player: entry.player.clone(),
            });
        }
    }

    pub fn toggle_top_five(&mut self, game: &impl GameView, client_id: Option<&str>) {
        self.show_top_five = !self.show_top_five;
        self.update(game, client_id);
    }

    pub fn toggle(&mut self) {
        self.hidden = !self.hidden;
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    /// The "Leaderboard" reopen button shows only after the board was
    /// revealed once and then closed.
    pub fn show_button_visible(&self) -> bool {
        self.shown_on_init && self.hidden
    }

    pub fn show_top_five(&self) -> bool {
        self.show_top_five
    }

    pub fn top_five_label(&self) -> &'static str {
        if self.show_top_five {
            "Show All"
        } else {
            "Show Top 5"
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

fn build_entry(player: &PlayerView, position: usize, share: f64, is_my_player: bool) -> Entry {
    let troops = if player.alive { player.troops } else { 0 };
    #[allow(clippy::cast_precision_loss)]
    let gold = render_number(player.gold as f64);
    Entry {
        name: player.display_name.clone(),
        color: player.color,
        position,
        score: format_percentage(share),
        gold,
        troops: render_troops(troops),
        is_my_player,
        player: player.id.clone(),
    }
}

//! Offline demo world driving the HUD without a game server.

use frontline_core::{
    Attack, Color, GameSnapshot, PlayerId, PlayerStats, PlayerType, PlayerView, UnitType, UnitView,
};

pub const LOCAL_CLIENT_ID: &str = "local";

const MAP_WIDTH: u32 = 120;
const MAP_HEIGHT: u32 = 80;
/// Columns `0..LAND_WIDTH` are land, the rest is sea.
const LAND_WIDTH: u32 = 80;
const SPAWN_TICKS: u64 = 30;

struct Seed {
    id: &'static str,
    name: &'static str,
    color: Color,
    player_type: PlayerType,
    /// Home band of land columns.
    columns: (u32, u32),
}

const SEEDS: [Seed; 7] = [
    Seed {
        id: "p-local",
        name: "You",
        color: Color::BLUE,
        player_type: PlayerType::Human,
        columns: (0, 10),
    },
    Seed {
        id: "p-gaul",
        name: "Gaul",
        color: Color::RED,
        player_type: PlayerType::FakeHuman,
        columns: (10, 25),
    },
    Seed {
        id: "p-norse",
        name: "Norse",
        color: Color::CYAN,
        player_type: PlayerType::FakeHuman,
        columns: (25, 40),
    },
    Seed {
        id: "p-bot-1",
        name: "Bot 1",
        color: Color::GRAY,
        player_type: PlayerType::Bot,
        columns: (40, 50),
    },
    Seed {
        id: "p-bot-2",
        name: "Bot 2",
        color: Color::PURPLE,
        player_type: PlayerType::Bot,
        columns: (50, 60),
    },
    Seed {
        id: "p-anna",
        name: "Anna",
        color: Color::ORANGE,
        player_type: PlayerType::Human,
        columns: (60, 72),
    },
    Seed {
        id: "p-zed",
        name: "Zed",
        color: Color::YELLOW,
        player_type: PlayerType::Human,
        columns: (72, 80),
    },
];

pub fn initial_world() -> GameSnapshot {
    let mut builder = GameSnapshot::builder(MAP_WIDTH, MAP_HEIGHT)
        .spawn_phase(true)
        .land_rect(0, 0, LAND_WIDTH, MAP_HEIGHT)
        .fallout_rect(40, 30, 46, 36);

    for (index, seed) in SEEDS.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let mut player = PlayerView::new(seed.id, index as u16 + 1, seed.name);
        player.color = seed.color;
        player.player_type = seed.player_type;
        player.flag =
            (seed.player_type == PlayerType::FakeHuman).then(|| seed.id[2..].to_string());
        player.troops = 5_000;
        player.gold = 100;
        if seed.id == "p-local" {
            player.client_id = Some(LOCAL_CLIENT_ID.to_string());
        }
        builder = builder
            .owned_rect(seed.id, seed.columns.0, 38, seed.columns.0 + 2, 42)
            .player(player);
    }

    let mut world = builder
        .unit(ship(1, UnitType::Warship, "p-gaul", 90, 20))
        .unit(ship(2, UnitType::TradeShip, "p-norse", 100, 40))
        .unit(ship(3, UnitType::TransportShip, "p-local", 85, 60))
        .build();

    set_relations(&mut world);
    world
}

fn ship(id: u32, unit_type: UnitType, owner: &str, x: u32, y: u32) -> UnitView {
    UnitView {
        id,
        unit_type,
        owner: owner.to_string(),
        tile: y * MAP_WIDTH + x,
        health: (unit_type == UnitType::Warship).then_some(1000),
    }
}

fn set_relations(world: &mut GameSnapshot) {
    if let Some(gaul) = world.player_mut("p-gaul") {
        gaul.embargoes.insert("p-local".to_string());
        gaul.unit_counts.insert(UnitType::Port, 1);
        gaul.unit_counts.insert(UnitType::MissileSilo, 1);
        let mut stats = PlayerStats::default();
        stats.sent_nukes.insert(
            "p-local".to_string(),
            [(UnitType::AtomBomb, 2), (UnitType::MirvWarhead, 12)].into_iter().collect(),
        );
        gaul.stats = Some(stats);
    }
    if let Some(anna) = world.player_mut("p-anna") {
        anna.allies.insert("p-local".to_string());
        anna.unit_counts.insert(UnitType::City, 2);
    }
    if let Some(me) = world.player_mut("p-local") {
        me.allies.insert("p-anna".to_string());
        me.unit_counts.insert(UnitType::SamLauncher, 1);
    }
}

/// Advances the demo world by one tick: players expand inside their home
/// band, resources accumulate and ships drift.
pub fn advance(world: &mut GameSnapshot) {
    world.ticks += 1;
    world.spawn_phase = world.ticks < SPAWN_TICKS;
    if world.spawn_phase {
        return;
    }

    for (index, seed) in SEEDS.iter().enumerate() {
        let rate = index as u64 % 3 + 1;
        if world.ticks % rate == 0 {
            claim_next_tile(world, seed);
        }
    }
    world.recount_tiles();

    let ids: Vec<PlayerId> = world.players.iter().map(|p| p.id.clone()).collect();
    for id in &ids {
        if let Some(player) = world.player_mut(id) {
            player.gold += u64::from(player.tiles_owned);
            player.troops += u64::from(player.tiles_owned) * 3;
            player.alive = player.tiles_owned > 0;
        }
    }

    if let Some(norse) = world.player_mut("p-norse") {
        norse.outgoing_attacks = if norse_attacking(norse.gold) {
            vec![Attack {
                target: Some("p-bot-1".to_string()),
                troops: norse.troops / 4,
            }]
        } else {
            Vec::new()
        };
    }

    let drift = u32::try_from(world.ticks % 20).unwrap_or(0);
    for unit in &mut world.units {
        let y = unit.tile / MAP_WIDTH;
        let x = LAND_WIDTH + 2 + (unit.id * 7 + drift) % (MAP_WIDTH - LAND_WIDTH - 4);
        unit.tile = y * MAP_WIDTH + x;
    }
}

/// Norse attacks in alternating bursts of gold income.
fn norse_attacking(gold: u64) -> bool {
    (gold / 500) % 2 == 1
}

fn claim_next_tile(world: &mut GameSnapshot, seed: &Seed) {
    for y in 0..MAP_HEIGHT {
        for x in seed.columns.0..seed.columns.1 {
            let index = (y * MAP_WIDTH + x) as usize;
            if let Some(tile) = world.tiles.get_mut(index) {
                if tile.land && tile.owner.is_none() {
                    tile.owner = Some(seed.id.to_string());
                    return;
                }
            }
        }
    }
}

//! Main application component.

use std::rc::Rc;

use frontline_core::{EventBus, GameSnapshot, GameView, Intent, TileRef, Viewport};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{
    CANVAS_HEIGHT, CANVAS_WIDTH, Leaderboard, MapCanvas, PanelOpen, PlayerInfoOverlay, PlayerPanel,
};
use crate::demo::{self, LOCAL_CLIENT_ID};
use crate::hooks::{use_hud_config, use_tick};
use crate::host::{GameHost, SnapshotHost};
use crate::state::HudContext;

/// Screen pixels per tile at startup.
const INITIAL_SCALE: f64 = 8.0;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_hud_config();
    let game = use_mut_ref(demo::initial_world);
    let viewport = use_mut_ref(|| Viewport::new((0.0, 0.0), INITIAL_SCALE));
    let bus = use_memo((), |_| EventBus::new());
    let host = {
        let game = game.clone();
        use_memo((), move |_| Rc::new(SnapshotHost::new(game)) as Rc<dyn GameHost>)
    };
    let panel_open = use_state(|| None::<PanelOpen>);
    let open_seq = use_mut_ref(|| 0u64);

    // Stands in for the transport layer: intents are logged and the
    // navigation ones move the camera.
    {
        let bus = (*bus).clone();
        let game = game.clone();
        let viewport = viewport.clone();
        use_effect_with((), move |_| {
            let id = bus.on(move |intent| {
                tracing::info!(?intent, "intent emitted");
                navigate(intent, &game.borrow(), &mut viewport.borrow_mut());
            });
            move || {
                bus.off(id);
                bus.close();
            }
        });
    }

    let tick = {
        let game = game.clone();
        use_tick(config.tick_interval_ms, move || {
            demo::advance(&mut game.borrow_mut());
        })
    };

    let on_tile_click = {
        let game = game.clone();
        let host = (*host).clone();
        let panel_open = panel_open.clone();
        Callback::from(move |tile: TileRef| {
            let fetch = {
                let game = game.borrow();
                if game.owner(tile).is_none() {
                    return;
                }
                let Some(me) = game.player_by_client_id(LOCAL_CLIENT_ID) else {
                    return;
                };
                host.actions(me.id.clone(), tile)
            };
            let seq = {
                let mut seq = open_seq.borrow_mut();
                *seq += 1;
                *seq
            };
            let panel_open = panel_open.clone();
            spawn_local(async move {
                match fetch.await {
                    Some(actions) => panel_open.set(Some(PanelOpen { seq, actions, tile })),
                    None => tracing::debug!("actions fetch for tile {tile} failed"),
                }
            });
        })
    };

    let context = HudContext {
        game,
        bus: (*bus).clone(),
        client_id: Some(LOCAL_CLIENT_ID.to_string()),
        config: (*config).clone(),
        host: (*host).clone(),
        viewport,
        tick,
    };

    html! {
        <ContextProvider<HudContext> {context}>
            <div class="hud-root">
                <MapCanvas {on_tile_click} />
                <Leaderboard />
                <PlayerInfoOverlay />
                <PlayerPanel open={(*panel_open).clone()} />
            </div>
        </ContextProvider<HudContext>>
    }
}

fn navigate(intent: &Intent, game: &GameSnapshot, viewport: &mut Viewport) {
    let tile = match intent {
        Intent::GoToPlayer { player } => game
            .tiles
            .iter()
            .position(|t| t.owner.as_deref() == Some(player.as_str()))
            .and_then(|index| TileRef::try_from(index).ok()),
        Intent::GoToUnit { unit } => game.units.iter().find(|u| u.id == *unit).map(|u| u.tile),
        _ => None,
    };
    if let Some(tile) = tile {
        viewport.center_on(
            f64::from(game.x(tile)),
            f64::from(game.y(tile)),
            f64::from(CANVAS_WIDTH),
            f64::from(CANVAS_HEIGHT),
        );
    }
}

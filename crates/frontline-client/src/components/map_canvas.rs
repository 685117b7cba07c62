//! Canvas drawing the territory map under the HUD.

use std::collections::HashMap;

use frontline_core::{GameSnapshot, GameView, ScreenTransform, TileRef, Viewport};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, WheelEvent};
use yew::prelude::*;

use crate::state::HudContext;

pub const CANVAS_WIDTH: u32 = 1280;
pub const CANVAS_HEIGHT: u32 = 800;
const ZOOM_STEP: f64 = 1.1;
/// Pointer travel (pixels) after which a press counts as a drag, not a click.
const DRAG_THRESHOLD: f64 = 4.0;

const SEA_COLOR: &str = "#1b3a5c";
const LAND_COLOR: &str = "#3d5a3a";
const FALLOUT_COLOR: &str = "#6b6b2a";
const UNIT_COLOR: &str = "#f0f0f0";

#[derive(Debug, Default)]
struct DragState {
    /// Last pointer position while the button is held.
    last: Option<(f64, f64)>,
    travelled: f64,
    /// The press that just ended was a drag; swallow its click.
    suppress_click: bool,
}

#[derive(Properties, PartialEq)]
pub struct MapCanvasProps {
    /// Fired with the tile under a left click.
    pub on_tile_click: Callback<TileRef>,
}

#[function_component(MapCanvas)]
pub fn map_canvas(props: &MapCanvasProps) -> Html {
    let ctx = use_context::<HudContext>().expect("HudContext not found");
    let canvas_ref = use_node_ref();
    let view_version = use_state(|| 0u64);
    let drag = use_mut_ref(DragState::default);

    {
        let canvas_ref = canvas_ref.clone();
        let ctx = ctx.clone();
        use_effect_with((ctx.tick, *view_version), move |_| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                if let Ok(Some(context)) = canvas.get_context("2d") {
                    if let Ok(context) = context.dyn_into::<CanvasRenderingContext2d>() {
                        draw(&context, &ctx.game.borrow(), &ctx.viewport.borrow());
                    }
                }
            }
            || ()
        });
    }

    let onclick = {
        let ctx = ctx.clone();
        let drag = drag.clone();
        let on_tile_click = props.on_tile_click.clone();
        Callback::from(move |e: MouseEvent| {
            if std::mem::take(&mut drag.borrow_mut().suppress_click) {
                return;
            }
            let world = ctx
                .viewport
                .borrow()
                .screen_to_world(f64::from(e.client_x()), f64::from(e.client_y()));
            let game = ctx.game.borrow();
            if !game.is_valid_coord(world.x, world.y) {
                return;
            }
            if let Some(tile) = game.tile_ref(world.x, world.y) {
                on_tile_click.emit(tile);
            }
        })
    };

    let onmousedown = {
        let drag = drag.clone();
        Callback::from(move |e: MouseEvent| {
            if e.button() != 0 {
                return;
            }
            let mut drag = drag.borrow_mut();
            drag.last = Some((f64::from(e.client_x()), f64::from(e.client_y())));
            drag.travelled = 0.0;
            drag.suppress_click = false;
        })
    };

    let onmousemove = {
        let drag = drag.clone();
        let viewport = ctx.viewport.clone();
        let view_version = view_version.clone();
        Callback::from(move |e: MouseEvent| {
            let mut drag = drag.borrow_mut();
            let Some((last_x, last_y)) = drag.last else {
                return;
            };
            let (x, y) = (f64::from(e.client_x()), f64::from(e.client_y()));
            let (dx, dy) = (x - last_x, y - last_y);
            drag.last = Some((x, y));
            drag.travelled += dx.hypot(dy);
            if drag.travelled >= DRAG_THRESHOLD {
                viewport.borrow_mut().pan(dx, dy);
                view_version.set(*view_version + 1);
            }
        })
    };

    let end_drag = {
        let drag = drag.clone();
        Callback::from(move |_: MouseEvent| {
            let mut drag = drag.borrow_mut();
            if drag.last.take().is_some() {
                drag.suppress_click = drag.travelled >= DRAG_THRESHOLD;
            }
        })
    };

    let onwheel = {
        let viewport = ctx.viewport.clone();
        let view_version = view_version.clone();
        Callback::from(move |e: WheelEvent| {
            e.prevent_default();
            let factor = if e.delta_y() < 0.0 {
                ZOOM_STEP
            } else {
                1.0 / ZOOM_STEP
            };
            viewport
                .borrow_mut()
                .zoom_at(f64::from(e.client_x()), f64::from(e.client_y()), factor);
            view_version.set(*view_version + 1);
        })
    };

    html! {
        <canvas
            ref={canvas_ref}
            class="map-canvas"
            width={CANVAS_WIDTH.to_string()}
            height={CANVAS_HEIGHT.to_string()}
            {onclick}
            {onmousedown}
            {onmousemove}
            onmouseup={end_drag.clone()}
            onmouseleave={end_drag}
            {onwheel}
        />
    }
}

fn draw(context: &CanvasRenderingContext2d, game: &GameSnapshot, viewport: &Viewport) {
    context.set_fill_style_str(SEA_COLOR);
    context.fill_rect(0.0, 0.0, f64::from(CANVAS_WIDTH), f64::from(CANVAS_HEIGHT));

    let colors: HashMap<&str, String> = game
        .player_views()
        .iter()
        .map(|p| (p.id.as_str(), p.color.to_rgb_string()))
        .collect();

    let size = viewport.scale;
    let width = game.width.max(1) as usize;
    for (index, tile) in game.tiles.iter().enumerate() {
        let fill = match &tile.owner {
            Some(owner) => colors.get(owner.as_str()).map_or(LAND_COLOR, String::as_str),
            None if tile.fallout => FALLOUT_COLOR,
            None if tile.land => LAND_COLOR,
            None => continue,
        };
        #[allow(clippy::cast_precision_loss)]
        let (x, y) = ((index % width) as f64, (index / width) as f64);
        context.set_fill_style_str(fill);
        context.fill_rect(
            (x - viewport.offset.0) * size,
            (y - viewport.offset.1) * size,
            size,
            size,
        );
    }

    context.set_fill_style_str(UNIT_COLOR);
    for unit in &game.units {
        let x = f64::from(game.x(unit.tile));
        let y = f64::from(game.y(unit.tile));
        context.fill_rect(
            (x - viewport.offset.0 - 0.5) * size,
            (y - viewport.offset.1 - 0.5) * size,
            size * 2.0,
            size * 2.0,
        );
    }
}

//! Territory leaderboard widget.

use frontline_core::Leaderboard as LeaderboardState;
use yew::prelude::*;

use crate::state::HudContext;

#[function_component(Leaderboard)]
pub fn leaderboard() -> Html {
    let ctx = use_context::<HudContext>().expect("HudContext not found");
    let board = use_mut_ref(|| LeaderboardState::new(&ctx.config));
    let force_update = use_force_update();

    {
        let board = board.clone();
        let ctx = ctx.clone();
        let force_update = force_update.clone();
        use_effect_with(ctx.tick, move |_| {
            board.borrow_mut().tick(&*ctx.game.borrow(), ctx.client_id());
            force_update.force_update();
            || ()
        });
    }

    let on_toggle = {
        let board = board.clone();
        let force_update = force_update.clone();
        Callback::from(move |_: MouseEvent| {
            board.borrow_mut().toggle();
            force_update.force_update();
        })
    };

    let on_top_five = {
        let board = board.clone();
        let ctx = ctx.clone();
        let force_update = force_update.clone();
        Callback::from(move |_: MouseEvent| {
            board
                .borrow_mut()
                .toggle_top_five(&*ctx.game.borrow(), ctx.client_id());
            force_update.force_update();
        })
    };

    let board_ref = board.borrow();

    let show_button = if board_ref.show_button_visible() {
        html! {
            <button class="leaderboard-show" onclick={on_toggle.clone()}>
                { "Leaderboard" }
            </button>
        }
    } else {
        html! {}
    };

    if !board_ref.is_visible() {
        return show_button;
    }

    html! {
        <div class="leaderboard">
            <div class="leaderboard-header">
                <button class="leaderboard-hide" onclick={on_toggle}>{ "Hide" }</button>
                <button class="leaderboard-top-five" onclick={on_top_five}>
                    { board_ref.top_five_label() }
                </button>
            </div>
            <table class="leaderboard-table">
                <thead>
                    <tr>
                        <th>{ "Rank" }</th>
                        <th>{ "Player" }</th>
                        <th>{ "Owned" }</th>
                        <th>{ "Gold" }</th>
                        <th>{ "Troops" }</th>
                    </tr>
                </thead>
                <tbody>
                    { for board_ref.entries().iter().enumerate().map(|(index, entry)| {
                        let onclick = {
                            let board = board.clone();
                            let bus = ctx.bus.clone();
                            Callback::from(move |_: MouseEvent| {
                                board.borrow().click_row(index, &bus);
                            })
                        };
                        html! {
                            <tr
                                key={entry.player.clone()}
                                class={classes!("leaderboard-row", entry.is_my_player.then_some("self"))}
                                {onclick}
                            >
                                <td class="leaderboard-rank">{ entry.position }</td>
                                <td class="leaderboard-name">
                                    <span
                                        class="leaderboard-color"
                                        style={format!("background: {};", entry.color.to_rgb_string())}
                                    />
                                    { &entry.name }
                                </td>
                                <td>{ &entry.score }</td>
                                <td>{ &entry.gold }</td>
                                <td>{ &entry.troops }</td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}

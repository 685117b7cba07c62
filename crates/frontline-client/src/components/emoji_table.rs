//! Emoji picker grid.

use frontline_core::emoji::EMOJI_TABLE;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EmojiTableProps {
    pub on_select: Callback<&'static str>,
    pub on_close: Callback<()>,
}

#[function_component(EmojiTable)]
pub fn emoji_table(props: &EmojiTableProps) -> Html {
    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="emoji-backdrop" onclick={on_backdrop}>
            <div class="emoji-table" onclick={stop.clone()} onmouseup={stop}>
                { for EMOJI_TABLE.iter().map(|row| html! {
                    <div class="emoji-row">
                        { for row.iter().map(|&emoji| {
                            let on_select = props.on_select.clone();
                            let onclick = Callback::from(move |_: MouseEvent| on_select.emit(emoji));
                            html! {
                                <button class="emoji-button" {onclick}>{ emoji }</button>
                            }
                        })}
                    </div>
                })}
            </div>
        </div>
    }
}

use std::ops::Deref;

use yew::prelude::*;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|win| win.local_storage().ok().flatten())
}

/// State persisted under `key`. Falls back to `init_fn` when nothing is
/// stored or the stored value no longer parses.
#[hook]
pub fn use_localstorage<T, F>(key: &'static str, init_fn: F) -> UseStateHandle<T>
where
    T: 'static + Clone + serde::Serialize + serde::de::DeserializeOwned + PartialEq,
    F: Fn() -> T + 'static,
{
    let state = use_state(|| {
        let stored = local_storage().and_then(|storage| storage.get_item(key).ok().flatten());
        match stored.map(|value| serde_json::from_str::<T>(&value)) {
            Some(Ok(value)) => value,
            Some(Err(err)) => {
                tracing::warn!("ignoring malformed {key} in local storage: {err}");
                init_fn()
            }
            None => init_fn(),
        }
    });
    {
        let state = state.clone();
        use_effect_with(state.clone(), move |state| {
            if let Some(storage) = local_storage() {
                match serde_json::to_string(state.deref()) {
                    Ok(serialized) => {
                        if storage.set_item(key, &serialized).is_err() {
                            tracing::warn!("failed to persist {key}");
                        }
                    }
                    Err(err) => tracing::warn!("failed to serialize {key}: {err}"),
                }
            }
            || ()
        });
    }
    state
}

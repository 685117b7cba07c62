use gloo::timers::callback::Interval;
use yew::prelude::*;

/// Runs `on_tick` every `interval_ms` and returns the number of ticks so
/// far. The counter changes after `on_tick` returns, so a re-render always
/// sees the advanced world.
#[hook]
pub fn use_tick<F>(interval_ms: u32, on_tick: F) -> u64
where
    F: Fn() + 'static,
{
    let tick = use_state(|| 0u64);
    let counter = use_mut_ref(|| 0u64);
    {
        let setter = tick.setter();
        use_effect_with(interval_ms, move |&interval_ms| {
            let interval = Interval::new(interval_ms.max(1), move || {
                on_tick();
                let mut counter = counter.borrow_mut();
                *counter += 1;
                setter.set(*counter);
            });
            move || drop(interval)
        });
    }
    *tick
}

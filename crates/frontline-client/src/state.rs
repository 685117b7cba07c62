//! State shared by the HUD widgets through Yew context.

use std::cell::RefCell;
use std::rc::Rc;

use frontline_core::{EventBus, GameSnapshot, HudConfig, Viewport};

use crate::host::GameHost;

/// Everything a widget needs from the host client.
#[derive(Clone)]
pub struct HudContext {
    /// Current game snapshot, advanced in place on every tick
    pub game: Rc<RefCell<GameSnapshot>>,
    pub bus: EventBus,
    /// Client id of the local player
    pub client_id: Option<String>,
    pub config: HudConfig,
    pub host: Rc<dyn GameHost>,
    pub viewport: Rc<RefCell<Viewport>>,
    /// Host tick counter. Changes whenever the snapshot advanced.
    pub tick: u64,
}

impl PartialEq for HudContext {
    fn eq(&self, other: &Self) -> bool {
        // The snapshot mutates in place, so the tick stands in for it.
        self.tick == other.tick
            && self.bus == other.bus
            && self.client_id == other.client_id
            && self.config == other.config
            && Rc::ptr_eq(&self.game, &other.game)
    }
}

impl HudContext {
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }
}

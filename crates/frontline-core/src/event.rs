//! Outbound intents and the single-threaded bus that carries them.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::HudError;
use crate::game::{PlayerId, UnitId};

/// Pointer input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseMove { x: f64, y: f64, timestamp_ms: f64 },
    MouseUp { x: f64, y: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmbargoAction {
    Start,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmojiRecipient {
    Player(PlayerId),
    AllPlayers,
}

/// Request for an action, validated and executed by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Intent {
    GoToPlayer {
        player: PlayerId,
    },
    GoToUnit {
        unit: UnitId,
    },
    SendAllianceRequest {
        requestor: PlayerId,
        recipient: PlayerId,
    },
    BreakAlliance {
        requestor: PlayerId,
        recipient: PlayerId,
    },
    /// `troops: None` lets the server pick the default amount.
    DonateTroops {
        sender: PlayerId,
        recipient: PlayerId,
        troops: Option<u64>,
    },
    DonateGold {
        sender: PlayerId,
        recipient: PlayerId,
        gold: Option<u64>,
    },
    Embargo {
        sender: PlayerId,
        target: PlayerId,
        action: EmbargoAction,
    },
    SendEmoji {
        recipient: EmojiRecipient,
        emoji: usize,
    },
    TargetPlayer {
        target: PlayerId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<RefCell<dyn FnMut(&Intent)>>;

#[derive(Default)]
struct BusInner {
    handlers: Vec<(SubscriptionId, Handler)>,
    next_id: u64,
    closed: bool,
}

/// Cloneable handle to a shared intent bus.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("EventBus")
            .field("handlers", &inner.handlers.len())
            .field("closed", &inner.closed)
            .finish()
    }
}

impl PartialEq for EventBus {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler invoked for every emitted intent.
    pub fn on(&self, handler: impl FnMut(&Intent) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.handlers.push((id, Rc::new(RefCell::new(handler))));
        id
    }

    pub fn off(&self, id: SubscriptionId) {
        self.inner.borrow_mut().handlers.retain(|(h, _)| *h != id);
    }

    /// Delivers `intent` to all handlers.
    ///
    /// Handlers may emit further intents; they are delivered synchronously.
    /// A handler is never re-entered by its own emissions.
    pub fn emit(&self, intent: Intent) -> Result<(), HudError> {
        let handlers: Vec<Handler> = {
            let inner = self.inner.borrow();
            if inner.closed {
                return Err(HudError::BusClosed);
            }
            inner.handlers.iter().map(|(_, h)| Rc::clone(h)).collect()
        };
        for handler in handlers {
            if let Ok(mut handler) = handler.try_borrow_mut() {
                (*handler)(&intent);
            }
        }
        Ok(())
    }

    /// Emits and swallows a closed-bus failure.
    pub(crate) fn emit_or_skip(&self, intent: Intent) {
        if let Err(e) = self.emit(intent) {
            tracing::trace!("intent dropped: {}", e);
        }
    }

    pub fn close(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.closed = true;
        inner.handlers.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.borrow().closed
    }
}

/// Collects every intent emitted on `bus`.
#[cfg(test)]
pub(crate) fn recorder(bus: &EventBus) -> Rc<RefCell<Vec<Intent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    bus.on(move |intent| sink.borrow_mut().push(intent.clone()));
    log
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go_to(player: &str) -> Intent {
        Intent::GoToPlayer {
            player: player.to_string(),
        }
    }

    #[test]
    fn test_emit_reaches_all_handlers() {
        let bus = EventBus::new();
        let first = recorder(&bus);
        let second = recorder(&bus);

        bus.emit(go_to("a")).unwrap();

        assert_eq!(first.borrow().as_slice(), &[go_to("a")]);
        assert_eq!(second.borrow().len(), 1);
    }

    #[test]
    fn test_off_removes_handler() {
        let bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let id = bus.on(move |_| *c.borrow_mut() += 1);

        bus.emit(go_to("a")).unwrap();
        bus.off(id);
        bus.emit(go_to("b")).unwrap();

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_closed_bus_rejects_emit() {
        let bus = EventBus::new();
        let log = recorder(&bus);
        bus.close();

        assert!(matches!(bus.emit(go_to("a")), Err(HudError::BusClosed)));
        assert!(log.borrow().is_empty());
        assert!(bus.is_closed());
    }

    #[test]
    fn test_handler_can_emit_reentrantly() {
        let bus = EventBus::new();
        let log = recorder(&bus);
        let relay = bus.clone();
        bus.on(move |intent| {
            if let Intent::GoToPlayer { player } = intent {
                if player == "a" {
                    relay.emit(go_to("b")).unwrap();
                }
            }
        });

        bus.emit(go_to("a")).unwrap();

        assert_eq!(log.borrow().as_slice(), &[go_to("a"), go_to("b")]);
    }

    #[test]
    fn test_intent_serializes_with_type_tag() {
        let json = serde_json::to_string(&Intent::TargetPlayer {
            target: "p1".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"TargetPlayer","target":"p1"}"#);
    }
}

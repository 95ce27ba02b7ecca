pub mod action_map;
pub mod actions;
pub mod queue;
pub mod router;

pub use action_map::{ActionDomain, ActionMap, ActionMapSet, PLAYER_MAP, UI_MAP};
pub use actions::{PlayerAction, UiAction};
pub use queue::{ActionPhase, ActionValue, InputEvent, InputQueue};
pub use router::{GameplayEvent, InputRouter, InputSettings, PlayerActions, UiActions, UiEvent};

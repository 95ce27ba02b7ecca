//! Turns raw action events into gameplay and UI events.
//!
//! The router owns the action maps and two independent handlers, one per
//! map domain. Produced events land in outboxes that the game drains each
//! frame and hands to whoever listens (locomotion, jump, menus).

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use super::action_map::{ActionDomain, ActionMapSet};
use super::actions::{PlayerAction, UiAction};
use super::queue::{ActionPhase, ActionValue, InputEvent};

/// Semantic events derived from the `Player` map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameplayEvent {
    MoveChanged(Vec2),
    LookChanged(Vec2),
    JumpStarted,
    JumpCanceled,
    SprintToggled(bool),
    PauseToggled(bool),
    AttackStarted,
    AttackCanceled,
}

/// Semantic events derived from the `UI` map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    Navigate(Vec2),
    Submit,
    Cancel,
}

/// Player-facing input options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    pub invert_look_x: bool,
    pub invert_look_y: bool,
}

/// Handler for the `Player` map. Tracks the last known state of each
/// control so it can be queried without listening to events.
#[derive(Debug, Default)]
pub struct PlayerActions {
    settings: InputSettings,
    move_input: Vec2,
    look_input: Vec2,
    move_is_triggered: bool,
    jump_is_triggered: bool,
    sprint_is_triggered: bool,
    interact_is_triggered: bool,
}

impl PlayerActions {
    pub fn new(settings: InputSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn handle(
        &mut self,
        action: PlayerAction,
        phase: ActionPhase,
        value: ActionValue,
        out: &mut Vec<GameplayEvent>,
    ) {
        use ActionPhase::{Canceled, Performed};

        match (action, phase) {
            (PlayerAction::Move, Performed) => {
                let Some(v) = vector_payload(action.name(), value) else { return };
                self.move_input = v;
                self.move_is_triggered = true;
                out.push(GameplayEvent::MoveChanged(v));
            }
            (PlayerAction::Move, Canceled) => {
                self.move_input = Vec2::ZERO;
                self.move_is_triggered = false;
                out.push(GameplayEvent::MoveChanged(Vec2::ZERO));
            }
            (PlayerAction::Look, Performed) => {
                let Some(v) = vector_payload(action.name(), value) else { return };
                self.look_input = self.apply_look_inversion(v);
                out.push(GameplayEvent::LookChanged(self.look_input));
            }
            (PlayerAction::Look, Canceled) => {
                self.look_input = Vec2::ZERO;
                out.push(GameplayEvent::LookChanged(Vec2::ZERO));
            }
            (PlayerAction::Jump, Performed) => {
                self.jump_is_triggered = true;
                out.push(GameplayEvent::JumpStarted);
            }
            (PlayerAction::Jump, Canceled) => {
                self.jump_is_triggered = false;
                out.push(GameplayEvent::JumpCanceled);
            }
            (PlayerAction::Sprint, Performed) => {
                self.sprint_is_triggered = true;
                out.push(GameplayEvent::SprintToggled(true));
            }
            (PlayerAction::Sprint, Canceled) => {
                self.sprint_is_triggered = false;
                out.push(GameplayEvent::SprintToggled(false));
            }
            (PlayerAction::Pause, Performed) => out.push(GameplayEvent::PauseToggled(true)),
            (PlayerAction::Pause, Canceled) => out.push(GameplayEvent::PauseToggled(false)),
            (PlayerAction::Attack, Performed) => out.push(GameplayEvent::AttackStarted),
            (PlayerAction::Attack, Canceled) => out.push(GameplayEvent::AttackCanceled),
            (PlayerAction::Interact, Performed) => self.interact_is_triggered = true,
            (PlayerAction::Interact, Canceled) => self.interact_is_triggered = false,
            // Started phases, plus Crouch/Previous/Next which have no gameplay yet.
            _ => {}
        }
    }

    fn apply_look_inversion(&self, mut v: Vec2) -> Vec2 {
        if self.settings.invert_look_x {
            v.x = -v.x;
        }
        if self.settings.invert_look_y {
            v.y = -v.y;
        }
        v
    }
}

/// Handler for the `UI` map.
#[derive(Debug, Default)]
pub struct UiActions;

impl UiActions {
    pub fn handle(
        &mut self,
        action: UiAction,
        phase: ActionPhase,
        value: ActionValue,
        out: &mut Vec<UiEvent>,
    ) {
        if phase != ActionPhase::Performed {
            return;
        }
        match action {
            UiAction::Navigate => {
                if let Some(v) = vector_payload(action.name(), value) {
                    out.push(UiEvent::Navigate(v));
                }
            }
            UiAction::Submit => out.push(UiEvent::Submit),
            UiAction::Cancel => out.push(UiEvent::Cancel),
            _ => {}
        }
    }
}

fn vector_payload(action: &str, value: ActionValue) -> Option<Vec2> {
    let v = value.as_vec2();
    if v.is_none() {
        debug!("action '{}' performed without a vector payload: {:?}", action, value);
    }
    v
}

/// Routes raw events through the enabled action maps to the two handlers.
#[derive(Debug)]
pub struct InputRouter {
    maps: ActionMapSet,
    player: PlayerActions,
    ui: UiActions,
    gameplay_events: Vec<GameplayEvent>,
    ui_events: Vec<UiEvent>,
}

impl InputRouter {
    /// Standard maps with the default (`Player`) map enabled.
    pub fn new(settings: InputSettings) -> Self {
        Self::with_maps(ActionMapSet::standard(), settings)
    }

    pub fn with_maps(mut maps: ActionMapSet, settings: InputSettings) -> Self {
        maps.enable_default_action_map();
        Self {
            maps,
            player: PlayerActions::new(settings),
            ui: UiActions,
            gameplay_events: Vec::new(),
            ui_events: Vec::new(),
        }
    }

    pub fn route(&mut self, event: &InputEvent) {
        let Some(map) = self.maps.resolve(&event.action) else {
            debug!("action '{}' not in any enabled map, ignored", event.action);
            return;
        };
        match map.domain() {
            ActionDomain::Player => match PlayerAction::from_name(&event.action) {
                Some(action) => {
                    self.player.handle(action, event.phase, event.value, &mut self.gameplay_events)
                }
                None => debug!("'{}' is not a player action", event.action),
            },
            ActionDomain::Ui => match UiAction::from_name(&event.action) {
                Some(action) => self.ui.handle(action, event.phase, event.value, &mut self.ui_events),
                None => debug!("'{}' is not a UI action", event.action),
            },
        }
    }

    pub fn route_all<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>) {
        for event in events {
            self.route(event);
        }
    }

    pub fn drain_gameplay_events(&mut self) -> impl Iterator<Item = GameplayEvent> + '_ {
        self.gameplay_events.drain(..)
    }

    pub fn drain_ui_events(&mut self) -> impl Iterator<Item = UiEvent> + '_ {
        self.ui_events.drain(..)
    }

    pub fn maps(&self) -> &ActionMapSet {
        &self.maps
    }

    pub fn maps_mut(&mut self) -> &mut ActionMapSet {
        &mut self.maps
    }

    pub fn move_input(&self) -> Vec2 {
        self.player.move_input
    }

    pub fn look_input(&self) -> Vec2 {
        self.player.look_input
    }

    pub fn move_is_triggered(&self) -> bool {
        self.player.move_is_triggered
    }

    pub fn jump_is_triggered(&self) -> bool {
        self.player.jump_is_triggered
    }

    pub fn sprint_is_triggered(&self) -> bool {
        self.player.sprint_is_triggered
    }

    pub fn interact_is_triggered(&self) -> bool {
        self.player.interact_is_triggered
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(InputSettings::default())
    }
}

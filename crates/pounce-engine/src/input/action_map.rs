//! Named groups of actions that are enabled and disabled together.
//!
//! Exactly one map is "current" at a time; switching disables the old one.
//! Only actions belonging to an enabled map are routed.

use log::error;

use super::actions::{PlayerAction, UiAction};

pub const PLAYER_MAP: &str = "Player";
pub const UI_MAP: &str = "UI";

/// Which handler receives the actions of a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionDomain {
    Player,
    Ui,
}

#[derive(Debug, Clone)]
pub struct ActionMap {
    name: String,
    domain: ActionDomain,
    actions: Vec<String>,
    enabled: bool,
}

impl ActionMap {
    pub fn new(
        name: impl Into<String>,
        domain: ActionDomain,
        actions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            domain,
            actions: actions.into_iter().map(Into::into).collect(),
            enabled: false,
        }
    }

    /// The standard `Player` map with every `PlayerAction`.
    pub fn player() -> Self {
        Self::new(PLAYER_MAP, ActionDomain::Player, PlayerAction::ALL.map(PlayerAction::name))
    }

    /// The standard `UI` map with every `UiAction`.
    pub fn ui() -> Self {
        Self::new(UI_MAP, ActionDomain::Ui, UiAction::ALL.map(UiAction::name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> ActionDomain {
        self.domain
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn contains(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a == action)
    }
}

/// The full set of maps plus which one is current.
#[derive(Debug, Clone)]
pub struct ActionMapSet {
    maps: Vec<ActionMap>,
    /// Index of the map enabled by `enable_default_action_map`.
    default: usize,
    current: Option<usize>,
}

impl ActionMapSet {
    /// The first map is the default.
    pub fn new(maps: Vec<ActionMap>) -> Self {
        Self {
            maps,
            default: 0,
            current: None,
        }
    }

    /// `Player` (default) + `UI`, nothing enabled yet.
    pub fn standard() -> Self {
        Self::new(vec![ActionMap::player(), ActionMap::ui()])
    }

    pub fn enable_default_action_map(&mut self) {
        if self.maps.is_empty() {
            error!("cannot enable default action map: no action maps configured");
            return;
        }
        self.set_current(self.default);
    }

    /// Make `name` the current map. Unknown names are logged and ignored,
    /// leaving the previous map active.
    pub fn switch_current_action_map(&mut self, name: &str) -> bool {
        let Some(idx) = self.maps.iter().position(|m| m.name == name) else {
            let known: Vec<&str> = self.maps.iter().map(|m| m.name.as_str()).collect();
            error!("cannot find action map '{}' (known: {:?})", name, known);
            return false;
        };
        if self.current != Some(idx) {
            self.set_current(idx);
        }
        true
    }

    pub fn disable_all_action_maps(&mut self) {
        for map in &mut self.maps {
            map.enabled = false;
        }
        self.current = None;
    }

    pub fn current(&self) -> Option<&ActionMap> {
        self.current.and_then(|idx| self.maps.get(idx))
    }

    pub fn get(&self, name: &str) -> Option<&ActionMap> {
        self.maps.iter().find(|m| m.name == name)
    }

    /// The enabled map that owns `action`, if any.
    pub fn resolve(&self, action: &str) -> Option<&ActionMap> {
        self.maps.iter().find(|m| m.enabled && m.contains(action))
    }

    fn set_current(&mut self, idx: usize) {
        if let Some(old) = self.current.and_then(|i| self.maps.get_mut(i)) {
            old.enabled = false;
        }
        if let Some(new) = self.maps.get_mut(idx) {
            new.enabled = true;
            self.current = Some(idx);
        }
    }
}

impl Default for ActionMapSet {
    fn default() -> Self {
        Self::standard()
    }
}

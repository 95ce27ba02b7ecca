//! Named actions of the two built-in action maps.

/// Actions of the `Player` map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    Move,
    Look,
    Attack,
    Interact,
    Crouch,
    Jump,
    Previous,
    Next,
    Sprint,
    Pause,
}

impl PlayerAction {
    pub const ALL: [PlayerAction; 10] = [
        PlayerAction::Move,
        PlayerAction::Look,
        PlayerAction::Attack,
        PlayerAction::Interact,
        PlayerAction::Crouch,
        PlayerAction::Jump,
        PlayerAction::Previous,
        PlayerAction::Next,
        PlayerAction::Sprint,
        PlayerAction::Pause,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlayerAction::Move => "Move",
            PlayerAction::Look => "Look",
            PlayerAction::Attack => "Attack",
            PlayerAction::Interact => "Interact",
            PlayerAction::Crouch => "Crouch",
            PlayerAction::Jump => "Jump",
            PlayerAction::Previous => "Previous",
            PlayerAction::Next => "Next",
            PlayerAction::Sprint => "Sprint",
            PlayerAction::Pause => "Pause",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

/// Actions of the `UI` map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiAction {
    Navigate,
    Submit,
    Cancel,
    Point,
    Click,
    RightClick,
    MiddleClick,
    ScrollWheel,
}

impl UiAction {
    pub const ALL: [UiAction; 8] = [
        UiAction::Navigate,
        UiAction::Submit,
        UiAction::Cancel,
        UiAction::Point,
        UiAction::Click,
        UiAction::RightClick,
        UiAction::MiddleClick,
        UiAction::ScrollWheel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UiAction::Navigate => "Navigate",
            UiAction::Submit => "Submit",
            UiAction::Cancel => "Cancel",
            UiAction::Point => "Point",
            UiAction::Click => "Click",
            UiAction::RightClick => "RightClick",
            UiAction::MiddleClick => "MiddleClick",
            UiAction::ScrollWheel => "ScrollWheel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for action in PlayerAction::ALL {
            assert_eq!(PlayerAction::from_name(action.name()), Some(action));
        }
        for action in UiAction::ALL {
            assert_eq!(UiAction::from_name(action.name()), Some(action));
        }
        assert_eq!(PlayerAction::from_name("jump"), None);
    }
}

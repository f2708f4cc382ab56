/// Keys bound by the overlay while the scene is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Previous entity, wrapping.
    ArrowLeft,
    /// Next entity, wrapping.
    ArrowRight,
    /// Back to overview.
    Escape,
    /// Re-select the current entity.
    Enter,
}

impl NavKey {
    /// Map a DOM `keyCode`.
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(NavKey::ArrowLeft),
            39 => Some(NavKey::ArrowRight),
            27 => Some(NavKey::Escape),
            13 => Some(NavKey::Enter),
            _ => None,
        }
    }

    /// Map a DOM `KeyboardEvent.key` name.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(NavKey::ArrowLeft),
            "ArrowRight" => Some(NavKey::ArrowRight),
            "Escape" | "Esc" => Some(NavKey::Escape),
            "Enter" => Some(NavKey::Enter),
            _ => None,
        }
    }

    pub fn key_code(self) -> u32 {
        match self {
            NavKey::ArrowLeft => 37,
            NavKey::ArrowRight => 39,
            NavKey::Escape => 27,
            NavKey::Enter => 13,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_names_agree() {
        for key in [NavKey::ArrowLeft, NavKey::ArrowRight, NavKey::Escape, NavKey::Enter] {
            assert_eq!(NavKey::from_key_code(key.key_code()), Some(key));
        }
        assert_eq!(NavKey::from_key_name("ArrowRight"), Some(NavKey::ArrowRight));
        assert_eq!(NavKey::from_key_name("a"), None);
        assert_eq!(NavKey::from_key_code(32), None);
    }
}

//! Elemental affinities shared by skills, synergies and characters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementType {
    Fire,
    Ice,
    Thunder,
    Wind,
    Light,
    Dark,
}

impl ElementType {
    pub const ALL: [ElementType; 6] = [
        ElementType::Fire,
        ElementType::Ice,
        ElementType::Thunder,
        ElementType::Wind,
        ElementType::Light,
        ElementType::Dark,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Fire => "Fire",
            ElementType::Ice => "Ice",
            ElementType::Thunder => "Thunder",
            ElementType::Wind => "Wind",
            ElementType::Light => "Light",
            ElementType::Dark => "Dark",
        }
    }

    /// Position in [`ElementType::ALL`], used to index per-element arrays.
    pub fn index(&self) -> usize {
        match self {
            ElementType::Fire => 0,
            ElementType::Ice => 1,
            ElementType::Thunder => 2,
            ElementType::Wind => 3,
            ElementType::Light => 4,
            ElementType::Dark => 5,
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<ElementType> {
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, element) in ElementType::ALL.iter().enumerate() {
            assert_eq!(element.index(), i);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ElementType::from_name("thunder"), Some(ElementType::Thunder));
        assert_eq!(ElementType::from_name(" Dark "), Some(ElementType::Dark));
        assert_eq!(ElementType::from_name("Water"), None);
    }
}

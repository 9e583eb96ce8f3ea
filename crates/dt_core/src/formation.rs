//! Static formation catalog.
//!
//! A formation is an ordered list of position slots, goalkeeper first,
//! defence through attack. The catalog is fixed configuration data and is
//! not editable at runtime.

use serde::{Deserialize, Serialize};

use crate::models::Position;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormationData {
    pub name: String,
    pub slots: Vec<Position>,
}

impl FormationData {
    pub fn new(name: &str, slots: Vec<Position>) -> Self {
        Self {
            name: name.to_string(),
            slots,
        }
    }

    pub fn all_formations() -> Vec<FormationData> {
        vec![
            Self::create_442(),
            Self::create_433(),
            Self::create_4231(),
            Self::create_352(),
        ]
    }

    pub fn by_name(name: &str) -> Option<FormationData> {
        Self::all_formations().into_iter().find(|f| f.name == name)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn create_442() -> FormationData {
        FormationData::new(
            "4-4-2",
            vec![
                Position::GK,
                Position::LB,
                Position::CB,
                Position::CB,
                Position::RB,
                Position::LW,
                Position::CM,
                Position::CM,
                Position::RW,
                Position::ST,
                Position::ST,
            ],
        )
    }

    fn create_433() -> FormationData {
        FormationData::new(
            "4-3-3",
            vec![
                Position::GK,
                Position::LB,
                Position::CB,
                Position::CB,
                Position::RB,
                Position::DM,
                Position::CM,
                Position::CM,
                Position::LW,
                Position::RW,
                Position::ST,
            ],
        )
    }

    fn create_4231() -> FormationData {
        FormationData::new(
            "4-2-3-1",
            vec![
                Position::GK,
                Position::LB,
                Position::CB,
                Position::CB,
                Position::RB,
                Position::DM,
                Position::DM,
                Position::LW,
                Position::AM,
                Position::RW,
                Position::ST,
            ],
        )
    }

    fn create_352() -> FormationData {
        FormationData::new(
            "3-5-2",
            vec![
                Position::GK,
                Position::CB,
                Position::CB,
                Position::CB,
                Position::LB,
                Position::DM,
                Position::CM,
                Position::AM,
                Position::RB,
                Position::ST,
                Position::ST,
            ],
        )
    }
}

use serde::{Deserialize, Serialize};

/// On-pitch position codes as used by roster forms and formation slots.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Position {
    GK,
    CB,
    RB,
    LB,
    DM,
    CM,
    AM,
    RW,
    LW,
    ST,
}

impl Position {
    pub fn all() -> [Position; 10] {
        [
            Position::GK,
            Position::CB,
            Position::RB,
            Position::LB,
            Position::DM,
            Position::CM,
            Position::AM,
            Position::RW,
            Position::LW,
            Position::ST,
        ]
    }

    /// Canonical position code string (e.g., "CB").
    pub fn code(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::CB => "CB",
            Position::RB => "RB",
            Position::LB => "LB",
            Position::DM => "DM",
            Position::CM => "CM",
            Position::AM => "AM",
            Position::RW => "RW",
            Position::LW => "LW",
            Position::ST => "ST",
        }
    }

    pub fn from_code(code: &str) -> Option<Position> {
        Position::all().into_iter().find(|p| p.code() == code)
    }

    pub fn role_group(&self) -> RoleGroup {
        match self {
            Position::GK => RoleGroup::Goalkeeper,
            Position::CB => RoleGroup::CentreBack,
            Position::RB | Position::LB => RoleGroup::FullBack,
            Position::DM => RoleGroup::DefensiveMidfielder,
            Position::CM => RoleGroup::CentralMidfielder,
            Position::AM => RoleGroup::AttackingMidfielder,
            Position::RW | Position::LW => RoleGroup::Winger,
            Position::ST => RoleGroup::Striker,
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }
}

/// Role families that share an action catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RoleGroup {
    Goalkeeper,
    CentreBack,
    FullBack,
    DefensiveMidfielder,
    CentralMidfielder,
    AttackingMidfielder,
    Winger,
    Striker,
}

impl RoleGroup {
    pub fn all() -> [RoleGroup; 8] {
        [
            RoleGroup::Goalkeeper,
            RoleGroup::CentreBack,
            RoleGroup::FullBack,
            RoleGroup::DefensiveMidfielder,
            RoleGroup::CentralMidfielder,
            RoleGroup::AttackingMidfielder,
            RoleGroup::Winger,
            RoleGroup::Striker,
        ]
    }

    /// Human-readable role label used in logs and exports.
    pub fn label(&self) -> &'static str {
        match self {
            RoleGroup::Goalkeeper => "Goalkeeper",
            RoleGroup::CentreBack => "Centre-Back",
            RoleGroup::FullBack => "Full-Back",
            RoleGroup::DefensiveMidfielder => "Defensive Midfielder",
            RoleGroup::CentralMidfielder => "Central Midfielder",
            RoleGroup::AttackingMidfielder => "Attacking Midfielder",
            RoleGroup::Winger => "Winger",
            RoleGroup::Striker => "Striker",
        }
    }

    pub fn from_label(label: &str) -> Option<RoleGroup> {
        RoleGroup::all().into_iter().find(|r| r.label() == label)
    }

    /// Trackable actions for this role family.
    pub fn actions(&self) -> &'static [&'static str] {
        match self {
            RoleGroup::Goalkeeper => &["Save", "Distribution", "Sweeper"],
            RoleGroup::CentreBack => &["Tackle", "Interception", "Clearance"],
            RoleGroup::FullBack => &["Cross", "1v1 defend", "Overlap"],
            RoleGroup::DefensiveMidfielder => &["Ball recovery", "Forward pass", "Press"],
            RoleGroup::CentralMidfielder => &["Progressive pass", "Carry", "Press"],
            RoleGroup::AttackingMidfielder => &["Key pass", "Shot", "Turn"],
            RoleGroup::Winger => &["Dribble", "Cross", "Track back"],
            RoleGroup::Striker => &["Shot", "Goal", "Press"],
        }
    }
}

/// One roster entry. Identity is the (case-sensitive) name string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    /// Jersey number as entered on the roster form; digits only when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jersey: Option<String>,
    pub position: Position,
}

impl Player {
    pub fn new(name: impl Into<String>, jersey: Option<&str>, position: Position) -> Self {
        Self {
            name: name.into(),
            jersey: jersey.map(|j| j.to_string()),
            position,
        }
    }

    pub fn role(&self) -> RoleGroup {
        self.position.role_group()
    }
}

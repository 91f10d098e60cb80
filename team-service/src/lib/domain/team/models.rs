use std::collections::BTreeMap;
use std::fmt;

use uuid::Uuid;

use crate::team::errors::RosterError;

/// Durable identifier of a saved person row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonId(pub Uuid);

impl PersonId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A submitted roster line: who, and which role they play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    name: String,
    role: String,
}

impl RosterEntry {
    const MAX_LENGTH: usize = 100;

    /// Validate one roster line. `index` is the line's position, used in error messages.
    ///
    /// # Errors
    /// * `BlankName` / `BlankRole` - Field empty after trimming
    /// * `TooLong` - Field longer than 100 characters
    /// * `InvalidCharacters` - Field contains NUL or other control characters
    pub fn new(index: usize, name: String, role: String) -> Result<Self, RosterError> {
        let name = name.trim().to_string();
        let role = role.trim().to_string();

        if name.is_empty() {
            return Err(RosterError::BlankName { index });
        }
        if role.is_empty() {
            return Err(RosterError::BlankRole { index });
        }
        for (field, value) in [("name", &name), ("role", &role)] {
            if value.chars().count() > Self::MAX_LENGTH {
                return Err(RosterError::TooLong {
                    index,
                    field,
                    max: Self::MAX_LENGTH,
                });
            }
            if value.chars().any(char::is_control) {
                return Err(RosterError::InvalidCharacters { index, field });
            }
        }

        Ok(Self { name, role })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

/// Non-empty list of roster entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster(Vec<RosterEntry>);

impl Roster {
    /// # Errors
    /// * `Empty` - No entries
    pub fn new(entries: Vec<RosterEntry>) -> Result<Self, RosterError> {
        if entries.is_empty() {
            return Err(RosterError::Empty);
        }
        Ok(Self(entries))
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Requested number of teams, at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamCount(u32);

impl TeamCount {
    /// # Errors
    /// * `InvalidTeamCount` - Zero, negative, or beyond `u32`
    pub fn new(count: i64) -> Result<Self, RosterError> {
        u32::try_from(count)
            .ok()
            .filter(|c| *c >= 1)
            .map(Self)
            .ok_or(RosterError::InvalidTeamCount(count))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

/// A roster entry with its team. `team` is 1-based; 0 means unassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: Option<PersonId>,
    pub name: String,
    pub role: String,
    pub team: u32,
}

/// Members of one team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub team: u32,
    pub members: Vec<Person>,
}

/// People grouped by team number, ascending. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentResult {
    pub teams: Vec<Team>,
    pub total: usize,
}

impl AssignmentResult {
    /// Group people by their team number.
    ///
    /// Teams come out in ascending order; teams nobody belongs to are absent.
    /// Members keep their relative order from `people`.
    pub fn from_people(people: Vec<Person>) -> Self {
        let total = people.len();
        let mut grouped: BTreeMap<u32, Vec<Person>> = BTreeMap::new();
        for person in people {
            grouped.entry(person.team).or_default().push(person);
        }

        let teams = grouped
            .into_iter()
            .map(|(team, members)| Team { team, members })
            .collect();

        Self { teams, total }
    }

    pub fn empty() -> Self {
        Self {
            teams: Vec::new(),
            total: 0,
        }
    }
}

/// Command to split a roster into teams
#[derive(Debug, Clone)]
pub struct RandomizeCommand {
    pub roster: Roster,
    pub team_count: TeamCount,
}

impl RandomizeCommand {
    pub fn new(roster: Roster, team_count: TeamCount) -> Self {
        Self { roster, team_count }
    }
}

//! Role-balanced team assignment.
//!
//! People are grouped by role, each group is shuffled independently, and a
//! single round-robin counter runs across all groups. Because the counter is
//! never reset between groups, every role's members are spread over
//! consecutive teams, so for any role the member counts of two teams differ
//! by at most one, and so do the team sizes.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::team::models::Person;
use crate::team::models::Roster;
use crate::team::models::RosterEntry;
use crate::team::models::TeamCount;

/// Assign every roster entry a team number in `1..=team_count`.
///
/// Output order follows the assignment order: role groups one after another,
/// members of a group in their shuffled order. Nothing is persisted here.
pub fn assign<R>(roster: &Roster, team_count: TeamCount, rng: &mut R) -> Vec<Person>
where
    R: Rng + ?Sized,
{
    let mut by_role: BTreeMap<&str, Vec<&RosterEntry>> = BTreeMap::new();
    for entry in roster.entries() {
        by_role.entry(entry.role()).or_default().push(entry);
    }

    let mut groups: Vec<Vec<&RosterEntry>> = by_role.into_values().collect();
    // Which role group starts at team 1 is left to chance as well
    groups.shuffle(rng);

    let teams = team_count.get() as usize;
    let mut people = Vec::with_capacity(roster.len());
    let mut running = 0usize;

    for mut group in groups {
        group.shuffle(rng);
        for entry in group {
            people.push(Person {
                id: None,
                name: entry.name().to_string(),
                role: entry.role().to_string(),
                team: (running % teams) as u32 + 1,
            });
            running += 1;
        }
    }

    people
}

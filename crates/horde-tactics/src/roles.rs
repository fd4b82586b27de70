//! Greedy role assignment: match enemies to formation slots.

use horde_core::enums::{EnemyKind, FormationRole};
use horde_core::types::EnemyId;

use crate::formation::{FormationSlot, UnitSnapshot};

/// One enemy placed into one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment {
    pub enemy: EnemyId,
    pub slot: usize,
}

/// Preferred kinds for a role, best tier first. Empty means anyone.
fn preference_tiers(role: FormationRole) -> &'static [&'static [EnemyKind]] {
    match role {
        FormationRole::Ranged => &[&[EnemyKind::Sniper, EnemyKind::FireShooter]],
        FormationRole::Protector => &[&[EnemyKind::Brute], &[EnemyKind::Crawler]],
        FormationRole::Assault => &[&[EnemyKind::Brute, EnemyKind::Crawler]],
        FormationRole::Default | FormationRole::Flanker => &[],
    }
}

/// Assign enemies to slots, highest priority first (stable among equals).
///
/// Each slot takes the nearest enemy from the best non-empty preference
/// tier, falling back to the whole remaining pool. Every enemy is placed
/// at most once and slots beyond the pool stay unassigned. O(slots × enemies).
pub fn assign_roles(slots: &mut [FormationSlot], enemies: &[UnitSnapshot]) -> Vec<Assignment> {
    let mut order: Vec<usize> = (0..slots.len()).collect();
    order.sort_by(|&a, &b| slots[b].priority.cmp(&slots[a].priority));

    let mut available: Vec<&UnitSnapshot> = enemies.iter().collect();
    let mut assignments = Vec::with_capacity(slots.len().min(enemies.len()));

    for index in order {
        if available.is_empty() {
            break;
        }
        let slot = &mut slots[index];

        let tier = preference_tiers(slot.role)
            .iter()
            .map(|kinds| {
                available
                    .iter()
                    .enumerate()
                    .filter(|(_, u)| kinds.contains(&u.kind))
                    .map(|(i, _)| i)
                    .collect::<Vec<_>>()
            })
            .find(|tier| !tier.is_empty())
            .unwrap_or_else(|| (0..available.len()).collect());

        let nearest = tier.into_iter().min_by(|&a, &b| {
            let da = available[a].position.distance_squared(slot.position);
            let db = available[b].position.distance_squared(slot.position);
            da.total_cmp(&db)
        });

        if let Some(pick) = nearest {
            let unit = available.remove(pick);
            slot.assigned = true;
            assignments.push(Assignment {
                enemy: unit.id,
                slot: index,
            });
        }
    }

    assignments
}

//! Formation coordinator.
//!
//! Decides when nearby enemies group up, which layout they use, and how
//! long the group lives. Memberships are kept in a table keyed by
//! `EnemyId`; the coordinator never touches enemy state directly and
//! reports lifecycle changes as `FormationEvent`s for the engine to apply.

use std::collections::{BTreeMap, BTreeSet};

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use horde_core::components::FormationMembership;
use horde_core::constants::*;
use horde_core::enums::{FormationRole, FormationStyle};
use horde_core::events::FormationEvent;
use horde_core::types::{EnemyId, Vec2};

use crate::formation::{compute_positions, FormationSlot, UnitMix, UnitSnapshot};
use crate::roles::assign_roles;

/// Tunables for forming and disbanding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationConfig {
    /// Fewest unformed enemies that may form (>= 3).
    pub min_form_size: usize,
    /// Candidates sampled per clustering check.
    pub sample_size: usize,
    /// Close-pair distance for the clustering score.
    pub proximity: f64,
    /// Failed checks before the bar drops by one.
    pub relief_after: u32,
    /// Living members below which the formation disbands.
    pub min_members: usize,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            min_form_size: FORMATION_MIN_SIZE,
            sample_size: FORMATION_SAMPLE_SIZE,
            proximity: FORMATION_PROXIMITY,
            relief_after: FORMATION_RELIEF_AFTER,
            min_members: FORMATION_MIN_MEMBERS,
        }
    }
}

/// The single live formation.
#[derive(Debug, Clone)]
pub struct ActiveFormation {
    pub style: FormationStyle,
    pub slots: Vec<FormationSlot>,
    pub members: Vec<EnemyId>,
    /// Seconds until the formation disbands.
    pub disband_timer: f64,
    /// Seconds until the coordinated strike, for aggressive styles.
    pub strike_countdown: Option<f64>,
    /// Seconds left in the strike window (0 outside it).
    pub strike_remaining: f64,
}

impl ActiveFormation {
    pub fn is_striking(&self) -> bool {
        self.strike_remaining > 0.0
    }
}

/// Owns formation state for the whole arena.
pub struct FormationCoordinator {
    config: FormationConfig,
    rng: ChaCha8Rng,
    cooldown: f64,
    failed_attempts: u32,
    last_style: Option<FormationStyle>,
    active: Option<ActiveFormation>,
    memberships: BTreeMap<EnemyId, FormationMembership>,
}

impl FormationCoordinator {
    pub fn new(config: FormationConfig, rng: ChaCha8Rng) -> Self {
        Self {
            config,
            rng,
            cooldown: 0.0,
            failed_attempts: 0,
            last_style: None,
            active: None,
            memberships: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &FormationConfig {
        &self.config
    }

    pub fn active(&self) -> Option<&ActiveFormation> {
        self.active.as_ref()
    }

    pub fn membership(&self, id: EnemyId) -> Option<&FormationMembership> {
        self.memberships.get(&id)
    }

    pub fn memberships(&self) -> &BTreeMap<EnemyId, FormationMembership> {
        &self.memberships
    }

    /// Seconds before another formation may form.
    pub fn cooldown(&self) -> f64 {
        self.cooldown
    }

    /// Consecutive clustering checks that fell short of the bar.
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn last_style(&self) -> Option<FormationStyle> {
        self.last_style
    }

    /// Whether `candidates` are clustered tightly enough to form.
    ///
    /// Samples at most `sample_size` candidates and scores close pairs,
    /// with a half-point bonus for very tight pairs. The bar drops by one
    /// after `relief_after` consecutive misses and resets on success.
    pub fn should_form(&mut self, candidates: &[UnitSnapshot], _player: Vec2) -> bool {
        if candidates.len() < self.config.min_form_size.max(3) || self.cooldown > 0.0 {
            return false;
        }

        let sample: Vec<&UnitSnapshot> = if candidates.len() > self.config.sample_size {
            candidates
                .choose_multiple(&mut self.rng, self.config.sample_size)
                .collect()
        } else {
            candidates.iter().collect()
        };

        let close_sq = self.config.proximity * self.config.proximity;
        let tight_sq = close_sq / 4.0;
        let mut score = 0.0;
        for (i, a) in sample.iter().enumerate() {
            for b in &sample[i + 1..] {
                let d2 = a.position.distance_squared(b.position);
                if d2 < close_sq {
                    score += 1.0;
                    if d2 < tight_sq {
                        score += 0.5;
                    }
                }
            }
        }

        let mut bar = (sample.len() / 4).max(2);
        if self.failed_attempts >= self.config.relief_after {
            bar = bar.saturating_sub(1).max(1);
        }

        if score >= bar as f64 {
            self.failed_attempts = 0;
            true
        } else {
            self.failed_attempts += 1;
            false
        }
    }

    /// Pick a layout for the group, avoiding the previous one when an
    /// alternative exists.
    pub fn choose_style(&mut self, candidates: &[UnitSnapshot]) -> FormationStyle {
        let mix = UnitMix::of(candidates);
        let count = mix.total();

        let options: Vec<FormationStyle> = if mix.ranged > 0 && mix.melee >= mix.ranged * 2 {
            vec![FormationStyle::ProtectRanged]
        } else if count >= 6 && mix.melee >= 4 {
            if self.rng.gen_bool(0.6) {
                vec![FormationStyle::EncircleTrap, FormationStyle::TriangleAssault]
            } else {
                vec![FormationStyle::TriangleAssault, FormationStyle::EncircleTrap]
            }
        } else if count <= 6 {
            vec![FormationStyle::Surround, FormationStyle::Wedge]
        } else if count <= 10 {
            vec![FormationStyle::Pincer, FormationStyle::Wall]
        } else {
            vec![FormationStyle::Ambush, FormationStyle::Wedge]
        };

        options
            .iter()
            .copied()
            .find(|s| Some(*s) != self.last_style)
            .unwrap_or(options[0])
    }

    /// Advance one tick. `roster` holds every living, non-dying enemy.
    pub fn update(&mut self, dt: f64, roster: &[UnitSnapshot], player: Vec2) -> Vec<FormationEvent> {
        let mut events = Vec::new();
        self.cooldown = (self.cooldown - dt).max(0.0);

        if self.active.is_some() {
            self.maintain(dt, roster, &mut events);
            return events;
        }

        let unformed: Vec<UnitSnapshot> = roster
            .iter()
            .filter(|u| !self.memberships.contains_key(&u.id))
            .copied()
            .collect();
        if self.should_form(&unformed, player) {
            if let Some(event) = self.initiate(&unformed, player) {
                events.push(event);
            }
        }
        events
    }

    fn initiate(&mut self, candidates: &[UnitSnapshot], player: Vec2) -> Option<FormationEvent> {
        let style = self.choose_style(candidates);
        let centroid =
            candidates.iter().map(|u| u.position).sum::<Vec2>() / candidates.len() as f64;
        let mut slots = compute_positions(
            style,
            UnitMix::of(candidates),
            player,
            centroid - player,
            &mut self.rng,
        );
        let assignments = assign_roles(&mut slots, candidates);
        if assignments.is_empty() {
            return None;
        }

        for a in &assignments {
            let slot = &slots[a.slot];
            self.memberships.insert(
                a.enemy,
                FormationMembership {
                    target: slot.position,
                    role: slot.role,
                    priority: 0.5,
                    coordinated_attack: false,
                    attack_boost: 1.0,
                },
            );
        }
        let members: Vec<EnemyId> = assignments.iter().map(|a| a.enemy).collect();

        let (lo, hi) = FORMATION_LIFETIME_SECS;
        let disband_timer = self.rng.gen_range(lo..hi);
        let strike_countdown = if style.is_aggressive() {
            let (lo, hi) = COORDINATED_DELAY_SECS;
            Some(self.rng.gen_range(lo..hi))
        } else {
            None
        };

        info!(
            ?style,
            members = members.len(),
            disband_in = disband_timer,
            "formation formed"
        );
        self.last_style = Some(style);
        self.active = Some(ActiveFormation {
            style,
            slots,
            members: members.clone(),
            disband_timer,
            strike_countdown,
            strike_remaining: 0.0,
        });
        self.refresh_priorities(candidates);

        Some(FormationEvent::Formed { style, members })
    }

    fn maintain(&mut self, dt: f64, roster: &[UnitSnapshot], events: &mut Vec<FormationEvent>) {
        let Some(formation) = self.active.as_mut() else {
            return;
        };
        formation.disband_timer -= dt;

        let living: BTreeSet<EnemyId> = roster.iter().map(|u| u.id).collect();
        let memberships = &mut self.memberships;
        formation.members.retain(|id| {
            let alive = living.contains(id);
            if !alive {
                memberships.remove(id);
            }
            alive
        });

        if formation.members.len() < self.config.min_members || formation.disband_timer <= 0.0 {
            self.disband(events);
            return;
        }

        if let Some(countdown) = formation.strike_countdown.as_mut() {
            *countdown -= dt;
            if *countdown <= 0.0 {
                formation.strike_countdown = None;
                formation.strike_remaining = COORDINATED_WINDOW_SECS;
                for id in &formation.members {
                    if let Some(m) = self.memberships.get_mut(id) {
                        m.coordinated_attack = true;
                        m.attack_boost = COORDINATED_ATTACK_BOOST;
                    }
                }
                debug!(members = formation.members.len(), "coordinated strike");
                events.push(FormationEvent::CoordinatedStrike {
                    members: formation.members.clone(),
                    cooldown_cut: COORDINATED_COOLDOWN_CUT,
                });
            }
        } else if formation.strike_remaining > 0.0 {
            formation.strike_remaining -= dt;
            if formation.strike_remaining <= 0.0 {
                formation.strike_remaining = 0.0;
                for m in self.memberships.values_mut() {
                    m.coordinated_attack = false;
                    m.attack_boost = 1.0;
                }
                debug!("coordinated strike ended");
                events.push(FormationEvent::StrikeEnded);
            }
        }

        self.refresh_priorities(roster);
    }

    fn disband(&mut self, events: &mut Vec<FormationEvent>) {
        let Some(formation) = self.active.take() else {
            return;
        };
        self.memberships.clear();
        let (lo, hi) = FORMATION_COOLDOWN_SECS;
        self.cooldown = self.rng.gen_range(lo..hi);
        info!(
            style = ?formation.style,
            remaining = formation.members.len(),
            cooldown = self.cooldown,
            "formation disbanded"
        );
        events.push(FormationEvent::Disbanded {
            style: formation.style,
            cooldown_secs: self.cooldown,
        });
    }

    /// Recompute each member's movement weight from its role and distance
    /// to its slot.
    fn refresh_priorities(&mut self, roster: &[UnitSnapshot]) {
        let Some(formation) = self.active.as_ref() else {
            return;
        };
        let striking = formation.is_striking();
        let positions: BTreeMap<EnemyId, Vec2> =
            roster.iter().map(|u| (u.id, u.position)).collect();
        let ranged_positions: Vec<Vec2> = self
            .memberships
            .iter()
            .filter(|(_, m)| m.role == FormationRole::Ranged)
            .filter_map(|(id, _)| positions.get(id).copied())
            .collect();

        for (id, membership) in self.memberships.iter_mut() {
            let Some(&position) = positions.get(id) else {
                continue;
            };
            let to_slot = position.distance(membership.target);
            let mut priority = match membership.role {
                FormationRole::Ranged => {
                    if to_slot > 30.0 {
                        0.8
                    } else {
                        0.3
                    }
                }
                FormationRole::Protector => {
                    let nearest_ranged = ranged_positions
                        .iter()
                        .map(|p| p.distance(position))
                        .fold(f64::INFINITY, f64::min);
                    if nearest_ranged > 100.0 && nearest_ranged.is_finite() {
                        0.8
                    } else if to_slot > 25.0 {
                        0.6
                    } else {
                        0.4
                    }
                }
                FormationRole::Assault => {
                    if to_slot > 20.0 {
                        0.7
                    } else {
                        0.2
                    }
                }
                FormationRole::Default | FormationRole::Flanker => {
                    if to_slot > 25.0 {
                        0.5
                    } else {
                        0.2
                    }
                }
            };
            if striking {
                priority *= 0.5;
            }
            membership.priority = priority;
        }
    }
}

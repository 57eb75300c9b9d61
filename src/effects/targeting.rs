//! Target resolution.
//!
//! Targets are resolved per effect, in card order:
//!
//! - Group kinds resolve against the whole group and ignore supplied ids.
//! - Single-target kinds consume the next unused id from the action's
//!   target list, so one card can address two single-target effects at two
//!   different gods.
//! - An effect with no kind inherits the previous effect's resolved single
//!   target, falling back to the action's primary target.
//!
//! A living enemy god with provocation is the only legal target of
//! single-target enemy-aimed effects; resolution redirects to it.
//! Unresolvable targets yield an empty set, and the sub-effect becomes a
//! no-op while the rest of the card still resolves.

use smallvec::SmallVec;

use crate::cards::TargetKind;
use crate::core::{GodId, PlayerId};
use crate::state::{MatchState, StatusKind};

/// Walks an action's target-id list across a card's effect list.
pub(crate) struct TargetCursor {
    ids: SmallVec<[GodId; 4]>,
    next: usize,
    last_single: Option<GodId>,
    primary: Option<GodId>,
    /// Provoking god overriding enemy-aimed picks. Set only for cards with
    /// at most one single-enemy effect; multi-target cards are validated to
    /// include the provoker instead.
    forced_enemy: Option<GodId>,
}

impl TargetCursor {
    /// Build a cursor from the action's primary target and target list.
    pub(crate) fn new(primary: Option<GodId>, ids: &[GodId]) -> Self {
        let ids: SmallVec<[GodId; 4]> = if ids.is_empty() {
            primary.into_iter().collect()
        } else {
            SmallVec::from_slice(ids)
        };
        Self {
            ids,
            next: 0,
            last_single: None,
            primary,
            forced_enemy: None,
        }
    }

    /// Force enemy-aimed single targets onto a provoking god.
    pub(crate) fn with_forced_enemy(mut self, forced: Option<GodId>) -> Self {
        self.forced_enemy = forced;
        self
    }

    /// Consume the next unused id; an exhausted list falls back to the
    /// primary target.
    fn next_id(&mut self) -> Option<GodId> {
        if self.next < self.ids.len() {
            let id = self.ids[self.next];
            self.next += 1;
            Some(id)
        } else {
            self.primary
        }
    }

    fn remember(&mut self, god: GodId) {
        self.last_single = Some(god);
    }

    /// The target an untargeted effect inherits.
    fn inherited(&self) -> Option<GodId> {
        self.last_single.or(self.primary)
    }
}

/// The first living enemy god carrying provocation, if any.
pub(crate) fn provoking_god(state: &MatchState, attacker: PlayerId) -> Option<GodId> {
    state
        .player(attacker.opponent())
        .living_gods()
        .find(|g| g.has_status(StatusKind::Provocation))
        .map(|g| g.god)
}

fn is_living(state: &MatchState, god: GodId) -> bool {
    state
        .owner_of(god)
        .and_then(|p| state.player(p).god(god))
        .is_some_and(|g| g.is_alive())
}

fn is_living_enemy(state: &MatchState, caster: PlayerId, god: GodId) -> bool {
    state.player(caster.opponent()).god(god).is_some_and(|g| g.is_alive())
}

fn is_living_ally(state: &MatchState, caster: PlayerId, god: GodId) -> bool {
    state.player(caster).god(god).is_some_and(|g| g.is_alive())
}

fn is_enemy(state: &MatchState, caster: PlayerId, god: GodId) -> bool {
    state.player(caster.opponent()).has_god(god)
}

/// Resolve one effect's targets.
pub(crate) fn resolve_targets(
    state: &MatchState,
    caster: PlayerId,
    caster_god: GodId,
    kind: Option<TargetKind>,
    cursor: &mut TargetCursor,
) -> SmallVec<[GodId; 4]> {
    let mut out: SmallVec<[GodId; 4]> = SmallVec::new();

    match kind {
        None => {
            if let Some(god) = cursor.inherited() {
                out.push(god);
            }
        }
        Some(TargetKind::Self_) => out.push(caster_god),
        Some(TargetKind::AllEnemies) => {
            out.extend(state.player(caster.opponent()).living_gods().map(|g| g.god));
        }
        Some(TargetKind::AllAllies) => {
            out.extend(state.player(caster).living_gods().map(|g| g.god));
        }
        Some(TargetKind::AllGods) => {
            out.extend(state.player(caster).living_gods().map(|g| g.god));
            out.extend(state.player(caster.opponent()).living_gods().map(|g| g.god));
        }
        Some(TargetKind::EnemyGod) => {
            let supplied = cursor.next_id();
            let resolved = match cursor.forced_enemy {
                Some(provoker) => Some(provoker),
                None => supplied.filter(|&g| is_living_enemy(state, caster, g)),
            };
            if let Some(god) = resolved {
                cursor.remember(god);
                out.push(god);
            }
        }
        Some(TargetKind::AllyGod) => {
            let resolved = cursor.next_id().filter(|&g| is_living_ally(state, caster, g));
            if let Some(god) = resolved {
                cursor.remember(god);
                out.push(god);
            }
        }
        Some(TargetKind::AnyGod) => {
            let supplied = cursor.next_id().filter(|&g| is_living(state, g));
            let resolved = match supplied {
                Some(god) if is_enemy(state, caster, god) => {
                    Some(cursor.forced_enemy.unwrap_or(god))
                }
                other => other,
            };
            if let Some(god) = resolved {
                cursor.remember(god);
                out.push(god);
            }
        }
        Some(TargetKind::DeadAllyGod) => {
            let resolved = cursor
                .next_id()
                .filter(|&g| state.player(caster).god(g).is_some_and(|gs| gs.dead));
            if let Some(god) = resolved {
                cursor.remember(god);
                out.push(god);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchId;
    use crate::state::{GodState, PlayerState};

    fn state() -> MatchState {
        let mut p0 = PlayerState::new(PlayerId::FIRST, "one");
        p0.gods.push(GodState::new(GodId::new(1), 20));
        p0.gods.push(GodState::new(GodId::new(2), 20));

        let mut p1 = PlayerState::new(PlayerId::SECOND, "two");
        p1.gods.push(GodState::new(GodId::new(3), 20));
        p1.gods.push(GodState::new(GodId::new(4), 20));

        MatchState::new(MatchId::new("m"), [p0, p1], PlayerId::FIRST)
    }

    fn caster() -> GodId {
        GodId::new(1)
    }

    #[test]
    fn test_group_kinds_ignore_ids() {
        let s = state();
        let mut cursor = TargetCursor::new(Some(GodId::new(3)), &[GodId::new(3)]);

        let enemies = resolve_targets(
            &s,
            PlayerId::FIRST,
            caster(),
            Some(TargetKind::AllEnemies),
            &mut cursor,
        );
        assert_eq!(enemies.as_slice(), &[GodId::new(3), GodId::new(4)]);

        let everyone = resolve_targets(
            &s,
            PlayerId::FIRST,
            caster(),
            Some(TargetKind::AllGods),
            &mut cursor,
        );
        assert_eq!(everyone.len(), 4);
    }

    #[test]
    fn test_single_targets_consume_ids_in_order() {
        let s = state();
        let mut cursor = TargetCursor::new(Some(GodId::new(3)), &[GodId::new(3), GodId::new(4)]);

        let first = resolve_targets(
            &s,
            PlayerId::FIRST,
            caster(),
            Some(TargetKind::EnemyGod),
            &mut cursor,
        );
        let second = resolve_targets(
            &s,
            PlayerId::FIRST,
            caster(),
            Some(TargetKind::EnemyGod),
            &mut cursor,
        );

        assert_eq!(first.as_slice(), &[GodId::new(3)]);
        assert_eq!(second.as_slice(), &[GodId::new(4)]);
    }

    #[test]
    fn test_untargeted_inherits_last_single() {
        let s = state();
        let mut cursor = TargetCursor::new(Some(GodId::new(4)), &[GodId::new(4)]);

        let hit = resolve_targets(
            &s,
            PlayerId::FIRST,
            caster(),
            Some(TargetKind::EnemyGod),
            &mut cursor,
        );
        assert_eq!(hit.as_slice(), &[GodId::new(4)]);

        let followup = resolve_targets(&s, PlayerId::FIRST, caster(), None, &mut cursor);
        assert_eq!(followup.as_slice(), &[GodId::new(4)]);
    }

    #[test]
    fn test_untargeted_falls_back_to_primary() {
        let s = state();
        let mut cursor = TargetCursor::new(Some(GodId::new(3)), &[]);

        let resolved = resolve_targets(&s, PlayerId::FIRST, caster(), None, &mut cursor);
        assert_eq!(resolved.as_slice(), &[GodId::new(3)]);
    }

    #[test]
    fn test_invalid_single_target_is_empty() {
        let s = state();
        // God 2 is an ally, not a legal enemy target.
        let mut cursor = TargetCursor::new(Some(GodId::new(2)), &[GodId::new(2)]);

        let resolved = resolve_targets(
            &s,
            PlayerId::FIRST,
            caster(),
            Some(TargetKind::EnemyGod),
            &mut cursor,
        );
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_provocation_redirects_single_enemy_targets() {
        let mut s = state();
        s.player_mut(PlayerId::SECOND)
            .god_mut(GodId::new(4))
            .unwrap()
            .apply_status(StatusKind::Provocation, 1, Some(2));

        let forced = provoking_god(&s, PlayerId::FIRST);
        assert_eq!(forced, Some(GodId::new(4)));

        let mut cursor =
            TargetCursor::new(Some(GodId::new(3)), &[GodId::new(3)]).with_forced_enemy(forced);
        let resolved = resolve_targets(
            &s,
            PlayerId::FIRST,
            caster(),
            Some(TargetKind::EnemyGod),
            &mut cursor,
        );

        assert_eq!(resolved.as_slice(), &[GodId::new(4)]);
    }

    #[test]
    fn test_provocation_ignores_group_effects() {
        let mut s = state();
        s.player_mut(PlayerId::SECOND)
            .god_mut(GodId::new(4))
            .unwrap()
            .apply_status(StatusKind::Provocation, 1, Some(2));

        let mut cursor = TargetCursor::new(None, &[]);
        let resolved = resolve_targets(
            &s,
            PlayerId::FIRST,
            caster(),
            Some(TargetKind::AllEnemies),
            &mut cursor,
        );

        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn test_dead_ally_target() {
        let mut s = state();
        s.player_mut(PlayerId::FIRST)
            .god_mut(GodId::new(2))
            .unwrap()
            .dead = true;

        let mut cursor = TargetCursor::new(Some(GodId::new(2)), &[GodId::new(2)]);
        let resolved = resolve_targets(
            &s,
            PlayerId::FIRST,
            caster(),
            Some(TargetKind::DeadAllyGod),
            &mut cursor,
        );
        assert_eq!(resolved.as_slice(), &[GodId::new(2)]);

        // A living god is not a valid resurrection target.
        let mut cursor = TargetCursor::new(Some(GodId::new(1)), &[GodId::new(1)]);
        let resolved = resolve_targets(
            &s,
            PlayerId::FIRST,
            caster(),
            Some(TargetKind::DeadAllyGod),
            &mut cursor,
        );
        assert!(resolved.is_empty());
    }
}

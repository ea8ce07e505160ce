//! The join action: register participation and update stats and crew.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::types::{
    ApplicationState, CrewMember, JoinReceipt, POINTS_PER_JOIN, TRASH_PER_JOIN,
};

/// Names a new crew member can be drawn from.
pub const CREW_NAMES: &[&str] = &[
    "Alex", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Jamie", "Avery",
];

/// Apply one join action to `state`.
///
/// Stats always increment. The crew only grows when the drawn name is not
/// already present, so `cleanupsJoined` can exceed the crew length.
/// Absent counters count as zero.
pub fn apply_join<R: Rng + ?Sized>(
    state: &mut ApplicationState,
    cleanup: &str,
    joined: &str,
    rng: &mut R,
) -> JoinReceipt {
    let trash_added = rng.gen_range(TRASH_PER_JOIN);
    let stats = &mut state.user_stats;
    stats.cleanups_joined = Some(stats.cleanups_joined.unwrap_or(0).saturating_add(1));
    stats.points_earned = Some(
        stats
            .points_earned
            .unwrap_or(0)
            .saturating_add(POINTS_PER_JOIN),
    );
    stats.trash_collected = Some(stats.trash_collected.unwrap_or(0).saturating_add(trash_added));

    let crew_name = CREW_NAMES.choose(rng).copied().unwrap_or(CREW_NAMES[0]);
    let crew_added = !state.crew.iter().any(|member| member.name == crew_name);
    if crew_added {
        state.crew.push(CrewMember {
            name: crew_name.to_string(),
            cleanup: cleanup.to_string(),
            joined: joined.to_string(),
        });
    }

    JoinReceipt {
        cleanup: cleanup.to_string(),
        crew_name: crew_name.to_string(),
        crew_added,
        trash_added,
        stats: state.user_stats,
    }
}

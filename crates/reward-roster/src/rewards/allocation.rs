use super::domain::{AllocationError, AllocationThresholds, Member};
use super::slate::RewardSlate;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Result of the threshold pass. `cursor` is the index of the first slot the
/// overflow pass should fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPass {
    pub cursor: usize,
    pub eligible: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowPass {
    pub pool_size: usize,
    pub assigned: usize,
}

/// Counters describing a completed allocation.
#[derive(Debug, Clone, Serialize)]
pub struct AllocationSummary {
    pub total_slots: usize,
    pub threshold_eligible: usize,
    pub threshold_assigned: usize,
    pub unrewarded_eligible: usize,
    pub overflow_pool: usize,
    pub overflow_assigned: usize,
}

/// Gives one slot to every member meeting `minimum`, in roster order, until
/// either the slots or the eligible members run out.
pub fn allocate_by_threshold(
    slate: &mut RewardSlate,
    members: &[Member],
    minimum: i64,
) -> Result<ThresholdPass, AllocationError> {
    let eligible: Vec<&Member> = members
        .iter()
        .filter(|member| member.meets_primary(minimum))
        .collect();

    if eligible.is_empty() {
        return Err(AllocationError::NoEligibleMembers { minimum });
    }

    let mut cursor = 0;
    for (slot, member) in slate.slots_mut().iter_mut().zip(&eligible) {
        slot.assign(&member.name);
        cursor += 1;
    }

    if eligible.len() > cursor {
        warn!(
            eligible = eligible.len(),
            slots = cursor,
            "more members met the minimum score than there are slots; surplus members receive nothing"
        );
    }

    debug!(eligible = eligible.len(), assigned = cursor, "threshold pass finished");

    Ok(ThresholdPass {
        cursor,
        eligible: eligible.len(),
    })
}

/// Ranks members meeting `minimum` by fortress points (descending, roster
/// order on ties) and cycles through them to fill every slot from `cursor`
/// onward. Overflow assignment `i` goes to ranked member `i % pool_size`.
pub fn allocate_overflow(
    slate: &mut RewardSlate,
    cursor: usize,
    members: &[Member],
    minimum: i64,
) -> Result<OverflowPass, AllocationError> {
    let pool = ranked_pool(members, minimum);
    let remaining = slate.len().saturating_sub(cursor);

    if remaining == 0 {
        return Ok(OverflowPass {
            pool_size: pool.len(),
            assigned: 0,
        });
    }

    if pool.is_empty() {
        return Err(AllocationError::EmptyOverflowPool { remaining, minimum });
    }

    let mut assigned = 0;
    for (slot, member) in slate
        .slots_mut()
        .iter_mut()
        .skip(cursor)
        .zip(pool.iter().cycle())
    {
        slot.assign(&member.name);
        assigned += 1;
    }

    debug!(pool = pool.len(), assigned, "overflow pass finished");

    Ok(OverflowPass {
        pool_size: pool.len(),
        assigned,
    })
}

/// Members meeting `minimum`, highest fortress points first. The sort is
/// stable so equal scores keep roster order. Members without fortress points
/// are never in the pool.
pub fn ranked_pool(members: &[Member], minimum: i64) -> Vec<&Member> {
    let mut pool: Vec<&Member> = members
        .iter()
        .filter(|member| member.meets_secondary(minimum))
        .collect();
    pool.sort_by(|a, b| b.secondary_score.cmp(&a.secondary_score));
    pool
}

/// Runs both passes over a freshly built slate.
pub struct RewardAllocator {
    thresholds: AllocationThresholds,
}

impl RewardAllocator {
    pub fn new(thresholds: AllocationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> AllocationThresholds {
        self.thresholds
    }

    pub fn allocate(
        &self,
        slate: &mut RewardSlate,
        members: &[Member],
    ) -> Result<AllocationSummary, AllocationError> {
        let threshold = allocate_by_threshold(slate, members, self.thresholds.minimum_score)?;
        let overflow = allocate_overflow(
            slate,
            threshold.cursor,
            members,
            self.thresholds.fortress_points,
        )?;

        let summary = AllocationSummary {
            total_slots: slate.len(),
            threshold_eligible: threshold.eligible,
            threshold_assigned: threshold.cursor,
            unrewarded_eligible: threshold.eligible - threshold.cursor,
            overflow_pool: overflow.pool_size,
            overflow_assigned: overflow.assigned,
        };

        info!(
            slots = summary.total_slots,
            threshold_assigned = summary.threshold_assigned,
            overflow_assigned = summary.overflow_assigned,
            overflow_pool = summary.overflow_pool,
            "reward slots allocated"
        );

        Ok(summary)
    }
}

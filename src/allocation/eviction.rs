use crate::allocation::types::{Member, PriorityClass};

/// Whether a member of `evictor_class` may displace an occupant of `occupant_class`.
/// Equal classes fall back to the id comparison.
pub fn can_evict(
    evictor_class: PriorityClass,
    evictor_id: &str,
    occupant_class: PriorityClass,
    occupant_id: &str,
) -> bool {
    if occupant_class == PriorityClass::Locked {
        return false;
    }
    if matches!(
        evictor_class,
        PriorityClass::Unranked | PriorityClass::OnLeave
    ) {
        return false;
    }
    if occupant_class == PriorityClass::OnLeave {
        return true;
    }

    match evictor_class.rank().cmp(&occupant_class.rank()) {
        std::cmp::Ordering::Less => true,
        std::cmp::Ordering::Equal => evictor_id < occupant_id,
        std::cmp::Ordering::Greater => false,
    }
}

pub fn member_can_evict(evictor: &Member, occupant: &Member) -> bool {
    can_evict(
        evictor.priority_class,
        &evictor.id,
        occupant.priority_class,
        &occupant.id,
    )
}

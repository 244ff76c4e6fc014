//! Collision groups and filtering.

use rapier3d::prelude::*;

/// Collision groups for the firing range.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static environment (ground, walls)
    Environment = 1 << 0,
    /// The shooting character's own capsule
    Shooter = 1 << 1,
    /// Shootable targets
    Target = 1 << 2,
}

impl CollisionGroup {
    /// Create a collision group for environment.
    pub fn environment() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Environment as u32);
        let filter = Group::ALL;
        (membership, filter)
    }

    /// Create a collision group for the shooter.
    pub fn shooter() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Shooter as u32);
        let filter = Group::from_bits_retain(Self::Environment as u32 | Self::Target as u32);
        (membership, filter)
    }

    /// Create a collision group for targets.
    pub fn target() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Target as u32);
        let filter = Group::ALL;
        (membership, filter)
    }

    /// Groups for a hit-scan ray: sees environment and targets, never the shooter.
    pub fn hitscan() -> InteractionGroups {
        InteractionGroups::new(
            Group::ALL,
            Group::from_bits_retain(Self::Environment as u32 | Self::Target as u32),
        )
    }
}

/// Interaction groups from a (membership, filter) pair.
pub fn interaction_groups((membership, filter): (Group, Group)) -> InteractionGroups {
    InteractionGroups::new(membership, filter)
}

use rapier3d::prelude::*;

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Sculptable ground
    Terrain = 0b0000_0001,

    /// The player capsule
    Player = 0b0000_0010,
}

impl CollisionGroups {
    /// Convert to rapier3d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Terrain blocks everything
            CollisionGroups::Terrain => Group::ALL,

            // The player only ever rests on terrain
            CollisionGroups::Player => Group::from_bits_truncate(CollisionGroups::Terrain as u32),
        };

        InteractionGroups::new(memberships, filter)
    }

    /// Query filter that only reports colliders belonging to this group
    pub fn query_filter(self) -> QueryFilter<'static> {
        QueryFilter::new().groups(InteractionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(self as u32),
        ))
    }
}

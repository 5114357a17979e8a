//! Collision presets: per-channel responses + enabled mode.
//!
//! Items switch presets when their state changes (see `item::properties`).
//! The same presets are mirrored onto Rapier `CollisionGroups` so a
//! physics host filters exactly like the simulation does.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{CollisionGroups, Group};

/// Trace / object channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum CollisionChannel {
    /// Crosshair and weapon traces
    Visibility,
    /// World geometry (floor, walls)
    WorldStatic,
    /// Characters
    Pawn,
}

impl CollisionChannel {
    pub const ALL: [CollisionChannel; 3] = [
        CollisionChannel::Visibility,
        CollisionChannel::WorldStatic,
        CollisionChannel::Pawn,
    ];

    pub fn group(self) -> Group {
        match self {
            CollisionChannel::Visibility => Group::GROUP_1,
            CollisionChannel::WorldStatic => Group::GROUP_2,
            CollisionChannel::Pawn => Group::GROUP_3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum CollisionResponse {
    #[default]
    Ignore,
    Overlap,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum CollisionEnabled {
    #[default]
    NoCollision,
    /// Traces and overlaps only
    QueryOnly,
    /// Traces, overlaps and rigid-body contacts
    QueryAndPhysics,
}

/// Responses for every channel + enabled mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct CollisionSettings {
    pub enabled: CollisionEnabled,
    pub visibility: CollisionResponse,
    pub world_static: CollisionResponse,
    pub pawn: CollisionResponse,
}

impl CollisionSettings {
    pub const DISABLED: CollisionSettings = CollisionSettings {
        enabled: CollisionEnabled::NoCollision,
        visibility: CollisionResponse::Ignore,
        world_static: CollisionResponse::Ignore,
        pawn: CollisionResponse::Ignore,
    };

    /// Same response on every channel
    pub fn all(enabled: CollisionEnabled, response: CollisionResponse) -> Self {
        Self {
            enabled,
            visibility: response,
            world_static: response,
            pawn: response,
        }
    }

    /// Ignore everything except `channel`, which gets `response`
    pub fn only(enabled: CollisionEnabled, channel: CollisionChannel, response: CollisionResponse) -> Self {
        Self::all(enabled, CollisionResponse::Ignore).with_response(channel, response)
    }

    pub fn with_response(mut self, channel: CollisionChannel, response: CollisionResponse) -> Self {
        match channel {
            CollisionChannel::Visibility => self.visibility = response,
            CollisionChannel::WorldStatic => self.world_static = response,
            CollisionChannel::Pawn => self.pawn = response,
        }
        self
    }

    pub fn response(&self, channel: CollisionChannel) -> CollisionResponse {
        match channel {
            CollisionChannel::Visibility => self.visibility,
            CollisionChannel::WorldStatic => self.world_static,
            CollisionChannel::Pawn => self.pawn,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled != CollisionEnabled::NoCollision
    }

    pub fn blocks(&self, channel: CollisionChannel) -> bool {
        self.is_enabled() && self.response(channel) == CollisionResponse::Block
    }

    /// Overlap events fire for both Overlap and Block responses
    pub fn overlaps(&self, channel: CollisionChannel) -> bool {
        self.is_enabled() && self.response(channel) != CollisionResponse::Ignore
    }

    /// Rapier filter: member of `object_channel`, interacts with every
    /// channel that is not ignored. Disabled collision interacts with nothing.
    pub fn collision_groups(&self, object_channel: CollisionChannel) -> CollisionGroups {
        if !self.is_enabled() {
            return CollisionGroups::new(object_channel.group(), Group::NONE);
        }

        let filters = CollisionChannel::ALL
            .into_iter()
            .filter(|channel| self.response(*channel) != CollisionResponse::Ignore)
            .fold(Group::NONE, |acc, channel| acc | channel.group());

        CollisionGroups::new(object_channel.group(), filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_blocks_nothing() {
        let settings = CollisionSettings::all(CollisionEnabled::NoCollision, CollisionResponse::Block);
        for channel in CollisionChannel::ALL {
            assert!(!settings.blocks(channel));
            assert!(!settings.overlaps(channel));
        }
    }

    #[test]
    fn test_only_visibility_block() {
        let settings = CollisionSettings::only(
            CollisionEnabled::QueryAndPhysics,
            CollisionChannel::Visibility,
            CollisionResponse::Block,
        );
        assert!(settings.blocks(CollisionChannel::Visibility));
        assert!(!settings.blocks(CollisionChannel::Pawn));
        assert!(!settings.overlaps(CollisionChannel::WorldStatic));
    }

    #[test]
    fn test_collision_groups_follow_responses() {
        let settings = CollisionSettings::only(
            CollisionEnabled::QueryOnly,
            CollisionChannel::WorldStatic,
            CollisionResponse::Block,
        );
        let groups = settings.collision_groups(CollisionChannel::WorldStatic);
        assert_eq!(groups.memberships, Group::GROUP_2);
        assert_eq!(groups.filters, Group::GROUP_2);

        let groups = CollisionSettings::DISABLED.collision_groups(CollisionChannel::Visibility);
        assert_eq!(groups.filters, Group::NONE);
    }
}

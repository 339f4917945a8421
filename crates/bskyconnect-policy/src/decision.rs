//! Pure decision rules mapping classifications to a single action.

use crate::classify::{Activity, Influence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Follow,
    Unfollow,
    Keep,
}

/// Why a [`Decision`] was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Follower is active and already followed.
    AlreadyFollowing,
    /// Follower is active and not yet followed.
    ActiveFollower,
    /// Follower is inactive and we follow them.
    InactiveFollowed(Activity),
    /// Follower is inactive and we do not follow them.
    InactiveNotFollowed(Activity),
    Influencer,
    /// Followed account is inactive.
    Inactive(Activity),
    /// Followed account is active and follows us back.
    Mutual,
    /// Followed account is active, regular, and does not follow back.
    NotReciprocal,
    /// Followed account is active, looks like a bot, and does not follow back.
    BotSuspectNotReciprocal,
}

impl Reason {
    /// Tag carried as the `event` field of the decision log line.
    #[must_use]
    pub fn event_tag(self) -> &'static str {
        match self {
            Reason::AlreadyFollowing => "ALREADYFOLLOW",
            Reason::ActiveFollower => "WEDONTFOLLOW",
            Reason::InactiveFollowed(Activity::BotSuspect)
            | Reason::Inactive(Activity::BotSuspect)
            | Reason::BotSuspectNotReciprocal => "BOTALERT",
            Reason::InactiveFollowed(_) | Reason::Inactive(_) => "HASNTPOSTED",
            Reason::InactiveNotFollowed(_) => "NOTFOLLOWING",
            Reason::Influencer => "INFLUENCER",
            Reason::Mutual => "MUTUAL",
            Reason::NotReciprocal => "REGULARJOE",
        }
    }

    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Reason::AlreadyFollowing => "already following; moving on",
            Reason::ActiveFollower => "active follower we don't follow; following back",
            Reason::InactiveFollowed(_) => "hasn't posted recently; unfollowing",
            Reason::InactiveNotFollowed(_) => "hasn't posted recently; not following",
            Reason::Influencer => "influencer; preserving connection",
            Reason::Inactive(_) => "followed account hasn't posted recently; unfollowing",
            Reason::Mutual => "follows us back; preserving connection",
            Reason::NotReciprocal => "doesn't follow us and isn't an influencer; unfollowing",
            Reason::BotSuspectNotReciprocal => {
                "doesn't follow us and has no follows or followers; unfollowing"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub reason: Reason,
}

impl Decision {
    const fn new(action: Action, reason: Reason) -> Self {
        Self { action, reason }
    }
}

/// Followers policy: follow back active followers, drop inactive ones.
#[must_use]
pub fn decide_follower(following: bool, activity: Activity) -> Decision {
    match (activity, following) {
        (Activity::Current, true) => Decision::new(Action::Keep, Reason::AlreadyFollowing),
        (Activity::Current, false) => Decision::new(Action::Follow, Reason::ActiveFollower),
        (inactive, true) => Decision::new(Action::Unfollow, Reason::InactiveFollowed(inactive)),
        (inactive, false) => Decision::new(Action::Keep, Reason::InactiveNotFollowed(inactive)),
    }
}

/// Follows policy. Influencers always stay; otherwise inactivity, then a
/// missing follow-back, cause an unfollow.
#[must_use]
pub fn decide_follow(activity: Activity, influence: Influence, followed_back: bool) -> Decision {
    if influence == Influence::Influencer {
        return Decision::new(Action::Keep, Reason::Influencer);
    }
    if activity != Activity::Current {
        return Decision::new(Action::Unfollow, Reason::Inactive(activity));
    }
    if followed_back {
        return Decision::new(Action::Keep, Reason::Mutual);
    }
    match influence {
        Influence::BotSuspect => Decision::new(Action::Unfollow, Reason::BotSuspectNotReciprocal),
        Influence::Regular | Influence::Influencer => {
            Decision::new(Action::Unfollow, Reason::NotReciprocal)
        }
    }
}

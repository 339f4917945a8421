//! Sequences classification, decision, and execution over a listing.

use std::time::Duration;

use bskyconnect_client::{ProfileView, SocialGraph};

use crate::classify::{
    activity_status, influence_status, is_followed_back, is_following, InfluenceThresholds,
};
use crate::decision::{decide_follow, decide_follower, Action, Decision};
use crate::executor::{ActionExecutor, Tally};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every profile in the listing was processed.
    Completed,
    /// The action limit was hit; later profiles were not processed.
    LimitReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// Profiles classified before the run ended.
    pub processed: usize,
    pub followed: u32,
    pub unfollowed: u32,
    pub failed: u32,
    /// Profiles whose relationship was left as it was.
    pub unchanged: u32,
}

impl RunReport {
    fn new(outcome: RunOutcome, processed: usize, unchanged: u32, tally: Tally) -> Self {
        Self {
            outcome,
            processed,
            followed: tally.followed,
            unfollowed: tally.unfollowed,
            failed: tally.failed,
            unchanged,
        }
    }
}

/// Runs the followers and follows policies against one authenticated graph.
pub struct PolicyEngine<'g, G> {
    graph: &'g G,
    action_delay: Duration,
    thresholds: InfluenceThresholds,
}

impl<'g, G: SocialGraph> PolicyEngine<'g, G> {
    #[must_use]
    pub fn new(graph: &'g G, action_delay: Duration, thresholds: InfluenceThresholds) -> Self {
        Self {
            graph,
            action_delay,
            thresholds,
        }
    }

    /// Follows back active followers and unfollows inactive ones we follow.
    ///
    /// With a `limit`, the run returns [`RunOutcome::LimitReached`] as soon
    /// as that many mutations have been issued.
    pub async fn manage_followers(
        &self,
        followers: &[ProfileView],
        window_days: u32,
        limit: Option<u32>,
    ) -> RunReport {
        let mut executor = ActionExecutor::new(self.graph, self.action_delay, limit);
        let mut processed = 0usize;
        let mut unchanged = 0u32;

        for profile in followers {
            if executor.limit_reached() {
                return RunReport::new(
                    RunOutcome::LimitReached,
                    processed,
                    unchanged,
                    executor.tally(),
                );
            }
            processed += 1;

            tracing::debug!(handle = %profile.handle, "checking whether we follow account");
            let following = is_following(profile);
            let activity = activity_status(self.graph, profile, window_days).await;
            let decision = decide_follower(following, activity);
            log_decision(profile, decision);

            if !execute(&mut executor, profile, decision.action).await {
                unchanged += 1;
            }

            if executor.limit_reached() {
                tracing::info!(
                    event = "CONNECTDONE",
                    actions = executor.count(),
                    "maximum action count reached"
                );
                return RunReport::new(
                    RunOutcome::LimitReached,
                    processed,
                    unchanged,
                    executor.tally(),
                );
            }
        }

        RunReport::new(RunOutcome::Completed, processed, unchanged, executor.tally())
    }

    /// Prunes accounts we follow: influencers stay, inactive accounts and
    /// accounts that do not follow back are unfollowed.
    pub async fn manage_follows(&self, follows: &[ProfileView], window_days: u32) -> RunReport {
        let mut executor = ActionExecutor::new(self.graph, self.action_delay, None);
        let mut unchanged = 0u32;

        for profile in follows {
            tracing::info!(handle = %profile.handle, "scrutinizing following connection");
            let activity = activity_status(self.graph, profile, window_days).await;
            let influence = influence_status(self.graph, profile, self.thresholds).await;
            let followed_back = is_followed_back(profile);

            let decision = decide_follow(activity, influence, followed_back);
            if followed_back {
                tracing::debug!(handle = %profile.handle, "account follows us");
            } else {
                tracing::info!(
                    event = "DOESNTFOLLOW",
                    handle = %profile.handle,
                    "account doesn't follow us"
                );
            }
            log_decision(profile, decision);

            if !execute(&mut executor, profile, decision.action).await {
                unchanged += 1;
            }
        }

        RunReport::new(RunOutcome::Completed, follows.len(), unchanged, executor.tally())
    }
}

/// Carries out `action`; returns `false` when nothing was issued.
async fn execute<G: SocialGraph>(
    executor: &mut ActionExecutor<'_, G>,
    profile: &ProfileView,
    action: Action,
) -> bool {
    match action {
        Action::Follow => {
            executor.follow(profile).await;
            true
        }
        Action::Unfollow => {
            executor.unfollow(profile).await;
            true
        }
        Action::Keep => false,
    }
}

fn log_decision(profile: &ProfileView, decision: Decision) {
    tracing::info!(
        event = decision.reason.event_tag(),
        handle = %profile.handle,
        action = ?decision.action,
        "{}",
        decision.reason.describe()
    );
}

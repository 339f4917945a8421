//! Program dispatch: list, run the policy, report.

use std::time::Duration;

use anyhow::Context;
use bskyconnect_client::SocialGraph;
use bskyconnect_core::PolicyConfig;
use bskyconnect_policy::{
    list_followers, list_follows, InfluenceThresholds, PolicyEngine, RunOutcome, RunReport,
};

use crate::{Invocation, Program};

/// Runs the selected program. `me` is the authenticated account that
/// `followers` and `follows` maintain; `connect` draws from the followers of
/// `--account` instead.
///
/// Listing failures abort the run; everything after listing is best-effort
/// and logged per profile.
pub(crate) async fn run_program<G: SocialGraph>(
    graph: &G,
    me: &str,
    action_delay: Duration,
    policy: &PolicyConfig,
    invocation: &Invocation,
) -> anyhow::Result<()> {
    let engine = PolicyEngine::new(graph, action_delay, InfluenceThresholds::from(policy));

    match invocation.program {
        Program::Followers => run_followers(graph, &engine, policy, me).await?,
        Program::Follows => run_follows(graph, &engine, policy, me).await?,
        Program::Both => {
            run_followers(graph, &engine, policy, me).await?;
            run_follows(graph, &engine, policy, me).await?;
        }
        Program::Connect => {
            run_connect(graph, &engine, policy, &invocation.account, invocation.limit).await?;
        }
    }

    tracing::info!(event = "DONE", "finished");
    Ok(())
}

async fn run_followers<G: SocialGraph>(
    graph: &G,
    engine: &PolicyEngine<'_, G>,
    policy: &PolicyConfig,
    me: &str,
) -> anyhow::Result<()> {
    tracing::info!(account = me, "beginning follower management");
    let followers = list_followers(graph, me, policy.page_size)
        .await
        .with_context(|| format!("listing followers of {me}"))?;
    tracing::info!(account = me, count = followers.len(), "followers listed");

    let report = engine
        .manage_followers(&followers, policy.followers_window_days, None)
        .await;
    log_report("follower management", me, &report);
    Ok(())
}

async fn run_follows<G: SocialGraph>(
    graph: &G,
    engine: &PolicyEngine<'_, G>,
    policy: &PolicyConfig,
    me: &str,
) -> anyhow::Result<()> {
    tracing::info!(account = me, "beginning follows management");
    let follows = list_follows(graph, me, policy.page_size)
        .await
        .with_context(|| format!("listing follows of {me}"))?;
    tracing::info!(account = me, count = follows.len(), "follows listed");

    let report = engine
        .manage_follows(&follows, policy.follows_window_days)
        .await;
    log_report("follows management", me, &report);
    Ok(())
}

async fn run_connect<G: SocialGraph>(
    graph: &G,
    engine: &PolicyEngine<'_, G>,
    policy: &PolicyConfig,
    account: &str,
    limit: Option<u32>,
) -> anyhow::Result<()> {
    tracing::info!(account, ?limit, "selecting follows from account's followers");
    let candidates = list_followers(graph, account, policy.page_size)
        .await
        .with_context(|| format!("listing followers of {account}"))?;
    tracing::info!(account, count = candidates.len(), "candidates listed");

    let report = engine
        .manage_followers(&candidates, policy.connect_window_days, limit)
        .await;
    log_report("follower selection", account, &report);
    Ok(())
}

fn log_report(stage: &str, account: &str, report: &RunReport) {
    let limit_reached = report.outcome == RunOutcome::LimitReached;
    tracing::info!(
        account,
        processed = report.processed,
        followed = report.followed,
        unfollowed = report.unfollowed,
        failed = report.failed,
        unchanged = report.unchanged,
        limit_reached,
        "{stage} complete"
    );
}

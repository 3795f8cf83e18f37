use crate::infra::seeded_store;
use clap::Args;
use std::sync::Arc;

use foodbridge::error::AppError;
use foodbridge::matching::{
    AlertId, MatchingService, RankedMatch, ScoringPolicy, SurplusPostId, SystemClock,
};

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Surplus post to rank candidates for (seeded: post-0001, post-0002)
    #[arg(long, default_value = "post-0001")]
    pub(crate) post_id: String,
    /// Number of candidates to return
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip persisting the ranked shortlist as proposed matches
    #[arg(long)]
    pub(crate) skip_persist: bool,
}

fn demo_service() -> (
    Arc<MatchingService<crate::infra::InMemoryMatchStore, SystemClock>>,
    Arc<crate::infra::InMemoryMatchStore>,
) {
    let store = Arc::new(seeded_store());
    let service = Arc::new(MatchingService::new(
        store.clone(),
        Arc::new(SystemClock),
        ScoringPolicy::default(),
    ));
    (service, store)
}

fn render_shortlist(matches: &[RankedMatch]) {
    for (rank, candidate) in matches.iter().enumerate() {
        println!(
            "  {}. {} ({}) — score {}/100, {:.1} km, pickup ~{} min, need {}",
            rank + 1,
            candidate.ngo_name,
            candidate.ngo_id.0,
            candidate.overall_score,
            candidate.distance_km,
            candidate.estimated_pickup_minutes,
            candidate.need_level.label(),
        );
        println!(
            "     distance {} | freshness {} | capacity {} | food type {} | hours {}",
            candidate.scores.distance,
            candidate.scores.freshness,
            candidate.scores.capacity,
            candidate.scores.food_type,
            candidate.scores.time_window,
        );
        println!("     {}", candidate.reasoning);
    }
}

pub(crate) async fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let (service, _) = demo_service();
    let post_id = SurplusPostId(args.post_id);

    let matches = service.find_best_matches(&post_id, args.top_n).await?;
    if matches.is_empty() {
        println!("No eligible NGOs for {}", post_id.0);
        return Ok(());
    }

    println!("Ranked NGO matches for {}", post_id.0);
    render_shortlist(&matches);
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let (service, store) = demo_service();
    let post_id = SurplusPostId("post-0001".to_string());

    println!("FoodBridge matching demo");
    println!("\nRanking NGO candidates for {}", post_id.0);
    let matches = service.find_best_matches(&post_id, None).await?;
    render_shortlist(&matches);

    if !args.skip_persist {
        let ids = service.create_matches(&post_id, &matches).await?;
        println!(
            "\nPersisted {} {} match(es): {}",
            ids.len(),
            foodbridge::matching::MatchStatus::Proposed.label(),
            ids.iter()
                .map(|id| id.0.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Store now holds {} match row(s)", store.match_count());
    }

    println!("\nEmergency broadcast for alert-0001");
    let surplus = service
        .find_emergency_matches(&AlertId("alert-0001".to_string()))
        .await?;
    for entry in &surplus {
        println!(
            "  {} from {} — {:.1} km away, expires {}",
            entry.post.id.0,
            entry.donor_name,
            entry.distance_km,
            entry.post.expiry_at.format("%H:%M UTC"),
        );
    }

    Ok(())
}

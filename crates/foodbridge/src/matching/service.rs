use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, info};

use super::domain::{AlertId, MatchId, MatchStatus, NgoId, SurplusPostId};
use super::repository::{Clock, MatchStore, NearbySurplus, NewMatch, StoreError};
use super::scoring::{factors, MatchScorer, RankedMatch, ScoringPolicy};

/// Number of results returned when the caller does not ask for more.
pub const DEFAULT_TOP_N: usize = 5;

/// Surplus posts returned for one emergency alert.
pub const DEFAULT_EMERGENCY_LIMIT: usize = 10;

/// Service composing the storage seam, clock, and match scorer.
///
/// Each call works on an independent read-only snapshot; concurrent
/// rankings for different posts need no coordination.
pub struct MatchingService<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
    scorer: MatchScorer,
    default_top_n: usize,
    emergency_limit: usize,
}

impl<S, C> MatchingService<S, C>
where
    S: MatchStore + 'static,
    C: Clock + 'static,
{
    pub fn new(store: Arc<S>, clock: Arc<C>, policy: ScoringPolicy) -> Self {
        Self {
            store,
            clock,
            scorer: MatchScorer::new(policy),
            default_top_n: DEFAULT_TOP_N,
            emergency_limit: DEFAULT_EMERGENCY_LIMIT,
        }
    }

    pub fn with_limits(mut self, default_top_n: usize, emergency_limit: usize) -> Self {
        self.default_top_n = default_top_n;
        self.emergency_limit = emergency_limit;
        self
    }

    /// Rank eligible NGOs for a surplus post and return the top slice.
    ///
    /// An empty candidate pool is a valid outcome, not an error. Ties on
    /// the overall display score break by NGO id ascending so the order
    /// never depends on retrieval order.
    pub async fn find_best_matches(
        &self,
        post_id: &SurplusPostId,
        top_n: Option<usize>,
    ) -> Result<Vec<RankedMatch>, MatchingError> {
        let post = self
            .store
            .surplus_post(post_id)
            .await
            .map_err(|err| store_failure("surplus_post", &post_id.0, err))?
            .ok_or_else(|| MatchingError::PostNotFound(post_id.0.clone()))?;

        let ngos = self
            .store
            .eligible_ngos()
            .await
            .map_err(|err| store_failure("eligible_ngos", &post_id.0, err))?;

        let now = self.clock.now();
        let mut matches: Vec<RankedMatch> = ngos
            .iter()
            .filter(|ngo| ngo.verified && ngo.location.is_some() && ngo.available_capacity() > 0)
            .map(|ngo| self.scorer.score(&post, ngo, now))
            .collect();

        matches.sort_by(|a, b| {
            b.overall_score
                .cmp(&a.overall_score)
                .then_with(|| a.ngo_id.cmp(&b.ngo_id))
        });
        matches.truncate(top_n.unwrap_or(self.default_top_n));

        info!(
            post_id = %post_id.0,
            count = matches.len(),
            "ranked NGO matches for surplus post"
        );
        Ok(matches)
    }

    /// Persist already-ranked, externally-accepted candidates as proposed
    /// matches, returning the new ids in input order.
    ///
    /// Candidates are de-duplicated by NGO id first; inserts then run
    /// sequentially with no rollback, so a failure mid-way leaves earlier
    /// rows committed.
    pub async fn create_matches(
        &self,
        post_id: &SurplusPostId,
        matches: &[RankedMatch],
    ) -> Result<Vec<MatchId>, MatchingError> {
        let mut seen: HashSet<NgoId> = HashSet::new();
        let mut match_ids = Vec::with_capacity(matches.len());

        for candidate in matches {
            if !seen.insert(candidate.ngo_id.clone()) {
                continue;
            }

            let fields = NewMatch {
                surplus_post_id: post_id.clone(),
                ngo_id: candidate.ngo_id.clone(),
                distance_km: candidate.distance_km,
                capacity_score: f64::from(candidate.scores.capacity) / 100.0,
                freshness_score: f64::from(candidate.scores.freshness) / 100.0,
                overall_score: f64::from(candidate.overall_score) / 100.0,
                reasoning: candidate.reasoning.clone(),
                status: MatchStatus::Proposed,
            };

            let id = self
                .store
                .insert_match(fields)
                .await
                .map_err(|err| store_failure("insert_match", &post_id.0, err))?;
            match_ids.push(id);
        }

        Ok(match_ids)
    }

    /// Crisis path: nearby active surplus for an emergency alert, best
    /// freshness first, closest first among equals, capped at ten by
    /// default.
    pub async fn find_emergency_matches(
        &self,
        alert_id: &AlertId,
    ) -> Result<Vec<NearbySurplus>, MatchingError> {
        let alert = self
            .store
            .emergency_alert(alert_id)
            .await
            .map_err(|err| store_failure("emergency_alert", &alert_id.0, err))?
            .ok_or_else(|| MatchingError::AlertNotFound(alert_id.0.clone()))?;

        let surplus = self
            .store
            .nearby_active_surplus(alert.center, alert.broadcast_radius_km)
            .await
            .map_err(|err| store_failure("nearby_active_surplus", &alert_id.0, err))?;

        let now = self.clock.now();
        let mut decorated: Vec<(f64, NearbySurplus)> = surplus
            .into_iter()
            .filter(|entry| entry.distance_km <= alert.broadcast_radius_km)
            .map(|entry| {
                let freshness = factors::freshness_score(
                    entry.post.expiry_at,
                    entry.post.safety_window_minutes,
                    now,
                );
                (freshness, entry)
            })
            .collect();

        decorated.sort_by(|(fresh_a, a), (fresh_b, b)| {
            fresh_b
                .total_cmp(fresh_a)
                .then_with(|| a.distance_km.total_cmp(&b.distance_km))
        });

        let results: Vec<NearbySurplus> = decorated
            .into_iter()
            .take(self.emergency_limit)
            .map(|(_, entry)| entry)
            .collect();

        info!(
            alert_id = %alert_id.0,
            count = results.len(),
            "found surplus posts for emergency alert"
        );
        Ok(results)
    }
}

fn store_failure(operation: &'static str, id: &str, err: StoreError) -> MatchingError {
    error!(%operation, %id, error = %err, "storage operation failed");
    MatchingError::Store(err)
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    #[error("surplus post {0} not found")]
    PostNotFound(String),
    #[error("emergency alert {0} not found")]
    AlertNotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

//! Alternative route search.
//!
//! Alternatives are found by knocking out one edge of the primary route at a
//! time and searching again. Each attempt runs on its own copy of the graph,
//! so nothing carries over between attempts or back to the caller.

use tracing::{debug, trace};

use super::search::{PathFinder, RouteError};
use crate::disruption::Overlay;
use crate::domain::{Criterion, Route};
use crate::network::{Graph, Network};

/// Parameters for an alternatives search.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AlternativesRequest<'a> {
    pub start: &'a str,
    pub end: &'a str,
    pub criterion: Criterion,
    /// Maximum number of routes returned, primary included.
    pub max_routes: usize,
    /// See [`super::RouterConfig::diversity_threshold`].
    pub threshold: f64,
}

/// Find the primary route plus up to `max_routes - 1` alternatives.
///
/// The primary route always comes first, and its failure is returned as an
/// error. Then, for each of the first `max_routes - 1` steps of the primary
/// route, that connection is removed (both directions, all lines) and the
/// search rerun. An alternative is kept if one is found and it is different
/// enough from the primary route; attempts that find nothing are skipped.
///
/// Alternatives are compared only against the primary route, so two attempts
/// can yield the same alternative.
pub(crate) fn alternative_routes(
    network: &Network,
    overlay: &Overlay,
    graph: &Graph,
    request: &AlternativesRequest<'_>,
) -> Result<Vec<Route>, RouteError> {
    let primary =
        PathFinder::new(network, overlay, graph).shortest_path(request.start, request.end, request.criterion)?;

    let attempts = request.max_routes.saturating_sub(1).min(primary.steps.len());
    let mut routes = Vec::with_capacity(attempts + 1);

    for step in primary.steps.iter().take(attempts) {
        let (Some(from), Some(to)) = (
            network.index_of(step.from.as_str()),
            network.index_of(step.to.as_str()),
        ) else {
            continue;
        };

        let mut trial = graph.clone();
        trial.remove_connection(from, to);

        match try_alternative(network, overlay, &trial, request) {
            Some(route) if route.is_different_from(&primary, request.threshold) => {
                trace!(
                    removed_from = %step.from,
                    removed_to = %step.to,
                    similarity = route.similarity(&primary),
                    "alternative accepted"
                );
                routes.push(route);
            }
            Some(route) => {
                trace!(
                    removed_from = %step.from,
                    removed_to = %step.to,
                    similarity = route.similarity(&primary),
                    "alternative too similar"
                );
            }
            None => {
                trace!(
                    removed_from = %step.from,
                    removed_to = %step.to,
                    "no alternative without this connection"
                );
            }
        }
    }

    debug!(
        from = request.start,
        to = request.end,
        alternatives = routes.len(),
        attempts,
        "alternative search complete"
    );

    routes.insert(0, primary);
    Ok(routes)
}

/// One best-effort attempt; a failed search is not an error here.
fn try_alternative(
    network: &Network,
    overlay: &Overlay,
    graph: &Graph,
    request: &AlternativesRequest<'_>,
) -> Option<Route> {
    PathFinder::new(network, overlay, graph)
        .shortest_path(request.start, request.end, request.criterion)
        .ok()
}

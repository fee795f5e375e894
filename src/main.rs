use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use hubspoke::models::AnchorSet;
use hubspoke::{GeminiRankingClient, HubSpokeConfig, Planner, SceneRenderer, SearchOutcome};
use tokio::runtime::Handle;

#[tokio::main]
async fn main() -> Result<()> {
    let config = HubSpokeConfig::load().context("Failed to load configuration")?;
    hubspoke::logging::init(&config.logging)?;

    let anchors = AnchorSet::nanjing();
    let client = GeminiRankingClient::new(&config.ranking, anchors.clone())?;
    let mut planner = Planner::new(Arc::new(client), anchors.clone());

    match planner.search().await {
        SearchOutcome::Applied { count } => tracing::info!("Found {count} candidate hubs"),
        SearchOutcome::Failed { message } => bail!(message),
        SearchOutcome::Stale => bail!("Search was superseded"),
    }

    for card in planner.cards() {
        tracing::info!(
            "#{} {} ({}) - {} min total",
            card.rank,
            card.name,
            card.address,
            card.total_duration_min
        );
        for row in &card.cost_rows {
            tracing::info!(
                "    {}: {} min round trip, {} km",
                row.label,
                row.duration_min,
                row.distance_km
            );
        }
    }

    if let Some(hub) = planner.hub_summary() {
        tracing::info!(
            "Selected hub {}: {} min, {} km",
            hub.name,
            hub.total_duration_min,
            hub.total_distance_km
        );
    }

    let mut renderer = SceneRenderer::new(anchors, &config.map, Handle::current());
    renderer.render(planner.results(), planner.selected_id());

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(renderer.to_svg().as_bytes())
        .context("Failed to write map")?;
    Ok(())
}

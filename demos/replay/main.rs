//! Sprouts replay — plays a scripted turn against a two-sprout board and
//! logs every transition.
//!
//! Usage:
//! ```text
//! cargo run --example replay
//! RUST_LOG=sprouts=trace cargo run --example replay
//! ```

use sprouts::config::RuleConfig;
use sprouts::math::Point2;
use sprouts::session::{Game, Phase};
use sprouts::topology::EdgeColor;

/// One scripted stroke from the left seed sprout, over the cobweb, back
/// down through it and into the right seed sprout.
const STROKE: [(f64, f64); 9] = [
    (140.0, 200.0),
    (150.0, 230.0),
    (200.0, 245.0),
    (230.0, 230.0),
    (230.0, 170.0),
    (245.0, 150.0),
    (262.0, 160.0),
    (268.0, 180.0),
    (261.0, 197.0),
];

/// Requested middle sprout position, close to a stroke sample.
const MIDDLE: (f64, f64) = (198.0, 243.0);

fn phase_name(phase: &Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Drawing { .. } => "drawing",
        Phase::Placing { .. } => "placing",
    }
}

fn main() -> sprouts::Result<()> {
    // Default: WARN for everything, INFO for the replay and the engine.
    // Override with RUST_LOG env var (e.g. RUST_LOG=sprouts=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("replay=info".parse().unwrap_or_default())
        .add_directive("sprouts=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut game = Game::new(2, RuleConfig::default())?;
    tracing::info!(
        vertices = game.state().vertex_count(),
        edges = game.state().edge_count(),
        "seed ready"
    );

    let (x, y) = STROKE[0];
    game = game.touch_down(Point2::new(x, y))?;
    tracing::info!(phase = phase_name(game.phase()), "touch down");
    for &(x, y) in &STROKE[1..] {
        game = game.touch_dragged(Point2::new(x, y));
        let eligible = game.eligible_destinations()?.len();
        tracing::info!(x, y, eligible, "dragged");
    }
    game = game.touch_up()?;
    tracing::info!(phase = phase_name(game.phase()), "touch up");

    game = game.touch_down(Point2::new(MIDDLE.0, MIDDLE.1))?;
    tracing::info!(phase = phase_name(game.phase()), "middle sprout requested");

    let state = game.state();
    let cobweb = state.edges().filter(|e| e.color() == EdgeColor::Cobweb).count();
    tracing::info!(
        vertices = state.vertex_count(),
        edges = state.edge_count(),
        cobweb,
        over = game.is_over()?,
        "turn finished"
    );
    for view in game.vertex_views() {
        tracing::info!(vertex = ?view.vertex, alive = view.alive, "vertex");
    }
    Ok(())
}

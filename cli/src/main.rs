use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use islet_cli::TerminalHost;
use islet_cli::logging;
use islet_core::{AppConfigExt, IndicatorController};
use islet_types::{AppConfig, accent};

#[derive(Parser)]
#[command(version, about = "Dynamic-island style progress indicator demo")]
struct Cli {
    /// Title shown in the completion alert
    #[arg(long)]
    title: Option<String>,
    /// Icon identifier for the in-progress phase
    #[arg(long)]
    progress_glyph: Option<String>,
    /// Icon identifier for the completion alert
    #[arg(long)]
    completion_glyph: Option<String>,
    /// Accent color key: brand, blue, green, orange, red, white
    #[arg(long)]
    tint: Option<String>,
    /// Rotate the progress glyph with progress
    #[arg(long)]
    rotate: bool,
    /// Milliseconds between simulated progress ticks
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Percentage points added per tick
    #[arg(long)]
    step: Option<f64>,
    /// Persist the effective settings back to the config file
    #[arg(long)]
    save: bool,
    /// Debug logging for islet crates
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = AppConfig::load();
    if let Some(title) = cli.title {
        config.indicator.title = title;
    }
    if let Some(glyph) = cli.progress_glyph {
        config.indicator.progress_glyph = glyph;
    }
    if let Some(glyph) = cli.completion_glyph {
        config.indicator.completion_glyph = glyph;
    }
    if let Some(key) = cli.tint {
        config.indicator.tint = accent::for_key(&key);
    }
    if cli.rotate {
        config.indicator.rotation_enabled = true;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_ms = tick_ms;
    }
    if let Some(step) = cli.step {
        config.step_percent = step;
    }
    if cli.save {
        config.clone().save();
    }

    let host = Arc::new(TerminalHost::new());
    let controller = IndicatorController::new(host.clone());
    controller.attach(config.indicator.clone());

    // Flips to false when the indicator dismisses itself
    let mut presented = controller.subscribe_presented();

    let mut percent: f64 = 0.0;
    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_ms.max(1)));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if controller.is_presented() {
                    percent += config.step_percent;
                    controller.update_progress(percent / 100.0);
                }
                host.repaint();
            }
            changed = presented.changed() => {
                if changed.is_err() || !*presented.borrow_and_update() {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("interrupted, removing indicator");
                controller.remove();
                break;
            }
        }
    }

    host.repaint();
    host.finish();
}

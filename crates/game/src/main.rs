//! Recoil sandbox: a headless firing range for tuning weapon recoil.
//!
//! Usage: `recoil-sandbox [config.ron]` or `recoil-sandbox --write-config`.

mod config;
mod player;
mod range;
mod script;
mod session;

use anyhow::{Context, Result};
use config::GameConfig;
use session::Session;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arg = std::env::args().nth(1);
    let config = match arg.as_deref() {
        Some("--write-config") => {
            let config = GameConfig::default();
            config.save();
            log::info!("Wrote default config to {:?}", config::config_path());
            return Ok(());
        }
        Some(path) => GameConfig::load_from(&PathBuf::from(path)),
        None => GameConfig::load(),
    };

    let mut session = Session::new(&config).context("failed to set up the range")?;
    let summary = session.run();

    log::info!(
        "Session over after {} ticks: {} shots, {} on target, ammo {} / {}",
        summary.ticks,
        summary.shots,
        summary.target_hits,
        summary.magazine,
        summary.reserve
    );
    for (name, hits) in &summary.tally {
        log::info!("  {}: {} hits", name, hits);
    }
    log::info!(
        "Recoil: {} recoveries, {} interrupted, phase {:?}",
        summary.recoveries,
        summary.interruptions,
        summary.recoil_phase
    );
    log::debug!("Cues: {} sounds, {} animations", summary.sounds, summary.animations);
    match summary.aim_error {
        Some(error) => log::info!(
            "Final aim {:?}, {:.3} deg from last baseline",
            summary.final_rotation,
            error
        ),
        None => log::info!("Final aim {:?}, never fired", summary.final_rotation),
    }
    Ok(())
}

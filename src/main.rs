//! Tactica - headless driver
//!
//! Loads the configuration and level, then plays a scripted input session
//! through the fixed-tick simulation and logs what the renderer would see.
//!
//! Usage: `tactica [config.json] [level.json]`

use anyhow::Context;
use tactica_game::{FrameOutput, GameConfig, InputCollector, Level, Simulation, WeaponKind};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// One step of the scripted session.
enum Step {
    Press(&'static str),
    Release(&'static str),
    Wheel(f32),
    Look(f32, f32),
    Damage(i32),
    Buy(WeaponKind),
    Run(u32),
}

const SESSION: &[(&str, &[Step])] = &[
    ("settle", &[Step::Run(30)]),
    ("walk forward", &[Step::Press("w"), Step::Run(60)]),
    ("strafe right", &[Step::Release("w"), Step::Press("d"), Step::Run(40)]),
    ("counter-strafe", &[Step::Release("d"), Step::Press("a"), Step::Run(20)]),
    ("turn and run", &[Step::Release("a"), Step::Look(-400.0, 50.0), Step::Press("w"), Step::Press("Shift"), Step::Run(60)]),
    ("crouch walk", &[Step::Release("Shift"), Step::Press("c"), Step::Run(45)]),
    ("stand and jump", &[Step::Release("c"), Step::Press(" "), Step::Run(2), Step::Release(" "), Step::Run(50)]),
    ("buy and draw primary", &[Step::Buy(WeaponKind::Vandal), Step::Press("1"), Step::Run(1), Step::Release("1"), Step::Run(70)]),
    ("switch to knife", &[Step::Press("3"), Step::Run(1), Step::Release("3"), Step::Run(40)]),
    ("wheel back", &[Step::Wheel(-1.0), Step::Run(60)]),
    ("take fire", &[Step::Damage(40), Step::Run(40)]),
    ("stop", &[Step::Release("w"), Step::Run(40)]),
];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("tactica=info".parse()?))
        .init();

    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => GameConfig::load(&path).with_context(|| format!("loading config {path}"))?,
        None => GameConfig::default(),
    };
    config.validate().context("validating config")?;

    let level = match args.next() {
        Some(path) => Level::load_json(&path).with_context(|| format!("loading level {path}"))?,
        None => Level::training_arena(),
    };

    tracing::info!(
        "Starting Tactica: level {:?}, {} colliders, {} Hz",
        level.name,
        level.collision.collider_count(),
        config.tick_rate
    );

    let mut input = InputCollector::new(config.bindings.clone());
    let mut sim = Simulation::new(config, level);

    for (name, steps) in SESSION {
        let mut last = None;
        for step in steps.iter() {
            match *step {
                Step::Press(key) => input.key_down(key),
                Step::Release(key) => input.key_up(key),
                Step::Wheel(delta) => input.wheel(delta),
                Step::Look(dx, dy) => sim.on_pointer_move(dx, dy),
                Step::Damage(amount) => {
                    let dealt = sim.apply_damage(amount);
                    tracing::info!("hit for {amount}, {dealt} to health ({} left)", sim.player.health);
                }
                Step::Buy(weapon) => {
                    sim.loadout.set_primary(Some(weapon));
                    tracing::info!("bought {weapon:?}");
                }
                Step::Run(ticks) => {
                    for _ in 0..ticks {
                        let output = sim.tick(&input.snapshot());
                        log_events(&output);
                        if output.weapon_switched.is_some() {
                            let stats = sim.loadout.current_stats();
                            tracing::info!(
                                "in hand: {} damage, {:?}ms between shots, magazine {:?}",
                                stats.damage,
                                stats.fire_interval_ms,
                                stats.ammo.map(|ammo| ammo.magazine)
                            );
                        }
                        last = Some(output);
                    }
                }
            }
        }

        if let Some(output) = last {
            tracing::info!(
                "[{name}] t={}ms eye=({:.2}, {:.2}, {:.2}) yaw={:.2} pitch={:.2} speed={:.2} {:?} grounded={} weapon={:?}",
                output.now_ms,
                output.view.position.x,
                output.view.position.y,
                output.view.position.z,
                output.view.yaw,
                output.view.pitch,
                sim.player.movement.horizontal_speed(),
                output.stance,
                output.grounded,
                output.weapon,
            );
        }
    }

    let summary = serde_json::to_string(&sim.player.movement).context("serializing final state")?;
    tracing::info!("final state: {summary}");

    Ok(())
}

fn log_events(output: &FrameOutput) {
    let events = &output.events;
    if events.jumped {
        tracing::info!("frame {}: jumped", output.frame);
    }
    if events.landed {
        tracing::info!("frame {}: landed", output.frame);
    }
    if events.stand_refused {
        tracing::debug!("frame {}: no room to stand", output.frame);
    }
    if events.tag_expired {
        tracing::info!("frame {}: tag expired", output.frame);
    }
    if let Some(weapon) = output.weapon_switched {
        tracing::info!("frame {}: {weapon:?} ready", output.frame);
    }
}

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use dicetray::dice3d::{
    apply_camera_rig, apply_shake, apply_throw, configure_gravity, handle_dice_count_keys,
    handle_throw_keys, handle_view_keys, log_completed_throw, orbit_camera_with_mouse,
    reset_camera_view, reset_results_on_throw, resolve_face, respawn_dice_on_count_change,
    rotate_camera, setup, sync_throw_button, track_rolls, update_results_display,
    zoom_camera_with_wheel, AppSettings, CameraRig, DiceConfig, DiceResults, RollTrace,
    ShakeMotion, ThrowInput,
};

/// Dice Tray - shake and throw dice into a 3D tray
#[derive(Parser)]
#[command(name = "dicetray")]
#[command(author, version, about = "Dice Tray - shake and throw dice into a 3D tray")]
struct Cli {
    /// Run in CLI mode (no GUI)
    #[arg(long)]
    cli: bool,

    /// Number of dice to start the 3D tray with (1-6); overrides the saved setting.
    /// Not accepted together with a subcommand.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=6))]
    dice: Option<u8>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the face that is up for an orientation quaternion
    #[command(allow_negative_numbers = true)]
    Face { x: f32, y: f32, z: f32, w: f32 },

    /// Replay a recorded JSON trace of dice samples and print the results
    Replay {
        /// Path to the trace file
        trace: PathBuf,

        /// Print completions as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = check_args(&cli) {
        e.exit();
    }

    match cli.command {
        Some(command) => {
            if let Err(e) = run_cli_mode(command) {
                eprintln!("{}", e.red());
                std::process::exit(1);
            }
        }
        None if cli.cli => {
            eprintln!("CLI mode requires a subcommand");
            eprintln!("Examples:");
            eprintln!("  dicetray --cli face 0 0 0 1");
            eprintln!("  dicetray --cli replay roll.json");
            std::process::exit(1);
        }
        None => run_3d_mode(cli.dice.map(usize::from)),
    }
}

/// Reject flag combinations clap cannot express on its own
fn check_args(cli: &Cli) -> Result<(), clap::Error> {
    if cli.dice.is_some() && cli.command.is_some() {
        return Err(Cli::command().error(
            ErrorKind::ArgumentConflict,
            "--dice only applies to the 3D tray and cannot be used with a subcommand",
        ));
    }
    Ok(())
}

// ============================================================================
// CLI Mode
// ============================================================================

fn run_cli_mode(command: Commands) -> Result<(), String> {
    match command {
        Commands::Face { x, y, z, w } => {
            let q = Quat::from_xyzw(x, y, z, w);
            if !q.is_finite() || q.length_squared() == 0.0 {
                return Err(format!("Invalid quaternion: ({x}, {y}, {z}, {w})"));
            }
            let value = resolve_face(q.normalize());
            println!("{} {}", "Face up:".bold(), value.to_string().yellow().bold());
            Ok(())
        }
        Commands::Replay { trace, json } => {
            let trace = RollTrace::load(&trace)?;
            let outcome = trace.replay();

            if json {
                let out = serde_json::to_string_pretty(&outcome.completions)
                    .map_err(|e| format!("Failed to serialize completions: {}", e))?;
                println!("{out}");
                return Ok(());
            }

            println!(
                "{} {} dice, {} frames",
                "Replaying".cyan().bold(),
                trace.dice,
                trace.frames.len()
            );
            for completion in &outcome.completions {
                println!(
                    "  frame {:>5}  die {}  ->  {}",
                    completion.frame,
                    completion.die + 1,
                    completion.value.to_string().yellow().bold()
                );
            }

            let values: Vec<String> = outcome
                .results
                .results
                .iter()
                .map(|r| r.map_or_else(|| "-".to_string(), |v| v.to_string()))
                .collect();
            println!("\n{} [ {} ]", "Dice:".bold(), values.join(" | "));

            let total = outcome.results.total().to_string();
            if outcome.results.all_settled() {
                println!("{} {}", "TOTAL:".green().bold(), total.green().bold());
            } else {
                println!(
                    "{} {} {}",
                    "TOTAL:".yellow().bold(),
                    total,
                    "(some dice still rolling)".dimmed()
                );
            }
            Ok(())
        }
    }
}

// ============================================================================
// 3D Mode
// ============================================================================

fn run_3d_mode(dice_override: Option<usize>) {
    let settings = AppSettings::load();
    let dice_config = match dice_override {
        Some(count) => DiceConfig::new(count),
        None => settings.dice_config(),
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Dice Tray".to_string(),
                resolution: (1280u32, 720u32).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .insert_resource(DiceResults::with_slots(dice_config.dice_count))
        .insert_resource(dice_config)
        .insert_resource(ThrowInput::default())
        .insert_resource(ShakeMotion::default())
        .insert_resource(CameraRig::default())
        .add_systems(Startup, setup)
        .add_systems(PostStartup, configure_gravity)
        .add_systems(
            Update,
            (
                handle_throw_keys,
                handle_dice_count_keys,
                handle_view_keys,
                respawn_dice_on_count_change,
                reset_results_on_throw,
                apply_throw,
                apply_shake,
                track_rolls,
                log_completed_throw,
                update_results_display,
                sync_throw_button,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                rotate_camera,
                orbit_camera_with_mouse,
                zoom_camera_with_wheel,
                reset_camera_view,
                apply_camera_rig,
            )
                .chain(),
        )
        .run();
}

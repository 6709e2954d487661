//! Preset management commands.
//!
//! Without a subcommand, lists factory and user presets.

use clap::{Args, Subcommand};
use plucked_config::{
    TonePreset, ensure_user_presets_dir, factory_preset_names, get_factory_preset,
    list_user_presets, preset_name_from_path, settings_file, user_presets_dir,
};

use super::common::load_preset;

#[derive(Args)]
pub struct PresetsArgs {
    /// Show only factory presets
    #[arg(long, conflicts_with = "user")]
    factory: bool,

    /// Show only user presets
    #[arg(long)]
    user: bool,

    #[command(subcommand)]
    command: Option<PresetsCommand>,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// Print a preset as TOML
    Show {
        /// Preset name or path
        name: String,
    },

    /// Copy a factory preset to user presets for customization
    Copy {
        /// Factory preset name
        source: String,

        /// New preset name (defaults to the source name)
        #[arg(short, long)]
        name: Option<String>,

        /// Overwrite an existing user preset
        #[arg(long)]
        force: bool,
    },

    /// Show preset and settings locations
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        None => list_presets(args.factory, args.user),
        Some(PresetsCommand::Show { name }) => show_preset(&name),
        Some(PresetsCommand::Copy {
            source,
            name,
            force,
        }) => copy_preset(&source, name.as_deref(), force),
        Some(PresetsCommand::Paths) => show_paths(),
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    let show_factory = !user_only;
    let show_user = !factory_only;

    if show_factory {
        println!("Factory Presets:");
        println!("================");
        for id in factory_preset_names() {
            if let Some(preset) = get_factory_preset(id) {
                let desc = preset.description.as_deref().unwrap_or("");
                println!("  {:12} {:12} - {}", id, preset.name, desc);
            }
        }
        println!();
    }

    if show_user {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Copy a factory preset with: plucked presets copy <name>");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
                match TonePreset::load(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {:12} {:12} - {}", name, preset.name, desc);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping preset");
                        println!("  {:12} (error loading)", name);
                    }
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;
    preset.validate()?;
    print!("{}", preset.to_toml()?);
    Ok(())
}

fn copy_preset(source: &str, new_name: Option<&str>, force: bool) -> anyhow::Result<()> {
    let preset = get_factory_preset(source)
        .ok_or_else(|| anyhow::anyhow!("Factory preset '{}' not found.", source))?;

    let target_name = new_name.unwrap_or(source);
    let dir = ensure_user_presets_dir()?;
    let preset_path = dir.join(format!("{}.toml", target_name));

    if preset_path.exists() && !force {
        anyhow::bail!(
            "Preset '{}' already exists in user presets. Use --force to overwrite.",
            target_name
        );
    }

    let mut copy = preset.clone();
    copy.name = target_name.to_string();
    if let Some(desc) = &preset.description {
        copy.description = Some(format!("{} (copy)", desc));
    }
    copy.save(&preset_path)?;

    println!(
        "Copied factory preset '{}' to user preset '{}'",
        source, target_name
    );
    println!("Path: {}", preset_path.display());

    Ok(())
}

fn show_paths() -> anyhow::Result<()> {
    println!("User presets: {}", user_presets_dir().display());
    println!("Settings:     {}", settings_file().display());
    Ok(())
}

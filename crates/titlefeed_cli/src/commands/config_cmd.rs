//! The `check-config` command: resolve and print the effective
//! configuration for a layer set without processing any records.

use std::path::PathBuf;

use clap::Args;
use config_manager::{load_layer, load_schedule_override, ConfigLayer, HierarchyResolver, LayerLevel};

use crate::errors::Error;

#[cfg(test)]
#[path = "config_cmd_tests.rs"]
mod tests;

/// Arguments for the `check-config` command.
#[derive(Args, Debug)]
pub struct CheckConfigArgs {
    /// Directory holding the layered configuration documents
    #[arg(long)]
    pub layers: PathBuf,

    /// Optional schedule override document to apply on top
    #[arg(long)]
    pub schedule: Option<PathBuf>,
}

/// Resolve the layer stack and print every key with its winning source.
pub fn execute(args: &CheckConfigArgs) -> Result<(), Error> {
    let layer_files: &[(&str, LayerLevel)] = &[
        ("default.json", LayerLevel::Default),
        ("publisher.json", LayerLevel::Publisher),
        ("imprint.json", LayerLevel::Imprint),
        ("tranche.json", LayerLevel::Tranche),
    ];

    let mut layers: Vec<ConfigLayer> = Vec::new();
    for (file_name, level) in layer_files {
        let path = args.layers.join(file_name);
        if path.exists() {
            layers.push(load_layer(&path, *level)?);
        }
    }

    let schedule = match &args.schedule {
        Some(path) => Some(load_schedule_override(path)?),
        None => None,
    };

    let effective = HierarchyResolver::new().resolve(&layers, schedule.as_ref())?;

    if effective.is_empty() {
        println!("Effective configuration is empty");
        return Ok(());
    }

    println!("{:<32} {:<40} Source", "Key", "Value");
    for (key, value, source) in effective.entries() {
        let shown = if value.is_empty() { "(empty)" } else { value };
        println!("{:<32} {:<40} {}", key, shown, source);
    }

    Ok(())
}

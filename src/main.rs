//! Atelier - configurator session over stdin/stdout

use std::path::{Path, PathBuf};
use std::sync::Arc;

use atelier::assets::{AssetCache, FileAssetSource};
use atelier::catalog::{Catalog, ModelId};
use atelier::core::{logging, ConfiguratorConfig, Result};
use atelier::session::ConfiguratorSession;
use atelier_bridge::{serve_lines, ChannelBridge};

struct Args {
    config: Option<PathBuf>,
    assets: Option<PathBuf>,
    model: Option<ModelId>,
    preload: bool,
}

fn print_help() {
    eprintln!("Usage: atelier [OPTIONS]");
    eprintln!();
    eprintln!("Reads one JSON command per line on stdin and answers on stdout.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <PATH>   Configuration file (JSON)");
    eprintln!("  -a, --assets <DIR>    Asset root directory");
    eprintln!("  -m, --model <ID>      Initial model (sofa, coffeeTable, diningChair, bookshelf)");
    eprintln!("      --no-preload      Skip loading catalog assets at startup");
    eprintln!("  -h, --help            Show this help");
}

fn parse_args() -> std::result::Result<Args, String> {
    let mut args = std::env::args().skip(1);

    let mut config = None;
    let mut assets = None;
    let mut model = None;
    let mut preload = true;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                config = Some(PathBuf::from(args.next().ok_or("--config needs a path")?));
            }
            "-a" | "--assets" => {
                assets = Some(PathBuf::from(args.next().ok_or("--assets needs a directory")?));
            }
            "-m" | "--model" => {
                let id = args.next().ok_or("--model needs an id")?;
                model = Some(id.parse::<ModelId>().map_err(|e| e.to_string())?);
            }
            "--no-preload" => {
                preload = false;
            }
            "-h" | "--help" | "help" => {
                return Err("show_help".to_string());
            }
            other => {
                log::warn!("Ignoring unknown argument: {}", other);
            }
        }
    }

    Ok(Args {
        config,
        assets,
        model,
        preload,
    })
}

/// Configuration from the file (if any) with command-line overrides applied.
/// Relative paths in the file are resolved against its directory.
fn load_config(args: &Args) -> Result<(ConfiguratorConfig, PathBuf)> {
    let (mut config, base_dir) = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {}", path.display());
            let config = ConfiguratorConfig::load_sync(path)?;
            let base_dir = path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            (config, base_dir)
        }
        None => (ConfiguratorConfig::default(), PathBuf::from(".")),
    };

    if config.asset_root.is_relative() {
        config.asset_root = base_dir.join(&config.asset_root);
    }
    if let Some(assets) = &args.assets {
        config.asset_root = assets.clone();
    }
    if let Some(model) = args.model {
        config.initial_model = model;
    }
    if !args.preload {
        config.preload_models = false;
        config.preload_textures = false;
    }

    Ok((config, base_dir))
}

/// Warm the cache with the catalog's assets. Failures are logged, not fatal.
async fn preload(cache: &AssetCache<FileAssetSource>, catalog: &Catalog, config: &ConfiguratorConfig) {
    if config.preload_models {
        match cache.preload_models(catalog.model_paths()).await {
            Ok(models) => {
                for (id, model) in &models {
                    log::debug!("  {}: {} meshes, {} nodes", id, model.mesh_count(), model.node_count());
                }
                log::info!("Preloaded {} models", models.len());
            }
            Err(e) => log::warn!("Model preload failed: {}", e),
        }
    }

    if config.preload_textures {
        match cache.preload_textures(catalog.texture_paths()).await {
            Ok(textures) => log::info!("Preloaded {} textures", textures.len()),
            Err(e) => log::warn!("Texture preload failed: {}", e),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) if e == "show_help" => {
            print_help();
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_help();
            std::process::exit(2);
        }
    };

    let (config, base_dir) = load_config(&args)?;
    let catalog = Arc::new(config.resolve_catalog(&base_dir)?);
    log::info!(
        "Catalog: {} models, {} materials",
        catalog.models.len(),
        catalog.materials.len()
    );

    let cache = AssetCache::new(FileAssetSource::new(config.asset_root.clone()));
    log::info!("Asset root: {}", config.asset_root.display());
    preload(&cache, &catalog, &config).await;

    let (bridge, host_rx) = ChannelBridge::new();
    let mut session = ConfiguratorSession::new(catalog, config.initial_model, bridge);
    log::info!("Session started on {}", config.initial_model);

    serve_lines(tokio::io::stdin(), tokio::io::stdout(), &mut session, Some(host_rx)).await?;

    log::info!("Input closed, shutting down");
    Ok(())
}

use super::Host;
use super::config::{CONFIG_FILE_NAME, Config};
use crate::Result;
use crate::menus::load_menus;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `visibility.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Also check that this menu file loads with the configuration
    #[arg(long, value_name = "PATH")]
    pub menus: Option<Utf8PathBuf>,
}

/// What a successful validation loaded.
#[derive(Debug)]
struct Validated {
    config_file: Option<Utf8PathBuf>,
    item_count: Option<usize>,
}

/// Loads the configuration, and optionally a menu file, reporting the first problem
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded, parsed, or validated, or if the menu file cannot be loaded
fn validate_config_inner(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>, menus_path: Option<&Utf8Path>) -> Result<Validated> {
    let config = Config::load(base_dir, config_path)?;

    // the file `Config::load` picked up, if any
    let config_file = config_path.cloned().or_else(|| {
        let discovered = base_dir.join(CONFIG_FILE_NAME);
        discovered.is_file().then_some(discovered)
    });

    let item_count = menus_path
        .map(|path| load_menus(path, &config.default_visibility).map(|menus| menus.iter().map(|m| m.items.len()).sum::<usize>()))
        .transpose()?;

    Ok(Validated { config_file, item_count })
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    validate_config_in(host, args, Utf8Path::new("."))
}

fn validate_config_in<H: Host>(host: &mut H, args: &ValidateArgs, base_dir: &Utf8Path) -> Result<()> {
    match validate_config_inner(base_dir, args.config.as_ref(), args.menus.as_deref()) {
        Ok(validated) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = &validated.config_file {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file found)");
            }

            if let (Some(path), Some(count)) = (&args.menus, validated.item_count) {
                let _ = writeln!(host.output(), "Menu file {path} loaded with {count} item(s)");
            }

            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

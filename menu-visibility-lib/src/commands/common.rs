//! Common processing logic shared between the filter, explain, and stats commands.

use super::Host;
use super::config::Config;
use crate::Result;
use crate::menus::load_menus;
use crate::reports::{Report, generate_console, generate_json};
use crate::resolvers::{FixedCountry, IpGeolocationClient, RequestContext};
use crate::visibility::{AuthState, ContextSnapshot, DeviceKind, FeatureFlags, Menu, PageKind, Role};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use core::net::IpAddr;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "commands";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Facts about the simulated request
#[derive(Args, Debug, Clone)]
pub struct ContextArgs {
    /// Treat the visitor as logged in
    #[arg(long, help_heading = "Request Context")]
    pub logged_in: bool,

    /// Role held by the visitor, repeatable or comma-separated (implies --logged-in)
    #[arg(long = "role", value_name = "ROLE", value_delimiter = ',', help_heading = "Request Context")]
    pub roles: Vec<Role>,

    /// Kind of page being rendered [possible values: front-page, single-post, shop, product, other]
    #[arg(long, value_name = "KIND", default_value = "other", help_heading = "Request Context")]
    pub page: PageKind,

    /// Device class of the visitor [possible values: mobile, desktop]
    #[arg(long, value_name = "KIND", conflicts_with = "user_agent", help_heading = "Request Context")]
    pub device: Option<DeviceKind>,

    /// Derive the device class from this User-Agent header
    #[arg(long, value_name = "UA", help_heading = "Request Context")]
    pub user_agent: Option<String>,

    /// Current content language
    #[arg(long, value_name = "CODE", help_heading = "Request Context")]
    pub language: Option<String>,

    /// Visitor country as an ISO 3166 alpha-2 code
    #[arg(long, value_name = "CODE", conflicts_with = "ip", help_heading = "Request Context")]
    pub country: Option<String>,

    /// Visitor IP address, geolocated with the configured service
    #[arg(long, value_name = "ADDR", help_heading = "Request Context")]
    pub ip: Option<IpAddr>,
}

impl ContextArgs {
    fn request(&self) -> RequestContext {
        let auth = if self.logged_in || !self.roles.is_empty() {
            AuthState::logged_in(self.roles.iter().cloned())
        } else {
            AuthState::anonymous()
        };

        let request = RequestContext {
            auth,
            page_kind: self.page,
            device_kind: self.device.unwrap_or_default(),
            language: self.language.clone(),
        };

        match &self.user_agent {
            Some(user_agent) => request.with_user_agent(user_agent),
            None => request,
        }
    }

    /// Resolve the snapshot for one pass, geolocating `--ip` only when some item needs it.
    async fn resolve(&self, config: &Config, flags: &FeatureFlags, wants_country: bool) -> Result<ContextSnapshot> {
        let request = self.request();
        let api_key = config.geolocation.api_key();

        let ctx = if let Some(ip) = self.ip {
            let client = IpGeolocationClient::new(&config.geolocation.base_url, config.geolocation.timeout)?.with_visitor_ip(ip);
            ContextSnapshot::resolve(&request, &client, flags, api_key, wants_country).await
        } else {
            let country = FixedCountry(self.country.clone());
            ContextSnapshot::resolve(&request, &country, flags, api_key, wants_country).await
        };

        Ok(ctx)
    }
}

/// Common arguments shared between the filter, explain, and stats commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Menu file to evaluate (TOML or JSON)
    #[arg(value_name = "MENUS")]
    pub menus: Utf8PathBuf,

    /// Path to configuration file (default is `visibility.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,

    /// Output the result to a JSON file instead of to the terminal
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub context: ContextArgs,
}

/// Everything needed for one evaluation pass over a menu file.
#[derive(Debug)]
pub struct Session {
    pub menus: Vec<Menu>,
    pub flags: FeatureFlags,
    pub context: ContextSnapshot,
    color: ColorMode,
    json: Option<Utf8PathBuf>,
}

impl Session {
    /// Load configuration and menus, then resolve the request context
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the menu file cannot be loaded
    pub async fn new(args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
        let menus = load_menus(&args.menus, &config.default_visibility)?;
        let flags = config.feature_flags();

        let wants_country = menus.iter().any(Menu::restricts_country);
        let context = args.context.resolve(&config, &flags, wants_country).await?;
        log::debug!(target: LOG_TARGET, "Evaluating with {flags:?} against {context:?}");

        Ok(Self {
            menus,
            flags,
            context,
            color: args.color,
            json: args.json.clone(),
        })
    }

    /// Write a report to the JSON file if one was requested, otherwise to the console
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be rendered or written
    pub fn emit<H: Host>(&self, host: &mut H, report: &Report<'_>) -> Result<()> {
        if let Some(filename) = &self.json {
            let mut json_output = String::new();
            generate_json(report, &mut json_output)?;
            fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
            return Ok(());
        }

        let use_colors = match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            }
        };

        let mut console_output = String::new();
        generate_console(report, use_colors, &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
        Ok(())
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a logger may already be installed when several commands run in one process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

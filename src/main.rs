// Mutuals - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Session controller construction and default-user seeding
// 4. eframe GUI launch, or a headless run that prints JSON

mod gui;

// Re-export modules from the library crate so that `gui.rs` can keep
// using `crate::app::...`, `crate::ui::...` etc.
pub use mutuals::app;
pub use mutuals::core;
pub use mutuals::platform;
pub use mutuals::ui;
pub use mutuals::util;

use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

/// Mutuals - find the GitHub accounts that follow every user in a set.
///
/// Starts with a default pair of users (or the USERS given here), fetches
/// each user's profile and followers, and lists the followers they share.
#[derive(Parser, Debug)]
#[command(name = "Mutuals", version, about)]
struct Cli {
    /// Users to track at startup (replaces the configured defaults).
    users: Vec<String>,

    /// GitHub API base URL (e.g. https://ghe.example.com/api/v3).
    #[arg(long = "api-base")]
    api_base: Option<String>,

    /// Fetch, print the common followers as JSON, and exit without a window.
    #[arg(long = "headless")]
    headless: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config comes first: it carries the log level.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (mut config, config_warnings) =
        platform::config::load_config(&platform_paths.config_file());

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        headless = cli.headless,
        "Mutuals starting"
    );
    for warning in &config_warnings {
        tracing::warn!(error = %warning, "Config warning");
    }

    if !cli.users.is_empty() {
        config.default_users = cli.users.clone();
    }
    if let Some(ref base) = cli.api_base {
        config.api_base_url = base.clone();
    }

    let transport =
        match platform::http::HttpTransport::new(&config.api_base_url, config.request_timeout) {
            Ok(t) => t,
            Err(e) => fail("Failed to create HTTP client", &e),
        };
    tracing::info!(api = transport.base_url(), "HTTP transport ready");

    let session_config = app::session::SessionConfig::from(&config);
    let mut session = match app::session::SessionController::new(Arc::new(transport), session_config)
    {
        Ok(s) => s,
        Err(e) => fail("Failed to start session", &e),
    };
    session.seed_defaults();

    if cli.headless {
        run_headless(session);
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([720.0, 520.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(gui::MutualsApp::new(session)))),
    );

    if let Err(e) = result {
        fail("Failed to launch GUI", &e);
    }
}

/// Wait for every fetch, print the common followers as JSON, and exit.
///
/// Exit code 1 if the wait timed out or any user failed to load.
fn run_headless(mut session: app::session::SessionController) -> ! {
    let idle = session.wait_idle(Duration::from_secs(
        util::constants::HEADLESS_WAIT_SECS,
    ));

    let common = session.common_followers();
    match serde_json::to_string_pretty(&common) {
        Ok(json) => println!("{json}"),
        Err(e) => fail("Failed to serialise common followers", &e),
    }

    let mut code = 0;
    if !idle {
        eprintln!("Error: timed out waiting for GitHub");
        code = 1;
    }
    if let Some(message) = session.error() {
        eprintln!("Error: {message}");
        code = 1;
    }

    tracing::info!(
        users = session.registry().len(),
        common = common.len(),
        "Headless run complete"
    );
    std::process::exit(code);
}

fn fail(context: &str, error: &dyn std::fmt::Display) -> ! {
    tracing::error!(error = %error, "{}", context);
    eprintln!("Error: {context}: {error}");
    std::process::exit(1);
}

//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; the login flow lives in SessionController / SingleShotLogin.

use campus_login::adapters::persistence::JsonProfileStore;
use campus_login::adapters::portal::{PortalHttp, PortalIpProber, campus_dispatcher};
use campus_login::adapters::ui::TuiInteraction;
use campus_login::domain::LoginResult;
use campus_login::ports::{InteractionPort, IpProber, ProfileStore};
use campus_login::shared::AppConfig;
use campus_login::usecases::{SessionController, SingleShotLogin, SingleShotOutcome, Terminal};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv::dotenv();
    // Default to warn so log lines do not interleave with the interactive screen.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let headless_env = std::env::var("CAMPUS_LOGIN_HEADLESS").ok();
    let cfg = AppConfig::resolve(AppConfig::load(), headless_env.as_deref())
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let profile_path = cfg.profile_path_or_default();
    info!(path = %profile_path.display(), timeout = ?cfg.request_timeout(), "configuration");

    // --- Portal: one HTTP client shared by the prober and every strategy ---
    let http = Arc::new(
        PortalHttp::new(cfg.request_timeout()).map_err(|e| anyhow::anyhow!("{}", e))?,
    );
    let prober: Arc<dyn IpProber> = Arc::new(PortalIpProber::new(Arc::clone(&http)));
    let dispatcher = Arc::new(campus_dispatcher(Arc::clone(&http)));
    let store: Arc<dyn ProfileStore> = Arc::new(JsonProfileStore::new(&profile_path));

    if cfg.is_headless() {
        let single_shot = SingleShotLogin::new(store, prober, dispatcher);
        let outcome = single_shot.run(cfg.inline_profile()).await;
        match outcome {
            SingleShotOutcome::NoProfile => {
                eprintln!("no profile: set CAMPUS_LOGIN_CARRIER/ACCOUNT/PASSWORD or save one interactively")
            }
            SingleShotOutcome::Attempted(LoginResult::Success) => println!("logged in"),
            SingleShotOutcome::Attempted(LoginResult::Failure(reason)) => {
                eprintln!("login failed: {}", reason)
            }
        }
        std::process::exit(outcome.exit_code());
    }

    campus_login::adapters::ui::init_ui();
    let ui: Arc<dyn InteractionPort> = Arc::new(TuiInteraction::new());

    // --- Run (menu -> login / edit profile / exit) ---
    let controller = SessionController::new(store, prober, dispatcher, ui);
    let report = controller
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if report.terminal == Terminal::Done {
        // Leave the success message on screen briefly before the window closes.
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    }

    Ok(())
}

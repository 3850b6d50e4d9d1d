//! Veggie Patch entry-point: loads settings, prepares the store and serves
//! the catalogue.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppSettings, ServerConfig, create_server};
use veggie_patch::inbound::http::health::HealthState;
use veggie_patch::inbound::http::session_config::{
    BuildMode, SessionSettings, session_settings_from_env,
};
use veggie_patch::outbound::persistence::{DbPool, run_migrations};

/// Session settings read from the process environment.
fn session_settings(mode: BuildMode) -> Result<SessionSettings> {
    session_settings_from_env(&DefaultEnv::new(), mode).wrap_err("invalid session configuration")
}

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|error| eyre!("failed to load configuration: {error}"))?;
    let session = session_settings(BuildMode::from_debug_assertions())?;
    info!(fingerprint = %session.fingerprint(), "session key loaded");

    let mut config = ServerConfig::new(session, settings.bind_addr());
    if let Some(pool_config) = settings.pool_config() {
        run_migrations(pool_config.database_url())
            .await
            .wrap_err("failed to apply database migrations")?;
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let bind_addr = settings.bind_addr();
    let server = create_server(health_state.clone(), config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "listening");
    server.await.wrap_err("server terminated with an error")?;
    health_state.mark_unhealthy();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use actix_web::cookie::SameSite;
    use env_lock::lock_env;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    #[rstest]
    fn session_settings_read_the_process_environment() {
        let mut key_file = NamedTempFile::new().expect("key file");
        key_file.write_all(&[7_u8; 64]).expect("write key");
        let path = key_file.path().to_string_lossy().into_owned();
        let _guard = lock_env([
            ("VEGGIE_SESSION_KEY_FILE", Some(path)),
            ("VEGGIE_SESSION_COOKIE_SECURE", Some("false".to_owned())),
            ("VEGGIE_SESSION_SAMESITE", Some("Strict".to_owned())),
            ("VEGGIE_SESSION_ALLOW_EPHEMERAL", Some("false".to_owned())),
        ]);

        let settings = session_settings(BuildMode::Release).expect("settings load");
        assert!(!settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Strict);
        assert_eq!(settings.fingerprint().len(), 16);
    }
}

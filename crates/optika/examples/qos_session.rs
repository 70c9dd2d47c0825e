//! Register a camera and run a short QoS session against a live provider.
//!
//! ```
//! OPTIKA_BASE_URL=https://qod.example.com/v1 OPTIKA_API_KEY=... \
//!     cargo run -p optika --example qos_session [PHONE_NUMBER]
//! ```

use std::{env, error::Error, time::Duration};

use optika::prelude::*;
use tracing::{info, metadata::LevelFilter};
use tracing_subscriber::EnvFilter;
use url::Url;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::default()
                .add_directive("optika=debug".parse()?)
                .add_directive("optika_provider=debug".parse()?)
                .add_directive(LevelFilter::INFO.into()),
        )
        .with_line_number(false)
        .with_file(false)
        .init();

    let base_url: Url = env::var("OPTIKA_BASE_URL")?.parse()?;
    let api_key = env::var("OPTIKA_API_KEY")?;
    let phone_number = env::args()
        .nth(1)
        .unwrap_or_else(|| "+358311100539".to_string());

    let manager = CameraManager::connect(base_url, api_key, ManagerConfig::default());

    manager
        .add_camera(
            "demo-cam",
            "roof-mounted demo unit",
            Codec::ProRes4444,
            &DeviceIdentifier::PhoneNumber(phone_number),
        )
        .await?;
    info!("camera registered, connectivity: {}", manager.camera_status("demo-cam").await?);

    let session = manager
        .create_session(
            "demo-cam",
            Codec::ProRes4444,
            Resolution::FourK,
            24.0,
            Duration::from_secs(60),
            "192.0.2.10",
        )
        .await?;
    info!(
        "session {} running with profile {}",
        session.id, session.qos_profile
    );

    manager
        .extend_session("demo-cam", &session.id, Duration::from_secs(30))
        .await?;

    for live in manager.list_sessions("demo-cam").await? {
        info!("live session: {} ({:?})", live.id, live.status);
    }

    manager.terminate_all_sessions("demo-cam").await?;
    info!("all sessions cleared");

    Ok(())
}

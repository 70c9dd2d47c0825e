use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU32, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use optika::{
    CameraError, CameraManager, ManagerConfig,
    provider::{
        ConnectivityStatus, DeviceHandle, DeviceIdentifier, Location, NetworkProvider,
        ProviderError, ProviderResult, SessionHandle, SessionId, SessionRequest, SessionStatus,
    },
    qos::{Codec, QosError, QosProfile, Resolution},
};
use rstest::rstest;

// ============================================================================
// Instrumented in-memory provider
// ============================================================================

/// Provider fake that records every call and keeps sessions in memory.
#[derive(Default)]
struct FakeProvider {
    calls: Mutex<Vec<String>>,
    requests: Mutex<Vec<SessionRequest>>,
    sessions: Mutex<Vec<SessionHandle>>,
    next_device: AtomicU32,
    next_session: AtomicU32,
    fail_resolve: AtomicBool,
    create_delay: Duration,
}

impl FakeProvider {
    fn with_create_delay(delay: Duration) -> Self {
        Self {
            create_delay: delay,
            ..Self::default()
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NetworkProvider for FakeProvider {
    async fn resolve_device(&self, _identifier: &DeviceIdentifier) -> ProviderResult<DeviceHandle> {
        self.record("resolve");
        if self.fail_resolve.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable("resolver down".into()));
        }
        let n = self.next_device.fetch_add(1, Ordering::SeqCst);
        Ok(DeviceHandle(format!("dev-{n}")))
    }

    async fn device_location(
        &self,
        _device: &DeviceHandle,
        max_age: Duration,
    ) -> ProviderResult<Location> {
        self.record(format!("location:{}", max_age.as_secs()));
        Ok(Location {
            latitude: 60.1699,
            longitude: 24.9384,
            radius_meters: Some(50.0),
            last_location_time: None,
        })
    }

    async fn device_connectivity(
        &self,
        _device: &DeviceHandle,
    ) -> ProviderResult<ConnectivityStatus> {
        self.record("connectivity");
        Ok(ConnectivityStatus::ConnectedData)
    }

    async fn create_session(
        &self,
        device: &DeviceHandle,
        request: &SessionRequest,
    ) -> ProviderResult<SessionHandle> {
        self.record("create:start");
        if self.create_delay > Duration::ZERO {
            tokio::time::sleep(self.create_delay).await;
        }
        self.requests.lock().unwrap().push(request.clone());

        let n = self.next_session.fetch_add(1, Ordering::SeqCst);
        let session = SessionHandle {
            id: SessionId(format!("sess-{n}")),
            device_id: device.clone(),
            qos_profile: request.qos_profile,
            sink: request.sink.clone(),
            duration: request.duration,
            started_at: None,
            expires_at: None,
            status: SessionStatus::Available,
        };
        self.sessions.lock().unwrap().push(session.clone());
        self.record("create:end");
        Ok(session)
    }

    async fn list_sessions(&self, device: &DeviceHandle) -> ProviderResult<Vec<SessionHandle>> {
        self.record("list");
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .iter()
            .filter(|s| s.device_id == *device)
            .cloned()
            .collect())
    }

    async fn extend_session(&self, session: &SessionId, additional: Duration) -> ProviderResult<()> {
        self.record(format!("extend:{}:{}", session, additional.as_secs()));
        Ok(())
    }

    async fn delete_session(&self, session: &SessionId) -> ProviderResult<()> {
        self.record(format!("delete:{session}"));
        self.sessions.lock().unwrap().retain(|s| s.id != *session);
        Ok(())
    }

    async fn clear_sessions(&self, device: &DeviceHandle) -> ProviderResult<()> {
        self.record("clear:start");
        self.sessions.lock().unwrap().retain(|s| s.device_id != *device);
        self.record("clear:end");
        Ok(())
    }
}

fn identifier() -> DeviceIdentifier {
    DeviceIdentifier::PhoneNumber("+358311100539".into())
}

fn manager() -> (Arc<FakeProvider>, CameraManager) {
    let fake = Arc::new(FakeProvider::default());
    let manager = CameraManager::new(fake.clone(), ManagerConfig::default());
    (fake, manager)
}

async fn register(manager: &CameraManager, name: &str) {
    manager
        .add_camera(name, "test rig", Codec::ProRes4444, &identifier())
        .await
        .unwrap();
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn registered_cameras_list_in_registration_order() {
    let (_fake, manager) = manager();
    for name in ["north", "south", "east"] {
        register(&manager, name).await;
    }

    let names: Vec<_> = manager
        .list_cameras()
        .await
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["north", "south", "east"]);

    let camera = manager.find_camera("south").await.unwrap();
    assert_eq!(camera.device, DeviceHandle("dev-1".into()));
    assert_eq!(camera.codec, Codec::ProRes4444);
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let (fake, manager) = manager();

    let result = manager
        .add_camera("   ", "", Codec::ProRes422Hq, &identifier())
        .await;
    assert!(matches!(result, Err(CameraError::InvalidName(_))));
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn duplicate_name_is_rejected_without_resolving_again() {
    let (fake, manager) = manager();
    register(&manager, "north").await;

    let result = manager
        .add_camera("north", "other rig", Codec::ArriRaw, &identifier())
        .await;
    assert!(matches!(result, Err(CameraError::DuplicateName(name)) if name == "north"));
    assert_eq!(manager.list_cameras().await.len(), 1);
    assert_eq!(fake.calls(), ["resolve"]);
}

#[tokio::test]
async fn failed_resolution_leaves_registry_untouched() {
    let (fake, manager) = manager();
    fake.fail_resolve.store(true, Ordering::SeqCst);

    let result = manager
        .add_camera("north", "", Codec::ProRes422Hq, &identifier())
        .await;
    match result {
        Err(CameraError::DeviceResolutionFailed { name, .. }) => assert_eq!(name, "north"),
        other => panic!("expected DeviceResolutionFailed, got {other:?}"),
    }
    assert!(manager.find_camera("north").await.is_none());
    assert!(manager.list_cameras().await.is_empty());
}

#[tokio::test]
async fn unknown_codec_tag_surfaces_as_typed_error() {
    let (_fake, manager) = manager();

    // Integration surfaces that accept codec names as strings parse them
    // before registration; the parse error converts into CameraError.
    let result = async {
        let codec: Codec = "H.264".parse()?;
        manager.add_camera("north", "", codec, &identifier()).await
    }
    .await;

    match result {
        Err(CameraError::Qos(QosError::UnknownCodec(tag))) => assert_eq!(tag, "H.264"),
        other => panic!("expected UnknownCodec, got {other:?}"),
    }
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn session_ops_on_unknown_camera_never_reach_the_provider() {
    let (fake, manager) = manager();

    let result = manager
        .create_session(
            "ghost",
            Codec::ProRes4444,
            Resolution::FourK,
            24.0,
            Duration::from_secs(60),
            "192.0.2.10",
        )
        .await;
    assert!(matches!(result, Err(CameraError::CameraNotFound(name)) if name == "ghost"));

    let result = manager.terminate_all_sessions("ghost").await;
    assert!(matches!(result, Err(CameraError::CameraNotFound(_))));

    assert!(fake.calls().is_empty());
}

#[rstest]
// ProRes 4444 at 4K / 24 fps lands far above the medium ceiling.
#[case(Codec::ProRes4444, Resolution::FourK, 24.0, QosProfile::L)]
// A 0.25 fps timelapse estimates ~1.96 Mbps, under the small ceiling.
#[case(Codec::ProRes422Hq, Resolution::Hd, 0.25, QosProfile::S)]
#[case(Codec::ArriRaw, Resolution::Hd, 24.0, QosProfile::L)]
#[tokio::test]
async fn estimated_profile_reaches_the_provider(
    #[case] codec: Codec,
    #[case] resolution: Resolution,
    #[case] framerate: f64,
    #[case] expected: QosProfile,
) {
    let (fake, manager) = manager();
    register(&manager, "north").await;

    let session = manager
        .create_session(
            "north",
            codec,
            resolution,
            framerate,
            Duration::from_secs(600),
            "192.0.2.10",
        )
        .await
        .unwrap();
    assert_eq!(session.qos_profile, expected);

    let requests = fake.requests.lock().unwrap();
    assert_eq!(requests[0].qos_profile, expected);
    assert_eq!(requests[0].sink, "192.0.2.10");
    assert_eq!(requests[0].duration, Duration::from_secs(600));
}

#[tokio::test]
async fn session_lifecycle_round_trip() {
    let (fake, manager) = manager();
    register(&manager, "north").await;

    let session = manager
        .create_session(
            "north",
            Codec::ProRes4444,
            Resolution::Uhd,
            24.0,
            Duration::from_secs(120),
            "192.0.2.10",
        )
        .await
        .unwrap();

    let found = manager.get_session("north", &session.id).await.unwrap();
    assert_eq!(found.as_ref().map(|s| &s.id), Some(&session.id));

    manager
        .extend_session("north", &session.id, Duration::from_secs(60))
        .await
        .unwrap();
    assert!(fake.calls().contains(&format!("extend:{}:60", session.id)));

    manager.terminate_session("north", &session.id).await.unwrap();
    assert!(manager.get_session("north", &session.id).await.unwrap().is_none());
    assert!(manager.list_sessions("north").await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_session_id_is_a_typed_error() {
    let (fake, manager) = manager();
    register(&manager, "north").await;

    let ghost = SessionId("sess-404".into());
    let result = manager
        .extend_session("north", &ghost, Duration::from_secs(60))
        .await;
    assert!(matches!(result, Err(CameraError::SessionNotFound(id)) if id == "sess-404"));

    let result = manager.terminate_session("north", &ghost).await;
    assert!(matches!(result, Err(CameraError::SessionNotFound(_))));

    // The provider was only ever asked to list, never to mutate.
    assert!(fake.calls().iter().all(|c| !c.starts_with("delete")));
    assert!(fake.calls().iter().all(|c| !c.starts_with("extend")));
}

#[tokio::test]
async fn terminate_all_clears_every_session() {
    let (_fake, manager) = manager();
    register(&manager, "north").await;

    for _ in 0..3 {
        manager
            .create_session(
                "north",
                Codec::ArriRaw,
                Resolution::Hd,
                24.0,
                Duration::from_secs(60),
                "192.0.2.10",
            )
            .await
            .unwrap();
    }
    assert_eq!(manager.list_sessions("north").await.unwrap().len(), 3);

    manager.terminate_all_sessions("north").await.unwrap();
    assert!(manager.list_sessions("north").await.unwrap().is_empty());
}

// ============================================================================
// Per-camera serialization
// ============================================================================

#[tokio::test]
async fn same_camera_session_ops_serialize() {
    let fake = Arc::new(FakeProvider::with_create_delay(Duration::from_millis(50)));
    let manager = CameraManager::new(fake.clone(), ManagerConfig::default());
    register(&manager, "north").await;
    fake.calls.lock().unwrap().clear();

    let create = manager.create_session(
        "north",
        Codec::ProRes4444,
        Resolution::FourK,
        24.0,
        Duration::from_secs(60),
        "192.0.2.10",
    );
    let clear = manager.terminate_all_sessions("north");

    let (created, cleared) = tokio::join!(create, clear);
    created.unwrap();
    cleared.unwrap();

    // The clear must not start while the create is still in flight.
    assert_eq!(
        fake.calls(),
        ["create:start", "create:end", "clear:start", "clear:end"]
    );
}

#[tokio::test]
async fn different_cameras_proceed_concurrently() {
    let fake = Arc::new(FakeProvider::with_create_delay(Duration::from_millis(50)));
    let manager = CameraManager::new(fake.clone(), ManagerConfig::default());
    register(&manager, "north").await;
    register(&manager, "south").await;
    fake.calls.lock().unwrap().clear();

    let create = manager.create_session(
        "north",
        Codec::ProRes4444,
        Resolution::FourK,
        24.0,
        Duration::from_secs(60),
        "192.0.2.10",
    );
    let clear = manager.terminate_all_sessions("south");

    let (created, cleared) = tokio::join!(create, clear);
    created.unwrap();
    cleared.unwrap();

    // The clear on the other camera finishes while the create still sleeps.
    assert_eq!(
        fake.calls(),
        ["create:start", "clear:start", "clear:end", "create:end"]
    );
}

// ============================================================================
// Device queries
// ============================================================================

#[tokio::test]
async fn location_query_uses_the_configured_freshness_window() {
    let fake = Arc::new(FakeProvider::default());
    let manager = CameraManager::new(
        fake.clone(),
        ManagerConfig::default().with_location_max_age(Duration::from_secs(600)),
    );
    register(&manager, "north").await;

    let location = manager.camera_location("north").await.unwrap();
    assert!((location.latitude - 60.1699).abs() < 1e-9);
    assert!(fake.calls().contains(&"location:600".to_string()));
}

#[tokio::test]
async fn status_query_does_not_touch_advisory_flags() {
    let (_fake, manager) = manager();
    register(&manager, "north").await;

    let status = manager.camera_status("north").await.unwrap();
    assert_eq!(status, ConnectivityStatus::ConnectedData);

    let camera = manager.find_camera("north").await.unwrap();
    assert!(!camera.status.connection);
    assert!(!camera.status.footage_sync);
    assert!(!camera.status.time_sync);
}

#[tokio::test]
async fn device_queries_on_unknown_camera_fail_fast() {
    let (fake, manager) = manager();

    assert!(matches!(
        manager.camera_location("ghost").await,
        Err(CameraError::CameraNotFound(_))
    ));
    assert!(matches!(
        manager.camera_status("ghost").await,
        Err(CameraError::CameraNotFound(_))
    ));
    assert!(fake.calls().is_empty());
}

//! Unit tests for the connection factory lifecycle

use crate::application::factory::ConnectionFactory;
use crate::domain::ConnectionEventKind;
use crate::error::ConnectionError;
use crate::port::connection_hook::{ConnectionHook, HookError};
use crate::port::datasource_provider::mocks::{MemoryDatasourceProvider, MemorySession};
use crate::port::{ConnectionHandle, EventDispatcher};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// (kind, name, handle present)
type EventRecord = (ConnectionEventKind, String, bool);

fn recording_dispatcher() -> (Arc<EventDispatcher>, Arc<Mutex<Vec<EventRecord>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut dispatcher = EventDispatcher::new();
    let sink = log.clone();
    dispatcher.subscribe(Box::new(move |event| {
        sink.lock()
            .unwrap()
            .push((event.kind, event.name.clone(), event.handle.is_some()));
    }));
    (Arc::new(dispatcher), log)
}

struct RecordingHook {
    tag: &'static str,
    log: Arc<Mutex<Vec<String>>>,
    fail_init: bool,
    fail_destroy: bool,
}

impl RecordingHook {
    fn new(tag: &'static str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            tag,
            log,
            fail_init: false,
            fail_destroy: false,
        }
    }
}

#[async_trait]
impl ConnectionHook for RecordingHook {
    async fn init(&self, _name: &str, _handle: &ConnectionHandle) -> Result<(), HookError> {
        self.log.lock().unwrap().push(format!("{}:init", self.tag));
        if self.fail_init {
            return Err(format!("{} init failed", self.tag).into());
        }
        Ok(())
    }

    async fn destroy(&self, _name: &str, _handle: &ConnectionHandle) -> Result<(), HookError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:destroy", self.tag));
        if self.fail_destroy {
            return Err(format!("{} destroy failed", self.tag).into());
        }
        Ok(())
    }
}

fn factory_with_hooks(
    provider: Arc<MemoryDatasourceProvider>,
    hooks: Vec<Arc<dyn ConnectionHook>>,
) -> (ConnectionFactory, Arc<Mutex<Vec<EventRecord>>>) {
    let (events, event_log) = recording_dispatcher();
    let mut factory = ConnectionFactory::new(provider, events);
    for hook in hooks {
        factory.register_hook(hook);
    }
    (factory, event_log)
}

#[tokio::test]
async fn test_create_runs_hooks_in_registration_order() {
    let provider = Arc::new(MemoryDatasourceProvider::with_names(&["primary"]));
    let hook_log = Arc::new(Mutex::new(Vec::new()));
    let hooks: Vec<Arc<dyn ConnectionHook>> = vec![
        Arc::new(RecordingHook::new("H1", hook_log.clone())),
        Arc::new(RecordingHook::new("H2", hook_log.clone())),
        Arc::new(RecordingHook::new("H3", hook_log.clone())),
    ];
    let (factory, event_log) = factory_with_hooks(provider, hooks);

    factory.create("primary").await.unwrap();

    assert_eq!(*hook_log.lock().unwrap(), vec!["H1:init", "H2:init", "H3:init"]);
    assert_eq!(
        *event_log.lock().unwrap(),
        vec![
            (ConnectionEventKind::ConnectStart, "primary".to_string(), false),
            (ConnectionEventKind::ConnectEnd, "primary".to_string(), true),
        ]
    );
}

#[tokio::test]
async fn test_create_hands_out_a_fresh_session_after_bootstrap() {
    let provider = Arc::new(MemoryDatasourceProvider::with_names(&["primary"]));
    let (factory, _events) = factory_with_hooks(provider.clone(), vec![]);

    let handle = factory.create("primary").await.unwrap();

    // The bootstrap session was closed and a second one opened
    let datasource = provider.datasource("primary").unwrap();
    assert_eq!(datasource.sessions_opened(), 2);
    assert!(datasource.session(0).unwrap().is_closed());
    assert!(!datasource.session(1).unwrap().is_closed());

    // The returned handle is the fresh session
    handle.execute("SELECT 1").await.unwrap();
    assert_eq!(datasource.session(1).unwrap().executed(), vec!["SELECT 1"]);
}

#[tokio::test]
async fn test_create_unknown_name_touches_nothing() {
    let provider = Arc::new(MemoryDatasourceProvider::with_names(&["primary"]));
    let hook_log = Arc::new(Mutex::new(Vec::new()));
    let hooks: Vec<Arc<dyn ConnectionHook>> =
        vec![Arc::new(RecordingHook::new("H1", hook_log.clone()))];
    let (factory, event_log) = factory_with_hooks(provider.clone(), hooks);

    let err = factory.create("missing").await.unwrap_err();

    assert!(matches!(
        err,
        ConnectionError::Domain(crate::domain::DomainError::UnknownConnection(_))
    ));
    assert!(hook_log.lock().unwrap().is_empty());
    assert!(event_log.lock().unwrap().is_empty());
    assert_eq!(provider.create_calls(), 0);
    assert!(factory.open_datasources().await.is_empty());
}

#[tokio::test]
async fn test_bootstrap_failure_aborts_remaining_hooks() {
    let provider = Arc::new(MemoryDatasourceProvider::with_names(&["primary"]));
    let hook_log = Arc::new(Mutex::new(Vec::new()));
    let mut failing = RecordingHook::new("H2", hook_log.clone());
    failing.fail_init = true;
    let hooks: Vec<Arc<dyn ConnectionHook>> = vec![
        Arc::new(RecordingHook::new("H1", hook_log.clone())),
        Arc::new(failing),
        Arc::new(RecordingHook::new("H3", hook_log.clone())),
    ];
    let (factory, event_log) = factory_with_hooks(provider.clone(), hooks);

    let err = factory.create("primary").await.unwrap_err();

    match err {
        ConnectionError::Bootstrap { name, source } => {
            assert_eq!(name, "primary");
            assert!(source.to_string().contains("H2 init failed"));
        }
        other => panic!("expected Bootstrap error, got {other:?}"),
    }
    assert_eq!(*hook_log.lock().unwrap(), vec!["H1:init", "H2:init"]);

    // No connect-end event for an aborted create
    assert_eq!(
        *event_log.lock().unwrap(),
        vec![(ConnectionEventKind::ConnectStart, "primary".to_string(), false)]
    );

    // The datasource opened on the way in is left as-is (known gap)
    assert_eq!(factory.open_datasources().await, vec!["primary"]);
}

#[tokio::test]
async fn test_destroy_runs_teardown_in_order_and_releases() {
    let provider = Arc::new(MemoryDatasourceProvider::with_names(&["primary"]));
    let hook_log = Arc::new(Mutex::new(Vec::new()));
    let hooks: Vec<Arc<dyn ConnectionHook>> = vec![
        Arc::new(RecordingHook::new("T1", hook_log.clone())),
        Arc::new(RecordingHook::new("T2", hook_log.clone())),
    ];
    let (factory, event_log) = factory_with_hooks(provider.clone(), hooks);

    let handle = factory.create("primary").await.unwrap();
    hook_log.lock().unwrap().clear();

    factory.destroy("primary", handle).await.unwrap();

    assert_eq!(*hook_log.lock().unwrap(), vec!["T1:destroy", "T2:destroy"]);
    assert!(factory.open_datasources().await.is_empty());
    assert_eq!(provider.destroy_calls(), 1);
    assert!(provider.datasource("primary").is_none());

    let kinds: Vec<ConnectionEventKind> =
        event_log.lock().unwrap().iter().map(|e| e.0).collect();
    assert_eq!(
        kinds,
        vec![
            ConnectionEventKind::ConnectStart,
            ConnectionEventKind::ConnectEnd,
            ConnectionEventKind::DisconnectStart,
            ConnectionEventKind::DisconnectEnd,
        ]
    );
}

#[tokio::test]
async fn test_destroy_without_live_datasource_is_a_precondition_failure() {
    let provider = Arc::new(MemoryDatasourceProvider::with_names(&["primary"]));
    let (factory, _events) = factory_with_hooks(provider, vec![]);

    let stray: ConnectionHandle = Arc::new(MemorySession::default());
    let err = factory.destroy("primary", stray).await.unwrap_err();

    assert!(matches!(err, ConnectionError::MissingHandle { name } if name == "primary"));
}

#[tokio::test]
async fn test_teardown_failure_still_closes_and_releases() {
    let provider = Arc::new(MemoryDatasourceProvider::with_names(&["primary"]));
    let hook_log = Arc::new(Mutex::new(Vec::new()));
    let mut failing = RecordingHook::new("T1", hook_log.clone());
    failing.fail_destroy = true;
    let hooks: Vec<Arc<dyn ConnectionHook>> = vec![
        Arc::new(failing),
        Arc::new(RecordingHook::new("T2", hook_log.clone())),
    ];
    let (factory, _events) = factory_with_hooks(provider.clone(), hooks);

    let handle = factory.create("primary").await.unwrap();
    hook_log.lock().unwrap().clear();
    let session = provider.datasource("primary").unwrap().session(1).unwrap();

    let err = factory.destroy("primary", handle).await.unwrap_err();

    assert!(matches!(err, ConnectionError::Teardown { .. }));
    // T2 was aborted, but the handle was closed and the pool released
    assert_eq!(*hook_log.lock().unwrap(), vec!["T1:destroy"]);
    assert!(session.is_closed());
    assert!(factory.open_datasources().await.is_empty());
    assert_eq!(provider.destroy_calls(), 1);
}

//! In-memory collaborators for unit tests

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::errors::{BotError, StorageError, SyncError};
use crate::domain::entities::{ApplicationState, BotEvent, CommandSpec, Scope};
use crate::domain::traits::{
    CommandRegistry, DomainInitializer, EventLog, Gateway, PluginSource, PluginUnit, StateStore,
};

/// Event log that keeps every entry
#[derive(Default)]
pub struct RecordingLog {
    messages: Mutex<Vec<String>>,
    exceptions: Mutex<Vec<(String, String)>>,
}

impl RecordingLog {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn exceptions(&self) -> Vec<(String, String)> {
        self.exceptions.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventLog for RecordingLog {
    async fn log(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    async fn log_exception(&self, context: &str, error: &(dyn std::error::Error + Send + Sync)) {
        self.exceptions
            .lock()
            .unwrap()
            .push((context.to_string(), error.to_string()));
    }
}

/// Command registry that counts calls and optionally fails
#[derive(Default)]
pub struct FakeRegistry {
    calls: AtomicUsize,
    failure: Option<String>,
}

impl FakeRegistry {
    pub fn failing(reason: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: Some(reason.to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommandRegistry for FakeRegistry {
    async fn register(&self, _scope: Scope, commands: &[CommandSpec]) -> Result<Vec<String>, SyncError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(msg) => Err(SyncError::Network(msg.clone())),
            None => Ok(commands.iter().map(|c| c.name.clone()).collect()),
        }
    }
}

/// Plugin source backed by a map of file name to contents
#[derive(Default)]
pub struct MemorySource {
    missing: bool,
    files: HashMap<String, String>,
    pub lists: AtomicUsize,
    pub reads: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn missing() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }

    pub fn with_file(mut self, name: &str, contents: &str) -> Self {
        self.files.insert(name.to_string(), contents.to_string());
        self
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

impl PluginSource for Arc<MemorySource> {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn exists(&self) -> bool {
        !self.missing
    }

    fn list(&self) -> std::io::Result<Vec<PluginUnit>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .files
            .keys()
            .map(|name| PluginUnit::new(name.clone(), name.clone()))
            .collect())
    }

    fn read(&self, unit: &PluginUnit) -> std::io::Result<String> {
        self.reads.lock().unwrap().push(unit.file_name.clone());
        self.files
            .get(&unit.file_name)
            .cloned()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, unit.file_name.clone()))
    }
}

/// State store holding one state in memory
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<ApplicationState>,
    pub loads: AtomicUsize,
}

impl MemoryStore {
    pub fn new(state: ApplicationState) -> Self {
        Self {
            state: Mutex::new(state),
            loads: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> Result<ApplicationState, StorageError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.lock().unwrap().clone())
    }

    async fn save(&self, state: &ApplicationState) -> Result<(), StorageError> {
        *self.state.lock().unwrap() = state.clone();
        Ok(())
    }
}

/// Initializer that counts its runs
#[derive(Default)]
pub struct CountingInitializer {
    pub runs: AtomicUsize,
}

impl CountingInitializer {
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl DomainInitializer for CountingInitializer {
    fn initialize(&self, _state: &mut ApplicationState) -> Result<(), BotError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Shared view of what a [`ScriptedGateway`] was asked to do
#[derive(Default)]
pub struct GatewayCounters {
    pub connects: AtomicUsize,
    pub closes: AtomicUsize,
}

/// Gateway replaying a fixed list of events
pub struct ScriptedGateway {
    events: VecDeque<Result<BotEvent, BotError>>,
    counters: Arc<GatewayCounters>,
    /// Stay pending instead of ending once the script runs out
    hold_open: bool,
}

impl ScriptedGateway {
    pub fn new(events: Vec<Result<BotEvent, BotError>>, counters: Arc<GatewayCounters>) -> Self {
        Self {
            events: events.into(),
            counters,
            hold_open: false,
        }
    }

    pub fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn connect(&mut self) -> Result<(), BotError> {
        self.counters.connects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn next_event(&mut self) -> Result<Option<BotEvent>, BotError> {
        match self.events.pop_front() {
            Some(Ok(event)) => Ok(Some(event)),
            Some(Err(e)) => Err(e),
            None if self.hold_open => std::future::pending().await,
            None => Ok(None),
        }
    }

    async fn close(&mut self) -> Result<(), BotError> {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

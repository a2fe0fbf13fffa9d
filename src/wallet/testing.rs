//! Scriptable fake providers for unit tests

use super::environment::{
    AlbedoApi, AlbedoPublicKeyIntent, AlbedoPublicKeyResponse, AlbedoTxIntent, AlbedoTxResponse,
    Environment, FreighterApi, ProviderError, RabetApi, RabetConnectResponse, RabetSignResponse,
    XBullApi,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use url::Url;

pub const VALID_KEY: &str = "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H";
pub const OTHER_KEY: &str = "GCEZWKCA5VLDNRLN3RPRJMRZOX3Z6G5CHCGSNFHEYVXM3XOJMDS674JZ";
pub const SCENARIO_KEY: &str = "GABCDEFGHIJKLMNOPQRSTUVWXYZABCDEFGHIJKLMNOPQRSTUVWXYZ12";

pub type SignCalls = Arc<Mutex<Vec<(String, Option<String>)>>>;

fn outcome(result: &Result<String, String>) -> Result<String, ProviderError> {
    result.clone().map_err(ProviderError::new)
}

async fn wait(gate: &Option<Arc<Notify>>) {
    if let Some(gate) = gate {
        gate.notified().await;
    }
}

pub struct FakeFreighter {
    key: Result<String, String>,
    sign_error: Option<String>,
    gate: Option<Arc<Notify>>,
    sign_calls: SignCalls,
}

impl FakeFreighter {
    pub fn resolving(key: &str) -> Self {
        Self {
            key: Ok(key.to_string()),
            sign_error: None,
            gate: None,
            sign_calls: SignCalls::default(),
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            key: Err(message.to_string()),
            ..Self::resolving("")
        }
    }

    /// Block `get_public_key` until the gate is notified
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn failing_sign(mut self, message: &str) -> Self {
        self.sign_error = Some(message.to_string());
        self
    }

    pub fn sign_calls(&self) -> SignCalls {
        Arc::clone(&self.sign_calls)
    }
}

#[async_trait]
impl FreighterApi for FakeFreighter {
    async fn get_public_key(&self) -> Result<String, ProviderError> {
        wait(&self.gate).await;
        outcome(&self.key)
    }

    async fn sign_transaction(&self, xdr: &str, network: &str) -> Result<String, ProviderError> {
        self.sign_calls
            .lock()
            .unwrap()
            .push((xdr.to_string(), Some(network.to_string())));
        match &self.sign_error {
            Some(message) => Err(ProviderError::new(message.clone())),
            None => Ok(format!("signed:{}", xdr)),
        }
    }
}

pub struct FakeRabet {
    key: Result<String, String>,
    sign_calls: SignCalls,
}

impl FakeRabet {
    pub fn resolving(key: &str) -> Self {
        Self {
            key: Ok(key.to_string()),
            sign_calls: SignCalls::default(),
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            key: Err(message.to_string()),
            sign_calls: SignCalls::default(),
        }
    }

    pub fn sign_calls(&self) -> SignCalls {
        Arc::clone(&self.sign_calls)
    }
}

#[async_trait]
impl RabetApi for FakeRabet {
    async fn connect(&self) -> Result<RabetConnectResponse, ProviderError> {
        outcome(&self.key).map(|public_key| RabetConnectResponse { public_key })
    }

    async fn sign(&self, xdr: &str, network: &str) -> Result<RabetSignResponse, ProviderError> {
        self.sign_calls
            .lock()
            .unwrap()
            .push((xdr.to_string(), Some(network.to_string())));
        Ok(RabetSignResponse {
            xdr: format!("rabet:{}", xdr),
        })
    }
}

pub struct FakeXBull {
    key: String,
    authorize_error: Option<String>,
    log: Arc<Mutex<Vec<&'static str>>>,
    sign_calls: SignCalls,
}

impl FakeXBull {
    pub fn resolving(key: &str) -> Self {
        Self {
            key: key.to_string(),
            authorize_error: None,
            log: Arc::default(),
            sign_calls: SignCalls::default(),
        }
    }

    pub fn declining(message: &str) -> Self {
        Self {
            authorize_error: Some(message.to_string()),
            ..Self::resolving("")
        }
    }

    pub fn call_log(&self) -> Arc<Mutex<Vec<&'static str>>> {
        Arc::clone(&self.log)
    }

    pub fn sign_calls(&self) -> SignCalls {
        Arc::clone(&self.sign_calls)
    }
}

#[async_trait]
impl XBullApi for FakeXBull {
    async fn connect(&self) -> Result<(), ProviderError> {
        self.log.lock().unwrap().push("connect");
        match &self.authorize_error {
            Some(message) => Err(ProviderError::new(message.clone())),
            None => Ok(()),
        }
    }

    async fn get_public_key(&self) -> Result<String, ProviderError> {
        self.log.lock().unwrap().push("getPublicKey");
        Ok(self.key.clone())
    }

    async fn sign_transaction(&self, xdr: &str) -> Result<String, ProviderError> {
        self.sign_calls.lock().unwrap().push((xdr.to_string(), None));
        Ok(format!("xbull:{}", xdr))
    }
}

pub struct FakeAlbedo {
    key: String,
    sign_calls: SignCalls,
}

impl FakeAlbedo {
    pub fn resolving(key: &str) -> Self {
        Self {
            key: key.to_string(),
            sign_calls: SignCalls::default(),
        }
    }

    pub fn sign_calls(&self) -> SignCalls {
        Arc::clone(&self.sign_calls)
    }
}

#[async_trait]
impl AlbedoApi for FakeAlbedo {
    async fn public_key(
        &self,
        _intent: AlbedoPublicKeyIntent,
    ) -> Result<AlbedoPublicKeyResponse, ProviderError> {
        Ok(AlbedoPublicKeyResponse {
            pubkey: self.key.clone(),
        })
    }

    async fn tx(&self, intent: AlbedoTxIntent) -> Result<AlbedoTxResponse, ProviderError> {
        self.sign_calls
            .lock()
            .unwrap()
            .push((intent.xdr.clone(), Some(intent.network)));
        Ok(AlbedoTxResponse {
            signed_envelope_xdr: format!("albedo:{}", intent.xdr),
        })
    }
}

/// In-memory stand-in for the browser's injected globals
#[derive(Default)]
pub struct FakeEnvironment {
    freighter: Option<Arc<FakeFreighter>>,
    rabet: Option<Arc<FakeRabet>>,
    xbull: Option<Arc<FakeXBull>>,
    albedo: Mutex<Option<Arc<FakeAlbedo>>>,
    // Registered as `albedo` once its script is loaded
    albedo_script: Option<Arc<FakeAlbedo>>,
    script_error: Option<String>,
    scripts: Mutex<Vec<String>>,
    probes: AtomicUsize,
}

impl FakeEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_freighter(mut self, fake: FakeFreighter) -> Self {
        self.freighter = Some(Arc::new(fake));
        self
    }

    pub fn with_rabet(mut self, fake: FakeRabet) -> Self {
        self.rabet = Some(Arc::new(fake));
        self
    }

    pub fn with_xbull(mut self, fake: FakeXBull) -> Self {
        self.xbull = Some(Arc::new(fake));
        self
    }

    /// SDK already present in the page
    pub fn with_albedo(self, fake: FakeAlbedo) -> Self {
        *self.albedo.lock().unwrap() = Some(Arc::new(fake));
        self
    }

    /// SDK appears after `load_script`
    pub fn with_loadable_albedo(mut self, fake: FakeAlbedo) -> Self {
        self.albedo_script = Some(Arc::new(fake));
        self
    }

    pub fn with_failing_script_loader(mut self, message: &str) -> Self {
        self.script_error = Some(message.to_string());
        self
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn scripts_loaded(&self) -> Vec<String> {
        self.scripts.lock().unwrap().clone()
    }

    fn probe(&self) {
        self.probes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Environment for FakeEnvironment {
    fn freighter(&self) -> Option<Arc<dyn FreighterApi>> {
        self.probe();
        self.freighter
            .clone()
            .map(|f| f as Arc<dyn FreighterApi>)
    }

    fn rabet(&self) -> Option<Arc<dyn RabetApi>> {
        self.probe();
        self.rabet.clone().map(|r| r as Arc<dyn RabetApi>)
    }

    fn xbull(&self) -> Option<Arc<dyn XBullApi>> {
        self.probe();
        self.xbull.clone().map(|x| x as Arc<dyn XBullApi>)
    }

    fn albedo(&self) -> Option<Arc<dyn AlbedoApi>> {
        self.probe();
        self.albedo
            .lock()
            .unwrap()
            .clone()
            .map(|a| a as Arc<dyn AlbedoApi>)
    }

    fn can_load_scripts(&self) -> bool {
        self.albedo_script.is_some() || self.script_error.is_some()
    }

    async fn load_script(&self, src: &Url) -> Result<(), ProviderError> {
        self.scripts.lock().unwrap().push(src.to_string());
        if let Some(message) = &self.script_error {
            return Err(ProviderError::new(message.clone()));
        }
        *self.albedo.lock().unwrap() = self.albedo_script.clone();
        Ok(())
    }
}

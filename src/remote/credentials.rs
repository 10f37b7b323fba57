//! Process-wide bearer token, observable by every controller.

use tokio::sync::watch;

#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        (!token.is_empty()).then_some(Self(token))
    }

    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Set at login, cleared at logout. Readers always see the latest value.
#[derive(Clone, Debug)]
pub struct CredentialStore {
    sender: watch::Sender<Option<BearerToken>>,
}

impl CredentialStore {
    pub fn new(initial: Option<BearerToken>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    pub fn login(&self, token: BearerToken) {
        log::info!("Credentials updated");
        self.sender.send_replace(Some(token));
    }

    pub fn logout(&self) {
        log::info!("Credentials cleared");
        self.sender.send_replace(None);
    }

    pub fn current(&self) -> Option<BearerToken> {
        self.sender.borrow().clone()
    }

    /// Receiver that is notified on every login/logout.
    pub fn subscribe(&self) -> watch::Receiver<Option<BearerToken>> {
        self.sender.subscribe()
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(None)
    }
}

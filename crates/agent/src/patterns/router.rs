//! Router pattern: one classification call, then delegation.
//!
//! ```text
//! User Query
//!       │
//!       ▼
//! ┌────────────┐
//! │   Router   │  ← asks the model which specialist fits
//! └──┬──────┬──┘
//!    │      │
//!    ▼      ▼
//! ┌──────┐ ┌──────┐
//! │ Math │ │ Rsch │  ← specialists, matched by name in the reply
//! └──────┘ └──────┘
//! ```
//!
//! The classification reply is matched against specialist names in
//! registration order, case-insensitively; the first hit wins. A reply
//! naming no specialist yields an `Unresolved` outcome and no specialist
//! runs. Nothing is shared between the router and the specialist beyond
//! the query text.

use std::sync::Arc;
use std::time::Duration;
use switchyard_config::{AppConfig, MatchPolicy};
use switchyard_core::error::{Error, ProviderError};
use switchyard_core::message::Message;
use switchyard_core::provider::{Provider, ProviderRequest};
use tracing::{debug, info, warn};

use crate::outcome::LoopOutcome;
use crate::prompt;
use crate::specialist::{Agent, Specialist};

/// The router's classification of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Name of the chosen specialist, as registered.
    Chosen(String),
    Unresolved,
}

impl RoutingDecision {
    pub fn chosen_agent(&self) -> Option<&str> {
        match self {
            RoutingDecision::Chosen(name) => Some(name),
            RoutingDecision::Unresolved => None,
        }
    }
}

/// Dispatches queries to registered specialists.
pub struct Router {
    /// LLM provider.
    provider: Arc<dyn Provider>,
    /// Model name.
    model: String,
    /// Temperature.
    temperature: f32,
    match_policy: MatchPolicy,
    model_timeout: Duration,
    /// Registered specialists, in registration order.
    specialists: Vec<Specialist>,
}

impl Router {
    /// Create a router with no specialists.
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.0,
            match_policy: MatchPolicy::default(),
            model_timeout: Duration::from_secs(60),
            specialists: Vec::new(),
        }
    }

    /// Build a router from the `[router]` section of the config.
    pub fn from_config(provider: Arc<dyn Provider>, config: &AppConfig) -> Self {
        Self::new(provider, config.model.clone())
            .with_temperature(config.router.temperature)
            .with_match_policy(config.router.match_policy)
            .with_model_timeout(Duration::from_secs(config.agent.model_timeout_secs))
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }

    /// Register a specialist. Names are unique, compared case-insensitively.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        agent: Arc<dyn Agent>,
    ) -> Result<(), Error> {
        let specialist = Specialist::new(name, description, agent);
        if self
            .specialists
            .iter()
            .any(|s| s.name.eq_ignore_ascii_case(&specialist.name))
        {
            return Err(Error::DuplicateSpecialist(specialist.name));
        }
        debug!(name = %specialist.name, "Specialist registered");
        self.specialists.push(specialist);
        Ok(())
    }

    /// Builder form of [`Router::register`].
    pub fn add_specialist(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        agent: Arc<dyn Agent>,
    ) -> Result<Self, Error> {
        self.register(name, description, agent)?;
        Ok(self)
    }

    pub fn specialists(&self) -> &[Specialist] {
        &self.specialists
    }

    /// Ask the model which specialist should handle `query`.
    ///
    /// With no specialists registered this is `Unresolved` without a
    /// model call.
    pub async fn classify(&self, query: &str) -> Result<RoutingDecision, Error> {
        if self.specialists.is_empty() {
            warn!("Router has no specialists registered");
            return Ok(RoutingDecision::Unresolved);
        }

        let entries: Vec<(&str, &str)> = self
            .specialists
            .iter()
            .map(|s| (s.name.as_str(), s.description.as_str()))
            .collect();
        let messages = vec![Message::user(prompt::router_prompt(&entries, query))];
        let request = ProviderRequest::new(&self.model, messages, self.temperature);

        let response = tokio::time::timeout(self.model_timeout, self.provider.complete(request))
            .await
            .map_err(|_| ProviderError::Timeout(self.model_timeout.as_secs()))??;

        let reply = response.content.trim();
        let decision = self.resolve(reply);
        info!(reply = %reply, decision = ?decision, "Router decided");
        Ok(decision)
    }

    /// Map a classification reply to a registered specialist.
    pub fn resolve(&self, reply: &str) -> RoutingDecision {
        self.specialists
            .iter()
            .find(|s| matches_name(reply, &s.name, self.match_policy))
            .map(|s| RoutingDecision::Chosen(s.name.clone()))
            .unwrap_or(RoutingDecision::Unresolved)
    }

    /// Run the chosen specialist on `query`.
    pub async fn dispatch(&self, decision: &RoutingDecision, query: &str) -> Result<LoopOutcome, Error> {
        let Some(name) = decision.chosen_agent() else {
            warn!("Router could not determine a specialist");
            return Ok(LoopOutcome::unresolved());
        };

        let Some(specialist) = self.specialists.iter().find(|s| s.name == name) else {
            warn!(name, "Routing decision names an unregistered specialist");
            return Ok(LoopOutcome::unresolved());
        };

        info!(specialist = name, "Dispatching query");
        specialist.agent.run(query).await
    }

    /// Classify, then dispatch.
    pub async fn route(&self, query: &str) -> Result<LoopOutcome, Error> {
        let decision = self.classify(query).await?;
        self.dispatch(&decision, query).await
    }
}

/// Whether `reply` names `name` under `policy`, ignoring case.
fn matches_name(reply: &str, name: &str, policy: MatchPolicy) -> bool {
    let reply = reply.to_lowercase();
    let name = name.to_lowercase();
    if name.is_empty() {
        return false;
    }
    match policy {
        MatchPolicy::Substring => reply.contains(&name),
        MatchPolicy::Token => reply.match_indices(&name).any(|(start, _)| {
            let before = reply[..start].chars().next_back();
            let after = reply[start + name.len()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        }),
    }
}

// ── Tests ──

//! A player whose decisions are made by another process.
//!
//! Every message is a [`Transmission`] POSTed as JSON to one endpoint. The
//! response to an action request holds the action; responses to
//! observations are ignored.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::action::Action;
use crate::game::*;
use crate::strategy::*;
use crate::wire::{self, ActionMessage, ActionRequest, Observation, Transmission};

/// Carries one request body to the remote player and brings back the
/// response body.
pub trait Transport {
    fn post(&mut self, body: &str) -> Result<String, StrategyError>;
}

pub struct HttpTransport {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> HttpTransport {
        HttpTransport {
            endpoint: endpoint.to_string(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Transport for HttpTransport {
    fn post(&mut self, body: &str) -> Result<String, StrategyError> {
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_string(body)
            .map_err(Box::new)?;
        Ok(response.into_string()?)
    }
}

pub struct RemoteStrategy<T = HttpTransport> {
    name: String,
    transport: T,
}

impl RemoteStrategy<HttpTransport> {
    pub fn http(name: &str, endpoint: &str) -> Self {
        RemoteStrategy::new(name, HttpTransport::new(endpoint))
    }
}

impl<T: Transport> RemoteStrategy<T> {
    pub fn new(name: &str, transport: T) -> Self {
        RemoteStrategy {
            name: name.to_string(),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn transmit(&mut self, transmission: &Transmission) -> Result<String, StrategyError> {
        let payload = serde_json::to_string(transmission).map_err(wire::WireError::from)?;
        debug!("Transmitting {}", payload);
        self.transport.post(&payload)
    }
}

pub fn action_request(view: &PlayerView<'_>) -> ActionRequest {
    let other_players_cards = view
        .other_hands
        .iter()
        .map(|(&player, hand)| (player, hand.to_vec()))
        .collect::<BTreeMap<_, _>>();
    ActionRequest {
        other_players_cards,
        my_card_count: view.hand_size,
        blue_tokens: view.information_tokens,
        red_tokens: view.error_tokens,
    }
}

impl<T: Transport> PlayerStrategy for RemoteStrategy<T> {
    fn name(&self) -> String {
        format!("remote({})", self.name)
    }

    fn decide(&mut self, view: &PlayerView<'_>) -> Result<Action, StrategyError> {
        let reply = self.transmit(&Transmission {
            action_request: Some(action_request(view)),
            observation: None,
        })?;
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(StrategyError::EmptyReply);
        }
        debug!("Unmarshaling: {}", reply);
        Ok(wire::decode_action(reply)?)
    }

    fn observe_action(&mut self, actor: Player, action: &Action) {
        let transmission = Transmission {
            action_request: None,
            observation: Some(Observation {
                actor,
                action: ActionMessage::from(action),
            }),
        };
        if let Err(err) = self.transmit(&transmission) {
            warn!("{} missed an observation: {}", self.name(), err);
        }
    }
}

//! Letta agent binding for deal extraction

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::http::{endpoint, ensure_success, read_json};
use shared::{process_debug, ProcessId};

use crate::error::OrchestratorResult;
use crate::traits::{DealExtractor, ExtractionRequest, ToolInvocation};

pub const LETTA_BASE_URL: &str = "https://api.letta.com/v1";
const COLLABORATOR: &str = "letta";

#[derive(Debug, Deserialize)]
struct MessagesReply {
    #[serde(default)]
    messages: Vec<AgentMessage>,
}

#[derive(Debug, Deserialize)]
struct AgentMessage {
    #[serde(default)]
    message_type: String,
    tool_call: Option<ToolCall>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    name: Option<String>,
    #[serde(default)]
    arguments: Value,
}

impl ToolCall {
    /// Arguments arrive as a JSON string, occasionally as an already-decoded object
    fn into_invocation(self) -> Option<ToolInvocation> {
        let name = self.name?;
        let arguments = match self.arguments {
            Value::String(raw) => raw,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        Some(ToolInvocation { name, arguments })
    }
}

/// Sends the captions payload to a configured Letta agent
pub struct LettaExtractor {
    client: reqwest::Client,
    token: String,
    agent_id: String,
    base_url: String,
}

impl LettaExtractor {
    pub fn new(client: reqwest::Client, token: String, agent_id: String) -> Self {
        Self {
            client,
            token,
            agent_id,
            base_url: LETTA_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Startup connectivity check against the agent record
    pub async fn verify_agent(&self) -> OrchestratorResult<()> {
        let sent = self
            .client
            .get(endpoint(&self.base_url, &format!("agents/{}", self.agent_id)))
            .bearer_auth(&self.token)
            .send()
            .await;
        ensure_success(COLLABORATOR, sent).await?;
        process_debug!(ProcessId::current(), agent_id = %self.agent_id, "Letta agent reachable");
        Ok(())
    }
}

#[async_trait]
impl DealExtractor for LettaExtractor {
    async fn extract(&self, request: &ExtractionRequest) -> OrchestratorResult<Vec<ToolInvocation>> {
        let body = json!({
            "messages": [
                {"role": "system", "content": request.system_prompt},
                {"role": "user", "content": request.payload},
            ]
        });

        let sent = self
            .client
            .post(endpoint(&self.base_url, &format!("agents/{}/messages", self.agent_id)))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await;
        let response = ensure_success(COLLABORATOR, sent).await?;
        let reply: MessagesReply = read_json(COLLABORATOR, response).await?;

        Ok(reply
            .messages
            .into_iter()
            .filter(|message| message.message_type == "tool_call_message")
            .filter_map(|message| message.tool_call)
            .filter_map(ToolCall::into_invocation)
            .collect())
    }
}

use crate::app::planner::MeetingPlanner;
use crate::domain::model::ParticipantRequest;
use crate::domain::purpose::Purpose;
use crate::utils::error::MeetError;
use serde::Deserialize;
use serde_json::{json, Value};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const TOOL_NAME: &str = "recommend_meeting_place";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug)]
struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<MeetError> for RpcError {
    fn from(e: MeetError) -> Self {
        let code = match e {
            MeetError::InvalidInput { .. } | MeetError::UnresolvedAddress { .. } => INVALID_PARAMS,
            _ => INTERNAL_ERROR,
        };
        Self::new(code, e.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: RecommendArguments,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendArguments {
    #[serde(default)]
    participants: Vec<ParticipantArgument>,
    purpose: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ParticipantArgument {
    name: String,
    origin_text: String,
}

/// JSON-RPC 2.0 分派：initialize、tools/list、tools/call
#[derive(Clone)]
pub struct RpcHandler {
    planner: MeetingPlanner,
}

impl RpcHandler {
    pub fn new(planner: MeetingPlanner) -> Self {
        Self { planner }
    }

    /// 處理一行原始文字；無法解析的 JSON 回傳 -32700
    pub async fn handle_line(&self, line: &str) -> Value {
        match serde_json::from_str::<Value>(line) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => error_response(
                Value::Null,
                RpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
            ),
        }
    }

    pub async fn handle_request(&self, request: Value) -> Value {
        let id = request.get("id").cloned().unwrap_or(Value::Null);

        if request.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            return error_response(
                id,
                RpcError::new(INVALID_REQUEST, "Invalid Request: jsonrpc must be '2.0'"),
            );
        }
        let method = match request.get("method").and_then(Value::as_str) {
            Some(method) if !method.is_empty() => method,
            _ => {
                return error_response(
                    id,
                    RpcError::new(INVALID_REQUEST, "Invalid Request: method is required"),
                )
            }
        };
        let params = request.get("params").cloned().unwrap_or_else(|| json!({}));

        tracing::debug!("RPC request: {}", method);

        let outcome = match method {
            "initialize" => Ok(initialize_result()),
            "tools/list" => Ok(tools_list_result()),
            "tools/call" => self.call_tool(params).await,
            other => Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        };

        match outcome {
            Ok(result) => json!({ "jsonrpc": "2.0", "result": result, "id": id }),
            Err(e) => {
                tracing::warn!("RPC {} failed: {} ({})", method, e.message, e.code);
                error_response(id, e)
            }
        }
    }

    async fn call_tool(&self, params: Value) -> Result<Value, RpcError> {
        let params: ToolCallParams = serde_json::from_value(params)
            .map_err(|e| RpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e)))?;

        if params.name != TOOL_NAME {
            return Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("Unknown tool: {}", params.name),
            ));
        }

        let requests: Vec<ParticipantRequest> = params
            .arguments
            .participants
            .into_iter()
            .map(|p| ParticipantRequest::from_text(p.name, p.origin_text))
            .collect();
        let purpose = params
            .arguments
            .purpose
            .unwrap_or_else(|| Purpose::default().tag().to_string());

        let report = self.planner.plan(&requests, &purpose).await?;
        let text = serde_json::to_string_pretty(&report).map_err(MeetError::from)?;

        Ok(json!({
            "content": [{ "type": "text", "text": text }]
        }))
    }
}

fn error_response(id: Value, error: RpcError) -> Value {
    json!({
        "jsonrpc": "2.0",
        "error": { "code": error.code, "message": error.message },
        "id": id
    })
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "serverInfo": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        },
        "capabilities": {
            "tools": { "listChanged": false }
        }
    })
}

fn tools_list_result() -> Value {
    let purposes: Vec<&str> = Purpose::KNOWN.iter().map(|p| p.tag()).collect();
    json!({
        "tools": [{
            "name": TOOL_NAME,
            "description": "Recommend fair meeting places from each participant's starting point and the purpose of the meeting.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "participants": {
                        "type": "array",
                        "description": "Participants, each with a name and a starting point",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": { "type": "string", "description": "Participant name" },
                                "origin_text": {
                                    "type": "string",
                                    "description": "Starting point, e.g. Gangnam Station"
                                }
                            },
                            "required": ["name", "origin_text"]
                        },
                        "minItems": 2
                    },
                    "purpose": {
                        "type": "string",
                        "description": "Purpose of the meeting",
                        "enum": purposes,
                        "default": Purpose::default().tag()
                    }
                },
                "required": ["participants"]
            }
        }]
    })
}

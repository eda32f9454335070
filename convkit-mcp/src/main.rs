//! convkit MCP Server
//!
//! Line-delimited JSON-RPC 2.0 over stdio, MCP spec 2025-11-25.
//! Logs go to stderr; stdout carries protocol messages only.
//!
//! Tools:
//! - convert: Convert an amount within any category
//! - convert_currency / convert_length / convert_speed: per-category shortcuts
//! - list_units: Categories, their units and default (from, to) pair

mod config;

use std::io::{self, BufRead, Write};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use convkit_core::{Category, ConvertError};
use convkit_units::{ConversionRequest, REGISTRY};
use crate::config::ServerConfig;

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "convkit";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const INVALID_PARAMS: i32 = -32602;
const METHOD_NOT_FOUND: i32 = -32601;
const PARSE_ERROR: i32 = -32700;

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn invalid_params(message: impl Into<String>) -> Self {
        Self { code: INVALID_PARAMS, message: message.into(), data: None }
    }
}

impl From<ConvertError> for McpError {
    fn from(e: ConvertError) -> Self {
        McpError {
            code: INVALID_PARAMS,
            message: e.to_string(),
            data: Some(json!({ "code": e.code(), "suggestion": e.suggestion() })),
        }
    }
}

impl McpResponse {
    fn new(id: Option<JsonValue>, result: Result<JsonValue, McpError>) -> Self {
        match result {
            Ok(r) => McpResponse { jsonrpc: "2.0".to_string(), id, result: Some(r), error: None },
            Err(e) => McpResponse { jsonrpc: "2.0".to_string(), id, result: None, error: Some(e) },
        }
    }
}

fn init_logging(config: &ServerConfig) {
    let filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let config = ServerConfig::from_env();
    init_logging(&config);

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "convkit MCP server started");
    info!(strict_units = config.strict_units, "configuration loaded");

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                debug!(bytes = line.len(), "received request");

                let Some(response) = handle_line(&config, line) else {
                    continue;
                };

                let response_json = match serde_json::to_string(&response) {
                    Ok(s) => s,
                    Err(e) => {
                        error!(error = %e, "failed to serialize response");
                        continue;
                    }
                };
                let mut stdout = io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", response_json).and_then(|_| stdout.flush()) {
                    error!(error = %e, "failed to write response");
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "failed to read input");
                break;
            }
        }
    }

    info!("server shutting down");
}

/// Handle one input line; `None` when no response is due (notifications)
fn handle_line(config: &ServerConfig, line: &str) -> Option<McpResponse> {
    let request: McpRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "unparseable request");
            return Some(McpResponse::new(None, Err(McpError {
                code: PARSE_ERROR,
                message: format!("Parse error: {}", e),
                data: None,
            })));
        }
    };

    debug!(method = %request.method, "processing");
    let response = handle_request(config, &request);

    // Notifications (no id) should NOT receive a response
    if request.id.is_none() {
        debug!(method = %request.method, "notification processed");
        return None;
    }
    Some(response)
}

fn handle_request(config: &ServerConfig, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        "initialize" => handle_initialize(&request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(config, &request.params),
        _ => Err(McpError {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    McpResponse::new(request.id.clone(), result)
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Currency, length and speed unit conversion"
        },
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "instructions": "Use 'list_units' to see the available categories and units, then 'convert'. Amounts are text: an empty amount gives no result, non-numeric text counts as 0. Rates are fixed, not live."
    }))
}

fn unit_args_schema(category: Category) -> JsonValue {
    let (from, to) = category.default_pair();
    json!({
        "amount": { "type": "string", "description": "Amount as typed; empty gives no result" },
        "from": { "type": "string", "enum": category.units(), "default": from },
        "to": { "type": "string", "enum": category.units(), "default": to }
    })
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
    Ok(json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert an amount between two units of one category. Units default to the category's first two units.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string", "enum": categories },
                        "amount": { "type": "string" },
                        "from": { "type": "string" },
                        "to": { "type": "string" }
                    },
                    "required": ["category", "amount"]
                }
            },
            {
                "name": "convert_currency",
                "description": "Convert between IDR, USD, EUR and JPY at fixed rates (4 decimals)",
                "inputSchema": {
                    "type": "object",
                    "properties": unit_args_schema(Category::Currency),
                    "required": ["amount"]
                }
            },
            {
                "name": "convert_length",
                "description": "Convert between mm, cm, m and km (scientific notation outside 0.01..1000)",
                "inputSchema": {
                    "type": "object",
                    "properties": unit_args_schema(Category::Length),
                    "required": ["amount"]
                }
            },
            {
                "name": "convert_speed",
                "description": "Convert between km/h and mp/h (2 decimals)",
                "inputSchema": {
                    "type": "object",
                    "properties": unit_args_schema(Category::Speed),
                    "required": ["amount"]
                }
            },
            {
                "name": "list_units",
                "description": "List categories with their units and default (from, to) pair",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string", "enum": categories }
                    }
                }
            }
        ]
    }))
}

fn handle_tool_call(config: &ServerConfig, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match name {
        "convert" => {
            let category = category_arg(&args)?
                .ok_or_else(|| McpError::invalid_params("Missing category argument"))?;
            tool_convert(config, category, &args)
        }
        "convert_currency" => tool_convert(config, Category::Currency, &args),
        "convert_length" => tool_convert(config, Category::Length, &args),
        "convert_speed" => tool_convert(config, Category::Speed, &args),
        "list_units" => tool_list_units(&args),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

fn category_arg(args: &JsonValue) -> Result<Option<Category>, McpError> {
    match args.get("category").and_then(|v| v.as_str()) {
        Some(s) => Ok(Some(s.parse::<Category>()?)),
        None => Ok(None),
    }
}

fn tool_convert(config: &ServerConfig, category: Category, args: &JsonValue) -> Result<JsonValue, McpError> {
    // Numbers are accepted too and read as their decimal text
    let amount = match args.get("amount") {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Number(n)) => n.to_string(),
        Some(JsonValue::Null) | None => String::new(),
        Some(other) => {
            return Err(McpError::invalid_params(format!("amount must be text, got {}", other)));
        }
    };

    let (default_from, default_to) = category.default_pair();
    let from = args.get("from").and_then(|v| v.as_str()).unwrap_or(default_from);
    let to = args.get("to").and_then(|v| v.as_str()).unwrap_or(default_to);

    let request = ConversionRequest::new(category, amount, from, to);
    if config.strict_units {
        request.validate()?;
    } else if let Err(e) = request.validate() {
        debug!(error = %e, "unit outside category, neutral rate applies");
    }

    Ok(match request.execute() {
        Some(result) => json!({
            "content": [{ "type": "text", "text": format!("{} {} = {} {}", request.amount, from, result.text, to) }],
            "result": result.text,
            "isError": false
        }),
        None => json!({
            "content": [{ "type": "text", "text": "No amount entered; nothing to convert." }],
            "result": JsonValue::Null,
            "isError": false
        }),
    })
}

fn tool_list_units(args: &JsonValue) -> Result<JsonValue, McpError> {
    let selected = category_arg(args)?;

    let categories: Vec<JsonValue> = REGISTRY.all()
        .filter(|spec| selected.map_or(true, |c| c == spec.category))
        .map(|spec| {
            let (from, to) = spec.default_pair();
            json!({
                "category": spec.category,
                "name": spec.category.name(),
                "units": spec.units(),
                "defaultFrom": from,
                "defaultTo": to,
                "format": spec.format,
            })
        })
        .collect();

    let text = categories.iter()
        .map(|c| format!("{}: {}", c["name"].as_str().unwrap_or_default(), c["units"]))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "categories": categories,
        "isError": false
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(config: &ServerConfig, tool: &str, args: JsonValue) -> Result<JsonValue, McpError> {
        handle_tool_call(config, &Some(json!({ "name": tool, "arguments": args })))
    }

    #[test]
    fn test_convert_tools() {
        let config = ServerConfig::default();
        let r = call(&config, "convert_speed", json!({"amount": "100", "from": "km/h", "to": "mp/h"})).unwrap();
        assert_eq!(r["result"], "62.14");
        assert_eq!(r["content"][0]["text"], "100 km/h = 62.14 mp/h");

        let r = call(&config, "convert", json!({"category": "length", "amount": "1", "from": "km", "to": "mm"})).unwrap();
        assert_eq!(r["result"], "1.000000e+06");
    }

    #[test]
    fn test_default_units() {
        let config = ServerConfig::default();
        let r = call(&config, "convert_currency", json!({"amount": "1000000"})).unwrap();
        assert_eq!(r["result"], "64.0000");
    }

    #[test]
    fn test_numeric_amount_accepted() {
        let config = ServerConfig::default();
        let r = call(&config, "convert_length", json!({"amount": 5, "from": "cm", "to": "m"})).unwrap();
        assert_eq!(r["result"], "0.0500");
    }

    #[test]
    fn test_empty_amount_has_null_result() {
        let config = ServerConfig::default();
        let r = call(&config, "convert_speed", json!({"amount": ""})).unwrap();
        assert!(r["result"].is_null());
        assert_eq!(r["isError"], false);
    }

    #[test]
    fn test_unknown_category() {
        let config = ServerConfig::default();
        let err = call(&config, "convert", json!({"category": "mass", "amount": "1"})).unwrap_err();
        assert_eq!(err.code, INVALID_PARAMS);
        assert_eq!(err.data.unwrap()["code"], "UNKNOWN_CATEGORY");
    }

    #[test]
    fn test_strict_units() {
        let lenient = ServerConfig::default();
        let r = call(&lenient, "convert_currency", json!({"amount": "5", "from": "GBP", "to": "IDR"})).unwrap();
        assert_eq!(r["result"], "5.0000");

        let strict = ServerConfig { strict_units: true, ..ServerConfig::default() };
        let err = call(&strict, "convert_currency", json!({"amount": "5", "from": "GBP", "to": "IDR"})).unwrap_err();
        assert_eq!(err.data.unwrap()["code"], "UNIT_NOT_IN_CATEGORY");
    }

    #[test]
    fn test_list_units() {
        let r = tool_list_units(&json!({})).unwrap();
        assert_eq!(r["categories"].as_array().unwrap().len(), 3);
        assert_eq!(r["categories"][0]["name"], "Currency");

        let r = tool_list_units(&json!({"category": "speed"})).unwrap();
        let cats = r["categories"].as_array().unwrap();
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0]["units"], json!(["km/h", "mp/h"]));
        assert_eq!(cats[0]["defaultFrom"], "km/h");
    }

    #[test]
    fn test_unknown_tool_and_method() {
        let config = ServerConfig::default();
        let err = call(&config, "eval", json!({})).unwrap_err();
        assert_eq!(err.code, INVALID_PARAMS);

        let response = handle_line(&config, r#"{"jsonrpc":"2.0","id":1,"method":"nope"}"#).unwrap();
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[test]
    fn test_notifications_get_no_response() {
        let config = ServerConfig::default();
        assert!(handle_line(&config, r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).is_none());
    }

    #[test]
    fn test_parse_error() {
        let config = ServerConfig::default();
        let response = handle_line(&config, "{not json").unwrap();
        assert_eq!(response.error.unwrap().code, PARSE_ERROR);
        assert!(response.id.is_none());
    }

    #[test]
    fn test_initialize_echoes_protocol() {
        let r = handle_initialize(&Some(json!({"protocolVersion": "2024-11-05", "clientInfo": {"name": "t"}}))).unwrap();
        assert_eq!(r["protocolVersion"], "2024-11-05");
        assert_eq!(r["serverInfo"]["name"], SERVER_NAME);
    }
}

use serde_json::{json, Value};
use crate::config::constants::VALID_ISSUE_TYPES;

/// OpenAPI 3 description of the HTTP API, served at `/api-docs`.
pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Sonar Issue Analyzer API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "API that analyzes Sonar issues using an Ollama model"
        },
        "servers": [{ "url": "/", "description": "This server" }],
        "paths": {
            "/api/analyze": { "post": analyze_operation() },
            "/api/results.zip": { "get": archive_operation() },
            "/api/health": {
                "get": {
                    "summary": "Liveness check",
                    "responses": { "200": { "description": "Service is up" } }
                }
            }
        },
        "components": { "schemas": schemas() }
    })
}

fn analyze_operation() -> Value {
    let events = json!({ "schema": { "$ref": "#/components/schemas/ProgressEvent" } });
    let summary = json!({ "schema": { "$ref": "#/components/schemas/AnalysisResult" } });

    json!({
        "summary": "Analyze the unresolved issues of a Sonar project",
        "parameters": [{
            "name": "stream",
            "in": "query",
            "required": false,
            "schema": { "type": "boolean", "default": true },
            "description": "Stream progress as server-sent events; false returns one JSON summary"
        }],
        "requestBody": {
            "required": true,
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/AnalyzeRequest" } } }
        },
        "responses": {
            "200": {
                "description": "Progress events (started, progress, issueProcessed, error, complete) or the final summary",
                "content": { "text/event-stream": events, "application/json": summary }
            },
            "400": error_response("Missing or unusable project or issue key"),
            "404": error_response("Requested issue not found"),
            "500": error_response("Results could not be written"),
            "502": error_response("Sonar or Ollama request failed")
        }
    })
}

fn archive_operation() -> Value {
    json!({
        "summary": "Download every stored report as a zip archive",
        "responses": {
            "200": {
                "description": "Archive rooted at results/",
                "content": { "application/zip": { "schema": { "type": "string", "format": "binary" } } }
            },
            "404": { "description": "Results directory not found" },
            "500": { "description": "Error creating zip file" }
        }
    })
}

fn schemas() -> Value {
    let issue_types = json!({
        "oneOf": [
            { "type": "string", "description": "Comma-separated issue types" },
            { "type": "array", "items": { "type": "string", "enum": VALID_ISSUE_TYPES } }
        ]
    });
    let issue_error = json!({
        "type": "object",
        "properties": { "issueKey": { "type": "string" }, "error": { "type": "string" } }
    });

    json!({
        "AnalyzeRequest": {
            "type": "object",
            "required": ["projectKey"],
            "properties": {
                "projectKey": { "type": "string", "description": "Sonar project key" },
                "issueKey": { "type": "string", "description": "Only analyze this issue key" },
                "issueTypes": issue_types
            }
        },
        "AnalysisResult": {
            "type": "object",
            "properties": {
                "totalIssues": { "type": "integer" },
                "analyzedIssues": { "type": "integer" },
                "errors": { "type": "array", "items": issue_error },
                "message": { "type": "string" }
            }
        },
        "ProgressEvent": {
            "type": "object",
            "required": ["type"],
            "properties": {
                "type": { "type": "string", "enum": ["started", "progress", "issueProcessed", "error", "complete"] }
            }
        },
        "Error": {
            "type": "object",
            "properties": { "error": { "type": "string" }, "details": { "type": "string" } }
        }
    })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
    })
}

//! WAAPI HTTP Client
//!
//! Client for the Wwise Authoring API over its HTTP endpoint
//! (`POST /waapi`, default port 8080). Each call is a single blocking round
//! trip carrying a `{uri, args, options}` JSON body.
//!
//! # Requirements
//!
//! - Wwise must be running with the WAAPI HTTP server enabled
//!   (Project Settings → Wwise Authoring API)
//!
//! # Example
//!
//! ```rust,ignore
//! let client = WaapiClient::connect(DEFAULT_WAAPI_URL)?;
//! let info = client.project_info()?;
//! println!("connected to {}", info.name);
//! ```

use crate::waapi::objects::{AssignmentEntry, ObjectId, ProjectInfo, WwiseObject};
use crate::waapi::{SwitchContainerOps, WaapiError};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error};

/// Default WAAPI HTTP endpoint
pub const DEFAULT_WAAPI_URL: &str = "http://127.0.0.1:8080/waapi";

/// Object fields requested from every WAQL query.
const RETURN_FIELDS: [&str; 4] = ["id", "name", "type", "path"];

/// Blocking WAAPI client over HTTP
#[derive(Debug, Clone)]
pub struct WaapiClient {
    /// Full URL of the WAAPI HTTP endpoint
    url: String,
    /// HTTP client
    http: reqwest::blocking::Client,
}

impl WaapiClient {
    /// Connect to a WAAPI endpoint and verify the session with
    /// `ak.wwise.core.getInfo`.
    pub fn connect(url: &str) -> Result<Self, WaapiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| WaapiError::Connection(e.to_string()))?;
        let client = Self {
            url: url.trim_end_matches('/').to_string(),
            http,
        };
        client.call("ak.wwise.core.getInfo", json!({}), json!({}))?;
        debug!(url = %client.url, "WAAPI session verified");
        Ok(client)
    }

    /// Get the endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Perform one WAAPI call.
    fn call(&self, uri: &str, args: Value, options: Value) -> Result<Value, WaapiError> {
        let body = json!({
            "uri": uri,
            "args": args,
            "options": options,
        });

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    WaapiError::Timeout
                } else if e.is_connect() {
                    WaapiError::Connection(format!("Connection failed: {}", e))
                } else {
                    WaapiError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(WaapiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .map_err(|e| WaapiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    /// Fetch project information (`ak.wwise.core.getProjectInfo`).
    pub fn project_info(&self) -> Result<ProjectInfo, WaapiError> {
        let result = self.call("ak.wwise.core.getProjectInfo", json!({}), json!({}))?;
        serde_json::from_value(result)
            .map_err(|e| WaapiError::InvalidResponse(format!("Bad project info: {}", e)))
    }

    /// Run a WAQL query and return the matched objects
    /// (`ak.wwise.core.object.get`).
    pub fn query_waql(&self, waql: &str) -> Result<Vec<WwiseObject>, WaapiError> {
        let result = self.call(
            "ak.wwise.core.object.get",
            json!({ "waql": waql }),
            json!({ "return": RETURN_FIELDS }),
        )?;
        let objects = result
            .get("return")
            .cloned()
            .ok_or_else(|| WaapiError::InvalidResponse("No return field in result".to_string()))?;
        serde_json::from_value(objects)
            .map_err(|e| WaapiError::InvalidResponse(format!("Bad object list: {}", e)))
    }

    /// Read recorded assignments of a switch container
    /// (`ak.wwise.core.switchContainer.getAssignments`).
    pub fn container_assignments(
        &self,
        container: &ObjectId,
    ) -> Result<Vec<AssignmentEntry>, WaapiError> {
        let result = self.call(
            "ak.wwise.core.switchContainer.getAssignments",
            json!({ "id": container.as_str() }),
            json!({}),
        )?;
        let entries = result
            .get("return")
            .cloned()
            .ok_or_else(|| WaapiError::InvalidResponse("No return field in result".to_string()))?;
        serde_json::from_value(entries)
            .map_err(|e| WaapiError::InvalidResponse(format!("Bad assignment list: {}", e)))
    }

    /// Record an assignment (`ak.wwise.core.switchContainer.addAssignment`).
    /// WAAPI answers an empty object on success.
    pub fn add_assignment(&self, child: &ObjectId, switch: &ObjectId) -> Result<(), WaapiError> {
        self.call(
            "ak.wwise.core.switchContainer.addAssignment",
            json!({ "child": child.as_str(), "stateOrSwitch": switch.as_str() }),
            json!({}),
        )?;
        Ok(())
    }

    /// Remove an assignment (`ak.wwise.core.switchContainer.removeAssignment`).
    pub fn remove_assignment(&self, child: &ObjectId, switch: &ObjectId) -> Result<(), WaapiError> {
        self.call(
            "ak.wwise.core.switchContainer.removeAssignment",
            json!({ "child": child.as_str(), "stateOrSwitch": switch.as_str() }),
            json!({}),
        )?;
        Ok(())
    }
}

impl SwitchContainerOps for WaapiClient {
    fn resolve_switch_group(&mut self, container: &WwiseObject) -> Option<WwiseObject> {
        let waql = format!(
            "from object \"{}\" select @SwitchGroupOrStateGroup",
            container.id
        );
        match self.query_waql(&waql) {
            Ok(mut objects) if !objects.is_empty() => Some(objects.remove(0)),
            Ok(_) => None,
            Err(e) => {
                error!(container = %container.name, error = %e, "Switch group query failed");
                None
            }
        }
    }

    fn list_children(&mut self, container: &WwiseObject) -> Vec<WwiseObject> {
        let waql = format!("from object \"{}\" select children", container.id);
        self.query_waql(&waql).unwrap_or_else(|e| {
            error!(container = %container.name, error = %e, "Children query failed");
            Vec::new()
        })
    }

    fn list_switches(&mut self, switch_group: &WwiseObject) -> Vec<WwiseObject> {
        let waql = format!("from object \"{}\" select children", switch_group.id);
        self.query_waql(&waql).unwrap_or_else(|e| {
            error!(switch_group = %switch_group.name, error = %e, "Switch query failed");
            Vec::new()
        })
    }

    fn existing_assignments(&mut self, container: &WwiseObject) -> Vec<AssignmentEntry> {
        self.container_assignments(&container.id).unwrap_or_else(|e| {
            error!(container = %container.name, error = %e, "Assignment query failed");
            Vec::new()
        })
    }

    fn write_assignment(&mut self, child: &ObjectId, switch: &ObjectId) -> bool {
        match self.add_assignment(child, switch) {
            Ok(()) => true,
            Err(e) => {
                error!(child = %child, switch = %switch, error = %e, "Assignment write failed");
                false
            }
        }
    }

    fn delete_assignment(&mut self, child: &ObjectId, switch: &ObjectId) -> bool {
        match self.remove_assignment(child, switch) {
            Ok(()) => true,
            Err(e) => {
                error!(child = %child, switch = %switch, error = %e, "Assignment delete failed");
                false
            }
        }
    }
}

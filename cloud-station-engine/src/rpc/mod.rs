//! JSON-RPC 2.0 communication layer for host page integration.
//!
//! Implements bidirectional messaging between the Bevy engine and its host page via
//! iframe postMessage, supporting both request-response and notification patterns.
//!
//! ## Architecture
//!
//! The RPC system uses standard JSON-RPC 2.0 protocol with:
//! - **Requests**: Expect responses with matching IDs
//! - **Notifications**: One-way messages without responses
//! - **Responses**: Reply to requests with results or errors
//!
//! ## Message Flow
//!
//! ```text
//! Host (Parent Window)   <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Adding New RPC Methods
//!
//! Requests only ever write engine events; the engine systems stay the single
//! owner of the interaction state.
//!
//! ### 1. Define Request Handler
//!
//! Add a new method case in `handle_rpc_request()`:
//!
//! ```rust,ignore
//! fn handle_rpc_request(request: &RpcRequest, ctx: &mut RpcContext) -> Option<RpcResponse> {
//!     let result = match request.method.as_str() {
//!         "your_method_name" => handle_your_method(&request.params, ctx),
//!         // ... existing methods
//!         _ => return Some(create_error_response(id, -32601, "Method not found", None)),
//!     };
//!     // ... response creation
//! }
//! ```
//!
//! ### 2. Implement Handler Function
//!
//! ```rust,ignore
//! fn handle_your_method(
//!     params: &Value,
//!     ctx: &mut RpcContext, // add any resource or event writer the method needs here
//! ) -> Result<Value, RpcError> {
//!     // Deserialize parameters
//!     #[derive(Deserialize)]
//!     struct YourParams {
//!         field: String,
//!     }
//!
//!     let parsed = serde_json::from_value::<YourParams>(params.clone())
//!         .map_err(|_| RpcError::invalid_params("Expected 'field' parameter"))?;
//!
//!     // Act through the engine's events, never by mutating state directly
//!
//!     // Return success response
//!     Ok(json!({
//!         "success": true,
//!         "result": parsed.field
//!     }))
//! }
//! ```
//!
//! ### 3. Call From The Host Page
//!
//! ```typescript
//! // Request-response pattern
//! const response = await window.postMessage({
//!   jsonrpc: "2.0",
//!   method: "select_hill",
//!   params: { hill: "hill2" },
//!   id: 1
//! }, "*");
//!
//! // Notification pattern (no response expected)
//! window.postMessage({
//!   jsonrpc: "2.0",
//!   method: "toggle_sound",
//!   params: {}
//! }, "*");
//! ```
//!
//! ## Sending Notifications from Bevy
//!
//! Use `WebRpcInterface::send_notification()` to push updates to the host page:
//!
//! ```rust,ignore
//! fn your_system(mut rpc: ResMut<WebRpcInterface>) {
//!     rpc.send_notification("sound_changed", json!({
//!         "enabled": true
//!     }));
//! }
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//!
//! ## Existing Methods
//!
//! ### Hill Tour
//! - `select_hill`: Select a hill by key (`"hill2"`), node name (`"hill_2"`) or number;
//!   answers `accepted: false` while a fish is leaving or the hill is already in view
//! - `next_hill`: Advance to the next hill in the ring (only while "next" is shown)
//! - `exit_zoom`: Send the fish away and return the camera home
//! - `get_interaction_state`: Current flags plus the derived sequence phase
//!
//! ### Overlays
//! - `toggle_sound`: Flip and persist the sound preference
//! - `dismiss_instructions`: Close the navigation instruction card
//! - `navigate_home`: Switch to the home route
//!
//! ## Notifications
//!
//! - `loading_complete`: Scene ready, loading overlay may hide
//! - `interaction_state_changed`: Same payload as `get_interaction_state`
//! - `tutorial_bubble_position`: Screen position of the "Click on a hill" hint
//! - `sound_changed`: Sound preference after a toggle
//! - `route_changed`: Route the music follows, for host navigation
//! - `instructions_changed`: Instruction card visibility and wording

/// JSON-RPC 2.0 bidirectional communication system for host page integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;

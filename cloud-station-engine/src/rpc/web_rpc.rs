use crate::audio::music::CurrentRoute;
use crate::audio::preference::{SoundPreference, SoundToggleRequested};
use crate::engine::assets::scene_positions::WaypointTable;
use crate::engine::core::app_state::AppState;
use crate::engine::systems::tutorial_bubble::TutorialBubble;
use crate::interaction::events::{
    ExitZoomRequested, HillSelected, NextHillRequested, SelectionSource,
};
use crate::interaction::state::InteractionState;
use crate::interaction::waypoint::HillKey;
use crate::ui::state::{DismissInstructionsRequested, NavigateHomeRequested, OverlayState};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the host page.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(OnEnter(AppState::Running), notify_loading_complete)
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    notify_state_changes,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue filled by the browser callback.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, host bridge disabled");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Keep the callback alive for the lifetime of the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Everything the request handlers read or trigger.
#[derive(SystemParam)]
struct RpcContext<'w> {
    state: Res<'w, InteractionState>,
    waypoints: Option<Res<'w, WaypointTable>>,
    preference: Res<'w, SoundPreference>,
    selections: EventWriter<'w, HillSelected>,
    next_requests: EventWriter<'w, NextHillRequested>,
    exit_requests: EventWriter<'w, ExitZoomRequested>,
    sound_toggles: EventWriter<'w, SoundToggleRequested>,
    dismissals: EventWriter<'w, DismissInstructionsRequested>,
    home_requests: EventWriter<'w, NavigateHomeRequested>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut ctx: RpcContext,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &mut ctx) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Unparseable RPC message: {}", parse_error);
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
///
/// Requests without an id are notifications: they still act, but get no reply.
fn handle_rpc_request(request: &RpcRequest, ctx: &mut RpcContext) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "select_hill" => handle_select_hill(&request.params, ctx),
        "next_hill" => handle_next_hill(ctx),
        "exit_zoom" => handle_exit_zoom(ctx),
        "toggle_sound" => handle_toggle_sound(ctx),
        "get_interaction_state" => handle_get_interaction_state(&ctx.state),
        "dismiss_instructions" => {
            ctx.dismissals.write(DismissInstructionsRequested);
            Ok(serde_json::json!({ "success": true }))
        }
        "navigate_home" => {
            ctx.home_requests.write(NavigateHomeRequested);
            Ok(serde_json::json!({ "success": true }))
        }
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                request.id.clone()?,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// `hill` may be a waypoint key (`"hill2"`), a node name (`"hill_2"`) or a number.
fn parse_hill(params: &serde_json::Value) -> Result<HillKey, RpcError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum HillParam {
        Number(u8),
        Name(String),
    }

    #[derive(Deserialize)]
    struct SelectHillParams {
        hill: HillParam,
    }

    let parsed = serde_json::from_value::<SelectHillParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'hill' parameter"))?;

    match parsed.hill {
        HillParam::Number(number) => HillKey::from_number(number),
        HillParam::Name(name) => {
            HillKey::from_waypoint_key(&name).or_else(|| HillKey::from_node_name(&name))
        }
    }
    .ok_or_else(|| RpcError::invalid_params("Unknown hill"))
}

fn handle_select_hill(
    params: &serde_json::Value,
    ctx: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    let hill = parse_hill(params)?;

    let waypoints = ctx
        .waypoints
        .as_deref()
        .ok_or_else(|| RpcError::internal_error("Scene positions not loaded"))?;
    waypoints
        .hill(hill)
        .map_err(|err| RpcError::invalid_params(&err.to_string()))?;

    // Mirrors the sequencer: no selection while a fish leaves, and the hill
    // already in view stays as it is.
    let state = &ctx.state;
    let accepted = !state.is_exiting && !(state.is_zoom_mode && state.current_hill == Some(hill));
    if accepted {
        ctx.selections.write(HillSelected {
            hill,
            source: SelectionSource::Rpc,
        });
        info!("Hill selection dispatched from host: {}", hill);
    }

    Ok(serde_json::json!({
        "accepted": accepted,
        "hill": hill
    }))
}

fn handle_next_hill(ctx: &mut RpcContext) -> Result<serde_json::Value, RpcError> {
    let accepted = ctx.state.show_next;
    if accepted {
        ctx.next_requests.write(NextHillRequested);
    }
    Ok(serde_json::json!({ "accepted": accepted }))
}

fn handle_exit_zoom(ctx: &mut RpcContext) -> Result<serde_json::Value, RpcError> {
    let accepted = ctx.state.is_zoom_mode && !ctx.state.is_exiting;
    if accepted {
        ctx.exit_requests.write(ExitZoomRequested);
    }
    Ok(serde_json::json!({ "accepted": accepted }))
}

fn handle_toggle_sound(ctx: &mut RpcContext) -> Result<serde_json::Value, RpcError> {
    ctx.sound_toggles.write(SoundToggleRequested);
    Ok(serde_json::json!({ "sound_enabled": !ctx.preference.enabled }))
}

fn interaction_state_json(state: &InteractionState) -> Result<serde_json::Value, RpcError> {
    let mut value = serde_json::to_value(state)
        .map_err(|e| RpcError::internal_error(&format!("State serialisation failed: {}", e)))?;
    if let Some(fields) = value.as_object_mut() {
        fields.insert("phase".to_string(), serde_json::json!(state.phase()));
    }
    Ok(value)
}

fn handle_get_interaction_state(state: &InteractionState) -> Result<serde_json::Value, RpcError> {
    interaction_state_json(state)
}

fn notify_loading_complete(mut rpc_interface: ResMut<WebRpcInterface>) {
    rpc_interface.send_notification("loading_complete", serde_json::json!({}));
}

/// Push every overlay-relevant change to the host page.
fn notify_state_changes(
    mut rpc_interface: ResMut<WebRpcInterface>,
    state: Res<InteractionState>,
    bubble: Option<Res<TutorialBubble>>,
    preference: Res<SoundPreference>,
    route: Res<CurrentRoute>,
    overlay: Res<OverlayState>,
) {
    if state.is_changed() {
        match interaction_state_json(&state) {
            Ok(params) => rpc_interface.send_notification("interaction_state_changed", params),
            Err(err) => error!("{}", err.message),
        }
    }

    if let Some(bubble) = bubble.filter(|bubble| bubble.is_changed()) {
        let position = bubble.screen_position.filter(|_| bubble.visible);
        rpc_interface.send_notification(
            "tutorial_bubble_position",
            serde_json::json!({
                "visible": position.is_some(),
                "x": position.map(|p| p.x),
                "y": position.map(|p| p.y)
            }),
        );
    }

    if preference.is_changed() {
        rpc_interface.send_notification(
            "sound_changed",
            serde_json::json!({ "enabled": preference.enabled }),
        );
    }

    if route.is_changed() {
        rpc_interface.send_notification("route_changed", serde_json::json!({ "route": route.0 }));
    }

    if overlay.is_changed() {
        rpc_interface.send_notification(
            "instructions_changed",
            serde_json::json!({
                "visible": overlay.instructions_visible,
                "lines": overlay.instruction_lines()
            }),
        );
    }
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window (host page).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::scene_positions::Waypoint;

    fn rpc_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<WebRpcInterface>()
            .init_resource::<InteractionState>()
            .init_resource::<SoundPreference>()
            .add_event::<IncomingRpcMessage>()
            .add_event::<HillSelected>()
            .add_event::<NextHillRequested>()
            .add_event::<ExitZoomRequested>()
            .add_event::<SoundToggleRequested>()
            .add_event::<DismissInstructionsRequested>()
            .add_event::<NavigateHomeRequested>()
            .add_systems(Update, handle_rpc_messages);
        app
    }

    fn with_waypoints(app: &mut App) {
        let pose = Waypoint {
            position: Vec3::ONE,
            rotation: Vec3::ZERO,
        };
        app.insert_resource(WaypointTable::from_waypoints([("hill2", pose)]));
    }

    fn call(app: &mut App, message: &str) -> Vec<RpcResponse> {
        app.world_mut().send_event(IncomingRpcMessage {
            content: message.to_string(),
        });
        app.update();
        std::mem::take(
            &mut app
                .world_mut()
                .resource_mut::<WebRpcInterface>()
                .outgoing_responses,
        )
    }

    #[test]
    fn select_hill_dispatches_rpc_selection() {
        let mut app = rpc_app();
        with_waypoints(&mut app);

        let responses = call(
            &mut app,
            r#"{"jsonrpc":"2.0","method":"select_hill","params":{"hill":"hill2"},"id":1}"#,
        );
        assert_eq!(responses.len(), 1);
        assert!(responses[0].error.is_none());
        assert_eq!(responses[0].result.as_ref().unwrap()["accepted"], true);

        let events = app.world().resource::<Events<HillSelected>>();
        let mut reader = events.get_cursor();
        let sent: Vec<_> = reader.read(events).collect();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].hill, HillKey::Hill2);
        assert_eq!(sent[0].source, SelectionSource::Rpc);
    }

    #[test]
    fn select_hill_is_refused_while_a_fish_leaves() {
        let mut app = rpc_app();
        with_waypoints(&mut app);
        {
            let mut state = app.world_mut().resource_mut::<InteractionState>();
            state.current_hill = Some(HillKey::Hill2);
            state.is_exiting = true;
        }

        let responses = call(
            &mut app,
            r#"{"jsonrpc":"2.0","method":"select_hill","params":{"hill":"hill2"},"id":2}"#,
        );
        let result = responses[0].result.as_ref().unwrap();
        assert_eq!(result["accepted"], false);
        assert!(app.world().resource::<Events<HillSelected>>().is_empty());
    }

    #[test]
    fn select_hill_without_waypoint_is_rejected() {
        let mut app = rpc_app();
        with_waypoints(&mut app);

        let responses = call(
            &mut app,
            r#"{"jsonrpc":"2.0","method":"select_hill","params":{"hill":3},"id":"a"}"#,
        );
        let error = responses[0].error.as_ref().unwrap();
        assert_eq!(error.code, -32602);
        assert!(app.world().resource::<Events<HillSelected>>().is_empty());
    }

    #[test]
    fn bad_params_and_unknown_methods_report_errors() {
        let mut app = rpc_app();
        let responses = call(
            &mut app,
            r#"{"jsonrpc":"2.0","method":"select_hill","params":{"hill":"hill9"},"id":2}"#,
        );
        assert_eq!(responses[0].error.as_ref().unwrap().code, -32602);

        let responses = call(&mut app, r#"{"jsonrpc":"2.0","method":"fly","id":3}"#);
        assert_eq!(responses[0].error.as_ref().unwrap().code, -32601);
    }

    #[test]
    fn next_is_refused_until_shown() {
        let mut app = rpc_app();
        let next = r#"{"jsonrpc":"2.0","method":"next_hill","id":4}"#;

        let responses = call(&mut app, next);
        assert_eq!(responses[0].result, Some(serde_json::json!({ "accepted": false })));

        app.world_mut().resource_mut::<InteractionState>().show_next = true;
        let responses = call(&mut app, next);
        assert_eq!(responses[0].result, Some(serde_json::json!({ "accepted": true })));
        assert_eq!(app.world().resource::<Events<NextHillRequested>>().len(), 1);
    }

    #[test]
    fn interaction_state_includes_phase() {
        let mut app = rpc_app();
        {
            let mut state = app.world_mut().resource_mut::<InteractionState>();
            state.current_hill = Some(HillKey::Hill1);
            state.is_zoom_mode = true;
        }
        let responses = call(
            &mut app,
            r#"{"jsonrpc":"2.0","method":"get_interaction_state","id":5}"#,
        );
        let result = responses[0].result.as_ref().unwrap();
        assert_eq!(result["phase"], "zoomed");
        assert_eq!(result["current_hill"], "hill1");
        assert_eq!(result["is_zoom_mode"], true);
    }

    #[test]
    fn notifications_get_no_response() {
        let mut app = rpc_app();
        let responses = call(&mut app, r#"{"jsonrpc":"2.0","method":"toggle_sound"}"#);
        assert!(responses.is_empty());
        assert_eq!(app.world().resource::<Events<SoundToggleRequested>>().len(), 1);
    }
}

use crate::domain::model::PresentationState;

/// Turns a state into the line a terminal shows for it. `Empty` shows nothing.
pub fn render_state(state: &PresentationState, json: bool) -> Option<String> {
    if json {
        return serde_json::to_string(state).ok();
    }
    match state {
        PresentationState::Empty => None,
        PresentationState::Loading => Some("Loading...".to_string()),
        PresentationState::Success { celsius_text } => Some(format!("Result: {} °C", celsius_text)),
        PresentationState::Error { message } => Some(format!("Error: {}", message)),
    }
}

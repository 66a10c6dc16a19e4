use widget_core::{DisplayState, ViewState};

/// Terminal rendering of the current display state. `None` when there is nothing to draw.
pub fn render(view: &ViewState) -> Option<String> {
    match &view.display {
        DisplayState::Idle => None,
        DisplayState::Loading => Some("Loading...".to_string()),
        DisplayState::Error(message) => Some(format!("Error: {message}")),
        DisplayState::Result(w) => {
            let mut out = format!(
                "{}\n  {}  {}\n  Feels like: {}\n  Humidity:   {}\n  Wind:       {}\n  Icon:       {}",
                w.location, w.temperature, w.description, w.feels_like, w.humidity, w.wind_speed, w.icon_url,
            );
            if let Some(updated) = &w.updated {
                out.push_str(&format!("\n  Updated:    {updated}"));
            }
            Some(out)
        }
    }
}

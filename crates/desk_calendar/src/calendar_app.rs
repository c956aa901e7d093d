use app::Application;

/// Desk calendar application.
///
/// Marker type carrying the application's identity; the Bevy app itself is
/// assembled in `main.rs`.
pub struct DeskCalendarApp;

impl Application for DeskCalendarApp {
    const APP_ID: &'static str = "desk_calendar";
}

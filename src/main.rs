use dioxus::prelude::*;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use tripgrid::ui::app::App;

const LOG_ENV: &str = "TRIPGRID_LOG";

fn main() {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new().with_window(
                dioxus::desktop::WindowBuilder::new()
                    .with_title("TripGrid Admin")
                    .with_inner_size(dioxus::desktop::LogicalSize::new(1280.0, 820.0)),
            ),
        )
        .launch(App);
}

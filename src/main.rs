mod app;
mod config;
mod domain;
mod infra;
mod logging;
mod ui;
mod usecase;


fn main() {
    if let Err(err) = logging::init() {
        eprintln!("logging disabled: {err:#}");
    }

    #[cfg(feature = "desktop")]
    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("CSV Desk")),
        )
        .launch(app::App);
}

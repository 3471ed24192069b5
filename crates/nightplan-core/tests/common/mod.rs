use nightplan_core::{App, AppBuilder, Config};

/// Helper function to create an app with default settings and no config file
pub fn create_test_app() -> App {
    let config = Config {
        user_id: "me".to_string(),
        user_name: "Jordan".to_string(),
        reply_delay_ms: 200,
        ..Config::default()
    };
    AppBuilder::new()
        .with_config(config)
        .build()
        .expect("Failed to build app")
}

use photo_reducer_application::infrastructure_config::{Config, StorageConfig, TriggerConfig};
use tracing::info;

pub fn print_startup_info(config: &Config) {
    info!("⚙️  Configuration:");
    info!("  🌍 Environment: {}", config.environment.env);
    info!(
        "  🖼️  Thumbnails: {} pixels wide, height from aspect ratio, JPEG",
        config.thumbnail.target_width
    );
    print_storage_configuration(&config.storage);
    print_trigger_configuration(&config.trigger);
}

fn print_storage_configuration(storage: &StorageConfig) {
    info!("  🗄️  Storage root: {}", storage.root.display());
    info!(
        "  📥 Trigger: {}/{{name}} -> 📤 {}/{{name}}",
        storage.input_container, storage.output_container
    );
}

fn print_trigger_configuration(trigger: &TriggerConfig) {
    info!(
        "  ⏱️  Poll interval: {}ms, up to {} concurrent invocations",
        trigger.poll_interval_ms, trigger.max_concurrent_invocations
    );
}

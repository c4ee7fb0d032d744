use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use cardsmith::config::AppConfig;
use cardsmith::core::cards::generator::CardGenerator;
use cardsmith::core::cards::openai::OpenAiProvider;
use cardsmith::core::cards::safety::SafetyFilter;
use cardsmith::core::{logging, resources};
use cardsmith::database::Database;
use cardsmith::server::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // First pass only resolves the log directory; it runs before the
    // subscriber exists, so the config is re-loaded below once its
    // diagnostics can actually be seen.
    let log_dir = AppConfig::load().data_dir().join("logs");

    let _log_guard = match logging::init_with_file(&log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            logging::init();
            warn!("File logging unavailable ({e}) — stdout only");
            None
        }
    };
    info!("cardsmith v{} starting", cardsmith::VERSION);

    let config = AppConfig::load();

    let db = Database::new(&config.data_dir())
        .await
        .context("Failed to open database")?;

    // Profanity list: missing resource degrades to a permissive filter.
    let resource_dir = &config.generation.resource_dir;
    let safety = match resources::load_resource(resource_dir, &config.generation.profanity_list_file)
    {
        Ok(content) => {
            let filter = SafetyFilter::from_word_list(&content);
            if filter.is_permissive() {
                warn!("Profanity list is empty — family-friendly filter is permissive");
            }
            filter
        }
        Err(e) => {
            warn!("Profanity list not loaded ({e}) — family-friendly filter is permissive");
            SafetyFilter::permissive()
        }
    };

    // Prompt template: missing resource fails generation requests only.
    let prompt_template =
        match resources::load_resource(resource_dir, &config.generation.prompt_template_file) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("Prompt template not loaded ({e}) — generation requests will fail");
                None
            }
        };

    let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_else(|_| {
        warn!("OPENAI_API_KEY is not set — provider calls will be rejected upstream");
        String::new()
    });
    let provider = Arc::new(OpenAiProvider::new(api_key, &config.openai));

    let generator = CardGenerator::new(
        provider,
        safety,
        prompt_template,
        config.generation.max_gen_count,
    );

    let state = Arc::new(AppState {
        db,
        generator,
        max_draw_count: config.generation.max_draw_count,
    });

    let router = server::build_router(state, &config.server);
    server::serve(router, &config.server)
        .await
        .context("Server error")?;

    Ok(())
}

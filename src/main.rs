use std::env;
use std::sync::Arc;

use tubegen::config::{Config, DEFAULT_PORT};
use tubegen::gemini::{GeminiClient, TextGenerator};
use tubegen::{logger, server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_with_config(
        logger::LoggerConfig::development().with_level(logger::LogLevel::Debug),
    )?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    log::info!("🔍 Checking Gemini environment...");

    // Presence only, never the value itself.
    match env::var("API_KEY") {
        Ok(api_key) => {
            log::info!("✅ API key found in environment");
            log::debug!("API key length: {}", api_key.len());
        }
        Err(_) => {
            log::warn!("⚠️  No API_KEY in environment, requests will be rejected");
        }
    }

    if let Ok(model) = env::var("MODEL_NAME") {
        log::info!("MODEL_NAME: {}", model);
    } else {
        log::warn!("No MODEL_NAME set, using the default model");
    }

    let config = Config::from_env();

    logger::log_startup_info(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.port.unwrap_or(DEFAULT_PORT),
    );
    logger::log_config_info(&config);

    log::info!("🔄 Creating Gemini client...");
    let generator: Option<Arc<dyn TextGenerator>> = match config
        .gemini
        .clone()
        .map(GeminiClient::new)
        .transpose()
    {
        Ok(client) => {
            if client.is_some() {
                log::info!("✅ Gemini client initialized successfully");
            }
            client.map(|c| Arc::new(c) as Arc<dyn TextGenerator>)
        }
        Err(e) => {
            // The server still starts; every generate request will answer
            // with a configuration error until the process is restarted.
            log::error!("❌ Failed to initialize Gemini client: {}", e);
            None
        }
    };

    server::run(config, generator).await?;

    Ok(())
}

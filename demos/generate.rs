use std::env;

use tubegen::{GeminiClient, GeminiConfig, TextGenerationRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tubegen::logger::init()?;
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }

    let api_key = env::var("API_KEY")?;
    let config = GeminiConfig::new().with_credentials(api_key);

    let client = GeminiClient::new(config)?;

    log::info!("📚 Available text generation models:");
    for model in client.text().list_generation_models().await? {
        log::info!(
            "  {} - {}",
            model.name,
            model.display_name.as_deref().unwrap_or("unnamed")
        );
    }

    let request = TextGenerationRequest {
        prompt: tubegen::content::build_prompt(
            "A 10 minute walkthrough of building a birdhouse with hand tools only",
        ),
        max_tokens: Some(tubegen::content::GENERATION_MAX_TOKENS),
        temperature: Some(tubegen::content::GENERATION_TEMPERATURE),
        stop_sequences: Some(vec![tubegen::content::STOP_SEQUENCE.to_string()]),
        model_id: None,
    };

    let response = client.text().generate(request).await?;
    log::info!("🏁 Finish reason: {:?}", response.finish_reason);

    let content = tubegen::content::parse_generated(&response.text);
    for (i, title) in content.titles.iter().enumerate() {
        println!("{}. {}", i + 1, title);
    }
    println!("\n{}", content.description);

    Ok(())
}

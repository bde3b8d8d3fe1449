use crate::services::gemini_service::GeminiClient;
use crate::services::youtube_service::YoutubeClient;
use crate::AppState;
use anyhow::Result;
use env_logger::Builder;
use lazy_static::lazy_static;
use log::{info, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;

lazy_static! {
    pub static ref YOUTUBE_API_KEY: String =
        env::var("YOUTUBE_API_KEY").expect("YOUTUBE_API_KEY environment variable must be set");
    pub static ref GEMINI_API_KEY: String =
        env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY environment variable must be set");
    pub static ref GEMINI_MODEL: String =
        env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());
    pub static ref YOUTUBE_API_BASE_URL: String = env::var("YOUTUBE_API_BASE_URL")
        .unwrap_or_else(|_| "https://www.googleapis.com/youtube/v3".to_string());
    pub static ref GEMINI_API_BASE_URL: String = env::var("GEMINI_API_BASE_URL")
        .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string());
}

pub fn init_logger() {
    Builder::new().filter_level(LevelFilter::Info).init();
    info!("Starting Rocket backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn create_app_state() -> AppState {
    AppState {
        youtube: YoutubeClient::with_base_url(&YOUTUBE_API_KEY, &YOUTUBE_API_BASE_URL),
        gemini: GeminiClient::with_base_url(&GEMINI_API_KEY, &GEMINI_MODEL, &GEMINI_API_BASE_URL),
    }
}

pub fn create_cors() -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(&["http://localhost:8080"]))
        .allowed_methods(
            vec![Method::Get, Method::Post, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type"]))
        .allow_credentials(true)
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}

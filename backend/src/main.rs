#[macro_use]
extern crate rocket;

mod api;
mod config;
mod models;
mod services;
mod utils;

use crate::services::gemini_service::GeminiClient;
use crate::services::youtube_service::YoutubeClient;

pub struct AppState {
    pub youtube: YoutubeClient,
    pub gemini: GeminiClient,
}

fn build_rocket(state: AppState) -> rocket::Rocket<rocket::Build> {
    rocket::build().manage(state).mount(
        "/api",
        routes![
            api::get_video,
            api::get_comments,
            api::get_history,
            api::ai_analysis,
            api::search_videos,
            api::compare_videos,
        ],
    )
}

#[launch]
fn rocket() -> _ {
    config::load_environment();
    config::init_logger();

    let cors = config::create_cors().expect("CORS setup failed.");

    build_rocket(config::create_app_state()).attach(cors)
}

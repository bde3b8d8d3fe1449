use crate::models::VideoSummary;
use crate::utils::format_count;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SearchBarProps {
    pub loading: bool,
    pub on_search: Callback<String>,
}

#[function_component(SearchBar)]
pub fn search_bar(props: &SearchBarProps) -> Html {
    let current_input = use_state(String::new);

    let on_input = {
        let current_input = current_input.clone();
        Callback::from(move |e: InputEvent| {
            let input_value = e.target_unchecked_into::<HtmlInputElement>().value();
            current_input.set(input_value);
        })
    };

    let on_submit = {
        let on_search = props.on_search.clone();
        let current_input = current_input.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            let query = (*current_input).clone();
            if !query.is_empty() {
                on_search.emit(query);
            }
        })
    };

    html! {
        <form onsubmit={on_submit} class="flex mb-6">
            <input
                type="text"
                class="flex-grow p-3 border border-gray-300 rounded-l-lg focus:outline-none focus:ring-2 focus:ring-blue-500"
                placeholder="Search videos, or paste a channel URL / @handle..."
                value={(*current_input).clone()}
                oninput={on_input}
                disabled={props.loading}
            />
            <button
                type="submit"
                class="bg-blue-600 text-white p-3 rounded-r-lg hover:bg-blue-700 focus:outline-none focus:ring-2 focus:ring-blue-500 disabled:opacity-50"
                disabled={props.loading}
            >
                { if props.loading { "Searching..." } else { "Search" } }
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoCardProps {
    pub video: VideoSummary,
    pub is_selected: bool,
    pub on_toggle_select: Callback<VideoSummary>,
    pub on_open_analytics: Callback<VideoSummary>,
}

#[function_component(VideoCard)]
pub fn video_card(props: &VideoCardProps) -> Html {
    let on_card_click = {
        let on_open_analytics = props.on_open_analytics.clone();
        let video = props.video.clone();
        Callback::from(move |_| on_open_analytics.emit(video.clone()))
    };

    let on_select = {
        let on_toggle_select = props.on_toggle_select.clone();
        let video = props.video.clone();
        Callback::from(move |e: MouseEvent| {
            // Checkbox clicks toggle selection without opening analytics.
            e.stop_propagation();
            on_toggle_select.emit(video.clone());
        })
    };

    let card_class = if props.is_selected {
        "bg-gray-50 rounded-lg overflow-hidden shadow cursor-pointer ring-2 ring-blue-500"
    } else {
        "bg-gray-50 rounded-lg overflow-hidden shadow cursor-pointer hover:shadow-md"
    };

    html! {
        <div class={card_class} onclick={on_card_click}>
            <img src={props.video.thumbnail_url.clone()} alt={props.video.title.clone()} class="w-full" />
            <div class="p-4">
                <div class="font-semibold text-gray-800 mb-1">{ &props.video.title }</div>
                <div class="text-sm text-gray-600 mb-2">{ &props.video.channel_title }</div>
                <div class="flex gap-4 text-sm text-gray-600">
                    <span>{ format!("👁️ {}", format_count(props.video.view_count)) }</span>
                    <span>{ format!("👍 {}", format_count(props.video.like_count)) }</span>
                    <span>{ format!("💬 {}", format_count(props.video.comment_count)) }</span>
                </div>
                <label class="block mt-3 text-sm text-gray-700" onclick={on_select}>
                    <input type="checkbox" checked={props.is_selected} class="mr-2" />
                    {"Select for comparison"}
                </label>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoGridProps {
    pub videos: Vec<VideoSummary>,
    pub selected_videos: Vec<VideoSummary>,
    pub on_toggle_select: Callback<VideoSummary>,
    pub on_open_analytics: Callback<VideoSummary>,
}

#[function_component(VideoGrid)]
pub fn video_grid(props: &VideoGridProps) -> Html {
    if props.videos.is_empty() {
        return html! {
            <div class="bg-gray-50 p-8 rounded-lg text-center text-gray-500">
                {"No videos found. Try searching for YouTube videos above."}
            </div>
        };
    }

    html! {
        <div>
            {
                if !props.selected_videos.is_empty() {
                    html! {
                        <p class="mb-4 text-sm text-gray-700">
                            <strong>{ format!("{} videos selected for comparison.", props.selected_videos.len()) }</strong>
                        </p>
                    }
                } else {
                    html! {}
                }
            }
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                { for props.videos.iter().map(|video| {
                    let is_selected = props.selected_videos.iter().any(|v| v.id == video.id);
                    html! {
                        <VideoCard
                            video={video.clone()}
                            is_selected={is_selected}
                            on_toggle_select={props.on_toggle_select.clone()}
                            on_open_analytics={props.on_open_analytics.clone()}
                        />
                    }
                })}
            </div>
        </div>
    }
}

use crate::analytics::components::VideoAnalytics;
use crate::compare::components::ComparisonDashboard;
use crate::models::VideoSummary;
use crate::search::api::run_search;
use crate::search::components::{SearchBar, VideoGrid};
use crate::utils::RequestGuard;
use yew::prelude::*;

/// The three top-level views. All of this state lives in memory only and is
/// gone on reload.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum View {
    Search,
    Compare,
    Analytics,
}

const FEATURED_CHANNEL: &str = "@youtube";

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    /// Explicit callback into the dashboard's search; no global handler slot.
    pub on_featured_search: Callback<String>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_click = {
        let on_featured_search = props.on_featured_search.clone();
        Callback::from(move |_| on_featured_search.emit(FEATURED_CHANNEL.to_string()))
    };

    html! {
        <div class="flex justify-between items-center mb-6">
            <h1 class="text-3xl font-bold text-gray-800">{"YouTube Insight"}</h1>
            <div class="text-sm text-gray-600 cursor-pointer" onclick={on_click}>
                {"Featured Channel: "}
                <strong class="text-blue-600">{FEATURED_CHANNEL}</strong>
            </div>
        </div>
    }
}

#[function_component(DashboardApp)]
pub fn dashboard_app() -> Html {
    let active_view = use_state(|| View::Search);
    let search_results = use_state(Vec::<VideoSummary>::default);
    let selected_videos = use_state(Vec::<VideoSummary>::default);
    let current_video = use_state(|| None::<VideoSummary>);
    let loading = use_state(|| true);
    let error_message = use_state(Option::<String>::default);
    let init_done = use_state(|| false);
    let search_guard = use_memo((), |_| RequestGuard::default());

    let execute_search = {
        let search_results = search_results.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();
        let search_guard = search_guard.clone();

        move |query: String| {
            let search_results = search_results.clone();
            let loading = loading.clone();
            let error_message = error_message.clone();
            let guard = (*search_guard).clone();
            let token = guard.begin();

            loading.set(true);
            error_message.set(None);

            wasm_bindgen_futures::spawn_local(async move {
                run_search(query, token, guard, search_results, error_message, loading).await;
            });
        }
    };

    // Load the trending listing once on startup.
    {
        let init_done = init_done.clone();
        let execute_search = execute_search.clone();

        use_effect(move || {
            if !*init_done {
                execute_search("trending".to_string());
                init_done.set(true);
            }
            || ()
        });
    }

    let on_search = {
        let active_view = active_view.clone();
        let execute_search = execute_search.clone();

        Callback::from(move |query: String| {
            active_view.set(View::Search);
            execute_search(query);
        })
    };

    let on_toggle_select = {
        let selected_videos = selected_videos.clone();

        Callback::from(move |video: VideoSummary| {
            let mut selected = (*selected_videos).clone();
            if let Some(pos) = selected.iter().position(|v| v.id == video.id) {
                selected.remove(pos);
            } else {
                selected.push(video);
            }
            selected_videos.set(selected);
        })
    };

    let on_open_analytics = {
        let current_video = current_video.clone();
        let active_view = active_view.clone();

        Callback::from(move |video: VideoSummary| {
            current_video.set(Some(video));
            active_view.set(View::Analytics);
        })
    };

    let on_back_to_search = {
        let active_view = active_view.clone();
        Callback::from(move |_: ()| active_view.set(View::Search))
    };

    let show_search_tab = {
        let active_view = active_view.clone();
        Callback::from(move |_| active_view.set(View::Search))
    };

    let show_compare_tab = {
        let active_view = active_view.clone();
        let selected_videos = selected_videos.clone();
        Callback::from(move |_| {
            if !selected_videos.is_empty() {
                active_view.set(View::Compare);
            }
        })
    };

    let show_analytics_tab = {
        let active_view = active_view.clone();
        Callback::from(move |_| active_view.set(View::Analytics))
    };

    let tab_class = |active: bool| {
        if active {
            "px-4 py-2 cursor-pointer border-b-2 border-blue-600 text-blue-600 font-semibold"
        } else {
            "px-4 py-2 cursor-pointer text-gray-600 hover:text-blue-600"
        }
    };

    let content = if *loading {
        html! {
            <div class="bg-white p-8 rounded-lg shadow text-center text-gray-500">
                {"Loading..."}
            </div>
        }
    } else if let Some(msg) = &*error_message {
        html! {
            <div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded">
                { msg }
            </div>
        }
    } else {
        match *active_view {
            View::Search => html! {
                <VideoGrid
                    videos={(*search_results).clone()}
                    selected_videos={(*selected_videos).clone()}
                    on_toggle_select={on_toggle_select.clone()}
                    on_open_analytics={on_open_analytics.clone()}
                />
            },
            View::Compare => html! {
                <ComparisonDashboard
                    videos={(*selected_videos).clone()}
                    on_open_analytics={on_open_analytics.clone()}
                />
            },
            View::Analytics => match &*current_video {
                Some(video) => html! {
                    <VideoAnalytics video={video.clone()} on_back={on_back_to_search.clone()} />
                },
                None => html! {
                    <div class="bg-white p-8 rounded-lg shadow text-center text-gray-500">
                        {"No video selected for analysis."}
                    </div>
                },
            },
        }
    };

    html! {
        <div class="min-h-screen bg-gray-700 p-4">
            <div class="max-w-5xl mx-auto bg-white p-8 rounded-lg shadow-lg">
                <Header on_featured_search={on_search.clone()} />

                <div class="flex border-b border-gray-200 mb-6">
                    <div class={tab_class(*active_view == View::Search)} onclick={show_search_tab}>
                        {"Search"}
                    </div>
                    <div class={tab_class(*active_view == View::Compare)} onclick={show_compare_tab}>
                        { format!("Compare ({})", selected_videos.len()) }
                    </div>
                    {
                        if current_video.is_some() {
                            html! {
                                <div class={tab_class(*active_view == View::Analytics)} onclick={show_analytics_tab}>
                                    {"Analytics"}
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </div>

                {
                    if *active_view == View::Search {
                        html! { <SearchBar loading={*loading} on_search={on_search.clone()} /> }
                    } else {
                        html! {}
                    }
                }

                { content }
            </div>
        </div>
    }
}

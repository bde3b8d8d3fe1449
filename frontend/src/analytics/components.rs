use crate::analytics::ai::AiAnalysisPanel;
use crate::analytics::api::{load_comments, load_history, load_video_details};
use crate::models::{CommentThread, HistoricalPoint, VideoDetails, VideoSummary};
use crate::utils::{format_iso8601_date, format_number, rate_percent, RequestGuard};
use std::collections::HashSet;
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum AnalyticsTab {
    Overview,
    Trends,
    Comments,
    Ai,
}

impl AnalyticsTab {
    fn label(self) -> &'static str {
        match self {
            AnalyticsTab::Overview => "Overview",
            AnalyticsTab::Trends => "Trends",
            AnalyticsTab::Comments => "Comments",
            AnalyticsTab::Ai => "AI Analysis",
        }
    }

    fn all() -> [AnalyticsTab; 4] {
        [
            AnalyticsTab::Overview,
            AnalyticsTab::Trends,
            AnalyticsTab::Comments,
            AnalyticsTab::Ai,
        ]
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoAnalyticsProps {
    pub video: VideoSummary,
    pub on_back: Callback<()>,
}

#[function_component(VideoAnalytics)]
pub fn video_analytics(props: &VideoAnalyticsProps) -> Html {
    let active_tab = use_state(|| AnalyticsTab::Overview);
    let details = use_state(|| None::<VideoDetails>);
    let comments = use_state(|| None::<Vec<CommentThread>>);
    let history = use_state(|| None::<Vec<HistoricalPoint>>);
    let error_message = use_state(Option::<String>::default);

    let details_guard = use_memo((), |_| RequestGuard::default());
    let comments_guard = use_memo((), |_| RequestGuard::default());
    let history_guard = use_memo((), |_| RequestGuard::default());

    // Each sub-tab fetches its own data the first time it is shown for the
    // current video. Switching videos resets everything and invalidates any
    // fetch still in flight.
    {
        let details = details.clone();
        let comments = comments.clone();
        let history = history.clone();
        let error_message = error_message.clone();
        let details_guard = details_guard.clone();
        let comments_guard = comments_guard.clone();
        let history_guard = history_guard.clone();
        let video_id = props.video.id.clone();
        let tab = *active_tab;
        let prev_video_id = use_state(String::new);
        let fetched_tabs = use_mut_ref(HashSet::<AnalyticsTab>::new);

        use_effect(move || {
            if *prev_video_id != video_id {
                prev_video_id.set(video_id.clone());
                fetched_tabs.borrow_mut().clear();
                details.set(None);
                comments.set(None);
                history.set(None);
                error_message.set(None);
                details_guard.invalidate();
                comments_guard.invalidate();
                history_guard.invalidate();
            }

            if !fetched_tabs.borrow().contains(&tab) {
                fetched_tabs.borrow_mut().insert(tab);
                match tab {
                    AnalyticsTab::Overview => {
                        let guard = (*details_guard).clone();
                        let token = guard.begin();
                        wasm_bindgen_futures::spawn_local(async move {
                            load_video_details(video_id, token, guard, details, error_message)
                                .await;
                        });
                    }
                    AnalyticsTab::Trends => {
                        let guard = (*history_guard).clone();
                        let token = guard.begin();
                        wasm_bindgen_futures::spawn_local(async move {
                            load_history(video_id, token, guard, history, error_message).await;
                        });
                    }
                    AnalyticsTab::Comments => {
                        let guard = (*comments_guard).clone();
                        let token = guard.begin();
                        wasm_bindgen_futures::spawn_local(async move {
                            load_comments(video_id, token, guard, comments, error_message).await;
                        });
                    }
                    // The AI panel mounts on activation and fetches itself.
                    AnalyticsTab::Ai => {}
                }
            }
            || ()
        });
    }

    let on_back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_| on_back.emit(()))
    };

    let current = *active_tab;

    let header = html! {
        <div class="flex flex-wrap items-start gap-6 mb-6">
            <img
                src={props.video.thumbnail_url.clone()}
                alt={props.video.title.clone()}
                class="w-full max-w-xs rounded"
            />
            <div class="flex-1 min-w-[300px]">
                <h1 class="text-2xl font-bold text-gray-800 mb-1">{ &props.video.title }</h1>
                <p class="text-gray-600 mb-4">
                    { format!("{} • {}", props.video.channel_title, format_iso8601_date(&props.video.published_at)) }
                </p>
                <div class="flex flex-wrap gap-6">
                    <div>
                        <div class="text-sm text-gray-500">{"Views"}</div>
                        <div class="text-lg font-semibold">{ format_number(props.video.view_count) }</div>
                    </div>
                    <div>
                        <div class="text-sm text-gray-500">{"Likes"}</div>
                        <div class="text-lg font-semibold">{ format_number(props.video.like_count) }</div>
                    </div>
                    <div>
                        <div class="text-sm text-gray-500">{"Comments"}</div>
                        <div class="text-lg font-semibold">{ format_number(props.video.comment_count) }</div>
                    </div>
                    {
                        if let Some(d) = &*details {
                            html! {
                                <div>
                                    <div class="text-sm text-gray-500">{"Duration"}</div>
                                    <div class="text-lg font-semibold">{ &d.duration_display }</div>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </div>
            </div>
        </div>
    };

    let tab_content = match current {
        AnalyticsTab::Overview => render_overview(&details),
        AnalyticsTab::Trends => render_trends(&history),
        AnalyticsTab::Comments => render_comments(&comments),
        AnalyticsTab::Ai => html! { <AiAnalysisPanel video_id={props.video.id.clone()} /> },
    };

    html! {
        <div>
            <button
                class="mb-4 bg-gray-200 text-gray-700 px-4 py-2 rounded hover:bg-gray-300"
                onclick={on_back}
            >
                {"← Back to Search"}
            </button>

            { header }

            {
                if let Some(msg) = &*error_message {
                    html! {
                        <div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded mb-4">
                            { msg }
                        </div>
                    }
                } else {
                    html! {}
                }
            }

            <div class="flex border-b border-gray-200 mb-6">
                { for AnalyticsTab::all().into_iter().map(|tab| {
                    let active_tab = active_tab.clone();
                    let class = if current == tab {
                        "px-4 py-2 cursor-pointer border-b-2 border-blue-600 text-blue-600 font-semibold"
                    } else {
                        "px-4 py-2 cursor-pointer text-gray-600 hover:text-blue-600"
                    };
                    html! {
                        <div class={class} onclick={Callback::from(move |_| active_tab.set(tab))}>
                            { tab.label() }
                        </div>
                    }
                })}
            </div>

            { tab_content }
        </div>
    }
}

fn render_overview(details: &Option<VideoDetails>) -> Html {
    let Some(details) = details else {
        return html! {
            <div class="bg-gray-50 p-8 rounded-lg text-center text-gray-500">{"Loading..."}</div>
        };
    };

    html! {
        <div>
            <h2 class="text-xl font-semibold text-gray-800 mb-2">{"Video Description"}</h2>
            <p class="whitespace-pre-wrap text-gray-700 mb-6">{ &details.description }</p>

            <h2 class="text-xl font-semibold text-gray-800 mb-3">{"Key Metrics"}</h2>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <div class="bg-gray-50 p-5 rounded-lg">
                    <h3 class="font-semibold text-gray-800">{"Engagement Rate"}</h3>
                    <div class="text-2xl font-bold text-blue-600">
                        { format!("{:.2}%", details.engagement_rate) }
                    </div>
                    <p class="text-sm text-gray-600">{"Likes and comments relative to views"}</p>
                </div>
                <div class="bg-gray-50 p-5 rounded-lg">
                    <h3 class="font-semibold text-gray-800">{"Like Ratio"}</h3>
                    <div class="text-2xl font-bold text-blue-600">
                        { format!("{:.2}%", rate_percent(details.like_count, details.view_count)) }
                    </div>
                    <p class="text-sm text-gray-600">{"Percentage of viewers who liked the video"}</p>
                </div>
                <div class="bg-gray-50 p-5 rounded-lg">
                    <h3 class="font-semibold text-gray-800">{"Comment Rate"}</h3>
                    <div class="text-2xl font-bold text-blue-600">
                        { format!("{:.2}%", rate_percent(details.comment_count, details.view_count)) }
                    </div>
                    <p class="text-sm text-gray-600">{"Percentage of viewers who commented"}</p>
                </div>
            </div>
        </div>
    }
}

fn render_trends(history: &Option<Vec<HistoricalPoint>>) -> Html {
    let Some(points) = history else {
        return html! {
            <div class="bg-gray-50 p-8 rounded-lg text-center text-gray-500">{"Loading..."}</div>
        };
    };

    let max_views = points.iter().map(|p| p.views).max().unwrap_or(0);

    html! {
        <div>
            <h2 class="text-xl font-semibold text-gray-800 mb-2">{"Performance Trends"}</h2>
            <p class="text-sm text-gray-600 mb-4">
                {"Growth of views, likes, and comments over the last 30 days."}
            </p>

            <div class="space-y-1 mb-6">
                { for points.iter().map(|point| {
                    let width = if max_views > 0 {
                        point.views as f64 / max_views as f64 * 100.0
                    } else {
                        0.0
                    };
                    html! {
                        <div class="flex items-center gap-2 text-xs text-gray-600">
                            <span class="w-24 shrink-0">{ &point.date }</span>
                            <div class="flex-1 bg-gray-200 rounded h-2">
                                <div class="bg-blue-600 rounded h-2" style={format!("width: {width:.1}%")}></div>
                            </div>
                            <span class="w-20 text-right">{ format_number(point.views) }</span>
                        </div>
                    }
                })}
            </div>

            <div class="overflow-x-auto mb-4">
                <table class="min-w-full text-sm text-left text-gray-700">
                    <thead class="bg-gray-100 text-gray-800">
                        <tr>
                            <th class="px-4 py-2">{"Date"}</th>
                            <th class="px-4 py-2">{"Views"}</th>
                            <th class="px-4 py-2">{"Likes"}</th>
                            <th class="px-4 py-2">{"Comments"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for points.iter().map(|point| html! {
                            <tr class="border-b border-gray-200">
                                <td class="px-4 py-2">{ &point.date }</td>
                                <td class="px-4 py-2">{ format_number(point.views) }</td>
                                <td class="px-4 py-2">{ format_number(point.likes) }</td>
                                <td class="px-4 py-2">{ format_number(point.comments) }</td>
                            </tr>
                        })}
                    </tbody>
                </table>
            </div>

            <p class="text-sm text-gray-500 italic">
                {"Note: Historical data is simulated as the YouTube API doesn't provide historical statistics."}
            </p>
        </div>
    }
}

fn render_comments(comments: &Option<Vec<CommentThread>>) -> Html {
    let Some(comments) = comments else {
        return html! {
            <div class="bg-gray-50 p-8 rounded-lg text-center text-gray-500">{"Loading..."}</div>
        };
    };

    if comments.is_empty() {
        return html! {
            <p class="text-gray-500">{"No comments found for this video."}</p>
        };
    }

    html! {
        <div>
            <h2 class="text-xl font-semibold text-gray-800 mb-3">{"Top Comments"}</h2>
            <div class="divide-y divide-gray-200">
                { for comments.iter().map(|comment| html! {
                    <div class="py-4">
                        <div class="flex items-center gap-3 mb-2">
                            <img
                                src={comment.author_profile_image_url.clone()}
                                alt={comment.author.clone()}
                                class="w-10 h-10 rounded-full"
                            />
                            <div>
                                <div class="font-semibold text-gray-800">{ &comment.author }</div>
                                <div class="text-xs text-gray-500">
                                    { format_iso8601_date(&comment.published_at) }
                                </div>
                            </div>
                        </div>
                        <p class="text-gray-700 mb-2">{ &comment.text }</p>
                        <div class="text-sm text-gray-500">
                            <span class="mr-4">{ format!("👍 {}", comment.like_count) }</span>
                            <span>{ format!("💬 {}", comment.reply_count) }</span>
                        </div>
                    </div>
                })}
            </div>
        </div>
    }
}

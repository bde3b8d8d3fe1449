use crate::compare::api::load_comparison;
use crate::models::VideoSummary;
use crate::utils::{format_count, format_number, RequestGuard};
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Metric {
    Views,
    Likes,
    Comments,
    Engagement,
}

impl Metric {
    fn label(self) -> &'static str {
        match self {
            Metric::Views => "Views",
            Metric::Likes => "Likes",
            Metric::Comments => "Comments",
            Metric::Engagement => "Engagement Rate",
        }
    }

    fn value(self, row: &VideoSummary) -> f64 {
        match self {
            Metric::Views => row.view_count as f64,
            Metric::Likes => row.like_count as f64,
            Metric::Comments => row.comment_count as f64,
            Metric::Engagement => row.engagement_rate,
        }
    }

    fn display(self, row: &VideoSummary) -> String {
        match self {
            Metric::Engagement => format!("{:.2}%", row.engagement_rate),
            _ => format_count(self.value(row) as u64),
        }
    }

    fn all() -> [Metric; 4] {
        [
            Metric::Views,
            Metric::Likes,
            Metric::Comments,
            Metric::Engagement,
        ]
    }
}

#[derive(Properties, PartialEq)]
pub struct ComparisonDashboardProps {
    pub videos: Vec<VideoSummary>,
    pub on_open_analytics: Callback<VideoSummary>,
}

#[function_component(ComparisonDashboard)]
pub fn comparison_dashboard(props: &ComparisonDashboardProps) -> Html {
    let rows = use_state(Vec::<VideoSummary>::default);
    let loading = use_state(|| false);
    let error_message = use_state(Option::<String>::default);
    let active_metric = use_state(|| Metric::Views);
    let guard = use_memo((), |_| RequestGuard::default());

    // Refetch whenever the selected set changes.
    {
        let rows = rows.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();
        let guard = guard.clone();
        let videos = props.videos.clone();
        let prev_ids = use_state(Vec::<String>::new);

        use_effect(move || {
            let ids: Vec<String> = videos.iter().map(|v| v.id.clone()).collect();
            if *prev_ids != ids {
                prev_ids.set(ids.clone());
                if !ids.is_empty() {
                    loading.set(true);
                    error_message.set(None);

                    let guard = (*guard).clone();
                    let token = guard.begin();
                    wasm_bindgen_futures::spawn_local(async move {
                        load_comparison(ids, token, guard, rows, error_message, loading).await;
                    });
                }
            }
            || ()
        });
    }

    if props.videos.is_empty() {
        return html! {
            <div class="bg-gray-50 p-8 rounded-lg text-center text-gray-500">
                {"No videos selected for comparison. Please select videos from the search results."}
            </div>
        };
    }

    if *loading {
        return html! {
            <div class="bg-white p-8 rounded-lg shadow text-center text-gray-500">
                {"Loading comparison..."}
            </div>
        };
    }

    if let Some(msg) = &*error_message {
        return html! {
            <div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded">
                { msg }
            </div>
        };
    }

    let metric = *active_metric;
    let max_value = rows
        .iter()
        .map(|row| metric.value(row))
        .fold(0.0_f64, f64::max);

    html! {
        <div>
            <div class="mb-6">
                <h2 class="text-xl font-semibold text-gray-800 mb-1">{"Video Comparison"}</h2>
                <p class="text-sm text-gray-600">
                    { format!("Compare metrics across {} selected videos.", props.videos.len()) }
                </p>
            </div>

            <div class="flex border-b border-gray-200 mb-4">
                { for Metric::all().into_iter().map(|m| {
                    let active_metric = active_metric.clone();
                    let class = if metric == m {
                        "px-4 py-2 cursor-pointer border-b-2 border-blue-600 text-blue-600 font-semibold"
                    } else {
                        "px-4 py-2 cursor-pointer text-gray-600 hover:text-blue-600"
                    };
                    html! {
                        <div class={class} onclick={Callback::from(move |_| active_metric.set(m))}>
                            { m.label() }
                        </div>
                    }
                })}
            </div>

            <div class="space-y-3 mb-8">
                { for rows.iter().map(|row| {
                    let value = metric.value(row);
                    let width = if max_value > 0.0 { value / max_value * 100.0 } else { 0.0 };
                    html! {
                        <div>
                            <div class="flex justify-between text-sm text-gray-700 mb-1">
                                <span class="truncate pr-4">{ &row.title }</span>
                                <span class="font-semibold">{ metric.display(row) }</span>
                            </div>
                            <div class="bg-gray-200 rounded h-3">
                                <div class="bg-blue-600 rounded h-3" style={format!("width: {width:.1}%")}></div>
                            </div>
                        </div>
                    }
                })}
            </div>

            <h2 class="text-xl font-semibold text-gray-800 mb-3">{"Comparison Table"}</h2>
            <div class="overflow-x-auto">
                <table class="min-w-full text-sm text-left text-gray-700">
                    <thead class="bg-gray-100 text-gray-800">
                        <tr>
                            <th class="px-4 py-2">{"Video"}</th>
                            <th class="px-4 py-2">{"Channel"}</th>
                            <th class="px-4 py-2">{"Views"}</th>
                            <th class="px-4 py-2">{"Likes"}</th>
                            <th class="px-4 py-2">{"Comments"}</th>
                            <th class="px-4 py-2">{"Engagement Rate"}</th>
                            <th class="px-4 py-2">{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for rows.iter().map(|row| {
                            let on_open_analytics = props.on_open_analytics.clone();
                            let video = row.clone();
                            html! {
                                <tr class="border-b border-gray-200">
                                    <td class="px-4 py-2">{ &row.title }</td>
                                    <td class="px-4 py-2">{ &row.channel_title }</td>
                                    <td class="px-4 py-2">{ format_number(row.view_count) }</td>
                                    <td class="px-4 py-2">{ format_number(row.like_count) }</td>
                                    <td class="px-4 py-2">{ format_number(row.comment_count) }</td>
                                    <td class="px-4 py-2">{ format!("{:.2}%", row.engagement_rate) }</td>
                                    <td class="px-4 py-2">
                                        <button
                                            class="bg-blue-600 text-white px-3 py-1 rounded hover:bg-blue-700"
                                            onclick={Callback::from(move |_| on_open_analytics.emit(video.clone()))}
                                        >
                                            {"Analytics"}
                                        </button>
                                    </td>
                                </tr>
                            }
                        })}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

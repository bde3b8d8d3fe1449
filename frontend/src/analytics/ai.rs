use crate::analytics::api::load_analysis;
use crate::models::AiAnalysis;
use crate::utils::RequestGuard;
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
enum AiTab {
    General,
    Content,
    Engagement,
    Growth,
}

impl AiTab {
    fn as_query(self) -> &'static str {
        match self {
            AiTab::General => "general",
            AiTab::Content => "content",
            AiTab::Engagement => "engagement",
            AiTab::Growth => "growth",
        }
    }

    fn label(self) -> &'static str {
        match self {
            AiTab::General => "General Analysis",
            AiTab::Content => "Content Analysis",
            AiTab::Engagement => "Engagement Analysis",
            AiTab::Growth => "Growth Potential",
        }
    }

    fn all() -> [AiTab; 4] {
        [AiTab::General, AiTab::Content, AiTab::Engagement, AiTab::Growth]
    }
}

#[derive(Properties, PartialEq)]
pub struct AiAnalysisPanelProps {
    pub video_id: String,
}

#[function_component(AiAnalysisPanel)]
pub fn ai_analysis_panel(props: &AiAnalysisPanelProps) -> Html {
    let analysis = use_state(|| None::<AiAnalysis>);
    let loading = use_state(|| true);
    let error_message = use_state(Option::<String>::default);
    let active_tab = use_state(|| AiTab::General);
    let guard = use_memo((), |_| RequestGuard::default());

    // Fetch on mount, and again whenever the video or the analysis type
    // changes. A stale response never lands thanks to the guard.
    {
        let analysis = analysis.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();
        let guard = guard.clone();
        let video_id = props.video_id.clone();
        let tab = *active_tab;
        let prev_request = use_state(|| (String::new(), ""));

        use_effect(move || {
            let request = (video_id.clone(), tab.as_query());
            if *prev_request != request {
                prev_request.set(request);
                loading.set(true);
                error_message.set(None);

                let guard = (*guard).clone();
                let token = guard.begin();
                wasm_bindgen_futures::spawn_local(async move {
                    load_analysis(
                        video_id,
                        tab.as_query(),
                        token,
                        guard,
                        analysis,
                        error_message,
                        loading,
                    )
                    .await;
                });
            }
            || ()
        });
    }

    let current = *active_tab;

    html! {
        <div>
            <div class="flex border-b border-gray-200 mb-4">
                { for AiTab::all().into_iter().map(|tab| {
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

            {
                if *loading {
                    html! {
                        <div class="bg-gray-50 p-8 rounded-lg text-center text-gray-500">
                            {"Generating AI analysis... This may take a moment."}
                        </div>
                    }
                } else if let Some(msg) = &*error_message {
                    html! {
                        <div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded">
                            { format!("Error generating AI analysis: {msg}") }
                        </div>
                    }
                } else if let Some(result) = &*analysis {
                    html! {
                        <div class="bg-gray-50 p-6 rounded-lg">
                            { for result.analysis.split("\n\n").map(|paragraph| html! {
                                <p class="mb-3 whitespace-pre-wrap text-gray-800">{ paragraph }</p>
                            })}
                            <p class="mt-4 text-sm text-gray-500 italic">
                                {"Analysis powered by Google Gemini AI"}
                            </p>
                        </div>
                    }
                } else {
                    html! {
                        <div class="bg-gray-50 p-8 rounded-lg text-center text-gray-500">
                            {"No analysis available."}
                        </div>
                    }
                }
            }
        </div>
    }
}

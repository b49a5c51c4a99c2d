//! Pure Yew view components for the wafer dashboard.
//!
//! Every component renders from props and reports clicks through callbacks;
//! the session itself lives in `hooks::use_dashboard`.

use wafer_dashboard::classifier::DefectType;
use wafer_dashboard::config::UPLOAD_ACCEPT;
use wafer_dashboard::controller::{DatePicker, ListEntry};
use wafer_dashboard::stats::{bar_percent, StatsReport, TrendDirection};
use wafer_dashboard::utils::{format_count, format_signed_percent};
use wafer_dashboard::{ActionView, Artifact, TimeWindow, WaferCard, WaferSelection};
use web_sys::HtmlInputElement;
use yew::prelude::*;

fn defect_class(defect: DefectType) -> &'static str {
    match defect {
        DefectType::Scratch => "wafer-card scratch",
        DefectType::EdgeRing => "wafer-card edge-ring",
        DefectType::NoPattern => "wafer-card no-pattern",
    }
}

fn selected_class(base: &str, selected: bool) -> String {
    if selected {
        format!("{} selected", base)
    } else {
        base.to_string()
    }
}

#[derive(Properties, PartialEq)]
pub struct UploadPanelProps {
    pub on_upload: Callback<Artifact>,
}

/// File picker. Only the name and size of the chosen file are used.
#[function_component(UploadPanel)]
pub fn upload_panel(props: &UploadPanelProps) -> Html {
    let onchange = {
        let on_upload = props.on_upload.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                on_upload.emit(Artifact::new(file.name(), file.size() as u64));
            }
        })
    };

    html! {
        <div class="sidebar-section">
            <h3>{ "웨이퍼 맵 업로드" }</h3>
            <input type="file" id="image-upload" class="hidden" accept={UPLOAD_ACCEPT} {onchange} />
            <label for="image-upload" class="upload-button">{ "📁 이미지 업로드" }</label>
            <div class="hint">{ "JPG, PNG, GIF 파일만 업로드 가능" }</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TimeFilterProps {
    pub selected: TimeWindow,
    pub picker: DatePicker,
    pub range_label: Option<String>,
    pub on_select: Callback<TimeWindow>,
    pub on_start_date: Callback<String>,
    pub on_end_date: Callback<String>,
    pub on_submit: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(TimeFilter)]
pub fn time_filter(props: &TimeFilterProps) -> Html {
    let date_input = |value: &str, cb: &Callback<String>| {
        let cb = cb.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit(input.value());
        });
        html! { <input type="date" value={value.to_string()} {oninput} /> }
    };

    html! {
        <div class="sidebar-section">
            <h3>{ "Time Filter" }</h3>
            { for TimeWindow::ALL.into_iter().map(|window| {
                let selected = window == props.selected;
                let onclick = props.on_select.reform(move |_| window);
                html! {
                    <button class={selected_class("filter-button", selected)} {onclick}>
                        <span>{ window.label() }</span>
                        if selected { <span class="check">{ "✓" }</span> }
                    </button>
                }
            }) }
            if props.picker.open {
                <div class="date-picker">
                    <label>{ "시작 날짜" }</label>
                    { date_input(&props.picker.draft.start_date, &props.on_start_date) }
                    <label>{ "종료 날짜" }</label>
                    { date_input(&props.picker.draft.end_date, &props.on_end_date) }
                    <button onclick={props.on_submit.reform(|_| ())}>{ "적용" }</button>
                    <button onclick={props.on_cancel.reform(|_| ())}>{ "취소" }</button>
                </div>
            }
            if props.selected == TimeWindow::TimeRange {
                if let Some(label) = &props.range_label {
                    <div class="range-label">
                        <div>{ "선택된 기간:" }</div>
                        <div>{ label }</div>
                    </div>
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EntryListProps {
    pub title: AttrValue,
    pub entries: Vec<ListEntry>,
    /// Shown when there is nothing to list.
    pub placeholder: AttrValue,
    pub on_select: Callback<String>,
}

/// Sidebar list of lots or wafers.
#[function_component(EntryList)]
pub fn entry_list(props: &EntryListProps) -> Html {
    let heading = if props.entries.is_empty() {
        props.title.to_string()
    } else {
        format!("{} ({}개)", props.title, props.entries.len())
    };

    html! {
        <div class="sidebar-section">
            <h3>{ heading }</h3>
            <div class="scroll-list">
                if props.entries.is_empty() {
                    <div class="placeholder">{ props.placeholder.to_string() }</div>
                } else {
                    { for props.entries.iter().map(|entry| {
                        let id = entry.id.clone();
                        let onclick = props.on_select.reform(move |_| id.clone());
                        html! {
                            <button class={selected_class("list-button", entry.selected)} {onclick}>
                                <span>{ &entry.id }</span>
                                if entry.selected { <span class="check">{ "✓" }</span> }
                            </button>
                        }
                    }) }
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ActionButtonsProps {
    pub current: ActionView,
    pub has_catalog: bool,
    pub on_action: Callback<ActionView>,
}

#[function_component(ActionButtons)]
pub fn action_buttons(props: &ActionButtonsProps) -> Html {
    let button = |view: ActionView, text: &str| {
        let active = props.current == view;
        let disabled_look = view.requires_catalog() && !props.has_catalog;
        let mut class = selected_class(&format!("action-button {}", view), active);
        if disabled_look {
            class.push_str(" inactive");
        }
        html! {
            <button {class} onclick={props.on_action.reform(move |_| view)}>{ text.to_string() }</button>
        }
    };

    html! {
        <div class="sidebar-section actions">
            { button(ActionView::Statistics, "통계") }
            { button(ActionView::WaferMap, "웨이퍼 맵") }
            { button(ActionView::Query, "조회") }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct QueryViewProps {
    pub window: TimeWindow,
    pub range_label: Option<String>,
    pub uploaded: Option<String>,
}

#[function_component(QueryView)]
pub fn query_view(props: &QueryViewProps) -> Html {
    let prompt = if props.uploaded.is_some() {
        "이미지가 업로드되었습니다. 좌측 사이드바의 조회 버튼을 클릭하세요."
    } else {
        "웨이퍼 맵 이미지를 업로드하고 기간을 선택한 후 좌측 사이드바의 조회 버튼을 클릭하세요."
    };

    html! {
        <div class="query-view">
            <h1>{ "웨이퍼 결함 분석 조회" }</h1>
            <div>{ "선택된 기간: " }<strong>{ props.window.label() }</strong></div>
            if let Some(label) = &props.range_label {
                <div class="range-label">{ format!("({})", label) }</div>
            }
            if let Some(name) = &props.uploaded {
                <div class="uploaded">{ format!("✅ 업로드된 이미지: {}", name) }</div>
            }
            <div class="hint">{ prompt }</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatisticsViewProps {
    pub report: StatsReport,
}

/// Summary cards, frequency bars, trend points, ranking table and share list.
#[function_component(StatisticsView)]
pub fn statistics_view(props: &StatisticsViewProps) -> Html {
    let report = &props.report;
    let trend_class = match report.trend_direction() {
        TrendDirection::Up => "summary-card change up",
        TrendDirection::Down => "summary-card change down",
    };
    let total = report.defect_type_total();

    html! {
        <div class="statistics">
            <div class="panel">
                <h1>{ "웨이퍼 결함 분석 통계" }</h1>
                <div>
                    { "선택된 기간: " }<strong>{ report.window.label() }</strong>
                    if let Some(label) = &report.range_label {
                        <span class="range-label">{ format!(" ({})", label) }</span>
                    }
                </div>
            </div>

            <div class="summary">
                <div class="summary-card">
                    <div>{ "전체 웨이퍼" }</div>
                    <div class="value">{ format_count(report.total_wafers) }</div>
                </div>
                <div class="summary-card">
                    <div>{ "불량 웨이퍼" }</div>
                    <div class="value">{ format_count(report.defective_wafers) }</div>
                </div>
                <div class="summary-card">
                    <div>{ "불량률" }</div>
                    <div class="value">{ format!("{}%", report.defect_rate_percent) }</div>
                </div>
                <div class={trend_class}>
                    <div>{ "전일 대비" }</div>
                    <div class="value">{ format_signed_percent(report.daily_change_percent) }</div>
                </div>
            </div>

            <div class="panel">
                <h3>{ "불량 유형별 빈도" }</h3>
                { for report.defect_type_counts.iter().map(|c| {
                    let width = bar_percent(c.count);
                    html! {
                        <div class="bar-row">
                            <span class="bar-label">{ c.category.label() }</span>
                            <div class="bar" style={format!("width: {}%", width)}>
                                { format!("{:.1}%", width) }
                            </div>
                            <span class="bar-count">{ c.count }</span>
                        </div>
                    }
                }) }
            </div>

            <div class="panel">
                <h3>{ "일별 불량률 추이" }</h3>
                <ol class="trend">
                    { for report.trend_series.iter().map(|p| html! {
                        <li>{ format!("{}: {}%", p.label, p.rate_percent) }</li>
                    }) }
                </ol>
            </div>

            <div class="panel">
                <h3>{ "불량 상위 5개 유형" }</h3>
                <table>
                    <thead>
                        <tr><th>{ "순위" }</th><th>{ "유형" }</th><th>{ "빈도" }</th><th>{ "비율" }</th></tr>
                    </thead>
                    <tbody>
                        { for report.ranked_defect_types().into_iter().map(|r| html! {
                            <tr>
                                <td>{ r.rank }</td>
                                <td>{ r.category.label() }</td>
                                <td>{ r.count }</td>
                                <td>{ format!("{:.1}%", r.percent) }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>

            <div class="panel">
                <h3>{ "불량 유형 비율" }</h3>
                <div class="share-total">{ format!("{}개", total) }</div>
                <ul class="share">
                    { for report.share_breakdown.iter().map(|s| {
                        let approx = (s.percent as f64 / 100.0 * total as f64).round();
                        html! {
                            <li>{ format!("{} {}% ({}개)", s.category.label(), s.percent, approx) }</li>
                        }
                    }) }
                </ul>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct WaferGridProps {
    pub lot: String,
    pub cards: Vec<WaferCard>,
    pub on_select: Callback<WaferCard>,
}

#[function_component(WaferGrid)]
pub fn wafer_grid(props: &WaferGridProps) -> Html {
    html! {
        <>
            <div class="legend">
                { "아래 목록의 웨이퍼의 결함을 텍스트로 입력 " }
                <span class="scratch">{ "Scratch" }</span>{ ", " }
                <span class="edge-ring">{ "Edge-Ring" }</span>{ ", " }
                <span class="no-pattern">{ "No Pattern" }</span>
            </div>
            <div class="current-lot">{ "현재 선택된 Lot: " }<strong>{ &props.lot }</strong></div>
            <div class="wafer-grid">
                { for props.cards.iter().map(|card| {
                    let defect = card.classification.defect_type;
                    let onclick = {
                        let card = card.clone();
                        props.on_select.reform(move |_| card.clone())
                    };
                    html! {
                        <div class={defect_class(defect)} {onclick}>
                            <div>{ format!("{} Wafer {}", card.lot_label, card.wafer_number) }</div>
                            <div class="wafer-disc">{ defect.label() }</div>
                        </div>
                    }
                }) }
            </div>
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct WaferHeatmapProps {
    pub wafer: WaferSelection,
    pub on_back: Callback<()>,
}

// Simulated defect spots: (top %, left %, size px, class)
const HEATMAP_SPOTS: [(u8, u8, u8, &str); 6] = [
    (20, 25, 12, "spot red"),
    (40, 65, 8, "spot yellow"),
    (70, 20, 8, "spot orange"),
    (60, 70, 12, "spot red"),
    (30, 40, 8, "spot yellow"),
    (80, 60, 8, "spot orange"),
];

#[function_component(WaferHeatmap)]
pub fn wafer_heatmap(props: &WaferHeatmapProps) -> Html {
    let wafer = &props.wafer;
    html! {
        <div class="heatmap">
            <div class="heatmap-header">
                <div class="lot">{ &wafer.lot_id }</div>
                <div>{ format!("수율 {}%", wafer.yield_percent) }</div>
            </div>
            <div class="wafer-outline">
                <div class="wafer-title">{ format!("{} Wafer {}", wafer.id, wafer.wafer_number) }</div>
                { for HEATMAP_SPOTS.iter().map(|&(top, left, size, class)| html! {
                    <div {class} style={format!(
                        "top: {}%; left: {}%; width: {}px; height: {}px", top, left, size, size
                    )}></div>
                }) }
            </div>
            <button onclick={props.on_back.reform(|_| ())}>{ "웨이퍼 목록으로 돌아가기" }</button>
        </div>
    }
}

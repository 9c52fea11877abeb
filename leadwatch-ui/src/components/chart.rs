//! Chart Component
//!
//! Two-line trend chart (total and enriched leads) using HTML5 Canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use leadwatch::view::dashboard::{CHART_TITLE, SERIES};
use leadwatch::{DashboardView, TrendSample};

/// Chart colors, one per series
const SERIES_COLORS: [&str; 2] = [
    "#2196F3", // Blue: total
    "#4CAF50", // Green: enriched
];

/// Trend chart component
#[component]
pub fn Chart(dashboard: Memo<DashboardView>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw when the trend changes
    create_effect(move |_| {
        let (samples, peak) = dashboard.with(|d| (d.trend.clone(), d.trend_peak));

        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &samples, peak);
        }
    });

    view! {
        <div class="relative">
            <h2 class="text-xl font-semibold mb-4">{CHART_TITLE}</h2>
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="w-full h-64 md:h-96 rounded-lg"
            />
            <ChartLegend />
        </div>
    }
}

/// Chart legend showing series colors
#[component]
fn ChartLegend() -> impl IntoView {
    view! {
        <div class="flex justify-center flex-wrap gap-4 mt-4">
            {SERIES
                .iter()
                .zip(SERIES_COLORS)
                .map(|(name, color)| view! {
                    <div class="flex items-center space-x-2">
                        <div
                            class="w-3 h-3 rounded-full"
                            style=format!("background-color: {}", color)
                        />
                        <span class="text-sm text-gray-300">{*name}</span>
                    </div>
                })
                .collect_view()}
        </div>
    }
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, samples: &[TrendSample], peak: u64) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 60.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if samples.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data yet", width / 2.0 - 40.0, height / 2.0);
        return;
    }

    // Counts start at zero; pad the top by 10%
    let y_max = if peak > 0 { peak as f64 * 1.1 } else { 1.0 };

    let x_at = |i: usize| {
        if samples.len() == 1 {
            margin_left + chart_width / 2.0
        } else {
            margin_left + (i as f64 / (samples.len() - 1) as f64) * chart_width
        }
    };
    let y_at = |value: u64| margin_top + (1.0 - value as f64 / y_max) * chart_height;

    // Horizontal grid lines (5 lines)
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        // Y-axis labels
        let value = y_max - (i as f64 / 5.0) * y_max;
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    // One line per series
    let series: [fn(&TrendSample) -> u64; 2] = [|s| s.leads, |s| s.enriched];
    for (value_of, color) in series.iter().zip(SERIES_COLORS) {
        ctx.set_stroke_style(&color.into());
        ctx.set_line_width(2.0);
        ctx.begin_path();
        for (i, sample) in samples.iter().enumerate() {
            let (x, y) = (x_at(i), y_at(value_of(sample)));
            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.stroke();

        ctx.set_fill_style(&color.into());
        for (i, sample) in samples.iter().enumerate() {
            ctx.begin_path();
            let _ = ctx.arc(x_at(i), y_at(value_of(sample)), 3.0, 0.0, std::f64::consts::PI * 2.0);
            ctx.fill();
        }
    }

    // X-axis labels: sample times
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");
    for (i, sample) in samples.iter().enumerate() {
        let _ = ctx.fill_text(&sample.time, x_at(i) - 25.0, height - 10.0);
    }
}

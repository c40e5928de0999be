use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

use crate::chart::{AgeBin, RateBar};
use crate::color;

// ---------------------------------------------------------------------------
// Survival-rate bar charts
// ---------------------------------------------------------------------------

/// Grouped bar chart of survival rates, one bar per label.
fn rate_chart(ui: &mut Ui, id: &str, title: &str, x_label: &str, bars: &[RateBar], hue: f32) {
    ui.heading(title);

    let colors = color::generate_palette(bars.len(), hue);
    let labels: Vec<&'static str> = bars.iter().map(|b| b.label).collect();

    let chart_bars: Vec<Bar> = bars
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, (bar, fill))| {
            Bar::new(i as f64, bar.percent)
                .name(bar.label)
                .fill(fill)
                .width(0.6)
        })
        .collect();

    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label("Survival Rate %")
        .include_y(0.0)
        .include_y(100.0)
        .x_axis_formatter(move |mark: GridMark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).map(|l| l.to_string()).unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(chart_bars).name(title));
        });
}

pub fn gender_chart(ui: &mut Ui, bars: &[RateBar]) {
    rate_chart(
        ui,
        "gender_survival",
        "Survival Rate of Genders on the Titanic",
        "Gender",
        bars,
        color::GENDER_HUE,
    );
}

pub fn class_chart(ui: &mut Ui, bars: &[RateBar]) {
    rate_chart(
        ui,
        "class_survival",
        "Survival Rate of Classes on the Titanic",
        "Class",
        bars,
        color::CLASS_HUE,
    );
}

// ---------------------------------------------------------------------------
// Age histogram
// ---------------------------------------------------------------------------

/// Age distribution, one bar per year of age.
pub fn age_histogram(ui: &mut Ui, bins: &[AgeBin]) {
    let title = "Age Distribution on the Titanic";
    ui.heading(title);

    let fill = color::single(color::AGE_HUE);
    let bars: Vec<Bar> = bins
        .iter()
        .map(|bin| {
            // Centre the bar on its one-year interval.
            Bar::new(f64::from(bin.age) + 0.5, bin.count as f64)
                .name(format!("{}-{} yrs", bin.age, bin.age + 1))
                .fill(fill)
                .width(1.0)
        })
        .collect();

    Plot::new("age_histogram")
        .x_axis_label("Ages (yrs)")
        .y_axis_label("Number of People")
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(title));
        });
}

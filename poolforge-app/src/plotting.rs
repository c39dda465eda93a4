//! Charts written next to each operator report.

use crate::workflow::OperatorReport;
use anyhow::Result;
use plotters::prelude::*;
use poolforge_core::{
    dose::to_fixed,
    lsi::{SCALE_MAX, SCALE_MIN},
};
use poolforge_schemas::treatment::ThiosulfateRow;
use std::path::Path;
use tracing::info;

/// Corrosive, balanced and scaling bands of the LSI scale.
const LSI_BANDS: [(f64, f64, RGBColor); 3] = [
    (SCALE_MIN, -0.3, RED),
    (-0.3, 0.3, GREEN),
    (0.3, SCALE_MAX, BLUE),
];

/// Generates and saves all charts for a report run.
pub fn generate_all_plots(output_dir: &Path, report: &OperatorReport) -> Result<()> {
    info!(dir = %output_dir.display(), "generating charts");

    plot_lsi_scale(output_dir, report.lsi.lsi)?;
    if let Some(thiosulfate) = &report.thiosulfate {
        if !thiosulfate.rows.is_empty() {
            plot_thiosulfate_curve(output_dir, &thiosulfate.rows)?;
        }
    }
    Ok(())
}

/// The -0.6..0.6 LSI scale with the measured value marked.
fn plot_lsi_scale(output_dir: &Path, lsi: f64) -> Result<()> {
    let path = output_dir.join("lsi_scale.png");
    let root = BitMapBackend::new(&path, (1024, 320)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Langelier Saturation Index: {}", to_fixed(lsi, 2)), ("sans-serif", 40).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(10)
        .build_cartesian_2d(SCALE_MIN..SCALE_MAX, 0f64..1f64)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(0)
        .x_desc("LSI (negative: corrosive, positive: scaling)")
        .draw()?;

    chart.draw_series(LSI_BANDS.iter().map(|(low, high, color)| {
        Rectangle::new([(*low, 0.0), (*high, 1.0)], color.mix(0.35).filled())
    }))?;

    if !lsi.is_nan() {
        let x = lsi.clamp(SCALE_MIN, SCALE_MAX);
        chart
            .draw_series(LineSeries::new(vec![(x, 0.0), (x, 1.0)], BLACK.stroke_width(4)))?
            .label(format!("Measured LSI {}", to_fixed(lsi, 2)))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.filled()));

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Ounces of thiosulfate against the free chlorine level they bring the water down to.
fn plot_thiosulfate_curve(output_dir: &Path, rows: &[ThiosulfateRow]) -> Result<()> {
    let path = output_dir.join("thiosulfate_curve.png");
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_fc = rows.iter().map(|r| r.target_fc).fold(1.0, f64::max);
    let max_oz = rows.iter().map(|r| r.dose_oz).fold(0.0, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption("Sodium Thiosulfate Dose", ("sans-serif", 50).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..max_fc * 1.05, 0f64..max_oz * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Target free chlorine (ppm)")
        .y_desc("Sodium thiosulfate (oz)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            rows.iter().map(|r| (r.target_fc, r.dose_oz)),
            BLUE.stroke_width(2),
        ))?
        .label("Dose")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.filled()));

    chart.draw_series(
        rows.iter()
            .map(|r| Circle::new((r.target_fc, r.dose_oz), 4, BLUE.filled())),
    )?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

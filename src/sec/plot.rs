//! # 标定曲线图
//!
//! 使用 `plotters` 绘制标准品 K 对 log10(Rg) 的散点与拟合直线，样品位置以竖线标出。
//! 仅作诊断用途。
//!
//! ## 依赖关系
//! - 被 `commands/estimate.rs` 在 `--debug` 时调用
//! - 使用 `sec/calibration.rs` 的 CalibrationModel
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, SizerError};
use crate::sec::CalibrationModel;

use plotters::prelude::*;
use std::path::Path;

pub const PLOT_FILE: &str = "calibration_curve.png";

fn plot_err<E: std::fmt::Display>(e: E) -> SizerError {
    SizerError::PlotError(e.to_string())
}

/// 绘制标定曲线
///
/// `standards` 为 (K, Rg)，`samples` 为样品的 K。
pub fn generate_calibration_plot(
    standards: &[(f64, f64)],
    samples: &[f64],
    model: &CalibrationModel,
    output_path: &Path,
) -> Result<()> {
    if standards.is_empty() {
        return Err(SizerError::PlotError("No data to plot".to_string()));
    }

    let points: Vec<(f64, f64)> = standards.iter().map(|&(k, rg)| (k, rg.log10())).collect();

    let xs = points
        .iter()
        .map(|(x, _)| *x)
        .chain(samples.iter().copied().filter(|k| k.is_finite()));
    let (x_min, x_max) = xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
        (lo.min(x), hi.max(x))
    });
    let x_margin = ((x_max - x_min).abs() * 0.1).max(0.05);
    let (x_lo, x_hi) = (x_min - x_margin, x_max + x_margin);

    let line_y = |x: f64| model.slope * x + model.intercept;
    let ys = points
        .iter()
        .map(|(_, y)| *y)
        .chain([line_y(x_lo), line_y(x_hi)]);
    let (y_min, y_max) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });
    let y_margin = ((y_max - y_min).abs() * 0.1).max(0.05);
    let (y_lo, y_hi) = (y_min - y_margin, y_max + y_margin);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let caption = match model.r_squared {
        Some(r) => format!("SEC calibration (R² = {:.4})", r),
        None => "SEC calibration (R² undefined)".to_string(),
    };
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Partition coefficient K")
        .y_desc("log10(Rg / Å)")
        .draw()
        .map_err(plot_err)?;

    // 拟合直线
    chart
        .draw_series(LineSeries::new(
            [(x_lo, line_y(x_lo)), (x_hi, line_y(x_hi))],
            BLUE.stroke_width(2),
        ))
        .map_err(plot_err)?
        .label(format!(
            "log10(Rg) = {:.3} K + {:.3}",
            model.slope, model.intercept
        ))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    // 标准品
    chart
        .draw_series(
            points
                .iter()
                .map(|(x, y)| Circle::new((*x, *y), 5, RED.filled())),
        )
        .map_err(plot_err)?
        .label("Standards")
        .legend(|(x, y)| Circle::new((x + 10, y), 5, RED.filled()));

    // 样品位置
    for k in samples.iter().filter(|k| k.is_finite()) {
        chart
            .draw_series(LineSeries::new(
                [(*k, y_lo), (*k, y_hi)],
                GREEN.mix(0.6).stroke_width(1),
            ))
            .map_err(plot_err)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;

    Ok(())
}

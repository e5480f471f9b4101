//! 相关性热力图渲染 - 固定尺寸与调色板，相同输入产出确定性的PNG

use anyhow::{Result, anyhow};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::CorrelationMatrix;
use crate::types::dataset::format_number;

/// 固定画布尺寸
const WIDTH: u32 = 800;
const HEIGHT: u32 = 700;

const MARGIN_LEFT: i32 = 140;
const MARGIN_TOP: i32 = 64;
const MARGIN_RIGHT: i32 = 40;
const MARGIN_BOTTOM: i32 = 110;

/// 将相关矩阵渲染为带数值标注的热力图，返回PNG字节。
/// 绘图缓冲区在函数返回前释放。
pub fn render_heatmap(matrix: &CorrelationMatrix) -> Result<Vec<u8>> {
    let n = matrix.size();
    if n == 0 {
        return Err(anyhow!("correlation matrix is empty"));
    }

    let mut buffer = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let title_style = TextStyle::from(("sans-serif", 28))
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(
            "Correlation Heatmap",
            (WIDTH as i32 / 2, 18),
            title_style,
        ))?;

        let plot_width = WIDTH as i32 - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_height = HEIGHT as i32 - MARGIN_TOP - MARGIN_BOTTOM;
        let cell = (plot_width / n as i32).min(plot_height / n as i32);

        let label_style = TextStyle::from(("sans-serif", 15))
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));
        let column_label_style = TextStyle::from(("sans-serif", 15))
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        let value_style = TextStyle::from(("sans-serif", 14))
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));

        for (row, row_values) in matrix.values.iter().enumerate() {
            let y0 = MARGIN_TOP + row as i32 * cell;

            // 行标签
            root.draw(&Text::new(
                truncate_label(&matrix.labels[row]),
                (MARGIN_LEFT - 8, y0 + cell / 2),
                label_style.clone(),
            ))?;

            for (col, value) in row_values.iter().enumerate() {
                let x0 = MARGIN_LEFT + col as i32 * cell;
                let color = value.map(diverging_color).unwrap_or(RGBColor(225, 225, 225));

                root.draw(&Rectangle::new(
                    [(x0, y0), (x0 + cell, y0 + cell)],
                    color.filled(),
                ))?;
                root.draw(&Rectangle::new(
                    [(x0, y0), (x0 + cell, y0 + cell)],
                    BLACK.stroke_width(1),
                ))?;

                let annotation = value
                    .map(|v| format_number((v * 100.0).round() / 100.0))
                    .unwrap_or_else(|| "-".to_string());
                root.draw(&Text::new(
                    annotation,
                    (x0 + cell / 2, y0 + cell / 2),
                    value_style.clone(),
                ))?;
            }
        }

        // 列标签
        let bottom = MARGIN_TOP + n as i32 * cell;
        for (col, label) in matrix.labels.iter().enumerate() {
            let x0 = MARGIN_LEFT + col as i32 * cell;
            root.draw(&Text::new(
                truncate_label(label),
                (x0 + cell / 2, bottom + 8),
                column_label_style.clone(),
            ))?;
        }

        root.present()?;
    }

    let img = image::RgbImage::from_raw(WIDTH, HEIGHT, buffer)
        .ok_or_else(|| anyhow!("heatmap pixel buffer has unexpected size"))?;
    let mut png = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut png),
        image::ImageFormat::Png,
    )?;
    Ok(png)
}

/// coolwarm风格的发散调色板：-1蓝，0白，+1红
fn diverging_color(value: f64) -> RGBColor {
    let v = value.clamp(-1.0, 1.0);
    let blue = (59.0, 76.0, 192.0);
    let white = (255.0, 255.0, 255.0);
    let red = (180.0, 4.0, 38.0);

    let (from, to, t) = if v < 0.0 {
        (blue, white, v + 1.0)
    } else {
        (white, red, v)
    };

    RGBColor(
        lerp(from.0, to.0, t),
        lerp(from.1, to.1, t),
        lerp(from.2, to.2, t),
    )
}

fn lerp(from: f64, to: f64, t: f64) -> u8 {
    (from + (to - from) * t).round() as u8
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() > 14 {
        let short: String = label.chars().take(12).collect();
        format!("{}..", short)
    } else {
        label.to_string()
    }
}

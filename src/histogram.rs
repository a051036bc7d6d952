use std::collections::HashMap;

use anyhow::Result;
use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::prelude::*;

/// Renders measurement counts as a bar chart over all 2^n basis states,
/// labelled with their bit-strings.
pub fn plot_histogram(
    counts: &HashMap<String, u32>,
    num_of_qbits: usize,
    file_name: &str,
) -> Result<()> {
    let dim = 2_u32.pow(num_of_qbits as u32);
    let y_max = counts.values().copied().max().unwrap_or(1) * 11 / 10 + 1;

    let root = BitMapBackend::new(file_name, (640, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .margin(10)
        .caption("Measurement counts", ("sans-serif", 20))
        .build_cartesian_2d((0..dim).into_segmented(), 0_u32..y_max)?;

    chart
        .configure_mesh()
        .x_labels(dim as usize)
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(index) => {
                format!("{:0width$b}", index, width = num_of_qbits)
            }
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(RED.filled())
            .data(counts.iter().map(|(outcome, &count)| {
                (u32::from_str_radix(outcome, 2).unwrap_or(0), count)
            })),
    )?;

    root.present()?;
    Ok(())
}

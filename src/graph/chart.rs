//! Draws the expenses chart and encodes it for embedding in a page.
//!
//! The chart is described with ECharts options and rasterized on the server,
//! so the page needs no JavaScript to display it.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use charming::{
    Chart, ImageFormat, ImageRenderer,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisType, ItemStyle},
    series::bar,
};

use crate::{Error, graph::CategorySeries};

pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 600;

const BAR_COLOR: &str = "#87CEEB";
const LABEL_ROTATION: f64 = 45.0;

/// A bar chart with one bar per category.
pub fn expenses_chart(series: &CategorySeries) -> Chart {
    Chart::new()
        .background_color("#ffffff")
        .title(Title::new().text("Expenses by Category").left("center"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name("Categories")
                .axis_label(AxisLabel::new().rotate(LABEL_ROTATION))
                .data(series.categories.clone()),
        )
        .y_axis(Axis::new().type_(AxisType::Value).name("Amount"))
        .series(
            bar::Bar::new()
                .name("Amount")
                .item_style(ItemStyle::new().color(BAR_COLOR))
                .data(series.amounts.clone()),
        )
}

/// Draw the chart for `series` as a PNG and return it as a data URI that can
/// be used as the `src` of an `img` element.
///
/// This blocks while the chart is drawn, call it from a blocking task.
pub fn render_chart_data_uri(series: &CategorySeries) -> Result<String, Error> {
    let chart = expenses_chart(series);

    let mut renderer = ImageRenderer::new(CHART_WIDTH, CHART_HEIGHT);
    let png = renderer
        .render_format(ImageFormat::Png, &chart)
        .map_err(|error| Error::ChartRender(format!("{error:?}")))?;

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}

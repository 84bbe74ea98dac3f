//! The bar chart of the total amount per category.

mod chart;
mod page;
mod series;

pub use page::get_graph_page;
pub use series::CategorySeries;

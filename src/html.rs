//! Markup and styles shared between pages.
use maud::{DOCTYPE, Markup, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

use crate::endpoints;

// Link styles
pub const LINK_STYLE: &str = "link";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "button button-primary";

pub const BUTTON_DELETE_STYLE: &str = "link link-delete";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "form-container";
pub const FORM_LABEL_STYLE: &str = "form-label";
pub const FORM_TEXT_INPUT_STYLE: &str = "form-input";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "table-header";
pub const TABLE_ROW_STYLE: &str = "table-row";
pub const TABLE_CELL_STYLE: &str = "table-cell";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "page-container";

/// The page skeleton shared by every view.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Spendlog" }
                link href="/static/main.css" rel="stylesheet";
            }

            body
            {
                (nav_bar())
                (content)
            }
        }
    }
}

fn nav_bar() -> Markup {
    html!(
        nav class="nav-bar"
        {
            a href=(endpoints::ROOT) class="nav-link" { "Expenses" }
            a href=(endpoints::GRAPH_VIEW) class="nav-link" { "Graph" }
        }
    )
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="error-page"
        {
            h1 class="error-code" { (header) }

            p class="error-description" { (description) }

            p class="error-fix" { (fix) }

            a href=(endpoints::ROOT) class=(BUTTON_PRIMARY_STYLE)
            {
                "Back to Homepage"
            }
        }
    );

    base(title, &content)
}

pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(2)))
    });

    static NEGATIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(2)))
    });

    let (Some(positive_fmt), Some(negative_fmt)) = (positive_fmt, negative_fmt) else {
        return format!("{number:.2}");
    };

    if !number.is_finite() {
        return number.to_string();
    }

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.len() >= 3 && formatted_string.as_bytes()[formatted_string.len() - 3] != b'.'
    {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}

/// A link with blue text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE)
        {
          (text)
        }
    )
}

#[cfg(test)]
mod format_currency_tests {
    use super::format_currency;

    #[test]
    fn formats_zero() {
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn prefixes_dollar_sign() {
        let formatted = format_currency(12.3);

        assert!(formatted.starts_with('$'), "got {formatted}");
        assert!(formatted.ends_with("30"), "got {formatted}");
    }

    #[test]
    fn prefixes_negative_sign() {
        let formatted = format_currency(-4.5);

        assert!(formatted.starts_with("-$"), "got {formatted}");
    }

    #[test]
    fn falls_back_for_non_finite_numbers() {
        assert_eq!(format_currency(f64::INFINITY), "inf");
    }
}

//! Sorting and pagination for the route table.

use std::borrow::Borrow;
use std::cmp::Ordering;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::fields::RouteField;
use crate::metrics::ProcessedRoute;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current sort column of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSort {
    pub field: RouteField,
    pub direction: SortDirection,
}

impl Default for TableSort {
    fn default() -> Self {
        Self {
            field: RouteField::Number,
            direction: SortDirection::Asc,
        }
    }
}

impl TableSort {
    /// Clicking the current column flips direction; another column starts
    /// ascending.
    pub fn toggled(self, field: RouteField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.reversed(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Asc,
            }
        }
    }
}

/// Text columns compare case-insensitively, falling back to byte order on
/// ties. No locale-aware collation beyond Unicode lowercase folding.
fn compare(field: RouteField, a: &ProcessedRoute, b: &ProcessedRoute) -> Ordering {
    if field.is_numeric() {
        let a = field.numeric_value(a).unwrap_or(0.0);
        let b = field.numeric_value(b).unwrap_or(0.0);
        a.total_cmp(&b)
    } else {
        let a = field.text_value(a).unwrap_or("");
        let b = field.text_value(b).unwrap_or("");
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    }
}

/// Stable sort of `routes` by `sort`.
pub fn sort_routes<R: Borrow<ProcessedRoute>>(routes: &[R], sort: TableSort) -> Vec<&ProcessedRoute> {
    let mut sorted: Vec<&ProcessedRoute> = routes
        .iter()
        .map(<R as Borrow<ProcessedRoute>>::borrow)
        .collect();

    sorted.sort_by(|a, b| {
        let ord = compare(sort.field, a, b);
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}

/// One page of a larger list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Returns page `page` (1-based) of `items`. Pages past the end, and page 0,
/// are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);

    let offset = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(per_page));

    let page_items = match offset {
        Some(offset) => items.iter().skip(offset).take(per_page).cloned().collect(),
        None => Vec::new(),
    };

    Page {
        items: page_items,
        page,
        total_pages,
        total_items: items.len(),
    }
}

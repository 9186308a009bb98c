use serde::Serialize;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Search predicate
// ---------------------------------------------------------------------------

/// Return indices of rows where any present cell contains `term`
/// (case-insensitive). An empty or blank term matches every row.
pub fn search_rows(dataset: &Dataset, term: &str) -> Vec<usize> {
    let needle = term.trim().to_lowercase();
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            needle.is_empty()
                || row
                    .present_values()
                    .any(|v| v.to_string().to_lowercase().contains(&needle))
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// One page of a row listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based page number after clamping.
    pub page: usize,
    pub total_pages: usize,
    /// Row indices shown on this page.
    pub rows: Vec<usize>,
    /// 1-based index of the first shown row (0 when nothing is shown).
    pub first: usize,
    /// 1-based index of the last shown row.
    pub last: usize,
    /// Number of rows across all pages.
    pub total: usize,
}

impl Page {
    /// `"Showing a to b of n rows"`.
    pub fn caption(&self) -> String {
        format!(
            "Showing {} to {} of {} rows",
            self.first, self.last, self.total
        )
    }
}

/// Slice `indices` into page `page` (1-based, clamped into range).
pub fn paginate(indices: &[usize], page: usize, rows_per_page: usize) -> Page {
    let per_page = rows_per_page.max(1);
    let total = indices.len();
    let total_pages = total.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let start = ((page - 1) * per_page).min(total);
    let end = (start + per_page).min(total);
    let rows = indices[start..end].to_vec();

    Page {
        page,
        total_pages,
        first: if rows.is_empty() { 0 } else { start + 1 },
        last: end,
        rows,
        total,
    }
}

// ---------------------------------------------------------------------------
// Column selection
// ---------------------------------------------------------------------------

/// Toggle `column` in `selected`. The last remaining column cannot be
/// deselected. Returns whether the selection changed.
pub fn toggle_column(selected: &mut Vec<String>, column: &str) -> bool {
    if let Some(pos) = selected.iter().position(|c| c == column) {
        if selected.len() > 1 {
            selected.remove(pos);
            return true;
        }
        false
    } else {
        selected.push(column.to_string());
        true
    }
}

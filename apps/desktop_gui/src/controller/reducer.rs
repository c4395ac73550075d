//! Reducer-like grid state: sorting, filtering, and draft filter edits.
//!
//! Pure data transitions over the accumulated record set; the egui layer
//! only renders this state and calls the transition methods. Sorting is
//! stable and descending is the exact reverse of ascending; filters are
//! AND-combined across columns.

use std::cmp::Ordering;

use shared::domain::{field_number, field_text, parse_number, Record};
use shared::schema::{ColumnKind, ColumnSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub order: SortOrder,
}

/// Comparison modes for numeric column filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericOp {
    #[default]
    GreaterThan,
    LessThan,
    Equals,
    InRange,
}

impl NumericOp {
    pub const ALL: [NumericOp; 4] = [
        Self::GreaterThan,
        Self::LessThan,
        Self::Equals,
        Self::InRange,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::GreaterThan => "Greater than",
            Self::LessThan => "Less than",
            Self::Equals => "Equals",
            Self::InRange => "In range",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnFilter {
    /// Case-insensitive substring match on the rendered cell text.
    Text { needle: String },
    /// Numeric comparison; rows without a numeric value never match.
    /// `high` is only meaningful for `InRange`.
    Numeric { op: NumericOp, low: f64, high: f64 },
}

/// Per-column filter edits awaiting Apply.
#[derive(Debug, Clone, Default)]
pub struct FilterDraft {
    pub text: String,
    pub op: NumericOp,
    pub low: String,
    pub high: String,
}

pub struct GridModel {
    columns: &'static [ColumnSpec],
    rows: Vec<Record>,
    sort: Option<SortState>,
    filters: Vec<Option<ColumnFilter>>,
    drafts: Vec<FilterDraft>,
    /// Indices into `rows`, in display order.
    view: Vec<usize>,
}

impl GridModel {
    pub fn new(columns: &'static [ColumnSpec]) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            sort: None,
            filters: vec![None; columns.len()],
            drafts: vec![FilterDraft::default(); columns.len()],
            view: Vec::new(),
        }
    }

    /// Replace the full record set (one paginator run committed at once).
    pub fn set_rows(&mut self, rows: Vec<Record>) {
        self.rows = rows;
        self.rebuild_view();
    }

    pub fn columns(&self) -> &'static [ColumnSpec] {
        self.columns
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &Record> {
        self.view.iter().map(|&row| &self.rows[row])
    }

    pub fn visible_len(&self) -> usize {
        self.view.len()
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn filter(&self, column: usize) -> Option<&ColumnFilter> {
        self.filters[column].as_ref()
    }

    pub fn draft_mut(&mut self, column: usize) -> &mut FilterDraft {
        &mut self.drafts[column]
    }

    /// True when no sort and no filter is engaged.
    pub fn is_pristine(&self) -> bool {
        self.sort.is_none() && self.filters.iter().all(Option::is_none)
    }

    /// none -> ascending -> descending -> none. Engaging one column's sort
    /// disengages any other column's.
    pub fn toggle_sort(&mut self, column: usize) {
        self.sort = match self.sort {
            Some(SortState {
                column: current,
                order: SortOrder::Ascending,
            }) if current == column => Some(SortState {
                column,
                order: SortOrder::Descending,
            }),
            Some(SortState {
                column: current,
                order: SortOrder::Descending,
            }) if current == column => None,
            _ => Some(SortState {
                column,
                order: SortOrder::Ascending,
            }),
        };
        self.rebuild_view();
    }

    /// Commit the column's draft as its active filter. An empty or
    /// unparseable draft clears the filter instead.
    pub fn apply_draft(&mut self, column: usize) {
        let spec = self.columns[column];
        let draft = &self.drafts[column];
        self.filters[column] = match spec.kind {
            ColumnKind::Text => {
                let needle = draft.text.trim();
                if needle.is_empty() {
                    None
                } else {
                    Some(ColumnFilter::Text {
                        needle: needle.to_string(),
                    })
                }
            }
            ColumnKind::Numeric => numeric_filter_from_draft(draft),
        };
        self.rebuild_view();
    }

    /// Drop the column's filter and its draft.
    pub fn clear_filter(&mut self, column: usize) {
        self.filters[column] = None;
        self.drafts[column] = FilterDraft::default();
        self.rebuild_view();
    }

    /// Restore the unfiltered, unsorted full set.
    pub fn reset(&mut self) {
        self.sort = None;
        for filter in &mut self.filters {
            *filter = None;
        }
        for draft in &mut self.drafts {
            *draft = FilterDraft::default();
        }
        self.rebuild_view();
    }

    fn rebuild_view(&mut self) {
        let mut view: Vec<usize> = (0..self.rows.len())
            .filter(|&row| self.row_passes_filters(row))
            .collect();

        if let Some(SortState { column, order }) = self.sort {
            let spec = self.columns[column];
            view.sort_by(|&a, &b| compare_rows(&self.rows[a], &self.rows[b], spec));
            // Stable ascending sort, then reverse: descending is the exact
            // reverse of the ascending sequence, ties included.
            if order == SortOrder::Descending {
                view.reverse();
            }
        }

        self.view = view;
    }

    fn row_passes_filters(&self, row: usize) -> bool {
        self.columns
            .iter()
            .zip(&self.filters)
            .all(|(spec, filter)| match filter {
                None => true,
                Some(filter) => filter_matches(&self.rows[row], spec, filter),
            })
    }
}

fn numeric_filter_from_draft(draft: &FilterDraft) -> Option<ColumnFilter> {
    let low = parse_number(&draft.low)?;
    let high = match draft.op {
        NumericOp::InRange => parse_number(&draft.high)?,
        _ => low,
    };
    Some(ColumnFilter::Numeric {
        op: draft.op,
        low,
        high,
    })
}

fn compare_rows(a: &Record, b: &Record, spec: ColumnSpec) -> Ordering {
    match spec.kind {
        ColumnKind::Numeric => {
            match (field_number(a, spec.field), field_number(b, spec.field)) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }
        ColumnKind::Text => field_text(a, spec.field)
            .to_lowercase()
            .cmp(&field_text(b, spec.field).to_lowercase()),
    }
}

fn filter_matches(record: &Record, spec: &ColumnSpec, filter: &ColumnFilter) -> bool {
    match filter {
        ColumnFilter::Text { needle } => field_text(record, spec.field)
            .to_lowercase()
            .contains(&needle.to_lowercase()),
        ColumnFilter::Numeric { op, low, high } => match field_number(record, spec.field) {
            None => false,
            Some(value) => match op {
                NumericOp::GreaterThan => value > *low,
                NumericOp::LessThan => value < *low,
                NumericOp::Equals => value == *low,
                NumericOp::InRange => value >= *low && value <= *high,
            },
        },
    }
}

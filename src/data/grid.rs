use std::cmp::Ordering;

use super::model::{Penguin, PenguinDataset};

// ---------------------------------------------------------------------------
// Grid columns
// ---------------------------------------------------------------------------

/// The columns shown in the data grid, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridColumn {
    Species,
    Island,
    BillLength,
    BillDepth,
    BodyMass,
}

impl GridColumn {
    pub const ALL: [GridColumn; 5] = [
        GridColumn::Species,
        GridColumn::Island,
        GridColumn::BillLength,
        GridColumn::BillDepth,
        GridColumn::BodyMass,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            GridColumn::Species => "species",
            GridColumn::Island => "island",
            GridColumn::BillLength => "bill_length_mm",
            GridColumn::BillDepth => "bill_depth_mm",
            GridColumn::BodyMass => "body_mass_g",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, GridColumn::Species | GridColumn::Island)
    }

    /// Position in [`GridColumn::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    fn text<'a>(&self, p: &'a Penguin) -> &'a str {
        match self {
            GridColumn::Species => p.species.as_str(),
            GridColumn::Island => &p.island,
            _ => "",
        }
    }

    fn number(&self, p: &Penguin) -> Option<f64> {
        match self {
            GridColumn::BillLength => p.bill_length_mm,
            GridColumn::BillDepth => p.bill_depth_mm,
            GridColumn::BodyMass => p.body_mass_g,
            GridColumn::Species | GridColumn::Island => None,
        }
    }

    /// Cell text as rendered in the grid. Missing numbers render empty.
    pub fn cell(&self, p: &Penguin) -> String {
        if self.is_numeric() {
            match self.number(p) {
                Some(v) if *self == GridColumn::BodyMass => format!("{v:.0}"),
                Some(v) => format!("{v:.1}"),
                None => String::new(),
            }
        } else {
            self.text(p).to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Per-column filters
// ---------------------------------------------------------------------------

/// Filter entered in a column's header cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnFilter {
    /// Case-insensitive substring match (categorical columns).
    Contains(String),
    /// Inclusive bounds; either side may be open (numeric columns).
    Range { min: Option<f64>, max: Option<f64> },
}

impl ColumnFilter {
    fn for_column(column: GridColumn) -> Self {
        if column.is_numeric() {
            ColumnFilter::Range {
                min: None,
                max: None,
            }
        } else {
            ColumnFilter::Contains(String::new())
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            ColumnFilter::Contains(needle) => !needle.trim().is_empty(),
            ColumnFilter::Range { min, max } => min.is_some() || max.is_some(),
        }
    }

    fn matches(&self, column: GridColumn, p: &Penguin) -> bool {
        match self {
            ColumnFilter::Contains(needle) => {
                let needle = needle.trim();
                needle.is_empty()
                    || column
                        .text(p)
                        .to_lowercase()
                        .contains(&needle.to_lowercase())
            }
            ColumnFilter::Range { min: None, max: None } => true,
            ColumnFilter::Range { min, max } => match column.number(p) {
                Some(v) => min.is_none_or(|lo| v >= lo) && max.is_none_or(|hi| v <= hi),
                None => false,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSort {
    pub column: GridColumn,
    pub ascending: bool,
}

fn compare(column: GridColumn, a: &Penguin, b: &Penguin) -> Ordering {
    if column.is_numeric() {
        match (column.number(a), column.number(b)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    } else {
        column.text(a).cmp(column.text(b))
    }
}

// ---------------------------------------------------------------------------
// GridState – display-only narrowing of the filtered view
// ---------------------------------------------------------------------------

/// Column filters and sort order of the data grid. These only affect which
/// rows of the filtered view the grid displays, never the view itself.
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    filters: [ColumnFilter; 5],
    sort: Option<GridSort>,
}

impl Default for GridState {
    fn default() -> Self {
        GridState {
            filters: GridColumn::ALL.map(ColumnFilter::for_column),
            sort: None,
        }
    }
}

impl GridState {
    pub fn filter_mut(&mut self, column: GridColumn) -> &mut ColumnFilter {
        &mut self.filters[column.index()]
    }

    pub fn set_filter(&mut self, column: GridColumn, filter: ColumnFilter) {
        self.filters[column.index()] = filter;
    }

    pub fn clear_filters(&mut self) {
        self.filters = GridColumn::ALL.map(ColumnFilter::for_column);
    }

    pub fn any_filter_active(&self) -> bool {
        self.filters.iter().any(ColumnFilter::is_active)
    }

    pub fn sort(&self) -> Option<GridSort> {
        self.sort
    }

    /// Header click: ascending → descending → source order.
    pub fn cycle_sort(&mut self, column: GridColumn) {
        self.sort = match self.sort {
            Some(GridSort {
                column: current,
                ascending: true,
            }) if current == column => Some(GridSort {
                column,
                ascending: false,
            }),
            Some(GridSort { column: current, .. }) if current == column => None,
            _ => Some(GridSort {
                column,
                ascending: true,
            }),
        };
    }

    /// Rows of `view` the grid should display, in display order.
    pub fn rows(&self, dataset: &PenguinDataset, view: &[usize]) -> Vec<usize> {
        let mut rows: Vec<usize> = view
            .iter()
            .copied()
            .filter(|&i| {
                dataset.get(i).is_some_and(|p| {
                    GridColumn::ALL
                        .iter()
                        .zip(&self.filters)
                        .all(|(col, f)| f.matches(*col, p))
                })
            })
            .collect();

        if let Some(GridSort { column, ascending }) = self.sort {
            let records = dataset.records();
            rows.sort_by(|&a, &b| {
                let ord = compare(column, &records[a], &records[b]);
                // Missing values stay last in both directions.
                let missing = column.is_numeric()
                    && (column.number(&records[a]).is_none()
                        || column.number(&records[b]).is_none());
                if ascending || missing {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        rows
    }
}

//! Generic data table: column projection, click-driven sort cycling, and a
//! render-ready [`TableModel`].
//!
//! The table never owns or mutates its rows.  Sorting produces an index
//! view over the caller's slice; the view is memoized on the caller's data
//! generation and the active sort, and recomputed when either changes.

use std::cmp::Ordering;
use std::fmt;

use super::collate::locale_cmp;

// ───────────────────────────────────────── rows ──────────────

/// Field access by key.  Values are stringified; `None` means the field is
/// missing or null and reads as the empty string.
pub trait Record {
    fn field(&self, key: &str) -> Option<String>;
}

// ───────────────────────────────────────── columns ───────────

/// Horizontal alignment of a column's header and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

pub type RenderFn<T> = Box<dyn Fn(&T) -> String>;
pub type CompareFn<T> = Box<dyn Fn(&T, &T) -> Ordering>;

/// How one field is labelled, read, displayed, and (optionally) sorted.
pub struct Column<T> {
    pub key: String,
    pub header: String,
    pub sortable: bool,
    pub align: Align,
    /// Fixed width in cells; `None` shares the remaining space.
    pub width: Option<u16>,
    /// Cells are drawn as coloured badges keyed on their text.
    pub badge: bool,
    render: Option<RenderFn<T>>,
    compare: Option<CompareFn<T>>,
}

impl<T> Column<T> {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: false,
            align: Align::Left,
            width: None,
            badge: false,
            render: None,
            compare: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn badge(mut self) -> Self {
        self.badge = true;
        self
    }

    /// Project the whole row into the displayed cell text.
    pub fn render(mut self, f: impl Fn(&T) -> String + 'static) -> Self {
        self.render = Some(Box::new(f));
        self
    }

    /// Opt-in comparator replacing the default string comparison.
    pub fn compare(mut self, f: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        self.compare = Some(Box::new(f));
        self
    }
}

impl<T: Record> Column<T> {
    /// Displayed text for `row`.
    pub fn cell(&self, row: &T) -> String {
        match &self.render {
            Some(render) => render(row),
            None => row.field(&self.key).unwrap_or_default(),
        }
    }

    fn cmp_rows(&self, a: &T, b: &T) -> Ordering {
        match &self.compare {
            Some(compare) => compare(a, b),
            None => compare_field(a, b, &self.key),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("align", &self.align)
            .field("width", &self.width)
            .field("badge", &self.badge)
            .field("render", &self.render.is_some())
            .field("compare", &self.compare.is_some())
            .finish()
    }
}

/// Default comparison: both raw values as strings, locale-aware.
fn compare_field<T: Record>(a: &T, b: &T, key: &str) -> Ordering {
    let a = a.field(key).unwrap_or_default();
    let b = b.field(key).unwrap_or_default();
    locale_cmp(&a, &b)
}

// ───────────────────────────────────────── sorting ───────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: Direction,
}

/// Sort state after clicking the header of column `key`.
///
/// A new column starts ascending; the active column alternates between
/// ascending and descending.  There is no unsorted state.
pub fn next_sort(current: Option<&SortState>, key: &str) -> SortState {
    let direction = match current {
        Some(s) if s.key == key && s.direction == Direction::Ascending => Direction::Descending,
        _ => Direction::Ascending,
    };
    SortState {
        key: key.to_string(),
        direction,
    }
}

/// Stable index view of `rows` ordered by `sort`.  Without a sort, or for a
/// key no column declares, rows keep their original order.
pub fn sorted_view<T: Record>(rows: &[T], columns: &[Column<T>], sort: Option<&SortState>) -> Vec<usize> {
    let mut view: Vec<usize> = (0..rows.len()).collect();
    let Some(sort) = sort else {
        return view;
    };

    let column = columns.iter().find(|c| c.key == sort.key);
    view.sort_by(|&a, &b| {
        let ord = match column {
            Some(col) => col.cmp_rows(&rows[a], &rows[b]),
            None => compare_field(&rows[a], &rows[b], &sort.key),
        };
        match sort.direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    });
    view
}

// ───────────────────────────────────────── state ─────────────

#[derive(Debug, Clone)]
struct ViewMemo {
    generation: u64,
    len: usize,
    sort: Option<SortState>,
    view: Vec<usize>,
}

/// Per-table interaction state: active sort, selected row, scroll offset.
#[derive(Debug, Default)]
pub struct TableState {
    sort: Option<SortState>,
    memo: Option<ViewMemo>,
    /// Index into the *sorted* view.
    pub selected: usize,
    pub offset: usize,
}

impl TableState {
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Handle a click on the header of column `key`.  Returns `false` when
    /// the column does not exist or is not sortable.
    pub fn request_sort<T>(&mut self, columns: &[Column<T>], key: &str) -> bool {
        if !columns.iter().any(|c| c.sortable && c.key == key) {
            return false;
        }
        self.sort = Some(next_sort(self.sort.as_ref(), key));
        tracing::debug!(key, direction = ?self.sort.as_ref().map(|s| s.direction), "sort changed");
        true
    }

    /// The sorted view for `rows`.  `generation` identifies the row
    /// collection; bump it whenever the caller replaces the data.  The sort
    /// state survives data changes.
    pub fn view<T: Record>(&mut self, rows: &[T], columns: &[Column<T>], generation: u64) -> &[usize] {
        let fresh = matches!(
            &self.memo,
            Some(m) if m.generation == generation && m.len == rows.len() && m.sort == self.sort
        );
        if !fresh {
            self.memo = Some(ViewMemo {
                generation,
                len: rows.len(),
                sort: self.sort.clone(),
                view: sorted_view(rows, columns, self.sort.as_ref()),
            });
        }
        self.memo.as_ref().map(|m| m.view.as_slice()).unwrap_or(&[])
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Ensure the selected row is visible within `height` rows.
    pub fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected - height + 1;
        }
    }
}

// ───────────────────────────────────────── model ─────────────

pub const DEFAULT_EMPTY_TEXT: &str = "No data available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub empty_text: String,
    /// Alternate row backgrounds.
    pub striped: bool,
    /// Highlight the selected row.
    pub hover: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            empty_text: DEFAULT_EMPTY_TEXT.to_string(),
            striped: true,
            hover: true,
        }
    }
}

/// Header sort marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMark {
    /// Column does not sort.
    Fixed,
    /// Sortable, not the active key.
    Inactive,
    Active(Direction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub align: Align,
    pub width: Option<u16>,
    pub badge: bool,
    pub mark: SortMark,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyRow {
    Data {
        /// Index into the caller's row slice.
        source: usize,
        cells: Vec<String>,
        /// Odd row of a striped table.
        alternate: bool,
    },
    /// Full-width empty-state row.
    Placeholder { message: String, span: usize },
}

/// Everything a renderer needs, with no reference back to the rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    pub header: Vec<HeaderCell>,
    pub body: Vec<BodyRow>,
    pub hover: bool,
}

/// Build the display model from columns, rows, and a sorted view.
pub fn build_model<T: Record>(
    columns: &[Column<T>],
    rows: &[T],
    view: &[usize],
    sort: Option<&SortState>,
    options: &TableOptions,
) -> TableModel {
    let header = columns
        .iter()
        .map(|col| HeaderCell {
            key: col.key.clone(),
            label: col.header.clone(),
            align: col.align,
            width: col.width,
            badge: col.badge,
            mark: match sort {
                _ if !col.sortable => SortMark::Fixed,
                Some(s) if s.key == col.key => SortMark::Active(s.direction),
                _ => SortMark::Inactive,
            },
        })
        .collect();

    let body = if rows.is_empty() {
        vec![BodyRow::Placeholder {
            message: options.empty_text.clone(),
            span: columns.len(),
        }]
    } else {
        view.iter()
            .enumerate()
            .filter_map(|(i, &source)| {
                let row = rows.get(source)?;
                Some(BodyRow::Data {
                    source,
                    cells: columns.iter().map(|c| c.cell(row)).collect(),
                    alternate: options.striped && i % 2 == 1,
                })
            })
            .collect()
    };

    TableModel {
        header,
        body,
        hover: options.hover,
    }
}

impl TableState {
    /// Compute the (memoized) view and build the model in one step.
    pub fn model<T: Record>(
        &mut self,
        columns: &[Column<T>],
        rows: &[T],
        generation: u64,
        options: &TableOptions,
    ) -> TableModel {
        let view = self.view(rows, columns, generation).to_vec();
        build_model(columns, rows, &view, self.sort.as_ref(), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(HashMap<&'static str, String>);

    fn row(pairs: &[(&'static str, &str)]) -> Row {
        Row(pairs.iter().map(|(k, v)| (*k, v.to_string())).collect())
    }

    impl Record for Row {
        fn field(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::new("k", "K").sortable(),
            Column::new("i", "I"),
        ]
    }

    fn keys(rows: &[Row], view: &[usize], key: &str) -> Vec<String> {
        view.iter().map(|&i| rows[i].field(key).unwrap_or_default()).collect()
    }

    #[test]
    fn sort_cycles_between_two_directions() {
        let cols = columns();
        let mut state = TableState::default();
        let mut seen = Vec::new();
        for _ in 0..3 {
            assert!(state.request_sort(&cols, "k"));
            seen.push(state.sort().unwrap().direction);
        }
        assert_eq!(
            seen,
            vec![Direction::Ascending, Direction::Descending, Direction::Ascending]
        );
    }

    #[test]
    fn switching_column_restarts_ascending() {
        let cols = vec![
            Column::<Row>::new("a", "A").sortable(),
            Column::<Row>::new("b", "B").sortable(),
        ];
        let mut state = TableState::default();
        state.request_sort(&cols, "a");
        state.request_sort(&cols, "a");
        state.request_sort(&cols, "b");
        assert_eq!(
            state.sort(),
            Some(&SortState {
                key: "b".into(),
                direction: Direction::Ascending
            })
        );
    }

    #[test]
    fn unsortable_columns_ignore_clicks() {
        let cols = columns();
        let mut state = TableState::default();
        assert!(!state.request_sort(&cols, "i"));
        assert!(!state.request_sort(&cols, "missing"));
        assert!(state.sort().is_none());
    }

    #[test]
    fn ties_keep_original_order() {
        let rows = vec![
            row(&[("k", "b"), ("i", "0")]),
            row(&[("k", "a"), ("i", "1")]),
            row(&[("k", "a"), ("i", "2")]),
        ];
        let sort = SortState {
            key: "k".into(),
            direction: Direction::Ascending,
        };
        let view = sorted_view(&rows, &columns(), Some(&sort));
        assert_eq!(keys(&rows, &view, "i"), vec!["1", "2", "0"]);
        // Input untouched.
        assert_eq!(rows[0].field("k").as_deref(), Some("b"));
    }

    #[test]
    fn numeric_strings_sort_as_text() {
        let rows: Vec<Row> = ["10", "2", "1"].iter().map(|v| row(&[("k", v)])).collect();
        let sort = SortState {
            key: "k".into(),
            direction: Direction::Ascending,
        };
        let view = sorted_view(&rows, &columns(), Some(&sort));
        assert_eq!(keys(&rows, &view, "k"), vec!["1", "10", "2"]);

        let desc = SortState {
            direction: Direction::Descending,
            ..sort
        };
        let view = sorted_view(&rows, &columns(), Some(&desc));
        assert_eq!(keys(&rows, &view, "k"), vec!["2", "10", "1"]);
    }

    #[test]
    fn missing_key_is_a_stable_no_op() {
        let rows: Vec<Row> = ["c", "a", "b"].iter().map(|v| row(&[("k", v)])).collect();
        let sort = SortState {
            key: "nope".into(),
            direction: Direction::Descending,
        };
        assert_eq!(sorted_view(&rows, &columns(), Some(&sort)), vec![0, 1, 2]);
    }

    #[test]
    fn opt_in_comparator_overrides_string_order() {
        let cols = vec![Column::<Row>::new("k", "K").sortable().compare(|a, b| {
            let n = |r: &Row| r.field("k").and_then(|v| v.parse::<i64>().ok()).unwrap_or(0);
            n(a).cmp(&n(b))
        })];
        let rows: Vec<Row> = ["10", "2", "1"].iter().map(|v| row(&[("k", v)])).collect();
        let sort = next_sort(None, "k");
        let view = sorted_view(&rows, &cols, Some(&sort));
        assert_eq!(keys(&rows, &view, "k"), vec!["1", "2", "10"]);
    }

    #[test]
    fn render_projection_and_missing_fields() {
        let cols = vec![
            Column::<Row>::new("k", "K").render(|r| format!("<{}>", r.field("k").unwrap_or_default())),
            Column::<Row>::new("absent", "Absent"),
        ];
        let rows = vec![row(&[("k", "x")])];
        let model = build_model(&cols, &rows, &[0], None, &TableOptions::default());
        assert_eq!(
            model.body,
            vec![BodyRow::Data {
                source: 0,
                cells: vec!["<x>".into(), String::new()],
                alternate: false
            }]
        );
    }

    #[test]
    fn empty_rows_render_one_spanning_placeholder() {
        for width in [1usize, 6] {
            let cols: Vec<Column<Row>> = (0..width).map(|i| Column::new(format!("c{i}"), "H")).collect();
            let model = build_model(&cols, &[], &[], None, &TableOptions::default());
            assert_eq!(model.header.len(), width);
            assert_eq!(
                model.body,
                vec![BodyRow::Placeholder {
                    message: DEFAULT_EMPTY_TEXT.into(),
                    span: width
                }]
            );
        }
    }

    #[test]
    fn model_is_idempotent() {
        let cols = columns();
        let rows: Vec<Row> = ["c", "a", "b"].iter().map(|v| row(&[("k", v)])).collect();
        let mut state = TableState::default();
        state.request_sort(&cols, "k");
        let options = TableOptions::default();
        let first = state.model(&cols, &rows, 1, &options);
        let second = state.model(&cols, &rows, 1, &options);
        assert_eq!(first, second);
        assert_eq!(first.header[0].mark, SortMark::Active(Direction::Ascending));
        assert_eq!(first.header[1].mark, SortMark::Fixed);
        assert!(!first.header[0].badge);
        assert!(matches!(first.body[1], BodyRow::Data { alternate: true, .. }));
    }

    #[test]
    fn sort_survives_new_data() {
        let cols = columns();
        let mut state = TableState::default();
        state.request_sort(&cols, "k");
        state.request_sort(&cols, "k");

        let page1: Vec<Row> = ["a", "b"].iter().map(|v| row(&[("k", v)])).collect();
        assert_eq!(state.view(&page1, &cols, 1), &[1, 0]);

        let page2: Vec<Row> = ["y", "z", "x"].iter().map(|v| row(&[("k", v)])).collect();
        assert_eq!(state.view(&page2, &cols, 2), &[1, 0, 2]);
        assert_eq!(state.sort().unwrap().direction, Direction::Descending);
    }
}

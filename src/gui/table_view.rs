//! Table Views
//! Read-only data table and a data grid with multi-row selection.

use crate::data::{cell_text, column_names};
use egui::RichText;
use egui_extras::{Column, TableBuilder};
use polars::prelude::DataFrame;
use std::collections::BTreeSet;

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 22.0;

/// Rows selected in the data grid, as positions in the current view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridSelection {
    rows: BTreeSet<usize>,
    anchor: Option<usize>,
}

impl GridSelection {
    /// Apply a click on `row`. A plain click toggles the row; a shift-click
    /// selects the range from the last clicked row.
    pub fn click(&mut self, row: usize, shift: bool) {
        match (shift, self.anchor) {
            (true, Some(anchor)) => {
                let (lo, hi) = if anchor <= row {
                    (anchor, row)
                } else {
                    (row, anchor)
                };
                self.rows.extend(lo..=hi);
            }
            _ => {
                if !self.rows.remove(&row) {
                    self.rows.insert(row);
                }
                self.anchor = Some(row);
            }
        }
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.anchor = None;
    }

    /// Drop rows that no longer exist after the view shrank.
    pub fn retain_below(&mut self, row_count: usize) {
        self.rows.retain(|&r| r < row_count);
        if self.anchor.is_some_and(|a| a >= row_count) {
            self.anchor = None;
        }
    }

    pub fn rows(&self) -> &BTreeSet<usize> {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Draw every row and column of `df` in a striped, scrollable table.
pub fn draw_table(ui: &mut egui::Ui, id: &str, df: &DataFrame, max_height: f32) {
    draw_frame(ui, id, df, max_height, None);
}

/// Draw the data grid; clicking rows edits `selection`.
pub fn draw_grid(
    ui: &mut egui::Ui,
    id: &str,
    df: &DataFrame,
    max_height: f32,
    selection: &mut GridSelection,
) {
    draw_frame(ui, id, df, max_height, Some(selection));
}

fn draw_frame(
    ui: &mut egui::Ui,
    id: &str,
    df: &DataFrame,
    max_height: f32,
    mut selection: Option<&mut GridSelection>,
) {
    let columns = column_names(df);
    if df.height() == 0 {
        ui.label(RichText::new("No rows").italics());
    }

    let mut table = TableBuilder::new(ui)
        .id_salt(id)
        .striped(true)
        .resizable(true)
        .max_scroll_height(max_height)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(60.0), columns.len());

    if selection.is_some() {
        table = table.sense(egui::Sense::click());
    }

    table
        .header(HEADER_HEIGHT, |mut header| {
            for name in &columns {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, df.height(), |mut row| {
                let index = row.index();
                if let Some(sel) = selection.as_deref() {
                    row.set_selected(sel.is_selected(index));
                }

                for name in &columns {
                    row.col(|ui| {
                        ui.label(cell_text(df, index, name));
                    });
                }

                if let Some(sel) = selection.as_deref_mut() {
                    let response = row.response();
                    if response.clicked() {
                        let shift = response.ctx.input(|i| i.modifiers.shift);
                        sel.click(index, shift);
                    }
                }
            });
        });
}

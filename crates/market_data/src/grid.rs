use common::models::{Instrument, Quote, Timeframe};

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub timeframe: Timeframe,
    /// `None` when the fetch for this cell failed.
    pub quote: Option<Quote>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub instrument: Instrument,
    pub cells: Vec<GridCell>,
}

/// Result of one grid fetch, kept in configured instrument-then-timeframe order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteGrid {
    rows: Vec<GridRow>,
}

impl QuoteGrid {
    pub fn with_capacity(rows: usize) -> Self {
        Self {
            rows: Vec::with_capacity(rows),
        }
    }

    pub fn push_row(&mut self, row: GridRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// Every cell in iteration order, absent ones included.
    pub fn cells(&self) -> impl Iterator<Item = (&Instrument, &Timeframe, Option<&Quote>)> {
        self.rows.iter().flat_map(|row| {
            row.cells
                .iter()
                .map(move |cell| (&row.instrument, &cell.timeframe, cell.quote.as_ref()))
        })
    }

    pub fn get(&self, instrument: &Instrument, timeframe: &Timeframe) -> Option<&Quote> {
        self.rows
            .iter()
            .find(|row| &row.instrument == instrument)?
            .cells
            .iter()
            .find(|cell| &cell.timeframe == timeframe)?
            .quote
            .as_ref()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).sum()
    }

    pub fn present_count(&self) -> usize {
        self.cells().filter(|(_, _, quote)| quote.is_some()).count()
    }
}

impl FromIterator<GridRow> for QuoteGrid {
    fn from_iter<I: IntoIterator<Item = GridRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> QuoteGrid {
        let quote = Quote::new(1.1, 1.2, 1.0).unwrap();
        [
            GridRow {
                instrument: "EUR/USD".into(),
                cells: vec![
                    GridCell { timeframe: "5min".into(), quote: Some(quote) },
                    GridCell { timeframe: "1h".into(), quote: None },
                ],
            },
            GridRow {
                instrument: "USD/JPY".into(),
                cells: vec![
                    GridCell { timeframe: "5min".into(), quote: None },
                    GridCell { timeframe: "1h".into(), quote: Some(quote) },
                ],
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn cells_iterate_instrument_then_timeframe() {
        let order: Vec<(String, String, bool)> = grid()
            .cells()
            .map(|(i, t, q)| (i.to_string(), t.to_string(), q.is_some()))
            .collect();

        assert_eq!(
            order,
            vec![
                ("EUR/USD".to_string(), "5min".to_string(), true),
                ("EUR/USD".to_string(), "1h".to_string(), false),
                ("USD/JPY".to_string(), "5min".to_string(), false),
                ("USD/JPY".to_string(), "1h".to_string(), true),
            ]
        );
    }

    #[test]
    fn counts_and_lookup() {
        let grid = grid();

        assert_eq!(grid.cell_count(), 4);
        assert_eq!(grid.present_count(), 2);
        assert!(grid.get(&"USD/JPY".into(), &"1h".into()).is_some());
        assert!(grid.get(&"USD/JPY".into(), &"5min".into()).is_none());
        assert!(grid.get(&"GBP/USD".into(), &"1h".into()).is_none());
    }
}

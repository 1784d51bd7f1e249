//! Available symbols and the current selection.

/// The user's current symbol choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    /// Symbol whose book is displayed.
    pub selected_symbol: String,
}

/// Symbols offered by the latest snapshot plus the selection.
///
/// Selection is never validated against the list: choosing a symbol the
/// feed does not carry is allowed and simply shows no book until it appears.
#[derive(Debug, Clone)]
pub struct SymbolCatalog {
    symbols: Vec<String>,
    selection: SelectionState,
}

impl SymbolCatalog {
    /// Create an empty catalog with `default_symbol` selected.
    pub fn new(default_symbol: impl Into<String>) -> Self {
        Self {
            symbols: Vec::new(),
            selection: SelectionState {
                selected_symbol: default_symbol.into(),
            },
        }
    }

    /// Symbols of the latest snapshot, in feed order.
    pub fn available_symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Replace the symbol list. The selection is left untouched.
    pub fn refresh(&mut self, symbols: Vec<String>) {
        self.symbols = symbols;
    }

    /// Currently selected symbol.
    pub fn selected(&self) -> &str {
        &self.selection.selected_symbol
    }

    /// Current selection state.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Position of the selected symbol in the list, if listed.
    pub fn selected_index(&self) -> Option<usize> {
        self.symbols
            .iter()
            .position(|s| *s == self.selection.selected_symbol)
    }

    /// Overwrite the selection.
    pub fn select(&mut self, symbol: impl Into<String>) {
        self.selection.selected_symbol = symbol.into();
    }

    /// Select the symbol at `index`. Returns false when out of range.
    pub fn select_index(&mut self, index: usize) -> bool {
        match self.symbols.get(index) {
            Some(symbol) => {
                self.selection.selected_symbol = symbol.clone();
                true
            }
            None => false,
        }
    }

    /// Move to the next symbol, wrapping around.
    pub fn select_next(&mut self) {
        if self.symbols.is_empty() {
            return;
        }
        let next = match self.selected_index() {
            Some(i) => (i + 1) % self.symbols.len(),
            None => 0,
        };
        self.select_index(next);
    }

    /// Move to the previous symbol, wrapping around.
    pub fn select_previous(&mut self) {
        if self.symbols.is_empty() {
            return;
        }
        let len = self.symbols.len();
        let previous = match self.selected_index() {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        };
        self.select_index(previous);
    }
}

/// A board table entry referencing a layout outside the catalog.
///
/// This means the table and the catalog were built from different
/// enumeration conventions; any inference against such a table would be
/// silently wrong, so loading must fail loudly and callers should abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display(
    "board table entry {value} at offset {offset} is outside the catalog (length {catalog_len})"
)]
pub struct TableRangeError {
    pub offset: usize,
    pub value: u32,
    pub catalog_len: usize,
}

/// One simulated run of the game's pseudo-random stream: the catalog index
/// drawn at each step.
///
/// Supplied externally, validated against the catalog length on ingestion,
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardTable {
    entries: Vec<u32>,
}

impl BoardTable {
    /// Validates and wraps a raw table.
    pub fn new(entries: Vec<u32>, catalog_len: usize) -> Result<Self, TableRangeError> {
        for (offset, &value) in entries.iter().enumerate() {
            if value as usize >= catalog_len {
                return Err(TableRangeError {
                    offset,
                    value,
                    catalog_len,
                });
            }
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[u32] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_in_range_entries() {
        let table = BoardTable::new(vec![0, 5, 9], 10).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.entries(), &[0, 5, 9]);
    }

    #[test]
    fn test_rejects_out_of_range_entry() {
        let err = BoardTable::new(vec![0, 5, 10], 10).unwrap_err();
        assert_eq!(
            err,
            TableRangeError {
                offset: 2,
                value: 10,
                catalog_len: 10
            }
        );
        assert_eq!(
            err.to_string(),
            "board table entry 10 at offset 2 is outside the catalog (length 10)"
        );
    }

    #[test]
    fn test_empty_table() {
        let table = BoardTable::new(vec![], 10).unwrap();
        assert!(table.is_empty());
    }
}

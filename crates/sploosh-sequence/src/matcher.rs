use crate::table::BoardTable;

/// Lazy search for an observed index sequence inside the board table.
///
/// Link 0 scans `window` entries starting at `start`; every later link
/// scans the `window` entries after its predecessor's position. Each item
/// yielded is one complete chain of table positions, one per observed
/// index, in depth-first order. The search state lives in an explicit
/// frame stack, so consumption is incremental: taking the first few
/// matches, or dropping the iterator entirely, does no further scanning.
///
/// An empty observed sequence yields exactly one empty match.
///
/// # Examples
///
/// ```
/// use sploosh_sequence::{BoardTable, SequenceMatches};
///
/// let table = BoardTable::new(vec![5, 2, 5, 2, 9], 10).unwrap();
/// let matches: Vec<Vec<usize>> = SequenceMatches::new(&table, &[5, 2], 0, 4).collect();
/// assert_eq!(matches, vec![vec![0, 1], vec![0, 3], vec![2, 3]]);
/// ```
#[derive(Debug)]
pub struct SequenceMatches<'a> {
    table: &'a [u32],
    observed: &'a [u32],
    window: usize,
    stack: Vec<Frame>,
    positions: Vec<usize>,
    yielded_trivial: bool,
}

#[derive(Debug)]
struct Frame {
    cursor: usize,
    limit: usize,
}

impl<'a> SequenceMatches<'a> {
    #[must_use]
    pub fn new(table: &'a BoardTable, observed: &'a [u32], start: usize, window: usize) -> Self {
        let table = table.entries();
        let mut stack = Vec::with_capacity(observed.len());
        if !observed.is_empty() {
            stack.push(Frame {
                cursor: start,
                limit: usize::min(table.len(), start.saturating_add(window)),
            });
        }
        Self {
            table,
            observed,
            window,
            stack,
            positions: Vec::with_capacity(observed.len()),
            yielded_trivial: false,
        }
    }
}

impl Iterator for SequenceMatches<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.observed.is_empty() {
            if self.yielded_trivial {
                return None;
            }
            self.yielded_trivial = true;
            return Some(Vec::new());
        }

        loop {
            let link = self.stack.len().checked_sub(1)?;
            let frame = self.stack.last_mut()?;

            let mut found = None;
            while frame.cursor < frame.limit {
                let position = frame.cursor;
                frame.cursor += 1;
                if self.table[position] == self.observed[link] {
                    found = Some(position);
                    break;
                }
            }

            match found {
                None => {
                    // Window exhausted; backtrack to the previous link.
                    self.stack.pop();
                    self.positions.pop();
                }
                Some(position) if link + 1 == self.observed.len() => {
                    let mut chain = self.positions.clone();
                    chain.push(position);
                    return Some(chain);
                }
                Some(position) => {
                    self.positions.push(position);
                    let from = position + 1;
                    self.stack.push(Frame {
                        cursor: from,
                        limit: usize::min(self.table.len(), from.saturating_add(self.window)),
                    });
                }
            }
        }
    }
}

use super::line::LineItem;

/// Text line prefixes that open a generated block, one per supported language
pub const HEADER_PREFIXES: &[&str] = &["Konsulent ydelser: ", "Consultancy services: "];

/// Text line prefixes that close a generated block, one per supported language
pub const FOOTER_PREFIXES: &[&str] = &["I alt: ", "Total: "];

/// Where a new block ended up in the lines of an existing invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The invoice had no generated block, the new block was appended at the end
    Appended,

    /// The generated block spanning `header..=footer` was replaced by the new block
    Replaced { header: usize, footer: usize },

    /// A header was found at index `header` but no footer after it. The new block was
    /// appended at the end and the orphaned header was left in place.
    AppendedAfterOrphanedHeader { header: usize },
}

impl Placement {
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::AppendedAfterOrphanedHeader { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Reconciled<L> {
    pub lines: Vec<L>,
    pub placement: Placement,
}

/// Returns the index of the first text line at or after `from_index` whose description
/// starts with one of `prefixes`.
pub fn find_marker<L: LineItem>(
    lines: &[L],
    prefixes: &[&str],
    from_index: usize,
) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .skip(from_index)
        .find(|(_, line)| {
            line.text_description().is_some_and(|description| {
                prefixes
                    .iter()
                    .any(|prefix| description.starts_with(prefix))
            })
        })
        .map(|(index, _)| index)
}

/// Splices `new_block` into `existing` in place of the first generated block.
///
/// Lines before the header and after the footer of the old block are kept as they are.
/// If `existing` has no generated block, `new_block` is appended. A header without a
/// matching footer is treated as hand-edited: nothing is removed and `new_block` is
/// appended, see [Placement::AppendedAfterOrphanedHeader].
pub fn replace_block<L: LineItem + Clone>(existing: &[L], new_block: &[L]) -> Reconciled<L> {
    let Some(header) = find_marker(existing, HEADER_PREFIXES, 0) else {
        return Reconciled {
            lines: appended(existing, new_block),
            placement: Placement::Appended,
        };
    };

    let Some(footer) = find_marker(existing, FOOTER_PREFIXES, header + 1) else {
        log::warn!(
            "Could not find matching footer line for the generated block starting at line {}, the block may be malformed. Appending the new block instead.",
            header + 1,
        );
        return Reconciled {
            lines: appended(existing, new_block),
            placement: Placement::AppendedAfterOrphanedHeader { header },
        };
    };

    log::debug!("Replacing generated block at lines {header}..={footer}");
    let lines = existing[..header]
        .iter()
        .chain(new_block)
        .chain(&existing[footer + 1..])
        .cloned()
        .collect();
    Reconciled {
        lines,
        placement: Placement::Replaced { header, footer },
    }
}

fn appended<L: Clone>(existing: &[L], new_block: &[L]) -> Vec<L> {
    existing.iter().chain(new_block).cloned().collect()
}

//! Description line repair.
//!
//! The table extractor puts currency-conversion annotations of a foreign
//! purchase on a line of their own:
//!   NETFLIX
//!   DOLLAR 12.00 USD
//!   AMAZON
//! Those lines are folded into the purchase above them, which gets a `*`.

/// Repair stacked description lines so they line up with dates and amounts.
///
/// Input without continuation lines is returned as-is (trimmed).
pub fn repair_descriptions<'a, M>(lines: impl IntoIterator<Item = &'a str>, markers: &[M]) -> Vec<String>
where
    M: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for line in lines {
        let line = line.trim();
        let continuation = markers.iter().any(|m| line.contains(m.as_ref()));
        if continuation {
            if let Some(prev) = out.last_mut() {
                prev.insert(0, '*');
                continue;
            }
        }
        out.push(line.to_string());
    }
    out
}

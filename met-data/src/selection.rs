use crate::error::ViewError;
use met_station::TimeTable;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Upper bound on the rows a parsed selection may name.
pub const MAX_PARSED_ROWS: usize = 1_000_000;

/// Rows of the current joined series chosen by the user.
///
/// `All` is the state with nothing brushed. An explicit empty set selects
/// zero rows. In JSON this is the string `"all"` or an array of row positions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Rows(BTreeSet<usize>),
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Selection::All => serializer.serialize_str("all"),
            Selection::Rows(rows) => rows.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Keyword(String),
            Rows(BTreeSet<usize>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Keyword(word) if word.eq_ignore_ascii_case("all") => Ok(Selection::All),
            Repr::Keyword(word) => Err(de::Error::custom(format!(
                "expected \"all\" or a list of row positions, found '{}'",
                word
            ))),
            Repr::Rows(rows) => Ok(Selection::Rows(rows)),
        }
    }
}

impl Selection {
    pub fn rows<I: IntoIterator<Item = usize>>(rows: I) -> Self {
        Selection::Rows(rows.into_iter().collect())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Row positions selected in a table of `len` rows, ascending.
    pub fn positions(&self, len: usize) -> Result<Vec<usize>, ViewError> {
        match self {
            Selection::All => Ok((0..len).collect()),
            Selection::Rows(rows) => {
                if let Some(&index) = rows.iter().find(|&&index| index >= len) {
                    return Err(ViewError::SelectionOutOfRange { index, len });
                }
                Ok(rows.iter().copied().collect())
            }
        }
    }

    /// The selected subset of `table`; borrows the table when everything is selected.
    pub fn apply<'a>(&self, table: &'a TimeTable) -> Result<Cow<'a, TimeTable>, ViewError> {
        match self {
            Selection::All => Ok(Cow::Borrowed(table)),
            Selection::Rows(_) => {
                let positions = self.positions(table.len())?;
                Ok(Cow::Owned(table.take_rows(positions)))
            }
        }
    }
}

/// Parses `all`, an empty string (no rows), or a comma list of row
/// positions and inclusive `start-end` ranges such as `0,3,7-9`.
///
/// A list naming more than [`MAX_PARSED_ROWS`] rows is rejected.
impl FromStr for Selection {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Selection::All);
        }
        let invalid = || ViewError::InvalidSelection(trimmed.to_string());
        let mut rows: BTreeSet<usize> = BTreeSet::new();
        for part in trimmed.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('-') {
                Some((start, end)) => {
                    let start: usize = start.trim().parse().map_err(|_| invalid())?;
                    let end: usize = end.trim().parse().map_err(|_| invalid())?;
                    if start > end || end - start >= MAX_PARSED_ROWS {
                        return Err(invalid());
                    }
                    rows.extend(start..=end);
                }
                None => {
                    rows.insert(part.parse::<usize>().map_err(|_| invalid())?);
                }
            }
            if rows.len() > MAX_PARSED_ROWS {
                return Err(invalid());
            }
        }
        Ok(Selection::Rows(rows))
    }
}

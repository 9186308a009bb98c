use serde::Serialize;

use crate::data::model::{CellValue, Dataset};
use crate::error::Result;

/// The two column kinds the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnKind {
    pub fn label(self) -> &'static str {
        match self {
            ColumnKind::Numeric => "Numeric",
            ColumnKind::Categorical => "Categorical",
        }
    }
}

/// Classify a column from its values.
///
/// A single finite number among the present values makes the whole column
/// `Numeric`; unparsable entries are later dropped from numeric reductions
/// rather than forcing `Categorical`. All-missing columns are `Categorical`.
pub fn classify<'a, I>(values: I) -> ColumnKind
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let any_numeric = values
        .into_iter()
        .filter(|v| !v.is_missing())
        .any(|v| v.as_f64().is_some());

    if any_numeric {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

/// The subset of `columns` classified as numeric, order preserved.
pub fn numeric_columns(dataset: &Dataset, columns: &[String]) -> Result<Vec<String>> {
    let mut numeric = Vec::new();
    for name in columns {
        if classify(dataset.column(name)?) == ColumnKind::Numeric {
            numeric.push(name.clone());
        }
    }
    Ok(numeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    #[test]
    fn numeric_column() {
        let vals = [CellValue::Number(1.0), CellValue::Missing, CellValue::Number(2.0)];
        assert_eq!(classify(&vals), ColumnKind::Numeric);
    }

    #[test]
    fn text_column() {
        let vals = [CellValue::from("a"), CellValue::from("b")];
        assert_eq!(classify(&vals), ColumnKind::Categorical);
    }

    #[test]
    fn all_missing_is_categorical() {
        let vals = [CellValue::Missing, CellValue::Text(String::new())];
        assert_eq!(classify(&vals), ColumnKind::Categorical);
        assert_eq!(classify(std::iter::empty()), ColumnKind::Categorical);
    }

    #[test]
    fn one_number_among_strings_is_numeric() {
        let mut vals: Vec<CellValue> = (0..999).map(|i| CellValue::Text(format!("s{i}"))).collect();
        vals.push(CellValue::Number(4.0));
        assert_eq!(classify(&vals), ColumnKind::Numeric);
    }

    #[test]
    fn numeric_text_counts() {
        let vals = [CellValue::from("x"), CellValue::from("12")];
        assert_eq!(classify(&vals), ColumnKind::Numeric);
    }

    #[test]
    fn numeric_subset_keeps_order() {
        let ds = Dataset::new(
            vec!["c".into(), "a".into(), "b".into()],
            vec![Row::new().with("c", 1.0).with("a", "x").with("b", 2.0)],
        )
        .unwrap();
        let all = ds.columns.clone();
        assert_eq!(numeric_columns(&ds, &all).unwrap(), vec!["c", "b"]);
        assert!(numeric_columns(&ds, &["zz".to_string()]).is_err());
    }
}

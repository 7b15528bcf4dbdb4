//! Pure construction of DynamoDB scan filters from a search query.

use super::PetSearchQuery;

/// A filter expression with its name and value placeholders.
///
/// Values are plain strings; the storage layer wraps them in attribute
/// values. A query without filters yields `None` from [`scan_filter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFilter {
    pub expression: String,
    pub names: Vec<(String, String)>,
    pub values: Vec<(String, String)>,
}

/// Builds `#a = :a AND #b = :b` for every present query field.
///
/// ```
/// use petadoptions_core::pet::{scan_filter, PetSearchQuery};
///
/// let filter = scan_filter(&PetSearchQuery::by_type("puppy")).unwrap();
/// assert_eq!(filter.expression, "#pettype = :pettype");
/// assert!(scan_filter(&PetSearchQuery::default()).is_none());
/// ```
pub fn scan_filter(query: &PetSearchQuery) -> Option<ScanFilter> {
    let filters = query.filters();
    if filters.is_empty() {
        return None;
    }

    let expression = filters
        .iter()
        .map(|(name, _)| format!("#{name} = :{name}"))
        .collect::<Vec<_>>()
        .join(" AND ");

    let names = filters
        .iter()
        .map(|(name, _)| (format!("#{name}"), name.to_string()))
        .collect();

    let values = filters
        .iter()
        .map(|(name, value)| (format!(":{name}"), value.to_string()))
        .collect();

    Some(ScanFilter {
        expression,
        names,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters() {
        assert_eq!(scan_filter(&PetSearchQuery::default()), None);
    }

    #[test]
    fn test_all_filters() {
        let query = PetSearchQuery {
            pettype: Some("kitten".to_string()),
            petcolor: Some("black".to_string()),
            petid: Some("010".to_string()),
        };

        let filter = scan_filter(&query).unwrap();

        assert_eq!(
            filter.expression,
            "#pettype = :pettype AND #petcolor = :petcolor AND #petid = :petid"
        );
        assert_eq!(
            filter.names,
            vec![
                ("#pettype".to_string(), "pettype".to_string()),
                ("#petcolor".to_string(), "petcolor".to_string()),
                ("#petid".to_string(), "petid".to_string()),
            ]
        );
        assert_eq!(filter.values[2], (":petid".to_string(), "010".to_string()));
    }

    #[test]
    fn test_single_color_filter() {
        let query = PetSearchQuery {
            petcolor: Some("white".to_string()),
            ..Default::default()
        };

        let filter = scan_filter(&query).unwrap();

        assert_eq!(filter.expression, "#petcolor = :petcolor");
        assert_eq!(filter.values, vec![(":petcolor".to_string(), "white".to_string())]);
    }
}

use std::fmt;

use super::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Case-insensitive `asc` / `desc`. Absent or blank means the default.
    pub fn parse(raw: Option<&str>) -> Result<Self, QueryError> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(SortOrder::default()),
            Some(s) if s.eq_ignore_ascii_case("asc") => Ok(SortOrder::Asc),
            Some(s) if s.eq_ignore_ascii_case("desc") => Ok(SortOrder::Desc),
            Some(other) => Err(QueryError::InvalidSortOrder(other.to_string())),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Closed set of columns a resource may be ordered by.
///
/// Implemented through [`sort_fields!`](crate::sort_fields); the column
/// names are string literals fixed at compile time, so nothing a caller
/// sends ever reaches the ORDER BY clause verbatim.
pub trait SortField: Copy + fmt::Debug + Send + Sync + 'static {
    const DEFAULT: Self;

    fn column(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F: SortField> {
    pub field: F,
    pub order: SortOrder,
}

impl<F: SortField> Sort<F> {
    /// Unknown field names fall back to the resource default; a bad
    /// direction is rejected.
    pub fn parse(sort_by: Option<&str>, sort_order: Option<&str>) -> Result<Self, QueryError> {
        let order = SortOrder::parse(sort_order)?;
        let field = sort_by
            .map(str::trim)
            .and_then(F::from_name)
            .unwrap_or(F::DEFAULT);
        Ok(Self { field, order })
    }
}

impl<F: SortField> Default for Sort<F> {
    fn default() -> Self {
        Self {
            field: F::DEFAULT,
            order: SortOrder::default(),
        }
    }
}

/// Declare a sort allow-list enum and its column mapping.
///
/// ```ignore
/// sort_fields! {
///     pub enum PartnerSort {
///         Name => "name",
///         CreatedAt => "created_at",
///     }
///     default CreatedAt
/// }
/// ```
#[macro_export]
macro_rules! sort_fields {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $column:literal),+ $(,)?
        }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::query::SortField for $name {
            const DEFAULT: Self = $name::$default;

            fn column(self) -> &'static str {
                match self {
                    $($name::$variant => $column),+
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($column => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::sort_fields! {
        enum WidgetSort {
            Name => "name",
            CreatedAt => "created_at",
        }
        default CreatedAt
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!(SortOrder::parse(None).unwrap(), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("")).unwrap(), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("ASC")).unwrap(), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("desc")).unwrap(), SortOrder::Desc);
        assert!(matches!(
            SortOrder::parse(Some("sideways")),
            Err(QueryError::InvalidSortOrder(_))
        ));
    }

    #[test]
    fn test_known_field_is_accepted() {
        let sort = Sort::<WidgetSort>::parse(Some("name"), Some("asc")).unwrap();
        assert_eq!(sort.field, WidgetSort::Name);
        assert_eq!(sort.field.column(), "name");
        assert_eq!(sort.order, SortOrder::Asc);
    }

    #[test]
    fn test_unknown_field_falls_back_to_default() {
        let sort = Sort::<WidgetSort>::parse(Some("name; DROP TABLE widgets"), None).unwrap();
        assert_eq!(sort.field, WidgetSort::CreatedAt);
        assert_eq!(sort.order, SortOrder::Desc);
    }

    #[test]
    fn test_bad_order_is_rejected_even_with_valid_field() {
        assert!(Sort::<WidgetSort>::parse(Some("name"), Some("up")).is_err());
    }
}

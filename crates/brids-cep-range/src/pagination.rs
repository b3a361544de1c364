//! Continuation state between pages of a range search.

/// Rows per page the Correios site uses when it does not say otherwise.
pub const DEFAULT_ROWS_PER_PAGE: u32 = 50;

/// Cursor parsed from one result page's "Proxima" form.
///
/// The default cursor stands for "no previous page": it carries no
/// continuation fields and [`has_more`](Self::has_more) is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationCursor {
    /// `qtdrow`
    pub rows_per_page: u32,
    /// `pagini`, first row of the next page
    pub start: String,
    /// `pagfim`, last row of the next page
    pub end: String,
    /// `Localidade` echoed back by the site
    pub location: String,
    /// `Bairro` echoed back by the site
    pub neighborhood: String,
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            start: "0".to_string(),
            end: "0".to_string(),
            location: String::new(),
            neighborhood: String::new(),
        }
    }
}

impl PaginationCursor {
    /// Whether another page must be requested.
    ///
    /// Both row markers must be positive; markers that are not numbers count
    /// as zero.
    #[must_use]
    pub fn has_more(&self) -> bool {
        marker(&self.start) > 0 && marker(&self.end) > 0
    }

    /// Form fields for the request that follows this cursor.
    ///
    /// `UF` and `Localidade` are always sent; the continuation fields only
    /// when this cursor has more pages.
    #[must_use]
    pub fn form_fields(&self, state: &str) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("UF", state.to_string()),
            ("Localidade", self.location.clone()),
        ];

        if self.has_more() {
            fields.push(("Bairro", self.neighborhood.clone()));
            fields.push(("pagini", self.start.clone()));
            fields.push(("pagfim", self.end.clone()));
            fields.push(("qtdrow", self.rows_per_page.to_string()));
        }

        fields
    }
}

fn marker(value: &str) -> u64 {
    value.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(start: &str, end: &str) -> PaginationCursor {
        PaginationCursor {
            start: start.to_string(),
            end: end.to_string(),
            ..PaginationCursor::default()
        }
    }

    #[test]
    fn test_default_has_no_more() {
        let cursor = PaginationCursor::default();
        assert!(!cursor.has_more());
        assert_eq!(cursor.rows_per_page, 50);
    }

    #[test]
    fn test_has_more_requires_both_markers() {
        assert!(cursor("51", "100").has_more());
        assert!(!cursor("0", "100").has_more());
        assert!(!cursor("51", "0").has_more());
        assert!(!cursor("", "100").has_more());
        assert!(!cursor("abc", "100").has_more());
        assert!(cursor(" 51 ", "100").has_more());
    }

    #[test]
    fn test_first_page_fields() {
        let fields = PaginationCursor::default().form_fields("DF");
        assert_eq!(
            fields,
            vec![("UF", "DF".to_string()), ("Localidade", String::new())]
        );
    }

    #[test]
    fn test_continuation_fields() {
        let next = PaginationCursor {
            rows_per_page: 50,
            start: "51".to_string(),
            end: "100".to_string(),
            location: String::new(),
            neighborhood: String::new(),
        };
        let names: Vec<_> = next.form_fields("MG").into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            names,
            vec!["UF", "Localidade", "Bairro", "pagini", "pagfim", "qtdrow"]
        );
        assert!(next
            .form_fields("MG")
            .contains(&("qtdrow", "50".to_string())));
    }
}

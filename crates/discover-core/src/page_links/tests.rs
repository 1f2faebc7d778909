//! Tests for pagination link parsing

use super::*;

const FIRST_PAGE: &str = r#"<https://sentry.io/api/0/organizations/acme/discover/saved/?cursor=0:0:1>; rel="previous"; results="false"; cursor="0:0:1", <https://sentry.io/api/0/organizations/acme/discover/saved/?cursor=0:20:0>; rel="next"; results="true"; cursor="0:20:0""#;

const SECOND_PAGE: &str = r#"<https://sentry.io/api/0/organizations/acme/discover/saved/?cursor=0:0:1>; rel="previous"; results="true"; cursor="0:0:1", <https://sentry.io/api/0/organizations/acme/discover/saved/?cursor=0:40:0>; rel="next"; results="false"; cursor="0:40:0""#;

mod page_links_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_descriptor() {
        let links = PageLinks::parse(FIRST_PAGE).unwrap();

        assert_eq!(
            links.previous,
            Some(PageLink {
                href: Some(
                    "https://sentry.io/api/0/organizations/acme/discover/saved/?cursor=0:0:1"
                        .to_string()
                ),
                rel: "previous".to_string(),
                results: Some(false),
                cursor: Some("0:0:1".to_string()),
            })
        );
        assert_eq!(links.next_cursor(), Some("0:20:0"));
        assert!(links.has_next_results());
        assert!(!links.has_previous_results());
    }

    #[test]
    fn test_empty_descriptor_has_no_links() {
        assert_eq!(PageLinks::parse("").unwrap(), PageLinks::default());
        assert_eq!(PageLinks::parse("   ").unwrap(), PageLinks::default());
    }

    #[test]
    fn test_entry_without_href_is_accepted() {
        let links = PageLinks::parse(r#"rel="previous"; results="true""#).unwrap();
        let previous = links.previous.unwrap();
        assert_eq!(previous.href, None);
        assert_eq!(previous.results, Some(true));
    }

    #[test]
    fn test_bare_attribute_values() {
        let links = PageLinks::parse("<a>; rel=next; results=false; cursor=0:5:0").unwrap();
        let next = links.next.unwrap();
        assert_eq!(next.results, Some(false));
        assert_eq!(next.cursor.as_deref(), Some("0:5:0"));
    }

    #[test]
    fn test_comma_inside_href_does_not_split() {
        let links = PageLinks::parse(r#"<https://host/?a=1,2>; rel="next""#).unwrap();
        assert_eq!(
            links.next.unwrap().href.as_deref(),
            Some("https://host/?a=1,2")
        );
    }

    #[test]
    fn test_unknown_relations_are_ignored() {
        let links = PageLinks::parse(r#"<a>; rel="first", <b>; rel="next""#).unwrap();
        assert!(links.previous.is_none());
        assert_eq!(links.next.unwrap().href.as_deref(), Some("b"));
    }

    #[test]
    fn test_missing_rel_is_an_error() {
        let err = PageLinks::parse(r#"<a>; results="true""#).unwrap_err();
        assert!(matches!(err, LinkParseError::MissingRel(_)));
    }

    #[test]
    fn test_unterminated_href_is_an_error() {
        let err = PageLinks::parse(r#"<https://host/; rel="previous""#).unwrap_err();
        assert_eq!(err, LinkParseError::Unterminated("angle bracket"));
    }

    #[test]
    fn test_unterminated_quote_is_an_error() {
        let err = PageLinks::parse(r#"<a>; rel="previous"#).unwrap_err();
        assert_eq!(err, LinkParseError::Unterminated("quote"));
    }

    #[test]
    fn test_invalid_results_value_is_an_error() {
        let err = PageLinks::parse(r#"<a>; rel="previous"; results="maybe""#).unwrap_err();
        assert_eq!(err, LinkParseError::InvalidResults("maybe".to_string()));
    }

    #[test]
    fn test_attribute_without_equals_is_an_error() {
        let err = PageLinks::parse(r#"<a>; rel="previous"; nonsense"#).unwrap_err();
        assert!(matches!(err, LinkParseError::MalformedAttribute(_)));
    }
}

mod pagination_state_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_previous_entry() {
        let state = PaginationState::parse(r#"<a>; rel="next"; results="true""#);
        assert!(!state.has_previous);
        assert!(state.is_first_page());
    }

    #[test]
    fn test_previous_without_results_is_first_page() {
        let state = PaginationState::parse(FIRST_PAGE);
        assert!(state.has_previous);
        assert!(!state.previous_has_results);
        assert!(state.is_first_page());
    }

    #[test]
    fn test_previous_with_results_is_not_first_page() {
        let state = PaginationState::parse(SECOND_PAGE);
        assert!(state.has_previous);
        assert!(state.previous_has_results);
        assert!(!state.is_first_page());
    }

    #[test]
    fn test_missing_results_attribute_counts_as_results() {
        let state = PaginationState::parse(r#"<a>; rel="previous"; cursor="0:0:1""#);
        assert!(state.has_previous);
        assert!(state.previous_has_results);
        assert!(!state.is_first_page());
    }

    #[test]
    fn test_malformed_descriptor_fails_open() {
        for raw in [
            "garbage",
            r#"<unterminated; rel="previous""#,
            r#"<a>; rel="previous"; results="yes""#,
            r#"<a>; results="true""#,
        ] {
            let state = PaginationState::parse(raw);
            assert_eq!(state, PaginationState::default(), "descriptor {raw:?}");
            assert!(state.is_first_page());
        }
    }

    #[test]
    fn test_empty_descriptor_is_first_page() {
        assert!(PaginationState::parse("").is_first_page());
    }
}

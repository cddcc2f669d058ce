#[cfg(test)]
mod tests {
    use crate::config::{PageSelectors, SiteConfig};
    use crate::error::{LoadError, ParseError};
    use crate::executor::Executor;
    use crate::news::*;
    use crate::transport::stub::{self, FixedTransport};
    use crate::types::{LinkSummary, Sel};
    use url::Url;

    const TWO_LINKS: &str =
        r#"<li><a href="/a">Title A</a></li><li><a href="/b">Title B</a></li>"#;

    const ARTICLE: &str = r#"
        <html><body>
          <div id="mount"><div>
            <div class="afe4286c">
              <h2>  Plane crash near
                  Lafayette airport </h2>
              <div>Updated 1:28 PM ET, Sat December 28, 2019</div>
              <div>
                <p>(CNN) - At least five people died.</p>
                <p>One person on board   survived.</p>
                <p>This is a developing story.</p>
              </div>
            </div>
          </div></div>
        </body></html>
    "#;

    fn config() -> SiteConfig {
        SiteConfig::new(Url::parse("https://lite.example.com").unwrap())
    }

    #[test]
    fn parse_links_keeps_document_order() {
        let links = parse_links(TWO_LINKS, &PageSelectors::default()).unwrap();
        assert_eq!(
            links,
            vec![
                LinkSummary {
                    id: "/a".into(),
                    title: "Title A".into()
                },
                LinkSummary {
                    id: "/b".into(),
                    title: "Title B".into()
                },
            ]
        );
    }

    #[test]
    fn parse_links_without_items_is_empty() {
        let links = parse_links("<p>nothing today</p>", &PageSelectors::default()).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn parse_links_fails_whole_list_on_missing_child() {
        let html = r#"<li><a href="/a">Title A</a></li><li></li>"#;
        let err = parse_links(html, &PageSelectors::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingChild {
                selector: "li".into(),
                index: 1
            }
        );
    }

    #[test]
    fn parse_links_fails_on_missing_href() {
        let html = r#"<li><span>No link</span></li>"#;
        let err = parse_links(html, &PageSelectors::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingAttribute {
                attribute: "href".into(),
                index: 0
            }
        );
    }

    #[test]
    fn parse_links_reports_bad_selector() {
        let selectors = PageSelectors {
            link_item: Sel("li[".into()),
            ..PageSelectors::default()
        };
        let err = parse_links(TWO_LINKS, &selectors).unwrap_err();
        assert!(matches!(err, ParseError::InvalidSelector { .. }));
    }

    #[test]
    fn parse_detail_extracts_fields() {
        let detail = parse_detail("/en/article/h_1", ARTICLE, &PageSelectors::default()).unwrap();
        assert_eq!(detail.id, "/en/article/h_1");
        assert_eq!(detail.title, "Plane crash near Lafayette airport");
        assert_eq!(detail.updated_label, "Updated 1:28 PM ET, Sat December 28, 2019");
        assert_eq!(
            detail.content,
            "(CNN) - At least five people died.\n\nOne person on board survived.\n\nThis is a developing story."
        );
        assert_eq!(detail.paragraphs().count(), 3);
    }

    #[test]
    fn parse_detail_requires_content_container() {
        let html = r#"<h2>Only a title</h2>"#;
        let err = parse_detail("x", html, &PageSelectors::default()).unwrap_err();
        assert!(matches!(err, ParseError::MissingNode { .. }));
    }

    #[test]
    fn parse_detail_with_custom_selectors() {
        let selectors = PageSelectors {
            title: Sel("h1".into()),
            updated: Sel(".stamp".into()),
            content: Sel("article".into()),
            ..PageSelectors::default()
        };
        let html = r#"<h1>Headline</h1><span class="stamp">today</span>
            <article><p>one</p><p>two</p></article>"#;
        let detail = parse_detail("id-9", html, &selectors).unwrap();
        assert_eq!(detail.title, "Headline");
        assert_eq!(detail.updated_label, "today");
        assert_eq!(detail.content, "one\n\ntwo");
    }

    #[test]
    fn links_endpoint_targets_base_url_as_xml() {
        let e = links_endpoint(&config());
        let r = e.request();
        assert_eq!(r.url.as_str(), "https://lite.example.com/");
        assert_eq!(r.header("accept"), Some("application/xml"));
        assert!(r.header("user-agent").is_some());
        assert_eq!(r.timeout, config().timeout());
    }

    #[test]
    fn detail_endpoint_appends_identifier() {
        let e = detail_endpoint(&config(), "/en/article/h_68985f0b");
        assert_eq!(
            e.url().as_str(),
            "https://lite.example.com/en/article/h_68985f0b"
        );
        assert_eq!(e.request().header("accept"), Some("application/xml"));
    }

    #[test]
    fn detail_endpoint_uses_href_as_found() {
        let escaped = detail_endpoint(&config(), "/en/article/caf%C3%A9");
        assert_eq!(
            escaped.url().as_str(),
            "https://lite.example.com/en/article/caf%C3%A9"
        );
        let with_query = detail_endpoint(&config(), "/en/article?id=3");
        assert_eq!(
            with_query.url().as_str(),
            "https://lite.example.com/en/article?id=3"
        );
    }

    #[tokio::test]
    async fn links_round_trip_through_executor() {
        let transport = FixedTransport::new(stub::http(200, TWO_LINKS));
        let executor = Executor::new(transport.clone());
        let links = executor.load(&links_endpoint(&config())).await.unwrap();
        assert_eq!(
            links,
            vec![
                LinkSummary {
                    id: "/a".into(),
                    title: "Title A".into()
                },
                LinkSummary {
                    id: "/b".into(),
                    title: "Title B".into()
                },
            ]
        );
        assert_eq!(transport.calls(), 1);
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url.as_str(), "https://lite.example.com/");
    }

    #[tokio::test]
    async fn malformed_item_fails_the_load() {
        let executor = Executor::new(FixedTransport::new(stub::http(200, "<li></li>")));
        let err = executor.load(&links_endpoint(&config())).await.unwrap_err();
        assert!(matches!(
            err,
            LoadError::ParseFailure(ParseError::MissingChild { index: 0, .. })
        ));
    }

    #[tokio::test]
    async fn detail_round_trip_through_executor() {
        let executor = Executor::new(FixedTransport::new(stub::http(200, ARTICLE)));
        let detail = executor
            .load(&detail_endpoint(&config(), "/en/article/h_1"))
            .await
            .unwrap();
        assert_eq!(detail.id, "/en/article/h_1");
        assert_eq!(detail.title, "Plane crash near Lafayette airport");
    }

    #[tokio::test]
    async fn detail_not_found_is_a_status_error() {
        let executor = Executor::new(FixedTransport::new(stub::http(404, "<h2>gone</h2>")));
        let err = executor
            .load(&detail_endpoint(&config(), "/missing"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(404));
    }
}

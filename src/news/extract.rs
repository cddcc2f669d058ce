use super::utils::{compile, first_child_element, select_first, text_of};
use crate::config::PageSelectors;
use crate::error::ParseError;
use crate::types::{ArticleDetail, LinkSummary};
use scraper::{ElementRef, Html};

/// Every index entry in document order.
///
/// Each node matched by `selectors.link_item` must have a child element with
/// an `href`; one bad entry fails the whole list.
pub fn parse_links(html: &str, selectors: &PageSelectors) -> Result<Vec<LinkSummary>, ParseError> {
    let doc = Html::parse_document(html);
    let item = compile(&selectors.link_item)?;

    doc.select(&item)
        .enumerate()
        .map(|(index, node)| -> Result<LinkSummary, ParseError> {
            let child = first_child_element(&node).ok_or_else(|| ParseError::MissingChild {
                selector: selectors.link_item.0.clone(),
                index,
            })?;
            let href = child
                .value()
                .attr("href")
                .ok_or_else(|| ParseError::MissingAttribute {
                    attribute: "href".into(),
                    index,
                })?;
            Ok(LinkSummary {
                id: href.to_string(),
                title: text_of(&node),
            })
        })
        .collect()
}

/// One article page.
pub fn parse_detail(
    id: &str,
    html: &str,
    selectors: &PageSelectors,
) -> Result<ArticleDetail, ParseError> {
    let doc = Html::parse_document(html);

    let title = text_of(&select_first(&doc, &selectors.title)?);
    let updated_label = text_of(&select_first(&doc, &selectors.updated)?);
    let content = select_first(&doc, &selectors.content)?
        .children()
        .filter_map(ElementRef::wrap)
        .map(|p| text_of(&p))
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(ArticleDetail {
        id: id.to_string(),
        title,
        updated_label,
        content,
    })
}
